//! Deck and hand management.
//!
//! Each side owns one deck and one hand. Cards move deck → hand by draw,
//! hand → deck by mulligan, and leave a hand when discarded or played.

mod manager;

pub use manager::{build_deck, draw, return_to_deck, shuffle, take, Deck, Hand};
