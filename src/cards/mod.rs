//! Card definitions and the catalog decks are built from.
//!
//! - `Card`: static card data (attack, cost, element, art)
//! - `CardCatalog`: validated, read-only set of cards

pub mod definition;
pub mod catalog;

pub use definition::{ArtRef, Card, CardId, Element};
pub use catalog::CardCatalog;
