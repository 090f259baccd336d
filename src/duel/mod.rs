//! The duel: turn/phase state machine, mana actions and snapshots.
//!
//! [`Duel`] owns a [`GameState`](crate::core::GameState) and is the only
//! thing that mutates it. Callers drive it with commands and read it back
//! through queries, [`DuelSnapshot`] or the queued
//! [`GameEvent`](crate::events::GameEvent)s.

mod machine;
mod mana_action;
mod snapshot;

pub use machine::Duel;
pub use snapshot::{AvailableActions, DuelSnapshot};
