//! Opponent decision policies.
//!
//! - `OpponentPolicy`: trait the duel calls when the opponent must act
//! - `GreedyOpponent`: the default scripted behaviour

mod opponent;

pub use opponent::{GreedyOpponent, OpponentPolicy, PlayChoice};
