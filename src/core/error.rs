//! Error and warning types.
//!
//! Commands never panic on bad input: they return a `Rejection` and leave
//! the duel untouched. Degraded-but-playable conditions found at startup
//! are reported as `EngineWarning`s instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::{Phase, SelectionStep};
use crate::cards::CardId;

/// Why a command was refused. The duel state is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("hand index {index} is out of range (hand has {len} cards)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("expected phase {expected}, but the duel is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("expected step {expected:?}, but card selection is at {actual:?}")]
    WrongStep {
        expected: SelectionStep,
        actual: SelectionStep,
    },

    #[error("card costs {cost} but only {mana} mana is available")]
    CannotAfford { cost: u32, mana: i32 },

    #[error("a played card is already waiting for battle resolution")]
    SelectionPending,

    #[error("boost tier {0} does not exist")]
    InvalidBoostTier(u8),

    #[error("boost costs {cost} but only {mana} mana is available")]
    BoostUnaffordable { cost: u32, mana: i32 },

    #[error("mulligan needs 3 mana and 1 card (have {mana} mana, {hand} cards)")]
    MulliganUnavailable { mana: i32, hand: usize },

    #[error("the match is over")]
    MatchOver,

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Deck construction failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("cannot build a deck from an empty catalog")]
    EmptyCatalog,
}

/// Catalog ingestion failures.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("malformed catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("card id {0} appears more than once")]
    DuplicateId(CardId),
}

/// Configuration values a match cannot start from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial hand of {hand} cards exceeds deck size {deck}")]
    HandExceedsDeck { hand: usize, deck: usize },

    #[error("initial mana {0} is negative")]
    NegativeInitialMana(i32),
}

/// Non-fatal conditions surfaced when a match starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineWarning {
    /// The catalog had no cards, so both decks are empty.
    EmptyCatalog,
}
