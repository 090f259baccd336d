//! # elemental-duel
//!
//! Engine for a two-player elemental card duel: a human player against a
//! scripted opponent, best score when the hands run out.
//!
//! ## Turn structure
//!
//! 1. **Mana gain**: both sides discard one card for mana equal to its
//!    attack (skipped when either hand holds one card or fewer).
//! 2. **Card selection**: an optional mana action (boost, mulligan or
//!    skip), then a card is committed. With nothing affordable the player
//!    forfeits the turn.
//! 3. **Battle**: higher attack wins; equal attacks fall back to the
//!    element table.
//!
//! ## Design Principles
//!
//! - **Deterministic**: all randomness flows through a seeded
//!   [`GameRng`], so a seed replays a match exactly.
//! - **Command in, events out**: the UI sends [`Command`]s and drains
//!   [`GameEvent`]s; the engine never calls back into it.
//! - **Persistent Data Structures**: decks, hands and history use `im` so
//!   cloning a state is O(1).
//!
//! ## Modules
//!
//! - `core`: sides, state, commands, RNG, configuration, errors
//! - `cards`: card definitions, elements and the catalog
//! - `zones`: deck and hand management
//! - `mana`: mana ledger, boost and mulligan prices
//! - `rules`: element advantage and battle resolution
//! - `policy`: opponent decision policies
//! - `events`: engine events for presentation layers
//! - `duel`: the turn/phase state machine

pub mod core;
pub mod cards;
pub mod zones;
pub mod mana;
pub mod rules;
pub mod policy;
pub mod events;
pub mod duel;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap,
    GameRng,
    MatchConfig, Phase, SelectionStep,
    ActionRecord, Command, Decision, ManaAction,
    CatalogError, ConfigError, DeckError, EngineWarning, Rejection,
    BattleRecord, GameState,
};

pub use crate::cards::{ArtRef, Card, CardCatalog, CardId, Element};

pub use crate::zones::{Deck, Hand};

pub use crate::mana::{BoostTier, MulliganOption};

pub use crate::rules::{beats, resolve, BattleReport, MatchResult, Outcome};

pub use crate::policy::{GreedyOpponent, OpponentPolicy, PlayChoice};

pub use crate::events::GameEvent;

pub use crate::duel::{AvailableActions, Duel, DuelSnapshot};
