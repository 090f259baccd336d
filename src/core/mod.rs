//! Core engine types: sides, state, commands, RNG, configuration, errors.

pub mod side;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;

pub use side::{Side, SideMap};
pub use rng::GameRng;
pub use config::{MatchConfig, Phase, SelectionStep};
pub use action::{ActionRecord, Command, Decision, ManaAction};
pub use error::{CatalogError, ConfigError, DeckError, EngineWarning, Rejection};
pub use state::{BattleRecord, GameState, PendingPlay};
