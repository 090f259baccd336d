//! Match configuration and the phase vocabulary.
//!
//! - `Phase`: the step of a turn (mana gain, card selection, battle)
//! - `SelectionStep`: sub-state of card selection
//! - `MatchConfig`: values read once when a match starts

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// The current step of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Both sides pick the card to fight with.
    CardSelection,
    /// Both sides discard one card for mana.
    ManaGain,
    /// Played cards are waiting to be compared.
    Battle,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::CardSelection => "CardSelection",
            Phase::ManaGain => "ManaGain",
            Phase::Battle => "Battle",
        };
        f.write_str(name)
    }
}

/// Sub-state of `Phase::CardSelection`.
///
/// Only meaningful while the phase is `CardSelection`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionStep {
    /// Player may boost, mulligan or skip before picking a card.
    AwaitingManaAction,
    /// Player must pick the card to play.
    #[default]
    AwaitingPlay,
}

/// Complete match configuration.
///
/// Read once at match start; `Duel::restart` takes a fresh one.
///
/// ## Example
///
/// ```
/// use elemental_duel::core::MatchConfig;
///
/// let config = MatchConfig::new()
///     .with_deck_size(30)
///     .with_initial_hand_size(4)
///     .with_decision_time_limit_ms(10_000)
///     .with_seed(7);
///
/// assert!(config.has_time_limit());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Cards sampled into each side's deck.
    pub deck_size: usize,

    /// Cards drawn into each hand before the first turn.
    pub initial_hand_size: usize,

    /// Card selection time limit in milliseconds. 0 means unlimited.
    pub decision_time_limit_ms: u64,

    /// Starting mana for both sides.
    pub initial_mana: i32,

    /// RNG seed. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            deck_size: 20,
            initial_hand_size: 5,
            decision_time_limit_ms: 0,
            initial_mana: 0,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deck size.
    #[must_use]
    pub fn with_deck_size(mut self, size: usize) -> Self {
        self.deck_size = size;
        self
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    /// Set the card selection time limit (0 = unlimited).
    #[must_use]
    pub fn with_decision_time_limit_ms(mut self, limit_ms: u64) -> Self {
        self.decision_time_limit_ms = limit_ms;
        self
    }

    /// Set the starting mana for both sides.
    #[must_use]
    pub fn with_initial_mana(mut self, mana: i32) -> Self {
        self.initial_mana = mana;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Is card selection time-limited?
    #[must_use]
    pub fn has_time_limit(&self) -> bool {
        self.decision_time_limit_ms > 0
    }

    /// Check the configuration for values a match cannot start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_hand_size > self.deck_size {
            return Err(ConfigError::HandExceedsDeck {
                hand: self.initial_hand_size,
                deck: self.deck_size,
            });
        }
        if self.initial_mana < 0 {
            return Err(ConfigError::NegativeInitialMana(self.initial_mana));
        }
        Ok(())
    }
}
