//! Commands accepted by a duel and the decisions it records.
//!
//! A presentation layer translates input into `Command` values and hands
//! them to `Duel::apply`; the engine never depends on UI types. Accepted
//! decisions are appended to the match history as `ActionRecord`s.

use serde::{Deserialize, Serialize};

use super::config::MatchConfig;
use super::side::Side;
use crate::cards::CardId;

/// Optional choice offered at the start of card selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaAction {
    /// Buy +`tier` attack for the next played card (tiers 1-3).
    Boost { tier: u8 },
    /// Exchange hand cards for fresh ones from the deck.
    Mulligan,
    /// Go straight to card selection.
    Skip,
}

/// A message from the outside world.
///
/// ## Example
///
/// ```
/// use elemental_duel::core::{Command, ManaAction};
///
/// let cmd = Command::ChooseManaAction(ManaAction::Boost { tier: 2 });
/// let json = serde_json::to_string(&cmd).unwrap();
/// let back: Command = serde_json::from_str(&json).unwrap();
/// assert_eq!(cmd, back);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Play the hand card at `index` (CardSelection).
    SelectCardToPlay { index: usize },
    /// Discard the hand card at `index` for mana (ManaGain).
    SelectCardToDiscard { index: usize },
    /// Boost, mulligan or skip (start of CardSelection).
    ChooseManaAction(ManaAction),
    /// Advance the clock; resolves pending battles and detects timeouts.
    Tick { delta_ms: u64 },
    /// Throw away the current match and start a new one.
    Restart(MatchConfig),
}

/// What a side did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Discarded a card for mana.
    Discard { card: CardId },
    /// Took a mana action.
    ManaAction(ManaAction),
    /// Played a card into battle.
    Play {
        card: CardId,
        timed_out: bool,
        forced: bool,
    },
    /// Had nothing affordable to play.
    Forfeit,
}

/// A recorded decision with metadata for history tracking.
///
/// Used for replay/debugging and by telemetry collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The side that made the decision.
    pub side: Side,

    /// The decision taken.
    pub decision: Decision,

    /// Turn number when the decision was taken.
    pub turn: u32,

    /// Position in the match history.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(side: Side, decision: Decision, turn: u32, sequence: u32) -> Self {
        Self {
            side,
            decision,
            turn,
            sequence,
        }
    }
}
