//! Game event types.
//!
//! Events describe what the engine just did. They are queued by the duel
//! and drained by presentation or telemetry code, which may animate or log
//! them at its own pace; the engine never waits for them.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::action::ManaAction;
use crate::core::config::Phase;
use crate::core::side::Side;
use crate::rules::{MatchResult, Outcome};

/// Something that happened during a duel.
///
/// ## Example
///
/// ```
/// use elemental_duel::core::Side;
/// use elemental_duel::events::GameEvent;
///
/// let event = GameEvent::ManaChanged { side: Side::Player, before: 0, after: 3 };
/// let json = serde_json::to_string(&event).unwrap();
/// assert!(json.starts_with(r#"{"type":"mana_changed""#));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new phase began. `from` is `None` when a match starts.
    PhaseChanged {
        turn: u32,
        from: Option<Phase>,
        to: Phase,
    },

    /// A card was discarded for mana.
    CardDiscarded {
        side: Side,
        card: Card,
        mana_gained: u32,
    },

    /// A mana pool changed.
    ManaChanged { side: Side, before: i32, after: i32 },

    /// The player took a boost, mulligan or skip.
    ManaActionTaken { action: ManaAction },

    /// A card entered battle. `card` carries any boosted attack.
    CardPlayed {
        side: Side,
        card: Card,
        boost: u32,
        timed_out: bool,
        forced: bool,
    },

    /// Two cards were compared.
    BattleResolved {
        turn: u32,
        player_card: Card,
        opponent_card: Card,
        outcome: Outcome,
        decided_by_element: bool,
    },

    /// Cards moved from a deck into a hand.
    CardsDrawn { side: Side, count: usize },

    /// The player had nothing affordable; one random card left each hand.
    Forfeited {
        turn: u32,
        player_card: Option<Card>,
        opponent_card: Option<Card>,
    },

    /// The match is over.
    MatchEnded {
        result: MatchResult,
        player_score: u32,
        opponent_score: u32,
    },
}

impl GameEvent {
    /// Short event name, matching the serialized `type` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::PhaseChanged { .. } => "phase_changed",
            GameEvent::CardDiscarded { .. } => "card_discarded",
            GameEvent::ManaChanged { .. } => "mana_changed",
            GameEvent::ManaActionTaken { .. } => "mana_action_taken",
            GameEvent::CardPlayed { .. } => "card_played",
            GameEvent::BattleResolved { .. } => "battle_resolved",
            GameEvent::CardsDrawn { .. } => "cards_drawn",
            GameEvent::Forfeited { .. } => "forfeited",
            GameEvent::MatchEnded { .. } => "match_ended",
        }
    }
}
