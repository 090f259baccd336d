//! Single-card battle resolution and match results.

use serde::{Deserialize, Serialize};

use super::advantage::beats;
use crate::cards::Card;
use crate::core::side::{Side, SideMap};

/// Battle outcome from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    /// The side that scores, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::Win => Some(Side::Player),
            Outcome::Lose => Some(Side::Opponent),
            Outcome::Draw => None,
        }
    }

    /// The same outcome seen from the other side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

/// Result of comparing two played cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: Outcome,
    /// True when attacks tied and element advantage picked the winner.
    pub decided_by_element: bool,
}

/// Compare the player's card against the opponent's.
///
/// Higher attack wins. On a tie the element table decides; if neither
/// element beats the other the battle is a draw.
///
/// ```
/// use elemental_duel::cards::{Card, Element};
/// use elemental_duel::rules::{resolve, Outcome};
///
/// let fire = Card::new("f", "Flame", 3, 1, Element::Fire);
/// let nature = Card::new("n", "Vine", 3, 1, Element::Nature);
///
/// let report = resolve(&fire, &nature);
/// assert_eq!(report.outcome, Outcome::Win);
/// assert!(report.decided_by_element);
/// ```
#[must_use]
pub fn resolve(player_card: &Card, opponent_card: &Card) -> BattleReport {
    use std::cmp::Ordering;

    match player_card.attack.cmp(&opponent_card.attack) {
        Ordering::Greater => BattleReport {
            outcome: Outcome::Win,
            decided_by_element: false,
        },
        Ordering::Less => BattleReport {
            outcome: Outcome::Lose,
            decided_by_element: false,
        },
        Ordering::Equal => {
            let outcome = if beats(player_card.element, opponent_card.element) {
                Outcome::Win
            } else if beats(opponent_card.element, player_card.element) {
                Outcome::Lose
            } else {
                Outcome::Draw
            };
            BattleReport {
                outcome,
                decided_by_element: outcome != Outcome::Draw,
            }
        }
    }
}

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// Single winner.
    Winner(Side),
    /// Equal scores.
    Draw,
}

impl MatchResult {
    /// Higher score wins; equal scores draw.
    #[must_use]
    pub fn from_scores(scores: &SideMap<u32>) -> Self {
        use std::cmp::Ordering;

        match scores[Side::Player].cmp(&scores[Side::Opponent]) {
            Ordering::Greater => MatchResult::Winner(Side::Player),
            Ordering::Less => MatchResult::Winner(Side::Opponent),
            Ordering::Equal => MatchResult::Draw,
        }
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, MatchResult::Winner(s) if *s == side)
    }
}
