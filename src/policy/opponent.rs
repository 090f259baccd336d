//! Decision policy for the scripted opponent.
//!
//! Policies are trait-based so alternative difficulty levels can be
//! swapped in. They are pure: they see a hand and a mana pool and return
//! an index, never touching the duel state themselves.

use serde::{Deserialize, Serialize};

use crate::mana;
use crate::zones::Hand;

/// The opponent's pick for the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayChoice {
    /// Index into the opponent's hand.
    pub index: usize,
    /// Nothing was affordable; the card is played on credit.
    pub forced: bool,
}

/// Policy for the non-human side.
pub trait OpponentPolicy: Send + Sync {
    /// Choose a card to discard for mana.
    ///
    /// Returns `None` when no discard should happen (hand of one or fewer).
    fn choose_discard(&self, hand: &Hand) -> Option<usize>;

    /// Choose a card to play.
    ///
    /// Must return a card whenever the hand is non-empty; the opponent
    /// never forfeits. Returns `None` only for an empty hand.
    fn choose_play(&self, hand: &Hand, mana: i32) -> Option<PlayChoice>;
}

/// Default opponent: discard the weakest card, play the strongest
/// affordable one, and fall back to the cheapest card on credit.
#[derive(Clone, Debug, Default)]
pub struct GreedyOpponent;

/// Index of the first card whose key is strictly better than all earlier
/// ones, so ties go to the earliest card.
fn first_best<K>(
    cards: impl Iterator<Item = (usize, K)>,
    better: impl Fn(&K, &K) -> bool,
) -> Option<usize> {
    let mut best: Option<(usize, K)> = None;
    for (index, key) in cards {
        let replace = match &best {
            Some((_, best_key)) => better(&key, best_key),
            None => true,
        };
        if replace {
            best = Some((index, key));
        }
    }
    best.map(|(index, _)| index)
}

impl GreedyOpponent {
    fn lowest_cost(hand: &Hand) -> Option<usize> {
        first_best(hand.iter().map(|c| c.cost).enumerate(), |a, b| a < b)
    }
}

impl OpponentPolicy for GreedyOpponent {
    fn choose_discard(&self, hand: &Hand) -> Option<usize> {
        if hand.len() <= 1 {
            return None;
        }
        first_best(hand.iter().map(|c| c.attack).enumerate(), |a, b| a < b)
    }

    fn choose_play(&self, hand: &Hand, mana: i32) -> Option<PlayChoice> {
        let affordable = hand
            .iter()
            .enumerate()
            .filter(|(_, c)| mana::can_afford(mana, c.cost))
            .map(|(i, c)| (i, c.attack));

        if let Some(index) = first_best(affordable, |a, b| a > b) {
            return Some(PlayChoice {
                index,
                forced: false,
            });
        }

        Self::lowest_cost(hand).map(|index| PlayChoice {
            index,
            forced: true,
        })
    }
}
