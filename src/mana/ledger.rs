//! Mana arithmetic and the price tables for mana actions.
//!
//! Pools are `i32` because the opponent may overspend on a forced play;
//! the human side always goes through `pay_checked`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::error::Rejection;

/// Minimum player mana for the boost/mulligan/skip choice to be offered.
pub const MANA_ACTION_THRESHOLD: i32 = 2;

fn as_mana(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// `pool >= cost`.
#[must_use]
pub fn can_afford(pool: i32, cost: u32) -> bool {
    i64::from(pool) >= i64::from(cost)
}

/// `pool - cost`, allowed to go negative.
#[must_use]
pub fn pay(pool: i32, cost: u32) -> i32 {
    pool.saturating_sub(as_mana(cost))
}

/// `pool - cost`, refusing if the pool cannot cover it.
pub fn pay_checked(pool: i32, cost: u32) -> Result<i32, Rejection> {
    if can_afford(pool, cost) {
        Ok(pay(pool, cost))
    } else {
        Err(Rejection::CannotAfford { cost, mana: pool })
    }
}

/// `pool + amount`.
#[must_use]
pub fn credit(pool: i32, amount: u32) -> i32 {
    pool.saturating_add(as_mana(amount))
}

/// Attack bonus tiers for the boost action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoostTier {
    /// +1 attack for 2 mana.
    Plus1,
    /// +2 attack for 4 mana.
    Plus2,
    /// +3 attack for 6 mana.
    Plus3,
}

impl BoostTier {
    /// All tiers, cheapest first.
    pub const ALL: [BoostTier; 3] = [BoostTier::Plus1, BoostTier::Plus2, BoostTier::Plus3];

    /// Look up a tier by its level (1-3).
    #[must_use]
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(BoostTier::Plus1),
            2 => Some(BoostTier::Plus2),
            3 => Some(BoostTier::Plus3),
            _ => None,
        }
    }

    /// Tier level (1-3).
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            BoostTier::Plus1 => 1,
            BoostTier::Plus2 => 2,
            BoostTier::Plus3 => 3,
        }
    }

    /// Attack added to the next played card.
    #[must_use]
    pub const fn bonus(self) -> u32 {
        self.level() as u32
    }

    /// Mana price.
    #[must_use]
    pub const fn cost(self) -> u32 {
        self.bonus() * 2
    }
}

/// Boost tiers the pool can pay for.
#[must_use]
pub fn affordable_boosts(pool: i32) -> SmallVec<[BoostTier; 3]> {
    BoostTier::ALL
        .into_iter()
        .filter(|tier| can_afford(pool, tier.cost()))
        .collect()
}

/// The mulligan on offer for a given mana pool and hand size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MulliganOption {
    /// Cards exchanged.
    pub cards: usize,
    /// Mana price.
    pub cost: u32,
}

impl MulliganOption {
    const LARGE: MulliganOption = MulliganOption { cards: 2, cost: 5 };
    const SMALL: MulliganOption = MulliganOption { cards: 1, cost: 3 };

    /// The largest mulligan the player qualifies for, if any.
    #[must_use]
    pub fn for_state(pool: i32, hand_len: usize) -> Option<Self> {
        [Self::LARGE, Self::SMALL]
            .into_iter()
            .find(|option| can_afford(pool, option.cost) && hand_len >= option.cards)
    }
}
