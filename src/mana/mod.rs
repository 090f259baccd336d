//! Mana ledger: affordability checks, payments, credits and the price
//! tables for boost and mulligan.

mod ledger;

pub use ledger::{
    affordable_boosts, can_afford, credit, pay, pay_checked, BoostTier, MulliganOption,
    MANA_ACTION_THRESHOLD,
};
