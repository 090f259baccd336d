//! Battle rules: the element advantage table and card-vs-card resolution.

pub mod advantage;
pub mod battle;

pub use advantage::beats;
pub use battle::{resolve, BattleReport, MatchResult, Outcome};
