//! Game state: the single mutable aggregate a duel owns.
//!
//! ## GameState
//!
//! - Progression: turn, phase, card-selection step, decision timer
//! - Per-side resources: scores, mana, decks, hands
//! - Transient turn data: pending plays, boost, discards made this turn
//! - Results: last battle, match result, decision history
//! - RNG
//!
//! Decks, hands and history use `im` persistent structures so cloning a
//! state for a snapshot or a test fixture is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionRecord, Decision, ManaAction};
use super::config::{Phase, SelectionStep};
use super::rng::GameRng;
use super::side::{Side, SideMap};
use crate::cards::Card;
use crate::mana;
use crate::rules::{MatchResult, Outcome};
use crate::zones::{Deck, Hand};

/// Both cards committed for the current battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPlay {
    /// Player's card, with any boost already applied.
    pub player_card: Card,
    pub opponent_card: Card,
    /// The player's card was auto-picked on timeout.
    pub timed_out: bool,
    /// The opponent played on credit.
    pub opponent_forced: bool,
}

/// The most recently resolved battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRecord {
    /// Turn the battle was fought on.
    pub turn: u32,
    pub player_card: Card,
    pub opponent_card: Card,
    pub outcome: Outcome,
    /// Attacks tied and element advantage decided.
    pub decided_by_element: bool,
    pub timed_out: bool,
}

/// Full duel state.
#[derive(Clone, Debug)]
pub struct GameState {
    // === Progression ===
    /// Completed turns (starts at 0).
    pub turn: u32,

    /// Current phase.
    pub phase: Phase,

    /// Card-selection sub-step; only meaningful in `CardSelection`.
    pub step: SelectionStep,

    /// Milliseconds since the current phase began.
    pub phase_elapsed_ms: u64,

    // === Per-side resources ===
    pub scores: SideMap<u32>,

    /// Mana pools. The opponent's may be negative.
    pub mana: SideMap<i32>,

    pub decks: SideMap<Deck>,

    pub hands: SideMap<Hand>,

    // === Transient turn data ===
    /// Cards waiting for the next tick to fight.
    pub pending: Option<PendingPlay>,

    /// Attack bonus bought for the player's next play.
    pub boost_amount: u32,

    /// Mana action taken on entering the current card selection.
    pub mana_action: Option<ManaAction>,

    /// Cards each side discarded for mana this turn.
    pub discards_this_turn: SideMap<u32>,

    // === Results ===
    pub last_battle: Option<BattleRecord>,

    /// The player's most recent play was a timeout auto-pick.
    pub last_play_timed_out: bool,

    /// Set once the match ends.
    pub result: Option<MatchResult>,

    /// Accepted decisions, oldest first.
    pub history: Vector<ActionRecord>,

    /// Deterministic RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Create an empty state: no cards, both pools at `initial_mana`,
    /// turn 0, card selection awaiting a play.
    #[must_use]
    pub fn new(initial_mana: i32, rng: GameRng) -> Self {
        Self {
            turn: 0,
            phase: Phase::CardSelection,
            step: SelectionStep::AwaitingPlay,
            phase_elapsed_ms: 0,
            scores: SideMap::default(),
            mana: SideMap::with_value(initial_mana),
            decks: SideMap::default(),
            hands: SideMap::default(),
            pending: None,
            boost_amount: 0,
            mana_action: None,
            discards_this_turn: SideMap::default(),
            last_battle: None,
            last_play_timed_out: false,
            result: None,
            history: Vector::new(),
            rng,
        }
    }

    /// Has the match ended?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Can `side` pay for at least one card in its hand?
    #[must_use]
    pub fn can_afford_any(&self, side: Side) -> bool {
        let pool = self.mana[side];
        self.hands[side].iter().any(|c| mana::can_afford(pool, c.cost))
    }

    /// First hand card `side` can afford, in hand order.
    #[must_use]
    pub fn first_affordable(&self, side: Side) -> Option<usize> {
        let pool = self.mana[side];
        self.hands[side].iter().position(|c| mana::can_afford(pool, c.cost))
    }

    /// Append a decision to the history.
    pub fn record(&mut self, side: Side, decision: Decision) {
        let sequence = u32::try_from(self.history.len()).unwrap_or(u32::MAX);
        self.history
            .push_back(ActionRecord::new(side, decision, self.turn, sequence));
    }
}
