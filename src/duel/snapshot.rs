//! Read-only views of a duel for presentation layers.
//!
//! `DuelSnapshot` copies out everything a UI needs to draw a frame,
//! hiding the opponent's hand. It serializes with serde, and `to_bytes`
//! gives a compact bincode encoding for save files or IPC.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::machine::Duel;
use crate::cards::Card;
use crate::core::{BattleRecord, Phase, SelectionStep, Side, SideMap};
use crate::mana::{self, BoostTier, MulliganOption};
use crate::policy::OpponentPolicy;
use crate::rules::MatchResult;

/// What the player may do right now.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableActions {
    /// Hand indices that may be discarded for mana.
    pub discard: Vec<usize>,
    /// Hand indices that may be played.
    pub play: Vec<usize>,
    /// Boost tiers on offer.
    pub boosts: SmallVec<[BoostTier; 3]>,
    /// Mulligan on offer, if any.
    pub mulligan: Option<MulliganOption>,
    pub can_skip: bool,
    /// Cards are committed; the next tick resolves the battle.
    pub awaiting_battle: bool,
    /// Nothing is affordable; a tick will forfeit the turn.
    pub forfeit_pending: bool,
}

/// A frame-ready copy of the duel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelSnapshot {
    pub turn: u32,
    pub phase: Phase,
    pub step: SelectionStep,
    pub scores: SideMap<u32>,
    pub mana: SideMap<i32>,
    pub player_hand: Vec<Card>,
    /// Only the size of the opponent's hand is visible.
    pub opponent_hand_len: usize,
    pub deck_lens: SideMap<usize>,
    pub boost_amount: u32,
    pub last_battle: Option<BattleRecord>,
    pub last_play_timed_out: bool,
    pub result: Option<MatchResult>,
    pub remaining_decision_ms: Option<u64>,
    pub available: AvailableActions,
}

impl DuelSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a snapshot written by [`DuelSnapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

impl<P: OpponentPolicy> Duel<P> {
    /// Actions the player may take in the current phase and step.
    #[must_use]
    pub fn available_actions(&self) -> AvailableActions {
        let mut actions = AvailableActions::default();
        if self.state.is_over() {
            return actions;
        }

        let hand = &self.state.hands[Side::Player];
        let pool = self.state.mana[Side::Player];
        match (self.state.phase, self.state.step) {
            (Phase::ManaGain, _) => actions.discard = (0..hand.len()).collect(),
            (Phase::CardSelection, SelectionStep::AwaitingManaAction) => {
                actions.boosts = mana::affordable_boosts(pool);
                actions.mulligan = MulliganOption::for_state(pool, hand.len());
                actions.can_skip = true;
            }
            (Phase::CardSelection, SelectionStep::AwaitingPlay) => {
                actions.play = hand
                    .iter()
                    .enumerate()
                    .filter(|(_, card)| mana::can_afford(pool, card.cost))
                    .map(|(index, _)| index)
                    .collect();
                actions.forfeit_pending = self.forfeit_due();
            }
            (Phase::Battle, _) => actions.awaiting_battle = true,
        }
        actions
    }

    /// Copy out the visible state.
    #[must_use]
    pub fn snapshot(&self) -> DuelSnapshot {
        let state = &self.state;
        DuelSnapshot {
            turn: state.turn,
            phase: state.phase,
            step: state.step,
            scores: state.scores.clone(),
            mana: state.mana.clone(),
            player_hand: state.hands[Side::Player].iter().cloned().collect(),
            opponent_hand_len: state.hands[Side::Opponent].len(),
            deck_lens: SideMap::new(|side| state.decks[side].len()),
            boost_amount: state.boost_amount,
            last_battle: state.last_battle.clone(),
            last_play_timed_out: state.last_play_timed_out,
            result: state.result,
            remaining_decision_ms: self.remaining_decision_ms(),
            available: self.available_actions(),
        }
    }
}
