//! The duel state machine.
//!
//! ## Turn flow
//!
//! ```text
//! ManaGain ──discard──▶ CardSelection ──play──▶ Battle ──tick──▶ next turn
//!                         │                                      ▲
//!                         └── nothing affordable, tick: forfeit ─┘
//! ```
//!
//! A turn opens in `ManaGain` while both hands hold more than one card,
//! otherwise straight in `CardSelection`. Card selection starts with an
//! optional mana action when the player has at least 2 mana. The battle
//! waits for the next `tick` so callers can present the committed cards
//! before the outcome.
//!
//! A player who can afford nothing stays in `AwaitingPlay` until a tick
//! forfeits the turn: immediately without a time limit, at expiry with
//! one. Phase entry never forfeits, so one command advances at most one
//! turn.
//!
//! Every command takes `&mut self`, so transitions never interleave.
//! A rejected command leaves the state exactly as it was.

use tracing::{debug, info, trace, warn};

use crate::cards::{Card, CardCatalog};
use crate::core::{
    ActionRecord, BattleRecord, Command, ConfigError, Decision, EngineWarning, GameRng,
    GameState, ManaAction, MatchConfig, PendingPlay, Phase, Rejection, SelectionStep, Side,
    SideMap,
};
use crate::events::GameEvent;
use crate::mana::{self, MANA_ACTION_THRESHOLD};
use crate::policy::{GreedyOpponent, OpponentPolicy};
use crate::rules::{self, MatchResult};
use crate::zones::{self, Hand};

/// A single-player duel against a scripted opponent.
///
/// ## Example
///
/// ```
/// use elemental_duel::cards::{Card, CardCatalog, Element};
/// use elemental_duel::core::{ManaAction, MatchConfig, Phase};
/// use elemental_duel::duel::Duel;
///
/// let catalog = CardCatalog::new(vec![
///     Card::new("ember", "Ember", 3, 0, Element::Fire),
///     Card::new("tide", "Tide", 2, 0, Element::Water),
/// ])
/// .unwrap();
/// let mut duel = Duel::new(catalog, MatchConfig::new().with_seed(7)).unwrap();
///
/// assert_eq!(duel.phase(), Phase::ManaGain);
/// duel.select_card_to_discard(0).unwrap();
/// // Discarding gave at least 2 mana, so a mana action is on offer.
/// duel.choose_mana_action(ManaAction::Skip).unwrap();
/// duel.select_card_to_play(0).unwrap();
/// assert_eq!(duel.phase(), Phase::Battle);
///
/// duel.tick(16).unwrap();
/// assert_eq!(duel.turn(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Duel<P: OpponentPolicy = GreedyOpponent> {
    catalog: CardCatalog,
    config: MatchConfig,
    policy: P,
    pub(super) state: GameState,
    events: Vec<GameEvent>,
    warnings: Vec<EngineWarning>,
}

impl Duel<GreedyOpponent> {
    /// Start a match against the default opponent.
    pub fn new(catalog: CardCatalog, config: MatchConfig) -> Result<Self, ConfigError> {
        Self::with_policy(catalog, config, GreedyOpponent)
    }
}

impl<P: OpponentPolicy> Duel<P> {
    /// Start a match against a custom opponent policy.
    pub fn with_policy(
        catalog: CardCatalog,
        config: MatchConfig,
        policy: P,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut duel = Self::from_state(
            catalog,
            config,
            policy,
            GameState::new(0, GameRng::new(0)),
        );
        duel.start();
        Ok(duel)
    }

    /// Resume from an existing state without dealing.
    ///
    /// The state is taken as-is; no phase entry logic runs.
    #[must_use]
    pub fn from_state(catalog: CardCatalog, config: MatchConfig, policy: P, state: GameState) -> Self {
        Self {
            catalog,
            config,
            policy,
            state,
            events: Vec::new(),
            warnings: Vec::new(),
        }
    }

    // === Commands ===

    /// Dispatch a command.
    pub fn apply(&mut self, command: Command) -> Result<(), Rejection> {
        match command {
            Command::SelectCardToDiscard { index } => self.select_card_to_discard(index),
            Command::SelectCardToPlay { index } => self.select_card_to_play(index),
            Command::ChooseManaAction(action) => self.choose_mana_action(action),
            Command::Tick { delta_ms } => self.tick(delta_ms),
            Command::Restart(config) => self.restart(config),
        }
    }

    /// Discard a hand card for mana equal to its attack.
    ///
    /// The opponent then discards its weakest card and the duel moves to
    /// card selection.
    pub fn select_card_to_discard(&mut self, index: usize) -> Result<(), Rejection> {
        self.ensure_live()?;
        self.expect_phase(Phase::ManaGain)?;

        let hand = &mut self.state.hands[Side::Player];
        let len = hand.len();
        let card = zones::take(hand, index).ok_or(Rejection::IndexOutOfRange { index, len })?;
        self.discard_for_mana(Side::Player, card);

        let pick = self.policy.choose_discard(&self.state.hands[Side::Opponent]);
        if let Some(card) = pick.and_then(|i| zones::take(&mut self.state.hands[Side::Opponent], i)) {
            self.discard_for_mana(Side::Opponent, card);
        }

        self.enter_phase(Phase::CardSelection);
        Ok(())
    }

    /// Commit a hand card to battle.
    ///
    /// The opponent answers immediately; the battle resolves on the next
    /// tick.
    pub fn select_card_to_play(&mut self, index: usize) -> Result<(), Rejection> {
        self.ensure_live()?;
        if self.state.pending.is_some() {
            return Err(Rejection::SelectionPending);
        }
        self.expect_phase(Phase::CardSelection)?;
        self.expect_step(SelectionStep::AwaitingPlay)?;

        let hand = &self.state.hands[Side::Player];
        let card = hand.get(index).ok_or(Rejection::IndexOutOfRange {
            index,
            len: hand.len(),
        })?;
        let pool = self.state.mana[Side::Player];
        if !mana::can_afford(pool, card.cost) {
            return Err(Rejection::CannotAfford {
                cost: card.cost,
                mana: pool,
            });
        }

        self.commit_play(index, false);
        Ok(())
    }

    /// Advance the clock.
    ///
    /// Resolves a pending battle, or fires the decision timeout once the
    /// time spent in card selection exceeds the configured limit. A player
    /// left with nothing affordable forfeits at that timeout, or on this
    /// tick when there is no limit. Each tick finishes at most one turn.
    pub fn tick(&mut self, delta_ms: u64) -> Result<(), Rejection> {
        self.ensure_live()?;
        self.state.phase_elapsed_ms = self.state.phase_elapsed_ms.saturating_add(delta_ms);

        match self.state.phase {
            Phase::Battle => self.resolve_battle(),
            Phase::CardSelection if self.decision_expired() => self.on_timeout(),
            Phase::CardSelection if !self.config.has_time_limit() && self.forfeit_due() => {
                self.forfeit();
            }
            _ => {}
        }
        Ok(())
    }

    /// Throw the current match away and deal a new one.
    ///
    /// An invalid config is rejected and the current match continues.
    pub fn restart(&mut self, config: MatchConfig) -> Result<(), Rejection> {
        config.validate()?;
        info!("restarting match");
        self.config = config;
        self.start();
        Ok(())
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn step(&self) -> SelectionStep {
        self.state.step
    }

    /// Completed turns.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    #[must_use]
    pub fn score(&self, side: Side) -> u32 {
        self.state.scores[side]
    }

    #[must_use]
    pub fn mana(&self, side: Side) -> i32 {
        self.state.mana[side]
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &Hand {
        &self.state.hands[side]
    }

    #[must_use]
    pub fn deck_len(&self, side: Side) -> usize {
        self.state.decks[side].len()
    }

    #[must_use]
    pub fn last_battle(&self) -> Option<&BattleRecord> {
        self.state.last_battle.as_ref()
    }

    /// Attack bonus waiting for the player's next play.
    #[must_use]
    pub fn boost_amount(&self) -> u32 {
        self.state.boost_amount
    }

    #[must_use]
    pub fn last_play_timed_out(&self) -> bool {
        self.state.last_play_timed_out
    }

    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.state.result
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Time left for the current card-selection decision.
    ///
    /// `None` when there is no limit or no decision is open.
    #[must_use]
    pub fn remaining_decision_ms(&self) -> Option<u64> {
        let open = !self.is_over() && self.state.phase == Phase::CardSelection;
        (open && self.config.has_time_limit()).then(|| {
            self.config
                .decision_time_limit_ms
                .saturating_sub(self.state.phase_elapsed_ms)
        })
    }

    /// Non-fatal problems met while setting up the current match.
    #[must_use]
    pub fn warnings(&self) -> &[EngineWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn history(&self) -> &im::Vector<ActionRecord> {
        &self.state.history
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Events queued since the last drain.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Guards ===

    pub(super) fn ensure_live(&self) -> Result<(), Rejection> {
        if self.is_over() {
            return Err(Rejection::MatchOver);
        }
        Ok(())
    }

    pub(super) fn expect_phase(&self, expected: Phase) -> Result<(), Rejection> {
        let actual = self.state.phase;
        if actual != expected {
            return Err(Rejection::WrongPhase { expected, actual });
        }
        Ok(())
    }

    pub(super) fn expect_step(&self, expected: SelectionStep) -> Result<(), Rejection> {
        let actual = self.state.step;
        if actual != expected {
            return Err(Rejection::WrongStep { expected, actual });
        }
        Ok(())
    }

    // === Transitions ===

    pub(super) fn emit(&mut self, event: GameEvent) {
        trace!(kind = event.kind(), turn = self.state.turn, "event queued");
        self.events.push(event);
    }

    /// Set a mana pool, emitting a change event when it moved.
    pub(super) fn set_mana(&mut self, side: Side, after: i32) {
        let before = self.state.mana[side];
        if before == after {
            return;
        }
        self.state.mana[side] = after;
        self.emit(GameEvent::ManaChanged { side, before, after });
    }

    fn start(&mut self) {
        let rng = self
            .config
            .seed
            .map_or_else(GameRng::from_entropy, GameRng::new);
        let mut state = GameState::new(self.config.initial_mana, rng);
        self.events.clear();
        self.warnings.clear();

        for side in Side::BOTH {
            match zones::build_deck(&self.catalog, self.config.deck_size, &mut state.rng) {
                Ok(deck) => state.decks[side] = deck,
                Err(err) => {
                    warn!(%side, %err, "dealing an empty deck");
                    if !self.warnings.contains(&EngineWarning::EmptyCatalog) {
                        self.warnings.push(EngineWarning::EmptyCatalog);
                    }
                }
            }
            zones::draw(
                &mut state.decks[side],
                &mut state.hands[side],
                self.config.initial_hand_size,
            );
        }

        info!(
            seed = state.rng.seed(),
            deck_size = self.config.deck_size,
            hand_size = self.config.initial_hand_size,
            "match started"
        );
        self.state = state;

        match self.exhausted_result() {
            Some(result) => self.end_match(result),
            None => {
                let first = self.opening_phase();
                self.switch_phase(None, first);
            }
        }
    }

    /// Result to declare when a hand has run dry.
    fn exhausted_result(&self) -> Option<MatchResult> {
        Side::BOTH
            .iter()
            .any(|&side| self.state.hands[side].is_empty())
            .then(|| MatchResult::from_scores(&self.state.scores))
    }

    /// `ManaGain` needs a spare card in both hands.
    fn opening_phase(&self) -> Phase {
        if Side::BOTH.iter().all(|&side| self.state.hands[side].len() > 1) {
            Phase::ManaGain
        } else {
            Phase::CardSelection
        }
    }

    fn enter_phase(&mut self, to: Phase) {
        let from = self.state.phase;
        self.switch_phase(Some(from), to);
    }

    fn switch_phase(&mut self, from: Option<Phase>, to: Phase) {
        self.state.phase = to;
        self.state.phase_elapsed_ms = 0;
        debug!(turn = self.state.turn, ?from, %to, "phase changed");
        self.emit(GameEvent::PhaseChanged {
            turn: self.state.turn,
            from,
            to,
        });

        if to == Phase::CardSelection {
            self.begin_card_selection();
        }
    }

    fn begin_card_selection(&mut self) {
        self.state.mana_action = None;
        if self.state.mana[Side::Player] >= MANA_ACTION_THRESHOLD {
            self.state.step = SelectionStep::AwaitingManaAction;
        } else {
            self.begin_play_step();
        }
    }

    /// Open the play step. A player who can afford nothing forfeits on a
    /// later tick, never during phase entry.
    pub(super) fn begin_play_step(&mut self) {
        self.state.step = SelectionStep::AwaitingPlay;
        if self.forfeit_due() {
            debug!(
                turn = self.state.turn,
                mana = self.state.mana[Side::Player],
                "nothing affordable; forfeit on next tick"
            );
        }
    }

    /// Waiting to play with no affordable card.
    pub(super) fn forfeit_due(&self) -> bool {
        self.state.phase == Phase::CardSelection
            && self.state.step == SelectionStep::AwaitingPlay
            && !self.state.can_afford_any(Side::Player)
    }

    fn discard_for_mana(&mut self, side: Side, card: Card) {
        let after = mana::credit(self.state.mana[side], card.attack);
        debug!(%side, card = %card.id, gained = card.attack, "discarded for mana");
        self.state.discards_this_turn[side] += 1;
        self.state.record(
            side,
            Decision::Discard {
                card: card.id.clone(),
            },
        );
        self.set_mana(side, after);
        self.emit(GameEvent::CardDiscarded {
            side,
            mana_gained: card.attack,
            card,
        });
    }

    /// Move the player's card and the opponent's answer into battle.
    fn commit_play(&mut self, index: usize, timed_out: bool) {
        let Some(card) = zones::take(&mut self.state.hands[Side::Player], index) else {
            return;
        };
        let boost = std::mem::take(&mut self.state.boost_amount);
        let after = mana::pay(self.state.mana[Side::Player], card.cost);
        self.set_mana(Side::Player, after);

        let player_card = card.boosted(boost);
        self.state.last_play_timed_out = timed_out;
        self.state.record(
            Side::Player,
            Decision::Play {
                card: player_card.id.clone(),
                timed_out,
                forced: false,
            },
        );
        debug!(card = %player_card.id, attack = player_card.attack, boost, timed_out, "player plays");
        self.emit(GameEvent::CardPlayed {
            side: Side::Player,
            card: player_card.clone(),
            boost,
            timed_out,
            forced: false,
        });

        let choice = self
            .policy
            .choose_play(&self.state.hands[Side::Opponent], self.state.mana[Side::Opponent]);
        let answer = choice.and_then(|c| {
            zones::take(&mut self.state.hands[Side::Opponent], c.index).map(|card| (card, c.forced))
        });
        let Some((opponent_card, forced)) = answer else {
            warn!(turn = self.state.turn, "opponent has no card; battle voided");
            self.finish_turn();
            return;
        };

        let after = mana::pay(self.state.mana[Side::Opponent], opponent_card.cost);
        self.set_mana(Side::Opponent, after);
        if forced {
            debug!(mana = after, "opponent plays on credit");
        }
        self.state.record(
            Side::Opponent,
            Decision::Play {
                card: opponent_card.id.clone(),
                timed_out: false,
                forced,
            },
        );
        debug!(card = %opponent_card.id, attack = opponent_card.attack, "opponent plays");
        self.emit(GameEvent::CardPlayed {
            side: Side::Opponent,
            card: opponent_card.clone(),
            boost: 0,
            timed_out: false,
            forced,
        });

        self.state.pending = Some(PendingPlay {
            player_card,
            opponent_card,
            timed_out,
            opponent_forced: forced,
        });
        self.enter_phase(Phase::Battle);
    }

    fn decision_expired(&self) -> bool {
        self.config.has_time_limit()
            && self.state.phase_elapsed_ms > self.config.decision_time_limit_ms
    }

    /// Timed out in card selection: an open mana action counts as a skip,
    /// then the first affordable card is played for the player.
    fn on_timeout(&mut self) {
        info!(turn = self.state.turn, step = ?self.state.step, "decision timed out");

        if self.state.step == SelectionStep::AwaitingManaAction {
            let skip = ManaAction::Skip;
            self.state.mana_action = Some(skip);
            self.state.record(Side::Player, Decision::ManaAction(skip));
            self.emit(GameEvent::ManaActionTaken { action: skip });
            self.state.step = SelectionStep::AwaitingPlay;
        }

        match self.state.first_affordable(Side::Player) {
            Some(index) => self.commit_play(index, true),
            None => self.forfeit(),
        }
    }

    fn resolve_battle(&mut self) {
        let Some(pending) = self.state.pending.take() else {
            return;
        };
        let report = rules::resolve(&pending.player_card, &pending.opponent_card);
        if let Some(winner) = report.outcome.winner() {
            self.state.scores[winner] += 1;
        }

        info!(
            turn = self.state.turn,
            player_attack = pending.player_card.attack,
            opponent_attack = pending.opponent_card.attack,
            outcome = ?report.outcome,
            by_element = report.decided_by_element,
            "battle resolved"
        );
        self.emit(GameEvent::BattleResolved {
            turn: self.state.turn,
            player_card: pending.player_card.clone(),
            opponent_card: pending.opponent_card.clone(),
            outcome: report.outcome,
            decided_by_element: report.decided_by_element,
        });
        self.state.last_battle = Some(BattleRecord {
            turn: self.state.turn,
            player_card: pending.player_card,
            opponent_card: pending.opponent_card,
            outcome: report.outcome,
            decided_by_element: report.decided_by_element,
            timed_out: pending.timed_out,
        });

        self.state.turn += 1;
        self.finish_turn();
    }

    /// The player cannot pay for any card: the opponent scores and one
    /// random card leaves each hand.
    fn forfeit(&mut self) {
        let mut removed: SideMap<Option<Card>> = SideMap::default();
        for side in Side::BOTH {
            let len = self.state.hands[side].len();
            if len > 0 {
                let index = self.state.rng.gen_index(len);
                removed[side] = zones::take(&mut self.state.hands[side], index);
            }
        }

        self.state.scores[Side::Opponent] += 1;
        self.state.last_play_timed_out = false;
        self.state.record(Side::Player, Decision::Forfeit);
        info!(
            turn = self.state.turn,
            mana = self.state.mana[Side::Player],
            "player forfeits the turn"
        );
        self.emit(GameEvent::Forfeited {
            turn: self.state.turn,
            player_card: removed[Side::Player].take(),
            opponent_card: removed[Side::Opponent].take(),
        });

        self.state.turn += 1;
        self.finish_turn();
    }

    /// Replacement draws, per-turn resets, then the next turn or the end.
    fn finish_turn(&mut self) {
        for side in Side::BOTH {
            let wanted = 1 + self.state.discards_this_turn[side] as usize;
            let state = &mut self.state;
            let count = zones::draw(&mut state.decks[side], &mut state.hands[side], wanted);
            if count > 0 {
                self.emit(GameEvent::CardsDrawn { side, count });
            }
        }
        self.state.discards_this_turn = SideMap::default();
        self.state.boost_amount = 0;
        self.state.mana_action = None;

        match self.exhausted_result() {
            Some(result) => self.end_match(result),
            None => {
                let next = self.opening_phase();
                self.enter_phase(next);
            }
        }
    }

    fn end_match(&mut self, result: MatchResult) {
        self.state.result = Some(result);
        self.state.pending = None;
        let player_score = self.state.scores[Side::Player];
        let opponent_score = self.state.scores[Side::Opponent];
        info!(?result, player_score, opponent_score, turn = self.state.turn, "match ended");
        self.emit(GameEvent::MatchEnded {
            result,
            player_score,
            opponent_score,
        });
    }
}
