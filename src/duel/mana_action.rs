//! Mana actions offered at the start of card selection: boost, mulligan
//! and skip.

use tracing::debug;

use super::machine::Duel;
use crate::core::{Decision, ManaAction, Phase, Rejection, SelectionStep, Side};
use crate::events::GameEvent;
use crate::mana::{self, BoostTier, MulliganOption};
use crate::policy::OpponentPolicy;
use crate::zones;

impl<P: OpponentPolicy> Duel<P> {
    /// Take the optional mana action, then move on to the play step.
    ///
    /// ## Example
    ///
    /// ```
    /// use elemental_duel::cards::{Card, CardCatalog, Element};
    /// use elemental_duel::core::{ManaAction, MatchConfig, SelectionStep, Side};
    /// use elemental_duel::duel::Duel;
    ///
    /// let catalog = CardCatalog::new(vec![Card::new("rock", "Rock", 4, 0, Element::Earth)]).unwrap();
    /// let mut duel = Duel::new(catalog, MatchConfig::new().with_seed(1)).unwrap();
    /// duel.select_card_to_discard(0).unwrap();
    ///
    /// assert_eq!(duel.step(), SelectionStep::AwaitingManaAction);
    /// duel.choose_mana_action(ManaAction::Boost { tier: 2 }).unwrap();
    /// assert_eq!(duel.mana(Side::Player), 0);
    /// assert_eq!(duel.boost_amount(), 2);
    /// ```
    pub fn choose_mana_action(&mut self, action: ManaAction) -> Result<(), Rejection> {
        self.ensure_live()?;
        self.expect_phase(Phase::CardSelection)?;
        self.expect_step(SelectionStep::AwaitingManaAction)?;

        match action {
            ManaAction::Boost { tier } => self.boost(tier)?,
            ManaAction::Mulligan => self.mulligan()?,
            ManaAction::Skip => {}
        }

        debug!(?action, mana = self.state.mana[Side::Player], "mana action taken");
        self.state.mana_action = Some(action);
        self.state.record(Side::Player, Decision::ManaAction(action));
        self.emit(GameEvent::ManaActionTaken { action });
        self.begin_play_step();
        Ok(())
    }

    fn boost(&mut self, level: u8) -> Result<(), Rejection> {
        let tier = BoostTier::from_level(level).ok_or(Rejection::InvalidBoostTier(level))?;
        let pool = self.state.mana[Side::Player];
        let after = mana::pay_checked(pool, tier.cost()).map_err(|_| Rejection::BoostUnaffordable {
            cost: tier.cost(),
            mana: pool,
        })?;

        self.set_mana(Side::Player, after);
        self.state.boost_amount = tier.bonus();
        Ok(())
    }

    /// Return random hand cards to the deck, reshuffle and redraw as many.
    fn mulligan(&mut self) -> Result<(), Rejection> {
        let pool = self.state.mana[Side::Player];
        let hand_len = self.state.hands[Side::Player].len();
        let option = MulliganOption::for_state(pool, hand_len).ok_or(Rejection::MulliganUnavailable {
            mana: pool,
            hand: hand_len,
        })?;

        let state = &mut self.state;
        let picks = state.rng.sample_indices(hand_len, option.cards);
        let deck = &mut state.decks[Side::Player];
        let hand = &mut state.hands[Side::Player];
        let returned = zones::return_to_deck(deck, hand, &picks, &mut state.rng);
        let count = zones::draw(deck, hand, returned);

        self.set_mana(Side::Player, mana::pay(pool, option.cost));
        if count > 0 {
            self.emit(GameEvent::CardsDrawn {
                side: Side::Player,
                count,
            });
        }
        Ok(())
    }
}
