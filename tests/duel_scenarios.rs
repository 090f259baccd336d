//! Duel scenario tests.
//!
//! These drive the public `Duel` API through whole turns: mana gain,
//! mana actions, plays, forfeits, timeouts and match end.

use elemental_duel::cards::{Card, CardCatalog, Element};
use elemental_duel::core::{
    Command, Decision, EngineWarning, GameRng, GameState, ManaAction, MatchConfig, Phase,
    Rejection, SelectionStep, Side,
};
use elemental_duel::duel::Duel;
use elemental_duel::events::GameEvent;
use elemental_duel::policy::GreedyOpponent;
use elemental_duel::rules::{MatchResult, Outcome};

fn card(id: &str, attack: u32, cost: u32, element: Element) -> Card {
    Card::new(id, id, attack, cost, element)
}

fn mixed_catalog() -> CardCatalog {
    CardCatalog::from_json(
        r#"[
            {"id": "ember",  "name": "Ember",  "attack": 3, "cost": 1, "element": "Fire"},
            {"id": "tide",   "name": "Tide",   "attack": 2, "cost": 0, "element": "water"},
            {"id": "oak",    "name": "Oak",    "attack": 5, "cost": 3, "element": "NATURE"},
            {"id": "boulder","name": "Boulder","attack": 6, "cost": 5, "element": "earth"},
            {"id": "gale",   "name": "Gale",   "attack": 4, "cost": 2, "element": "air"},
            {"id": "wisp",   "name": "Wisp",   "attack": 1, "cost": 0, "element": "aether"}
        ]"#,
    )
    .unwrap()
}

/// A duel resumed mid-turn with fixed hands and empty decks.
fn resumed(
    phase: Phase,
    step: SelectionStep,
    mana: i32,
    player: Vec<Card>,
    opponent: Vec<Card>,
    config: MatchConfig,
) -> Duel {
    let mut state = GameState::new(mana, GameRng::new(17));
    state.phase = phase;
    state.step = step;
    state.hands[Side::Player] = player.into_iter().collect();
    state.hands[Side::Opponent] = opponent.into_iter().collect();
    Duel::from_state(CardCatalog::default(), config, GreedyOpponent, state)
}

/// Play the match out: discard the first card, skip mana actions, play
/// the first affordable card.
fn autoplay(duel: &mut Duel) {
    for _ in 0..1_000 {
        if duel.is_over() {
            return;
        }
        let actions = duel.available_actions();
        let outcome = if !actions.discard.is_empty() {
            duel.select_card_to_discard(0)
        } else if actions.can_skip {
            duel.choose_mana_action(ManaAction::Skip)
        } else if let Some(&index) = actions.play.first() {
            duel.select_card_to_play(index)
        } else {
            duel.tick(16)
        };
        outcome.unwrap();
    }
    panic!("match did not finish");
}

/// Default config deals five cards each and opens with mana gain.
#[test]
fn test_opening_and_discard_for_mana() {
    let catalog = CardCatalog::new(vec![card("rock", 3, 1, Element::Earth)]).unwrap();
    let mut duel = Duel::new(catalog, MatchConfig::new().with_seed(1)).unwrap();

    assert_eq!(duel.phase(), Phase::ManaGain);
    assert_eq!(duel.mana(Side::Player), 0);
    assert_eq!(duel.hand(Side::Player).len(), 5);

    duel.select_card_to_discard(2).unwrap();

    assert_eq!(duel.mana(Side::Player), 3);
    assert_eq!(duel.mana(Side::Opponent), 3);
    assert_eq!(duel.hand(Side::Player).len(), 4);
    assert_eq!(duel.hand(Side::Opponent).len(), 4);
    assert_eq!(duel.phase(), Phase::CardSelection);
    assert_eq!(duel.step(), SelectionStep::AwaitingManaAction);
}

/// Discards are paid back with extra draws after the battle.
#[test]
fn test_replacement_draws() {
    let catalog = CardCatalog::new(vec![card("rock", 3, 1, Element::Earth)]).unwrap();
    let mut duel = Duel::new(catalog, MatchConfig::new().with_seed(2)).unwrap();

    duel.select_card_to_discard(0).unwrap();
    duel.choose_mana_action(ManaAction::Skip).unwrap();
    duel.select_card_to_play(0).unwrap();
    assert_eq!(duel.hand(Side::Player).len(), 3);

    duel.tick(16).unwrap();

    assert_eq!(duel.hand(Side::Player).len(), 5);
    assert_eq!(duel.hand(Side::Opponent).len(), 5);
    assert_eq!(duel.deck_len(Side::Player), 13);
    assert_eq!(duel.phase(), Phase::ManaGain);
}

/// A second play while the battle is pending changes nothing.
#[test]
fn test_second_play_while_pending() {
    let mut duel = resumed(
        Phase::CardSelection,
        SelectionStep::AwaitingPlay,
        0,
        vec![card("a", 2, 0, Element::Fire), card("b", 3, 0, Element::Air)],
        vec![card("c", 1, 0, Element::Water), card("d", 1, 0, Element::Water)],
        MatchConfig::new(),
    );
    duel.select_card_to_play(0).unwrap();
    let before = duel.snapshot();
    let history_len = duel.history().len();

    assert_eq!(duel.select_card_to_play(0), Err(Rejection::SelectionPending));
    assert_eq!(duel.snapshot(), before);
    assert_eq!(duel.history().len(), history_len);
}

/// With one cost-4 card and 2 mana, skipping the mana action leads to a
/// forfeit on the next tick.
#[test]
fn test_forfeit_after_skip() {
    let mut duel = resumed(
        Phase::CardSelection,
        SelectionStep::AwaitingManaAction,
        2,
        vec![card("heavy", 7, 4, Element::Earth)],
        vec![card("x", 1, 0, Element::Air), card("y", 2, 0, Element::Air)],
        MatchConfig::new(),
    );

    duel.choose_mana_action(ManaAction::Skip).unwrap();
    assert_eq!(duel.step(), SelectionStep::AwaitingPlay);
    assert_eq!(duel.score(Side::Opponent), 0);

    duel.tick(16).unwrap();

    assert_eq!(duel.score(Side::Opponent), 1);
    assert_eq!(duel.score(Side::Player), 0);
    assert!(duel.hand(Side::Player).is_empty());
    assert_eq!(duel.hand(Side::Opponent).len(), 1);
    assert_eq!(duel.turn(), 1);
    assert_eq!(duel.result(), Some(MatchResult::Winner(Side::Opponent)));

    let forfeit = duel
        .events()
        .iter()
        .find(|e| matches!(e, GameEvent::Forfeited { .. }))
        .unwrap();
    if let GameEvent::Forfeited { player_card, .. } = forfeit {
        assert_eq!(player_card.as_ref().unwrap().id.as_str(), "heavy");
    }
    assert_eq!(
        duel.history().last().map(|r| &r.decision),
        Some(&Decision::Forfeit)
    );
}

/// Below 2 mana with nothing affordable, no mana action is offered and
/// the next tick forfeits.
#[test]
fn test_forfeit_on_entry() {
    let catalog = CardCatalog::new(vec![card("gem", 0, 3, Element::Earth)]).unwrap();
    let mut duel = Duel::new(catalog, MatchConfig::new().with_seed(4)).unwrap();

    // Discarding a 0-attack card leaves mana at 0.
    duel.select_card_to_discard(0).unwrap();
    assert_eq!(duel.phase(), Phase::CardSelection);
    assert_eq!(duel.step(), SelectionStep::AwaitingPlay);
    assert_eq!(duel.turn(), 0);

    duel.tick(16).unwrap();

    assert_eq!(duel.score(Side::Opponent), 1);
    assert_eq!(duel.turn(), 1);
    assert_eq!(duel.phase(), Phase::ManaGain);
}

/// Boost +2 at 4 mana empties the pool, lifts the next play, then lapses.
#[test]
fn test_boost_applies_to_one_play() {
    let mut duel = resumed(
        Phase::CardSelection,
        SelectionStep::AwaitingManaAction,
        4,
        vec![card("spark", 3, 0, Element::Fire), card("spark2", 3, 0, Element::Fire)],
        vec![card("stone", 4, 0, Element::Earth), card("stone2", 4, 0, Element::Earth)],
        MatchConfig::new(),
    );

    duel.choose_mana_action(ManaAction::Boost { tier: 2 }).unwrap();
    assert_eq!(duel.mana(Side::Player), 0);
    assert_eq!(duel.boost_amount(), 2);

    duel.select_card_to_play(0).unwrap();
    assert_eq!(duel.boost_amount(), 0);
    duel.tick(16).unwrap();

    let battle = duel.last_battle().unwrap();
    assert_eq!(battle.player_card.attack, 5);
    assert_eq!(battle.outcome, Outcome::Win);
    assert_eq!(duel.score(Side::Player), 1);

    // Next turn plays at base attack.
    assert_eq!(duel.phase(), Phase::CardSelection);
    duel.select_card_to_play(0).unwrap();
    duel.tick(16).unwrap();
    assert_eq!(duel.last_battle().unwrap().player_card.attack, 3);
    assert_eq!(duel.last_battle().unwrap().outcome, Outcome::Lose);
}

/// Equal attacks fall back to the element table.
#[test]
fn test_element_tie_break() {
    let mut duel = resumed(
        Phase::CardSelection,
        SelectionStep::AwaitingPlay,
        0,
        vec![card("flare", 4, 0, Element::Fire)],
        vec![card("vine", 4, 0, Element::Nature)],
        MatchConfig::new(),
    );

    duel.select_card_to_play(0).unwrap();
    duel.tick(1).unwrap();

    let battle = duel.last_battle().unwrap();
    assert_eq!(battle.outcome, Outcome::Win);
    assert!(battle.decided_by_element);
    assert_eq!(duel.result(), Some(MatchResult::Winner(Side::Player)));
}

/// The opponent plays its cheapest card on credit when broke.
#[test]
fn test_opponent_plays_on_credit() {
    let mut duel = resumed(
        Phase::CardSelection,
        SelectionStep::AwaitingPlay,
        0,
        vec![card("a", 1, 0, Element::Air), card("b", 1, 0, Element::Air)],
        vec![card("big", 9, 6, Element::Earth), card("mid", 5, 4, Element::Water)],
        MatchConfig::new(),
    );

    duel.select_card_to_play(0).unwrap();

    assert_eq!(duel.mana(Side::Opponent), -4);
    let pending = duel.state().pending.as_ref().unwrap();
    assert_eq!(pending.opponent_card.id.as_str(), "mid");
    assert!(pending.opponent_forced);
}

/// Both hands emptying ends the match on the current scores.
#[test]
fn test_match_ends_when_hands_empty() {
    let mut duel = resumed(
        Phase::CardSelection,
        SelectionStep::AwaitingPlay,
        0,
        vec![card("a", 2, 0, Element::Water)],
        vec![card("b", 2, 0, Element::Water)],
        MatchConfig::new(),
    );

    duel.select_card_to_play(0).unwrap();
    duel.tick(16).unwrap();

    assert!(duel.is_over());
    assert_eq!(duel.result(), Some(MatchResult::Draw));
    assert!(matches!(
        duel.events().last(),
        Some(GameEvent::MatchEnded { result: MatchResult::Draw, .. })
    ));

    assert_eq!(duel.tick(16), Err(Rejection::MatchOver));
    assert_eq!(duel.select_card_to_play(0), Err(Rejection::MatchOver));
    assert_eq!(duel.apply(Command::SelectCardToDiscard { index: 0 }), Err(Rejection::MatchOver));
}

/// Running out the clock plays the first affordable card.
#[test]
fn test_timeout_auto_pick() {
    let mut duel = resumed(
        Phase::CardSelection,
        SelectionStep::AwaitingPlay,
        1,
        vec![
            card("pricey", 8, 5, Element::Fire),
            card("cheap", 2, 1, Element::Air),
            card("free", 1, 0, Element::Air),
        ],
        vec![card("x", 1, 0, Element::Water), card("y", 1, 0, Element::Water)],
        MatchConfig::new().with_decision_time_limit_ms(1_000),
    );

    duel.tick(1_000).unwrap();
    assert_eq!(duel.phase(), Phase::CardSelection);
    assert_eq!(duel.remaining_decision_ms(), Some(0));

    duel.tick(1).unwrap();
    assert_eq!(duel.phase(), Phase::Battle);
    assert!(duel.last_play_timed_out());
    assert_eq!(duel.mana(Side::Player), 0);
    assert_eq!(duel.state().pending.as_ref().unwrap().player_card.id.as_str(), "cheap");

    duel.tick(16).unwrap();
    assert!(duel.last_battle().unwrap().timed_out);
}

/// With a time limit and nothing affordable, the forfeit waits for the
/// clock and then happens exactly once.
#[test]
fn test_timeout_forfeit() {
    let mut duel = resumed(
        Phase::CardSelection,
        SelectionStep::AwaitingPlay,
        0,
        vec![card("heavy", 5, 4, Element::Earth), card("heavier", 6, 5, Element::Earth)],
        vec![card("x", 1, 0, Element::Water), card("y", 1, 0, Element::Water)],
        MatchConfig::new().with_decision_time_limit_ms(1_000),
    );

    duel.tick(600).unwrap();
    duel.tick(400).unwrap();
    assert_eq!(duel.score(Side::Opponent), 0);
    assert_eq!(duel.hand(Side::Player).len(), 2);
    assert!(duel.available_actions().forfeit_pending);

    duel.tick(1).unwrap();

    assert_eq!(duel.score(Side::Opponent), 1);
    assert_eq!(duel.hand(Side::Player).len(), 1);
    assert_eq!(duel.hand(Side::Opponent).len(), 1);
    assert_eq!(duel.turn(), 1);
    let forfeits = duel
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::Forfeited { .. }))
        .count();
    assert_eq!(forfeits, 1);

    // The next turn waits for the clock again.
    assert!(!duel.is_over());
    assert_eq!(duel.phase(), Phase::CardSelection);
    assert_eq!(duel.remaining_decision_ms(), Some(1_000));
}

/// A one-card hand that cannot pay waits for input instead of playing
/// the match out during setup.
#[test]
fn test_unaffordable_single_card_waits() {
    let catalog = CardCatalog::new(vec![card("boulder", 1, 5, Element::Earth)]).unwrap();
    let config = MatchConfig::new()
        .with_seed(6)
        .with_deck_size(40)
        .with_initial_hand_size(1)
        .with_decision_time_limit_ms(10_000);
    let mut duel = Duel::new(catalog, config).unwrap();

    assert!(!duel.is_over());
    assert_eq!(duel.turn(), 0);
    assert_eq!(duel.score(Side::Opponent), 0);
    assert_eq!(duel.step(), SelectionStep::AwaitingPlay);
    assert_eq!(duel.remaining_decision_ms(), Some(10_000));

    duel.tick(10_001).unwrap();
    assert_eq!(duel.turn(), 1);
    assert_eq!(duel.score(Side::Opponent), 1);
    assert!(!duel.is_over());
}

/// Each tick forfeits at most one turn, however large the deck.
#[test]
fn test_forfeits_advance_one_turn_per_tick() {
    let catalog = CardCatalog::new(vec![card("boulder", 1, 5, Element::Earth)]).unwrap();
    let config = MatchConfig::new()
        .with_seed(6)
        .with_deck_size(50_000)
        .with_initial_hand_size(1);
    let mut duel = Duel::new(catalog, config).unwrap();
    assert_eq!(duel.turn(), 0);

    for expected in 1..=100 {
        duel.tick(16).unwrap();
        assert_eq!(duel.turn(), expected);
    }
    assert_eq!(duel.score(Side::Opponent), 100);
    assert!(!duel.is_over());
}

/// A timeout while the mana action is open counts as a skip.
#[test]
fn test_timeout_during_mana_action() {
    let mut duel = resumed(
        Phase::CardSelection,
        SelectionStep::AwaitingManaAction,
        3,
        vec![card("a", 2, 1, Element::Fire), card("b", 2, 1, Element::Fire)],
        vec![card("x", 1, 0, Element::Water), card("y", 1, 0, Element::Water)],
        MatchConfig::new().with_decision_time_limit_ms(500),
    );

    duel.tick(501).unwrap();

    assert_eq!(duel.phase(), Phase::Battle);
    assert_eq!(duel.state().mana_action, Some(ManaAction::Skip));
    assert_eq!(duel.mana(Side::Player), 2);
    assert!(duel.last_play_timed_out());
}

/// Without a time limit the clock never forces a play.
#[test]
fn test_no_time_limit() {
    let mut duel = resumed(
        Phase::CardSelection,
        SelectionStep::AwaitingPlay,
        0,
        vec![card("a", 2, 0, Element::Fire)],
        vec![card("x", 1, 0, Element::Water)],
        MatchConfig::new(),
    );

    duel.tick(u64::MAX).unwrap();
    duel.tick(u64::MAX).unwrap();

    assert_eq!(duel.phase(), Phase::CardSelection);
    assert_eq!(duel.remaining_decision_ms(), None);
}

/// Mana gain is skipped once a hand is down to one card.
#[test]
fn test_skip_mana_gain_with_small_hand() {
    let catalog = CardCatalog::new(vec![card("rock", 1, 0, Element::Earth)]).unwrap();
    let config = MatchConfig::new()
        .with_seed(3)
        .with_deck_size(1)
        .with_initial_hand_size(1);
    let duel = Duel::new(catalog, config).unwrap();

    assert_eq!(duel.phase(), Phase::CardSelection);
    assert_eq!(duel.step(), SelectionStep::AwaitingPlay);
}

/// Restart validates its config and deals a fresh match.
#[test]
fn test_restart() {
    let mut duel = Duel::new(mixed_catalog(), MatchConfig::new().with_seed(8)).unwrap();
    autoplay(&mut duel);
    assert!(duel.is_over());

    let bad = MatchConfig::new().with_deck_size(2).with_initial_hand_size(3);
    assert!(matches!(duel.restart(bad), Err(Rejection::InvalidConfig(_))));
    assert!(duel.is_over());

    duel.apply(Command::Restart(MatchConfig::new().with_seed(9).with_initial_mana(2)))
        .unwrap();
    assert!(!duel.is_over());
    assert_eq!(duel.turn(), 0);
    assert_eq!(duel.score(Side::Player), 0);
    assert_eq!(duel.score(Side::Opponent), 0);
    assert_eq!(duel.mana(Side::Player), 2);
    assert!(duel.history().is_empty());
}

/// The same seed replays the same match.
#[test]
fn test_seeded_matches_replay() {
    let play = |seed: u64| {
        let mut duel = Duel::new(mixed_catalog(), MatchConfig::new().with_seed(seed)).unwrap();
        autoplay(&mut duel);
        (duel.drain_events(), duel.result())
    };

    let (events_a, result_a) = play(21);
    let (events_b, result_b) = play(21);

    assert_eq!(events_a, events_b);
    assert_eq!(result_a, result_b);
    assert!(result_a.is_some());
}

/// Unseeded matches still run to completion.
#[test]
fn test_unseeded_match_finishes() {
    let mut duel = Duel::new(mixed_catalog(), MatchConfig::new()).unwrap();
    autoplay(&mut duel);

    let points = duel.score(Side::Player) + duel.score(Side::Opponent);
    assert!(points <= duel.turn());
}

/// An empty catalog yields a warning and an immediate draw.
#[test]
fn test_empty_catalog() {
    let duel = Duel::new(CardCatalog::default(), MatchConfig::new().with_seed(1)).unwrap();

    assert_eq!(duel.warnings(), &[EngineWarning::EmptyCatalog]);
    assert!(duel.is_over());
    assert_eq!(duel.result(), Some(MatchResult::Draw));
}
