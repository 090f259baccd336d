//! Deck and hand bookkeeping.
//!
//! Decks and hands are `im::Vector<Card>`, so snapshotting a full duel is
//! O(1). Index 0 of a deck is its top; draws pop from the front.
//!
//! ```
//! use elemental_duel::cards::{Card, CardCatalog, Element};
//! use elemental_duel::core::GameRng;
//! use elemental_duel::zones::{self, Hand};
//!
//! let catalog = CardCatalog::new(vec![Card::new("ember", "Ember", 3, 1, Element::Fire)]).unwrap();
//! let mut rng = GameRng::new(1);
//!
//! let mut deck = zones::build_deck(&catalog, 4, &mut rng).unwrap();
//! let mut hand = Hand::new();
//!
//! assert_eq!(zones::draw(&mut deck, &mut hand, 3), 3);
//! assert_eq!(zones::draw(&mut deck, &mut hand, 3), 1);
//! assert!(deck.is_empty());
//! ```

use im::Vector;

use crate::cards::{Card, CardCatalog};
use crate::core::error::DeckError;
use crate::core::rng::GameRng;

/// Ordered draw pile. Index 0 is the top.
pub type Deck = Vector<Card>;

/// Cards held by one side, in draw order.
pub type Hand = Vector<Card>;

/// Sample `size` cards uniformly with replacement, then shuffle.
///
/// Fails with `EmptyCatalog` when there is nothing to sample.
pub fn build_deck(catalog: &CardCatalog, size: usize, rng: &mut GameRng) -> Result<Deck, DeckError> {
    if catalog.is_empty() {
        return Err(DeckError::EmptyCatalog);
    }

    let mut deck = Deck::new();
    for _ in 0..size {
        if let Some(card) = catalog.sample(rng) {
            deck.push_back(card.clone());
        }
    }

    shuffle(&mut deck, rng);
    Ok(deck)
}

/// Shuffle a deck with the match RNG.
///
/// `im::Vector` is not a slice, so the cards go through a `Vec`.
pub fn shuffle(deck: &mut Deck, rng: &mut GameRng) {
    let mut cards: Vec<Card> = deck.iter().cloned().collect();
    rng.shuffle(&mut cards);
    *deck = cards.into_iter().collect();
}

/// Move up to `n` cards from the top of `deck` to the end of `hand`.
///
/// Stops early when the deck runs out. Returns the number moved.
pub fn draw(deck: &mut Deck, hand: &mut Hand, n: usize) -> usize {
    let mut moved = 0;
    while moved < n {
        match deck.pop_front() {
            Some(card) => hand.push_back(card),
            None => break,
        }
        moved += 1;
    }
    moved
}

/// Remove the card at `index` from a hand.
pub fn take(hand: &mut Hand, index: usize) -> Option<Card> {
    if index < hand.len() {
        Some(hand.remove(index))
    } else {
        None
    }
}

/// Put the hand cards at `indices` back into the deck, then reshuffle.
///
/// Out-of-range and repeated indices are ignored. Returns the number of
/// cards returned.
pub fn return_to_deck(deck: &mut Deck, hand: &mut Hand, indices: &[usize], rng: &mut GameRng) -> usize {
    let mut sorted: Vec<usize> = indices.iter().copied().filter(|&i| i < hand.len()).collect();
    sorted.sort_unstable();
    sorted.dedup();

    // Highest first so earlier removals don't shift later indices.
    for &i in sorted.iter().rev() {
        deck.push_back(hand.remove(i));
    }

    shuffle(deck, rng);
    sorted.len()
}
