//! Card catalog: the read-only list every deck is sampled from.
//!
//! The catalog is supplied by the host (file or network origin is not the
//! engine's concern) and validated once: ids must be unique.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId};
use crate::core::error::CatalogError;
use crate::core::rng::GameRng;

/// Immutable list of card definitions with lookup by id.
///
/// ## Example
///
/// ```
/// use elemental_duel::cards::{Card, CardCatalog, CardId, Element};
///
/// let catalog = CardCatalog::new(vec![
///     Card::new("ember", "Ember Imp", 3, 1, Element::Fire),
///     Card::new("tide", "Tide Caller", 2, 0, Element::Water),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get(&CardId::from("tide")).unwrap().attack, 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(cards: Vec<Card>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();
        for (pos, card) in cards.iter().enumerate() {
            if index.insert(card.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(card.id.clone()));
            }
        }
        Ok(Self { cards, index })
    }

    /// Parse a JSON array of card records.
    ///
    /// Element names are case-insensitive; `art` may be omitted.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Self::new(cards)
    }

    /// Get a card by id.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.index.get(id).map(|&pos| &self.cards[pos])
    }

    /// Check if an id is in the catalog.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of card definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in ingestion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over all cards in ingestion order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Pick one card uniformly at random. `None` if the catalog is empty.
    pub fn sample(&self, rng: &mut GameRng) -> Option<&Card> {
        if self.cards.is_empty() {
            return None;
        }
        Some(&self.cards[rng.gen_index(self.cards.len())])
    }
}
