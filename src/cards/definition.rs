//! Card definitions - static card data.
//!
//! A `Card` holds the immutable properties of one catalog entry. Decks and
//! hands hold clones; a played copy may carry a boosted attack, but the
//! catalog original is never touched.

use serde::{Deserialize, Serialize};

/// Unique identifier for a catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card element, used to break attack ties.
///
/// Parsed case-insensitively; unrecognised names become `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Element {
    Fire,
    Water,
    Nature,
    Earth,
    Air,
    Other,
}

impl Element {
    /// Every element, in table order.
    pub const ALL: [Element; 6] = [
        Element::Fire,
        Element::Water,
        Element::Nature,
        Element::Earth,
        Element::Air,
        Element::Other,
    ];

    /// Row/column of this element in the advantage table.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Nature => "nature",
            Element::Earth => "earth",
            Element::Air => "air",
            Element::Other => "other",
        }
    }

    /// Parse an element name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(name))
            .unwrap_or(Element::Other)
    }
}

impl From<String> for Element {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<Element> for String {
    fn from(element: Element) -> Self {
        element.name().to_string()
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque reference to card art. The engine never interprets it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtRef(pub String);

/// Static card definition.
///
/// ## Example
///
/// ```
/// use elemental_duel::cards::{Card, Element};
///
/// let ember = Card::new("ember", "Ember Imp", 3, 1, Element::Fire)
///     .with_art("imp.png");
///
/// let played = ember.boosted(2);
/// assert_eq!(played.attack, 5);
/// assert_eq!(ember.attack, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier within the catalog.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Battle strength.
    pub attack: u32,

    /// Mana needed to play the card.
    pub cost: u32,

    /// Tie-break element.
    pub element: Element,

    /// Art reference for the presentation layer.
    #[serde(default)]
    pub art: ArtRef,
}

impl Card {
    /// Create a new card with no art reference.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        attack: u32,
        cost: u32,
        element: Element,
    ) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            attack,
            cost,
            element,
            art: ArtRef::default(),
        }
    }

    /// Set the art reference (builder pattern).
    #[must_use]
    pub fn with_art(mut self, art: impl Into<String>) -> Self {
        self.art = ArtRef(art.into());
        self
    }

    /// A copy of this card with `bonus` added to its attack.
    #[must_use]
    pub fn boosted(&self, bonus: u32) -> Self {
        let mut copy = self.clone();
        copy.attack = copy.attack.saturating_add(bonus);
        copy
    }
}
