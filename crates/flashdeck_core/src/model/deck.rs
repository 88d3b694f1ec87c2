//! Deck/card records and identifiers.
//!
//! # Responsibility
//! - Define opaque string identifiers with fresh-id generation.
//! - Define `Card`, `Deck` and the validated multi-field `CardDraft`.
//!
//! # Invariants
//! - Identifiers are opaque: any string loaded from storage is accepted.
//! - `Card.front`, `Card.back` and `Deck.name` are trimmed and non-empty when
//!   written through the store.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(String);

/// Stable identifier of a card, unique within its deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

macro_rules! opaque_id {
    ($name:ident) => {
        impl $name {
            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().simple().to_string())
            }

            /// Wraps an existing identifier string without validation.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

opaque_id!(DeckId);
opaque_id!(CardId);

/// Text field names reported by validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    DeckName,
    CardFront,
    CardBack,
}

impl Display for TextField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::DeckName => "deck name",
            Self::CardFront => "card front",
            Self::CardBack => "card back",
        };
        f.write_str(name)
    }
}

/// Validation failure for a required text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyTextError(pub TextField);

impl Display for EmptyTextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} must not be empty", self.0)
    }
}

impl Error for EmptyTextError {}

/// Trims `value`, returning `None` when nothing is left.
pub fn normalize_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trims a required field, mapping emptiness to a field-tagged error.
pub fn require_text(value: &str, field: TextField) -> Result<String, EmptyTextError> {
    normalize_text(value).ok_or(EmptyTextError(field))
}

/// One front/back pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
}

/// Named, ordered collection of cards.
///
/// Card order is display order and changes on shuffle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    /// Creates an empty deck with a generated id.
    ///
    /// `name` is stored as given; callers normalize first.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DeckId::generate(),
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| &card.id == card_id)
    }

    pub fn card_position(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == card_id)
    }

    /// Generates a card id not yet used in this deck.
    pub fn fresh_card_id(&self) -> CardId {
        loop {
            let candidate = CardId::generate();
            if self.card(&candidate).is_none() {
                return candidate;
            }
        }
    }
}

/// Front/back input collected as a unit before any mutation.
///
/// Mirrors prompt-style input where cancelling either field abandons the
/// whole edit: nothing reaches the store unless both fields validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
}

impl CardDraft {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// Returns the trimmed `(front, back)` pair or the first empty field.
    pub fn validate(&self) -> Result<(String, String), EmptyTextError> {
        let front = require_text(&self.front, TextField::CardFront)?;
        let back = require_text(&self.back, TextField::CardBack)?;
        Ok((front, back))
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_text, CardDraft, CardId, Deck, DeckId, TextField};

    #[test]
    fn normalize_text_trims_and_rejects_blank() {
        assert_eq!(normalize_text("  Bio \n").as_deref(), Some("Bio"));
        assert_eq!(normalize_text(" \t "), None);
        assert_eq!(normalize_text(""), None);
    }

    #[test]
    fn generated_ids_are_distinct_hex_strings() {
        let first = DeckId::generate();
        let second = DeckId::generate();
        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 32);
        assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn draft_reports_first_empty_field() {
        let err = CardDraft::new("Cell", "   ").validate().unwrap_err();
        assert_eq!(err.0, TextField::CardBack);

        let err = CardDraft::new("", "").validate().unwrap_err();
        assert_eq!(err.0, TextField::CardFront);

        let (front, back) = CardDraft::new(" Cell ", " unit ").validate().unwrap();
        assert_eq!((front.as_str(), back.as_str()), ("Cell", "unit"));
    }

    #[test]
    fn fresh_card_id_is_unused_in_deck() {
        let mut deck = Deck::new("Bio");
        for _ in 0..16 {
            let id = deck.fresh_card_id();
            assert!(deck.card(&id).is_none());
            deck.cards.push(super::Card {
                id,
                front: "f".to_string(),
                back: "b".to_string(),
            });
        }
        assert!(deck.card(&CardId::new("missing")).is_none());
    }
}
