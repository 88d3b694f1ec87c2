//! Whole-store state and its serialized record.
//!
//! # Responsibility
//! - Hold the ordered deck list and active deck reference.
//! - Encode/decode the single persisted record.
//!
//! # Invariants
//! - Wire names are `decks`, `activeDeckId`, `id`, `name`, `cards`, `front`,
//!   `back`.
//! - A missing or `null` `activeDeckId` decodes to `None`.

use super::deck::{Deck, DeckId};
use serde::{Deserialize, Serialize};

/// Authoritative state owned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub decks: Vec<Deck>,
    #[serde(rename = "activeDeckId", default)]
    pub active_deck_id: Option<DeckId>,
}

impl StoreState {
    pub fn deck(&self, deck_id: &DeckId) -> Option<&Deck> {
        self.decks.iter().find(|deck| &deck.id == deck_id)
    }

    pub fn deck_mut(&mut self, deck_id: &DeckId) -> Option<&mut Deck> {
        self.decks.iter_mut().find(|deck| &deck.id == deck_id)
    }

    pub fn contains_deck(&self, deck_id: &DeckId) -> bool {
        self.deck(deck_id).is_some()
    }

    /// Generates a deck id not yet used by this state.
    pub fn fresh_deck_id(&self) -> DeckId {
        loop {
            let candidate = DeckId::generate();
            if !self.contains_deck(&candidate) {
                return candidate;
            }
        }
    }

    /// Returns the deck the active reference points at.
    pub fn active_deck(&self) -> Option<&Deck> {
        self.active_deck_id
            .as_ref()
            .and_then(|deck_id| self.deck(deck_id))
    }

    /// Repairs the active reference after load.
    ///
    /// A missing or dangling reference falls back to the first deck, or to
    /// `None` when there are no decks. Returns whether anything changed.
    pub fn normalize_active(&mut self) -> bool {
        if self.active_deck().is_some() {
            return false;
        }
        let fallback = self.decks.first().map(|deck| deck.id.clone());
        let changed = fallback != self.active_deck_id;
        self.active_deck_id = fallback;
        changed
    }

    /// Serializes the full state to its JSON record.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a JSON record produced by [`StoreState::encode`].
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::StoreState;
    use crate::model::deck::{Card, CardId, Deck, DeckId};

    fn sample_state() -> StoreState {
        StoreState {
            decks: vec![Deck {
                id: DeckId::new("d1"),
                name: "Bio".to_string(),
                cards: vec![Card {
                    id: CardId::new("c1"),
                    front: "Cell".to_string(),
                    back: "Basic unit of life".to_string(),
                }],
            }],
            active_deck_id: Some(DeckId::new("d1")),
        }
    }

    #[test]
    fn encode_uses_record_field_names() {
        let value: serde_json::Value =
            serde_json::from_str(&sample_state().encode().unwrap()).unwrap();
        assert_eq!(value["activeDeckId"], "d1");
        assert_eq!(value["decks"][0]["id"], "d1");
        assert_eq!(value["decks"][0]["name"], "Bio");
        assert_eq!(value["decks"][0]["cards"][0]["front"], "Cell");
        assert_eq!(value["decks"][0]["cards"][0]["back"], "Basic unit of life");
    }

    #[test]
    fn decode_accepts_null_or_missing_active_deck() {
        let with_null = StoreState::decode(r#"{"decks":[],"activeDeckId":null}"#).unwrap();
        assert_eq!(with_null, StoreState::default());

        let missing = StoreState::decode(r#"{"decks":[]}"#).unwrap();
        assert_eq!(missing.active_deck_id, None);
    }

    #[test]
    fn decode_accepts_foreign_id_strings() {
        let raw = r#"{"decks":[{"id":"lq1x9abc123","name":"A","cards":[]}],"activeDeckId":"lq1x9abc123"}"#;
        let state = StoreState::decode(raw).unwrap();
        assert_eq!(state.active_deck().unwrap().name, "A");
    }

    #[test]
    fn normalize_active_falls_back_to_first_deck() {
        let mut state = sample_state();
        state.active_deck_id = Some(DeckId::new("gone"));
        assert!(state.normalize_active());
        assert_eq!(state.active_deck_id, Some(DeckId::new("d1")));
        assert!(!state.normalize_active());

        let mut empty = StoreState {
            decks: Vec::new(),
            active_deck_id: Some(DeckId::new("gone")),
        };
        assert!(empty.normalize_active());
        assert_eq!(empty.active_deck_id, None);
    }
}
