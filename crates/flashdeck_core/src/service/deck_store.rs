//! Deck/card store: the single source of truth for application state.
//!
//! # Responsibility
//! - Apply every deck and card mutation and enforce model invariants.
//! - Persist the whole state through the injected repository after each
//!   successful mutation.
//! - Answer read-only queries (lookups, active deck, search).
//!
//! # Invariants
//! - A mutation either applies fully and persists, or returns `Err` with the
//!   state untouched.
//! - The active deck reference is `None` or names an existing deck.
//! - Queries never persist.
//! - A failed save is logged and remembered; the in-memory mutation stands.

use crate::model::deck::{
    require_text, Card, CardDraft, CardId, Deck, DeckId, EmptyTextError, TextField,
};
use crate::model::state::StoreState;
use crate::repo::state_repo::StateRepository;
use crate::search::filter::CardFilter;
use crate::shuffle::shuffle_in_place;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Reasons a store operation left the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Required text was empty after trimming.
    EmptyText(TextField),
    /// No deck with this id exists.
    DeckNotFound(DeckId),
    /// The deck exists but holds no card with this id.
    CardNotFound { deck_id: DeckId, card_id: CardId },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText(field) => write!(f, "{field} must not be empty"),
            Self::DeckNotFound(deck_id) => write!(f, "deck not found: {deck_id}"),
            Self::CardNotFound { deck_id, card_id } => {
                write!(f, "card not found: {card_id} in deck {deck_id}")
            }
        }
    }
}

impl Error for StoreError {}

impl From<EmptyTextError> for StoreError {
    fn from(value: EmptyTextError) -> Self {
        Self::EmptyText(value.0)
    }
}

/// Owns decks, cards and the active selection.
///
/// Constructed once per session with an explicit repository; callers hold it
/// by reference and re-query after each operation.
pub struct DeckStore<R: StateRepository> {
    repo: R,
    state: StoreState,
    rng: StdRng,
    last_persist_failed: bool,
}

impl<R: StateRepository> DeckStore<R> {
    /// Loads saved state from `repo` and seeds shuffling from OS entropy.
    pub fn open(repo: R) -> Self {
        Self::with_rng(repo, StdRng::from_entropy())
    }

    /// Loads saved state from `repo` using a caller-provided RNG.
    ///
    /// Unreadable storage yields an empty store. A dangling or missing
    /// active reference is repaired in memory without writing back.
    pub fn with_rng(repo: R, rng: StdRng) -> Self {
        let mut state = repo.load_or_default();
        if state.normalize_active() {
            debug!(
                "event=active_repair module=store status=ok active_set={}",
                state.active_deck_id.is_some()
            );
        }
        info!(
            "event=store_open module=store status=ok decks={}",
            state.decks.len()
        );
        Self {
            repo,
            state,
            rng,
            last_persist_failed: false,
        }
    }

    /// Read-only view of the full state.
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn decks(&self) -> &[Deck] {
        &self.state.decks
    }

    pub fn deck(&self, deck_id: &DeckId) -> Option<&Deck> {
        self.state.deck(deck_id)
    }

    pub fn active_deck_id(&self) -> Option<&DeckId> {
        self.state.active_deck_id.as_ref()
    }

    pub fn active_deck(&self) -> Option<&Deck> {
        self.state.active_deck()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Whether the most recent save attempt failed.
    pub fn last_persist_failed(&self) -> bool {
        self.last_persist_failed
    }

    /// Appends a new empty deck and makes it active.
    pub fn create_deck(&mut self, name: &str) -> StoreResult<DeckId> {
        let name = require_text(name, TextField::DeckName)?;
        let mut deck = Deck::new(name);
        deck.id = self.state.fresh_deck_id();
        let deck_id = deck.id.clone();

        self.state.decks.push(deck);
        self.state.active_deck_id = Some(deck_id.clone());
        self.persist("deck_create");
        info!("event=deck_create module=store status=ok deck_id={deck_id}");
        Ok(deck_id)
    }

    pub fn rename_deck(&mut self, deck_id: &DeckId, name: &str) -> StoreResult<()> {
        let name = require_text(name, TextField::DeckName)?;
        let deck = self.deck_mut(deck_id)?;
        deck.name = name;
        self.persist("deck_rename");
        Ok(())
    }

    /// Removes a deck with all its cards and returns it.
    ///
    /// When the removed deck was active, the first remaining deck (or none)
    /// becomes active.
    pub fn delete_deck(&mut self, deck_id: &DeckId) -> StoreResult<Deck> {
        let position = self
            .state
            .decks
            .iter()
            .position(|deck| &deck.id == deck_id)
            .ok_or_else(|| StoreError::DeckNotFound(deck_id.clone()))?;

        let removed = self.state.decks.remove(position);
        if self.state.active_deck_id.as_ref() == Some(deck_id) {
            self.state.active_deck_id = self.state.decks.first().map(|deck| deck.id.clone());
        }
        self.persist("deck_delete");
        info!(
            "event=deck_delete module=store status=ok deck_id={deck_id} cards_removed={}",
            removed.cards.len()
        );
        Ok(removed)
    }

    /// Selects the active deck; `None` clears the selection.
    pub fn set_active_deck(&mut self, deck_id: Option<&DeckId>) -> StoreResult<()> {
        if let Some(deck_id) = deck_id {
            if !self.state.contains_deck(deck_id) {
                return Err(StoreError::DeckNotFound(deck_id.clone()));
            }
        }
        self.state.active_deck_id = deck_id.cloned();
        self.persist("deck_select");
        Ok(())
    }

    pub fn create_card(&mut self, deck_id: &DeckId, front: &str, back: &str) -> StoreResult<CardId> {
        self.create_card_from(deck_id, &CardDraft::new(front, back))
    }

    /// Appends a card built from a fully collected draft.
    pub fn create_card_from(&mut self, deck_id: &DeckId, draft: &CardDraft) -> StoreResult<CardId> {
        let (front, back) = draft.validate()?;
        let deck = self.deck_mut(deck_id)?;
        let card_id = deck.fresh_card_id();
        deck.cards.push(Card {
            id: card_id.clone(),
            front,
            back,
        });
        self.persist("card_create");
        debug!("event=card_create module=store status=ok deck_id={deck_id} card_id={card_id}");
        Ok(card_id)
    }

    pub fn edit_card(
        &mut self,
        deck_id: &DeckId,
        card_id: &CardId,
        front: &str,
        back: &str,
    ) -> StoreResult<()> {
        self.edit_card_from(deck_id, card_id, &CardDraft::new(front, back))
    }

    /// Replaces a card's text in place, keeping its position.
    pub fn edit_card_from(
        &mut self,
        deck_id: &DeckId,
        card_id: &CardId,
        draft: &CardDraft,
    ) -> StoreResult<()> {
        let (front, back) = draft.validate()?;
        let card = self
            .deck_mut(deck_id)?
            .card_mut(card_id)
            .ok_or_else(|| StoreError::CardNotFound {
                deck_id: deck_id.clone(),
                card_id: card_id.clone(),
            })?;
        card.front = front;
        card.back = back;
        self.persist("card_edit");
        Ok(())
    }

    /// Removes one card, keeping the relative order of the rest.
    pub fn delete_card(&mut self, deck_id: &DeckId, card_id: &CardId) -> StoreResult<Card> {
        let deck = self.deck_mut(deck_id)?;
        let position = deck
            .card_position(card_id)
            .ok_or_else(|| StoreError::CardNotFound {
                deck_id: deck_id.clone(),
                card_id: card_id.clone(),
            })?;
        let removed = deck.cards.remove(position);
        self.persist("card_delete");
        Ok(removed)
    }

    /// Randomly reorders a deck's cards.
    ///
    /// Returns `Ok(false)` without persisting when the deck has fewer than
    /// two cards.
    pub fn shuffle_deck(&mut self, deck_id: &DeckId) -> StoreResult<bool> {
        let deck = self
            .state
            .decks
            .iter_mut()
            .find(|deck| &deck.id == deck_id)
            .ok_or_else(|| StoreError::DeckNotFound(deck_id.clone()))?;
        if deck.cards.len() < 2 {
            debug!("event=deck_shuffle module=store status=skip deck_id={deck_id}");
            return Ok(false);
        }

        shuffle_in_place(&mut deck.cards, &mut self.rng);
        self.persist("deck_shuffle");
        Ok(true)
    }

    /// Cards of `deck_id` whose front or back contains `query`, in deck order.
    pub fn search(&self, deck_id: &DeckId, query: &str) -> StoreResult<Vec<&Card>> {
        let deck = self
            .state
            .deck(deck_id)
            .ok_or_else(|| StoreError::DeckNotFound(deck_id.clone()))?;
        Ok(CardFilter::new(query).apply(&deck.cards))
    }

    /// Searches the active deck; empty when no deck is active.
    pub fn search_active(&self, query: &str) -> Vec<&Card> {
        self.active_deck()
            .map(|deck| CardFilter::new(query).apply(&deck.cards))
            .unwrap_or_default()
    }

    fn deck_mut(&mut self, deck_id: &DeckId) -> StoreResult<&mut Deck> {
        self.state
            .deck_mut(deck_id)
            .ok_or_else(|| StoreError::DeckNotFound(deck_id.clone()))
    }

    fn persist(&mut self, operation: &'static str) {
        match self.repo.save_state(&self.state) {
            Ok(()) => {
                self.last_persist_failed = false;
                debug!("event=state_save module=store status=ok op={operation}");
            }
            Err(err) => {
                self.last_persist_failed = true;
                warn!("event=state_save module=store status=error op={operation} error={err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DeckStore, StoreError};
    use crate::model::deck::{DeckId, TextField};
    use crate::repo::state_repo::MemoryStateRepository;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store() -> DeckStore<MemoryStateRepository> {
        DeckStore::with_rng(MemoryStateRepository::new(), StdRng::seed_from_u64(1))
    }

    #[test]
    fn create_deck_trims_and_activates() {
        let mut store = store();
        let id = store.create_deck("  Bio  ").unwrap();
        assert_eq!(store.deck(&id).unwrap().name, "Bio");
        assert_eq!(store.active_deck_id(), Some(&id));
        assert_eq!(store.repository().save_count(), 1);
    }

    #[test]
    fn blank_deck_name_is_rejected_without_saving() {
        let mut store = store();
        let err = store.create_deck(" ").unwrap_err();
        assert_eq!(err, StoreError::EmptyText(TextField::DeckName));
        assert!(store.decks().is_empty());
        assert_eq!(store.repository().save_count(), 0);
    }

    #[test]
    fn queries_do_not_persist() {
        let mut store = store();
        let id = store.create_deck("Bio").unwrap();
        store.create_card(&id, "Cell", "unit").unwrap();
        let saves = store.repository().save_count();

        let _ = store.search(&id, "cell").unwrap();
        let _ = store.search_active("");
        let _ = store.active_deck();
        assert_eq!(store.repository().save_count(), saves);
    }

    #[test]
    fn single_card_shuffle_is_a_no_op() {
        let mut store = store();
        let id = store.create_deck("Bio").unwrap();
        store.create_card(&id, "Cell", "unit").unwrap();
        let saves = store.repository().save_count();

        assert!(!store.shuffle_deck(&id).unwrap());
        assert_eq!(store.repository().save_count(), saves);
        assert_eq!(
            store.shuffle_deck(&DeckId::new("missing")).unwrap_err(),
            StoreError::DeckNotFound(DeckId::new("missing"))
        );
    }
}
