use flashdeck_core::{
    DeckId, DeckStore, MemoryStateRepository, StateRepository, StoreError, TextField,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn new_store(repo: &MemoryStateRepository) -> DeckStore<&MemoryStateRepository> {
    DeckStore::with_rng(repo, StdRng::seed_from_u64(99))
}

#[test]
fn bio_scenario_search_then_delete() {
    let repo = MemoryStateRepository::new();
    let mut store = new_store(&repo);

    let bio = store.create_deck("Bio").unwrap();
    store
        .create_card(&bio, "Cell", "Basic unit of life")
        .unwrap();

    let hits = store.search(&bio, "cell").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].front, "Cell");

    store.delete_deck(&bio).unwrap();
    assert_eq!(store.active_deck_id(), None);
    assert!(store.decks().is_empty());
}

#[test]
fn deleting_active_deck_falls_back_to_first_remaining() {
    let repo = MemoryStateRepository::new();
    let mut store = new_store(&repo);

    let a = store.create_deck("A").unwrap();
    let b = store.create_deck("B").unwrap();
    assert_eq!(store.active_deck_id(), Some(&b));

    store.delete_deck(&b).unwrap();
    assert_eq!(store.active_deck_id(), Some(&a));
}

#[test]
fn deleting_inactive_deck_keeps_active_reference() {
    let repo = MemoryStateRepository::new();
    let mut store = new_store(&repo);

    let a = store.create_deck("A").unwrap();
    let b = store.create_deck("B").unwrap();
    let c = store.create_deck("C").unwrap();
    store.set_active_deck(Some(&b)).unwrap();

    store.delete_deck(&c).unwrap();
    assert_eq!(store.active_deck_id(), Some(&b));
    store.delete_deck(&a).unwrap();
    assert_eq!(store.active_deck_id(), Some(&b));
}

#[test]
fn deleting_deck_removes_its_cards() {
    let repo = MemoryStateRepository::new();
    let mut store = new_store(&repo);

    let keep = store.create_deck("Keep").unwrap();
    let drop_me = store.create_deck("Drop").unwrap();
    store.create_card(&keep, "k", "v").unwrap();
    let gone = store.create_card(&drop_me, "x", "y").unwrap();

    let removed = store.delete_deck(&drop_me).unwrap();
    assert_eq!(removed.cards.len(), 1);
    assert!(store
        .decks()
        .iter()
        .flat_map(|deck| deck.cards.iter())
        .all(|card| card.id != gone));

    let persisted = repo.load_state().unwrap().unwrap();
    assert_eq!(persisted.decks.len(), 1);
    assert_eq!(persisted.decks[0].id, keep);
}

#[test]
fn missing_deck_operations_are_no_ops() {
    let repo = MemoryStateRepository::new();
    let mut store = new_store(&repo);
    store.create_deck("A").unwrap();
    let before = store.state().clone();
    let saves = repo.save_count();
    let missing = DeckId::new("missing");

    assert_eq!(
        store.delete_deck(&missing).unwrap_err(),
        StoreError::DeckNotFound(missing.clone())
    );
    assert!(store.rename_deck(&missing, "B").is_err());
    assert!(store.set_active_deck(Some(&missing)).is_err());
    assert!(store.create_card(&missing, "f", "b").is_err());
    assert!(store.search(&missing, "").is_err());

    assert_eq!(store.state(), &before);
    assert_eq!(repo.save_count(), saves);
}

#[test]
fn rename_trims_and_rejects_blank() {
    let repo = MemoryStateRepository::new();
    let mut store = new_store(&repo);
    let id = store.create_deck("Old").unwrap();

    store.rename_deck(&id, "  New  ").unwrap();
    assert_eq!(store.deck(&id).unwrap().name, "New");

    let err = store.rename_deck(&id, "\n").unwrap_err();
    assert_eq!(err, StoreError::EmptyText(TextField::DeckName));
    assert_eq!(store.deck(&id).unwrap().name, "New");
}

#[test]
fn set_active_deck_accepts_none() {
    let repo = MemoryStateRepository::new();
    let mut store = new_store(&repo);
    let id = store.create_deck("A").unwrap();

    store.set_active_deck(None).unwrap();
    assert_eq!(store.active_deck_id(), None);
    assert!(store.active_deck().is_none());
    assert!(store.search_active("").is_empty());

    store.set_active_deck(Some(&id)).unwrap();
    assert_eq!(store.active_deck().unwrap().name, "A");
}

#[test]
fn deck_and_card_ids_stay_unique() {
    let repo = MemoryStateRepository::new();
    let mut store = new_store(&repo);

    let mut deck_ids = HashSet::new();
    for i in 0..20 {
        let deck_id = store.create_deck(&format!("Deck {i}")).unwrap();
        assert!(deck_ids.insert(deck_id.clone()));
        for j in 0..10 {
            store
                .create_card(&deck_id, &format!("front {j}"), "back")
                .unwrap();
        }
        if i % 3 == 0 {
            let first = store.deck(&deck_id).unwrap().cards[0].id.clone();
            store.delete_card(&deck_id, &first).unwrap();
            store.create_card(&deck_id, "again", "back").unwrap();
        }
    }

    for deck in store.decks() {
        let card_ids: HashSet<_> = deck.cards.iter().map(|card| &card.id).collect();
        assert_eq!(card_ids.len(), deck.cards.len());
    }
    assert_eq!(store.decks().len(), deck_ids.len());
}
