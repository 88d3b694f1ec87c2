//! Applies one parsed command to the store and prints the re-queried state.
//!
//! # Invariants
//! - Card commands need an active deck and leave the store untouched without one.
//! - Output is rendered from store queries made after the mutation.

use crate::command::Command;
use flashdeck_core::{CardDraft, CardId, DeckId, DeckStore, StateRepository};
use std::io::Write;

const NO_DECK_SELECTED: &str = "no deck selected";

pub fn execute<R: StateRepository, W: Write>(
    store: &mut DeckStore<R>,
    command: Command,
    out: &mut W,
) -> Result<(), String> {
    match command {
        Command::Decks => print_decks(store, out),
        Command::NewDeck { name } => {
            let deck_id = store.create_deck(&name).map_err(|err| err.to_string())?;
            emit(out, format_args!("created deck {deck_id}"))?;
            print_decks(store, out)
        }
        Command::RenameDeck { deck_id, name } => {
            store
                .rename_deck(&DeckId::new(deck_id), &name)
                .map_err(|err| err.to_string())?;
            print_decks(store, out)
        }
        Command::DeleteDeck { deck_id } => {
            let removed = store
                .delete_deck(&DeckId::new(deck_id))
                .map_err(|err| err.to_string())?;
            emit(
                out,
                format_args!("deleted deck {} ({} cards)", removed.name, removed.cards.len()),
            )?;
            print_decks(store, out)
        }
        Command::Use { deck_id } => {
            let deck_id = deck_id.map(DeckId::new);
            store
                .set_active_deck(deck_id.as_ref())
                .map_err(|err| err.to_string())?;
            print_decks(store, out)
        }
        Command::Cards { query } => print_cards(store, query.as_deref().unwrap_or(""), out),
        Command::AddCard { front, back } => {
            let deck_id = active_deck_id(store)?;
            let card_id = store
                .create_card_from(&deck_id, &CardDraft::new(front, back))
                .map_err(|err| err.to_string())?;
            emit(out, format_args!("created card {card_id}"))?;
            print_cards(store, "", out)
        }
        Command::EditCard {
            card_id,
            front,
            back,
        } => {
            let deck_id = active_deck_id(store)?;
            store
                .edit_card_from(&deck_id, &CardId::new(card_id), &CardDraft::new(front, back))
                .map_err(|err| err.to_string())?;
            print_cards(store, "", out)
        }
        Command::DeleteCard { card_id } => {
            let deck_id = active_deck_id(store)?;
            store
                .delete_card(&deck_id, &CardId::new(card_id))
                .map_err(|err| err.to_string())?;
            print_cards(store, "", out)
        }
        Command::Shuffle => {
            let deck_id = active_deck_id(store)?;
            store.shuffle_deck(&deck_id).map_err(|err| err.to_string())?;
            print_cards(store, "", out)
        }
        Command::Flip { card_id } => {
            let card_id = CardId::new(card_id);
            let deck = store
                .active_deck()
                .ok_or_else(|| NO_DECK_SELECTED.to_string())?;
            let card = deck
                .card(&card_id)
                .ok_or_else(|| format!("card not found: {card_id}"))?;
            emit(out, format_args!("{}", card.back))
        }
    }
}

fn active_deck_id<R: StateRepository>(store: &DeckStore<R>) -> Result<DeckId, String> {
    store
        .active_deck_id()
        .cloned()
        .ok_or_else(|| NO_DECK_SELECTED.to_string())
}

fn print_decks<R: StateRepository, W: Write>(
    store: &DeckStore<R>,
    out: &mut W,
) -> Result<(), String> {
    if store.decks().is_empty() {
        return emit(out, format_args!("no decks"));
    }
    for deck in store.decks() {
        let marker = if store.active_deck_id() == Some(&deck.id) {
            '*'
        } else {
            ' '
        };
        emit(
            out,
            format_args!("{marker} {}  {} ({} cards)", deck.id, deck.name, deck.cards.len()),
        )?;
    }
    Ok(())
}

fn print_cards<R: StateRepository, W: Write>(
    store: &DeckStore<R>,
    query: &str,
    out: &mut W,
) -> Result<(), String> {
    let deck = store
        .active_deck()
        .ok_or_else(|| NO_DECK_SELECTED.to_string())?;
    emit(out, format_args!("{}", deck.name))?;
    let cards = store.search_active(query);
    if cards.is_empty() {
        return emit(out, format_args!("no cards"));
    }
    for card in cards {
        emit(out, format_args!("  {}  {}", card.id, card.front))?;
    }
    Ok(())
}

fn emit<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) -> Result<(), String> {
    writeln!(out, "{line}").map_err(|err| format!("failed to write output: {err}"))
}
