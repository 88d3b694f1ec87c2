//! Command-line surface for the text front end.
//!
//! # Invariants
//! - Parsing never touches the store; a command is fully collected first.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "flashdeck")]
#[command(about = "Flashcard deck manager")]
#[command(version = flashdeck_core::core_version())]
#[command(
    after_help = "Environment:\n  FLASHDECK_DB         SQLite file (in-memory when unset)\n  FLASHDECK_LOG_DIR    Absolute log directory\n  FLASHDECK_LOG_LEVEL  trace|debug|info|warn|error\n  FLASHDECK_SLOT       Storage slot key"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// One user action against the store. Card commands act on the active deck.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List decks; `*` marks the active deck.
    Decks,
    /// Create a deck and make it active.
    NewDeck { name: String },
    /// Rename a deck.
    RenameDeck { deck_id: String, name: String },
    /// Delete a deck and its cards.
    DeleteDeck { deck_id: String },
    /// Select the active deck; omit the id to clear the selection.
    Use { deck_id: Option<String> },
    /// List active deck cards, optionally filtered by a query.
    Cards { query: Option<String> },
    /// Add a card to the active deck.
    AddCard { front: String, back: String },
    /// Replace the text of a card in the active deck.
    EditCard {
        card_id: String,
        front: String,
        back: String,
    },
    /// Delete a card from the active deck.
    DeleteCard { card_id: String },
    /// Shuffle the active deck.
    Shuffle,
    /// Show the back of a card in the active deck.
    Flip { card_id: String },
}

impl Command {
    /// Stable command name for log lines; never includes user text.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Decks => "decks",
            Self::NewDeck { .. } => "new-deck",
            Self::RenameDeck { .. } => "rename-deck",
            Self::DeleteDeck { .. } => "delete-deck",
            Self::Use { .. } => "use",
            Self::Cards { .. } => "cards",
            Self::AddCard { .. } => "add-card",
            Self::EditCard { .. } => "edit-card",
            Self::DeleteCard { .. } => "delete-card",
            Self::Shuffle => "shuffle",
            Self::Flip { .. } => "flip",
        }
    }
}
