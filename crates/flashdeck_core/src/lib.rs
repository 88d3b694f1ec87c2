//! Core deck/card store for the flashcard manager.
//! This crate is the single source of truth for deck and card invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod shuffle;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::deck::{
    normalize_text, Card, CardDraft, CardId, Deck, DeckId, EmptyTextError, TextField,
};
pub use model::state::StoreState;
pub use repo::state_repo::{
    MemoryStateRepository, RepoError, RepoResult, SqliteStateRepository, StateRepository,
    DEFAULT_SLOT_KEY,
};
pub use search::filter::{filter_cards, CardFilter};
pub use service::deck_store::{DeckStore, StoreError, StoreResult};
pub use shuffle::shuffle_in_place;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
