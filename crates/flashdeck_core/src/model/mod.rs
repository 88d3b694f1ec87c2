//! Deck and card domain model.
//!
//! # Responsibility
//! - Define the records owned by the store (`Deck`, `Card`) and the full
//!   persisted shape (`StoreState`).
//! - Provide text normalization shared by every write path.
//!
//! # Invariants
//! - Stored text is trimmed and never empty.
//! - Deck ids are unique within a state; card ids are unique within a deck.

pub mod deck;
pub mod state;
