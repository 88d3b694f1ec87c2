//! Core use-case services.
//!
//! # Responsibility
//! - Own the authoritative deck/card state behind a single store type.
//! - Keep presentation layers decoupled from persistence details.

pub mod deck_store;
