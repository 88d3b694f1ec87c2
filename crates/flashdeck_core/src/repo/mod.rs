//! Persistence gateway contracts and implementations.
//!
//! # Responsibility
//! - Define the save/load contract the store depends on.
//! - Keep slot encoding and SQL details out of the store.
//!
//! # Invariants
//! - A save replaces the whole previously stored record.
//! - Startup loading never fails: unreadable data degrades to empty state.

pub mod state_repo;
