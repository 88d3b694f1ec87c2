//! Card search entry points.
//!
//! # Responsibility
//! - Filter a deck's cards by a free-text query.
//! - Keep matching rules in one place for every caller.

pub mod filter;
