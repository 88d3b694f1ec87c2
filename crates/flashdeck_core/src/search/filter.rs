//! Case-insensitive substring filtering over card text.
//!
//! # Invariants
//! - Result order equals deck order.
//! - A blank query matches every card.
//! - A card matches when its front or its back contains the query.

use crate::model::deck::Card;

/// Pre-normalized card filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFilter {
    needle: Option<String>,
}

impl CardFilter {
    /// Builds a filter from raw user input.
    pub fn new(query: &str) -> Self {
        let trimmed = query.trim();
        let needle = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        };
        Self { needle }
    }

    pub fn matches(&self, card: &Card) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };
        contains_folded(&card.front, needle) || contains_folded(&card.back, needle)
    }

    /// Returns the matching subsequence of `cards`.
    pub fn apply<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
        cards.iter().filter(|card| self.matches(card)).collect()
    }
}

/// Filters `cards` by `query`, preserving order.
pub fn filter_cards<'a>(cards: &'a [Card], query: &str) -> Vec<&'a Card> {
    CardFilter::new(query).apply(cards)
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
