//! Card art lookup.

use super::card::CardId;
use crate::core::DEFAULT_PLACEHOLDER_URL;

/// Maps a card to the url clients render it from.
pub trait CardUrlResolver: Send + Sync {
    fn resolve_url(&self, card: CardId) -> String;
}

/// Resolver that hands out the same url for every card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceholderUrl {
    url: String,
}

impl PlaceholderUrl {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for PlaceholderUrl {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_URL)
    }
}

impl CardUrlResolver for PlaceholderUrl {
    fn resolve_url(&self, _card: CardId) -> String {
        self.url.clone()
    }
}

impl<F> CardUrlResolver for F
where
    F: Fn(CardId) -> String + Send + Sync,
{
    fn resolve_url(&self, card: CardId) -> String {
        self(card)
    }
}
