//! Decks in compact and expanded form.
//!
//! A `DeckSpec` is what a deck code decodes to: card types with copy counts.
//! A `Deck` is the physical stack, one entry per copy, where order is the
//! current shuffled arrangement.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{CardId, CardView};
use super::url::CardUrlResolver;
use crate::core::DecodeError;

/// One line of a decoded deck list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: CardId,
    pub count: u32,
}

/// Card types and copy counts, in decoder order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSpec {
    pub cards: Vec<DeckEntry>,
}

impl DeckSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, builder style.
    #[must_use]
    pub fn with(mut self, card: CardId, count: u32) -> Self {
        self.cards.push(DeckEntry { card, count });
        self
    }

    /// Total number of physical cards described.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.iter().map(|e| e.count as usize).sum()
    }
}

impl FromIterator<(CardId, u32)> for DeckSpec {
    fn from_iter<I: IntoIterator<Item = (CardId, u32)>>(iter: I) -> Self {
        Self {
            cards: iter
                .into_iter()
                .map(|(card, count)| DeckEntry { card, count })
                .collect(),
        }
    }
}

/// Ordered stack of physical cards. Index 0 is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardId>,
}

impl Deck {
    /// Wrap an already ordered card list.
    #[must_use]
    pub fn from_cards(cards: Vec<CardId>) -> Self {
        Self { cards }
    }

    /// Expand a spec into one entry per copy, keeping spec order.
    ///
    /// Fails on a zero count, which a well-formed deck code never contains.
    pub fn expand(spec: &DeckSpec) -> Result<Self, DecodeError> {
        let mut cards = Vec::with_capacity(spec.card_count());
        for entry in &spec.cards {
            if entry.count == 0 {
                return Err(DecodeError::ZeroCount(entry.card));
            }
            cards.extend(std::iter::repeat(entry.card).take(entry.count as usize));
        }
        Ok(Self { cards })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CardId] {
        &self.cards
    }

    pub fn as_mut_slice(&mut self) -> &mut [CardId] {
        &mut self.cards
    }

    #[must_use]
    pub fn into_cards(self) -> Vec<CardId> {
        self.cards
    }

    /// Copies per card type. Two decks with equal counts hold the same cards.
    #[must_use]
    pub fn card_counts(&self) -> FxHashMap<CardId, usize> {
        let mut counts = FxHashMap::default();
        for &card in &self.cards {
            *counts.entry(card).or_insert(0) += 1;
        }
        counts
    }

    /// Client view of the deck in current order.
    pub fn to_views(&self, resolver: &dyn CardUrlResolver) -> Vec<CardView> {
        self.cards
            .iter()
            .map(|&id| CardView {
                id,
                url: resolver.resolve_url(id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::PlaceholderUrl;

    fn ids(raw: &[u32]) -> Vec<CardId> {
        raw.iter().copied().map(CardId::new).collect()
    }

    #[test]
    fn test_expand_keeps_order() {
        let spec = DeckSpec::new()
            .with(CardId::new(5), 2)
            .with(CardId::new(1), 1)
            .with(CardId::new(9), 3);

        let deck = Deck::expand(&spec).unwrap();
        assert_eq!(deck.as_slice(), ids(&[5, 5, 1, 9, 9, 9]).as_slice());
        assert_eq!(deck.len(), spec.card_count());
    }

    #[test]
    fn test_expand_rejects_zero_count() {
        let spec = DeckSpec::new().with(CardId::new(5), 2).with(CardId::new(6), 0);
        assert_eq!(Deck::expand(&spec), Err(DecodeError::ZeroCount(CardId::new(6))));
    }

    #[test]
    fn test_expand_empty_spec() {
        let deck = Deck::expand(&DeckSpec::new()).unwrap();
        assert!(deck.is_empty());
    }

    #[test]
    fn test_card_counts() {
        let deck = Deck::from_cards(ids(&[3, 1, 3, 3]));
        let counts = deck.card_counts();
        assert_eq!(counts[&CardId::new(3)], 3);
        assert_eq!(counts[&CardId::new(1)], 1);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_to_views() {
        let deck = Deck::from_cards(ids(&[2, 4]));
        let views = deck.to_views(&PlaceholderUrl::default());
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, CardId::new(2));
        assert_eq!(views[1].url, "nourl");
    }

    #[test]
    fn test_spec_from_pairs() {
        let spec: DeckSpec = vec![(CardId::new(1), 2), (CardId::new(2), 1)].into_iter().collect();
        assert_eq!(spec.card_count(), 3);
    }
}
