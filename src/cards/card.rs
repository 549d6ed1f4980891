//! Card identifiers and their client-facing form.

use serde::{Deserialize, Serialize};

/// Identifier for a card type.
///
/// Identifies the kind of card, not a physical copy: two copies of the same
/// card in a deck share a `CardId` and are interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card as sent to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&CardId::new(40523)).unwrap(), "40523");
    }

    #[test]
    fn test_card_view_json_shape() {
        let view = CardView {
            id: CardId::new(7),
            url: "nourl".into(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "url": "nourl"}));
    }
}
