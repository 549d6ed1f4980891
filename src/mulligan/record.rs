//! Mulligan requests and the analytics record each one leaves behind.

use serde::{Deserialize, Serialize};

use super::engine::Hand;
use crate::session::SessionId;

/// A player's mulligan choice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MulliganRequest {
    #[serde(default)]
    pub going_first: bool,

    /// Opponent class or name; only recorded.
    #[serde(default)]
    pub opponent: String,

    /// Opening hand slots to replace, in draw order.
    #[serde(alias = "mulliganIndices")]
    pub mulligans: Vec<i64>,
}

impl MulliganRequest {
    #[must_use]
    pub fn new(going_first: bool, mulligans: Vec<i64>) -> Self {
        Self {
            going_first,
            opponent: String::new(),
            mulligans,
        }
    }

    #[must_use]
    pub fn with_opponent(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = opponent.into();
        self
    }
}

/// What was kept and what was thrown back, for offline analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MulliganRecord {
    pub session_id: SessionId,
    #[serde(rename = "deckcode")]
    pub deck_code: String,
    pub going_first: bool,
    pub opponent: String,
    /// Hand before the mulligan.
    pub opening_hand: Hand,
    pub mulligans: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_names() {
        let request: MulliganRequest =
            serde_json::from_str(r#"{"goingFirst": true, "opponent": "Mage", "mulligans": [0, 2]}"#).unwrap();
        assert_eq!(request, MulliganRequest::new(true, vec![0, 2]).with_opponent("Mage"));
    }

    #[test]
    fn test_request_alias_and_defaults() {
        let request: MulliganRequest = serde_json::from_str(r#"{"mulliganIndices": [3]}"#).unwrap();
        assert!(!request.going_first);
        assert!(request.opponent.is_empty());
        assert_eq!(request.mulligans, vec![3]);
    }

    #[test]
    fn test_request_requires_integer_indices() {
        assert!(serde_json::from_str::<MulliganRequest>(r#"{"mulligans": ["a"]}"#).is_err());
        assert!(serde_json::from_str::<MulliganRequest>(r#"{"mulligans": [1.5]}"#).is_err());
        assert!(serde_json::from_str::<MulliganRequest>(r#"{"goingFirst": true}"#).is_err());
    }
}
