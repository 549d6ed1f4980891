//! Messages exchanged with the transport.
//!
//! Inbound events: `deckcode`, `mulligan`. Outbound: `deck`,
//! `mulligan_deck`, `process_error`. Messages are `{event, data}` objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cards::CardView;
use crate::core::ErrorCode;

/// Inbound event carrying a deck code.
pub const DECKCODE_EVENT: &str = "deckcode";

/// Inbound event carrying a mulligan request.
pub const MULLIGAN_EVENT: &str = "mulligan";

/// A raw inbound message. `data` is validated per event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl InboundMessage {
    #[must_use]
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    /// The `deckcode` field as text; missing or null is empty.
    #[must_use]
    pub fn deck_code(&self) -> String {
        match self.data.get("deckcode") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(code)) => code.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// A deck in the order the client should display it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckView {
    pub deck: Vec<CardView>,
}

/// Error sent to a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Human readable description of `code`.
    pub info: String,
    pub code: u16,
    /// Request context: the deck code, or the mulligan request as JSON.
    pub data: String,
}

impl ErrorPayload {
    #[must_use]
    pub fn new(code: ErrorCode, data: impl Into<String>) -> Self {
        Self::from_code(code.as_u16(), data)
    }

    /// Build from a raw code; unknown codes get the generic description.
    #[must_use]
    pub fn from_code(code: u16, data: impl Into<String>) -> Self {
        Self {
            info: ErrorCode::describe(code).to_string(),
            code,
            data: data.into(),
        }
    }
}

/// Outbound message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    Deck(DeckView),
    MulliganDeck(DeckView),
    ProcessError(ErrorPayload),
}
