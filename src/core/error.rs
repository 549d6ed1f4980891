//! Error types for every stage of request handling.
//!
//! Each concern has its own enum; `RequestError` is what the session
//! transitions return and what the coordinator maps onto wire error codes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::CardId;
use crate::session::SessionId;

/// Deck code could not be turned into a deck.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("deck code is empty")]
    EmptyCode,

    #[error("deck code is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("deck code ended in the middle of a field")]
    Truncated,

    #[error("reserved leading byte must be 0, found {0}")]
    ReservedByte(u8),

    #[error("unsupported deckstring version {0}")]
    UnsupportedVersion(u32),

    #[error("unknown deck format {0}")]
    UnknownFormat(u32),

    #[error("varint does not fit in 32 bits")]
    VarintOverflow,

    #[error("{0} listed with zero copies")]
    ZeroCount(CardId),

    #[error("deck contains no cards")]
    NoCards,
}

/// Mulligan request rejected before any card moved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MulliganError {
    #[error("mulligan index {index} outside the {hand_size}-card opening hand")]
    IndexOutOfRange { index: i64, hand_size: usize },

    #[error("deck of {deck_len} cards cannot replace {requested} cards of a {hand_size}-card hand")]
    NotEnoughCards {
        deck_len: usize,
        hand_size: usize,
        requested: usize,
    },
}

/// Session lifecycle failures. These are fatal for the connection attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no unused session id found after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },

    #[error("session id alphabet is empty")]
    EmptyAlphabet,
}

/// Which request a failure belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    Deck,
    Mulligan,
}

impl RequestKind {
    /// Code for an unexpected failure while serving this request.
    #[must_use]
    pub const fn failure_code(self) -> ErrorCode {
        match self {
            RequestKind::Deck => ErrorCode::DeckDecodeFailure,
            RequestKind::Mulligan => ErrorCode::MulliganProcessingFailure,
        }
    }

    /// Code for a request the caller got wrong.
    #[must_use]
    pub const fn invalid_code(self) -> ErrorCode {
        match self {
            RequestKind::Deck => ErrorCode::InvalidDeckCode,
            RequestKind::Mulligan => ErrorCode::InvalidMulligan,
        }
    }
}

/// A single request failed. The session it targeted is unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("invalid deck code {code:?}: {source}")]
    InvalidDeckCode {
        code: String,
        #[source]
        source: DecodeError,
    },

    #[error("mulligan submitted before any deck")]
    NoDeck,

    #[error(transparent)]
    InvalidMulligan(#[from] MulliganError),

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("unknown session {0}")]
    UnknownSession(SessionId),

    #[error("request handler panicked: {0}")]
    Panicked(String),
}

impl RequestError {
    /// Wire code for this failure when raised by a `kind` request.
    #[must_use]
    pub fn code(&self, kind: RequestKind) -> ErrorCode {
        match self {
            RequestError::InvalidDeckCode { .. } => ErrorCode::InvalidDeckCode,
            RequestError::NoDeck | RequestError::InvalidMulligan(_) => ErrorCode::InvalidMulligan,
            RequestError::Malformed(_) => kind.invalid_code(),
            RequestError::UnknownSession(_) | RequestError::Panicked(_) => kind.failure_code(),
        }
    }

    /// True for caller mistakes, false for failures on our side.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, RequestError::UnknownSession(_) | RequestError::Panicked(_))
    }
}

/// Numeric error categories sent to clients.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum ErrorCode {
    DeckDecodeFailure,
    InvalidDeckCode,
    MulliganProcessingFailure,
    InvalidMulligan,
}

/// Description sent for codes outside the known set.
pub const UNKNOWN_ERROR_DESCRIPTION: &str = "Unknown error";

impl ErrorCode {
    /// Numeric value on the wire.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        match self {
            ErrorCode::DeckDecodeFailure => 101,
            ErrorCode::InvalidDeckCode => 102,
            ErrorCode::MulliganProcessingFailure => 201,
            ErrorCode::InvalidMulligan => 202,
        }
    }

    /// Look up a known code.
    #[must_use]
    pub const fn from_u16(code: u16) -> Option<Self> {
        match code {
            101 => Some(ErrorCode::DeckDecodeFailure),
            102 => Some(ErrorCode::InvalidDeckCode),
            201 => Some(ErrorCode::MulliganProcessingFailure),
            202 => Some(ErrorCode::InvalidMulligan),
            _ => None,
        }
    }

    /// Human readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            ErrorCode::DeckDecodeFailure => "Deckcode error",
            ErrorCode::InvalidDeckCode => "Invalid deckcode",
            ErrorCode::MulliganProcessingFailure => "Mulligan error",
            ErrorCode::InvalidMulligan => "Invalid mulligan",
        }
    }

    /// Description for any numeric code, known or not.
    #[must_use]
    pub fn describe(code: u16) -> &'static str {
        Self::from_u16(code).map_or(UNKNOWN_ERROR_DESCRIPTION, Self::description)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.as_u16()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::from_u16(code).ok_or_else(|| format!("unknown error code {code}"))
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::DeckDecodeFailure.as_u16(), 101);
        assert_eq!(ErrorCode::InvalidDeckCode.as_u16(), 102);
        assert_eq!(ErrorCode::MulliganProcessingFailure.as_u16(), 201);
        assert_eq!(ErrorCode::InvalidMulligan.as_u16(), 202);
    }

    #[test]
    fn test_describe_unknown() {
        assert_eq!(ErrorCode::describe(102), "Invalid deckcode");
        assert_eq!(ErrorCode::describe(0), UNKNOWN_ERROR_DESCRIPTION);
        assert_eq!(ErrorCode::describe(999), UNKNOWN_ERROR_DESCRIPTION);
    }

    #[test]
    fn test_request_error_codes() {
        let invalid_code = RequestError::InvalidDeckCode {
            code: "xyz".into(),
            source: DecodeError::Truncated,
        };
        assert_eq!(invalid_code.code(RequestKind::Deck), ErrorCode::InvalidDeckCode);
        assert_eq!(RequestError::NoDeck.code(RequestKind::Mulligan), ErrorCode::InvalidMulligan);

        let out_of_range = RequestError::from(MulliganError::IndexOutOfRange { index: 4, hand_size: 4 });
        assert_eq!(out_of_range.code(RequestKind::Mulligan), ErrorCode::InvalidMulligan);
        assert!(out_of_range.is_validation());

        let panicked = RequestError::Panicked("boom".into());
        assert_eq!(panicked.code(RequestKind::Deck), ErrorCode::DeckDecodeFailure);
        assert_eq!(panicked.code(RequestKind::Mulligan), ErrorCode::MulliganProcessingFailure);
        assert!(!panicked.is_validation());
    }

    #[test]
    fn test_code_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::InvalidMulligan).unwrap();
        assert_eq!(json, "202");
        let back: ErrorCode = serde_json::from_str("101").unwrap();
        assert_eq!(back, ErrorCode::DeckDecodeFailure);
        assert!(serde_json::from_str::<ErrorCode>("7").is_err());
    }
}
