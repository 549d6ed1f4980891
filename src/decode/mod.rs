//! Deck code decoding.
//!
//! The rest of the crate only sees the `DeckDecoder` trait; `Deckstring`
//! is the decoder for the compact base64 deck codes players paste in.

pub mod deckstring;

pub use deckstring::{DeckFormat, DecodedDeckstring, Deckstring};

use crate::cards::DeckSpec;
use crate::core::DecodeError;

/// Turns a deck code into a deck list.
pub trait DeckDecoder: Send + Sync {
    fn decode(&self, code: &str) -> Result<DeckSpec, DecodeError>;
}

impl<F> DeckDecoder for F
where
    F: Fn(&str) -> Result<DeckSpec, DecodeError> + Send + Sync,
{
    fn decode(&self, code: &str) -> Result<DeckSpec, DecodeError> {
        self(code)
    }
}
