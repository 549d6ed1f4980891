//! Deckstring decoding.
//!
//! Layout after base64:
//!
//! ```text
//! 0x00                       reserved
//! varint version             only 1
//! varint format              1 wild, 2 standard, 3 classic, 4 twist
//! varint n, n x varint       hero ids
//! varint n, n x varint       cards with one copy
//! varint n, n x varint       cards with two copies
//! varint n, n x (varint, varint)  card id and copy count
//! ```
//!
//! Varints are unsigned LEB128. Anything after the last card section
//! (sideboards in newer codes) is ignored.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::DeckDecoder;
use crate::cards::{CardId, DeckEntry, DeckSpec};
use crate::core::DecodeError;

const DECKSTRING_VERSION: u32 = 1;

/// Standard alphabet, padding optional.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Game format a deck was built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckFormat {
    Wild,
    Standard,
    Classic,
    Twist,
}

impl DeckFormat {
    fn from_raw(raw: u32) -> Result<Self, DecodeError> {
        match raw {
            1 => Ok(DeckFormat::Wild),
            2 => Ok(DeckFormat::Standard),
            3 => Ok(DeckFormat::Classic),
            4 => Ok(DeckFormat::Twist),
            other => Err(DecodeError::UnknownFormat(other)),
        }
    }
}

/// Everything a deckstring carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedDeckstring {
    pub format: DeckFormat,
    /// Hero ids, ascending.
    pub heroes: Vec<u32>,
    /// Cards, ascending by id.
    pub cards: DeckSpec,
}

/// Deckstring decoder.
///
/// ```
/// use mulligan_sim::decode::{DeckDecoder, Deckstring};
///
/// let spec = Deckstring.decode("AAEBAQcCrAIFASgB6AcD").unwrap();
/// assert_eq!(spec.card_count(), 7);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Deckstring;

impl Deckstring {
    /// Decode every field, not just the card list.
    pub fn decode_full(&self, code: &str) -> Result<DecodedDeckstring, DecodeError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(DecodeError::EmptyCode);
        }
        let bytes = BASE64
            .decode(code)
            .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;
        let mut reader = VarintReader::new(&bytes);

        let reserved = reader.next_byte()?;
        if reserved != 0 {
            return Err(DecodeError::ReservedByte(reserved));
        }
        let version = reader.next_varint()?;
        if version != DECKSTRING_VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        let format = DeckFormat::from_raw(reader.next_varint()?)?;

        let hero_count = reader.next_varint()?;
        let mut heroes = Vec::new();
        for _ in 0..hero_count {
            heroes.push(reader.next_varint()?);
        }
        heroes.sort_unstable();

        let mut cards = Vec::new();
        for section in 1..=3u32 {
            let entries = reader.next_varint()?;
            for _ in 0..entries {
                let card = CardId::new(reader.next_varint()?);
                let count = if section < 3 { section } else { reader.next_varint()? };
                cards.push(DeckEntry { card, count });
            }
        }
        if cards.is_empty() {
            return Err(DecodeError::NoCards);
        }
        if let Some(zero) = cards.iter().find(|e| e.count == 0) {
            return Err(DecodeError::ZeroCount(zero.card));
        }
        cards.sort_by_key(|e| e.card);

        Ok(DecodedDeckstring {
            format,
            heroes,
            cards: DeckSpec { cards },
        })
    }
}

impl DeckDecoder for Deckstring {
    fn decode(&self, code: &str) -> Result<DeckSpec, DecodeError> {
        self.decode_full(code).map(|decoded| decoded.cards)
    }
}

struct VarintReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> VarintReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.bytes.get(self.pos).ok_or(DecodeError::Truncated)?;
        self.pos += 1;
        Ok(byte)
    }

    fn next_varint(&mut self) -> Result<u32, DecodeError> {
        let mut value: u64 = 0;
        // A u32 needs at most 5 groups of 7 bits
        for shift in (0..35).step_by(7) {
            let byte = self.next_byte()?;
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return u32::try_from(value).map_err(|_| DecodeError::VarintOverflow);
            }
        }
        Err(DecodeError::VarintOverflow)
    }
}
