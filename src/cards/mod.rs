//! Cards and decks.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for a card type
//! - `DeckSpec`: Decoded deck list (card, copies)
//! - `Deck`: Expanded, ordered stack of physical copies
//! - `CardView`: Card as sent to clients
//! - `CardUrlResolver`: Card art lookup

pub mod card;
pub mod deck;
pub mod url;

pub use card::{CardId, CardView};
pub use deck::{Deck, DeckEntry, DeckSpec};
pub use url::{CardUrlResolver, PlaceholderUrl};
