//! # mulligan-sim
//!
//! Opening-hand mulligan simulator for a card game with deck codes.
//!
//! A client submits a deck code and receives the deck shuffled; the top 3
//! cards (going first) or 4 cards (going second) are the opening hand. The
//! client then names hand slots to replace and receives the deck with the
//! replacements swapped in and the remainder reshuffled.
//!
//! ## Invariants
//!
//! 1. **Conservation**: shuffles and mulligans only reorder a deck; the
//!    multiset of cards never changes within a session.
//!
//! 2. **Hand size**: 3 cards going first, 4 going second.
//!
//! 3. **Validation before mutation**: a rejected request leaves its session
//!    exactly as it was.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `cards`: card ids, deck lists, expanded decks, card urls
//! - `decode`: deck code decoding
//! - `shuffle`: shuffle engine and per-session shufflers
//! - `mulligan`: opening hands and mulligan exchanges
//! - `session`: session ids, state machine, concurrent store
//! - `coordinator`: request routing, wire protocol, analytics sinks

pub mod core;
pub mod cards;
pub mod decode;
pub mod shuffle;
pub mod mulligan;
pub mod session;
pub mod coordinator;

// Re-export commonly used types
pub use crate::core::{
    DecodeError, ErrorCode, GameRng, MulliganConfig, MulliganError, RequestError, RequestKind,
    SessionError,
};

pub use crate::cards::{CardId, CardUrlResolver, CardView, Deck, DeckEntry, DeckSpec, PlaceholderUrl};

pub use crate::decode::{DeckDecoder, DeckFormat, Deckstring};

pub use crate::shuffle::{ForkingSource, Shuffler, ShufflerSource};

pub use crate::mulligan::{
    apply_mulligan, hand_size, opening_hand, Hand, MulliganRecord, MulliganRequest, FIRST_HAND_SIZE,
    SECOND_HAND_SIZE,
};

pub use crate::session::{Session, SessionId, SessionState, SessionStore};

pub use crate::coordinator::{
    AnalyticsSink, BackgroundSink, Coordinator, CoordinatorBuilder, DeckView, ErrorPayload, InboundMessage,
    NullSink, ServerEvent, TracingSink,
};
