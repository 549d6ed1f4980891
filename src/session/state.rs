//! Per-connection deck state and its transitions.
//!
//! ```text
//! Fresh --submit_deck--> DeckLoaded --submit_mulligan--> DeckLoaded
//!                        DeckLoaded --submit_deck-----> DeckLoaded
//! ```
//!
//! Transitions never modify the session they are called on; they return the
//! next session, and the caller commits it. A failed transition therefore
//! leaves nothing half-applied.

use serde::{Deserialize, Serialize};

use super::id::SessionId;
use crate::cards::Deck;
use crate::core::RequestError;
use crate::decode::DeckDecoder;
use crate::mulligan::{apply_mulligan, opening_hand, MulliganRecord, MulliganRequest};
use crate::shuffle::Shuffler;

/// Where a session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Connected, no deck yet.
    Fresh,
    /// A deck has been submitted and shuffled.
    DeckLoaded,
}

/// State kept for one connection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub deck_code: Option<String>,
    /// Current arrangement; the first cards are the opening hand.
    pub deck: Option<Deck>,
}

/// Result of a successful mulligan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MulliganOutcome {
    pub session: Session,
    pub record: MulliganRecord,
}

impl Session {
    /// New session with no deck.
    #[must_use]
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            deck_code: None,
            deck: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match (&self.deck_code, &self.deck) {
            (Some(_), Some(_)) => SessionState::DeckLoaded,
            _ => SessionState::Fresh,
        }
    }

    /// Decode, expand and shuffle a deck.
    pub fn submit_deck(
        &self,
        code: &str,
        decoder: &dyn DeckDecoder,
        shuffler: &mut dyn Shuffler,
    ) -> Result<Session, RequestError> {
        let mut deck = decoder
            .decode(code)
            .and_then(|spec| Deck::expand(&spec))
            .map_err(|source| RequestError::InvalidDeckCode {
                code: code.to_string(),
                source,
            })?;
        shuffler.shuffle(deck.as_mut_slice());

        Ok(Session {
            id: self.id.clone(),
            deck_code: Some(code.to_string()),
            deck: Some(deck),
        })
    }

    /// Run a mulligan against the stored deck.
    pub fn submit_mulligan(
        &self,
        request: &MulliganRequest,
        shuffler: &mut dyn Shuffler,
    ) -> Result<MulliganOutcome, RequestError> {
        let (Some(deck_code), Some(deck)) = (&self.deck_code, &self.deck) else {
            return Err(RequestError::NoDeck);
        };

        let next = apply_mulligan(deck, request.going_first, &request.mulligans, shuffler)?;
        let record = MulliganRecord {
            session_id: self.id.clone(),
            deck_code: deck_code.clone(),
            going_first: request.going_first,
            opponent: request.opponent.clone(),
            opening_hand: opening_hand(deck, request.going_first),
            mulligans: request.mulligans.clone(),
        };

        Ok(MulliganOutcome {
            session: Session {
                id: self.id.clone(),
                deck_code: Some(deck_code.clone()),
                deck: Some(next),
            },
            record,
        })
    }
}
