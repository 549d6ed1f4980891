//! Opening hands and mulligan exchanges.
//!
//! The top of the deck is the opening hand. A mulligan trades chosen hand
//! slots for cards from a freshly shuffled remainder: the k-th requested slot
//! always trades with the k-th card of that remainder, and the remainder is
//! shuffled again afterwards so returned cards do not sit near the top.

use smallvec::SmallVec;

use crate::cards::{CardId, Deck};
use crate::core::MulliganError;
use crate::shuffle::Shuffler;

/// Opening hand size for the player going first.
pub const FIRST_HAND_SIZE: usize = 3;

/// Opening hand size for the player going second.
pub const SECOND_HAND_SIZE: usize = 4;

/// Cards in an opening hand.
pub type Hand = SmallVec<[CardId; SECOND_HAND_SIZE]>;

/// Opening hand size for a turn order.
#[must_use]
pub const fn hand_size(going_first: bool) -> usize {
    if going_first {
        FIRST_HAND_SIZE
    } else {
        SECOND_HAND_SIZE
    }
}

/// The opening hand of `deck` without touching it.
///
/// A deck shorter than the hand size is all hand.
#[must_use]
pub fn opening_hand(deck: &Deck, going_first: bool) -> Hand {
    let size = hand_size(going_first).min(deck.len());
    deck.as_slice()[..size].iter().copied().collect()
}

/// Check a mulligan request against a deck and return the hand slots.
///
/// Nothing is shuffled or swapped unless this passes.
pub fn validate_mulligan(
    deck_len: usize,
    going_first: bool,
    mulligans: &[i64],
) -> Result<SmallVec<[usize; SECOND_HAND_SIZE]>, MulliganError> {
    let hand_size = hand_size(going_first);
    let slots = mulligans
        .iter()
        .map(|&index| {
            usize::try_from(index)
                .ok()
                .filter(|&slot| slot < hand_size)
                .ok_or(MulliganError::IndexOutOfRange { index, hand_size })
        })
        .collect::<Result<SmallVec<_>, _>>()?;

    if deck_len < hand_size || deck_len - hand_size < slots.len() {
        return Err(MulliganError::NotEnoughCards {
            deck_len,
            hand_size,
            requested: slots.len(),
        });
    }
    Ok(slots)
}

/// Replace the requested hand slots and return the new deck order.
///
/// The input deck is left as is; the caller decides whether to keep the
/// result. Duplicate slots are traded once per occurrence, in order.
pub fn apply_mulligan(
    deck: &Deck,
    going_first: bool,
    mulligans: &[i64],
    shuffler: &mut dyn Shuffler,
) -> Result<Deck, MulliganError> {
    let slots = validate_mulligan(deck.len(), going_first, mulligans)?;

    let mut cards = deck.as_slice().to_vec();
    let (hand, rest) = cards.split_at_mut(hand_size(going_first));

    shuffler.shuffle(rest);
    for (draw, &slot) in slots.iter().enumerate() {
        std::mem::swap(&mut hand[slot], &mut rest[draw]);
    }
    shuffler.shuffle(rest);

    Ok(Deck::from_cards(cards))
}
