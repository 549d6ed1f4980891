//! Shuffle engine.
//!
//! Everything that needs a random ordering goes through `Shuffler`, so a
//! deterministic permutation can be swapped in wherever the real RNG runs.
//!
//! - `Shuffler`: in-place permutation of a card slice
//! - `ShufflerSource`: hands each session its own shuffler

pub mod source;

pub use source::{ForkingSource, ShufflerSource};

use crate::cards::CardId;
use crate::core::GameRng;

/// In-place permutation of cards. Only order may change.
pub trait Shuffler: Send {
    fn shuffle(&mut self, cards: &mut [CardId]);
}

impl Shuffler for GameRng {
    fn shuffle(&mut self, cards: &mut [CardId]) {
        GameRng::shuffle(self, cards);
    }
}

impl<S: Shuffler + ?Sized> Shuffler for Box<S> {
    fn shuffle(&mut self, cards: &mut [CardId]) {
        (**self).shuffle(cards);
    }
}
