//! Mulligan engine.
//!
//! ## Key Items
//!
//! - `hand_size`: 3 going first, 4 going second
//! - `opening_hand`: top of the deck, deck untouched
//! - `apply_mulligan`: trade hand slots with the shuffled remainder
//! - `MulliganRequest` / `MulliganRecord`: input and analytics output

pub mod engine;
pub mod record;

pub use engine::{
    apply_mulligan, hand_size, opening_hand, validate_mulligan, Hand, FIRST_HAND_SIZE, SECOND_HAND_SIZE,
};
pub use record::{MulliganRecord, MulliganRequest};
