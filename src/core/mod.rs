//! Core building blocks: RNG, configuration, and error types.
//!
//! Everything else in the crate leans on these; none of them know about
//! sessions or the wire protocol beyond the error codes.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{
    MulliganConfig, DEFAULT_ANALYTICS_QUEUE_CAPACITY, DEFAULT_PLACEHOLDER_URL, DEFAULT_SESSION_ID_ALPHABET,
};
pub use error::{
    DecodeError, ErrorCode, MulliganError, RequestError, RequestKind, SessionError,
    UNKNOWN_ERROR_DESCRIPTION,
};
pub use rng::GameRng;
