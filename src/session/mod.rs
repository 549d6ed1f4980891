//! Sessions: identity, state machine, and storage.
//!
//! ## Key Types
//!
//! - `SessionId` / `SessionIdGenerator`: unique per-connection ids
//! - `Session` / `SessionState`: deck state and pure transitions
//! - `SessionStore`: concurrent map of live sessions

pub mod id;
pub mod state;
pub mod store;

pub use id::{SessionId, SessionIdGenerator};
pub use state::{MulliganOutcome, Session, SessionState};
pub use store::{SessionSlot, SessionStore, SharedSlot};
