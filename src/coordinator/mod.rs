//! Session coordinator and its boundary with the transport.
//!
//! - `Coordinator`: connect / disconnect, deck and mulligan requests
//! - `protocol`: inbound and outbound messages, error payloads
//! - `sink`: fire-and-forget analytics for mulligan records

pub mod handler;
pub mod protocol;
pub mod sink;

pub use handler::{Coordinator, CoordinatorBuilder};
pub use protocol::{DeckView, ErrorPayload, InboundMessage, ServerEvent, DECKCODE_EVENT, MULLIGAN_EVENT};
pub use sink::{read_record, write_record, AnalyticsSink, BackgroundSink, NullSink, TracingSink};
