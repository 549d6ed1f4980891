//! Request routing and the error boundary.
//!
//! The `Coordinator` owns the session store and every collaborator. Each
//! request locks its session's slot for its whole duration, computes the next
//! session and the response with a pure transition, and commits only when both
//! succeed. Analytics records go to the sink afterwards, outside the lock. All
//! per-request failures, panics included, come back as `RequestError` and
//! are logged here; only session id exhaustion escapes as a hard error.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::protocol::{DeckView, ErrorPayload, InboundMessage, ServerEvent, DECKCODE_EVENT, MULLIGAN_EVENT};
use super::sink::{AnalyticsSink, TracingSink};
use crate::cards::{CardUrlResolver, PlaceholderUrl};
use crate::core::{GameRng, MulliganConfig, RequestError, RequestKind, SessionError};
use crate::decode::{DeckDecoder, Deckstring};
use crate::mulligan::{MulliganRecord, MulliganRequest};
use crate::session::{Session, SessionId, SessionIdGenerator, SessionSlot, SessionStore};
use crate::shuffle::{ForkingSource, Shuffler, ShufflerSource};

/// Routes requests to the deck and mulligan logic and owns all sessions.
///
/// ## Example
///
/// ```
/// use mulligan_sim::coordinator::Coordinator;
/// use mulligan_sim::core::MulliganConfig;
/// use mulligan_sim::mulligan::MulliganRequest;
///
/// let coordinator = Coordinator::new(MulliganConfig::default().with_seed(7)).unwrap();
/// let session = coordinator.connect().unwrap();
///
/// let deck = coordinator.submit_deck(&session, "AAEBAQcCrAIFASgB6AcD").unwrap();
/// assert_eq!(deck.deck.len(), 7);
///
/// let after = coordinator
///     .submit_mulligan(&session, &MulliganRequest::new(true, vec![0, 2]))
///     .unwrap();
/// assert_eq!(after.deck.len(), 7);
///
/// coordinator.disconnect(&session);
/// ```
pub struct Coordinator {
    store: SessionStore,
    ids: SessionIdGenerator,
    shufflers: Box<dyn ShufflerSource>,
    decoder: Box<dyn DeckDecoder>,
    resolver: Box<dyn CardUrlResolver>,
    sink: Box<dyn AnalyticsSink>,
}

/// Builder for a `Coordinator` with non-default collaborators.
pub struct CoordinatorBuilder {
    config: MulliganConfig,
    shufflers: Option<Box<dyn ShufflerSource>>,
    decoder: Option<Box<dyn DeckDecoder>>,
    resolver: Option<Box<dyn CardUrlResolver>>,
    sink: Option<Box<dyn AnalyticsSink>>,
}

impl CoordinatorBuilder {
    #[must_use]
    pub fn new(config: MulliganConfig) -> Self {
        Self {
            config,
            shufflers: None,
            decoder: None,
            resolver: None,
            sink: None,
        }
    }

    /// Where each session's shuffler comes from.
    pub fn shufflers(mut self, source: impl ShufflerSource + 'static) -> Self {
        self.shufflers = Some(Box::new(source));
        self
    }

    pub fn decoder(mut self, decoder: impl DeckDecoder + 'static) -> Self {
        self.decoder = Some(Box::new(decoder));
        self
    }

    pub fn resolver(mut self, resolver: impl CardUrlResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn sink(mut self, sink: impl AnalyticsSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build, filling unset collaborators with defaults.
    pub fn build(self) -> Result<Coordinator, SessionError> {
        let root = GameRng::from_seed_or_entropy(self.config.seed);
        tracing::debug!(seed = root.seed(), "coordinator rng seeded");

        let ids = SessionIdGenerator::new(&self.config, root.for_context("session-id"))?;
        let shufflers = self
            .shufflers
            .unwrap_or_else(|| Box::new(ForkingSource::new(root.for_context("shuffle"))));
        let resolver = self
            .resolver
            .unwrap_or_else(|| Box::new(PlaceholderUrl::new(self.config.placeholder_url.clone())));

        Ok(Coordinator {
            store: SessionStore::new(),
            ids,
            shufflers,
            decoder: self.decoder.unwrap_or_else(|| Box::new(Deckstring)),
            resolver,
            sink: self.sink.unwrap_or_else(|| Box::new(TracingSink)),
        })
    }
}

impl Coordinator {
    /// Coordinator with the deckstring decoder, placeholder urls and a
    /// logging analytics sink.
    pub fn new(config: MulliganConfig) -> Result<Self, SessionError> {
        CoordinatorBuilder::new(config).build()
    }

    #[must_use]
    pub fn builder(config: MulliganConfig) -> CoordinatorBuilder {
        CoordinatorBuilder::new(config)
    }

    /// Open a session for a new connection.
    ///
    /// Fails only when no unused id can be found, which means the id space
    /// is misconfigured or full; callers should treat that as fatal.
    pub fn connect(&self) -> Result<SessionId, SessionError> {
        let result = self.ids.allocate(|id| {
            self.store.insert_new_with(id, || {
                SessionSlot::new(Session::new(id.clone()), self.shufflers.session_shuffler())
            })
        });
        match &result {
            Ok(id) => tracing::info!(session_id = %id, "connected"),
            Err(err) => tracing::error!(error = %err, "could not allocate session id"),
        }
        result
    }

    /// Drop a session and everything it holds.
    pub fn disconnect(&self, id: &SessionId) -> bool {
        let removed = self.store.delete(id).is_some();
        tracing::info!(session_id = %id, removed, "disconnected");
        removed
    }

    /// Snapshot of a live session.
    #[must_use]
    pub fn session(&self, id: &SessionId) -> Option<Session> {
        self.store.get(id)
    }

    #[must_use]
    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Load a deck from a code and return it shuffled.
    pub fn submit_deck(&self, id: &SessionId, code: &str) -> Result<DeckView, RequestError> {
        tracing::debug!(session_id = %id, "deck code submitted");
        let decoder = self.decoder.as_ref();
        self.run(id, RequestKind::Deck, code, |session, shuffler| {
            let next = session.submit_deck(code, decoder, shuffler)?;
            let view = self.view(&next);
            Ok((next, view))
        })
    }

    /// Mulligan the loaded deck and return the new arrangement.
    pub fn submit_mulligan(&self, id: &SessionId, request: &MulliganRequest) -> Result<DeckView, RequestError> {
        tracing::debug!(session_id = %id, going_first = request.going_first, "mulligan submitted");
        let context = serde_json::to_string(request).unwrap_or_default();
        let (view, record) = self.run(id, RequestKind::Mulligan, &context, |session, shuffler| {
            let outcome = session.submit_mulligan(request, shuffler)?;
            let view = self.view(&outcome.session);
            Ok((outcome.session, (view, outcome.record)))
        })?;
        self.submit_record(id, record);
        Ok(view)
    }

    /// Hand a record to the sink. Nothing the sink does reaches the caller.
    fn submit_record(&self, id: &SessionId, record: MulliganRecord) {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| self.sink.submit(record))) {
            tracing::warn!(
                session_id = %id,
                error = %panic_message(payload.as_ref()),
                "analytics sink panicked, record dropped"
            );
        }
    }

    /// Handle one raw transport message.
    ///
    /// Returns the event to send back, or `None` for events this service
    /// does not know.
    pub fn handle_message(&self, id: &SessionId, message: InboundMessage) -> Option<ServerEvent> {
        match message.event.as_str() {
            DECKCODE_EVENT => {
                let code = message.deck_code();
                Some(match self.submit_deck(id, &code) {
                    Ok(view) => ServerEvent::Deck(view),
                    Err(err) => error_event(RequestKind::Deck, &err, code),
                })
            }
            MULLIGAN_EVENT => {
                let raw = message.data.to_string();
                let result = serde_json::from_value::<MulliganRequest>(message.data)
                    .map_err(|e| {
                        let err = RequestError::Malformed(e.to_string());
                        log_failure(id, RequestKind::Mulligan, &err, &raw);
                        err
                    })
                    .and_then(|request| self.submit_mulligan(id, &request));
                Some(match result {
                    Ok(view) => ServerEvent::MulliganDeck(view),
                    Err(err) => error_event(RequestKind::Mulligan, &err, raw),
                })
            }
            other => {
                tracing::debug!(session_id = %id, event = other, "ignoring unknown event");
                None
            }
        }
    }

    /// Run a transition on a locked session and commit it on success.
    ///
    /// The transition also builds the response, so nothing is committed
    /// unless the whole request succeeded.
    fn run<T>(
        &self,
        id: &SessionId,
        kind: RequestKind,
        context: &str,
        transition: impl FnOnce(&Session, &mut dyn Shuffler) -> Result<(Session, T), RequestError>,
    ) -> Result<T, RequestError> {
        let result = match self.store.lock(id) {
            None => Err(RequestError::UnknownSession(id.clone())),
            Some(slot) => {
                let mut guard = slot.lock();
                let SessionSlot { session, shuffler } = &mut *guard;
                match panic::catch_unwind(AssertUnwindSafe(|| transition(session, shuffler.as_mut()))) {
                    Ok(Ok((next, response))) => {
                        *session = next;
                        Ok(response)
                    }
                    Ok(Err(err)) => Err(err),
                    Err(payload) => Err(RequestError::Panicked(panic_message(payload.as_ref()))),
                }
            }
        };
        if let Err(err) = &result {
            log_failure(id, kind, err, context);
        }
        result
    }

    fn view(&self, session: &Session) -> DeckView {
        DeckView {
            deck: session
                .deck
                .as_ref()
                .map(|deck| deck.to_views(self.resolver.as_ref()))
                .unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("sessions", &self.store.len())
            .finish_non_exhaustive()
    }
}

/// Payload for a failed request. Context is only echoed for caller mistakes.
fn error_event(kind: RequestKind, err: &RequestError, context: String) -> ServerEvent {
    let data = if err.is_validation() { context } else { String::new() };
    ServerEvent::ProcessError(ErrorPayload::new(err.code(kind), data))
}

fn log_failure(id: &SessionId, kind: RequestKind, err: &RequestError, context: &str) {
    let code = err.code(kind);
    if err.is_validation() {
        tracing::warn!(session_id = %id, code = code.as_u16(), category = code.description(), data = %context, error = %err, "request rejected");
    } else {
        tracing::error!(session_id = %id, code = code.as_u16(), category = code.description(), data = %context, error = %err, "request failed");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}
