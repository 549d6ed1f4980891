//! Concurrent session storage.
//!
//! Sessions live behind their own mutex inside a sharded map. Holding a
//! session's lock is what serializes requests for that session; requests
//! for different sessions only meet briefly on the map shard.

use std::hash::BuildHasherDefault;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use rustc_hash::FxHasher;

use super::id::SessionId;
use super::state::Session;
use crate::shuffle::Shuffler;

/// A session plus the shuffler it owns.
pub struct SessionSlot {
    pub session: Session,
    pub shuffler: Box<dyn Shuffler>,
}

impl SessionSlot {
    #[must_use]
    pub fn new(session: Session, shuffler: Box<dyn Shuffler>) -> Self {
        Self { session, shuffler }
    }
}

impl std::fmt::Debug for SessionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSlot").field("session", &self.session).finish_non_exhaustive()
    }
}

/// Shared handle to a slot; lock it to work on the session.
pub type SharedSlot = Arc<Mutex<SessionSlot>>;

/// All live sessions, keyed by id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, SharedSlot, BuildHasherDefault<FxHasher>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a slot under `id` unless the id is taken.
    ///
    /// `make` only runs when the id is free. Returns whether it was inserted.
    pub fn insert_new_with(&self, id: &SessionId, make: impl FnOnce() -> SessionSlot) -> bool {
        match self.sessions.entry(id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::new(Mutex::new(make())));
                true
            }
        }
    }

    /// Insert a slot keyed by its session id unless the id is taken.
    pub fn insert_new(&self, slot: SessionSlot) -> bool {
        let id = slot.session.id.clone();
        self.insert_new_with(&id, || slot)
    }

    /// Handle to a session's slot. Lock it for exclusive access.
    #[must_use]
    pub fn lock(&self, id: &SessionId) -> Option<SharedSlot> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Snapshot of a session.
    #[must_use]
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        let slot = self.lock(id)?;
        let session = slot.lock().session.clone();
        Some(session)
    }

    /// Replace a live session's state. Returns false if it does not exist.
    pub fn put(&self, session: Session) -> bool {
        match self.lock(&session.id) {
            Some(slot) => {
                slot.lock().session = session;
                true
            }
            None => false,
        }
    }

    /// Remove a session, returning its last state.
    ///
    /// A request already holding the slot finishes against the detached
    /// slot; its result is discarded with it.
    pub fn delete(&self, id: &SessionId) -> Option<Session> {
        let (_, slot) = self.sessions.remove(id)?;
        let session = slot.lock().session.clone();
        Some(session)
    }

    #[must_use]
    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Deck};
    use crate::core::GameRng;

    fn slot(id: &str) -> SessionSlot {
        SessionSlot::new(Session::new(SessionId::new(id)), Box::new(GameRng::new(1)))
    }

    #[test]
    fn test_insert_and_get() {
        let store = SessionStore::new();
        assert!(store.insert_new(slot("a")));
        assert!(store.contains(&SessionId::new("a")));
        assert_eq!(store.get(&SessionId::new("a")).unwrap().id, SessionId::new("a"));
        assert!(store.get(&SessionId::new("b")).is_none());
    }

    #[test]
    fn test_insert_refuses_taken_id() {
        let store = SessionStore::new();
        assert!(store.insert_new(slot("a")));

        let mut made = false;
        let inserted = store.insert_new_with(&SessionId::new("a"), || {
            made = true;
            slot("a")
        });

        assert!(!inserted);
        assert!(!made);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_put_replaces_state() {
        let store = SessionStore::new();
        store.insert_new(slot("a"));

        let mut session = store.get(&SessionId::new("a")).unwrap();
        session.deck_code = Some("code".into());
        session.deck = Some(Deck::from_cards(vec![CardId::new(1)]));
        assert!(store.put(session.clone()));

        assert_eq!(store.get(&SessionId::new("a")).unwrap(), session);
        assert!(!store.put(Session::new(SessionId::new("missing"))));
    }

    #[test]
    fn test_delete() {
        let store = SessionStore::new();
        store.insert_new(slot("a"));

        let removed = store.delete(&SessionId::new("a")).unwrap();
        assert_eq!(removed.id, SessionId::new("a"));
        assert!(store.is_empty());
        assert!(store.delete(&SessionId::new("a")).is_none());
    }

    #[test]
    fn test_distinct_sessions_from_many_threads() {
        let store = Arc::new(SessionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        let id = format!("{t}-{i}");
                        assert!(store.insert_new(slot(&id)));
                        let mut session = store.get(&SessionId::new(id.as_str())).unwrap();
                        session.deck_code = Some(id.clone());
                        store.put(session);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 400);
        let sample = store.get(&SessionId::new("3-17")).unwrap();
        assert_eq!(sample.deck_code.as_deref(), Some("3-17"));
    }
}
