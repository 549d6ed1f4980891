//! Session identifiers.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::{GameRng, MulliganConfig, SessionError};

/// Opaque per-connection identifier, unique among live sessions.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Draws random ids until one is claimed.
///
/// With the default 16 characters over 36 symbols a retry is practically
/// never needed; the attempt bound only guards a misconfigured id space.
#[derive(Debug)]
pub struct SessionIdGenerator {
    rng: Mutex<GameRng>,
    alphabet: Vec<char>,
    length: usize,
    max_attempts: u32,
}

impl SessionIdGenerator {
    /// Build from config. Fails if the alphabet is empty.
    pub fn new(config: &MulliganConfig, rng: GameRng) -> Result<Self, SessionError> {
        let alphabet: Vec<char> = config.session_id_alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(SessionError::EmptyAlphabet);
        }
        Ok(Self {
            rng: Mutex::new(rng),
            alphabet,
            length: config.session_id_length,
            max_attempts: config.max_session_id_attempts,
        })
    }

    /// Generate one candidate id.
    #[must_use]
    pub fn candidate(&self) -> SessionId {
        let mut rng = self.rng.lock();
        let id = (0..self.length)
            .map(|_| self.alphabet[rng.gen_range_usize(0..self.alphabet.len())])
            .collect::<String>();
        SessionId(id)
    }

    /// Draw candidates until `claim` accepts one.
    ///
    /// `claim` must reserve the id atomically (insert-if-absent) and report
    /// whether it succeeded, so concurrent allocations can never collide.
    pub fn allocate(&self, mut claim: impl FnMut(&SessionId) -> bool) -> Result<SessionId, SessionError> {
        for _ in 0..self.max_attempts {
            let id = self.candidate();
            if claim(&id) {
                return Ok(id);
            }
        }
        Err(SessionError::IdSpaceExhausted {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn generator(config: &MulliganConfig) -> SessionIdGenerator {
        SessionIdGenerator::new(config, GameRng::new(42)).unwrap()
    }

    #[test]
    fn test_candidate_shape() {
        let ids = generator(&MulliganConfig::default());
        let id = ids.candidate();
        assert_eq!(id.as_str().len(), 16);
        assert!(id.as_str().chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_allocate_retries_until_claimed() {
        let ids = generator(&MulliganConfig::default());
        let mut calls = 0;
        let id = ids
            .allocate(|_| {
                calls += 1;
                calls == 3
            })
            .unwrap();
        assert_eq!(calls, 3);
        assert_eq!(id.as_str().len(), 16);
    }

    #[test]
    fn test_exhausted_id_space() {
        let config = MulliganConfig::default()
            .with_session_id_alphabet("a")
            .with_session_id_length(1)
            .with_max_session_id_attempts(50);
        let ids = generator(&config);
        let mut taken = HashSet::new();

        assert_eq!(ids.allocate(|id| taken.insert(id.clone())).unwrap(), SessionId::new("a"));
        assert_eq!(
            ids.allocate(|id| taken.insert(id.clone())),
            Err(SessionError::IdSpaceExhausted { attempts: 50 })
        );
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        let config = MulliganConfig::default().with_session_id_alphabet("");
        assert_eq!(
            SessionIdGenerator::new(&config, GameRng::new(1)).unwrap_err(),
            SessionError::EmptyAlphabet
        );
    }

    #[test]
    fn test_display_and_serde() {
        let id = SessionId::new("abc123");
        assert_eq!(id.to_string(), "abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
    }
}
