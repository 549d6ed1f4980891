//! Simulator configuration.

use serde::{Deserialize, Serialize};

/// Characters session ids are drawn from.
pub const DEFAULT_SESSION_ID_ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Records the background analytics writer may hold before dropping new ones.
pub const DEFAULT_ANALYTICS_QUEUE_CAPACITY: usize = 1024;

/// Card url returned until real art lookup exists.
pub const DEFAULT_PLACEHOLDER_URL: &str = "nourl";

/// Simulator configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MulliganConfig {
    /// Root seed for shuffles and session ids.
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// Length of generated session ids.
    pub session_id_length: usize,

    /// Alphabet session ids are drawn from. Must not be empty.
    pub session_id_alphabet: String,

    /// Attempts at finding an unused session id before giving up.
    pub max_session_id_attempts: u32,

    /// Url attached to every card in responses.
    pub placeholder_url: String,

    /// Queue depth of the background analytics writer. Records arriving
    /// while the queue is full are dropped.
    pub analytics_queue_capacity: usize,
}

impl Default for MulliganConfig {
    fn default() -> Self {
        Self {
            seed: None,
            session_id_length: 16,
            session_id_alphabet: DEFAULT_SESSION_ID_ALPHABET.to_string(),
            max_session_id_attempts: 1_000_000,
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
            analytics_queue_capacity: DEFAULT_ANALYTICS_QUEUE_CAPACITY,
        }
    }
}

impl MulliganConfig {
    /// Fix the root seed, making every shuffle reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the generated session id length.
    pub fn with_session_id_length(mut self, length: usize) -> Self {
        self.session_id_length = length;
        self
    }

    /// Set the session id alphabet.
    pub fn with_session_id_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.session_id_alphabet = alphabet.into();
        self
    }

    /// Set how many candidate ids are tried before failing.
    pub fn with_max_session_id_attempts(mut self, attempts: u32) -> Self {
        self.max_session_id_attempts = attempts;
        self
    }

    /// Set the url attached to cards.
    pub fn with_placeholder_url(mut self, url: impl Into<String>) -> Self {
        self.placeholder_url = url.into();
        self
    }

    pub fn with_analytics_queue_capacity(mut self, capacity: usize) -> Self {
        self.analytics_queue_capacity = capacity;
        self
    }
}
