//! Per-session shuffler provisioning.

use parking_lot::Mutex;

use super::Shuffler;
use crate::core::GameRng;

/// Supplies the shuffler a new session keeps for its lifetime.
pub trait ShufflerSource: Send + Sync {
    fn session_shuffler(&self) -> Box<dyn Shuffler>;
}

/// Forks a root `GameRng` once per session.
///
/// Sessions never share a stream, so shuffles in one session cannot be
/// influenced by traffic in another. Seeding the root makes every session
/// reproducible in creation order.
#[derive(Debug)]
pub struct ForkingSource {
    root: Mutex<GameRng>,
}

impl ForkingSource {
    #[must_use]
    pub fn new(root: GameRng) -> Self {
        Self {
            root: Mutex::new(root),
        }
    }
}

impl ShufflerSource for ForkingSource {
    fn session_shuffler(&self) -> Box<dyn Shuffler> {
        Box::new(self.root.lock().fork())
    }
}

impl<F> ShufflerSource for F
where
    F: Fn() -> Box<dyn Shuffler> + Send + Sync,
{
    fn session_shuffler(&self) -> Box<dyn Shuffler> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn order_from(shuffler: &mut dyn Shuffler) -> Vec<CardId> {
        let mut cards: Vec<CardId> = (0..16).map(CardId::new).collect();
        shuffler.shuffle(&mut cards);
        cards
    }

    #[test]
    fn test_forks_are_independent() {
        let source = ForkingSource::new(GameRng::new(42));
        let mut first = source.session_shuffler();
        let mut second = source.session_shuffler();

        assert_ne!(order_from(first.as_mut()), order_from(second.as_mut()));
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = ForkingSource::new(GameRng::new(42));
        let b = ForkingSource::new(GameRng::new(42));

        assert_eq!(
            order_from(a.session_shuffler().as_mut()),
            order_from(b.session_shuffler().as_mut())
        );
    }
}
