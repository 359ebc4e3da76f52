//! Observable values shared between the engine and whoever renders it.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// A value that is only ever replaced whole.
///
/// Reads return a clone of the latest value. Every replacement is pushed to
/// all live subscribers; receivers that were dropped are forgotten.
#[derive(Debug)]
pub struct StateStore<T> {
    value: Arc<RwLock<T>>,
    subscribers: Arc<Mutex<Vec<Sender<T>>>>,
}

impl<T> Clone for StateStore<T> {
    fn clone(&self) -> Self {
        StateStore {
            value: Arc::clone(&self.value),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T: Clone> StateStore<T> {
    pub fn new(value: T) -> Self {
        StateStore {
            value: Arc::new(RwLock::new(value)),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get(&self) -> T {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, value: T) {
        self.update(|_| value);
    }

    /// Computes the next value from the current one under the write lock.
    ///
    /// Subscribers are notified before the lock is released, so they receive
    /// values in the order they were stored.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let mut guard = self.value.write().unwrap_or_else(PoisonError::into_inner);
        let next = f(&guard);
        *guard = next.clone();
        self.notify(next);
    }

    /// Receives every value stored from now on.
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    fn notify(&self, value: T) {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(value.clone()).is_ok());
    }
}

/// Whether the game screen is paused or hidden. Scripted computer input is
/// only replayed while the game is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback {
    pub is_paused: bool,
    pub is_shown: bool,
}

impl Default for Playback {
    fn default() -> Self {
        Playback {
            is_paused: false,
            is_shown: true,
        }
    }
}

impl Playback {
    pub fn is_active(&self) -> bool {
        !self.is_paused && self.is_shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_replace_update() {
        let store = StateStore::new(1);
        assert_eq!(store.get(), 1);
        store.replace(5);
        assert_eq!(store.get(), 5);
        store.update(|v| v * 2);
        assert_eq!(store.get(), 10);
    }

    #[test]
    fn test_subscribers_see_every_replacement() {
        let store = StateStore::new(String::from("a"));
        let rx = store.subscribe();
        store.replace("b".into());
        store.update(|v| format!("{v}c"));
        assert_eq!(rx.try_recv().unwrap(), "b");
        assert_eq!(rx.try_recv().unwrap(), "bc");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_forgotten() {
        let store = StateStore::new(0);
        let rx = store.subscribe();
        drop(rx);
        store.replace(1);
        assert!(store.subscribers.lock().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_updates_arrive_in_store_order() {
        let store = StateStore::new(0u32);
        let rx = store.subscribe();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        store.update(|v| v + 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let seen: Vec<u32> = rx.try_iter().collect();
        assert_eq!(seen, (1..=1000).collect::<Vec<_>>());
        assert_eq!(seen.last().copied(), Some(store.get()));
    }

    #[test]
    fn test_clones_share_value() {
        let store = StateStore::new(0);
        let other = store.clone();
        other.replace(3);
        assert_eq!(store.get(), 3);
    }

    #[test]
    fn test_playback_activity() {
        let mut playback = Playback::default();
        assert!(playback.is_active());
        playback.is_paused = true;
        assert!(!playback.is_active());
        playback = Playback {
            is_paused: false,
            is_shown: false,
        };
        assert!(!playback.is_active());
    }
}
