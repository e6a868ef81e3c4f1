//! A game shared between threads.
//!
//! [`SharedGame`] puts a [`GameState`] behind a single-writer lock so that
//! concurrent drop requests for the same game are applied one at a time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::game::{DropResult, GameState, GameStatus};

#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<GameState>>,
}

impl SharedGame {
    pub fn new(state: GameState) -> Self {
        SharedGame {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    // Each drop either fully applies or not at all, so the state behind a
    // poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn attempt_drop(&self, column: usize) -> DropResult {
        self.lock().attempt_drop(column)
    }

    /// Copy of the current game.
    pub fn snapshot(&self) -> GameState {
        self.lock().clone()
    }

    pub fn status(&self) -> GameStatus {
        self.lock().status()
    }

    /// Start a new game in place.
    pub fn reset(&self) {
        self.lock().reset();
    }
}

impl From<GameState> for SharedGame {
    fn from(state: GameState) -> Self {
        SharedGame::new(state)
    }
}
