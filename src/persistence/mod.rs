//! High score persistence
//!
//! Features:
//! - Plain-text store: one decimal integer, nothing else
//! - Missing store reads as "no prior score" (0)
//! - Corrupt store is reported so the caller can log and fall back to 0

pub mod file;

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;

pub use file::FileHighScoreStore;

/// Persistence failures
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("high score store i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score store holds {content:?}, not an integer")]
    Parse {
        content: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Where the best score lives between runs
pub trait HighScoreStore {
    /// Stored score, `Ok(0)` when nothing was stored yet
    fn load_high_score(&self) -> Result<u32, PersistenceError>;

    /// Overwrite the stored score
    fn save_high_score(&mut self, value: u32) -> Result<(), PersistenceError>;

    /// Load, treating a corrupt or unreadable store as 0
    fn load_or_default(&self) -> u32 {
        match self.load_high_score() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Ignoring stored high score: {}", e);
                0
            }
        }
    }
}

/// In-memory store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Rc<Cell<Option<u32>>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryHighScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        let store = Self::default();
        store.value.set(Some(value));
        store
    }

    /// Last saved value, if any
    pub fn value(&self) -> Option<u32> {
        self.value.get()
    }

    /// Number of saves so far
    pub fn saves(&self) -> u32 {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&self) -> Result<u32, PersistenceError> {
        Ok(self.value.get().unwrap_or(0))
    }

    fn save_high_score(&mut self, value: u32) -> Result<(), PersistenceError> {
        self.value.set(Some(value));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
