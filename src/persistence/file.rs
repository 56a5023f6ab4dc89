//! File-backed high score store

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{HighScoreStore, PersistenceError};

/// Default store location, relative to the working directory
pub const DEFAULT_PATH: &str = "scores.txt";

/// Keeps the best score as a bare decimal integer in a text file
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileHighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load_high_score(&self) -> Result<u32, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No high score at {}, starting from 0", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let value = content
            .trim()
            .parse::<u32>()
            .map_err(|source| PersistenceError::Parse {
                content: content.clone(),
                source,
            })?;
        log::info!("Loaded high score {} from {}", value, self.path.display());
        Ok(value)
    }

    fn save_high_score(&mut self, value: u32) -> Result<(), PersistenceError> {
        fs::write(&self.path, value.to_string())?;
        Ok(())
    }
}
