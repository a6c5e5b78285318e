use super::{BoardError, INITIAL_LENGTH, GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub grid_size: i32,
    pub initial_length: usize,
    /// Seed for food placement. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Move the apple off the fresh snake after a collision. Off by default,
    /// in which case the apple stays where it was, even under the new body.
    pub relocate_food_on_reset: bool,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            initial_length: INITIAL_LENGTH,
            seed: None,
            relocate_food_on_reset: false,
        }
    }
}

impl BoardSettings {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub(crate) fn validate(&self) -> Result<(), BoardError> {
        if self.grid_size < 2 {
            return Err(BoardError::InvalidSettings(format!(
                "grid size {} is below 2",
                self.grid_size
            )));
        }
        if self.initial_length == 0 {
            return Err(BoardError::InvalidSettings(
                "initial length must be at least 1".to_string(),
            ));
        }
        // the snake spawns heading up from the centre, body trailing downwards
        let room = (self.grid_size - self.grid_size / 2) as usize;
        if self.initial_length > room {
            return Err(BoardError::InvalidSettings(format!(
                "initial length {} does not fit below the centre of a {}x{} grid",
                self.initial_length, self.grid_size, self.grid_size
            )));
        }
        Ok(())
    }
}
