use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::GameError;

/// Largest accepted grid side; keeps every cell addressable as `i32` and the
/// drawn grid (two columns per cell) within a `u16` terminal rect
pub const MAX_GRID_DIMENSION: usize = 4096;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded per food eaten
    pub score_increment: u32,
    /// Period of the game ticker in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            score_increment: 10,
            tick_interval_ms: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults. The result is validated
    /// before it is returned.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize game config")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), GameError> {
        check_grid(self.grid_width, self.grid_height)?;

        if self.initial_snake_length == 0 {
            return Err(GameError::InvalidConfiguration(
                "initial_snake_length must be positive".to_string(),
            ));
        }
        if self.score_increment == 0 {
            return Err(GameError::InvalidConfiguration(
                "score_increment must be positive".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfiguration(
                "tick_interval_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Check that a grid can hold a snake and a food cell
pub(crate) fn check_grid(width: usize, height: usize) -> Result<(), GameError> {
    if width == 0 || height == 0 {
        return Err(GameError::InvalidConfiguration(format!(
            "grid dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
        return Err(GameError::InvalidConfiguration(format!(
            "grid dimensions must not exceed {}, got {}x{}",
            MAX_GRID_DIMENSION, width, height
        )));
    }
    if width * height < 2 {
        return Err(GameError::InvalidConfiguration(
            "grid must have room for the snake and one food cell".to_string(),
        ));
    }

    Ok(())
}
