//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Front ends read [`GameSnapshot`]s and feed commands back to the [`GameEngine`].

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome, START_HEAD};
pub use error::GameError;
pub use state::{EndReason, GamePhase, GameSnapshot, GameState, Position, Snake};
