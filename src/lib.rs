//! Canvas Snake - a fixed-tick Snake game
//!
//! This library provides:
//! - Core game engine with a pure tick/command API (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering of engine snapshots (render module)
//! - Session clock (metrics module)
//! - The interactive terminal game loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
