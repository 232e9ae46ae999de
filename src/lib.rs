//! Flappy - Terminal Flappy Bird Library
//!
//! This module exposes the stage service and game logic for testing;
//! the binary drives them through a crossterm frame loop.

pub mod build_info;
pub mod constants;
pub mod game;
pub mod sim;
pub mod ui;

pub use game::{FlappyGame, GamePhase, GameState};
