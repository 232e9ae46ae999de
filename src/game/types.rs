//! Core game data: phase, score, and spawn records.

use crate::sim::EntityId;

/// The two game modes. Playing→GameOver happens only on lethal contact;
/// GameOver→Playing only on the reset tap. No other transitions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// Score and phase, owned by the game controller. Nothing else mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub phase: GamePhase,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            phase: GamePhase::Playing,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Logical screen dimensions in stage points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub w: f64,
    pub h: f64,
}

/// Record of one spawn: two barriers and the scoring gate between them.
#[derive(Debug, Clone, Copy)]
pub struct ObstaclePair {
    pub upper: EntityId,
    pub lower: EntityId,
    pub gate: EntityId,
    /// Vertical shift of the whole pair, in [-screen_h/4, +screen_h/4].
    pub vertical_offset: f64,
    /// Clear space between the barriers: player sprite height x 4.
    pub gap_height: f64,
}

/// Handles to the world entities addressed after construction.
#[derive(Debug, Clone, Copy)]
pub struct WorldIds {
    pub player: EntityId,
    pub score_label: EntityId,
}
