//! The game: one stage, one state machine, one spawn timer.
//!
//! `FlappyGame` wires the stage service to the rules. All mutation
//! flows through two entry points: [`process_input`] for taps and
//! [`tick`] for elapsed wall time.

pub mod contacts;
pub mod logic;
pub mod spawner;
pub mod types;
pub mod world;

pub use contacts::{classify, resolve_contact, ResolverAction};
pub use logic::{process_input, tick};
pub use types::{GamePhase, GameState, ObstaclePair, ScreenSize, WorldIds};

use crate::constants::{GRAVITY_Y, SCREEN_HEIGHT, SCREEN_WIDTH, SPAWN_INTERVAL_SECONDS};
use crate::sim::{IntervalTimer, Stage, Vec2};

/// A running game and everything it owns.
pub struct FlappyGame {
    pub stage: Stage,
    pub state: GameState,
    pub spawn_timer: IntervalTimer,
    pub screen: ScreenSize,
    pub ids: WorldIds,
    /// Wall-time milliseconds not yet consumed by whole physics steps.
    pub accumulated_time_ms: u64,
}

impl FlappyGame {
    /// Build a ready-to-play world on the standard logical screen.
    pub fn new() -> Self {
        let screen = ScreenSize {
            w: SCREEN_WIDTH,
            h: SCREEN_HEIGHT,
        };
        let mut stage = Stage::new(Vec2::new(0.0, GRAVITY_Y));
        let mut spawn_timer = IntervalTimer::new(SPAWN_INTERVAL_SECONDS);
        let ids = world::build_world(&mut stage, &mut spawn_timer, screen);
        Self {
            stage,
            state: GameState::new(),
            spawn_timer,
            screen,
            ids,
            accumulated_time_ms: 0,
        }
    }
}

impl Default for FlappyGame {
    fn default() -> Self {
        Self::new()
    }
}
