// Logical stage size in points. The renderer scales each axis to the
// terminal independently, so these never change at runtime.
pub const SCREEN_WIDTH: f64 = 900.0;
pub const SCREEN_HEIGHT: f64 = 800.0;

// Player tuning
pub const PLAYER_HEIGHT: f64 = 50.0;
pub const FLAP_IMPULSE: f64 = 60.0;
// Mass is tuned against FLAP_IMPULSE so one tap climbs about a fifth
// of the screen before gravity wins.
pub const PLAYER_MASS: f64 = 0.0873;
pub const GRAVITY_Y: f64 = -1470.0;

// Obstacle tuning
pub const GAP_MULTIPLIER: f64 = 4.0;
pub const BARRIER_WIDTH: f64 = 120.0;
pub const SPAWN_INTERVAL_SECONDS: f64 = 3.0;
// Obstacles travel two screen widths in (screen width / 100) seconds,
// a constant 200 points/s at any logical size.
pub const OBSTACLE_TRAVEL_WIDTHS: f64 = 2.0;
pub const OBSTACLE_CROSS_DIVISOR: f64 = 100.0;

// Background scroll
pub const BACKGROUND_LAYERS: usize = 3;
pub const BACKGROUND_LOOP_SECONDS: f64 = 7.0;

// HUD layout (stage points)
pub const SCORE_LABEL_INSET: f64 = 70.0;
pub const GAME_OVER_TEXT: &str = "Game Over! Tap to play again";

// Frame loop timing
pub const PHYSICS_TICK_MS: u64 = 16;
pub const MAX_TICK_MS: u64 = 100;
pub const FRAME_POLL_MS: u64 = 16;

// Wing flap animation, seconds per frame (two frames)
pub const WING_FRAME_SECONDS: f64 = 0.1;
