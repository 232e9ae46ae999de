//! Input handling and the fixed-step tick loop.

use super::contacts::resolve_contact;
use super::spawner::spawn_obstacle_pair;
use super::types::{GamePhase, GameState};
use super::world::build_world;
use super::FlappyGame;
use crate::constants::{FLAP_IMPULSE, MAX_TICK_MS, PHYSICS_TICK_MS, PLAYER_HEIGHT};
use crate::sim::Vec2;
use rand::Rng;

/// Handle one discrete tap. Mid-round it flaps; on the game-over screen
/// it starts a new round.
pub fn process_input(game: &mut FlappyGame) {
    match game.state.phase {
        GamePhase::Playing => flap(game),
        GamePhase::GameOver => reset(game),
    }
}

/// The flap. Velocity is zeroed before the kick, so every tap produces
/// the same fixed-height hop no matter how fast taps arrive. The first
/// tap of a round also flips the player dynamic, which is what lets
/// gravity and contacts start applying to it.
fn flap(game: &mut FlappyGame) {
    let player = game.ids.player;
    game.stage.set_dynamic(player, true);
    game.stage.set_velocity(player, Vec2::ZERO);
    game.stage.apply_impulse(player, Vec2::new(0.0, FLAP_IMPULSE));
}

/// Throw away the dead world and start over: fresh state, time scale
/// back to normal, stage rebuilt, spawn timer re-armed.
fn reset(game: &mut FlappyGame) {
    game.state = GameState::new();
    game.stage.set_time_scale(1.0);
    game.ids = build_world(&mut game.stage, &mut game.spawn_timer, game.screen);
}

/// Advance the game by `dt_ms` of wall time, consumed in fixed physics
/// steps. Leftover milliseconds carry to the next call, so two 8ms
/// frames land exactly where one 16ms frame does. A runaway gap (a
/// suspended terminal, say) is clamped rather than fast-forwarded.
pub fn tick<R: Rng>(game: &mut FlappyGame, dt_ms: u64, rng: &mut R) {
    game.accumulated_time_ms += dt_ms.min(MAX_TICK_MS);
    while game.accumulated_time_ms >= PHYSICS_TICK_MS {
        game.accumulated_time_ms -= PHYSICS_TICK_MS;
        step(game, PHYSICS_TICK_MS as f64 / 1000.0, rng);
    }
}

fn step<R: Rng>(game: &mut FlappyGame, dt: f64, rng: &mut R) {
    // The spawn timer runs on raw time, outside the stage's time scale.
    // Cancellation is what silences it after a crash.
    let fires = game.spawn_timer.tick(dt);
    for _ in 0..fires {
        spawn_obstacle_pair(&mut game.stage, rng, game.screen, PLAYER_HEIGHT);
    }
    for contact in game.stage.advance(dt) {
        resolve_contact(game, contact);
    }
}
