//! Obstacle spawning: the timed barrier pairs and the scoring gate
//! between them.

use super::types::{ObstaclePair, ScreenSize};
use crate::constants::{
    BARRIER_WIDTH, GAP_MULTIPLIER, OBSTACLE_CROSS_DIVISOR, OBSTACLE_TRAVEL_WIDTHS,
};
use crate::sim::{Action, ActionStep, Body, CollisionTag, Entity, Shape, Sprite, Stage, Vec2};
use rand::Rng;

/// Clear space between the barriers, derived from the player height.
pub fn gap_height(player_height: f64) -> f64 {
    player_height * GAP_MULTIPLIER
}

/// Vertical shift for one pair: uniform over [-h/4, h/4).
pub fn roll_vertical_offset<R: Rng>(rng: &mut R, screen_h: f64) -> f64 {
    rng.gen_range(0.0..screen_h / 2.0) - screen_h / 4.0
}

/// Seconds an obstacle takes to finish its leftward run.
pub fn crossing_seconds(screen_w: f64) -> f64 {
    screen_w / OBSTACLE_CROSS_DIVISOR
}

/// Spawn one obstacle pair at the right edge: two screen-tall barriers
/// and the invisible gate spanning the gap, all moving left in lockstep
/// and despawning once fully off-screen.
///
/// No phase check happens here. Cancelling the spawn timer is what
/// stops spawning after a crash, mirroring how the timer alone decides
/// when pairs appear.
pub fn spawn_obstacle_pair<R: Rng>(
    stage: &mut Stage,
    rng: &mut R,
    screen: ScreenSize,
    player_height: f64,
) -> ObstaclePair {
    let gap = gap_height(player_height);
    let offset = roll_vertical_offset(rng, screen.h);
    let spawn_x = screen.w;
    let travel = -OBSTACLE_TRAVEL_WIDTHS * screen.w;
    let seconds = crossing_seconds(screen.w);
    let course = || {
        Action::once(vec![
            ActionStep::move_by(travel, 0.0, seconds),
            ActionStep::Despawn,
        ])
    };

    // Upper barrier: its lower edge sits flush with the top of the gap.
    let mut upper = Entity::new(
        Sprite::Pipe,
        Vec2::new(spawn_x, gap / 2.0 + offset + screen.h / 2.0),
    );
    upper.body = Some(Body::fixed(
        Shape::Rect {
            w: BARRIER_WIDTH,
            h: screen.h,
        },
        CollisionTag::Obstacle,
    ));
    upper.action = Some(course());
    let upper = stage.spawn(upper);

    // Lower barrier: its upper edge sits flush with the bottom of the gap.
    let mut lower = Entity::new(
        Sprite::Pipe,
        Vec2::new(spawn_x, offset - gap / 2.0 - screen.h / 2.0),
    );
    lower.body = Some(Body::fixed(
        Shape::Rect {
            w: BARRIER_WIDTH,
            h: screen.h,
        },
        CollisionTag::Obstacle,
    ));
    lower.action = Some(course());
    let lower = stage.spawn(lower);

    // The gate fills exactly the clear space between the barriers.
    let mut gate = Entity::new(Sprite::Gate, Vec2::new(spawn_x, offset));
    gate.body = Some(Body::fixed(
        Shape::Rect {
            w: BARRIER_WIDTH,
            h: gap,
        },
        CollisionTag::Gate,
    ));
    gate.action = Some(course());
    let gate = stage.spawn(gate);

    ObstaclePair {
        upper,
        lower,
        gate,
        vertical_offset: offset,
        gap_height: gap,
    }
}
