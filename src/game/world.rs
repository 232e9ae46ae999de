//! World construction: scrolling backgrounds, the player, the ground
//! line, and the score display.

use super::types::{ScreenSize, WorldIds};
use crate::constants::{
    BACKGROUND_LAYERS, BACKGROUND_LOOP_SECONDS, PLAYER_HEIGHT, PLAYER_MASS, SCORE_LABEL_INSET,
};
use crate::sim::{
    Action, ActionStep, Body, CollisionTag, Entity, IntervalTimer, Shape, Sprite, Stage, Vec2,
};

/// Tear down whatever the stage holds and build a fresh world, then
/// re-arm the spawn timer. Used both for the first round and for every
/// restart after a crash.
pub fn build_world(
    stage: &mut Stage,
    spawn_timer: &mut IntervalTimer,
    screen: ScreenSize,
) -> WorldIds {
    stage.clear();

    // Background layers first so everything else paints over them. Each
    // copy drifts one screen width left over the loop, then snaps back,
    // so the three of them always tile the visible area.
    for i in 0..BACKGROUND_LAYERS {
        let mut layer = Entity::new(Sprite::Background, Vec2::new(screen.w * i as f64, 0.0));
        layer.action = Some(Action::repeating(vec![
            ActionStep::move_by(-screen.w, 0.0, BACKGROUND_LOOP_SECONDS),
            ActionStep::move_by(screen.w, 0.0, 0.0),
        ]));
        stage.spawn(layer);
    }

    // The player hovers at the center, immune to gravity until the
    // first tap flips it dynamic.
    let mut player = Entity::new(Sprite::Bird, Vec2::ZERO);
    let mut body = Body::fixed(
        Shape::Circle {
            r: PLAYER_HEIGHT / 2.0,
        },
        CollisionTag::Player,
    );
    body.mass = PLAYER_MASS;
    player.body = Some(body);
    let player = stage.spawn(player);

    // Ground: a zero-height contact line along the bottom edge.
    let mut ground = Entity::new(Sprite::Ground, Vec2::new(0.0, -screen.h / 2.0));
    ground.body = Some(Body::fixed(
        Shape::Rect {
            w: screen.w,
            h: 0.0,
        },
        CollisionTag::Obstacle,
    ));
    stage.spawn(ground);

    let mut score = Entity::new(
        Sprite::Score,
        Vec2::new(0.0, screen.h / 2.0 - SCORE_LABEL_INSET),
    );
    score.label = Some("0".to_string());
    let score_label = stage.spawn(score);

    spawn_timer.restart();

    WorldIds {
        player,
        score_label,
    }
}
