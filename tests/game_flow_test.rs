//! Integration tests for full game rounds through the public API.
//!
//! These drive `FlappyGame` the way the binary does: taps through
//! `process_input`, wall time through `tick` in frame-sized slices,
//! with seeded RNG so every run replays exactly.

use flappy::constants::{
    FLAP_IMPULSE, GAME_OVER_TEXT, PLAYER_HEIGHT, PLAYER_MASS, SCORE_LABEL_INSET, SCREEN_HEIGHT,
};
use flappy::game::{self, spawner, FlappyGame, GamePhase};
use flappy::sim::{CollisionTag, Contact, Entity, EntityId, Sprite, Vec2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Feed wall time to the game in 16ms frame slices.
fn run_ms(game: &mut FlappyGame, rng: &mut ChaCha8Rng, mut ms: u64) {
    while ms > 0 {
        let slice = ms.min(16);
        game::tick(game, slice, rng);
        ms -= slice;
    }
}

fn find_sprite(game: &FlappyGame, sprite: Sprite) -> Option<&Entity> {
    game.stage.entities().iter().find(|e| e.sprite == sprite)
}

fn bird(game: &FlappyGame) -> &Entity {
    game.stage.entity(game.ids.player).expect("player on stage")
}

fn bird_velocity(game: &FlappyGame) -> Vec2 {
    bird(game).body.as_ref().expect("player body").velocity
}

/// Tap once and let the bird fall from the center to the ground.
fn crash_on_ground(game: &mut FlappyGame, rng: &mut ChaCha8Rng) {
    game::process_input(game);
    run_ms(game, rng, 2000);
    assert_eq!(game.state.phase, GamePhase::GameOver);
}

// ── World construction ──────────────────────────────────────────────

#[test]
fn test_new_game_starts_playing_with_a_full_world() {
    let game = FlappyGame::new();

    assert_eq!(game.state.phase, GamePhase::Playing);
    assert_eq!(game.state.score, 0);
    assert_eq!(game.stage.time_scale(), 1.0);
    assert!(game.spawn_timer.is_armed());

    assert_eq!(game.stage.count_sprite(Sprite::Bird), 1);
    assert_eq!(game.stage.count_sprite(Sprite::Background), 3);
    assert_eq!(game.stage.count_sprite(Sprite::Ground), 1);
    assert_eq!(game.stage.count_sprite(Sprite::Pipe), 0);
    assert_eq!(game.stage.count_sprite(Sprite::Gate), 0);
    assert_eq!(game.stage.count_sprite(Sprite::Banner), 0);

    // By tag: the ground is the only lethal body on the fresh stage.
    assert_eq!(game.stage.count_tag(CollisionTag::Obstacle), 1);
    assert_eq!(game.stage.count_tag(CollisionTag::Player), 1);

    let label = find_sprite(&game, Sprite::Score).expect("score label");
    assert_eq!(label.label.as_deref(), Some("0"));
    assert_eq!(
        label.pos,
        Vec2::new(0.0, SCREEN_HEIGHT / 2.0 - SCORE_LABEL_INSET)
    );
}

#[test]
fn test_bird_hovers_until_first_tap() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(1);

    run_ms(&mut game, &mut rng, 2000);

    assert_eq!(bird(&game).pos, Vec2::ZERO);
    assert!(!bird(&game).body.as_ref().unwrap().dynamic);
    assert_eq!(game.state.phase, GamePhase::Playing);
}

// ── Obstacle spawning and scrolling ─────────────────────────────────

#[test]
fn test_first_obstacles_appear_after_three_seconds() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(2);

    run_ms(&mut game, &mut rng, 2900);
    assert_eq!(game.stage.count_sprite(Sprite::Pipe), 0);
    assert_eq!(game.stage.count_sprite(Sprite::Gate), 0);

    run_ms(&mut game, &mut rng, 200);
    assert_eq!(game.stage.count_sprite(Sprite::Pipe), 2);
    assert_eq!(game.stage.count_sprite(Sprite::Gate), 1);
}

#[test]
fn test_spawned_pair_brackets_a_gap_inside_the_middle_band() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(3);
    run_ms(&mut game, &mut rng, 3100);

    let gate = find_sprite(&game, Sprite::Gate).expect("gate");
    let pipes: Vec<&Entity> = game
        .stage
        .entities()
        .iter()
        .filter(|e| e.sprite == Sprite::Pipe)
        .collect();
    assert_eq!(pipes.len(), 2);
    let upper = pipes.iter().find(|e| e.pos.y > 0.0).expect("upper barrier");
    let lower = pipes.iter().find(|e| e.pos.y < 0.0).expect("lower barrier");

    // The gate center is the rolled offset, within a quarter screen of
    // the middle either way.
    let offset = gate.pos.y;
    assert!(offset >= -SCREEN_HEIGHT / 4.0);
    assert!(offset < SCREEN_HEIGHT / 4.0);

    // Barrier edges sit flush against a gap of four player heights.
    let gap = spawner::gap_height(PLAYER_HEIGHT);
    let upper_bottom = upper.pos.y - SCREEN_HEIGHT / 2.0;
    let lower_top = lower.pos.y + SCREEN_HEIGHT / 2.0;
    assert!((upper_bottom - (offset + gap / 2.0)).abs() < 1e-9);
    assert!((lower_top - (offset - gap / 2.0)).abs() < 1e-9);

    // All three scroll in lockstep.
    assert_eq!(upper.pos.x, gate.pos.x);
    assert_eq!(lower.pos.x, gate.pos.x);
}

#[test]
fn test_obstacles_scroll_left_and_eventually_despawn() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(4);
    run_ms(&mut game, &mut rng, 3100);

    let gate = find_sprite(&game, Sprite::Gate).expect("gate");
    let gate_id = gate.id;
    let x0 = gate.pos.x;

    // 200 points per second, give or take one physics step.
    run_ms(&mut game, &mut rng, 1000);
    let x1 = game.stage.entity(gate_id).expect("still crossing").pos.x;
    assert!((x0 - x1 - 200.0).abs() < 4.0);

    // The crossing takes nine seconds; afterwards the trio is gone.
    run_ms(&mut game, &mut rng, 8200);
    assert!(game.stage.entity(gate_id).is_none());
}

#[test]
fn test_obstacle_population_stays_bounded() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(5);

    // An untapped bird never dies, so pairs keep coming; despawning
    // must keep the arena from growing without bound.
    let mut max_pipes = 0;
    for _ in 0..20 {
        run_ms(&mut game, &mut rng, 3000);
        let pipes = game.stage.count_sprite(Sprite::Pipe);
        max_pipes = max_pipes.max(pipes);
        assert!(pipes <= 8, "arena grew to {pipes} barriers");
    }
    assert!(max_pipes >= 4);
    assert_eq!(game.state.phase, GamePhase::Playing);
}

// ── Flap mechanics ──────────────────────────────────────────────────

#[test]
fn test_first_tap_flips_dynamic_with_a_fixed_kick() {
    let mut game = FlappyGame::new();

    game::process_input(&mut game);

    assert!(bird(&game).body.as_ref().unwrap().dynamic);
    let v = bird_velocity(&game);
    assert_eq!(v.x, 0.0);
    assert!((v.y - FLAP_IMPULSE / PLAYER_MASS).abs() < 1e-9);
}

#[test]
fn test_rapid_taps_never_stack_velocity() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(6);

    game::process_input(&mut game);
    let first = bird_velocity(&game).y;

    run_ms(&mut game, &mut rng, 100);
    assert!(bird_velocity(&game).y < first);

    game::process_input(&mut game);
    assert!((bird_velocity(&game).y - first).abs() < 1e-9);
    game::process_input(&mut game);
    assert!((bird_velocity(&game).y - first).abs() < 1e-9);
}

#[test]
fn test_hop_height_is_about_a_fifth_of_the_screen() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(7);

    game::process_input(&mut game);
    let mut max_y: f64 = 0.0;
    for _ in 0..60 {
        run_ms(&mut game, &mut rng, 16);
        max_y = max_y.max(bird(&game).pos.y);
    }

    assert!(max_y > SCREEN_HEIGHT / 8.0);
    assert!(max_y < SCREEN_HEIGHT / 4.0);
}

// ── Death and the frozen world ──────────────────────────────────────

#[test]
fn test_falling_to_the_ground_ends_the_game() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(8);

    crash_on_ground(&mut game, &mut rng);

    assert_eq!(game.state.score, 0);
    assert_eq!(game.stage.time_scale(), 0.0);
    assert!(!game.spawn_timer.is_armed());
    assert_eq!(game.stage.count_sprite(Sprite::Banner), 1);
    let banner = find_sprite(&game, Sprite::Banner).unwrap();
    assert_eq!(banner.label.as_deref(), Some(GAME_OVER_TEXT));
    assert_eq!(banner.pos, Vec2::ZERO);
}

#[test]
fn test_dead_world_is_frozen_and_silent() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(9);
    crash_on_ground(&mut game, &mut rng);

    let bird_rest = bird(&game).pos;
    let pipes_before = game.stage.count_sprite(Sprite::Pipe);

    // Ten more seconds: nothing moves, nothing spawns, no extra banner.
    run_ms(&mut game, &mut rng, 10_000);

    assert_eq!(game.state.phase, GamePhase::GameOver);
    assert_eq!(bird(&game).pos, bird_rest);
    assert_eq!(game.stage.count_sprite(Sprite::Pipe), pipes_before);
    assert_eq!(game.stage.count_sprite(Sprite::Gate), 0);
    assert_eq!(game.stage.count_sprite(Sprite::Banner), 1);
}

#[test]
fn test_contacts_reported_after_death_are_ignored() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(10);
    crash_on_ground(&mut game, &mut rng);

    // Neither a gate nor another lethal contact does anything now.
    let player = game.ids.player;
    game::resolve_contact(
        &mut game,
        Contact {
            a: player,
            b: EntityId(9999),
            tag_a: CollisionTag::Player,
            tag_b: CollisionTag::Gate,
        },
    );
    assert_eq!(game.state.score, 0);

    game::resolve_contact(
        &mut game,
        Contact {
            a: player,
            b: EntityId(9999),
            tag_a: CollisionTag::Player,
            tag_b: CollisionTag::Obstacle,
        },
    );
    assert_eq!(game.stage.count_sprite(Sprite::Banner), 1);
}

// ── Scoring ─────────────────────────────────────────────────────────

#[test]
fn test_passing_the_gate_scores_exactly_once() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(11);
    run_ms(&mut game, &mut rng, 3100);

    // Fly the bird into the gap by hand: dynamic, parked on the gate.
    let gate_pos = find_sprite(&game, Sprite::Gate).expect("gate").pos;
    game.stage.set_dynamic(game.ids.player, true);
    game.stage.set_velocity(game.ids.player, Vec2::ZERO);
    game.stage.set_position(game.ids.player, gate_pos);

    run_ms(&mut game, &mut rng, 16);
    assert_eq!(game.state.score, 1);
    assert_eq!(game.state.phase, GamePhase::Playing);
    let label = find_sprite(&game, Sprite::Score).unwrap();
    assert_eq!(label.label.as_deref(), Some("1"));

    // Still inside the same gate: no second count.
    run_ms(&mut game, &mut rng, 48);
    assert_eq!(game.state.score, 1);
}

#[test]
fn test_scoring_then_hitting_a_barrier_keeps_the_score() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(12);
    run_ms(&mut game, &mut rng, 3100);

    let gate_pos = find_sprite(&game, Sprite::Gate).expect("gate").pos;
    game.stage.set_dynamic(game.ids.player, true);
    game.stage.set_velocity(game.ids.player, Vec2::ZERO);
    game.stage.set_position(game.ids.player, gate_pos);

    run_ms(&mut game, &mut rng, 16);
    assert_eq!(game.state.score, 1);

    // Gravity drops the bird out of the gap onto the lower barrier.
    run_ms(&mut game, &mut rng, 1000);
    assert_eq!(game.state.phase, GamePhase::GameOver);
    assert_eq!(game.state.score, 1);
    let label = find_sprite(&game, Sprite::Score).unwrap();
    assert_eq!(label.label.as_deref(), Some("1"));
}

// ── Restarting ──────────────────────────────────────────────────────

#[test]
fn test_tap_on_the_game_over_screen_rebuilds_the_world() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(13);

    // Let a pair spawn first so the rebuild has something to destroy.
    run_ms(&mut game, &mut rng, 3100);
    assert_eq!(game.stage.count_sprite(Sprite::Pipe), 2);
    crash_on_ground(&mut game, &mut rng);
    assert_eq!(game.stage.count_sprite(Sprite::Pipe), 2);

    game::process_input(&mut game);

    assert_eq!(game.state.phase, GamePhase::Playing);
    assert_eq!(game.state.score, 0);
    assert_eq!(game.stage.time_scale(), 1.0);
    assert!(game.spawn_timer.is_armed());
    assert_eq!(game.stage.count_sprite(Sprite::Bird), 1);
    assert_eq!(game.stage.count_sprite(Sprite::Background), 3);
    assert_eq!(game.stage.count_sprite(Sprite::Pipe), 0);
    assert_eq!(game.stage.count_sprite(Sprite::Gate), 0);
    assert_eq!(game.stage.count_sprite(Sprite::Banner), 0);

    // The teardown dropped the in-flight pair's bodies too: the ground
    // is again the only lethal body left.
    assert_eq!(game.stage.count_tag(CollisionTag::Obstacle), 1);
    assert_eq!(game.stage.count_tag(CollisionTag::Gate), 0);

    let label = find_sprite(&game, Sprite::Score).unwrap();
    assert_eq!(label.label.as_deref(), Some("0"));
    assert_eq!(bird(&game).pos, Vec2::ZERO);
    assert!(!bird(&game).body.as_ref().unwrap().dynamic);
}

#[test]
fn test_new_round_plays_like_the_first() {
    let mut game = FlappyGame::new();
    let mut rng = seeded(14);
    crash_on_ground(&mut game, &mut rng);
    game::process_input(&mut game);

    // The spawn timer starts over from the restart.
    run_ms(&mut game, &mut rng, 2900);
    assert_eq!(game.stage.count_sprite(Sprite::Pipe), 0);
    run_ms(&mut game, &mut rng, 200);
    assert_eq!(game.stage.count_sprite(Sprite::Pipe), 2);

    // And the rebuilt bird flaps like the old one did.
    game::process_input(&mut game);
    assert!((bird_velocity(&game).y - FLAP_IMPULSE / PLAYER_MASS).abs() < 1e-9);
}

// ── Determinism and tick bookkeeping ────────────────────────────────

fn play_scripted_round(game: &mut FlappyGame, rng: &mut ChaCha8Rng) {
    run_ms(game, rng, 3100);
    game::process_input(game);
    run_ms(game, rng, 700);
    game::process_input(game);
    run_ms(game, rng, 2500);
}

#[test]
fn test_identical_seeds_replay_identically() {
    let mut a = FlappyGame::new();
    let mut ra = seeded(42);
    let mut b = FlappyGame::new();
    let mut rb = seeded(42);

    play_scripted_round(&mut a, &mut ra);
    play_scripted_round(&mut b, &mut rb);

    assert_eq!(a.state.phase, b.state.phase);
    assert_eq!(a.state.score, b.state.score);
    assert_eq!(bird(&a).pos, bird(&b).pos);

    let layout = |g: &FlappyGame| -> Vec<(f64, f64)> {
        g.stage
            .entities()
            .iter()
            .filter(|e| e.sprite == Sprite::Pipe)
            .map(|e| (e.pos.x, e.pos.y))
            .collect()
    };
    assert_eq!(layout(&a), layout(&b));
}

#[test]
fn test_split_frames_match_whole_frames() {
    let mut a = FlappyGame::new();
    let mut ra = seeded(15);
    let mut b = FlappyGame::new();
    let mut rb = seeded(15);

    game::process_input(&mut a);
    game::process_input(&mut b);

    for _ in 0..100 {
        game::tick(&mut a, 8, &mut ra);
        game::tick(&mut a, 8, &mut ra);
        game::tick(&mut b, 16, &mut rb);
    }

    assert_eq!(bird(&a).pos, bird(&b).pos);
    assert_eq!(a.accumulated_time_ms, b.accumulated_time_ms);
}

#[test]
fn test_runaway_frame_gap_is_clamped() {
    let mut a = FlappyGame::new();
    let mut ra = seeded(16);
    let mut b = FlappyGame::new();
    let mut rb = seeded(16);

    game::process_input(&mut a);
    game::process_input(&mut b);

    // A ten-second stall counts the same as the 100ms clamp.
    game::tick(&mut a, 10_000, &mut ra);
    game::tick(&mut b, 100, &mut rb);

    assert_eq!(bird(&a).pos, bird(&b).pos);
    assert_eq!(a.accumulated_time_ms, b.accumulated_time_ms);
}
