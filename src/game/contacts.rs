//! Contact resolution: what a reported overlap means for the game.
//!
//! The stage only says "these two tags touched"; this module decides
//! whether that scores a point, ends the round, or means nothing.

use super::types::GamePhase;
use super::FlappyGame;
use crate::constants::GAME_OVER_TEXT;
use crate::sim::{CollisionTag, Contact, Entity, Sprite, Vec2};

/// Outcome of classifying one contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverAction {
    IncreaseScore,
    EndGame,
    Ignore,
}

/// Classify a contact by its two tags, symmetrically. Anything reported
/// after the round ended is ignored, so a pile-up of overlaps on the
/// death frame can never end the game twice or score posthumously.
pub fn classify(phase: GamePhase, a: CollisionTag, b: CollisionTag) -> ResolverAction {
    use CollisionTag::{Gate, Obstacle, Player};

    if phase != GamePhase::Playing {
        return ResolverAction::Ignore;
    }
    match (a, b) {
        (Player, Gate) | (Gate, Player) => ResolverAction::IncreaseScore,
        (Player, Obstacle) | (Obstacle, Player) => ResolverAction::EndGame,
        // The stage should never produce these: the player is the only
        // dynamic contact-detecting body.
        (Player, Player)
        | (Obstacle, Obstacle)
        | (Obstacle, Gate)
        | (Gate, Obstacle)
        | (Gate, Gate) => {
            log::warn!("ignoring unexpected contact pair {a:?}/{b:?}");
            ResolverAction::Ignore
        }
    }
}

/// Apply one stage contact to the game.
///
/// Scoring bumps the counter and rewrites the on-stage label. A lethal
/// contact freezes the stage, cancels the spawn timer, and raises the
/// game-over banner; the phase flip makes every later contact a no-op.
pub fn resolve_contact(game: &mut FlappyGame, contact: Contact) {
    match classify(game.state.phase, contact.tag_a, contact.tag_b) {
        ResolverAction::IncreaseScore => {
            game.state.score += 1;
            let text = game.state.score.to_string();
            game.stage.set_label_text(game.ids.score_label, text);
        }
        ResolverAction::EndGame => {
            game.stage.set_time_scale(0.0);
            game.state.phase = GamePhase::GameOver;
            game.spawn_timer.cancel();
            let mut banner = Entity::new(Sprite::Banner, Vec2::ZERO);
            banner.label = Some(GAME_OVER_TEXT.to_string());
            game.stage.spawn(banner);
        }
        ResolverAction::Ignore => {}
    }
}
