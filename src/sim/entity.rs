//! Stage entities: positions, shapes, bodies, and collision tags.

use super::action::Action;
use std::ops::{Add, AddAssign, Mul};

/// Handle to an entity in the stage arena. Ids are assigned by the stage
/// on spawn and never reused within a stage's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// A point or displacement in stage coordinates: points, origin at the
/// screen center, +y up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Collision category attached to a physics body. Barriers and the ground
/// share `Obstacle`: both are lethal to the player. `Gate` only scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionTag {
    Player,
    Obstacle,
    Gate,
}

/// Physics body shape, centered on the entity position. Extents may be
/// zero: a rect with zero height is a contact line (the ground sensor).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { w: f64, h: f64 },
    Circle { r: f64 },
}

/// Render hint for the terminal scene. `Gate` and `Ground` are invisible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Bird,
    Pipe,
    Gate,
    Ground,
    Score,
    Banner,
}

/// A physics body. Always created together with its entity, so a tagged
/// entity can be assumed to have one.
#[derive(Debug, Clone)]
pub struct Body {
    pub shape: Shape,
    pub tag: CollisionTag,
    /// Dynamic bodies integrate gravity and velocity; non-dynamic bodies
    /// only move via actions.
    pub dynamic: bool,
    pub mass: f64,
    pub velocity: Vec2,
    pub detects_contact: bool,
}

impl Body {
    /// Non-dynamic contact body: unaffected by gravity, moved by actions
    /// only. The player starts as one of these until the first tap.
    pub fn fixed(shape: Shape, tag: CollisionTag) -> Self {
        Self {
            shape,
            tag,
            dynamic: false,
            mass: 1.0,
            velocity: Vec2::ZERO,
            detects_contact: true,
        }
    }
}

/// One entity in the stage arena.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Assigned by the stage on spawn; zero until then.
    pub id: EntityId,
    pub pos: Vec2,
    pub sprite: Sprite,
    pub body: Option<Body>,
    pub action: Option<Action>,
    pub label: Option<String>,
}

impl Entity {
    pub fn new(sprite: Sprite, pos: Vec2) -> Self {
        Self {
            id: EntityId(0),
            pos,
            sprite,
            body: None,
            action: None,
            label: None,
        }
    }
}

/// Strict overlap test: shapes that merely share an edge or a tangent
/// point do not overlap.
pub fn shapes_overlap(a: Shape, a_pos: Vec2, b: Shape, b_pos: Vec2) -> bool {
    match (a, b) {
        (Shape::Rect { w: aw, h: ah }, Shape::Rect { w: bw, h: bh }) => {
            rects_overlap(a_pos, aw, ah, b_pos, bw, bh)
        }
        (Shape::Circle { r: ar }, Shape::Circle { r: br }) => {
            let dx = a_pos.x - b_pos.x;
            let dy = a_pos.y - b_pos.y;
            let rr = ar + br;
            dx * dx + dy * dy < rr * rr
        }
        (Shape::Circle { r }, Shape::Rect { w, h }) => circle_rect_overlap(a_pos, r, b_pos, w, h),
        (Shape::Rect { w, h }, Shape::Circle { r }) => circle_rect_overlap(b_pos, r, a_pos, w, h),
    }
}

fn rects_overlap(a: Vec2, aw: f64, ah: f64, b: Vec2, bw: f64, bh: f64) -> bool {
    a.x - aw / 2.0 < b.x + bw / 2.0
        && b.x - bw / 2.0 < a.x + aw / 2.0
        && a.y - ah / 2.0 < b.y + bh / 2.0
        && b.y - bh / 2.0 < a.y + ah / 2.0
}

fn circle_rect_overlap(c: Vec2, r: f64, rect: Vec2, w: f64, h: f64) -> bool {
    let nearest_x = c.x.clamp(rect.x - w / 2.0, rect.x + w / 2.0);
    let nearest_y = c.y.clamp(rect.y - h / 2.0, rect.y + h / 2.0);
    let dx = c.x - nearest_x;
    let dy = c.y - nearest_y;
    dx * dx + dy * dy < r * r
}
