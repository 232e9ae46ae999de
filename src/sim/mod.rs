//! The stage: a minimal scene service with bodies, actions, and contacts.
//!
//! Entities live in one arena. Each `advance` runs actions, integrates
//! dynamic bodies, and reports every contact that began this step. A
//! global time scale of zero freezes all of it; timers are deliberately
//! outside the stage and keep running.

pub mod action;
pub mod entity;
pub mod timer;

pub use action::{Action, ActionStep};
pub use entity::{shapes_overlap, Body, CollisionTag, Entity, EntityId, Shape, Sprite, Vec2};
pub use timer::IntervalTimer;

use std::collections::HashSet;

/// Two tagged bodies began overlapping this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
    pub tag_a: CollisionTag,
    pub tag_b: CollisionTag,
}

pub struct Stage {
    entities: Vec<Entity>,
    next_id: u32,
    gravity: Vec2,
    time_scale: f64,
    clock: f64,
    /// Pairs currently overlapping, so a contact is reported only on begin.
    overlapping: HashSet<(EntityId, EntityId)>,
}

impl Stage {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            entities: Vec::new(),
            next_id: 0,
            gravity,
            time_scale: 1.0,
            clock: 0.0,
            overlapping: HashSet::new(),
        }
    }

    /// Add an entity to the arena. Ids are assigned here and stay unique
    /// for the life of the stage, across `clear` calls included.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        entity.id = id;
        self.entities.push(entity);
        id
    }

    pub fn remove(&mut self, id: EntityId) {
        self.entities.retain(|e| e.id != id);
        self.overlapping.retain(|&(a, b)| a != id && b != id);
    }

    /// Remove every entity and reset the clock and overlap tracking.
    /// Time scale is left alone; the caller decides that transition.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.overlapping.clear();
        self.clock = 0.0;
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn count_sprite(&self, sprite: Sprite) -> usize {
        self.entities.iter().filter(|e| e.sprite == sprite).count()
    }

    pub fn count_tag(&self, tag: CollisionTag) -> usize {
        self.entities
            .iter()
            .filter(|e| e.body.as_ref().is_some_and(|b| b.tag == tag))
            .count()
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Accumulated scaled seconds. Drives the renderer's wing animation,
    /// so it freezes with everything else at time scale zero.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn set_dynamic(&mut self, id: EntityId, dynamic: bool) {
        if let Some(body) = self.body_mut(id) {
            body.dynamic = dynamic;
        }
    }

    pub fn set_velocity(&mut self, id: EntityId, velocity: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.velocity = velocity;
        }
    }

    /// Kick a body: velocity changes by impulse / mass.
    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) {
        if let Some(body) = self.body_mut(id) {
            debug_assert!(body.mass > 0.0);
            body.velocity += impulse * (1.0 / body.mass);
        }
    }

    pub fn set_position(&mut self, id: EntityId, pos: Vec2) {
        if let Some(e) = self.entity_mut(id) {
            e.pos = pos;
        }
    }

    pub fn set_label_text(&mut self, id: EntityId, text: String) {
        if let Some(e) = self.entity_mut(id) {
            e.label = Some(text);
        }
    }

    fn body_mut(&mut self, id: EntityId) -> Option<&mut entity::Body> {
        self.entity_mut(id).and_then(|e| e.body.as_mut())
    }

    /// Advance the stage by `dt` seconds of wall time. Actions run first
    /// (a one-shot that completes is dropped), then dynamic bodies
    /// integrate, then contacts are swept on the final positions. Returns
    /// the contacts that began this step.
    pub fn advance(&mut self, dt: f64) -> Vec<Contact> {
        let scaled = dt * self.time_scale;
        if scaled > 0.0 {
            self.clock += scaled;

            let mut despawned: Vec<EntityId> = Vec::new();
            for e in &mut self.entities {
                if let Some(action) = e.action.as_mut() {
                    let progress = action.advance(scaled);
                    e.pos += progress.displacement;
                    if progress.despawn {
                        despawned.push(e.id);
                    } else if action.is_finished() {
                        e.action = None;
                    }
                }
            }
            for id in despawned {
                self.remove(id);
            }

            let gravity = self.gravity;
            for e in &mut self.entities {
                if let Some(body) = e.body.as_mut() {
                    if body.dynamic {
                        body.velocity += gravity * scaled;
                        e.pos += body.velocity * scaled;
                    }
                }
            }
        }
        self.sweep_contacts()
    }

    /// A pair is eligible when both bodies detect contact and at least one
    /// is dynamic. Static pairs never report, so obstacles sliding through
    /// a not-yet-tapped player (or each other) stay silent.
    fn sweep_contacts(&mut self) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let mut seen: HashSet<(EntityId, EntityId)> = HashSet::new();
        for i in 0..self.entities.len() {
            for j in (i + 1)..self.entities.len() {
                let ea = &self.entities[i];
                let eb = &self.entities[j];
                let (Some(ba), Some(bb)) = (ea.body.as_ref(), eb.body.as_ref()) else {
                    continue;
                };
                if !ba.detects_contact || !bb.detects_contact {
                    continue;
                }
                if !ba.dynamic && !bb.dynamic {
                    continue;
                }
                if !shapes_overlap(ba.shape, ea.pos, bb.shape, eb.pos) {
                    continue;
                }
                let key = pair_key(ea.id, eb.id);
                seen.insert(key);
                if self.overlapping.insert(key) {
                    contacts.push(Contact {
                        a: ea.id,
                        b: eb.id,
                        tag_a: ba.tag,
                        tag_b: bb.tag,
                    });
                }
            }
        }
        // Pairs that separated (or despawned) may report again later.
        self.overlapping.retain(|k| seen.contains(k));
        contacts
    }
}

fn pair_key(a: EntityId, b: EntityId) -> (EntityId, EntityId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
