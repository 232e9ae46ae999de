//! Movement actions: timed displacement sequences, optionally looping.

use super::entity::Vec2;

/// One step of an action sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionStep {
    /// Displace by (dx, dy) over `seconds`. Zero seconds jumps instantly.
    MoveBy { dx: f64, dy: f64, seconds: f64 },
    /// Remove the entity from the stage when reached.
    Despawn,
}

impl ActionStep {
    pub fn move_by(dx: f64, dy: f64, seconds: f64) -> Self {
        ActionStep::MoveBy { dx, dy, seconds }
    }
}

/// A running action: steps executed in order. A repeating action wraps
/// back to its first step forever; a one-shot action stops after the last.
#[derive(Debug, Clone)]
pub struct Action {
    steps: Vec<ActionStep>,
    repeats: bool,
    current: usize,
    /// Seconds already spent in the current step.
    elapsed: f64,
}

/// What an `advance` call produced.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ActionProgress {
    pub displacement: Vec2,
    pub despawn: bool,
}

impl Action {
    pub fn once(steps: Vec<ActionStep>) -> Self {
        Self {
            steps,
            repeats: false,
            current: 0,
            elapsed: 0.0,
        }
    }

    pub fn repeating(steps: Vec<ActionStep>) -> Self {
        Self {
            steps,
            repeats: true,
            current: 0,
            elapsed: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        !self.repeats && self.current >= self.steps.len()
    }

    /// Advance by `dt` seconds of (already scaled) time. Instant steps
    /// consume no time, so several steps can complete in one call.
    pub(crate) fn advance(&mut self, mut dt: f64) -> ActionProgress {
        let mut progress = ActionProgress {
            displacement: Vec2::ZERO,
            despawn: false,
        };
        if dt <= 0.0 {
            return progress;
        }

        // Caps the work per call so an all-instant repeating sequence
        // cannot spin forever.
        let mut budget = self.steps.len() * 2 + 4;
        while budget > 0 {
            budget -= 1;
            let Some(step) = self.steps.get(self.current).copied() else {
                break;
            };
            match step {
                ActionStep::MoveBy { dx, dy, seconds } => {
                    if seconds <= 0.0 {
                        progress.displacement += Vec2::new(dx, dy);
                        self.next_step();
                        continue;
                    }
                    let remaining = (seconds - self.elapsed).max(0.0);
                    if dt < remaining {
                        let f = dt / seconds;
                        progress.displacement += Vec2::new(dx * f, dy * f);
                        self.elapsed += dt;
                        break;
                    }
                    let f = remaining / seconds;
                    progress.displacement += Vec2::new(dx * f, dy * f);
                    dt -= remaining;
                    self.next_step();
                }
                ActionStep::Despawn => {
                    progress.despawn = true;
                    break;
                }
            }
        }
        progress
    }

    fn next_step(&mut self) {
        self.elapsed = 0.0;
        self.current += 1;
        if self.repeats && self.current >= self.steps.len() {
            self.current = 0;
        }
    }
}
