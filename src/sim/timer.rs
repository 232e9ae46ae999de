//! Repeating interval timer with an explicit cancel/restart handle.

/// Fires every `interval` seconds of accumulated time. A canceled timer
/// accumulates nothing until restarted; restarting always resets the
/// accumulator, so there is never a second timer to double-fire.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: f64,
    elapsed: f64,
    armed: bool,
}

impl IntervalTimer {
    /// A new timer starts disarmed; call `restart` to arm it.
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            armed: false,
        }
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Advance by `dt` seconds. Returns how many times the timer fired.
    pub fn tick(&mut self, dt: f64) -> u32 {
        if !self.armed || dt <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fires = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fires += 1;
        }
        fires
    }
}
