//! Per-frame timers.
//!
//! Only linear state is modeled: a value sliding toward a target at a fixed
//! rate, and a square-wave blink for text carets. Both advance exclusively
//! through `update(dt)`, never from the wall clock.

/// A value moving linearly toward a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    /// Current value.
    current: f32,
    /// Target value.
    target: f32,
    /// Time to cover a distance of 1.0 (seconds).
    duration: f32,
}

impl Tween {
    /// Default duration.
    pub const DEFAULT_DURATION: f32 = 0.08;

    /// Creates a tween resting at `value`.
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self {
            current: value,
            target: value,
            duration: Self::DEFAULT_DURATION,
        }
    }

    /// Sets the duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Returns the current value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.current
    }

    /// Returns the target value.
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.target
    }

    /// Returns true once the value has reached its target.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        (self.current - self.target).abs() <= f32::EPSILON
    }

    /// Sets a new target, moving from the current value.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jumps straight to `value`.
    pub fn snap(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    /// Advances by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.duration <= 0.0 {
            self.current = self.target;
            return;
        }
        let step = dt.max(0.0) / self.duration;
        let delta = self.target - self.current;
        if delta.abs() <= step {
            self.current = self.target;
        } else {
            self.current += step.copysign(delta);
        }
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Square-wave blink timer: visible for the first half of every period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blink {
    elapsed: f32,
    period: f32,
}

impl Blink {
    /// Default period (one second: 0.5s on, 0.5s off).
    pub const DEFAULT_PERIOD: f32 = 1.0;

    /// Creates a blink timer in its visible phase.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elapsed: 0.0,
            period: Self::DEFAULT_PERIOD,
        }
    }

    /// Accumulates `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
        if self.period > 0.0 && self.elapsed >= self.period * 1024.0 {
            self.elapsed %= self.period;
        }
    }

    /// Restarts in the visible phase.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Returns true during the "on" half of the period.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        if self.period <= 0.0 {
            return true;
        }
        (self.elapsed % self.period) < self.period * 0.5
    }
}

impl Default for Blink {
    fn default() -> Self {
        Self::new()
    }
}
