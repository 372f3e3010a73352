//! Damped spring used for every animated quantity.
//!
//! Retargeting keeps the current value and velocity, so a new target always
//! continues from wherever the previous motion had got to.

use std::time::Duration;

/// Spring stiffness (force per unit of displacement).
pub const STIFFNESS: f32 = 350.0;
/// Damping (force per unit of velocity). Slightly over critical with unit mass.
pub const DAMPING: f32 = 40.0;

/// Integration step; longer frames are split into substeps of this size.
const SUBSTEP: f32 = 1.0 / 240.0;
const REST_DELTA: f32 = 0.01;
const REST_SPEED: f32 = 0.01;

/// One animated scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// A spring resting at `value`.
    pub const fn at(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
        }
    }

    /// A spring at `from` heading for `to`.
    pub const fn from_to(from: f32, to: f32) -> Self {
        Self {
            value: from,
            velocity: 0.0,
            target: to,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }

    /// Integrate for `dt` (semi-implicit Euler).
    pub fn step(&mut self, dt: Duration) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let mut remaining = dt.as_secs_f32();
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP);
            let force = -STIFFNESS * (self.value - self.target) - DAMPING * self.velocity;
            self.velocity += force * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }
}
