use axolotl_core::RandomSource;
use glam::Vec2;

/// Decaying camera shake magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenShake {
    magnitude: f32,
    decay: f32,
    cutoff: f32,
}

impl ScreenShake {
    /// Creates a resting shake that multiplies by `decay` each tick and snaps
    /// to zero below `cutoff`.
    #[must_use]
    pub const fn new(decay: f32, cutoff: f32) -> Self {
        Self {
            magnitude: 0.0,
            decay,
            cutoff,
        }
    }

    /// Current shake magnitude.
    #[must_use]
    pub const fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Replaces the current magnitude with a fresh impulse.
    pub fn trigger(&mut self, magnitude: f32) {
        self.magnitude = magnitude.max(0.0);
    }

    /// Applies one tick of decay.
    pub fn decay(&mut self) {
        if self.magnitude <= 0.0 {
            return;
        }
        self.magnitude *= self.decay;
        if self.magnitude < self.cutoff {
            self.magnitude = 0.0;
        }
    }

    /// Random camera offset within the current magnitude on each axis.
    ///
    /// Each call draws a new offset; resting shake always yields zero.
    pub fn offset(&self, rng: &mut impl RandomSource) -> Vec2 {
        if self.magnitude <= 0.0 {
            return Vec2::ZERO;
        }
        let bound = self.magnitude as i32;
        Vec2::new(
            rng.int_inclusive(-bound, bound) as f32,
            rng.int_inclusive(-bound, bound) as f32,
        )
    }
}
