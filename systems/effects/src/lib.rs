#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cosmetic water effects attached to the player: particles and screen shake.
//!
//! Nothing in this crate feeds back into gameplay. The player state machine
//! triggers emitters and shake impulses; renderers read the resulting state.

mod particles;
mod shake;

pub use particles::{Color, Particle, ParticleField, ParticleShape};
pub use shake::ScreenShake;

/// Number of concentric aura rings drawn around a charging player.
///
/// Rings appear once the glow exceeds 0.3, 0.6 and 0.9 respectively.
#[must_use]
pub fn aura_rings(glow: f32) -> u8 {
    [0.3, 0.6, 0.9]
        .iter()
        .filter(|threshold| glow > **threshold)
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::aura_rings;

    #[test]
    fn aura_rings_follow_glow_thresholds() {
        assert_eq!(aura_rings(0.0), 0);
        assert_eq!(aura_rings(0.3), 0);
        assert_eq!(aura_rings(0.45), 1);
        assert_eq!(aura_rings(0.75), 2);
        assert_eq!(aura_rings(1.0), 3);
    }
}
