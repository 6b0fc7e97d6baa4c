#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Axolotl Arena simulation.
//!
//! This crate defines the message surface that connects the headless harness,
//! the authoritative world, and the per-subsystem state machines. The harness
//! submits [`Command::Tick`] values carrying one frame of [`PlayerInput`], the
//! world executes commands via its `apply` entry point, and systems respond by
//! pushing further commands (damage, spawns) that the world applies
//! immediately. Every applied command is reported back as [`Event`] values.

pub mod geometry;
pub mod health;
pub mod map;
pub mod random;
pub mod tuning;

use glam::Vec2;

pub use geometry::Rect;
pub use health::{EnemyBarTier, HealthTier};
pub use map::{MapError, Tile, WorldMap};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use tuning::{ConfigError, EffectsTuning, EnemyTuning, PlayerTuning, SpawnTuning, Tuning};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one tick using the provided input snapshot.
    Tick {
        /// Input signals sampled by the adapter for this tick.
        input: PlayerInput,
    },
    /// Places a fresh enemy at the provided world position.
    SpawnEnemy {
        /// Top-left corner of the enemy's sprite rectangle.
        position: Vec2,
    },
    /// Deals damage to the player.
    DamagePlayer {
        /// Health removed from the player before clamping.
        amount: f32,
    },
    /// Deals damage to a single enemy slot.
    DamageEnemy {
        /// Slot targeted by the attack.
        enemy: EnemyId,
        /// Health removed from the enemy before clamping.
        amount: f32,
    },
    /// Restores the player, the enemy pool and session statistics to a new game.
    ResetSession,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced by one tick.
    TimeAdvanced {
        /// Number of ticks survived in the current session.
        survival_ticks: u64,
    },
    /// Confirms that a new enemy occupies the provided slot.
    EnemySpawned {
        /// Slot assigned to the enemy.
        enemy: EnemyId,
        /// Top-left corner of the enemy's sprite rectangle.
        position: Vec2,
    },
    /// Reports that the player launched an attack.
    AttackLaunched {
        /// Attack mode that resolved this tick.
        kind: AttackKind,
    },
    /// Reports that the player lost health.
    PlayerDamaged {
        /// Damage requested by the attacker.
        amount: f32,
        /// Player health remaining after clamping.
        remaining: f32,
    },
    /// Reports that an enemy lost health.
    EnemyDamaged {
        /// Slot that received the damage.
        enemy: EnemyId,
        /// Damage requested by the attacker.
        amount: f32,
        /// Enemy health remaining after clamping.
        remaining: f32,
    },
    /// Announces that an enemy's health reached zero and its death animation began.
    EnemyKilled {
        /// Slot whose occupant died.
        enemy: EnemyId,
    },
    /// Announces that an enemy finished its death animation and its slot is free for reuse.
    EnemyRecycled {
        /// Slot that became vacant.
        enemy: EnemyId,
    },
    /// Reports that the player has no health left; the tick was not simulated.
    PlayerDefeated,
    /// Confirms that the session was restored to a new game.
    SessionReset,
}

/// Stable identifier of an enemy slot inside the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided slot index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Slot index suitable for addressing the pool's backing storage.
    #[must_use]
    pub fn index(&self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}

/// Attack modes available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackKind {
    /// Quick strike subject to a cooldown and combo chaining.
    Basic,
    /// Held attack whose damage scales with the time spent charging.
    Charge,
    /// Fixed-direction lunge toward the target.
    Dash,
}

/// Input snapshot gathered by adapters before advancing a tick.
///
/// Directional and sprint signals are level-triggered (held); attack, charge
/// and dash signals are edge-triggered and must only be set on the tick the
/// key transitioned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    /// Whether the move-up control is held.
    pub up: bool,
    /// Whether the move-down control is held.
    pub down: bool,
    /// Whether the move-left control is held.
    pub left: bool,
    /// Whether the move-right control is held.
    pub right: bool,
    /// Whether the basic attack control was pressed this tick.
    pub attack_pressed: bool,
    /// Whether the charge control was pressed this tick.
    pub charge_pressed: bool,
    /// Whether the charge control was released this tick.
    pub charge_released: bool,
    /// Whether the dash control was pressed this tick.
    pub dash_pressed: bool,
    /// Whether the speed modifier is held.
    pub sprint: bool,
}

impl PlayerInput {
    /// Input with no signals asserted.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: false,
            attack_pressed: false,
            charge_pressed: false,
            charge_released: false,
            dash_pressed: false,
            sprint: false,
        }
    }

    /// Reports whether any directional control is held.
    #[must_use]
    pub const fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Target handed to the player's attack resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    /// Slot of the enemy being attacked.
    pub enemy: EnemyId,
    /// Top-left corner of the enemy's sprite rectangle.
    pub position: Vec2,
}

#[cfg(test)]
mod tests {
    use super::{EnemyId, PlayerInput};

    #[test]
    fn enemy_id_exposes_slot_index() {
        let id = EnemyId::new(7);
        assert_eq!(id.get(), 7);
        assert_eq!(id.index(), 7);
    }

    #[test]
    fn idle_input_has_no_direction() {
        assert!(!PlayerInput::idle().any_direction());
        assert_eq!(PlayerInput::idle(), PlayerInput::default());

        let input = PlayerInput {
            left: true,
            ..PlayerInput::idle()
        };
        assert!(input.any_direction());
    }
}
