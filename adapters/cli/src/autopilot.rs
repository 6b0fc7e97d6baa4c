//! Scripted player used by the headless harness.

use axolotl_core::{PlayerInput, RandomSource};
use axolotl_system_enemy_ai::Lifecycle;
use axolotl_world::{query, World};
use glam::Vec2;

const DEAD_ZONE: f32 = 4.0;
const CHARGE_CYCLE: u64 = 300;
const CHARGE_PRESS: u64 = 200;
const CHARGE_RELEASE: u64 = 250;
const DASH_CYCLE: u64 = 180;
const DASH_PRESS: u64 = 90;

/// Steers toward the closest living enemy and fights on a fixed schedule.
///
/// Basic attacks are pressed whenever an enemy is in range; once per charge
/// cycle a charge is held and released, and once per dash cycle a dash is
/// requested.
#[derive(Debug, Default)]
pub(crate) struct Autopilot {
    tick: u64,
}

impl Autopilot {
    /// Chooses the input for the next tick.
    pub(crate) fn plan<R: RandomSource>(&mut self, world: &World<R>) -> PlayerInput {
        let tick = self.tick;
        self.tick += 1;

        let player = query::player(world);
        let Some(target) = closest_enemy(world, player.position) else {
            return PlayerInput::idle();
        };

        let delta = target - player.position;
        let attack_range = query::tuning(world).player.attack_range;
        let charge_phase = tick % CHARGE_CYCLE;
        let charging_window = (CHARGE_PRESS..=CHARGE_RELEASE).contains(&charge_phase);
        let in_range = delta.length() <= attack_range;

        PlayerInput {
            up: delta.y < -DEAD_ZONE,
            down: delta.y > DEAD_ZONE,
            left: delta.x < -DEAD_ZONE,
            right: delta.x > DEAD_ZONE,
            attack_pressed: in_range && !charging_window,
            charge_pressed: charge_phase == CHARGE_PRESS,
            charge_released: charge_phase == CHARGE_RELEASE,
            dash_pressed: tick % DASH_CYCLE == DASH_PRESS && !in_range,
            sprint: delta.length() > attack_range * 4.0,
        }
    }

    /// Restarts the schedule after a session reset.
    pub(crate) fn reset(&mut self) {
        self.tick = 0;
    }
}

fn closest_enemy<R: RandomSource>(world: &World<R>, from: Vec2) -> Option<Vec2> {
    query::enemy_view(world)
        .iter()
        .filter(|enemy| enemy.lifecycle == Lifecycle::Alive)
        .map(|enemy| enemy.position)
        .min_by(|a, b| from.distance(*a).total_cmp(&from.distance(*b)))
}
