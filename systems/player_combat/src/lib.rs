#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player state machine covering movement, health and the three attack modes.
//!
//! A tick is driven in three calls: [`Player::handle_input`] latches the
//! frame's input, [`Player::advance`] integrates movement, timers and effects,
//! and [`Player::try_attack`] resolves at most one attack against the closest
//! target, pushing a damage command for the world to apply.

mod attack;

use axolotl_core::{
    geometry::foot_hit_box, EffectsTuning, HealthTier, PlayerInput, PlayerTuning, RandomSource,
    Rect, WorldMap,
};
use axolotl_system_effects::{ParticleField, ScreenShake};
use glam::Vec2;

use crate::attack::{AttackState, ChargeState, DashState};

/// Sprite-sheet row the player is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Walking away from the camera.
    Up,
    /// Walking toward the camera; also the charging pose.
    Down,
    /// Walking left.
    Left,
    /// Walking right.
    Right,
    /// Attacking or dashing.
    Attack,
    /// Recoiling from a hit.
    Damaged,
}

impl Facing {
    /// Sprite-sheet row index for the pose.
    #[must_use]
    pub const fn row(&self) -> u8 {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
            Self::Attack => 4,
            Self::Damaged => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct MovementLatch {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    moving: bool,
}

/// The player-controlled axolotl.
#[derive(Clone, Debug)]
pub struct Player {
    tuning: PlayerTuning,
    effects: EffectsTuning,
    sprite: Rect,
    previous: Vec2,
    speed: f32,
    movement: MovementLatch,
    facing: Facing,
    animation_frame: u32,
    frame: u64,
    health: f32,
    health_tier: HealthTier,
    regen_timer: u64,
    attack: AttackState,
    charge: ChargeState,
    dash: DashState,
    glow: f32,
    kills: u32,
    shake: ScreenShake,
    particles: ParticleField,
}

impl Player {
    /// Creates a player at its spawn point with full health.
    #[must_use]
    pub fn new(tuning: PlayerTuning, effects: EffectsTuning) -> Self {
        let sprite = Rect::at(tuning.spawn_position(), Vec2::splat(tuning.size));
        Self {
            previous: sprite.position(),
            speed: tuning.walk_speed,
            movement: MovementLatch::default(),
            facing: Facing::Down,
            animation_frame: 0,
            frame: 0,
            health: tuning.max_health,
            health_tier: HealthTier::FULL,
            regen_timer: 0,
            attack: AttackState::default(),
            charge: ChargeState::default(),
            dash: DashState::default(),
            glow: 0.0,
            kills: 0,
            shake: ScreenShake::new(effects.shake_decay, effects.shake_cutoff),
            particles: ParticleField::new(effects.particle_fade),
            sprite,
            tuning,
            effects,
        }
    }

    /// Restores the player to the state of a brand-new game.
    pub fn reset(&mut self) {
        *self = Self::new(self.tuning.clone(), self.effects.clone());
    }

    /// Latches one tick of input.
    ///
    /// Held directions set the facing in the order up, down, left, right, so
    /// the last held direction wins. Pressing attack cancels a charge in
    /// progress. A charge starts only when neither charging nor attacking, and
    /// a release is only recorded while charging.
    pub fn handle_input(&mut self, input: &PlayerInput) {
        if input.up {
            self.movement.moving = true;
            self.movement.up = true;
            self.facing = Facing::Up;
        }
        if input.down {
            self.movement.moving = true;
            self.movement.down = true;
            self.facing = Facing::Down;
        }
        if input.left {
            self.movement.moving = true;
            self.movement.left = true;
            self.facing = Facing::Left;
        }
        if input.right {
            self.movement.moving = true;
            self.movement.right = true;
            self.facing = Facing::Right;
        }

        if input.attack_pressed {
            self.attack.pressed = true;
            if self.charge.active {
                log::trace!("charge cancelled by basic attack at frame {}", self.frame);
                self.charge.cancel();
            }
        }

        if input.charge_pressed && !self.charge.active && !self.attack.active {
            self.charge.begin(self.frame);
        }
        if input.charge_released && self.charge.active {
            self.charge.release_armed = true;
        }

        if input.dash_pressed {
            self.dash.pressed = true;
        }

        self.speed = if input.sprint {
            self.tuning.sprint_speed
        } else {
            self.tuning.walk_speed
        };
    }

    /// Advances timers, movement, effects and regeneration by one tick.
    pub fn advance(&mut self, map: &WorldMap, rng: &mut impl RandomSource) {
        self.previous = self.sprite.position();

        self.attack.tick();
        self.advance_dash(rng);
        self.advance_charge(rng);

        self.shake.decay();
        self.particles.update();
        self.regenerate();

        let walking = self.movement.moving && !self.dash.active && !self.charge.active;
        if walking {
            self.walk();
            if self.frame % self.tuning.walk_animation_cadence == 1 {
                self.animation_frame += 1;
            }
        } else if self.frame % self.tuning.idle_animation_cadence == 1 && !self.charge.active {
            self.animation_frame += 1;
        }

        self.frame += 1;
        if self.animation_frame >= self.tuning.walk_frames {
            self.animation_frame = 0;
        }
        if !self.movement.moving && self.animation_frame > 1 {
            self.animation_frame = 0;
        }

        let resolved = axolotl_system_collision::resolve(
            &self.hit_box(),
            self.sprite.position(),
            self.previous,
            map,
        );
        self.sprite = self.sprite.with_position(resolved);

        self.movement = MovementLatch::default();
    }

    fn advance_dash(&mut self, rng: &mut impl RandomSource) {
        if !self.dash.active {
            return;
        }

        self.dash.timer = self.dash.timer.saturating_sub(1);
        if self.dash.timer > 0 {
            let step = self.dash.direction * self.tuning.dash_speed;
            self.sprite = self.sprite.with_position(self.sprite.position() + step);
            if self.frame % self.effects.trail_interval == 0 {
                self.particles
                    .dash_trail(self.sprite.center(), self.dash.direction, rng);
            }
            self.facing = Facing::Attack;
        } else {
            self.dash.active = false;
            self.particles.dash_impact(self.sprite.center(), rng);
            self.shake.trigger(self.effects.dash_end_shake);
            log::debug!("dash finished at frame {}", self.frame);
        }
    }

    fn advance_charge(&mut self, rng: &mut impl RandomSource) {
        if !self.charge.active || self.attack.active {
            self.glow = 0.0;
            return;
        }

        self.facing = Facing::Down;
        self.animation_frame = 0;
        self.movement.moving = false;

        let held = self.charge.held(self.frame);
        self.glow = (held as f32 / self.tuning.max_charge as f32).min(1.0);

        if self.frame % self.effects.bubble_interval == 0 {
            self.particles.charge_bubble(self.sprite.center(), rng);
        }
        if held >= self.tuning.max_charge && self.frame % self.effects.ripple_interval == 0 {
            self.shake.trigger(self.effects.full_charge_shake);
        }
    }

    fn regenerate(&mut self) {
        self.regen_timer += 1;
        if self.regen_timer < self.tuning.regen_interval {
            return;
        }

        if self.health < self.tuning.max_health {
            self.health = (self.health + self.tuning.regen_amount).min(self.tuning.max_health);
            self.refresh_health_tier();
        }
        self.regen_timer = 0;
    }

    fn walk(&mut self) {
        let mut step = Vec2::ZERO;
        if self.movement.up {
            step.y -= self.speed;
        }
        if self.movement.down {
            step.y += self.speed;
        }
        if self.movement.left {
            step.x -= self.speed;
        }
        if self.movement.right {
            step.x += self.speed;
        }
        self.sprite = self.sprite.with_position(self.sprite.position() + step);
    }

    /// Removes health, keeping it within `[0, max_health]`.
    ///
    /// Negative and NaN amounts deal no damage.
    pub fn take_damage(&mut self, amount: f32) {
        if amount.is_nan() || amount <= 0.0 {
            return;
        }
        self.health = (self.health - amount).clamp(0.0, self.tuning.max_health);
        self.refresh_health_tier();
    }

    /// Switches to the recoil pose after being struck.
    pub fn mark_damaged(&mut self) {
        self.facing = Facing::Damaged;
    }

    /// Credits the player with one enemy kill.
    pub fn record_kill(&mut self) {
        self.kills = self.kills.saturating_add(1);
    }

    fn refresh_health_tier(&mut self) {
        self.health_tier = HealthTier::from_health(self.health, self.tuning.max_health);
    }

    /// Top-left corner of the sprite rectangle.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.sprite.position()
    }

    /// Position held before the latest tick's movement.
    #[must_use]
    pub fn previous_position(&self) -> Vec2 {
        self.previous
    }

    /// Collision hit-box derived from the current position.
    #[must_use]
    pub fn hit_box(&self) -> Rect {
        foot_hit_box(
            &self.sprite,
            Vec2::splat(self.tuning.hit_box_size),
            self.tuning.hit_box_offset,
        )
    }

    /// Point the camera centres on.
    #[must_use]
    pub fn camera_target(&self) -> Vec2 {
        self.sprite.position() - self.sprite.size() / 2.0
    }

    /// Current sprite pose.
    #[must_use]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Column of the current animation frame.
    #[must_use]
    pub fn animation_frame(&self) -> u32 {
        self.animation_frame
    }

    /// Ticks simulated since the last reset.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current health.
    #[must_use]
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Maximum health.
    #[must_use]
    pub fn max_health(&self) -> f32 {
        self.tuning.max_health
    }

    /// Health-bar tier for the current health.
    #[must_use]
    pub fn health_tier(&self) -> HealthTier {
        self.health_tier
    }

    /// Reports whether the player has run out of health.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Number of enemies killed since the last reset.
    #[must_use]
    pub fn kill_count(&self) -> u32 {
        self.kills
    }

    /// Length of the current basic-attack combo.
    #[must_use]
    pub fn combo(&self) -> u32 {
        self.attack.combo
    }

    /// Progress toward a full charge, available only while charging.
    #[must_use]
    pub fn charge_fraction(&self) -> Option<f32> {
        self.charge.active.then(|| {
            (self.charge.held(self.frame) as f32 / self.tuning.max_charge as f32).min(1.0)
        })
    }

    /// Intensity of the charge aura in `[0, 1]`.
    #[must_use]
    pub fn glow(&self) -> f32 {
        self.glow
    }

    /// Reports whether an attack animation is in progress.
    #[must_use]
    pub fn is_attacking(&self) -> bool {
        self.attack.active
    }

    /// Reports whether a charge is being held.
    #[must_use]
    pub fn is_charging(&self) -> bool {
        self.charge.active
    }

    /// Reports whether a dash is in progress.
    #[must_use]
    pub fn is_dashing(&self) -> bool {
        self.dash.active
    }

    /// Fixed direction of the current or most recent dash.
    #[must_use]
    pub fn dash_direction(&self) -> Vec2 {
        self.dash.direction
    }

    /// Camera shake owned by the player.
    #[must_use]
    pub fn screen_shake(&self) -> &ScreenShake {
        &self.shake
    }

    /// Live water particles owned by the player.
    #[must_use]
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }
}
