use axolotl_core::{geometry::foot_hit_box, Command, EnemyBarTier, EnemyTuning, RandomSource, Rect};
use glam::Vec2;

/// High-level behaviour driving an enemy's movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Drifting between random points near its current position.
    Wandering,
    /// Pursuing the player.
    Chasing,
    /// Running an attack against the player.
    Attacking,
    /// Fleeing from the player.
    Retreating,
    /// Reserved; performs no action.
    Stunned,
}

/// Lifecycle of an enemy slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Simulated, targetable and drawn.
    Alive,
    /// Playing the death animation.
    Dying {
        /// Ticks spent in the death animation so far.
        elapsed: u64,
    },
    /// Finished dying; the slot waits to be refilled by the next spawn.
    Vacant,
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) sprite: Rect,
    pub(crate) previous: Vec2,
    pub(crate) animation_frame: u32,
    pub(crate) animation_counter: u64,
    pub(crate) health: f32,
    pub(crate) bar_tier: EnemyBarTier,
    pub(crate) attacking: bool,
    pub(crate) attack_timer: u64,
    pub(crate) struck: bool,
    pub(crate) last_attack: Option<u64>,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) behavior: Behavior,
    pub(crate) state_timer: u64,
    pub(crate) wander_target: Vec2,
    pub(crate) aggro_radius: f32,
    pub(crate) patrol_radius: f32,
    pub(crate) wander_countdown: u32,
}

impl Enemy {
    pub(crate) fn spawn(
        position: Vec2,
        tuning: &EnemyTuning,
        rng: &mut impl RandomSource,
    ) -> Self {
        let aggro_radius = tuning.aggro_base + rng.unit() * tuning.aggro_spread;
        let patrol_radius = tuning.patrol_base + rng.unit() * tuning.patrol_spread;
        let wander_countdown =
            tuning.wander_countdown_base + rng.below(tuning.wander_countdown_spread);

        Self {
            sprite: Rect::at(position, Vec2::splat(tuning.size)),
            previous: position,
            animation_frame: 0,
            animation_counter: 0,
            health: tuning.max_health,
            bar_tier: EnemyBarTier::FULL,
            attacking: false,
            attack_timer: 0,
            struck: false,
            last_attack: None,
            lifecycle: Lifecycle::Alive,
            behavior: Behavior::Wandering,
            state_timer: 0,
            wander_target: position,
            aggro_radius,
            patrol_radius,
            wander_countdown,
        }
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.sprite.position()
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Alive
    }

    pub(crate) fn hit_box(&self, tuning: &EnemyTuning) -> Rect {
        foot_hit_box(
            &self.sprite,
            Vec2::splat(tuning.hit_box_size),
            tuning.hit_box_offset,
        )
    }

    pub(crate) fn sprite_row(&self) -> u8 {
        match self.lifecycle {
            Lifecycle::Dying { .. } => 4,
            _ if self.attacking => 3,
            _ => 2,
        }
    }

    fn move_by(&mut self, delta: Vec2) {
        self.sprite = self.sprite.with_position(self.position() + delta);
    }

    fn enter(&mut self, behavior: Behavior) {
        log::trace!("enemy behaviour {:?} -> {:?}", self.behavior, behavior);
        self.behavior = behavior;
    }

    pub(crate) fn step_animation(&mut self, tuning: &EnemyTuning) {
        if self.animation_counter % tuning.animation_cadence == 1 {
            self.animation_frame += 1;
        }
        let frames = match self.lifecycle {
            Lifecycle::Dying { .. } => tuning.dying_frames,
            _ => tuning.alive_frames,
        };
        if self.animation_frame >= frames {
            self.animation_frame = 0;
        }
        self.animation_counter += 1;
    }

    /// Runs one tick of behaviour; `frame` is the pool's global frame.
    pub(crate) fn think(
        &mut self,
        player: Vec2,
        frame: u64,
        tuning: &EnemyTuning,
        rng: &mut impl RandomSource,
        out: &mut Vec<Command>,
    ) {
        let distance = self.position().distance(player);
        self.state_timer += 1;

        match self.behavior {
            Behavior::Wandering => self.wander(distance, tuning, rng),
            Behavior::Chasing => self.chase(player, distance, frame, tuning, rng),
            Behavior::Attacking => self.attack(frame, tuning, rng, out),
            Behavior::Retreating => self.retreat(player, distance, tuning, rng),
            Behavior::Stunned => {}
        }
    }

    fn wander(&mut self, distance: f32, tuning: &EnemyTuning, rng: &mut impl RandomSource) {
        self.wander_countdown = self.wander_countdown.saturating_sub(1);
        if self.wander_countdown == 0 {
            let radius = rng.unit() * self.patrol_radius;
            let heading = Vec2::new(
                rng.int_inclusive(-1, 1) as f32,
                rng.int_inclusive(-1, 1) as f32,
            );
            self.wander_target = self.position() + heading * radius;
            self.wander_countdown =
                tuning.wander_countdown_base + rng.below(tuning.wander_countdown_spread);
        }

        let offset = self.wander_target - self.position();
        let length = offset.length();
        if length > tuning.arrival_threshold {
            self.move_by(offset / length * tuning.wander_speed);
        }

        if distance < self.aggro_radius {
            self.enter(Behavior::Chasing);
            self.state_timer = 0;
        }
    }

    fn chase(
        &mut self,
        player: Vec2,
        distance: f32,
        frame: u64,
        tuning: &EnemyTuning,
        rng: &mut impl RandomSource,
    ) {
        let cooled_down = self
            .last_attack
            .map_or(true, |last| frame.saturating_sub(last) >= tuning.attack_cooldown);

        if distance <= tuning.attack_range && cooled_down {
            self.enter(Behavior::Attacking);
            self.state_timer = 0;
        } else if distance < tuning.chase_max_distance && distance > tuning.chase_min_distance {
            let direction = (player - self.position()).normalize_or_zero();
            let jitter = rng.int_inclusive(-10, 10) as f32 / 10.0 * tuning.chase_jitter;
            let speed = tuning.chase_speed_base + rng.unit() * tuning.chase_speed_spread;
            self.move_by((direction + Vec2::splat(jitter)) * speed);
        } else if distance > self.aggro_radius * tuning.leash_factor {
            self.enter(Behavior::Wandering);
            self.wander_countdown = tuning.leash_countdown;
        }

        if self.health < tuning.max_health * tuning.retreat_health_fraction
            && rng.chance(tuning.retreat_chance_percent)
        {
            self.enter(Behavior::Retreating);
            self.state_timer = 0;
        }
    }

    fn attack(
        &mut self,
        frame: u64,
        tuning: &EnemyTuning,
        rng: &mut impl RandomSource,
        out: &mut Vec<Command>,
    ) {
        if !self.attacking {
            self.last_attack = Some(frame);
            self.attacking = true;
            self.attack_timer = tuning.attack_duration;
            self.struck = false;
        }

        self.attack_timer = self.attack_timer.saturating_sub(1);
        let elapsed = tuning.attack_duration - self.attack_timer;
        if !self.struck
            && elapsed >= tuning.strike_window_start
            && elapsed <= tuning.strike_window_end
        {
            out.push(Command::DamagePlayer {
                amount: tuning.attack_damage,
            });
            self.struck = true;
        }

        if self.attack_timer == 0 {
            self.attacking = false;
            let next = if rng.chance(tuning.pursue_chance_percent) {
                Behavior::Chasing
            } else {
                Behavior::Retreating
            };
            self.enter(next);
            self.state_timer = 0;
        }
    }

    fn retreat(
        &mut self,
        player: Vec2,
        distance: f32,
        tuning: &EnemyTuning,
        rng: &mut impl RandomSource,
    ) {
        if distance < tuning.retreat_radius {
            let direction = (self.position() - player).normalize_or_zero();
            self.move_by(direction * tuning.retreat_speed);
        } else {
            self.enter(Behavior::Wandering);
            self.wander_countdown =
                tuning.regroup_countdown_base + rng.below(tuning.regroup_countdown_spread);
        }

        if self.state_timer > tuning.retreat_budget {
            self.enter(Behavior::Chasing);
            self.state_timer = 0;
        }
    }
}
