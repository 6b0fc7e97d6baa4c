use axolotl_core::{AttackKind, Command, RandomSource, Target};
use glam::Vec2;

use crate::{Facing, Player};

/// Basic attack flags, timers and combo bookkeeping.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct AttackState {
    pub(crate) pressed: bool,
    pub(crate) active: bool,
    pub(crate) timer: u64,
    pub(crate) last_attack: Option<u64>,
    pub(crate) last_combo: Option<u64>,
    pub(crate) combo: u32,
}

impl AttackState {
    pub(crate) fn tick(&mut self) {
        if !self.active {
            return;
        }
        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            self.active = false;
        }
    }

    fn cooldown_elapsed(&self, frame: u64, cooldown: u64) -> bool {
        self.last_attack
            .map_or(true, |last| frame.saturating_sub(last) >= cooldown)
    }

    fn within_combo_window(&self, frame: u64, window: u64) -> bool {
        self.last_combo
            .is_some_and(|last| frame.saturating_sub(last) <= window)
    }

    fn begin(&mut self, frame: u64, duration: u64) {
        self.active = true;
        self.timer = duration;
        self.last_attack = Some(frame);
    }
}

/// Charge latch: charging starts on press and fires on the next release.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ChargeState {
    pub(crate) active: bool,
    pub(crate) release_armed: bool,
    pub(crate) started_at: u64,
}

impl ChargeState {
    pub(crate) fn begin(&mut self, frame: u64) {
        self.active = true;
        self.release_armed = false;
        self.started_at = frame;
    }

    pub(crate) fn cancel(&mut self) {
        self.active = false;
        self.release_armed = false;
    }

    pub(crate) fn held(&self, frame: u64) -> u64 {
        frame.saturating_sub(self.started_at)
    }
}

/// Dash request, timer and locked direction.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DashState {
    pub(crate) pressed: bool,
    pub(crate) active: bool,
    pub(crate) timer: u64,
    pub(crate) direction: Vec2,
}

impl Player {
    /// Resolves at most one attack against `target`.
    ///
    /// Attack modes are tried in the order basic, charge, dash. A successful
    /// basic or charge attack pushes a [`Command::DamageEnemy`] into `out`; a
    /// dash only moves the player. Pending basic and dash presses are consumed
    /// by every call whatever the outcome, while an armed charge release with
    /// no target at all stays armed for the next call.
    pub fn try_attack(
        &mut self,
        target: Option<Target>,
        rng: &mut impl RandomSource,
        out: &mut Vec<Command>,
    ) -> Option<AttackKind> {
        let outcome = target.and_then(|target| self.resolve_attack(target, rng, out));
        self.attack.pressed = false;
        self.dash.pressed = false;
        outcome
    }

    fn resolve_attack(
        &mut self,
        target: Target,
        rng: &mut impl RandomSource,
        out: &mut Vec<Command>,
    ) -> Option<AttackKind> {
        let origin = self.sprite.position();
        let distance = origin.distance(target.position);

        if self.attack.pressed
            && self
                .attack
                .cooldown_elapsed(self.frame, self.tuning.attack_cooldown)
            && !self.attack.active
            && distance <= self.tuning.attack_range
        {
            self.basic_attack(target, out);
            return Some(AttackKind::Basic);
        }

        if self.charge.release_armed && self.charge.active && !self.attack.active {
            if distance <= self.tuning.charge_range() {
                self.charge_attack(target, rng, out);
                return Some(AttackKind::Charge);
            }
            log::trace!("charge released out of range ({distance:.1} units), cancelling");
            self.charge.cancel();
        }

        if self.dash.pressed
            && !self.dash.active
            && !self.attack.active
            && !self.charge.active
            && distance <= self.tuning.dash_radius
        {
            self.dash.active = true;
            self.dash.timer = self.tuning.dash_duration;
            self.dash.direction = (target.position - origin).normalize_or_zero();
            self.particles.dash_wave(self.sprite.center());
            self.shake.trigger(self.effects.dash_start_shake);
            log::debug!(
                "dash toward enemy {} started at frame {}",
                target.enemy.get(),
                self.frame
            );
            return Some(AttackKind::Dash);
        }

        None
    }

    fn basic_attack(&mut self, target: Target, out: &mut Vec<Command>) {
        let mut damage = self.tuning.attack_damage;
        if self
            .attack
            .within_combo_window(self.frame, self.tuning.combo_window)
        {
            self.attack.combo += 1;
            damage += self.tuning.combo_bonus * self.attack.combo as f32;
        } else {
            self.attack.combo = 1;
        }
        self.attack.last_combo = Some(self.frame);

        out.push(Command::DamageEnemy {
            enemy: target.enemy,
            amount: damage,
        });
        self.attack.begin(self.frame, self.tuning.attack_duration);
        self.facing = Facing::Attack;
        log::debug!(
            "basic attack on enemy {} for {damage:.2} (combo {})",
            target.enemy.get(),
            self.attack.combo
        );
    }

    fn charge_attack(
        &mut self,
        target: Target,
        rng: &mut impl RandomSource,
        out: &mut Vec<Command>,
    ) {
        let held = self.charge.held(self.frame).min(self.tuning.max_charge);
        let damage = if held >= self.tuning.min_charge {
            let fraction = held as f32 / self.tuning.max_charge as f32;
            self.tuning.attack_damage * (1.0 + fraction * self.tuning.charge_multiplier)
        } else {
            self.tuning.attack_damage
        };

        out.push(Command::DamageEnemy {
            enemy: target.enemy,
            amount: damage,
        });
        self.charge.cancel();
        self.attack.begin(
            self.frame,
            self.tuning.attack_duration + self.tuning.charge_extra_duration,
        );
        self.facing = Facing::Attack;
        self.particles.charge_explosion(self.sprite.center(), rng);
        self.shake.trigger(self.effects.charge_release_shake);
        log::debug!(
            "charge released on enemy {} after {held} ticks for {damage:.2}",
            target.enemy.get()
        );
    }
}
