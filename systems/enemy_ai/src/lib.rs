#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pooled jellyfish enemies and the behaviour state machine that drives them.
//!
//! Every enemy lives in a stable slot addressed by [`EnemyId`]. Killed enemies
//! play their death animation in place and then leave a vacant slot behind,
//! which the next spawn refills before the pool grows.

mod enemy;

use axolotl_core::{
    Command, EnemyBarTier, EnemyId, EnemyTuning, Event, RandomSource, Rect, Target, WorldMap,
};
use glam::Vec2;

use crate::enemy::Enemy;
pub use crate::enemy::{Behavior, Lifecycle};

/// Read-only state of a single occupied enemy slot.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Slot occupied by the enemy.
    pub id: EnemyId,
    /// Top-left corner of the sprite rectangle.
    pub position: Vec2,
    /// Collision hit-box.
    pub hit_box: Rect,
    /// Remaining health.
    pub health: f32,
    /// Maximum health.
    pub max_health: f32,
    /// Floating health-bar tier.
    pub bar_tier: EnemyBarTier,
    /// Current behaviour.
    pub behavior: Behavior,
    /// Lifecycle stage; never [`Lifecycle::Vacant`] in snapshots.
    pub lifecycle: Lifecycle,
    /// Whether an attack is in progress.
    pub attacking: bool,
    /// Column of the current animation frame.
    pub animation_frame: u32,
    /// Sprite-sheet row for the current pose.
    pub sprite_row: u8,
}

/// Slot-stable collection of enemies sharing one global frame counter.
#[derive(Clone, Debug)]
pub struct EnemyPool {
    tuning: EnemyTuning,
    enemies: Vec<Enemy>,
    frame: u64,
}

impl EnemyPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new(tuning: EnemyTuning) -> Self {
        Self {
            tuning,
            enemies: Vec::new(),
            frame: 0,
        }
    }

    /// Removes every enemy and rewinds the global frame counter.
    pub fn reset(&mut self) {
        self.enemies.clear();
        self.frame = 0;
    }

    /// Places a fresh enemy at `position`, reusing the lowest vacant slot.
    pub fn spawn(&mut self, position: Vec2, rng: &mut impl RandomSource) -> EnemyId {
        let enemy = Enemy::spawn(position, &self.tuning, rng);
        let vacant = self
            .enemies
            .iter()
            .position(|enemy| enemy.lifecycle == Lifecycle::Vacant);

        let index = match vacant {
            Some(index) => {
                self.enemies[index] = enemy;
                index
            }
            None => {
                self.enemies.push(enemy);
                self.enemies.len() - 1
            }
        };
        id_for(index)
    }

    /// Advances every occupied slot by one tick.
    ///
    /// Live enemies run their behaviour and collide with the ground; strikes
    /// against the player are pushed into `out`. Dying enemies progress their
    /// death animation and report [`Event::EnemyRecycled`] once it completes.
    pub fn advance(
        &mut self,
        player_position: Vec2,
        map: &WorldMap,
        rng: &mut impl RandomSource,
        out: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) {
        self.frame += 1;

        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            if enemy.lifecycle == Lifecycle::Vacant {
                continue;
            }

            enemy.previous = enemy.position();
            enemy.step_animation(&self.tuning);

            if let Lifecycle::Dying { elapsed } = enemy.lifecycle {
                let elapsed = elapsed + 1;
                if elapsed >= self.tuning.death_duration {
                    enemy.lifecycle = Lifecycle::Vacant;
                    log::debug!("enemy {index} finished dying; slot vacated");
                    out_events.push(Event::EnemyRecycled {
                        enemy: id_for(index),
                    });
                } else {
                    enemy.lifecycle = Lifecycle::Dying { elapsed };
                }
                continue;
            }

            enemy.think(player_position, self.frame, &self.tuning, rng, out);

            let resolved = axolotl_system_collision::resolve(
                &enemy.hit_box(&self.tuning),
                enemy.position(),
                enemy.previous,
                map,
            );
            enemy.sprite = enemy.sprite.with_position(resolved);
        }
    }

    /// Applies damage to a live enemy, keeping its health within `[0, max]`.
    ///
    /// Negative and NaN amounts count as zero.
    ///
    /// Damage against dying, vacant or unknown slots is ignored. Returns
    /// `true` when this hit killed the enemy, in which case
    /// [`Event::EnemyKilled`] has been pushed exactly once.
    pub fn damage(&mut self, id: EnemyId, amount: f32, out_events: &mut Vec<Event>) -> bool {
        let max_health = self.tuning.max_health;
        let Some(enemy) = self.enemies.get_mut(id.index()) else {
            return false;
        };
        if !enemy.is_alive() {
            return false;
        }

        let amount = if amount.is_nan() { 0.0 } else { amount.max(0.0) };
        enemy.health = (enemy.health - amount).clamp(0.0, max_health);
        enemy.bar_tier = EnemyBarTier::from_health(enemy.health, max_health);
        out_events.push(Event::EnemyDamaged {
            enemy: id,
            amount,
            remaining: enemy.health,
        });

        if enemy.health > 0.0 {
            return false;
        }

        enemy.lifecycle = Lifecycle::Dying { elapsed: 0 };
        enemy.attacking = false;
        log::debug!("enemy {} killed", id.get());
        out_events.push(Event::EnemyKilled { enemy: id });
        true
    }

    /// Live enemy nearest to `from`; ties resolve to the lowest slot.
    #[must_use]
    pub fn closest_live(&self, from: Vec2) -> Option<EnemyId> {
        let mut closest: Option<(usize, f32)> = None;
        for (index, enemy) in self.enemies.iter().enumerate() {
            if !enemy.is_alive() {
                continue;
            }
            let distance = from.distance(enemy.position());
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((index, distance));
            }
        }
        closest.map(|(index, _)| id_for(index))
    }

    /// Closest live enemy packaged as an attack target.
    #[must_use]
    pub fn closest_target(&self, from: Vec2) -> Option<Target> {
        let enemy = self.closest_live(from)?;
        let position = self.position_of(enemy)?;
        Some(Target { enemy, position })
    }

    /// Position of a live enemy.
    #[must_use]
    pub fn position_of(&self, id: EnemyId) -> Option<Vec2> {
        self.enemies
            .get(id.index())
            .filter(|enemy| enemy.is_alive())
            .map(Enemy::position)
    }

    /// Reports whether any enemy is alive.
    #[must_use]
    pub fn any_alive(&self) -> bool {
        self.enemies.iter().any(Enemy::is_alive)
    }

    /// Number of live enemies.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.enemies.iter().filter(|enemy| enemy.is_alive()).count()
    }

    /// Number of slots ever allocated, vacant ones included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.enemies.len()
    }

    /// Global frame counter shared by all enemies.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Snapshot of one occupied slot.
    #[must_use]
    pub fn snapshot(&self, id: EnemyId) -> Option<EnemySnapshot> {
        self.enemies
            .get(id.index())
            .filter(|enemy| enemy.lifecycle != Lifecycle::Vacant)
            .map(|enemy| self.capture(id.index(), enemy))
    }

    /// Snapshots of every live or dying enemy in slot order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<EnemySnapshot> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.lifecycle != Lifecycle::Vacant)
            .map(|(index, enemy)| self.capture(index, enemy))
            .collect()
    }

    fn capture(&self, index: usize, enemy: &Enemy) -> EnemySnapshot {
        EnemySnapshot {
            id: id_for(index),
            position: enemy.position(),
            hit_box: enemy.hit_box(&self.tuning),
            health: enemy.health,
            max_health: self.tuning.max_health,
            bar_tier: enemy.bar_tier,
            behavior: enemy.behavior,
            lifecycle: enemy.lifecycle,
            attacking: enemy.attacking,
            animation_frame: enemy.animation_frame,
            sprite_row: enemy.sprite_row(),
        }
    }
}

fn id_for(index: usize) -> EnemyId {
    EnemyId::new(u32::try_from(index).unwrap_or(u32::MAX))
}
