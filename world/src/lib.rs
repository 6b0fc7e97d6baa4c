#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for the axolotl arena.
//!
//! The world owns the map, the player, the enemy pool, the spawner and the
//! random source. Every mutation goes through [`apply`]; systems respond to a
//! tick by pushing [`Command`] values that are applied immediately, in order,
//! within the same tick.

use axolotl_core::{Command, ConfigError, Event, RandomSource, SeededRandom, Tuning, WorldMap};
use axolotl_system_enemy_ai::EnemyPool;
use axolotl_system_player_combat::Player;
use axolotl_system_spawning::{Config as SpawnConfig, Spawning};

/// Statistics accumulated over one session, shown on the game-over screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Ticks simulated while the player was alive.
    pub survival_ticks: u64,
    /// Longest combo observed during the session.
    pub max_combo: u32,
    /// Enemies killed during the session.
    pub kills: u32,
}

/// Represents the authoritative arena state.
#[derive(Debug)]
pub struct World<R: RandomSource = SeededRandom> {
    map: WorldMap,
    tuning: Tuning,
    player: Player,
    enemies: EnemyPool,
    spawning: Spawning,
    rng: R,
    survival_ticks: u64,
    max_combo: u32,
}

impl<R: RandomSource> World<R> {
    /// Creates a session on `map` and performs the initial enemy spawn.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `tuning` fails validation.
    pub fn new(map: WorldMap, tuning: Tuning, rng: R) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let mut world = Self {
            player: Player::new(tuning.player.clone(), tuning.effects.clone()),
            enemies: EnemyPool::new(tuning.enemy.clone()),
            spawning: Spawning::new(SpawnConfig::from(&tuning.spawn)),
            map,
            tuning,
            rng,
            survival_ticks: 0,
            max_combo: 0,
        };
        let mut events = Vec::new();
        world.initial_spawn(&mut events);
        Ok(world)
    }

    fn initial_spawn(&mut self, out_events: &mut Vec<Event>) {
        let mut commands = Vec::new();
        if !self
            .spawning
            .spawn_now(&self.map, &mut self.rng, &mut commands)
        {
            log::debug!("initial spawn found no free water tile");
        }
        for command in commands {
            apply(self, command, out_events);
        }
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.player.reset();
        self.enemies.reset();
        self.spawning.reset();
        self.survival_ticks = 0;
        self.max_combo = 0;
        self.initial_spawn(out_events);
    }
}

/// Applies the provided command to the world, mutating state in place.
pub fn apply<R: RandomSource>(world: &mut World<R>, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { input } => {
            if world.player.is_dead() {
                out_events.push(Event::PlayerDefeated);
                return;
            }

            world.survival_ticks += 1;
            world.max_combo = world.max_combo.max(world.player.combo());

            world.player.handle_input(&input);
            world.player.advance(&world.map, &mut world.rng);

            let mut commands = Vec::new();
            world.enemies.advance(
                world.player.position(),
                &world.map,
                &mut world.rng,
                &mut commands,
                out_events,
            );
            world
                .spawning
                .handle(&world.map, &mut world.rng, &mut commands);
            for command in commands.drain(..) {
                apply(world, command, out_events);
            }

            let target = world.enemies.closest_target(world.player.position());
            if let Some(kind) = world
                .player
                .try_attack(target, &mut world.rng, &mut commands)
            {
                out_events.push(Event::AttackLaunched { kind });
            }
            for command in commands {
                apply(world, command, out_events);
            }

            out_events.push(Event::TimeAdvanced {
                survival_ticks: world.survival_ticks,
            });
        }
        Command::SpawnEnemy { position } => {
            let enemy = world.enemies.spawn(position, &mut world.rng);
            log::debug!(
                "enemy {} spawned at ({:.0}, {:.0})",
                enemy.get(),
                position.x,
                position.y
            );
            out_events.push(Event::EnemySpawned { enemy, position });
        }
        Command::DamagePlayer { amount } => {
            world.player.mark_damaged();
            world.player.take_damage(amount);
            out_events.push(Event::PlayerDamaged {
                amount,
                remaining: world.player.health(),
            });
            if world.player.is_dead() {
                log::info!(
                    "player defeated after {} ticks with {} kills",
                    world.survival_ticks,
                    world.player.kill_count()
                );
            }
        }
        Command::DamageEnemy { enemy, amount } => {
            if world.enemies.damage(enemy, amount, out_events) {
                world.player.record_kill();
            }
        }
        Command::ResetSession => {
            world.reset(out_events);
            log::info!("session reset");
            out_events.push(Event::SessionReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use axolotl_core::{health::fraction_of, HealthTier, RandomSource, Rect, Tuning, WorldMap};
    use axolotl_system_effects::{aura_rings, Particle};
    use axolotl_system_enemy_ai::EnemySnapshot;
    use axolotl_system_player_combat::Facing;
    use glam::Vec2;

    use super::{SessionStats, World};

    /// Captures the player's render and HUD state.
    #[must_use]
    pub fn player<R: RandomSource>(world: &World<R>) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            position: player.position(),
            previous_position: player.previous_position(),
            hit_box: player.hit_box(),
            camera_target: player.camera_target(),
            facing: player.facing(),
            animation_frame: player.animation_frame(),
            health: player.health(),
            max_health: player.max_health(),
            health_fraction: fraction_of(player.health(), player.max_health()),
            health_tier: player.health_tier(),
            combo: player.combo(),
            kill_count: player.kill_count(),
            charge_fraction: player.charge_fraction(),
            glow: player.glow(),
            aura_rings: aura_rings(player.glow()),
            attacking: player.is_attacking(),
            charging: player.is_charging(),
            dashing: player.is_dashing(),
        }
    }

    /// Captures a read-only view of the live and dying enemies.
    #[must_use]
    pub fn enemy_view<R: RandomSource>(world: &World<R>) -> EnemyView {
        EnemyView {
            snapshots: world.enemies.snapshots(),
        }
    }

    /// Live water particles in emission order.
    #[must_use]
    pub fn particles<R: RandomSource>(world: &World<R>) -> &[Particle] {
        world.player.particles().particles()
    }

    /// Current screen-shake magnitude.
    #[must_use]
    pub fn screen_shake<R: RandomSource>(world: &World<R>) -> f32 {
        world.player.screen_shake().magnitude()
    }

    /// Draws a camera offset from the current shake using the caller's source.
    #[must_use]
    pub fn shake_offset<R: RandomSource>(world: &World<R>, rng: &mut impl RandomSource) -> Vec2 {
        world.player.screen_shake().offset(rng)
    }

    /// Reports whether the player has run out of health.
    #[must_use]
    pub fn is_player_dead<R: RandomSource>(world: &World<R>) -> bool {
        world.player.is_dead()
    }

    /// Enemies killed during the session.
    #[must_use]
    pub fn kill_count<R: RandomSource>(world: &World<R>) -> u32 {
        world.player.kill_count()
    }

    /// Length of the player's current combo.
    #[must_use]
    pub fn combo<R: RandomSource>(world: &World<R>) -> u32 {
        world.player.combo()
    }

    /// Session statistics for the game-over screen.
    #[must_use]
    pub fn session_stats<R: RandomSource>(world: &World<R>) -> SessionStats {
        SessionStats {
            survival_ticks: world.survival_ticks,
            max_combo: world.max_combo,
            kills: world.player.kill_count(),
        }
    }

    /// Provides read-only access to the arena map.
    #[must_use]
    pub fn map<R: RandomSource>(world: &World<R>) -> &WorldMap {
        &world.map
    }

    /// Provides read-only access to the tuning the session runs with.
    #[must_use]
    pub fn tuning<R: RandomSource>(world: &World<R>) -> &Tuning {
        &world.tuning
    }

    /// Read-only snapshot describing all visible enemies.
    #[derive(Clone, Debug)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured snapshots in slot order.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        pub fn into_vec(self) -> Vec<EnemySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of the player used for rendering and HUD.
    #[derive(Clone, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Top-left corner of the sprite rectangle.
        pub position: Vec2,
        /// Position before the latest tick's movement.
        pub previous_position: Vec2,
        /// Collision hit-box.
        pub hit_box: Rect,
        /// Point the camera centres on.
        pub camera_target: Vec2,
        /// Sprite pose.
        pub facing: Facing,
        /// Column of the current animation frame.
        pub animation_frame: u32,
        /// Current health.
        pub health: f32,
        /// Maximum health.
        pub max_health: f32,
        /// Health as a fraction of the maximum.
        pub health_fraction: f32,
        /// Health-bar tier.
        pub health_tier: HealthTier,
        /// Current combo length.
        pub combo: u32,
        /// Enemies killed.
        pub kill_count: u32,
        /// Charge progress while charging.
        pub charge_fraction: Option<f32>,
        /// Charge aura intensity.
        pub glow: f32,
        /// Aura rings to draw for the current glow.
        pub aura_rings: u8,
        /// Whether an attack pose is active.
        pub attacking: bool,
        /// Whether a charge is being held.
        pub charging: bool,
        /// Whether a dash is in progress.
        pub dashing: bool,
    }
}
