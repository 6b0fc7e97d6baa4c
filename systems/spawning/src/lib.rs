#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system responsible for emitting enemy spawn commands on water tiles.

use axolotl_core::{Command, RandomSource, Rect, SpawnTuning, WorldMap};
use axolotl_system_collision::overlaps_ground;
use glam::Vec2;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    interval: u64,
    attempts: u32,
    footprint: f32,
}

impl Config {
    /// Creates a new configuration using the provided cadence, retry budget and
    /// footprint size.
    #[must_use]
    pub const fn new(interval: u64, attempts: u32, footprint: f32) -> Self {
        Self {
            interval,
            attempts,
            footprint,
        }
    }
}

impl From<&SpawnTuning> for Config {
    fn from(tuning: &SpawnTuning) -> Self {
        Self::new(tuning.interval, tuning.attempts, tuning.footprint)
    }
}

/// System that periodically places enemies on random water tiles.
#[derive(Debug)]
pub struct Spawning {
    interval: u64,
    attempts: u32,
    footprint: f32,
    timer: u64,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            interval: config.interval,
            attempts: config.attempts,
            footprint: config.footprint,
            timer: 0,
        }
    }

    /// Counts one tick and runs a spawn cycle whenever the interval elapses.
    pub fn handle(&mut self, map: &WorldMap, rng: &mut impl RandomSource, out: &mut Vec<Command>) {
        self.timer += 1;
        if self.interval == 0 || self.timer < self.interval {
            return;
        }

        self.timer = 0;
        let _ = self.spawn_now(map, rng, out);
    }

    /// Runs one spawn cycle immediately, returning whether a command was emitted.
    ///
    /// Up to the configured number of random water tiles are sampled; a tile is
    /// rejected when a footprint anchored at its corner overlaps ground. A
    /// cycle that finds no free tile is skipped without error.
    pub fn spawn_now(
        &self,
        map: &WorldMap,
        rng: &mut impl RandomSource,
        out: &mut Vec<Command>,
    ) -> bool {
        let water = map.water();
        if water.is_empty() {
            log::debug!("map has no water tiles; spawn cycle skipped");
            return false;
        }

        let bound = u32::try_from(water.len()).unwrap_or(u32::MAX);
        for _ in 0..self.attempts {
            let tile = water[rng.below(bound) as usize];
            let corner = map.tile_rect(tile).position();
            let footprint = Rect::at(corner, Vec2::splat(self.footprint));
            if overlaps_ground(&footprint, map) {
                continue;
            }

            out.push(Command::SpawnEnemy { position: corner });
            return true;
        }

        log::debug!(
            "no free water tile found after {} attempts; spawn cycle skipped",
            self.attempts
        );
        false
    }

    /// Rewinds the spawn timer.
    pub fn reset(&mut self) {
        self.timer = 0;
    }

    /// Ticks accumulated toward the next spawn cycle.
    #[must_use]
    pub fn timer(&self) -> u64 {
        self.timer
    }
}
