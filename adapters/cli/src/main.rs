#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless harness that runs the axolotl arena with a scripted player.

mod arena;
mod autopilot;

use std::path::PathBuf;

use anyhow::{Context, Result};
use axolotl_core::{AttackKind, Command, Event, SeededRandom, Tuning};
use axolotl_world::{self as world, query, SessionStats, World};
use clap::Parser;

use crate::autopilot::Autopilot;

/// Command-line options for the headless harness.
#[derive(Debug, Parser)]
#[command(author, version, about = "Runs the axolotl arena headless", long_about = None)]
struct Cli {
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 3_600)]
    ticks: u64,
    /// Seed for the random source; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding the default tuning.
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Edge length of the square arena, in tiles.
    #[arg(long, default_value_t = 40)]
    arena: u32,
}

/// Aggregated outcome of a harness run.
#[derive(Debug, Default)]
struct Summary {
    ticks: u64,
    basic_attacks: u32,
    charge_attacks: u32,
    dashes: u32,
    damage_dealt: f32,
    damage_taken: f32,
    spawned: u32,
    kills: u32,
    defeats: u32,
    best: SessionStats,
}

impl Summary {
    fn record(&mut self, event: &Event) {
        match event {
            Event::AttackLaunched { kind } => match kind {
                AttackKind::Basic => self.basic_attacks += 1,
                AttackKind::Charge => self.charge_attacks += 1,
                AttackKind::Dash => self.dashes += 1,
            },
            Event::EnemyDamaged { amount, .. } => self.damage_dealt += amount,
            Event::PlayerDamaged { amount, .. } => self.damage_taken += amount,
            Event::EnemySpawned { .. } => self.spawned += 1,
            Event::EnemyKilled { .. } => self.kills += 1,
            _ => {}
        }
    }

    fn record_session(&mut self, stats: SessionStats) {
        self.best.survival_ticks = self.best.survival_ticks.max(stats.survival_ticks);
        self.best.max_combo = self.best.max_combo.max(stats.max_combo);
        self.best.kills = self.best.kills.max(stats.kills);
    }

    fn print(&self) {
        println!("ticks simulated:   {}", self.ticks);
        println!(
            "attacks:           {} basic, {} charged, {} dashes",
            self.basic_attacks, self.charge_attacks, self.dashes
        );
        println!("damage dealt:      {:.1}", self.damage_dealt);
        println!("damage taken:      {:.1}", self.damage_taken);
        println!("enemies spawned:   {}", self.spawned);
        println!("enemies killed:    {}", self.kills);
        println!("defeats:           {}", self.defeats);
        println!(
            "best session:      {} ticks, {} kills, combo {}",
            self.best.survival_ticks, self.best.kills, self.best.max_combo
        );
    }
}

/// Entry point for the axolotl command-line harness.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let mut rng = cli
        .seed
        .map_or_else(SeededRandom::from_entropy, SeededRandom::new);
    let map = arena::build(cli.arena, &tuning, &mut rng)
        .with_context(|| format!("failed to build a {0}x{0} arena", cli.arena))?;
    log::info!(
        "arena ready: {} ground tiles, {} water tiles",
        map.ground().len(),
        map.water().len()
    );

    let mut world = World::new(map, tuning, rng).context("tuning rejected by the simulation")?;
    let mut autopilot = Autopilot::default();
    let mut summary = Summary::default();
    let mut events = Vec::new();

    for _ in 0..cli.ticks {
        let input = autopilot.plan(&world);
        world::apply(&mut world, Command::Tick { input }, &mut events);
        summary.ticks += 1;

        let defeated = events
            .iter()
            .any(|event| matches!(event, Event::PlayerDefeated));
        for event in events.drain(..) {
            summary.record(&event);
        }

        if defeated {
            summary.defeats += 1;
            summary.record_session(query::session_stats(&world));
            world::apply(&mut world, Command::ResetSession, &mut events);
            autopilot.reset();
        }
    }
    summary.record_session(query::session_stats(&world));

    summary.print();
    Ok(())
}
