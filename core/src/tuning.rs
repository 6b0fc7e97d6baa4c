//! Named tuning constants for every subsystem, loadable from TOML.
//!
//! Defaults reproduce the feel of the shipped game. Durations and intervals
//! are measured in simulation ticks; distances and speeds in world units
//! (per tick where applicable).

use std::{fs, path::Path, path::PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating tuning values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The tuning file could not be read.
    #[error("failed to read tuning file {path}")]
    Io {
        /// Location of the tuning file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The tuning document is not valid TOML or has mistyped fields.
    #[error("failed to parse tuning toml")]
    Parse(#[from] toml::de::Error),
    /// A tuning value lies outside its permitted domain.
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Constraint the value violated.
        reason: &'static str,
    },
}

/// Complete set of tuning values consumed by the simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement, health and attack parameters.
    pub player: PlayerTuning,
    /// Enemy AI, health and attack parameters.
    pub enemy: EnemyTuning,
    /// Enemy spawn cadence.
    pub spawn: SpawnTuning,
    /// Particle and screen-shake parameters.
    pub effects: EffectsTuning,
}

impl Tuning {
    /// Parses and validates tuning values from a TOML document.
    ///
    /// Missing tables and fields keep their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents and
    /// [`ConfigError::Invalid`] when a value fails validation.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = toml::from_str(contents)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reads, parses and validates a TOML tuning file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
    /// same errors as [`Tuning::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks every subsystem's values against their permitted domains.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::Invalid`] encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.player.validate()?;
        self.enemy.validate()?;
        self.spawn.validate()?;
        self.effects.validate()
    }
}

/// Player movement, health and combat parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal spawn coordinate of the sprite's top-left corner.
    pub spawn_x: f32,
    /// Vertical spawn coordinate of the sprite's top-left corner.
    pub spawn_y: f32,
    /// Side length of the square sprite rectangle.
    pub size: f32,
    /// Side length of the square collision hit-box.
    pub hit_box_size: f32,
    /// Offset of the hit-box below the sprite's vertical centre.
    pub hit_box_offset: f32,
    /// Walking speed.
    pub walk_speed: f32,
    /// Walking speed while the speed modifier is held.
    pub sprint_speed: f32,
    /// Maximum and starting health.
    pub max_health: f32,
    /// Ticks between regeneration pulses.
    pub regen_interval: u64,
    /// Health restored by each regeneration pulse.
    pub regen_amount: f32,
    /// Base damage of every attack.
    pub attack_damage: f32,
    /// Maximum distance for a basic attack.
    pub attack_range: f32,
    /// Minimum ticks between two attacks.
    pub attack_cooldown: u64,
    /// Ticks the attacking pose lasts after a basic attack.
    pub attack_duration: u64,
    /// Maximum tick gap between hits that continues a combo.
    pub combo_window: u64,
    /// Extra damage per combo step.
    pub combo_bonus: f32,
    /// Additional attacking ticks after a charge release.
    pub charge_extra_duration: u64,
    /// Ticks a charge must be held before its damage scales.
    pub min_charge: u64,
    /// Ticks after which a charge is full.
    pub max_charge: u64,
    /// Damage multiplier reached at full charge.
    pub charge_multiplier: f32,
    /// Factor applied to the attack range for charge releases.
    pub charge_range_factor: f32,
    /// Maximum distance to a target that allows a dash.
    pub dash_radius: f32,
    /// Ticks a dash lasts.
    pub dash_duration: u64,
    /// Dash speed.
    pub dash_speed: f32,
    /// Ticks between walk-cycle frames.
    pub walk_animation_cadence: u64,
    /// Ticks between idle animation frames.
    pub idle_animation_cadence: u64,
    /// Frames in the walk cycle.
    pub walk_frames: u32,
}

impl PlayerTuning {
    /// Top-left corner of the sprite at spawn.
    #[must_use]
    pub fn spawn_position(&self) -> Vec2 {
        Vec2::new(self.spawn_x, self.spawn_y)
    }

    /// Maximum distance for a charge release.
    #[must_use]
    pub fn charge_range(&self) -> f32 {
        self.attack_range * self.charge_range_factor
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("player.size", self.size)?;
        positive("player.hit_box_size", self.hit_box_size)?;
        positive("player.max_health", self.max_health)?;
        non_negative("player.walk_speed", self.walk_speed)?;
        non_negative("player.sprint_speed", self.sprint_speed)?;
        non_negative("player.regen_amount", self.regen_amount)?;
        non_negative("player.attack_damage", self.attack_damage)?;
        non_negative("player.attack_range", self.attack_range)?;
        non_negative("player.combo_bonus", self.combo_bonus)?;
        non_negative("player.charge_multiplier", self.charge_multiplier)?;
        non_negative("player.charge_range_factor", self.charge_range_factor)?;
        non_negative("player.dash_radius", self.dash_radius)?;
        non_negative("player.dash_speed", self.dash_speed)?;
        nonzero_ticks("player.regen_interval", self.regen_interval)?;
        nonzero_ticks("player.attack_duration", self.attack_duration)?;
        nonzero_ticks("player.max_charge", self.max_charge)?;
        nonzero_ticks("player.dash_duration", self.dash_duration)?;
        nonzero_ticks("player.walk_animation_cadence", self.walk_animation_cadence)?;
        nonzero_ticks("player.idle_animation_cadence", self.idle_animation_cadence)?;
        if self.walk_frames < 2 {
            return Err(invalid("player.walk_frames", "must be at least 2"));
        }
        if self.min_charge > self.max_charge {
            return Err(invalid("player.min_charge", "must not exceed max_charge"));
        }
        Ok(())
    }
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            spawn_x: 600.0,
            spawn_y: 400.0,
            size: 32.0,
            hit_box_size: 10.0,
            hit_box_offset: 3.0,
            walk_speed: 1.4,
            sprint_speed: 2.0,
            max_health: 10.0,
            regen_interval: 120,
            regen_amount: 1.0,
            attack_damage: 1.2,
            attack_range: 40.0,
            attack_cooldown: 30,
            attack_duration: 15,
            combo_window: 45,
            combo_bonus: 0.3,
            charge_extra_duration: 5,
            min_charge: 15,
            max_charge: 60,
            charge_multiplier: 1.5,
            charge_range_factor: 1.5,
            dash_radius: 120.0,
            dash_duration: 20,
            dash_speed: 4.0,
            walk_animation_cadence: 8,
            idle_animation_cadence: 45,
            walk_frames: 8,
        }
    }
}

/// Enemy body, combat and behaviour parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Side length of the square sprite rectangle.
    pub size: f32,
    /// Side length of the square collision hit-box.
    pub hit_box_size: f32,
    /// Offset of the hit-box below the sprite's vertical centre.
    pub hit_box_offset: f32,
    /// Maximum and starting health.
    pub max_health: f32,
    /// Minimum ticks between two attacks.
    pub attack_cooldown: u64,
    /// Maximum distance to the player that starts an attack.
    pub attack_range: f32,
    /// Ticks an attack lasts.
    pub attack_duration: u64,
    /// First tick after attack entry on which the strike may land.
    pub strike_window_start: u64,
    /// Last tick after attack entry on which the strike may land.
    pub strike_window_end: u64,
    /// Damage dealt to the player by a strike.
    pub attack_damage: f32,
    /// Ticks the death animation lasts.
    pub death_duration: u64,
    /// Minimum aggro radius.
    pub aggro_base: f32,
    /// Random spread added to the aggro radius.
    pub aggro_spread: f32,
    /// Minimum patrol radius.
    pub patrol_base: f32,
    /// Random spread added to the patrol radius.
    pub patrol_spread: f32,
    /// Minimum ticks between wander target picks.
    pub wander_countdown_base: u32,
    /// Random spread added to the wander countdown.
    pub wander_countdown_spread: u32,
    /// Drift speed toward the wander target.
    pub wander_speed: f32,
    /// Distance at which the wander target counts as reached.
    pub arrival_threshold: f32,
    /// Distance below which chasing stops stepping.
    pub chase_min_distance: f32,
    /// Distance beyond which chasing stops stepping.
    pub chase_max_distance: f32,
    /// Minimum chase speed.
    pub chase_speed_base: f32,
    /// Random spread added to the chase speed.
    pub chase_speed_spread: f32,
    /// Maximum per-tick lateral jitter applied while chasing.
    pub chase_jitter: f32,
    /// Multiple of the aggro radius at which a chase is abandoned.
    pub leash_factor: f32,
    /// Wander countdown assigned after abandoning a chase.
    pub leash_countdown: u32,
    /// Health fraction below which an enemy may flee.
    pub retreat_health_fraction: f32,
    /// Percent chance per chasing tick to flee at low health.
    pub retreat_chance_percent: u32,
    /// Distance to the player within which a retreating enemy keeps fleeing.
    pub retreat_radius: f32,
    /// Flee speed.
    pub retreat_speed: f32,
    /// Minimum wander countdown after a retreat ends.
    pub regroup_countdown_base: u32,
    /// Random spread added to the regroup countdown.
    pub regroup_countdown_spread: u32,
    /// Ticks after which a retreat gives way to a new chase.
    pub retreat_budget: u64,
    /// Percent chance to keep chasing once an attack finishes.
    pub pursue_chance_percent: u32,
    /// Ticks between animation frames.
    pub animation_cadence: u64,
    /// Frames in the alive animation cycle.
    pub alive_frames: u32,
    /// Frames in the death animation cycle.
    pub dying_frames: u32,
}

impl EnemyTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("enemy.size", self.size)?;
        positive("enemy.hit_box_size", self.hit_box_size)?;
        positive("enemy.max_health", self.max_health)?;
        non_negative("enemy.attack_range", self.attack_range)?;
        non_negative("enemy.attack_damage", self.attack_damage)?;
        non_negative("enemy.aggro_base", self.aggro_base)?;
        non_negative("enemy.aggro_spread", self.aggro_spread)?;
        non_negative("enemy.patrol_base", self.patrol_base)?;
        non_negative("enemy.patrol_spread", self.patrol_spread)?;
        non_negative("enemy.wander_speed", self.wander_speed)?;
        non_negative("enemy.chase_speed_base", self.chase_speed_base)?;
        non_negative("enemy.chase_speed_spread", self.chase_speed_spread)?;
        non_negative("enemy.chase_jitter", self.chase_jitter)?;
        non_negative("enemy.retreat_speed", self.retreat_speed)?;
        nonzero_ticks("enemy.attack_duration", self.attack_duration)?;
        nonzero_ticks("enemy.death_duration", self.death_duration)?;
        nonzero_ticks("enemy.animation_cadence", self.animation_cadence)?;
        percent("enemy.retreat_chance_percent", self.retreat_chance_percent)?;
        percent("enemy.pursue_chance_percent", self.pursue_chance_percent)?;
        if self.chase_min_distance > self.chase_max_distance {
            return Err(invalid(
                "enemy.chase_min_distance",
                "must not exceed chase_max_distance",
            ));
        }
        if self.strike_window_start > self.strike_window_end {
            return Err(invalid(
                "enemy.strike_window_start",
                "must not exceed strike_window_end",
            ));
        }
        if self.strike_window_end >= self.attack_duration {
            return Err(invalid(
                "enemy.strike_window_end",
                "must end before the attack finishes",
            ));
        }
        if !(0.0..=1.0).contains(&self.retreat_health_fraction) {
            return Err(invalid(
                "enemy.retreat_health_fraction",
                "must lie within [0, 1]",
            ));
        }
        if self.alive_frames == 0 || self.dying_frames == 0 {
            return Err(invalid("enemy.alive_frames", "animations need at least one frame"));
        }
        Ok(())
    }
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            size: 32.0,
            hit_box_size: 10.0,
            hit_box_offset: 3.0,
            max_health: 5.0,
            attack_cooldown: 60,
            attack_range: 25.0,
            attack_duration: 20,
            strike_window_start: 3,
            strike_window_end: 5,
            attack_damage: 0.7,
            death_duration: 120,
            aggro_base: 120.0,
            aggro_spread: 80.0,
            patrol_base: 50.0,
            patrol_spread: 30.0,
            wander_countdown_base: 60,
            wander_countdown_spread: 120,
            wander_speed: 0.3,
            arrival_threshold: 2.0,
            chase_min_distance: 5.0,
            chase_max_distance: 200.0,
            chase_speed_base: 0.9,
            chase_speed_spread: 0.4,
            chase_jitter: 0.1,
            leash_factor: 1.5,
            leash_countdown: 30,
            retreat_health_fraction: 0.3,
            retreat_chance_percent: 15,
            retreat_radius: 80.0,
            retreat_speed: 1.2,
            regroup_countdown_base: 30,
            regroup_countdown_spread: 60,
            retreat_budget: 180,
            pursue_chance_percent: 70,
            animation_cadence: 12,
            alive_frames: 5,
            dying_frames: 3,
        }
    }
}

/// Enemy spawn cadence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Ticks between spawn cycles.
    pub interval: u64,
    /// Placement attempts per spawn cycle.
    pub attempts: u32,
    /// Side length of the rectangle tested against ground tiles.
    pub footprint: f32,
}

impl SpawnTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        nonzero_ticks("spawn.interval", self.interval)?;
        positive("spawn.footprint", self.footprint)
    }
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval: 300,
            attempts: 10,
            footprint: 32.0,
        }
    }
}

/// Particle cadence and screen-shake parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsTuning {
    /// Ticks between charge bubbles.
    pub bubble_interval: u64,
    /// Ticks between ripples once a charge is full.
    pub ripple_interval: u64,
    /// Ticks between dash trail bursts.
    pub trail_interval: u64,
    /// Shake applied by a full-charge ripple.
    pub full_charge_shake: f32,
    /// Shake applied by a charge release.
    pub charge_release_shake: f32,
    /// Shake applied when a dash starts.
    pub dash_start_shake: f32,
    /// Shake applied when a dash ends.
    pub dash_end_shake: f32,
    /// Multiplicative shake decay per tick.
    pub shake_decay: f32,
    /// Magnitude below which shake snaps to zero.
    pub shake_cutoff: f32,
    /// Life removed from each particle per tick.
    pub particle_fade: f32,
}

impl EffectsTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        nonzero_ticks("effects.bubble_interval", self.bubble_interval)?;
        nonzero_ticks("effects.ripple_interval", self.ripple_interval)?;
        nonzero_ticks("effects.trail_interval", self.trail_interval)?;
        positive("effects.particle_fade", self.particle_fade)?;
        non_negative("effects.shake_cutoff", self.shake_cutoff)?;
        if !(0.0..1.0).contains(&self.shake_decay) {
            return Err(invalid("effects.shake_decay", "must lie within [0, 1)"));
        }
        Ok(())
    }
}

impl Default for EffectsTuning {
    fn default() -> Self {
        Self {
            bubble_interval: 8,
            ripple_interval: 15,
            trail_interval: 3,
            full_charge_shake: 1.5,
            charge_release_shake: 4.0,
            dash_start_shake: 2.0,
            dash_end_shake: 3.0,
            shake_decay: 0.9,
            shake_cutoff: 0.1,
            particle_fade: 0.02,
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive finite number"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be a non-negative finite number"))
    }
}

fn nonzero_ticks(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(invalid(field, "must span at least one tick"));
    }
    Ok(())
}

fn percent(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value > 100 {
        return Err(invalid(field, "must not exceed 100"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn partial_document_keeps_remaining_defaults() {
        let tuning = Tuning::from_toml_str(
            r#"
            [player]
            walk_speed = 3.0

            [spawn]
            interval = 120
            "#,
        )
        .expect("partial tuning parses");

        assert_eq!(tuning.player.walk_speed, 3.0);
        assert_eq!(tuning.player.max_health, 10.0);
        assert_eq!(tuning.spawn.interval, 120);
        assert_eq!(tuning.spawn.attempts, 10);
        assert_eq!(tuning.enemy, EnemyTuning::default());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let tuning = Tuning::from_toml_str("").expect("empty tuning parses");
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn inverted_chase_band_is_rejected() {
        let error = Tuning::from_toml_str(
            r#"
            [enemy]
            chase_min_distance = 300.0
            "#,
        )
        .expect_err("inverted band must fail");

        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "enemy.chase_min_distance",
                ..
            }
        ));
    }

    #[test]
    fn probabilities_above_one_hundred_are_rejected() {
        let error = Tuning::from_toml_str("[enemy]\npursue_chance_percent = 101\n")
            .expect_err("percent over 100 must fail");
        assert!(matches!(error, ConfigError::Invalid { .. }));
    }

    #[test]
    fn zero_spawn_interval_is_rejected() {
        let error =
            Tuning::from_toml_str("[spawn]\ninterval = 0\n").expect_err("zero interval must fail");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                field: "spawn.interval",
                ..
            }
        ));
    }

    #[test]
    fn malformed_document_reports_parse_error() {
        let error =
            Tuning::from_toml_str("[player\nsize = 1").expect_err("malformed toml must fail");
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn charge_range_scales_attack_range() {
        let tuning = PlayerTuning::default();
        assert!((tuning.charge_range() - 60.0).abs() < f32::EPSILON);
        assert_eq!(tuning.spawn_position(), Vec2::new(600.0, 400.0));
    }
}
