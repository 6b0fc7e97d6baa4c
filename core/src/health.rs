//! Quantisation of health fractions into health-bar display tiers.

/// Display tier of the player's health bar.
///
/// Tier 5 is a full bar and tier 0 is nearly empty. The renderer maps the
/// ordinal directly to a row of the health-bar sprite sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HealthTier(u8);

impl HealthTier {
    /// Tier shown at full health.
    pub const FULL: Self = Self(5);

    /// Buckets `current / max` at the 80/60/40/20/10 percent thresholds.
    #[must_use]
    pub fn from_health(current: f32, max: f32) -> Self {
        let fraction = fraction_of(current, max);
        let tier = if fraction > 0.8 {
            5
        } else if fraction > 0.6 {
            4
        } else if fraction > 0.4 {
            3
        } else if fraction > 0.2 {
            2
        } else if fraction > 0.1 {
            1
        } else {
            0
        };
        Self(tier)
    }

    /// Ordinal of the tier in `0..=5`.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Display tier of an enemy's floating health bar.
///
/// Tier 0 is a full bar and tier 7 is nearly empty, in eighths of maximum health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyBarTier(u8);

impl EnemyBarTier {
    /// Tier shown at full health.
    pub const FULL: Self = Self(0);

    /// Buckets `current / max` into eighths.
    #[must_use]
    pub fn from_health(current: f32, max: f32) -> Self {
        let fraction = fraction_of(current, max);
        let thresholds = [0.875, 0.75, 0.625, 0.5, 0.375, 0.25, 0.125];
        let tier = thresholds
            .iter()
            .position(|threshold| fraction > *threshold)
            .unwrap_or(thresholds.len());
        Self(u8::try_from(tier).unwrap_or(u8::MAX))
    }

    /// Ordinal of the tier in `0..=7`.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Fraction of `max` represented by `current`, or zero for a non-positive maximum.
#[must_use]
pub fn fraction_of(current: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    current / max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_tiers_follow_thresholds() {
        assert_eq!(HealthTier::from_health(10.0, 10.0), HealthTier::FULL);
        assert_eq!(HealthTier::from_health(8.0, 10.0).get(), 4);
        assert_eq!(HealthTier::from_health(6.5, 10.0).get(), 4);
        assert_eq!(HealthTier::from_health(4.0, 10.0).get(), 2);
        assert_eq!(HealthTier::from_health(1.5, 10.0).get(), 1);
        assert_eq!(HealthTier::from_health(1.0, 10.0).get(), 0);
        assert_eq!(HealthTier::from_health(0.0, 10.0).get(), 0);
    }

    #[test]
    fn enemy_tiers_count_missing_eighths() {
        assert_eq!(EnemyBarTier::from_health(5.0, 5.0), EnemyBarTier::FULL);
        assert_eq!(EnemyBarTier::from_health(3.8, 5.0).get(), 1);
        assert_eq!(EnemyBarTier::from_health(2.5, 5.0).get(), 4);
        assert_eq!(EnemyBarTier::from_health(0.2, 5.0).get(), 7);
        assert_eq!(EnemyBarTier::from_health(0.0, 5.0).get(), 7);
    }

    #[test]
    fn non_positive_maximum_yields_empty_fraction() {
        assert_eq!(fraction_of(3.0, 0.0), 0.0);
    }
}
