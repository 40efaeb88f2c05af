//! Tuning knobs for a clicker session.
//!
//! The shipped values live in `assets/config.json` and are embedded at build
//! time. Missing keys fall back to [`GameConfig::default`].

use serde::Deserialize;
use thiserror::Error;

const EMBEDDED_CONFIG: &str = include_str!("../../../assets/config.json");

/// How a manual click turns the accumulated click bonus into clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickValuePolicy {
    /// Each click is worth `1 + bonus`.
    Additive,
    /// Each click is worth `1 * bonus`, bonus starting at 1.
    Multiplicative,
}

/// Which heuristic judges click timing (the trust check always runs).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheatPolicy {
    /// Strikes for a window of near-identical intervals.
    Regularity,
    /// Instant ban above a clicks-per-second ceiling.
    Velocity,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Passive income payout interval.
    pub tick_interval_ms: u32,
    /// Most passive ticks one frame may pay out after a long gap.
    pub max_catchup_ticks: u32,
    /// How many recent click intervals the regularity check looks at.
    pub history_capacity: usize,
    pub regularity_tolerance_ms: f64,
    /// Strikes allowed before the regularity check bans.
    pub regularity_threshold: u32,
    /// Clicks per second above which the velocity check bans.
    pub velocity_ceiling: f64,
    pub click_value: ClickValuePolicy,
    pub cheat_heuristic: CheatPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            max_catchup_ticks: 3600,
            history_capacity: 8,
            regularity_tolerance_ms: 10.0,
            regularity_threshold: 10,
            velocity_ceiling: 22.0,
            click_value: ClickValuePolicy::Additive,
            cheat_heuristic: CheatPolicy::Regularity,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tickIntervalMs must be greater than zero")]
    ZeroTickInterval,
    #[error("maxCatchupTicks must be greater than zero")]
    ZeroCatchup,
    #[error("historyCapacity must be greater than zero")]
    ZeroHistoryCapacity,
    #[error("regularityToleranceMs must not be negative (got {0})")]
    NegativeTolerance(f64),
    #[error("velocityCeiling must be positive (got {0})")]
    NonPositiveCeiling(f64),
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.max_catchup_ticks == 0 {
            return Err(ConfigError::ZeroCatchup);
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        if self.regularity_tolerance_ms < 0.0 {
            return Err(ConfigError::NegativeTolerance(self.regularity_tolerance_ms));
        }
        if self.velocity_ceiling <= 0.0 {
            return Err(ConfigError::NonPositiveCeiling(self.velocity_ceiling));
        }
        Ok(())
    }

    /// The embedded config, or defaults if it doesn't parse.
    pub fn load() -> Self {
        match Self::from_json(EMBEDDED_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::error!("bad embedded config, using defaults: {e}");
                Self::default()
            }
        }
    }
}
