//! Run configuration: RNG seed, clock and orchestrator tunables.
//!
//! Every field has a default, so a JSON config only needs the keys it
//! overrides:
//!
//! ```
//! use laststand_core::config::SimConfig;
//!
//! let config = SimConfig::from_json_str(r#"{ "seed": 7, "tuning": { "boss_grace_secs": 1.0 } }"#).unwrap();
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.tuning.boss_grace_secs, 1.0);
//! assert_eq!(config.tick_rate, 60);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_STEP_SECS, TICK_RATE, WORLD_SIZE};

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Fixed-step rate used by `tick()`.
    pub tick_rate: u32,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            tick_rate: TICK_RATE,
            tuning: Tuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Seconds per fixed tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be positive"));
        }
        if !(0.0..=4.0).contains(&self.time_scale) {
            return Err(invalid("time_scale", "must be within [0, 4]"));
        }
        self.tuning.validate()
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

/// Wave orchestration and drop tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world_size: f64,
    /// Largest elapsed time a single tick integrates.
    pub max_step_secs: f64,
    pub initial_spawn_delay_secs: f64,
    pub spawn_delay_decrement_secs: f64,
    pub min_spawn_delay_secs: f64,
    pub spawn_distance: f64,
    /// Random extra distance added to each spawn.
    pub spawn_jitter: f64,
    /// Extra distance for the miniboss spawn.
    pub boss_extra_distance: f64,
    pub boss_grace_secs: f64,
    /// Fraction of max health restored on wave completion.
    pub wave_heal_fraction: f64,
    pub upgrade_window_secs: f64,
    pub upgrade_offer_size: usize,
    pub item_drop_chance: f64,
    pub item_lifetime_secs: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            max_step_secs: MAX_STEP_SECS,
            initial_spawn_delay_secs: 0.2,
            spawn_delay_decrement_secs: 0.02,
            min_spawn_delay_secs: 0.1,
            spawn_distance: 350.0,
            spawn_jitter: 100.0,
            boss_extra_distance: 100.0,
            boss_grace_secs: 3.0,
            wave_heal_fraction: 0.25,
            upgrade_window_secs: 10.0,
            upgrade_offer_size: 3,
            item_drop_chance: 0.1,
            item_lifetime_secs: 10.0,
        }
    }
}

impl Tuning {
    /// Spawn cadence for a wave: decreases per wave down to the floor.
    pub fn spawn_delay_for_wave(&self, wave: u32) -> f64 {
        let steps = wave.saturating_sub(1) as f64;
        (self.initial_spawn_delay_secs - steps * self.spawn_delay_decrement_secs)
            .max(self.min_spawn_delay_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_size <= 0.0 {
            return Err(invalid("world_size", "must be positive"));
        }
        if self.max_step_secs <= 0.0 {
            return Err(invalid("max_step_secs", "must be positive"));
        }
        if self.min_spawn_delay_secs <= 0.0 {
            return Err(invalid("min_spawn_delay_secs", "must be positive"));
        }
        if self.initial_spawn_delay_secs < self.min_spawn_delay_secs {
            return Err(invalid(
                "initial_spawn_delay_secs",
                "must not be below min_spawn_delay_secs",
            ));
        }
        if self.spawn_distance < 0.0 || self.spawn_jitter < 0.0 || self.boss_extra_distance < 0.0 {
            return Err(invalid("spawn_distance", "distances must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.wave_heal_fraction) {
            return Err(invalid("wave_heal_fraction", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.item_drop_chance) {
            return Err(invalid("item_drop_chance", "must be within [0, 1]"));
        }
        if self.upgrade_offer_size == 0 {
            return Err(invalid("upgrade_offer_size", "must be at least 1"));
        }
        if self.upgrade_window_secs <= 0.0 {
            return Err(invalid("upgrade_window_secs", "must be positive"));
        }
        Ok(())
    }
}
