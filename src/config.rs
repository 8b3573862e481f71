//! Simulation configuration. Defaults come from [crate::constants], and every field may be
//! overridden from a `FLAPPER_<FIELD>` environment variable whose value is parsed as JSON,
//! so `FLAPPER_POPULATION_SIZE=20` or `FLAPPER_SPAWN=[200,300]` both work.

use crate::{
    agent::Physics,
    constants::*,
    error::{Error, Result},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub population_size: usize,
    pub elite_count: usize,
    pub generations: usize,
    pub hidden_width: usize,
    pub mutation_sigma: f64,
    pub observation_scale: f64,
    pub impulse_velocity: f64,
    pub gravity: f64,
    pub terminal_velocity: f64,
    pub spawn: (f64, f64),
    pub agent_size: (f64, f64),
    pub ground_y: f64,
    pub gap_height: f64,
    pub gap_range: (f64, f64),
    pub obstacle_velocity: f64,
    pub obstacle_width: f64,
    pub segment_height: f64,
    pub initial_obstacle_x: f64,
    pub spawn_obstacle_x: f64,
    pub tick_rate: u32,
    /// Episodes still running after this many ticks are ended where they stand
    pub max_ticks: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population_size: FLAPPER_POPULATION_SIZE,
            elite_count: FLAPPER_ELITE_COUNT,
            generations: FLAPPER_GENERATIONS,
            hidden_width: FLAPPER_HIDDEN_WIDTH,
            mutation_sigma: FLAPPER_MUTATION_SIGMA,
            observation_scale: FLAPPER_OBSERVATION_SCALE,
            impulse_velocity: FLAPPER_IMPULSE_VELOCITY,
            gravity: FLAPPER_GRAVITY,
            terminal_velocity: FLAPPER_TERMINAL_VELOCITY,
            spawn: FLAPPER_SPAWN,
            agent_size: FLAPPER_AGENT_SIZE,
            ground_y: FLAPPER_GROUND_Y,
            gap_height: FLAPPER_GAP_HEIGHT,
            gap_range: FLAPPER_GAP_RANGE,
            obstacle_velocity: FLAPPER_OBSTACLE_VELOCITY,
            obstacle_width: FLAPPER_OBSTACLE_WIDTH,
            segment_height: FLAPPER_SEGMENT_HEIGHT,
            initial_obstacle_x: FLAPPER_INITIAL_OBSTACLE_X,
            spawn_obstacle_x: FLAPPER_SPAWN_OBSTACLE_X,
            tick_rate: FLAPPER_TICK_RATE,
            max_ticks: None,
        }
    }
}

macro_rules! env_overrides {
    ($config:ident, $lookup:ident, [$($field:ident),+ $(,)?]) => {
        ::paste::paste! {$(
            let key = concat!("FLAPPER_", stringify!([<$field:upper>]));
            if let Some(raw) = $lookup(key) {
                $config.$field = serde_json::from_str(raw.trim())
                    .map_err(|e| Error::InvalidConfig(format!("{key}={raw}: {e}")))?;
            }
        )+}
    };
}

impl SimConfig {
    /// Defaults overridden by whatever `FLAPPER_*` variables are set in the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`, which maps a `FLAPPER_*` key to its raw value
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        env_overrides!(
            config,
            lookup,
            [
                population_size,
                elite_count,
                generations,
                hidden_width,
                mutation_sigma,
                observation_scale,
                impulse_velocity,
                gravity,
                terminal_velocity,
                spawn,
                agent_size,
                ground_y,
                gap_height,
                gap_range,
                obstacle_velocity,
                obstacle_width,
                segment_height,
                initial_obstacle_x,
                spawn_obstacle_x,
                tick_rate,
                max_ticks,
            ]
        );
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::InvalidConfig(msg));
        if self.population_size < FLAPPER_BREEDING_PARENTS {
            return Err(Error::PopulationTooSmall {
                required: FLAPPER_BREEDING_PARENTS,
                actual: self.population_size,
            });
        }
        if self.elite_count > self.population_size {
            return fail(format!(
                "elite_count {} exceeds population_size {}",
                self.elite_count, self.population_size
            ));
        }
        if self.generations == 0 {
            return fail("generations must be non-zero".into());
        }
        if self.hidden_width == 0 {
            return fail("hidden_width must be non-zero".into());
        }
        if !self.mutation_sigma.is_finite() || self.mutation_sigma < 0. {
            return fail(format!("mutation_sigma {} must be finite and >= 0", self.mutation_sigma));
        }
        if self.observation_scale == 0. || !self.observation_scale.is_finite() {
            return fail(format!("observation_scale {} must be finite and non-zero", self.observation_scale));
        }
        if self.gap_range.0 >= self.gap_range.1 {
            return fail(format!("gap_range {:?} is empty", self.gap_range));
        }
        if self.obstacle_velocity <= 0. {
            return fail(format!("obstacle_velocity {} must be positive", self.obstacle_velocity));
        }
        if self.obstacle_width <= 0. || self.segment_height <= 0. || self.gap_height < 0. {
            return fail("obstacle extents must be positive".into());
        }
        if self.agent_size.0 <= 0. || self.agent_size.1 <= 0. {
            return fail(format!("agent_size {:?} must be positive", self.agent_size));
        }
        Ok(())
    }

    pub fn physics(&self) -> Physics {
        Physics {
            impulse_velocity: self.impulse_velocity,
            gravity: self.gravity,
            terminal_velocity: self.terminal_velocity,
        }
    }
}
