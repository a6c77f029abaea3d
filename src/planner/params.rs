use crate::error::ConfigError;
use crate::grid::{point_count, GRID_STEP, NEIGHBOR_RADIUS};
use crate::rng::os_random_seed;
use crate::util::Point;

use serde::{Deserialize, Serialize};

pub const MAX_STEPS: usize = 250;
pub const RHO: f64 = 0.1;
pub const LEARNING_RATE: f64 = 0.95;
pub const DEFAULT_PHEROMONE: f64 = 0.01;

/// How reinforcement treats edges that have no pheromone entry yet.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DepositPolicy {
    /// A first deposit creates the entry from the default intensity,
    /// evaporated like every other entry before it is reinforced.
    Materialize,
    /// Only entries already present in the table are reinforced.
    ExistingOnly,
}

impl Default for DepositPolicy {
    fn default() -> Self {
        DepositPolicy::Materialize
    }
}

#[derive(Debug, Clone)]
pub struct Params {
    pub initial_point: Point,
    pub final_point: Point,
    pub n_ants: usize,
    pub n_iterations: usize,
    pub size: (f64, f64),
    pub grid_step: f64,
    pub neighbor_radius: f64,
    pub max_steps: usize,
    pub rho: f64,
    pub learning_rate: f64,
    pub default_pheromone: f64,
    pub deposit_policy: DepositPolicy,
    pub seed: u128,
}

impl Params {
    pub fn new(
        initial_point: Point,
        final_point: Point,
        n_ants: usize,
        n_iterations: usize,
        size: (f64, f64),
        seed: Option<u128>,
    ) -> Self {
        Params {
            initial_point,
            final_point,
            n_ants,
            n_iterations,
            size,
            grid_step: GRID_STEP,
            neighbor_radius: NEIGHBOR_RADIUS,
            max_steps: MAX_STEPS,
            rho: RHO,
            learning_rate: LEARNING_RATE,
            default_pheromone: DEFAULT_PHEROMONE,
            deposit_policy: DepositPolicy::default(),
            seed: seed.unwrap_or_else(os_random_seed),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = self.size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidSize(width, height));
        }
        if self.n_ants == 0 {
            return Err(ConfigError::NoAnts);
        }
        if self.n_iterations == 0 {
            return Err(ConfigError::NoIterations);
        }

        for &point in &[self.initial_point, self.final_point] {
            if !point.is_finite() {
                return Err(ConfigError::NonFinitePoint(point));
            }
            if point.x < 0.0 || point.y < 0.0 || point.x > width || point.y > height {
                return Err(ConfigError::OutOfArea(point));
            }
        }
        if self.initial_point == self.final_point {
            return Err(ConfigError::StartIsGoal(self.initial_point));
        }

        positive("grid_step", self.grid_step)?;
        positive("neighbor_radius", self.neighbor_radius)?;
        if point_count(self.size, self.grid_step).is_none() {
            return Err(ConfigError::GridTooLarge(width, height, self.grid_step));
        }
        positive("learning_rate", self.learning_rate)?;
        positive("default_pheromone", self.default_pheromone)?;
        if self.max_steps == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_steps",
                value: 0.0,
            });
        }
        if !(0.0..=1.0).contains(&self.rho) {
            return Err(ConfigError::InvalidParameter {
                name: "rho",
                value: self.rho,
            });
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
