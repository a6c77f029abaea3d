//! Planner configuration files.

use crate::error::ConfigError;
use crate::grid::{GRID_STEP, NEIGHBOR_RADIUS};
use crate::planner::{DepositPolicy, Params, DEFAULT_PHEROMONE, LEARNING_RATE, MAX_STEPS, RHO};
use crate::rng::os_random_seed;
use crate::tuner::{FixedExponents, ParameterTuner, ParticleSwarmTuner, SwarmParams};
use crate::util::Point;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub initial_point: Point,
    pub final_point: Point,
    pub n_ants: usize,
    pub n_iterations: usize,
    pub size: (f64, f64),
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_grid_step")]
    pub grid_step: f64,
    #[serde(default = "default_neighbor_radius")]
    pub neighbor_radius: f64,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_rho")]
    pub rho: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_pheromone")]
    pub default_pheromone: f64,
    #[serde(default)]
    pub deposit_policy: DepositPolicy,
    #[serde(default)]
    pub tuner: TunerConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TunerConfig {
    Pso {
        #[serde(default = "default_particles")]
        particles: usize,
        #[serde(default = "default_swarm_iterations")]
        iterations: usize,
        #[serde(default = "default_bounds")]
        bounds: (f64, f64),
    },
    Fixed {
        alpha: f64,
        beta: f64,
    },
}

impl Default for TunerConfig {
    fn default() -> Self {
        TunerConfig::Pso {
            particles: default_particles(),
            iterations: default_swarm_iterations(),
            bounds: default_bounds(),
        }
    }
}

fn default_grid_step() -> f64 {
    GRID_STEP
}

fn default_neighbor_radius() -> f64 {
    NEIGHBOR_RADIUS
}

fn default_max_steps() -> usize {
    MAX_STEPS
}

fn default_rho() -> f64 {
    RHO
}

fn default_learning_rate() -> f64 {
    LEARNING_RATE
}

fn default_pheromone() -> f64 {
    DEFAULT_PHEROMONE
}

fn default_particles() -> usize {
    300
}

fn default_swarm_iterations() -> usize {
    100
}

fn default_bounds() -> (f64, f64) {
    (0.0, 1.0)
}

impl PlannerConfig {
    /// Reads a `.yaml`/`.yml` or `.ron` file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("ron") => Self::from_ron_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::de::from_str(content)?)
    }

    /// Validated planner parameters. An absent seed is drawn from the OS.
    pub fn params(&self) -> Result<Params, ConfigError> {
        let seed = self.seed.map(u128::from).unwrap_or_else(os_random_seed);
        let mut params = Params::new(
            self.initial_point,
            self.final_point,
            self.n_ants,
            self.n_iterations,
            self.size,
            Some(seed),
        );
        params.grid_step = self.grid_step;
        params.neighbor_radius = self.neighbor_radius;
        params.max_steps = self.max_steps;
        params.rho = self.rho;
        params.learning_rate = self.learning_rate;
        params.default_pheromone = self.default_pheromone;
        params.deposit_policy = self.deposit_policy;
        params.validate()?;
        self.validate_tuner()?;

        Ok(params)
    }

    pub fn tuner(&self) -> Box<dyn ParameterTuner> {
        match self.tuner {
            TunerConfig::Pso {
                particles,
                iterations,
                bounds,
            } => Box::new(ParticleSwarmTuner::new(SwarmParams::new(
                particles, iterations, bounds,
            ))),
            TunerConfig::Fixed { alpha, beta } => Box::new(FixedExponents::new(alpha, beta)),
        }
    }

    fn validate_tuner(&self) -> Result<(), ConfigError> {
        match self.tuner {
            TunerConfig::Pso {
                particles,
                bounds: (lower, upper),
                ..
            } => {
                if particles == 0 {
                    return Err(ConfigError::InvalidParameter {
                        name: "tuner.particles",
                        value: 0.0,
                    });
                }
                if !(lower.is_finite() && upper.is_finite() && lower >= 0.0 && lower < upper) {
                    return Err(ConfigError::InvalidParameter {
                        name: "tuner.bounds",
                        value: upper - lower,
                    });
                }
            }
            TunerConfig::Fixed { alpha, beta } => {
                for &(name, value) in &[("tuner.alpha", alpha), ("tuner.beta", beta)] {
                    if !(value.is_finite() && value >= 0.0) {
                        return Err(ConfigError::InvalidParameter { name, value });
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = "
initial_point: {x: 0, y: 0}
final_point: {x: 2, y: 3.5}
n_ants: 100
n_iterations: 10
size: [2, 4]
seed: 42
";

    const RON: &str = "(
    initial_point: (x: 0.0, y: 0.0),
    final_point: (x: 2.0, y: 3.5),
    n_ants: 100,
    n_iterations: 10,
    size: (2.0, 4.0),
    seed: Some(42),
    deposit_policy: existing_only,
    tuner: fixed(alpha: 0.6, beta: 0.4),
)";

    #[test]
    fn yaml_defaults_works() {
        let config = PlannerConfig::from_yaml_str(YAML).unwrap();
        let params = config.params().unwrap();

        assert_eq!(config.final_point, Point::new(2.0, 3.5));
        assert_eq!(config.tuner, TunerConfig::default());
        assert_eq!(params.seed, 42);
        assert_eq!(params.max_steps, 250);
        assert_eq!(params.deposit_policy, DepositPolicy::Materialize);
        assert_eq!(config.tuner().initial_position(), None);
    }

    #[test]
    fn ron_works() {
        let config = PlannerConfig::from_ron_str(RON).unwrap();

        assert_eq!(config.size, (2.0, 4.0));
        assert_eq!(config.deposit_policy, DepositPolicy::ExistingOnly);
        assert_eq!(config.tuner().initial_position(), Some((0.4, 0.6)));
        assert_eq!(config.tuner().get_best_position(), (0.4, 0.6));
    }

    #[test]
    fn yaml_tuner_works() {
        let yaml = format!("{}tuner:\n  pso:\n    particles: 50\n", YAML);
        let config = PlannerConfig::from_yaml_str(&yaml).unwrap();

        assert_eq!(
            config.tuner,
            TunerConfig::Pso {
                particles: 50,
                iterations: 100,
                bounds: (0.0, 1.0)
            }
        );
    }

    #[test]
    fn invalid_config_errors() {
        let mut config = PlannerConfig::from_yaml_str(YAML).unwrap();
        config.n_ants = 0;
        assert!(matches!(config.params(), Err(ConfigError::NoAnts)));

        let mut config = PlannerConfig::from_yaml_str(YAML).unwrap();
        config.tuner = TunerConfig::Pso {
            particles: 10,
            iterations: 10,
            bounds: (1.0, 0.0),
        };
        assert!(matches!(
            config.params(),
            Err(ConfigError::InvalidParameter {
                name: "tuner.bounds",
                ..
            })
        ));
    }

    #[test]
    fn unknown_extension_errors() {
        let result = PlannerConfig::from_file(Path::new("Cargo.toml"));

        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn missing_file_errors() {
        let result = PlannerConfig::from_file(Path::new("does/not/exist.yaml"));

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
