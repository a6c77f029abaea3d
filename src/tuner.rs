//! Re-tuning of the colony's exponents between generations.

mod fixed;
mod particle_swarm;
mod swarm;

pub use fixed::FixedExponents;
pub use particle_swarm::ParticleSwarmTuner;
pub use swarm::{Swarm, SwarmParams};

use oorandom::Rand64;

/// What the planner knows about its progress when asking for new exponents.
#[derive(Debug, Clone, Copy)]
pub struct CostSignal {
    /// Best length after the first generation.
    pub initial_cost: f64,
    /// Best length so far, infinite during the first generation.
    pub current_cost: f64,
    pub first_generation: bool,
    /// Exponents used by the generation that just finished, as `(beta, alpha)`.
    pub previous: (f64, f64),
}

impl CostSignal {
    /// Ratio of the current to the initial best length, if both are known.
    pub fn improvement(&self) -> Option<f64> {
        if self.first_generation
            || !self.initial_cost.is_finite()
            || !self.current_cost.is_finite()
            || self.initial_cost <= 0.0
        {
            return None;
        }

        Some(self.current_cost / self.initial_cost)
    }
}

/// Suggests exponents for the next generation.
pub trait ParameterTuner {
    fn optimize(&mut self, signal: &CostSignal, rng: &mut Rand64);

    /// The tuned `(beta, alpha)` pair.
    fn get_best_position(&self) -> (f64, f64);

    /// `(beta, alpha)` for the first generation. `None` lets the planner draw them.
    fn initial_position(&self) -> Option<(f64, f64)> {
        None
    }
}
