use crate::tuner::{CostSignal, ParameterTuner, Swarm, SwarmParams};

use log::debug;
use oorandom::Rand64;

/// Tunes `(beta, alpha)` with a particle swarm.
///
/// No fresh colony is run per candidate. Instead the swarm is steered towards
/// a target derived from the cost signal: the previous exponents while the
/// colony keeps improving, a freshly drawn position while it stalls, and a
/// blend of both in between.
pub struct ParticleSwarmTuner {
    swarm: Swarm<2>,
    best: (f64, f64),
}

impl ParticleSwarmTuner {
    pub fn new(params: SwarmParams) -> Self {
        let swarm = Swarm::new(params);
        let [beta, alpha] = swarm.best_position();
        ParticleSwarmTuner {
            swarm,
            best: (beta, alpha),
        }
    }

    fn target(&self, signal: &CostSignal, rng: &mut Rand64) -> [f64; 2] {
        let (lower, upper) = self.swarm.params().bounds;
        let explore = [
            lower + rng.rand_float() * (upper - lower),
            lower + rng.rand_float() * (upper - lower),
        ];
        let previous = [
            signal.previous.0.max(lower).min(upper),
            signal.previous.1.max(lower).min(upper),
        ];
        let weight = signal
            .improvement()
            .map(|ratio| ratio.max(0.0).min(1.0))
            .unwrap_or(1.0);

        [
            weight * explore[0] + (1.0 - weight) * previous[0],
            weight * explore[1] + (1.0 - weight) * previous[1],
        ]
    }
}

impl Default for ParticleSwarmTuner {
    fn default() -> Self {
        ParticleSwarmTuner::new(SwarmParams::default())
    }
}

impl ParameterTuner for ParticleSwarmTuner {
    fn optimize(&mut self, signal: &CostSignal, rng: &mut Rand64) {
        let target = self.target(signal, rng);
        let best = self.swarm.optimize(
            |p: &[f64; 2]| (p[0] - target[0]).powi(2) + (p[1] - target[1]).powi(2),
            rng,
        );
        debug!(
            "swarm target ({:.4}, {:.4}), best ({:.4}, {:.4}) at fitness {:.2e}",
            target[0],
            target[1],
            best[0],
            best[1],
            self.swarm.best_fitness()
        );
        self.best = (best[0], best[1]);
    }

    fn get_best_position(&self) -> (f64, f64) {
        self.best
    }
}
