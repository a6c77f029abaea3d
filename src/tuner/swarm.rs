use log::trace;
use oorandom::Rand64;

/// Constriction coefficient settings of Clerc and Kennedy.
pub const INERTIA: f64 = 0.7298;
pub const COGNITIVE: f64 = 1.49618;
pub const SOCIAL: f64 = 1.49618;

#[derive(Debug, Clone, Copy)]
pub struct SwarmParams {
    pub particles: usize,
    pub iterations: usize,
    /// Lower and upper bound shared by all dimensions.
    pub bounds: (f64, f64),
    pub inertia: f64,
    pub cognitive: f64,
    pub social: f64,
    /// Maximum speed per dimension as a fraction of the bound range.
    pub velocity_clamp: f64,
    /// The search stops once the best fitness drops below this value.
    pub tolerance: f64,
}

impl SwarmParams {
    pub fn new(particles: usize, iterations: usize, bounds: (f64, f64)) -> Self {
        SwarmParams {
            particles,
            iterations,
            bounds,
            inertia: INERTIA,
            cognitive: COGNITIVE,
            social: SOCIAL,
            velocity_clamp: 0.2,
            tolerance: 1e-12,
        }
    }
}

impl Default for SwarmParams {
    fn default() -> Self {
        SwarmParams::new(300, 100, (0.0, 1.0))
    }
}

#[derive(Debug, Clone)]
struct Particle<const D: usize> {
    position: [f64; D],
    velocity: [f64; D],
    best_position: [f64; D],
    best_fitness: f64,
}

/// Global best particle swarm minimising an arbitrary objective over a box.
#[derive(Debug, Clone)]
pub struct Swarm<const D: usize> {
    params: SwarmParams,
    particles: Vec<Particle<D>>,
    best_position: [f64; D],
    best_fitness: f64,
}

impl<const D: usize> Swarm<D> {
    pub fn new(params: SwarmParams) -> Self {
        let (lower, upper) = params.bounds;
        Swarm {
            params,
            particles: Vec::with_capacity(params.particles),
            best_position: [(lower + upper) / 2.0; D],
            best_fitness: f64::INFINITY,
        }
    }

    pub fn params(&self) -> &SwarmParams {
        &self.params
    }

    pub fn best_position(&self) -> [f64; D] {
        self.best_position
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Scatters a fresh swarm and minimises `objective`, returning the best position found.
    pub fn optimize<F>(&mut self, objective: F, rng: &mut Rand64) -> [f64; D]
    where
        F: Fn(&[f64; D]) -> f64,
    {
        let (lower, upper) = self.params.bounds;
        let range = upper - lower;
        let max_speed = range * self.params.velocity_clamp;

        self.best_fitness = f64::INFINITY;
        self.particles.clear();
        for _ in 0..self.params.particles {
            let mut position = [0.0; D];
            let mut velocity = [0.0; D];
            for d in 0..D {
                position[d] = lower + rng.rand_float() * range;
                velocity[d] = (rng.rand_float() * 2.0 - 1.0) * max_speed;
            }
            let fitness = objective(&position);
            if fitness < self.best_fitness {
                self.best_fitness = fitness;
                self.best_position = position;
            }
            self.particles.push(Particle {
                position,
                velocity,
                best_position: position,
                best_fitness: fitness,
            });
        }

        for iteration in 0..self.params.iterations {
            if self.best_fitness < self.params.tolerance {
                trace!("swarm converged after {} iterations", iteration);
                break;
            }

            let global_best = self.best_position;
            for particle in self.particles.iter_mut() {
                for d in 0..D {
                    let cognitive = self.params.cognitive
                        * rng.rand_float()
                        * (particle.best_position[d] - particle.position[d]);
                    let social = self.params.social
                        * rng.rand_float()
                        * (global_best[d] - particle.position[d]);
                    let velocity = self.params.inertia * particle.velocity[d] + cognitive + social;
                    particle.velocity[d] = velocity.max(-max_speed).min(max_speed);
                    particle.position[d] =
                        (particle.position[d] + particle.velocity[d]).max(lower).min(upper);
                }

                let fitness = objective(&particle.position);
                if fitness < particle.best_fitness {
                    particle.best_fitness = fitness;
                    particle.best_position = particle.position;
                }
                if fitness < self.best_fitness {
                    self.best_fitness = fitness;
                    self.best_position = particle.position;
                }
            }
        }

        self.best_position
    }
}
