//! The hybrid ant colony planner.

mod ant;
mod colony;
mod message;
mod params;
mod pheromone;
mod supervisor;

pub use ant::{Ant, AntStatus};
pub use colony::{cumulative_distribution, roulette, selection_weights, ColonyStep};
pub use message::Message;
pub use params::{DepositPolicy, Params, DEFAULT_PHEROMONE, LEARNING_RATE, MAX_STEPS, RHO};
pub use pheromone::PheromoneTable;
pub use supervisor::{GenerationRecord, GenerationSummary, Supervisor};

use crate::error::PlannerError;
use crate::grid::Grid;
use crate::rng::{derive_seed, rng64};
use crate::tuner::{CostSignal, ParameterTuner};
use crate::util::Point;

use log::{debug, info, warn};
use oorandom::Rand64;
use std::io::Write;
use std::time::Instant;

/// Alternates ant colony generations with re-tuning of the exponents.
pub struct AcoPso<W: Write> {
    params: Params,
    grid: Grid,
    pheromones: PheromoneTable,
    ants: Vec<Ant>,
    alpha: f64,
    beta: f64,
    initial_cost: f64,
    best_path: Option<Vec<Point>>,
    best_length: f64,
    generation: usize,
    tuner: Box<dyn ParameterTuner>,
    rng: Rand64,
    pub supervisor: Supervisor<W>,
}

impl<W: Write> AcoPso<W> {
    /// Validates `params` and seeds the planner from `params.seed`.
    pub fn new(
        params: Params,
        tuner: Box<dyn ParameterTuner>,
        supervisor: Supervisor<W>,
    ) -> Result<Self, PlannerError> {
        let rng = rng64(params.seed);
        Self::with_rng(params, tuner, supervisor, rng)
    }

    pub fn with_rng(
        params: Params,
        tuner: Box<dyn ParameterTuner>,
        supervisor: Supervisor<W>,
        mut rng: Rand64,
    ) -> Result<Self, PlannerError> {
        params.validate()?;

        let grid = Grid::new(params.size, params.grid_step, params.neighbor_radius);
        if !grid.contains(params.final_point) {
            warn!(
                "goal {} is not a grid point, ants can only end at the step limit",
                params.final_point
            );
        }

        let (beta, alpha) = match tuner.initial_position() {
            Some(position) => position,
            None => {
                let alpha = rng.rand_float();
                (rng.rand_float(), alpha)
            }
        };

        Ok(AcoPso {
            pheromones: PheromoneTable::new(params.default_pheromone),
            ants: vec![Ant::new(params.initial_point); params.n_ants],
            grid,
            alpha,
            beta,
            initial_cost: f64::INFINITY,
            best_path: None,
            best_length: f64::INFINITY,
            generation: 0,
            tuner,
            rng,
            supervisor,
            params,
        })
    }

    /// Runs all remaining generations and returns the ants of the last one.
    pub fn run(&mut self) -> Result<&[Ant], PlannerError> {
        info!(
            "planning {} -> {} with {} ants over {} generations",
            self.params.initial_point,
            self.params.final_point,
            self.params.n_ants,
            self.params.n_iterations
        );
        while !self.is_finished() {
            self.single_generation()?;
        }
        match &self.best_path {
            Some(path) => info!(
                "best length {:.4} over {} nodes",
                self.best_length,
                path.len()
            ),
            None => warn!("no ant completed a path"),
        }

        Ok(&self.ants)
    }

    /// Constructs, evaluates and reinforces one generation, then re-tunes the
    /// exponents. Returns the best path if this generation improved it.
    pub fn single_generation(&mut self) -> Result<Option<&[Point]>, PlannerError> {
        let generation = self.generation;
        let step = ColonyStep::new(
            &self.grid,
            &self.pheromones,
            self.params.final_point,
            self.alpha,
            self.beta,
            self.params.max_steps,
        );

        for ant in self.ants.iter_mut() {
            let (sender, id) = self.supervisor.new_ant();
            let mut ant_rng = rng64(derive_seed(&mut self.rng));
            let start_time = Instant::now();
            if let Err(error) = step.construct(ant, &mut ant_rng) {
                warn!("ant {} of generation {} failed: {}", id, generation, error);
                ant.fail();
            }
            let _res = sender.send(Message::from_ant(id, generation, ant, start_time.elapsed()));
        }

        let mut improved = false;
        for ant in self.ants.iter().filter(|ant| ant.is_candidate()) {
            if ant.cost() < self.best_length {
                self.best_length = ant.cost();
                self.best_path = Some(ant.path().to_vec());
                improved = true;
            }
        }

        self.pheromones.update(
            &self.ants,
            self.params.rho,
            self.params.learning_rate,
            self.params.deposit_policy,
        )?;

        self.supervisor.aggregate(GenerationSummary {
            generation,
            alpha: self.alpha,
            beta: self.beta,
            best_length: self.best_length,
            pheromone_edges: self.pheromones.len(),
        });

        let current_cost = if generation == 0 {
            self.initial_cost = self.best_length;
            f64::INFINITY
        } else {
            self.best_length
        };
        let signal = CostSignal {
            initial_cost: self.initial_cost,
            current_cost,
            first_generation: generation == 0,
            previous: (self.beta, self.alpha),
        };
        self.tuner.optimize(&signal, &mut self.rng);
        let (beta, alpha) = self.tuner.get_best_position();
        debug!(
            "generation {}: best {:.4}, alpha {:.4} -> {:.4}, beta {:.4} -> {:.4}",
            generation, self.best_length, self.alpha, alpha, self.beta, beta
        );
        self.alpha = alpha;
        self.beta = beta;
        self.generation += 1;

        if improved {
            Ok(self.best_path.as_deref())
        } else {
            Ok(None)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.generation >= self.params.n_iterations
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pheromones(&self) -> &PheromoneTable {
        &self.pheromones
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    /// Ants of the last generation by ascending cost, failed ants last.
    pub fn ranked_ants(&self) -> Vec<&Ant> {
        let mut ranked: Vec<&Ant> = self.ants.iter().collect();
        ranked.sort_by(|a, b| a.cost().total_cmp(&b.cost()));
        ranked
    }

    pub fn best_path(&self) -> Option<&[Point]> {
        self.best_path.as_deref()
    }

    pub fn best_length(&self) -> f64 {
        self.best_length
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn generation(&self) -> usize {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::tuner::{FixedExponents, ParticleSwarmTuner, SwarmParams};
    use crate::util::path_length;
    use std::io::Sink;

    fn params(n_ants: usize, n_iterations: usize, seed: u128) -> Params {
        Params::new(
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            n_ants,
            n_iterations,
            (2.0, 2.0),
            Some(seed),
        )
    }

    fn small_swarm() -> Box<dyn ParameterTuner> {
        Box::new(ParticleSwarmTuner::new(SwarmParams::new(20, 20, (0.0, 1.0))))
    }

    fn planner(n_ants: usize, n_iterations: usize, seed: u128) -> AcoPso<Sink> {
        AcoPso::new(
            params(n_ants, n_iterations, seed),
            small_swarm(),
            Supervisor::default(),
        )
        .unwrap()
    }

    #[test]
    fn invalid_config_errors() {
        let mut invalid = params(5, 5, 1);
        invalid.final_point = invalid.initial_point;

        assert!(AcoPso::new(invalid, small_swarm(), Supervisor::default()).is_err());
    }

    #[test]
    fn exponents_start_in_unit_interval() {
        let aco = planner(1, 1, 17);

        assert!((0.0..1.0).contains(&aco.alpha()));
        assert!((0.0..1.0).contains(&aco.beta()));
        assert!(aco.best_path().is_none());
        assert!(aco.best_length().is_infinite());
    }

    #[test]
    fn single_ant_single_generation_works() {
        let mut aco = planner(1, 1, 3);
        let ants = aco.run().unwrap().to_vec();

        assert_eq!(ants.len(), 1);
        assert_eq!(aco.best_path(), Some(ants[0].path()));
        assert_eq!(aco.best_length(), ants[0].cost());
    }

    #[test]
    fn best_length_never_increases() {
        let mut aco = planner(10, 8, 5);
        aco.run().unwrap();
        let history = aco.supervisor.history();

        assert_eq!(history.len(), 8);
        for pair in history.windows(2) {
            assert!(
                pair[1].best_length <= pair[0].best_length,
                "Best length regressed from {} to {}",
                pair[0].best_length,
                pair[1].best_length
            );
        }
        assert!(aco.best_length().is_finite());
    }

    #[test]
    fn best_path_is_consistent() {
        let mut aco = planner(10, 4, 8);
        aco.run().unwrap();
        let path = aco.best_path().unwrap();

        assert_eq!(path[0], Point::new(0.0, 0.0));
        assert!((path_length(path) - aco.best_length()).abs() < 1e-9);
    }

    #[test]
    fn pheromones_stay_non_negative() {
        let mut aco = planner(8, 5, 21);
        while !aco.is_finished() {
            aco.single_generation().unwrap();
            assert!(aco.pheromones().iter().all(|(_, &value)| value >= 0.0));
        }
        assert!(!aco.pheromones().is_empty(), "Deposits should create entries.");
    }

    #[test]
    fn existing_only_policy_keeps_table_empty() {
        let mut params = params(5, 3, 2);
        params.deposit_policy = DepositPolicy::ExistingOnly;
        let mut aco = AcoPso::new(params, small_swarm(), Supervisor::default()).unwrap();
        aco.run().unwrap();

        assert!(aco.pheromones().is_empty());
    }

    #[test]
    fn same_seed_same_result() {
        let mut first = planner(6, 3, 77);
        let mut second = planner(6, 3, 77);
        first.run().unwrap();
        second.run().unwrap();

        assert_eq!(first.best_path(), second.best_path());
        assert_eq!(first.best_length(), second.best_length());
        assert_eq!(first.alpha(), second.alpha());
    }

    #[test]
    fn fixed_exponents_are_kept() {
        let mut aco = AcoPso::new(
            params(3, 2, 4),
            Box::new(FixedExponents::new(0.8, 0.3)),
            Supervisor::default(),
        )
        .unwrap();
        assert_eq!((aco.alpha(), aco.beta()), (0.8, 0.3));
        aco.run().unwrap();

        assert_eq!(aco.alpha(), 0.8);
        assert_eq!(aco.beta(), 0.3);
        let history = aco.supervisor.history();
        assert_eq!(history.len(), 2);
        assert!(history
            .iter()
            .all(|record| record.alpha == 0.8 && record.beta == 0.3));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let mut oversized = params(1, 1, 3);
        oversized.size = (1e300, 1e300);
        oversized.final_point = Point::new(1.0, 1.0);

        assert!(matches!(
            AcoPso::new(oversized, small_swarm(), Supervisor::default()),
            Err(PlannerError::Config(ConfigError::GridTooLarge(_, _, _)))
        ));
    }

    #[test]
    fn ranked_ants_works() {
        let mut aco = planner(12, 2, 9);
        aco.run().unwrap();
        let ranked = aco.ranked_ants();

        assert_eq!(ranked.len(), 12);
        assert!(ranked.windows(2).all(|pair| pair[0].cost() <= pair[1].cost()));
    }

    #[test]
    fn failed_ants_do_not_abort_run() {
        let mut params = params(4, 2, 6);
        params.neighbor_radius = 0.3;
        let mut aco = AcoPso::new(params, small_swarm(), Supervisor::default()).unwrap();
        let ants = aco.run().unwrap();

        assert!(ants.iter().all(|ant| ant.status() == AntStatus::Failed));
        assert!(aco.best_path().is_none());
        assert_eq!(aco.supervisor.history()[1].failed, 4);
    }
}
