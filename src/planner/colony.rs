use crate::error::SelectionError;
use crate::grid::Grid;
use crate::planner::{Ant, AntStatus, PheromoneTable};
use crate::util::{Distance, Point};

use log::trace;
use oorandom::Rand64;

/// Path construction for single ants against a frozen pheromone table.
///
/// The table is only read here, so every ant of a generation sees the same
/// intensities regardless of the order in which the ants are walked.
pub struct ColonyStep<'a> {
    grid: &'a Grid,
    pheromones: &'a PheromoneTable,
    goal: Point,
    alpha: f64,
    beta: f64,
    max_steps: usize,
}

impl<'a> ColonyStep<'a> {
    pub fn new(
        grid: &'a Grid,
        pheromones: &'a PheromoneTable,
        goal: Point,
        alpha: f64,
        beta: f64,
        max_steps: usize,
    ) -> Self {
        ColonyStep {
            grid,
            pheromones,
            goal,
            alpha,
            beta,
            max_steps,
        }
    }

    /// Resets `ant` and walks it until it reaches the goal or runs out of steps.
    ///
    /// On error the ant is left where selection failed, still `Constructing`.
    pub fn construct(
        &self,
        ant: &mut Ant,
        rng: &mut Rand64,
    ) -> Result<AntStatus, SelectionError> {
        ant.reset();
        let mut previous: Option<Point> = None;

        loop {
            let current = ant.current_node();
            let neighbors = self.grid.adjacent(current);
            // stepping straight back is only forbidden after the second move
            let options: Vec<Point> = match previous {
                Some(previous) if ant.steps() > 1 => neighbors
                    .iter()
                    .copied()
                    .filter(|&option| option != previous)
                    .collect(),
                _ => neighbors.into_owned(),
            };

            let next = self.choose_next(current, &options, rng)?;
            ant.move_to(next, Point::distance(current, next));
            previous = Some(current);

            if next == self.goal {
                ant.finish(AntStatus::ReachedGoal);
                return Ok(AntStatus::ReachedGoal);
            }
            if ant.steps() >= self.max_steps {
                ant.finish(AntStatus::StepLimitExceeded);
                return Ok(AntStatus::StepLimitExceeded);
            }
        }
    }

    /// Roulette wheel selection among `options` as seen from `node`.
    pub fn choose_next(
        &self,
        node: Point,
        options: &[Point],
        rng: &mut Rand64,
    ) -> Result<Point, SelectionError> {
        if options.is_empty() {
            return Err(SelectionError::NoCandidates(node));
        }

        let pheromones: Vec<f64> = options
            .iter()
            .map(|&option| self.pheromones.get((node, option)))
            .collect();
        let weights = selection_weights(node, options, &pheromones, self.alpha, self.beta);
        let cumulative = cumulative_distribution(node, &weights)?;
        let index = roulette(&cumulative, rng.rand_float());
        trace!("{} -> {} (w = {:.4})", node, options[index], weights[index]);

        Ok(options[index])
    }
}

/// `pheromone^beta * (1 / distance)^alpha` for every option.
pub fn selection_weights(
    node: Point,
    options: &[Point],
    pheromones: &[f64],
    alpha: f64,
    beta: f64,
) -> Vec<f64> {
    options
        .iter()
        .zip(pheromones.iter())
        .map(|(&option, &pheromone)| {
            let visibility = 1.0 / Point::distance(node, option);
            pheromone.powf(beta) * visibility.powf(alpha)
        })
        .collect()
}

/// Normalises `weights` and accumulates them. The last entry is 1 up to rounding.
pub fn cumulative_distribution(node: Point, weights: &[f64]) -> Result<Vec<f64>, SelectionError> {
    let sum: f64 = weights.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return Err(SelectionError::DegenerateDistribution { node, sum });
    }

    Ok(weights
        .iter()
        .scan(0.0, |acc, weight| {
            *acc += weight / sum;
            Some(*acc)
        })
        .collect())
}

/// First index whose cumulative probability reaches `draw`. A draw beyond
/// the accumulated total, possible through rounding, picks the last index.
pub fn roulette(cumulative: &[f64], draw: f64) -> usize {
    cumulative
        .iter()
        .position(|&probability| probability >= draw)
        .unwrap_or_else(|| cumulative.len().saturating_sub(1))
}
