use crate::error::PlannerError;
use crate::planner::{Ant, DepositPolicy};
use crate::util::Edge;

use std::collections::HashMap;

/// Sparse pheromone intensities per directed edge. Edges without an entry
/// read as the default intensity.
#[derive(Debug, Clone)]
pub struct PheromoneTable {
    table: HashMap<Edge, f64>,
    default: f64,
}

impl PheromoneTable {
    pub fn new(default: f64) -> Self {
        PheromoneTable {
            table: HashMap::new(),
            default,
        }
    }

    pub fn get(&self, edge: Edge) -> f64 {
        self.table.get(&edge).copied().unwrap_or(self.default)
    }

    /// Whether `edge` has a stored entry, as opposed to reading the default.
    pub fn contains(&self, edge: Edge) -> bool {
        self.table.contains_key(&edge)
    }

    pub fn insert(&mut self, edge: Edge, intensity: f64) {
        self.table.insert(edge, intensity);
    }

    pub fn default_intensity(&self) -> f64 {
        self.default
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Edge, &f64)> {
        self.table.iter()
    }

    /// Evaporates every stored entry by `rho`, then adds `learning_rate / cost`
    /// for each edge step of each candidate ant. An edge travelled twice by one
    /// ant is reinforced twice.
    pub fn update(
        &mut self,
        ants: &[Ant],
        rho: f64,
        learning_rate: f64,
        policy: DepositPolicy,
    ) -> Result<(), PlannerError> {
        // validate before touching the table so an error leaves it intact
        for ant in ants.iter().filter(|ant| ant.is_candidate()) {
            if ant.cost() <= 0.0 || ant.cost().is_nan() {
                return Err(PlannerError::InternalConsistency(format!(
                    "ant from {} finished with cost {} after {} steps",
                    ant.initial_point(),
                    ant.cost(),
                    ant.steps()
                )));
            }
        }

        let retain = 1.0 - rho;
        for intensity in self.table.values_mut() {
            *intensity *= retain;
        }

        let materialized = self.default * retain;
        for ant in ants.iter().filter(|ant| ant.is_candidate()) {
            let deposit = learning_rate / ant.cost();
            for edge in ant.iter_edges() {
                match policy {
                    DepositPolicy::Materialize => {
                        *self.table.entry(edge).or_insert(materialized) += deposit;
                    }
                    DepositPolicy::ExistingOnly => {
                        if let Some(intensity) = self.table.get_mut(&edge) {
                            *intensity += deposit;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
