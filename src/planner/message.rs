use crate::planner::{Ant, AntStatus};

use std::time::Duration;

/// Report an ant sends to the supervisor once its construction is over.
#[derive(Debug, Clone)]
pub struct Message {
    pub ant_id: usize,
    pub generation: usize,
    pub steps: usize,
    pub cost: f64,
    pub status: AntStatus,
    pub cpu_time: Duration,
}

impl Message {
    pub fn new(
        ant_id: usize,
        generation: usize,
        steps: usize,
        cost: f64,
        status: AntStatus,
        cpu_time: Duration,
    ) -> Self {
        Self {
            ant_id,
            generation,
            steps,
            cost,
            status,
            cpu_time,
        }
    }

    pub fn from_ant(ant_id: usize, generation: usize, ant: &Ant, cpu_time: Duration) -> Self {
        Self::new(
            ant_id,
            generation,
            ant.steps(),
            ant.cost(),
            ant.status(),
            cpu_time,
        )
    }

    pub fn id(&self) -> usize {
        self.ant_id
    }
}
