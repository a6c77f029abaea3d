use crate::util::Point;

use serde::Serialize;

/// Where an ant stands in its path construction.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AntStatus {
    Constructing,
    ReachedGoal,
    StepLimitExceeded,
    /// No next node could be selected; the ant's cost is infinite.
    Failed,
}

#[derive(Serialize, Debug, Clone)]
pub struct Ant {
    initial_point: Point,
    path: Vec<Point>,
    cost: f64,
    status: AntStatus,
}

impl Ant {
    pub fn new(initial_point: Point) -> Self {
        Ant {
            initial_point,
            path: vec![initial_point],
            cost: 0.0,
            status: AntStatus::Constructing,
        }
    }

    pub fn reset(&mut self) {
        self.path.clear();
        self.path.push(self.initial_point);
        self.cost = 0.0;
        self.status = AntStatus::Constructing;
    }

    pub fn move_to(&mut self, node: Point, distance: f64) {
        self.path.push(node);
        self.cost += distance;
    }

    pub(crate) fn finish(&mut self, status: AntStatus) {
        self.status = status;
    }

    /// Marks the construction as failed. The path walked so far is kept for
    /// inspection but the ant no longer competes for the best path.
    pub(crate) fn fail(&mut self) {
        self.cost = f64::INFINITY;
        self.status = AntStatus::Failed;
    }

    pub fn initial_point(&self) -> Point {
        self.initial_point
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn status(&self) -> AntStatus {
        self.status
    }

    /// Number of moves made so far.
    pub fn steps(&self) -> usize {
        self.path.len() - 1
    }

    pub fn current_node(&self) -> Point {
        // the path always holds at least the initial point
        self.path[self.path.len() - 1]
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.path.iter().copied().zip(self.path.iter().copied().skip(1))
    }

    /// Whether this ant's path may be compared against the best path and deposit pheromone.
    pub fn is_candidate(&self) -> bool {
        matches!(
            self.status,
            AntStatus::ReachedGoal | AntStatus::StepLimitExceeded
        )
    }
}
