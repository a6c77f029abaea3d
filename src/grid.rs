//! Discretisation of the rectangular search area into candidate waypoints.

use crate::util::{Distance, Point};

use log::{debug, warn};
use std::borrow::Cow;
use std::collections::HashMap;

/// Spacing between neighbouring grid points along both axes.
pub const GRID_STEP: f64 = 0.5;
/// Distance within which two grid points are considered adjacent.
pub const NEIGHBOR_RADIUS: f64 = 0.8;

/// Largest number of grid points a planner is built over.
pub const MAX_GRID_POINTS: usize = 1_000_000;

// tolerance used when deciding whether `size` itself is an axis value
const AXIS_EPSILON: f64 = 1e-9;

/// The cartesian product of two evenly spaced axes covering `[0, size.0] x [0, size.1]`.
///
/// Adjacency for the configured radius is computed once on construction, so
/// ants never have to scan the whole grid while walking.
#[derive(Debug, Clone)]
pub struct Grid {
    x_axis: Vec<f64>,
    y_axis: Vec<f64>,
    points: Vec<Point>,
    step: f64,
    radius: f64,
    adjacency: HashMap<Point, Vec<Point>>,
}

impl Grid {
    /// Builds the grid for `size`. Sizes rejected by [`point_count`] collapse
    /// to a single point on the offending axis.
    pub fn new(size: (f64, f64), step: f64, radius: f64) -> Self {
        let x_axis = axis(size.0, step);
        let y_axis = axis(size.1, step);

        // row major: y outer, x inner
        let points: Vec<Point> = y_axis
            .iter()
            .flat_map(|&y| x_axis.iter().map(move |&x| Point::new(x, y)))
            .collect();

        let mut grid = Grid {
            x_axis,
            y_axis,
            points,
            step,
            radius,
            adjacency: HashMap::new(),
        };
        grid.adjacency = grid.build_adjacency();
        debug!(
            "grid of {}x{} points, {} adjacency entries",
            grid.x_axis.len(),
            grid.y_axis.len(),
            grid.adjacency.values().map(Vec::len).sum::<usize>()
        );

        grid
    }

    /// Grid with the default step and neighbour radius.
    pub fn with_size(size: (f64, f64)) -> Self {
        Grid::new(size, GRID_STEP, NEIGHBOR_RADIUS)
    }

    pub fn x_axis(&self) -> &[f64] {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &[f64] {
        &self.y_axis
    }

    /// All grid points in row major order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn contains(&self, point: Point) -> bool {
        self.adjacency.contains_key(&point)
    }

    /// Every grid point whose distance to `node` lies in `(0, radius]`, in row major order.
    ///
    /// `node` need not be a grid point itself.
    pub fn neighbors(&self, node: Point, radius: f64) -> Vec<Point> {
        self.points
            .iter()
            .copied()
            .filter(|&candidate| {
                let distance = Point::distance(node, candidate);
                distance > 0.0 && distance <= radius
            })
            .collect()
    }

    /// Neighbours of `node` for the grid's own radius. Served from the
    /// precomputed adjacency for grid points, scanned otherwise.
    pub fn adjacent(&self, node: Point) -> Cow<'_, [Point]> {
        match self.adjacency.get(&node) {
            Some(neighbors) => Cow::Borrowed(neighbors.as_slice()),
            None => Cow::Owned(self.neighbors(node, self.radius)),
        }
    }

    fn build_adjacency(&self) -> HashMap<Point, Vec<Point>> {
        let reach = (self.radius / self.step + AXIS_EPSILON).floor() as isize;
        let (columns, rows) = (self.x_axis.len() as isize, self.y_axis.len() as isize);
        let mut adjacency = HashMap::with_capacity(self.points.len());

        for row in 0..rows {
            for column in 0..columns {
                let node = self.points[(row * columns + column) as usize];
                let mut neighbors = Vec::new();
                // walking the offsets row major keeps the same order as a full scan
                for other_row in (row - reach).max(0)..=(row + reach).min(rows - 1) {
                    for other_column in (column - reach).max(0)..=(column + reach).min(columns - 1)
                    {
                        let candidate = self.points[(other_row * columns + other_column) as usize];
                        let distance = Point::distance(node, candidate);
                        if distance > 0.0 && distance <= self.radius {
                            neighbors.push(candidate);
                        }
                    }
                }
                adjacency.insert(node, neighbors);
            }
        }

        adjacency
    }
}

/// Number of values on an axis covering `[0, length]`, `None` beyond [`MAX_GRID_POINTS`].
pub fn axis_len(length: f64, step: f64) -> Option<usize> {
    let steps = (length / step + AXIS_EPSILON).floor();
    if !steps.is_finite() || steps < 0.0 || steps >= MAX_GRID_POINTS as f64 {
        return None;
    }
    (steps as usize).checked_add(1)
}

/// Number of grid points for `size`, `None` if it exceeds [`MAX_GRID_POINTS`].
pub fn point_count(size: (f64, f64), step: f64) -> Option<usize> {
    axis_len(size.0, step)?
        .checked_mul(axis_len(size.1, step)?)
        .filter(|&count| count <= MAX_GRID_POINTS)
}

fn axis(length: f64, step: f64) -> Vec<f64> {
    let count = axis_len(length, step).unwrap_or_else(|| {
        warn!("axis of length {} with step {} is too large", length, step);
        1
    });
    (0..count).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    #[test]
    fn axes_include_size_works() {
        let grid = Grid::with_size((2.0, 4.0));

        assert_eq!(grid.x_axis(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(grid.y_axis().len(), 9, "0..=4 in steps of 0.5 has 9 values.");
        assert_eq!(grid.points().len(), 45, "A 5x9 grid should have 45 points.");
        assert!(grid.contains(Point::new(2.0, 3.5)));
    }

    #[test]
    fn uneven_size_truncates_works() {
        let grid = Grid::with_size((1.2, 1.0));

        assert_eq!(grid.x_axis(), &[0.0, 0.5, 1.0]);
        assert!(!grid.contains(Point::new(1.2, 1.0)));
    }

    #[test]
    fn point_count_works() {
        assert_eq!(point_count((2.0, 4.0), GRID_STEP), Some(45));
        assert_eq!(point_count((1e300, 1e300), GRID_STEP), None);
        assert_eq!(
            point_count((2.0, 4.0), 1e-4),
            None,
            "20001x40001 points exceed the cap."
        );
        assert_eq!(point_count((1.0, f64::INFINITY), GRID_STEP), None);
    }

    #[test]
    fn oversized_axis_collapses() {
        let grid = Grid::new((1e300, 1.0), GRID_STEP, NEIGHBOR_RADIUS);

        assert_eq!(grid.x_axis(), &[0.0]);
        assert_eq!(grid.y_axis().len(), 3);
    }

    #[test]
    fn points_are_row_major() {
        let grid = Grid::with_size((1.0, 1.0));

        assert_eq!(grid.points()[0], Point::new(0.0, 0.0));
        assert_eq!(grid.points()[1], Point::new(0.5, 0.0));
        assert_eq!(grid.points()[3], Point::new(0.0, 0.5));
    }

    #[test]
    fn corner_neighbors_works() {
        let grid = Grid::with_size((2.0, 2.0));
        let neighbors = grid.neighbors(Point::new(0.0, 0.0), NEIGHBOR_RADIUS);

        assert_eq!(
            neighbors,
            vec![
                Point::new(0.5, 0.0),
                Point::new(0.0, 0.5),
                Point::new(0.5, 0.5)
            ],
            "A corner has exactly three neighbours."
        );
    }

    #[test]
    fn interior_neighbors_exclude_self() {
        let grid = Grid::with_size((2.0, 2.0));
        let node = Point::new(1.0, 1.0);
        let neighbors = grid.neighbors(node, NEIGHBOR_RADIUS);

        assert_eq!(neighbors.len(), 8, "Interior points have eight neighbours.");
        assert!(!neighbors.contains(&node), "A node is never its own neighbour.");
    }

    #[test]
    fn adjacency_matches_scan() {
        for &radius in &[0.5, 0.8, 1.2] {
            let grid = Grid::new((3.0, 2.0), GRID_STEP, radius);
            for &point in grid.points() {
                assert_eq!(
                    grid.adjacent(point).to_vec(),
                    grid.neighbors(point, radius),
                    "Precomputed adjacency differs from a scan at {} for radius {}.",
                    point,
                    radius
                );
            }
        }
    }

    #[test]
    fn off_grid_adjacent_scans() {
        let grid = Grid::with_size((2.0, 2.0));
        let node = Point::new(0.25, 0.25);

        assert!(!grid.contains(node));
        assert_eq!(grid.adjacent(node).len(), 8);
        assert_eq!(grid.adjacent(node).to_vec(), grid.neighbors(node, NEIGHBOR_RADIUS));
    }

    #[test]
    fn goal_reachable_works() {
        let grid = Grid::with_size((2.0, 2.0));
        let start = Point::new(0.0, 0.0);
        let goal = Point::new(2.0, 2.0);

        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            for &next in grid.adjacent(node).iter() {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        assert!(seen.contains(&goal), "The goal should be reachable from the start.");
        assert_eq!(seen.len(), grid.points().len(), "The grid should be connected.");
    }
}
