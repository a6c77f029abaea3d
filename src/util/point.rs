use decorum::R64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A position in the search area. Coordinates are always finite, which lets
/// points be compared by value and used as map keys.
#[derive(Serialize, Deserialize, Debug, Copy, Clone)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Directed edge, travelled from `.0` to `.1`.
pub type Edge = (Point, Point);

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        R64::from_inner(self.x).hash(state);
        R64::from_inner(self.y).hash(state);
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
