use crate::util::Point;

pub trait Distance<T> {
    fn distance(p1: T, p2: T) -> f64;
}

impl Distance<Point> for Point {
    fn distance(p1: Point, p2: Point) -> f64 {
        (p2.x - p1.x).hypot(p2.y - p1.y)
    }
}

/// Sum of the euclidean lengths of consecutive path segments.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2)
        .map(|pair| Point::distance(pair[0], pair[1]))
        .sum()
}
