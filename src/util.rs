mod distance;
mod point;
pub mod scale;

pub use distance::{path_length, Distance};
pub use point::{Edge, Point};
