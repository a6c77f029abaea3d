//! Output of finished paths for external renderers.

pub mod svg;
mod waypoints;

pub use svg::Svg;
pub use waypoints::{read_path_csv, write_path_csv};
