mod point_scaler;
mod scaler;

pub use point_scaler::PointScaler;
pub use scaler::Scaler;
