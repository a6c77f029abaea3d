pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod planner;
pub mod rng;
pub mod tuner;
pub mod util;
