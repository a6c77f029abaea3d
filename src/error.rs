use crate::util::Point;

use std::path::PathBuf;
use thiserror::Error;

/// Rejected planner configurations. Nothing is run when one of these occurs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("search area size must be positive and finite, got ({0}, {1})")]
    InvalidSize(f64, f64),
    #[error("at least one ant is required")]
    NoAnts,
    #[error("at least one generation is required")]
    NoIterations,
    #[error("start and goal coincide at {0}")]
    StartIsGoal(Point),
    #[error("{0} lies outside the search area")]
    OutOfArea(Point),
    #[error("{0} has non-finite coordinates")]
    NonFinitePoint(Point),
    #[error("grid of ({0}, {1}) with step {2} has too many points")]
    GridTooLarge(f64, f64, f64),
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid RON config: {0}")]
    Ron(#[from] ron::Error),
}

/// Failure to pick a next node for an ant. Local to that ant's construction.
#[derive(Error, Debug, PartialEq)]
pub enum SelectionError {
    #[error("no candidate nodes around {0}")]
    NoCandidates(Point),
    #[error("selection weights around {node} sum to {sum}")]
    DegenerateDistribution { node: Point, sum: f64 },
}

/// Errors that abort a whole planning run.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("internal consistency violated: {0}")]
    InternalConsistency(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing to export: {0}")]
    EmptyPath(String),
    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),
    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("io failed: {0}")]
    Io(#[from] std::io::Error),
}
