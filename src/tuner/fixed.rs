use crate::tuner::{CostSignal, ParameterTuner};

use oorandom::Rand64;

/// Keeps the exponents constant for the whole run.
#[derive(Debug, Clone, Copy)]
pub struct FixedExponents {
    pub alpha: f64,
    pub beta: f64,
}

impl FixedExponents {
    pub fn new(alpha: f64, beta: f64) -> Self {
        FixedExponents { alpha, beta }
    }
}

impl ParameterTuner for FixedExponents {
    fn optimize(&mut self, _signal: &CostSignal, _rng: &mut Rand64) {}

    fn get_best_position(&self) -> (f64, f64) {
        (self.beta, self.alpha)
    }

    fn initial_position(&self) -> Option<(f64, f64)> {
        Some(self.get_best_position())
    }
}
