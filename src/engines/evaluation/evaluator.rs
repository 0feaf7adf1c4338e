use crate::engines::optimization::space::ParameterMap;
use crate::error::Result;

/// Objective pair produced by one fitness evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objectives {
    /// Cumulative PnL over the dataset, maximized.
    pub profit: f64,
    /// Maximum drawdown of the cumulative PnL curve, minimized.
    pub drawdown: f64,
}

/// Maps a parameter vector to its objective pair against a fixed dataset.
/// Implementations must be deterministic for reproducible runs, and are
/// called from multiple threads within one generation.
pub trait FitnessEvaluator: Send + Sync {
    fn evaluate(&self, parameters: &ParameterMap) -> Result<Objectives>;
}
