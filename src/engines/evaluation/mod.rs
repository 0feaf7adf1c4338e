pub mod evaluator;
pub mod metrics;

pub use evaluator::{FitnessEvaluator, Objectives};
