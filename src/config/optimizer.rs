use super::traits::ConfigSection;
use crate::error::StratoptError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Number of individuals kept alive between generations.
    pub population_size: usize,
    /// Number of variation/truncation cycles to run.
    pub generations: usize,
    /// Strategy identifier ("obv", "ichimoku", "sup_res").
    pub strategy: String,
    /// Cap on consecutive rejected candidates before the search is declared
    /// exhausted. The naive algorithm loops forever on small discrete spaces.
    pub max_retries: usize,
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 20,
            strategy: "obv".to_string(),
            max_retries: 10_000,
            seed: None,
        }
    }
}

impl ConfigSection for OptimizerConfig {
    fn section_name() -> &'static str {
        "optimizer"
    }

    fn validate(&self) -> Result<(), StratoptError> {
        if self.population_size < 2 {
            return Err(StratoptError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(StratoptError::Configuration(
                "Retry cap must be positive".to_string(),
            ));
        }
        if self.strategy.trim().is_empty() {
            return Err(StratoptError::Configuration(
                "Strategy identifier must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
