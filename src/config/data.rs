use super::traits::ConfigSection;
use crate::data::types::Timeframe;
use crate::error::StratoptError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub csv_path: String,
    /// Target candle timeframe ("1m", "5m", "15m", "30m", "1h", "4h", "12h", "1d").
    pub timeframe: String,
    /// Minimum rows required after resampling for a meaningful backtest.
    pub min_rows: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: "data/candles.csv".to_string(),
            timeframe: "1h".to_string(),
            min_rows: 100,
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), StratoptError> {
        if self.csv_path.trim().is_empty() {
            return Err(StratoptError::Configuration(
                "CSV path must not be empty".to_string(),
            ));
        }
        self.timeframe.parse::<Timeframe>()?;
        Ok(())
    }
}
