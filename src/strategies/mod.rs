pub mod ichimoku;
pub mod obv;
pub mod support_resistance;

use crate::data::types::CandleSeries;
use crate::engines::evaluation::{FitnessEvaluator, Objectives};
use crate::engines::optimization::operators::{ConstraintRepair, NoRepair};
use crate::engines::optimization::space::{
    ParamDescriptor, ParamValue, ParameterMap, ParameterSpace,
};
use crate::error::{Result, StratoptError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use ichimoku::IchimokuRepair;

/// Built-in strategies the optimizer can tune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyId {
    Obv,
    Ichimoku,
    SupportResistance,
}

impl StrategyId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Obv => "obv",
            Self::Ichimoku => "ichimoku",
            Self::SupportResistance => "sup_res",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::Obv, Self::Ichimoku, Self::SupportResistance]
    }

    /// The strategy's tunable parameter table.
    pub fn parameter_space(&self) -> Result<ParameterSpace> {
        match self {
            Self::Obv => ParameterSpace::new(vec![ParamDescriptor::integer(
                "ma_period",
                "MA Period",
                2,
                200,
            )]),
            Self::Ichimoku => ParameterSpace::new(vec![
                ParamDescriptor::integer(
                    "kijun",
                    "Kijun Period",
                    ichimoku::PERIOD_MIN,
                    ichimoku::PERIOD_MAX,
                ),
                ParamDescriptor::integer(
                    "tenkan",
                    "Tenkan Period",
                    ichimoku::PERIOD_MIN,
                    ichimoku::PERIOD_MAX,
                ),
            ]),
            Self::SupportResistance => ParameterSpace::new(vec![
                ParamDescriptor::integer("min_points", "Min. Points", 2, 200),
                ParamDescriptor::integer(
                    "min_diff_points",
                    "Min. Difference Between Points",
                    2,
                    100,
                ),
                ParamDescriptor::real("rounding_nb", "Rounding Number", 10.0, 500.0, 2),
                ParamDescriptor::real("take_profit", "Take Profit %", 1.0, 40.0, 2),
                ParamDescriptor::real("stop_loss", "Stop Loss %", 2.0, 200.0, 2),
            ]),
        }
    }

    /// Cross-parameter repair capability; most strategies have none.
    pub fn repair(&self) -> Box<dyn ConstraintRepair> {
        match self {
            Self::Ichimoku => Box::new(IchimokuRepair),
            _ => Box::new(NoRepair),
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyId {
    type Err = StratoptError;

    fn from_str(s: &str) -> Result<Self> {
        StrategyId::all()
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| {
                StratoptError::Configuration(format!(
                    "Unknown strategy '{}' (expected one of {:?})",
                    s,
                    StrategyId::all().iter().map(|i| i.as_str()).collect::<Vec<_>>()
                ))
            })
    }
}

/// Fitness evaluator backed by the built-in strategy backtests over a fixed
/// candle series.
pub struct BacktestEvaluator {
    strategy: StrategyId,
    series: CandleSeries,
}

impl BacktestEvaluator {
    pub fn new(strategy: StrategyId, series: CandleSeries) -> Self {
        Self { strategy, series }
    }
}

impl FitnessEvaluator for BacktestEvaluator {
    fn evaluate(&self, parameters: &ParameterMap) -> Result<Objectives> {
        let (profit, drawdown) = match self.strategy {
            StrategyId::Obv => {
                obv::backtest(&self.series, int_param(parameters, "ma_period")? as usize)
            }
            StrategyId::Ichimoku => ichimoku::backtest(
                &self.series,
                int_param(parameters, "tenkan")? as usize,
                int_param(parameters, "kijun")? as usize,
            ),
            StrategyId::SupportResistance => support_resistance::backtest(
                &self.series,
                int_param(parameters, "min_points")? as usize,
                int_param(parameters, "min_diff_points")? as usize,
                float_param(parameters, "rounding_nb")?,
                float_param(parameters, "take_profit")?,
                float_param(parameters, "stop_loss")?,
            ),
        };

        Ok(Objectives { profit, drawdown })
    }
}

fn int_param(parameters: &ParameterMap, name: &str) -> Result<i64> {
    match parameters.get(name) {
        Some(ParamValue::Int(v)) => Ok(*v),
        Some(ParamValue::Float(_)) => Err(StratoptError::Evaluation(format!(
            "Parameter '{}' must be an integer",
            name
        ))),
        None => Err(StratoptError::Evaluation(format!(
            "Missing parameter '{}'",
            name
        ))),
    }
}

fn float_param(parameters: &ParameterMap, name: &str) -> Result<f64> {
    match parameters.get(name) {
        Some(value) => Ok(value.as_f64()),
        None => Err(StratoptError::Evaluation(format!(
            "Missing parameter '{}'",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_round_trip() {
        for id in StrategyId::all() {
            assert_eq!(id.as_str().parse::<StrategyId>().unwrap(), id);
        }
        assert!("macd".parse::<StrategyId>().is_err());
    }

    #[test]
    fn parameter_spaces_are_valid() {
        for id in StrategyId::all() {
            let space = id.parameter_space().unwrap();
            assert!(!space.is_empty());
        }
    }

    #[test]
    fn evaluator_reports_missing_parameters() {
        let series = CandleSeries {
            open: vec![1.0; 10],
            high: vec![2.0; 10],
            low: vec![0.5; 10],
            close: vec![1.5; 10],
            volume: vec![10.0; 10],
        };
        let evaluator = BacktestEvaluator::new(StrategyId::Obv, series);
        let result = evaluator.evaluate(&ParameterMap::new());
        assert!(result.is_err());
    }
}
