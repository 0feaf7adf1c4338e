use crate::engines::optimization::space::{canonical_signature, ParameterMap};
use serde::Serialize;
use std::fmt;

/// One candidate solution: a parameter vector plus its evaluated objectives
/// and the bookkeeping the sort/score passes assign. Domination counts and
/// dominated-set membership are not stored here; they live in side tables
/// local to the non-dominated sort.
#[derive(Debug, Clone, Serialize)]
pub struct Individual {
    pub parameters: ParameterMap,
    /// Cumulative PnL, maximized. `-inf` marks a zero-profit sentinel.
    pub profit: f64,
    /// Maximum drawdown, minimized. `+inf` marks a zero-profit sentinel.
    pub drawdown: f64,
    /// Front index after the last sort (0 = best).
    pub rank: usize,
    /// Diversity score after the last scoring pass; infinite on front
    /// boundaries, higher preferred under rank ties.
    pub crowding_distance: f64,
}

impl Individual {
    pub fn new(parameters: ParameterMap) -> Self {
        Self {
            parameters,
            profit: 0.0,
            drawdown: 0.0,
            rank: 0,
            crowding_distance: 0.0,
        }
    }

    /// Canonical JSON signature of the parameter map, used for duplicate
    /// rejection.
    pub fn signature(&self) -> String {
        canonical_signature(&self.parameters)
    }

    /// Reset sort/score bookkeeping to neutral values; objectives are kept.
    pub fn reset_scores(&mut self) {
        self.rank = 0;
        self.crowding_distance = 0.0;
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self
            .parameters
            .iter()
            .map(|(name, value)| format!("{} = {}", name, value))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "PNL = {:.2}, Max. Drawdown = {:.2}, Parameters = {{{}}}, Rank = {}, Crowding Distance = {:.4}",
            self.profit, self.drawdown, params, self.rank, self.crowding_distance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::optimization::space::ParamValue;

    fn params() -> ParameterMap {
        let mut map = ParameterMap::new();
        map.insert("ma_period".to_string(), ParamValue::Int(14));
        map
    }

    #[test]
    fn new_individual_is_neutral() {
        let individual = Individual::new(params());
        assert_eq!(individual.profit, 0.0);
        assert_eq!(individual.drawdown, 0.0);
        assert_eq!(individual.rank, 0);
        assert_eq!(individual.crowding_distance, 0.0);
    }

    #[test]
    fn equal_parameters_share_a_signature() {
        let a = Individual::new(params());
        let b = Individual::new(params());
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn reset_keeps_objectives() {
        let mut individual = Individual::new(params());
        individual.profit = 12.5;
        individual.drawdown = 3.0;
        individual.rank = 2;
        individual.crowding_distance = f64::INFINITY;

        individual.reset_scores();
        assert_eq!(individual.profit, 12.5);
        assert_eq!(individual.drawdown, 3.0);
        assert_eq!(individual.rank, 0);
        assert_eq!(individual.crowding_distance, 0.0);
    }
}
