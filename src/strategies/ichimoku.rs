//! Ichimoku conversion-line strategy: long while the tenkan line is above
//! the kijun line, short while below.

use crate::data::types::CandleSeries;
use crate::engines::evaluation::metrics::position_performance;
use crate::engines::optimization::operators::ConstraintRepair;
use crate::engines::optimization::space::{ParamValue, ParameterMap};

pub const PERIOD_MIN: i64 = 2;
pub const PERIOD_MAX: i64 = 200;

/// Backtest returning (cumulative PnL, max drawdown). Degenerate inputs
/// return `(0.0, 0.0)` and fall to the zero-profit sentinel.
pub fn backtest(series: &CandleSeries, tenkan_period: usize, kijun_period: usize) -> (f64, f64) {
    let n = series.len();
    let warmup = tenkan_period.max(kijun_period);
    if n < 2 || tenkan_period == 0 || kijun_period == 0 || warmup > n {
        return (0.0, 0.0);
    }

    let tenkan = midline(&series.high, &series.low, tenkan_period);
    let kijun = midline(&series.high, &series.low, kijun_period);

    let mut positions = vec![0.0; n];
    for i in (warmup - 1)..n {
        positions[i] = if tenkan[i] > kijun[i] {
            1.0
        } else if tenkan[i] < kijun[i] {
            -1.0
        } else {
            0.0
        };
    }

    position_performance(&series.close, &positions)
}

/// Midpoint of the rolling highest high and lowest low.
fn midline(high: &[f64], low: &[f64], period: usize) -> Vec<f64> {
    let n = high.len();
    let mut out = vec![f64::NAN; n];
    for i in (period - 1)..n {
        let start = i + 1 - period;
        let highest = high[start..=i].iter().copied().fold(f64::MIN, f64::max);
        let lowest = low[start..=i].iter().copied().fold(f64::MAX, f64::min);
        out[i] = (highest + lowest) / 2.0;
    }
    out
}

/// The kijun period must exceed the tenkan period by at least one unit; the
/// raise is clamped to the kijun bound so parameter bounds always hold.
pub struct IchimokuRepair;

impl ConstraintRepair for IchimokuRepair {
    fn repair(&self, parameters: &mut ParameterMap) {
        let (Some(ParamValue::Int(tenkan)), Some(ParamValue::Int(kijun))) = (
            parameters.get("tenkan").copied(),
            parameters.get("kijun").copied(),
        ) else {
            return;
        };

        let raised = kijun.max(tenkan + 1).min(PERIOD_MAX);
        parameters.insert("kijun".to_string(), ParamValue::Int(raised));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(tenkan: i64, kijun: i64) -> ParameterMap {
        let mut map = ParameterMap::new();
        map.insert("tenkan".to_string(), ParamValue::Int(tenkan));
        map.insert("kijun".to_string(), ParamValue::Int(kijun));
        map
    }

    #[test]
    fn repair_raises_kijun_above_tenkan() {
        let mut map = params(30, 10);
        IchimokuRepair.repair(&mut map);
        assert_eq!(map["kijun"], ParamValue::Int(31));
        assert_eq!(map["tenkan"], ParamValue::Int(30));
    }

    #[test]
    fn repair_keeps_valid_pairs() {
        let mut map = params(9, 26);
        IchimokuRepair.repair(&mut map);
        assert_eq!(map["kijun"], ParamValue::Int(26));
    }

    #[test]
    fn repair_clamps_at_the_upper_bound() {
        let mut map = params(PERIOD_MAX, PERIOD_MAX);
        IchimokuRepair.repair(&mut map);
        assert_eq!(map["kijun"], ParamValue::Int(PERIOD_MAX));
    }

    #[test]
    fn midline_tracks_window_extremes() {
        let high = vec![10.0, 12.0, 11.0, 15.0];
        let low = vec![8.0, 9.0, 7.0, 13.0];
        let mid = midline(&high, &low, 2);

        assert!(mid[0].is_nan());
        assert_eq!(mid[1], (12.0 + 8.0) / 2.0);
        assert_eq!(mid[2], (12.0 + 7.0) / 2.0);
        assert_eq!(mid[3], (15.0 + 7.0) / 2.0);
    }

    #[test]
    fn uptrend_is_profitable_for_fast_tenkan() {
        let n = 80;
        let close: Vec<f64> = (0..n).map(|i| 100.0 + 2.0 * i as f64).collect();
        let series = CandleSeries {
            open: close.clone(),
            high: close.iter().map(|c| c + 1.0).collect(),
            low: close.iter().map(|c| c - 1.0).collect(),
            close,
            volume: vec![100.0; n],
        };

        // Fast tenkan rides the trend above the slow kijun.
        let (pnl, max_dd) = backtest(&series, 3, 20);
        assert!(pnl > 0.0);
        assert!(max_dd >= 0.0);
    }

    #[test]
    fn degenerate_windows_return_zero() {
        let series = CandleSeries {
            open: vec![1.0; 5],
            high: vec![2.0; 5],
            low: vec![0.5; 5],
            close: vec![1.5; 5],
            volume: vec![1.0; 5],
        };
        assert_eq!(backtest(&series, 10, 20), (0.0, 0.0));
    }
}
