//! On-balance volume strategy: long while OBV sits above its own moving
//! average, short while below.

use crate::data::types::CandleSeries;
use crate::engines::evaluation::metrics::position_performance;

/// Backtest returning (cumulative PnL, max drawdown). Degenerate inputs
/// (too little data, window longer than the series) return `(0.0, 0.0)`,
/// which the optimizer's zero-profit sentinel removes from selection.
pub fn backtest(series: &CandleSeries, ma_period: usize) -> (f64, f64) {
    let n = series.len();
    if n < 2 || ma_period == 0 || ma_period > n {
        return (0.0, 0.0);
    }

    // OBV: signed cumulative volume keyed on close-to-close direction.
    let mut obv = vec![0.0; n];
    for i in 1..n {
        let delta = if series.close[i] > series.close[i - 1] {
            series.volume[i]
        } else if series.close[i] < series.close[i - 1] {
            -series.volume[i]
        } else {
            0.0
        };
        obv[i] = obv[i - 1] + delta;
    }

    // Flat until the SMA window fills, then long/short on OBV vs its SMA.
    let mut positions = vec![0.0; n];
    let mut window_sum: f64 = obv[..ma_period].iter().sum();
    for i in (ma_period - 1)..n {
        if i >= ma_period {
            window_sum += obv[i] - obv[i - ma_period];
        }
        let ma = window_sum / ma_period as f64;
        positions[i] = if obv[i] > ma { 1.0 } else { -1.0 };
    }

    position_performance(&series.close, &positions)
}
