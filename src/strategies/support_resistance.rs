//! Support/resistance breakout strategy. Price levels are highs and lows
//! rounded to multiples of `rounding_nb`; a level becomes tradeable once it
//! has been touched `min_points` times, with touches at least
//! `min_diff_points` bars apart. Crossing above a confirmed resistance opens
//! a long, crossing below a confirmed support opens a short; positions close
//! at `take_profit` / `stop_loss` percent moves.

use crate::data::types::CandleSeries;
use crate::engines::evaluation::metrics::max_drawdown;
use std::collections::BTreeMap;

struct LevelBook {
    rounding: f64,
    // level key -> (touch count, bar index of the last counted touch)
    touches: BTreeMap<i64, (usize, usize)>,
}

impl LevelBook {
    fn new(rounding: f64) -> Self {
        Self {
            rounding,
            touches: BTreeMap::new(),
        }
    }

    fn key(&self, price: f64) -> i64 {
        (price / self.rounding).round() as i64
    }

    fn price(&self, key: i64) -> f64 {
        key as f64 * self.rounding
    }

    fn record(&mut self, price: f64, bar: usize, min_diff_points: usize) {
        let key = self.key(price);
        match self.touches.get_mut(&key) {
            Some((count, last)) if bar >= *last + min_diff_points => {
                *count += 1;
                *last = bar;
            }
            Some(_) => {}
            None => {
                self.touches.insert(key, (1, bar));
            }
        }
    }

    /// First confirmed level whose price the close crossed this bar.
    fn crossed(
        &self,
        prev_close: f64,
        close: f64,
        min_points: usize,
        upward: bool,
    ) -> Option<f64> {
        self.touches
            .iter()
            .filter(|(_, (count, _))| *count >= min_points)
            .map(|(key, _)| self.price(*key))
            .find(|&level| {
                if upward {
                    prev_close <= level && close > level
                } else {
                    prev_close >= level && close < level
                }
            })
    }
}

/// Backtest returning (cumulative PnL, max drawdown). Degenerate inputs
/// return `(0.0, 0.0)` and fall to the zero-profit sentinel.
pub fn backtest(
    series: &CandleSeries,
    min_points: usize,
    min_diff_points: usize,
    rounding_nb: f64,
    take_profit: f64,
    stop_loss: f64,
) -> (f64, f64) {
    let n = series.len();
    if n < 2 || min_points == 0 || rounding_nb <= 0.0 {
        return (0.0, 0.0);
    }

    let mut resistance = LevelBook::new(rounding_nb);
    let mut support = LevelBook::new(rounding_nb);

    let mut pnl = 0.0;
    let mut equity = Vec::new();
    // (entry price, direction)
    let mut position: Option<(f64, f64)> = None;

    for i in 0..n {
        let close = series.close[i];

        if let Some((entry, direction)) = position {
            let ret_pct = (close - entry) / entry * direction * 100.0;
            if ret_pct >= take_profit || ret_pct <= -stop_loss {
                pnl += ret_pct / 100.0;
                equity.push(pnl);
                position = None;
            }
        }

        resistance.record(series.high[i], i, min_diff_points);
        support.record(series.low[i], i, min_diff_points);

        if position.is_none() && i > 0 {
            let prev_close = series.close[i - 1];
            if resistance
                .crossed(prev_close, close, min_points, true)
                .is_some()
            {
                position = Some((close, 1.0));
            } else if support
                .crossed(prev_close, close, min_points, false)
                .is_some()
            {
                position = Some((close, -1.0));
            }
        }
    }

    // Mark any open position to the final close.
    if let Some((entry, direction)) = position {
        if entry != 0.0 {
            pnl += (series.close[n - 1] - entry) / entry * direction;
            equity.push(pnl);
        }
    }

    (pnl, max_drawdown(&equity))
}
