use crate::model::{StatSummary, TimeSeriesRow};
use crate::utils::{mean, pct_changes, sample_std_dev};

/// Descriptive statistics over the close/high/low/volume columns.
/// An empty series gives `day_count == 0` with every other field `None`.
pub fn summarize(rows: &[TimeSeriesRow]) -> StatSummary {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return StatSummary::default();
    };

    let closes: Vec<f64> = rows.iter().map(|r| r.close).collect();
    let volumes: Vec<f64> = rows.iter().map(|r| r.volume as f64).collect();

    let max_price = rows.iter().map(|r| r.high).fold(f64::NEG_INFINITY, f64::max);
    let min_price = rows.iter().map(|r| r.low).fold(f64::INFINITY, f64::min);

    let total_return_pct = (first.close != 0.0).then(|| (last.close / first.close - 1.0) * 100.0);
    let volatility_pct = sample_std_dev(&pct_changes(&closes)).map(|sd| sd * 100.0);

    StatSummary {
        day_count: rows.len(),
        start_price: Some(first.close),
        end_price: Some(last.close),
        max_price: Some(max_price),
        min_price: Some(min_price),
        total_return_pct,
        volatility_pct,
        avg_volume: mean(&volumes),
    }
}
