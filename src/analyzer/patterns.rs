use crate::model::TimeSeriesRow;
use crate::utils::{mean, pct_changes};

/// Below this many rows no pattern is reported.
pub const MIN_HISTORY: usize = 50;

const TREND_WINDOW: usize = 20;
const TREND_THRESHOLD: f64 = 0.001;

const LEVEL_WINDOW: usize = 60;
const RESISTANCE_RATIO: f64 = 0.98;
const SUPPORT_RATIO: f64 = 1.02;

const VOLUME_LONG_WINDOW: usize = 20;
const VOLUME_SHORT_WINDOW: usize = 5;
const VOLUME_SPIKE_RATIO: f64 = 1.5;

pub const BULLISH_TREND: &str = "Bullish trend detected in recent 20 days";
pub const BEARISH_TREND: &str = "Bearish trend detected in recent 20 days";
pub const NEAR_RESISTANCE: &str = "Price near resistance level";
pub const NEAR_SUPPORT: &str = "Price near support level";
pub const VOLUME_SPIKE: &str = "Above-average volume detected";

type Rule = fn(&[TimeSeriesRow]) -> Option<&'static str>;

/// Evaluated in order; each rule contributes at most one finding.
const RULES: &[Rule] = &[trend, support_resistance, volume_spike];

/// Heuristic findings over the series, in rule order.
pub fn detect(rows: &[TimeSeriesRow]) -> Vec<String> {
    if rows.len() < MIN_HISTORY {
        return Vec::new();
    }
    RULES
        .iter()
        .filter_map(|rule| rule(rows))
        .map(String::from)
        .collect()
}

fn tail(rows: &[TimeSeriesRow], n: usize) -> &[TimeSeriesRow] {
    &rows[rows.len().saturating_sub(n)..]
}

fn trend(rows: &[TimeSeriesRow]) -> Option<&'static str> {
    let closes: Vec<f64> = tail(rows, TREND_WINDOW).iter().map(|r| r.close).collect();
    let m = mean(&pct_changes(&closes))?;
    if m > TREND_THRESHOLD {
        Some(BULLISH_TREND)
    } else if m < -TREND_THRESHOLD {
        Some(BEARISH_TREND)
    } else {
        None
    }
}

fn support_resistance(rows: &[TimeSeriesRow]) -> Option<&'static str> {
    let window = tail(rows, LEVEL_WINDOW);
    let high = window.iter().map(|r| r.high).fold(f64::NEG_INFINITY, f64::max);
    let low = window.iter().map(|r| r.low).fold(f64::INFINITY, f64::min);
    let price = rows.last()?.close;

    if price > high * RESISTANCE_RATIO {
        Some(NEAR_RESISTANCE)
    } else if price < low * SUPPORT_RATIO {
        Some(NEAR_SUPPORT)
    } else {
        None
    }
}

fn volume_spike(rows: &[TimeSeriesRow]) -> Option<&'static str> {
    let volumes = |n: usize| -> Vec<f64> { tail(rows, n).iter().map(|r| r.volume as f64).collect() };
    let long_avg = mean(&volumes(VOLUME_LONG_WINDOW))?;
    let short_avg = mean(&volumes(VOLUME_SHORT_WINDOW))?;
    (short_avg > long_avg * VOLUME_SPIKE_RATIO).then_some(VOLUME_SPIKE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn row(i: usize, close: f64, high: f64, low: f64, volume: u64) -> TimeSeriesRow {
        TimeSeriesRow {
            date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(i as i64),
            open: close,
            high,
            low,
            close,
            volume,
        }
    }

    /// Flat series: close 100, high 150, low 50, volume 1000.
    fn flat(n: usize) -> Vec<TimeSeriesRow> {
        (0..n).map(|i| row(i, 100.0, 150.0, 50.0, 1000)).collect()
    }

    #[test]
    fn short_history_yields_nothing() {
        let mut rows = flat(49);
        for (i, r) in rows.iter_mut().enumerate() {
            r.close = 100.0 * 1.01f64.powi(i as i32);
            r.high = r.close;
            r.volume = if i > 44 { 100_000 } else { 10 };
        }
        assert!(detect(&rows).is_empty());
        assert!(detect(&[]).is_empty());
    }

    #[test]
    fn flat_series_yields_nothing() {
        assert!(detect(&flat(80)).is_empty());
    }

    #[test]
    fn rising_tail_is_bullish() {
        let mut rows = flat(60);
        let start = rows.len() - 20;
        for (k, r) in rows[start..].iter_mut().enumerate() {
            r.close = 100.0 * 1.01f64.powi(k as i32);
        }
        assert!(detect(&rows).contains(&BULLISH_TREND.to_string()));
    }

    #[test]
    fn falling_tail_is_bearish() {
        let mut rows = flat(60);
        let start = rows.len() - 20;
        for (k, r) in rows[start..].iter_mut().enumerate() {
            r.close = 100.0 * 0.99f64.powi(k as i32);
        }
        let findings = detect(&rows);
        assert!(findings.contains(&BEARISH_TREND.to_string()));
        assert!(!findings.contains(&BULLISH_TREND.to_string()));
    }

    #[test]
    fn close_near_recent_high_is_resistance() {
        let mut rows = flat(60);
        for r in rows.iter_mut() {
            r.high = 101.0;
            r.low = 90.0;
        }
        assert_eq!(rows.last().unwrap().close, 100.0);
        assert!(detect(&rows).contains(&NEAR_RESISTANCE.to_string()));
    }

    #[test]
    fn close_near_recent_low_is_support() {
        let mut rows = flat(60);
        for r in rows.iter_mut() {
            r.low = 99.0;
        }
        let findings = detect(&rows);
        assert!(findings.contains(&NEAR_SUPPORT.to_string()));
        assert!(!findings.contains(&NEAR_RESISTANCE.to_string()));
    }

    #[test]
    fn levels_only_look_at_last_sixty_rows() {
        let mut rows = flat(100);
        // an old spike far above the current price must not hide resistance
        rows[10].high = 1000.0;
        for r in rows[40..].iter_mut() {
            r.high = 100.5;
        }
        assert!(detect(&rows).contains(&NEAR_RESISTANCE.to_string()));
    }

    #[test]
    fn volume_spike_in_last_five_rows() {
        let mut rows = flat(60);
        let n = rows.len();
        for r in rows[n - 5..].iter_mut() {
            r.volume = 5000;
        }
        assert_eq!(detect(&rows), vec![VOLUME_SPIKE.to_string()]);
    }

    #[test]
    fn findings_follow_rule_order() {
        let mut rows = flat(60);
        let n = rows.len();
        for (k, r) in rows[n - 20..].iter_mut().enumerate() {
            r.close = 100.0 * 1.01f64.powi(k as i32);
        }
        for r in rows.iter_mut() {
            r.high = r.close;
        }
        for r in rows[n - 5..].iter_mut() {
            r.volume = 10_000;
        }
        assert_eq!(
            detect(&rows),
            vec![
                BULLISH_TREND.to_string(),
                NEAR_RESISTANCE.to_string(),
                VOLUME_SPIKE.to_string()
            ]
        );
    }
}
