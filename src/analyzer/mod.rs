// Analyzer module: descriptive statistics and heuristic pattern findings.

pub mod summary;
pub mod patterns;

pub use patterns::detect;
pub use summary::summarize;

use crate::model::{AnalysisResult, DatasetId, DateRange, TimeSeriesRow};

/// Runs both analyses over one sliced series.
pub fn analyze(dataset: DatasetId, range: DateRange, rows: &[TimeSeriesRow]) -> AnalysisResult {
    AnalysisResult {
        dataset,
        range,
        summary: summarize(rows),
        findings: detect(rows),
    }
}
