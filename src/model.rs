// Core structs: TimeSeriesRow, DatasetId, DateRange, StatSummary, AnalysisResult
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetId {
    Nasdaq,
    Sp500,
    Dow,
}

impl DatasetId {
    pub const ALL: [DatasetId; 3] = [DatasetId::Nasdaq, DatasetId::Sp500, DatasetId::Dow];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetId::Nasdaq => "nasdaq",
            DatasetId::Sp500 => "sp500",
            DatasetId::Dow => "dow",
        }
    }

    /// Object key of the full daily series in the store.
    pub fn store_key(&self) -> String {
        let name = self.as_str();
        format!("{name}/daily/{name}_30_years.csv")
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive date window. Construct through `DateRange::new` to keep `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Swaps the endpoints if they arrive reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Descriptive statistics over a sliced series. Every `Option` is `None`
/// when the series is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatSummary {
    pub day_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_return_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_volume: Option<f64>,
}

impl StatSummary {
    pub fn is_empty(&self) -> bool {
        self.day_count == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub dataset: DatasetId,
    pub range: DateRange,
    pub summary: StatSummary,
    pub findings: Vec<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(String),
    #[error("store read failed: {0}")]
    Io(String),
    #[error("store responded with status {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("invalid {column} '{value}' on line {line}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation request failed: {0}")]
    Http(String),
    #[error("generation request timed out")]
    Timeout,
    #[error("generation service responded [{0}]: {1}")]
    Status(u16, String),
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to parse series data: {0}")]
    Parse(#[from] ParseError),
}
