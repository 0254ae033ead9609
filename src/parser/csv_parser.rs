// Daily OHLCV CSV parsing
use crate::model::{ParseError, TimeSeriesRow};
use crate::utils::parse_date;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeMap;
use tracing::warn;

pub trait Parser {
    fn parse(&self, text: &str) -> Result<Vec<TimeSeriesRow>, ParseError>;
}

pub struct CsvSeriesParser;

impl CsvSeriesParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvSeriesParser {
    fn default() -> Self {
        Self::new()
    }
}

const COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// Header positions of the required columns, in `COLUMNS` order.
struct Layout([usize; 6]);

impl Layout {
    fn from_headers(headers: &StringRecord) -> Result<Self, ParseError> {
        let mut idx = [0usize; 6];
        for (slot, name) in idx.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| ParseError::MissingColumn(name.to_string()))?;
        }
        Ok(Self(idx))
    }
}

impl Parser for CsvSeriesParser {
    /// Rows come back ascending by date with unique dates (the later duplicate wins).
    /// Rows with an empty required cell are skipped; any other unreadable cell fails the parse.
    fn parse(&self, text: &str) -> Result<Vec<TimeSeriesRow>, ParseError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(text.as_bytes());

        let layout = Layout::from_headers(reader.headers()?)?;
        let mut by_date = BTreeMap::new();
        let mut skipped = 0usize;

        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let cells: Vec<&str> = layout.0.iter().map(|&i| record.get(i).unwrap_or("")).collect();

            if cells.iter().any(|c| c.is_empty()) {
                skipped += 1;
                continue;
            }

            let row = parse_row(&cells, line)?;
            by_date.insert(row.date, row);
        }

        if skipped > 0 {
            warn!("Skipped {} rows with missing values", skipped);
        }

        Ok(by_date.into_values().collect())
    }
}

fn parse_row(cells: &[&str], line: u64) -> Result<TimeSeriesRow, ParseError> {
    let invalid = |column: &'static str, value: &str| ParseError::InvalidField {
        line,
        column,
        value: value.to_string(),
    };

    let date = parse_date(cells[0]).ok_or_else(|| invalid("Date", cells[0]))?;
    let price = |i: usize| -> Result<f64, ParseError> {
        cells[i]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(COLUMNS[i], cells[i]))
    };

    let volume = cells[5]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| invalid("Volume", cells[5]))?;

    Ok(TimeSeriesRow {
        date,
        open: price(1)?,
        high: price(2)?,
        low: price(3)?,
        close: price(4)?,
        volume: volume.round() as u64,
    })
}
