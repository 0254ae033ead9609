use crate::model::{DatasetId, DateRange, ParseError, TimeSeriesRow};
use crate::parser::{CsvSeriesParser, Parser};
use crate::store::SeriesStore;
use tracing::{info, warn};

/// Fetches a dataset's full series and slices it to a date window.
pub struct SeriesLoader {
    store: Box<dyn SeriesStore>,
    parser: CsvSeriesParser,
}

impl SeriesLoader {
    pub fn new(store: Box<dyn SeriesStore>) -> Self {
        Self {
            store,
            parser: CsvSeriesParser::new(),
        }
    }

    /// Rows with `range.start() <= date <= range.end()`, ascending.
    /// A missing object or failed fetch yields an empty series; only unparsable data is an error.
    pub async fn load(&self, dataset: DatasetId, range: DateRange) -> Result<Vec<TimeSeriesRow>, ParseError> {
        let key = dataset.store_key();

        let body = match self.store.fetch(&key).await {
            Ok(Some(body)) => body,
            Ok(None) => {
                warn!("No series object at '{}'", key);
                return Ok(Vec::new());
            }
            Err(e) => {
                warn!("Series fetch for '{}' failed: {}", key, e);
                return Ok(Vec::new());
            }
        };

        let rows = self.parser.parse(&body)?;
        let total = rows.len();
        let sliced: Vec<TimeSeriesRow> = rows.into_iter().filter(|r| range.contains(r.date)).collect();
        info!(
            "Loaded {} of {} rows for {} ({} to {})",
            sliced.len(),
            total,
            dataset,
            range.start(),
            range.end()
        );
        Ok(sliced)
    }
}
