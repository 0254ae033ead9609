// Deterministic sample series for seeding a local store
use crate::model::DatasetId;
use chrono::{Duration, NaiveDate};
use csv::Writer;
use std::io;
use std::path::Path;
use tracing::info;

const HEADER: [&str; 13] = [
    "Date", "Open", "High", "Low", "Close", "Volume", "SMA_20", "SMA_50", "SMA_200", "RSI", "BB_Upper",
    "BB_Middle", "BB_Lower",
];

fn base_price(dataset: DatasetId) -> i64 {
    match dataset {
        DatasetId::Nasdaq => 15_000,
        DatasetId::Sp500 => 4_500,
        DatasetId::Dow => 35_000,
    }
}

/// `days` rows ending at `end`, newest first.
pub fn sample_csv(dataset: DatasetId, end: NaiveDate, days: u32) -> io::Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    let base = base_price(dataset);
    for i in 0..i64::from(days) {
        let date = end - Duration::days(i);
        let price = base + i * 5 + (i % 100) * 50;
        let volume = 1_000_000 + i * 5_000;
        writer.write_record([
            date.format("%Y-%m-%d").to_string(),
            (price - 25).to_string(),
            (price + 25).to_string(),
            (price - 50).to_string(),
            price.to_string(),
            volume.to_string(),
            price.to_string(),
            price.to_string(),
            price.to_string(),
            "50.0".to_string(),
            (price + 50).to_string(),
            price.to_string(),
            (price - 50).to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Writes every dataset under `root` using the store key layout.
pub fn write_samples(root: &Path, end: NaiveDate, days: u32) -> io::Result<()> {
    for dataset in DatasetId::ALL {
        let path = root.join(dataset.store_key());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, sample_csv(dataset, end, days)?)?;
        info!("✅ Wrote {} sample rows to {}", days, path.display());
    }
    Ok(())
}
