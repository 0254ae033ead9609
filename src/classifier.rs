use crate::model::{DatasetId, DateRange};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Ordered dataset rules; the first rule with any matching keyword wins.
const DATASET_RULES: &[(&[&str], DatasetId)] = &[
    (&["nasdaq", "tech"], DatasetId::Nasdaq),
    (&["s&p", "sp500"], DatasetId::Sp500),
    (&["dow"], DatasetId::Dow),
];

const DEFAULT_DATASET: DatasetId = DatasetId::Nasdaq;

/// Ordered period rules as (keywords, (start y/m/d), (end y/m/d)).
const PERIOD_RULES: &[(&[&str], (i32, u32, u32), (i32, u32, u32))] = &[
    (&["2008", "financial crisis"], (2007, 1, 1), (2010, 1, 1)),
    (&["2020", "covid"], (2019, 1, 1), (2022, 1, 1)),
    (&["dot-com", "2000"], (1999, 1, 1), (2003, 1, 1)),
];

const DEFAULT_LOOKBACK_DAYS: i64 = 5 * 365;

/// Maps query text to the dataset and window it asks about.
pub fn classify(query: &str, now: DateTime<Utc>) -> (DatasetId, DateRange) {
    let text = query.to_lowercase();
    (select_dataset(&text), select_range(&text, now))
}

fn select_dataset(text: &str) -> DatasetId {
    DATASET_RULES
        .iter()
        .find(|(keywords, _)| matches_any(text, keywords))
        .map(|(_, dataset)| *dataset)
        .unwrap_or(DEFAULT_DATASET)
}

fn select_range(text: &str, now: DateTime<Utc>) -> DateRange {
    PERIOD_RULES
        .iter()
        .find(|(keywords, _, _)| matches_any(text, keywords))
        .and_then(|(_, start, end)| Some(DateRange::new(ymd(*start)?, ymd(*end)?)))
        .unwrap_or_else(|| {
            let today = now.date_naive();
            DateRange::new(today - Duration::days(DEFAULT_LOOKBACK_DAYS), today)
        })
}

fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn ymd((y, m, d): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dataset_priority_follows_rule_order() {
        assert_eq!(classify("NASDAQ vs Dow", now()).0, DatasetId::Nasdaq);
        assert_eq!(classify("dow and tech stocks", now()).0, DatasetId::Nasdaq);
        assert_eq!(classify("S&P 500 or the Dow?", now()).0, DatasetId::Sp500);
        assert_eq!(classify("sp500 today", now()).0, DatasetId::Sp500);
        assert_eq!(classify("Dow Jones", now()).0, DatasetId::Dow);
        assert_eq!(classify("what about gold", now()).0, DatasetId::Nasdaq);
    }

    #[test]
    fn covid_wins_regardless_of_case_and_later_rules() {
        for query in ["COVID crash", "Covid and the dot-com bubble", "covid in 2000"] {
            let (_, range) = classify(query, now());
            assert_eq!(range, DateRange::new(date(2019, 1, 1), date(2022, 1, 1)), "{query}");
        }
    }

    #[test]
    fn crisis_rule_precedes_covid() {
        let (_, range) = classify("compare the financial crisis with covid", now());
        assert_eq!(range, DateRange::new(date(2007, 1, 1), date(2010, 1, 1)));
    }

    #[test]
    fn dot_com_window() {
        let (_, range) = classify("Dot-Com bust", now());
        assert_eq!(range, DateRange::new(date(1999, 1, 1), date(2003, 1, 1)));
    }

    #[test]
    fn default_window_is_five_years_back_from_now() {
        let (_, range) = classify("how is the market doing", now());
        assert_eq!(range.end(), date(2024, 6, 15));
        assert_eq!(range.start(), date(2024, 6, 15) - Duration::days(1825));
    }
}
