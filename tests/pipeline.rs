use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use livetrader_agent::analyzer::analyze;
use livetrader_agent::classifier::classify;
use livetrader_agent::handler::{QueryRequest, RequestHandler, ResponseBody};
use livetrader_agent::loader::SeriesLoader;
use livetrader_agent::model::DatasetId;
use livetrader_agent::narrative::{fallback_response, NarrativeComposer, ScriptedGenerator};
use livetrader_agent::sample::sample_csv;
use livetrader_agent::store::MemoryStore;
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
}

fn seeded_store() -> MemoryStore {
    let end = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
    DatasetId::ALL.iter().fold(MemoryStore::new(), |store, ds| {
        store.with_object(ds.store_key(), sample_csv(*ds, end, 400).unwrap())
    })
}

#[tokio::test]
async fn empty_store_round_trip_still_composes() {
    let loader = SeriesLoader::new(Box::new(MemoryStore::new()));
    let (dataset, range) = classify("What happened to NASDAQ during the 2008 financial crisis?", now());
    let rows = loader.load(dataset, range).await.unwrap();
    let analysis = analyze(dataset, range, &rows);

    assert_eq!(analysis.summary.day_count, 0);
    assert!(analysis.summary.is_empty());
    assert!(analysis.findings.is_empty());

    let composer = NarrativeComposer::new(Arc::new(ScriptedGenerator::unavailable()));
    let text = composer.compose("2008", &analysis).await;
    assert!(!text.is_empty());
    assert_eq!(text, fallback_response(&analysis));
}

#[tokio::test]
async fn seeded_store_feeds_summary_into_prompt() {
    let generator = Arc::new(ScriptedGenerator::replying("Here is what happened."));
    let handler = RequestHandler::new(
        SeriesLoader::new(Box::new(seeded_store())),
        NarrativeComposer::new(generator.clone()),
    );

    let response = handler
        .handle(QueryRequest { query: "How has the Dow done lately?".into(), user_id: "abc".into() }, now())
        .await;

    assert_eq!(response.status_code, 200);
    let ResponseBody::Success(body) = response.body else {
        panic!("expected success");
    };
    assert_eq!(body.response, "Here is what happened.");
    assert_eq!(body.user_id, "abc");

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("- Dataset: DOW"));
    assert!(prompts[0].contains("\"day_count\": 400"));
}

#[tokio::test]
async fn generation_outage_falls_back_with_findings() {
    let handler = RequestHandler::new(
        SeriesLoader::new(Box::new(seeded_store())),
        NarrativeComposer::new(Arc::new(ScriptedGenerator::unavailable())),
    );

    let response = handler
        .handle(QueryRequest { query: "sp500 outlook".into(), user_id: "u".into() }, now())
        .await;

    assert_eq!(response.status_code, 200);
    let ResponseBody::Success(body) = response.body else {
        panic!("expected success");
    };
    assert!(body.response.starts_with("Based on historical SP500 data from"));
    assert!(body.response.contains("📈 **Performance Summary:**"));
    assert!(body.response.contains("🔍 **Patterns Detected:**"));
    assert!(body.response.contains("400 days of historical data"));
}

#[tokio::test]
async fn store_outage_degrades_to_empty_analysis() {
    let handler = RequestHandler::new(
        SeriesLoader::new(Box::new(MemoryStore::failing())),
        NarrativeComposer::new(Arc::new(ScriptedGenerator::unavailable())),
    );

    let response = handler
        .handle(QueryRequest { query: "covid crash".into(), user_id: "u".into() }, now())
        .await;

    assert_eq!(response.status_code, 200);
    let ResponseBody::Success(body) = response.body else {
        panic!("expected success");
    };
    assert!(body.response.contains("from 2019-01-01 to 2022-01-01"));
    assert!(body.response.contains("0 days"));
}
