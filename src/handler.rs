use crate::analyzer::analyze;
use crate::classifier::classify;
use crate::loader::SeriesLoader;
use crate::model::PipelineError;
use crate::narrative::NarrativeComposer;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info};

pub const STATUS_OK: u16 = 200;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default = "anonymous")]
    pub user_id: String,
}

fn anonymous() -> String {
    "anonymous".into()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessBody {
    pub response: String,
    pub timestamp: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success(SuccessBody),
    Failure(ErrorBody),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub status_code: u16,
    pub body: ResponseBody,
}

/// Request lifecycle; every stage but `Failed` is reached in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Received,
    Classified,
    Loaded,
    Analyzed,
    Composed,
    Responded,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Runs one query through classify → load → analyze → compose.
/// Holds only read-only collaborators, so one instance can serve concurrent requests.
pub struct RequestHandler {
    loader: SeriesLoader,
    composer: NarrativeComposer,
}

impl RequestHandler {
    pub fn new(loader: SeriesLoader, composer: NarrativeComposer) -> Self {
        Self { loader, composer }
    }

    pub async fn handle(&self, request: QueryRequest, now: DateTime<Utc>) -> QueryResponse {
        info!("[{}] 📝 Processing query: {}", Stage::Received, request.query);

        match self.run(&request.query, now).await {
            Ok(text) => {
                info!("[{}] user={}", Stage::Responded, request.user_id);
                QueryResponse {
                    status_code: STATUS_OK,
                    body: ResponseBody::Success(SuccessBody {
                        response: text,
                        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
                        user_id: request.user_id,
                    }),
                }
            }
            Err(e) => {
                error!("[{}] ❌ Error processing request: {}", Stage::Failed, e);
                QueryResponse {
                    status_code: STATUS_INTERNAL_ERROR,
                    body: ResponseBody::Failure(ErrorBody {
                        error: "Internal server error".into(),
                        message: e.to_string(),
                    }),
                }
            }
        }
    }

    async fn run(&self, query: &str, now: DateTime<Utc>) -> Result<String, PipelineError> {
        let (dataset, range) = classify(query, now);
        info!("[{}] dataset={} range={}..{}", Stage::Classified, dataset, range.start(), range.end());

        let rows = self.loader.load(dataset, range).await?;
        info!("[{}] {} rows", Stage::Loaded, rows.len());

        let analysis = analyze(dataset, range, &rows);
        info!("[{}] {} findings", Stage::Analyzed, analysis.findings.len());

        let text = self.composer.compose(query, &analysis).await;
        info!("[{}] {} chars", Stage::Composed, text.len());

        Ok(text)
    }
}
