use crate::handler::{ErrorBody, QueryRequest, QueryResponse, RequestHandler, ResponseBody, STATUS_INTERNAL_ERROR};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

impl IntoResponse for QueryResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

pub fn router(handler: Arc<RequestHandler>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/query", post(query))
        .route("/health", get(health))
        .layer(cors)
        .with_state(handler)
}

/// # POST /query
/// An unreadable body gets the same 500 error shape as a pipeline failure.
async fn query(
    State(handler): State<Arc<RequestHandler>>,
    request: Result<Json<QueryRequest>, JsonRejection>,
) -> QueryResponse {
    match request {
        Ok(Json(request)) => handler.handle(request, Utc::now()).await,
        Err(rejection) => {
            warn!("❌ Rejected request body: {}", rejection.body_text());
            QueryResponse {
                status_code: STATUS_INTERNAL_ERROR,
                body: ResponseBody::Failure(ErrorBody {
                    error: "Internal server error".into(),
                    message: rejection.body_text(),
                }),
            }
        }
    }
}

/// # GET /health
async fn health() -> &'static str {
    "ok"
}

pub async fn serve(handler: Arc<RequestHandler>, bind_addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("🚀 Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(handler)).await
}
