//! HTTP server exposing the grounded assistant.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/chat` | Grounded chat: `{message, model?, temperature?}` |
//! | `GET`  | `/health` | Health check (version + loaded article count) |
//! | `GET`  | `/search/articles?keyword=` | Raw excerpt search |
//!
//! # Error Contract
//!
//! All error responses share one JSON shape:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "message must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `upstream_error` (502).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser
//! clients.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use chat_rh_core::engine::GroundingEngine;
use chat_rh_core::excerpt::search_article_excerpts;
use chat_rh_core::models::ExcerptHit;

use crate::chat::validate_message;
use crate::config::Config;
use crate::db;
use crate::llm;
use crate::sqlite_store::SqliteStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    engine: Arc<GroundingEngine<SqliteStore>>,
}

/// Start the HTTP server on the configured bind address.
///
/// Runs indefinitely until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    let pool = db::connect(config).await?;
    let store = SqliteStore::new(pool);
    let engine = GroundingEngine::with_keywords(store, config.grounding.keyword_table());

    let state = AppState {
        config: Arc::new(config.clone()),
        engine: Arc::new(engine),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/chat", post(handle_chat))
        .route("/health", get(handle_health))
        .route("/search/articles", get(handle_search))
        .layer(cors)
        .with_state(state);

    println!("ChatRH server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 502 error for model-provider failures.
fn upstream_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_GATEWAY,
        code: "upstream_error".to_string(),
        message: message.into(),
    }
}

// ============ POST /chat ============

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    model: Option<String>,
    temperature: Option<f64>,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
    model: String,
}

/// Handler for `POST /chat`.
///
/// Builds the grounding block for the message and forwards both to the
/// model provider. The grounding pipeline itself never fails; only
/// validation and the provider call can produce errors.
async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    validate_message(&req.message).map_err(|e| bad_request(e.to_string()))?;
    let message = req.message.trim();

    let system_prompt = state.engine.build_grounded_context(message).await;

    let model = req
        .model
        .clone()
        .unwrap_or_else(|| state.config.llm.model.clone());

    let response = llm::chat_completion(
        &state.config.llm,
        &system_prompt,
        message,
        req.model.as_deref(),
        req.temperature,
    )
    .await
    .map_err(|e| upstream_error(e.to_string()))?;

    Ok(Json(ChatResponse { response, model }))
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    /// Number of articles currently loaded.
    articles: i64,
}

/// Handler for `GET /health`.
async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let articles = state.engine.store().count_articles().await.unwrap_or(0);
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        articles,
    })
}

// ============ GET /search/articles ============

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    keyword: String,
}

#[derive(Serialize)]
struct SearchResponse {
    keyword: String,
    count: usize,
    results: Vec<ExcerptHit>,
}

/// Handler for `GET /search/articles`.
async fn handle_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let keyword = query.keyword.trim();
    if keyword.is_empty() {
        return Err(bad_request("keyword query parameter must not be empty"));
    }

    let results = search_article_excerpts(state.engine.store(), keyword).await;

    Ok(Json(SearchResponse {
        keyword: keyword.to_string(),
        count: results.len(),
        results,
    }))
}
