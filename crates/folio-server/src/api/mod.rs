//! HTTP API routes

pub mod index;
pub mod llm;
pub mod stt;
pub mod tts;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/index/create", post(index::create))
        .route("/v1/index/load", post(index::load))
        .route("/v1/index/save", post(index::save))
        .route("/v1/index/embeddings", post(index::add_embedding))
        .route("/v1/index/search", post(index::search))
        .route("/v1/index/clear", post(index::clear))
        .route("/v1/index/size", get(index::size))
        .route("/v1/index/cleanup", post(index::cleanup))
        .route("/v1/llm/create", post(llm::create))
        .route("/v1/llm/generate", post(llm::generate))
        .route("/v1/llm/embeddings", post(llm::embeddings))
        .route("/v1/llm/cleanup", post(llm::cleanup))
        .route("/v1/stt/create", post(stt::create))
        .route("/v1/stt/transcribe", post(stt::transcribe))
        .route("/v1/stt/cleanup", post(stt::cleanup))
        .route("/v1/tts/create", post(tts::create))
        .route("/v1/tts/synthesize", post(tts::synthesize))
        .route("/v1/tts/cleanup", post(tts::cleanup))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Run a blocking facade call off the async runtime.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> folio_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?
        .map_err(ApiError::from)
}
