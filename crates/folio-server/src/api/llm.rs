//! LLM endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use folio_core::GenerationParams;

use super::blocking;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    #[serde(default)]
    pub tokenizer_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub system_prompt: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct EmbeddingsResponse {
    pub embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Create the native context and load the model, mirroring the original
/// two-step initialize of the wrapped runtime.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let model_path = req
        .model_path
        .or_else(|| state.config.llm.model_path.clone())
        .ok_or_else(|| ApiError::bad_request("no llm model path given and none configured"))?;
    let tokenizer_path = req
        .tokenizer_path
        .or_else(|| state.config.llm.tokenizer_path.clone())
        .ok_or_else(|| ApiError::bad_request("no tokenizer path given and none configured"))?;

    info!(model = %model_path.display(), "llm create request");
    blocking(move || {
        state
            .llm
            .create(&state.config.llm, &model_path, &tokenizer_path)?;
        state.llm.load()
    })
    .await
    .map(|_| Json(StatusResponse { status: "ok" }))
}

pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let defaults = GenerationParams::default();
    let params = GenerationParams {
        max_tokens: req.max_tokens.unwrap_or(defaults.max_tokens),
        temperature: req.temperature.unwrap_or(defaults.temperature),
        top_p: req.top_p.unwrap_or(defaults.top_p),
    };

    info!(prompt_chars = req.prompt.len(), "llm generate request");
    blocking(move || state.llm.generate(&req.prompt, &req.system_prompt, &params))
        .await
        .map(|text| Json(GenerateResponse { text }))
}

pub async fn embeddings(
    State(state): State<AppState>,
    Json(req): Json<EmbeddingsRequest>,
) -> Result<Json<EmbeddingsResponse>, ApiError> {
    blocking(move || state.llm.embeddings(&req.text))
        .await
        .map(|embedding| Json(EmbeddingsResponse { embedding }))
}

pub async fn cleanup(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    blocking(move || {
        state.llm.cleanup();
        Ok(())
    })
    .await
    .map(|_| Json(StatusResponse { status: "ok" }))
}
