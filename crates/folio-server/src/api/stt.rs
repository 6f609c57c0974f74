//! Speech-to-text endpoints

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use folio_core::{Task, TranscribeOptions};

use super::blocking;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    /// Base64 of little-endian f32 mono PCM.
    pub audio_base64: String,
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub task: Option<Task>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let model_path = req
        .model_path
        .or_else(|| state.config.stt.model_path.clone())
        .ok_or_else(|| ApiError::bad_request("no stt model path given and none configured"))?;

    info!(model = %model_path.display(), "stt create request");
    blocking(move || state.stt.create(&state.config.stt, &model_path))
        .await
        .map(|_| Json(StatusResponse { status: "ok" }))
}

pub async fn transcribe(
    State(state): State<AppState>,
    Json(req): Json<TranscribeRequest>,
) -> Result<Json<TranscribeResponse>, ApiError> {
    // Input conversion failures are the caller's fault, not the engine's.
    let bytes = BASE64
        .decode(&req.audio_base64)
        .map_err(|e| ApiError::bad_request(format!("invalid base64 audio: {}", e)))?;
    if bytes.len() % 4 != 0 {
        return Err(ApiError::bad_request(format!(
            "audio payload of {} bytes is not f32-aligned",
            bytes.len()
        )));
    }
    let samples: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    let sample_rate = req.sample_rate.unwrap_or(state.config.stt.sample_rate);
    let options = TranscribeOptions {
        language: req.language,
        task: req.task.unwrap_or_default(),
    };

    info!(samples = samples.len(), sample_rate, "stt transcribe request");
    blocking(move || state.stt.transcribe(&samples, sample_rate, &options))
        .await
        .map(|text| Json(TranscribeResponse { text }))
}

pub async fn cleanup(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    blocking(move || {
        state.stt.cleanup();
        Ok(())
    })
    .await
    .map(|_| Json(StatusResponse { status: "ok" }))
}
