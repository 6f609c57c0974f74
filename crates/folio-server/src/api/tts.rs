//! Text-to-speech endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use folio_core::encode_pcm;

use super::blocking;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    #[serde(default)]
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SynthesizeResponse {
    /// Base64 of little-endian f32 mono PCM.
    pub audio_base64: String,
    pub sample_rate: u32,
    pub duration_secs: f64,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Create the native context and load the voice model, mirroring the original
/// two-step initialize of the wrapped engine.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let model_path = req
        .model_path
        .or_else(|| state.config.tts.model_path.clone())
        .ok_or_else(|| ApiError::bad_request("no tts model path given and none configured"))?;
    let config_path = req
        .config_path
        .or_else(|| state.config.tts.config_path.clone())
        .ok_or_else(|| ApiError::bad_request("no tts config path given and none configured"))?;

    info!(model = %model_path.display(), "tts create request");
    blocking(move || {
        state
            .tts
            .create(&state.config.tts, &model_path, &config_path)?;
        state.tts.load()
    })
    .await
    .map(|_| Json(StatusResponse { status: "ok" }))
}

pub async fn synthesize(
    State(state): State<AppState>,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Json<SynthesizeResponse>, ApiError> {
    info!(text_chars = req.text.len(), "tts synthesize request");
    blocking(move || state.tts.synthesize(&req.text))
        .await
        .map(|result| {
            Json(SynthesizeResponse {
                audio_base64: encode_pcm(&result.samples),
                sample_rate: result.sample_rate,
                duration_secs: result.duration_secs(),
            })
        })
}

pub async fn cleanup(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    blocking(move || {
        state.tts.cleanup();
        Ok(())
    })
    .await
    .map(|_| Json(StatusResponse { status: "ok" }))
}
