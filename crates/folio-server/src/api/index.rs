//! Vector index endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use folio_core::SearchHit;

use super::blocking;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    pub dimension: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PathRequest {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct AddEmbeddingRequest {
    pub embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: Vec<f32>,
    #[serde(default = "default_k")]
    pub k: usize,
}

fn default_k() -> usize {
    5
}

#[derive(Debug, Serialize)]
pub struct SizeResponse {
    pub size: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

fn index_path(state: &AppState, path: Option<PathBuf>) -> Result<PathBuf, ApiError> {
    path.or_else(|| state.config.index.index_path.clone())
        .ok_or_else(|| ApiError::bad_request("no index path given and none configured"))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateRequest>,
) -> Result<Json<SizeResponse>, ApiError> {
    let dimension = req.dimension.unwrap_or(state.config.index.dimension);
    info!(dimension, "index create request");
    blocking(move || {
        state.index.create(dimension)?;
        state.index.len()
    })
    .await
    .map(|size| Json(SizeResponse { size }))
}

pub async fn load(
    State(state): State<AppState>,
    Json(req): Json<PathRequest>,
) -> Result<Json<SizeResponse>, ApiError> {
    let path = index_path(&state, req.path)?;
    info!(path = %path.display(), "index load request");
    blocking(move || {
        state.index.load(&path)?;
        state.index.len()
    })
    .await
    .map(|size| Json(SizeResponse { size }))
}

pub async fn save(
    State(state): State<AppState>,
    Json(req): Json<PathRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let path = index_path(&state, req.path)?;
    info!(path = %path.display(), "index save request");
    blocking(move || state.index.save(&path))
        .await
        .map(|_| Json(StatusResponse { status: "ok" }))
}

pub async fn add_embedding(
    State(state): State<AppState>,
    Json(req): Json<AddEmbeddingRequest>,
) -> Result<Json<SizeResponse>, ApiError> {
    blocking(move || {
        state.index.add_embedding(&req.embedding)?;
        state.index.len()
    })
    .await
    .map(|size| Json(SizeResponse { size }))
}

pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    blocking(move || state.index.search(&req.query, req.k))
        .await
        .map(|results| Json(SearchResponse { results }))
}

pub async fn clear(State(state): State<AppState>) -> Result<Json<SizeResponse>, ApiError> {
    blocking(move || {
        state.index.clear()?;
        state.index.len()
    })
    .await
    .map(|size| Json(SizeResponse { size }))
}

pub async fn size(State(state): State<AppState>) -> Result<Json<SizeResponse>, ApiError> {
    blocking(move || state.index.len())
        .await
        .map(|size| Json(SizeResponse { size }))
}

pub async fn cleanup(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    blocking(move || {
        state.index.cleanup();
        Ok(())
    })
    .await
    .map(|_| Json(StatusResponse { status: "ok" }))
}
