//! REST routes: health, combined evaluation, CK-only evaluation, audit history.

use super::error::ApiError;
use crate::domain::{EvaluationRecord, RequestError, Statement};
use crate::usecases::{EvaluationService, HistoryService};
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Header carrying the caller identity recorded in the audit store.
pub const CALLER_HEADER: &str = "x-caller-id";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub evaluations: Arc<EvaluationService>,
    /// `None` when the audit store is disabled.
    pub history: Option<Arc<HistoryService>>,
    pub default_caller: String,
    pub default_history_limit: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub success: bool,
    /// Rendered text, statements separated by a blank line.
    pub recommendation: String,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub evaluations: Vec<EvaluationRecord>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/evaluate", post(evaluate))
        .route("/evaluate/myopathy", post(evaluate_myopathy))
        .route("/evaluations", get(list_evaluations))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn evaluate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let payload = parse_body(&body)?;
    let caller = caller_id(&headers, &state.default_caller);
    let recommendation = state
        .evaluations
        .evaluate_request(&payload, &caller)
        .await?;

    Ok(Json(EvaluateResponse {
        success: true,
        recommendation: recommendation.to_string(),
        statements: recommendation.statements().into_iter().cloned().collect(),
    }))
}

async fn evaluate_myopathy(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let payload = parse_body(&body)?;
    let caller = caller_id(&headers, &state.default_caller);
    let statement = state
        .evaluations
        .evaluate_myopathy_request(&payload, &caller)
        .await?;

    Ok(Json(EvaluateResponse {
        success: true,
        recommendation: statement.to_string(),
        statements: vec![statement],
    }))
}

async fn list_evaluations(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(query) = query.map_err(|rejection| {
        ApiError::BadRequest(format!("Invalid query: {}", rejection.body_text()))
    })?;
    let history = state
        .history
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("Audit store is disabled.".to_string()))?;
    let limit = query.limit.unwrap_or(state.default_history_limit);
    let evaluations = history.recent(limit).await?;
    Ok(Json(HistoryResponse {
        success: true,
        evaluations,
    }))
}

fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RequestError::Malformed("no input data".to_string()).into());
    }
    serde_json::from_slice(body)
        .map_err(|e| RequestError::Malformed(format!("invalid JSON: {}", e)).into())
}

fn caller_id(headers: &HeaderMap, default_caller: &str) -> String {
    headers
        .get(CALLER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default_caller)
        .to_string()
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
