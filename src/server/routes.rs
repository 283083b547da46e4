//! HTTP route handlers for the `LexiMind` server.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::{AnalysisError, AnalysisRequest, AnalysisResult, ParsedAnalysis};

use super::page::{PageView, render_page};
use super::state::AppState;

/// Create the router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze_form))
        .route("/api/analyze", post(analyze_json))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "leximind",
        "version": env!("CARGO_PKG_VERSION"),
        "credential_loaded": state.analyst.credential_loaded(),
    }))
}

/// Empty form.
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let request = AnalysisRequest::default();
    Html(render_page(&PageView {
        model: state.analyst.model(),
        credential_loaded: state.analyst.credential_loaded(),
        request: &request,
        outcome: None,
    }))
}

/// Form submission: run the analysis and re-render the page with its outcome.
async fn analyze_form(
    State(state): State<Arc<AppState>>,
    Form(request): Form<AnalysisRequest>,
) -> (StatusCode, Html<String>) {
    let (_, outcome) = run_analysis(Arc::clone(&state), request.clone()).await;
    let status = outcome.as_ref().map_or_else(status_for, |_| StatusCode::OK);

    let html = render_page(&PageView {
        model: state.analyst.model(),
        credential_loaded: state.analyst.credential_loaded(),
        request: &request,
        outcome: Some(&outcome),
    });
    (status, Html(html))
}

/// Successful analysis response.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Identifier used in the server logs for this action.
    pub request_id: Uuid,
    /// Model used.
    pub model: String,
    /// Internal reasoning.
    pub reasoning: String,
    /// Client memo.
    pub memo: String,
    /// Completion time.
    pub analyzed_at: DateTime<Utc>,
}

/// Failed analysis response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Identifier used in the server logs for this action.
    pub request_id: Uuid,
    /// Machine-readable error kind.
    pub kind: &'static str,
    /// Human-readable message.
    pub error: String,
}

/// JSON API: same action as the form, structured result.
async fn analyze_json(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    let model = state.analyst.model().to_string();
    match run_analysis(state, request).await {
        (request_id, Ok(parsed)) => Json(AnalyzeResponse {
            request_id,
            model,
            reasoning: parsed.reasoning,
            memo: parsed.memo,
            analyzed_at: Utc::now(),
        })
        .into_response(),
        (request_id, Err(err)) => (
            status_for(&err),
            Json(ErrorResponse {
                request_id,
                kind: err.kind(),
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Run one analysis on the blocking pool and log its outcome.
async fn run_analysis(
    state: Arc<AppState>,
    request: AnalysisRequest,
) -> (Uuid, AnalysisResult<ParsedAnalysis>) {
    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        jurisdiction = %request.jurisdiction,
        practice_area = %request.practice_area,
        temperature = request.temperature,
        fact_pattern_len = request.fact_pattern.len(),
        "analysis requested"
    );

    let outcome = tokio::task::spawn_blocking(move || state.analyst.analyze(&request))
        .await
        .unwrap_or_else(|e| Err(AnalysisError::Worker(e.to_string())));

    log_outcome(request_id, &outcome);
    (request_id, outcome)
}

fn log_outcome(request_id: Uuid, outcome: &AnalysisResult<ParsedAnalysis>) {
    match outcome {
        Ok(parsed) => tracing::info!(
            %request_id,
            reasoning_len = parsed.reasoning.len(),
            memo_len = parsed.memo.len(),
            "analysis complete"
        ),
        Err(err) if err.is_blocked() => {
            tracing::warn!(%request_id, kind = err.kind(), "analysis blocked: {err}");
        }
        Err(err) => tracing::error!(%request_id, kind = err.kind(), "analysis failed: {err}"),
    }
}

const fn status_for(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
        AnalysisError::EmptyInput | AnalysisError::InvalidTemperature(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AnalysisError::Provider(_) => StatusCode::BAD_GATEWAY,
        AnalysisError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
