//! API routes for studiod
//!
//! `/` serves the browser page (GET renders it, POST runs a generate action),
//! `/v1/generate` is the JSON equivalent, `/v1/health` reports liveness.

use crate::page::{self, PageView};
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use studio_common::{
    GenerateForm, Mode, OutputPanel, Outcome, PanelState, FAILURE_MESSAGE,
};
use tracing::error;
use uuid::Uuid;

type AppStateArc = Arc<AppState>;

/// Result of running one lifecycle off the async runtime
struct Generated {
    request_id: Uuid,
    /// None when the blocking task itself died
    outcome: Option<Outcome>,
}

impl Generated {
    fn panel(&self) -> OutputPanel {
        match &self.outcome {
            Some(outcome) => outcome.panel(),
            None => OutputPanel::error(FAILURE_MESSAGE),
        }
    }
}

/// The completion call blocks, so it runs on the blocking pool
async fn run_generate(state: &AppStateArc, form: GenerateForm) -> Generated {
    let studio = state.studio.clone();
    let request_id = Uuid::new_v4();

    let outcome = tokio::task::spawn_blocking(move || studio.generate_with_id(&form, request_id))
        .await
        .map_err(|e| error!(%request_id, "Generate task failed: {}", e))
        .ok();

    Generated {
        request_id,
        outcome,
    }
}

// ============================================================================
// Page Routes
// ============================================================================

pub fn page_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(index).post(submit))
}

async fn index() -> Html<String> {
    Html(page::render(&PageView::initial()))
}

async fn submit(State(state): State<AppStateArc>, Form(form): Form<GenerateForm>) -> Html<String> {
    let generated = run_generate(&state, form.clone()).await;
    let diagnostic = generated
        .outcome
        .as_ref()
        .and_then(|o| o.diagnostic())
        .map(str::to_string);

    let view = PageView::from_form(&form, generated.panel(), diagnostic);
    Html(page::render(&view))
}

// ============================================================================
// Generate Routes
// ============================================================================

/// JSON reply for `/v1/generate`
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub request_id: Uuid,
    pub state: PanelState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    pub panel_html: String,
    pub generated_at: DateTime<Utc>,
}

pub fn generate_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/generate", post(generate))
}

async fn generate(
    State(state): State<AppStateArc>,
    Json(form): Json<GenerateForm>,
) -> (StatusCode, Json<GenerateResponse>) {
    let generated = run_generate(&state, form).await;
    let panel = generated.panel();

    let status = match &generated.outcome {
        Some(Outcome::Succeeded { .. }) => StatusCode::OK,
        Some(Outcome::Rejected { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(Outcome::Failed { .. }) => StatusCode::BAD_GATEWAY,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let outcome = generated.outcome.as_ref();
    let request = outcome.and_then(|o| o.request());
    let response = GenerateResponse {
        request_id: generated.request_id,
        state: panel.state,
        text: outcome.and_then(|o| o.text()).map(str::to_string),
        message: match outcome {
            Some(o) => o.message(),
            None => Some(FAILURE_MESSAGE.to_string()),
        },
        diagnostic: outcome.and_then(|o| o.diagnostic()).map(str::to_string),
        mode: request.map(|r| r.mode()),
        parameter: request.map(|r| r.parameter_label()),
        panel_html: panel.to_html(),
        generated_at: Utc::now(),
    };

    (status, Json(response))
}

// ============================================================================
// Health Routes
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub version: String,
    pub uptime_secs: u64,
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health))
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.model.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
