use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{RawForm, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use common::config::UiConfig;

use super::models::{ApiResponse, DebugToggle, HealthResponse, PredictRequest};
use super::page::render_page;
use crate::form::ReservationForm;
use crate::services::inference::{FailureKind, PredictionOutcome};
use crate::services::{AppError, InferenceAdapter, ModelStatus, PredictionReport};

#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<InferenceAdapter>,
    pub ui: Arc<UiConfig>,
}

impl AppState {
    pub fn new(adapter: InferenceAdapter, ui: UiConfig) -> Self {
        Self {
            adapter: Arc::new(adapter),
            ui: Arc::new(ui),
        }
    }
}

/// Runs one trigger off the async runtime; the call blocks until the
/// classifier returns. A panicking classifier becomes an error outcome.
async fn run_prediction(
    adapter: Arc<InferenceAdapter>,
    form: ReservationForm,
    debug: bool,
) -> PredictionReport {
    match tokio::task::spawn_blocking(move || adapter.predict(&form, debug)).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Prediction task aborted");
            PredictionReport::failure(
                format!("Error during prediction: prediction task failed: {}", e),
                FailureKind::Classification,
            )
        }
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(
        &state.ui,
        state.adapter.status(),
        &ReservationForm::default(),
        state.ui.debug_mode,
        None,
    ))
}

/// HTML trigger. Always answers with the page so the user keeps the form;
/// an unparseable submission is shown as a banner with status 400.
pub async fn predict_form(State(state): State<AppState>, RawForm(body): RawForm) -> Response {
    let toggle: DebugToggle = serde_urlencoded::from_bytes(&body).unwrap_or_default();
    let debug = toggle.enabled();

    let (status, form, report) = match ReservationForm::from_urlencoded(&body) {
        Ok(form) => {
            let form = form.clamped();
            let report = run_prediction(Arc::clone(&state.adapter), form.clone(), debug).await;
            (StatusCode::OK, form, report)
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            ReservationForm::default(),
            PredictionReport::failure(e.to_string(), FailureKind::InvalidInput),
        ),
    };

    let page = render_page(
        &state.ui,
        state.adapter.status(),
        &form,
        debug,
        Some(&report),
    );
    (status, Html(page)).into_response()
}

pub async fn predict_json(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    let debug = request.debug.unwrap_or(state.ui.debug_mode);
    let report = run_prediction(Arc::clone(&state.adapter), request.reservation, debug).await;

    let response = match &report.outcome {
        PredictionOutcome::Verdict(_) => {
            (StatusCode::OK, Json(ApiResponse::success(report))).into_response()
        }
        PredictionOutcome::Error(failure) => {
            let status = match failure.kind {
                FailureKind::InvalidInput => StatusCode::BAD_REQUEST,
                FailureKind::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
                FailureKind::Classification => StatusCode::UNPROCESSABLE_ENTITY,
            };
            let message = failure.message.clone();
            (status, Json(ApiResponse::failure(report, message))).into_response()
        }
    };

    Ok(response)
}

pub async fn model_status(State(state): State<AppState>) -> Json<ApiResponse<ModelStatus>> {
    Json(ApiResponse::success(state.adapter.status().clone()))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_ready: state.adapter.is_ready(),
    })
}

// Define all routes
pub fn routes(state: AppState) -> Router {
    info!(model_ready = state.adapter.is_ready(), "Building router");
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_json))
        .route("/api/model", get(model_status))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
