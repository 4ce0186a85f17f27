use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;

use safeguard_common::api::ledger::{
    RecordOutcomeRequest, RecordPredictionRequest, ThresholdResponse, UpdateThresholdRequest,
};
use safeguard_common::api::screening::{ScoreRequest, ScreenRequest, ScreenResponse};
use safeguard_common::ids::EventId;
use safeguard_common::types::{
    DetectionEvent, DetectionMetrics, LedgerReport, RiskAssessment, ThresholdAnalysis,
};
use safeguard_common::SafeguardError;

use crate::ledger::SignalDetectionLedger;
use crate::scoring::RiskScorer;

/// Shared application state accessible from axum handlers.
pub struct AppState {
    pub scorer: RiskScorer,
    pub ledger: Arc<SignalDetectionLedger>,
    pub metrics_handle: PrometheusHandle,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/score", post(score_handler))
        .route("/screen", post(screen_handler))
        .route("/events", post(record_prediction_handler))
        .route("/events/{id}", get(get_event_handler))
        .route("/events/{id}/outcome", post(record_outcome_handler))
        .route("/review", get(review_handler))
        .route("/detection/metrics", get(detection_metrics_handler))
        .route(
            "/threshold",
            get(threshold_analysis_handler).put(update_threshold_handler),
        )
        .route("/report", get(report_handler))
        .with_state(state)
}

fn error_response(e: SafeguardError) -> (StatusCode, String) {
    let status = match &e {
        SafeguardError::NotFound(_) => StatusCode::NOT_FOUND,
        SafeguardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    tracing::debug!(error = %e, status = status.as_u16(), "Request rejected");
    (status, e.to_string())
}

fn observe_assessment(assessment: &RiskAssessment) {
    metrics::counter!(
        "safety.assessments",
        "classification" => assessment.classification.as_str()
    )
    .increment(1);
    if assessment.crisis_detected {
        metrics::counter!("safety.crisis_detected").increment(1);
    }
}

async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "healthy" })),
    )
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}

/// POST /score — score a message without recording it.
async fn score_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScoreRequest>,
) -> Json<RiskAssessment> {
    let start = std::time::Instant::now();
    let assessment = state.scorer.score(&request.text);
    metrics::histogram!("safety.score.latency").record(start.elapsed().as_secs_f64());
    observe_assessment(&assessment);
    Json(assessment)
}

/// POST /screen — score a message and record the prediction.
async fn screen_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScreenRequest>,
) -> ApiResult<ScreenResponse> {
    let assessment = state.scorer.score(&request.message);
    observe_assessment(&assessment);

    let event = state
        .ledger
        .record_assessment(
            request.user_id,
            request.session_id,
            &assessment,
            &request.message,
        )
        .map_err(error_response)?;

    if assessment.crisis_detected {
        tracing::warn!(
            event_id = %event.id,
            session_id = %event.session_id,
            score = assessment.score,
            "Crisis cue detected"
        );
    }

    Ok(Json(ScreenResponse { assessment, event }))
}

/// POST /events — record a prediction for an externally scored message.
async fn record_prediction_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordPredictionRequest>,
) -> ApiResult<DetectionEvent> {
    state
        .ledger
        .record_prediction(
            request.user_id,
            request.session_id,
            request.wbc_score,
            &request.user_message,
        )
        .map(Json)
        .map_err(error_response)
}

/// GET /events/{id}
async fn get_event_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> ApiResult<DetectionEvent> {
    state
        .ledger
        .get_event(EventId(id))
        .map(Json)
        .map_err(error_response)
}

/// POST /events/{id}/outcome — attach ground truth.
async fn record_outcome_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(request): Json<RecordOutcomeRequest>,
) -> ApiResult<DetectionEvent> {
    let event = state
        .ledger
        .record_outcome(EventId(id), request.actual_risk, request.notes)
        .map_err(error_response)?;

    if let Some(outcome) = event.outcome {
        metrics::counter!("safety.outcomes", "outcome" => outcome.as_str()).increment(1);
    }

    Ok(Json(event))
}

/// GET /review — flagged events awaiting ground truth.
async fn review_handler(State(state): State<Arc<AppState>>) -> Json<Vec<DetectionEvent>> {
    Json(state.ledger.events_needing_review())
}

/// GET /detection/metrics
async fn detection_metrics_handler(State(state): State<Arc<AppState>>) -> Json<DetectionMetrics> {
    Json(state.ledger.get_metrics())
}

/// GET /threshold — recommendation only, nothing is applied.
async fn threshold_analysis_handler(
    State(state): State<Arc<AppState>>,
) -> Json<ThresholdAnalysis> {
    Json(state.ledger.analyze_threshold_performance())
}

/// PUT /threshold
async fn update_threshold_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateThresholdRequest>,
) -> Json<ThresholdResponse> {
    let threshold = state.ledger.update_threshold(request.threshold);
    metrics::gauge!("safety.operating_threshold").set(f64::from(threshold));
    Json(ThresholdResponse { threshold })
}

/// GET /report
async fn report_handler(State(state): State<Arc<AppState>>) -> Json<LedgerReport> {
    Json(state.ledger.export_report())
}
