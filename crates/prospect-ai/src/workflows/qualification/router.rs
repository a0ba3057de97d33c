use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::reasoner::QualitativeReasoner;
use super::service::{AnalysisRequest, QualificationError, QualificationService};

/// Router builder exposing the analysis endpoint.
pub fn qualification_router<R>(service: Arc<QualificationService<R>>) -> Router
where
    R: QualitativeReasoner + 'static,
{
    Router::new()
        .route(
            "/api/v1/qualification/analyses",
            post(analyze_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn analyze_handler<R>(
    State(service): State<Arc<QualificationService<R>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    R: QualitativeReasoner + 'static,
{
    match service.analyze(&request) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error @ QualificationError::IntentScoreOutOfRange(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
