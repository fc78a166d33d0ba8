use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use super::evaluator::{BenefitEvaluator, EvaluatorError};
use super::request::{EstimationRequest, RequestError};
use super::service::{EstimationError, EstimationService};

const INVALID_REQUEST: &str = "INVALID_REQUEST";

/// Router exposing the estimate and field catalog endpoints.
pub fn estimation_router<E>(service: Arc<EstimationService<E>>) -> Router
where
    E: BenefitEvaluator + 'static,
{
    Router::new()
        .route(
            "/api/v1/estimate",
            get(estimate_query_handler::<E>).post(estimate_body_handler::<E>),
        )
        .route("/api/v1/fields", get(fields_handler::<E>))
        .with_state(service)
}

pub(crate) async fn estimate_query_handler<E>(
    State(service): State<Arc<EstimationService<E>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response
where
    E: BenefitEvaluator + 'static,
{
    respond(&service, EstimationRequest::from_query_pairs(pairs))
}

pub(crate) async fn estimate_body_handler<E>(
    State(service): State<Arc<EstimationService<E>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response
where
    E: BenefitEvaluator + 'static,
{
    match payload {
        Ok(Json(body)) => respond(&service, EstimationRequest::from_json(&body)),
        Err(rejection) => invalid_request(rejection.body_text()),
    }
}

pub(crate) async fn fields_handler<E>(
    State(service): State<Arc<EstimationService<E>>>,
) -> Response
where
    E: BenefitEvaluator + 'static,
{
    (StatusCode::OK, Json(service.fields())).into_response()
}

fn respond<E>(
    service: &EstimationService<E>,
    request: Result<EstimationRequest, RequestError>,
) -> Response
where
    E: BenefitEvaluator + 'static,
{
    let request = match request {
        Ok(request) => request,
        Err(error) => return invalid_request(error.to_string()),
    };

    match service.process(&request.answers, request.language) {
        Ok(response) => {
            let status = if response.is_success() {
                StatusCode::OK
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, Json(response)).into_response()
        }
        Err(EstimationError::Evaluator(error)) => {
            let status = match error {
                EvaluatorError::Rejected(_) => StatusCode::BAD_REQUEST,
                EvaluatorError::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let payload = json!({
                "error": "EVALUATOR",
                "detail": error.to_string(),
            });
            (status, Json(payload)).into_response()
        }
    }
}

fn invalid_request(detail: String) -> Response {
    let payload = json!({
        "error": INVALID_REQUEST,
        "detail": detail,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}
