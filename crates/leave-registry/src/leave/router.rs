use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{EmployeeId, LeaveSubmission};
use super::intake::DataInconsistency;
use super::policy::ANNUAL_ECONOMIC_ALLOWANCE;
use super::repository::{Clock, EmployeeStore, RequestStore};
use super::service::{LeaveService, SubmissionError};

/// Router builder exposing the validation and reporting endpoints.
pub fn leave_router<E, R, C>(service: Arc<LeaveService<E, R, C>>) -> Router
where
    E: EmployeeStore + 'static,
    R: RequestStore + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/api/v1/leave/requests", post(submit_handler::<E, R, C>))
        .route(
            "/api/v1/leave/requests/validate",
            post(validate_handler::<E, R, C>),
        )
        .route(
            "/api/v1/leave/employees/:employee_id/balance",
            get(balance_handler::<E, R, C>),
        )
        .route("/api/v1/leave/overview", get(overview_handler::<E, R, C>))
        .route("/api/v1/leave/policy", get(policy_handler::<E, R, C>))
        .with_state(service)
}

pub(crate) async fn submit_handler<E, R, C>(
    State(service): State<Arc<LeaveService<E, R, C>>>,
    axum::Json(submission): axum::Json<LeaveSubmission>,
) -> Response
where
    E: EmployeeStore + 'static,
    R: RequestStore + 'static,
    C: Clock + 'static,
{
    match service.submit(submission) {
        Ok(receipt) => {
            let payload = json!({
                "request": receipt.request,
                "remaining_balance": receipt.remaining_balance,
                "advisories": receipt
                    .advisories
                    .iter()
                    .map(|advisory| advisory.summary())
                    .collect::<Vec<_>>(),
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Inconsistent(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Rejected(violations)) => {
            let payload = json!({
                "error": "request rejected",
                "violations": violations
                    .iter()
                    .map(|violation| violation.to_string())
                    .collect::<Vec<_>>(),
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

pub(crate) async fn validate_handler<E, R, C>(
    State(service): State<Arc<LeaveService<E, R, C>>>,
    axum::Json(submission): axum::Json<LeaveSubmission>,
) -> Response
where
    E: EmployeeStore + 'static,
    R: RequestStore + 'static,
    C: Clock + 'static,
{
    match service.evaluate(&submission) {
        Ok(outcome) => {
            let payload = json!({
                "admissible": outcome.is_admissible(),
                "violations": outcome
                    .violations
                    .iter()
                    .map(|violation| violation.to_string())
                    .collect::<Vec<_>>(),
                "advisories": outcome
                    .advisories
                    .iter()
                    .map(|advisory| advisory.summary())
                    .collect::<Vec<_>>(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Inconsistent(error)) => {
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

pub(crate) async fn balance_handler<E, R, C>(
    State(service): State<Arc<LeaveService<E, R, C>>>,
    Path(employee_id): Path<u64>,
) -> Response
where
    E: EmployeeStore + 'static,
    R: RequestStore + 'static,
    C: Clock + 'static,
{
    let id = EmployeeId(employee_id);
    match service.balance(id) {
        Ok(available_days) => {
            let payload = json!({
                "employee_id": id,
                "available_days": available_days,
                "allowance": ANNUAL_ECONOMIC_ALLOWANCE,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(SubmissionError::Inconsistent(DataInconsistency::UnknownEmployee(_))) => {
            let payload = json!({
                "error": format!("employee {} is not on the roster", id),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn overview_handler<E, R, C>(
    State(service): State<Arc<LeaveService<E, R, C>>>,
) -> Response
where
    E: EmployeeStore + 'static,
    R: RequestStore + 'static,
    C: Clock + 'static,
{
    match service.overview() {
        Ok(overview) => (StatusCode::OK, axum::Json(overview)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn policy_handler<E, R, C>(
    State(service): State<Arc<LeaveService<E, R, C>>>,
) -> axum::Json<serde_json::Value>
where
    E: EmployeeStore + 'static,
    R: RequestStore + 'static,
    C: Clock + 'static,
{
    let categories: Vec<_> = service
        .policy_table()
        .entries()
        .map(|(category, policy)| {
            json!({
                "category": category.label(),
                "name": policy.name,
                "max_days_per_request": policy.max_days_per_request,
                "max_occurrences": policy.max_occurrences,
                "occurrence_scope": policy.occurrence_scope,
                "min_interval_days": policy.min_interval_days,
                "description": policy.description,
            })
        })
        .collect();

    axum::Json(json!({
        "annual_economic_allowance": ANNUAL_ECONOMIC_ALLOWANCE,
        "categories": categories,
    }))
}
