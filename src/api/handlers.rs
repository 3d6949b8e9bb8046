//! HTTP request handlers for the Leave Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{LeaveApplication, LeaveDecision, LeaveRecord, ValidationRequest};
use crate::service::LeaveService;

use super::request::{BalanceQuery, PendingQuery};
use super::response::{ApiError, ApiErrorResponse, LeaveView, PolicyResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/policy", get(policy_handler))
        .route("/vacations/validate", post(validate_vacation_handler))
        .route("/leaves", post(create_leave_handler))
        .route("/leaves/pending", get(pending_leaves_handler))
        .route("/leaves/:leave_id/approve", post(approve_leave_handler))
        .route("/leaves/:leave_id/reject", post(reject_leave_handler))
        .route("/leaves/:leave_id/cancel", post(cancel_leave_handler))
        .route("/employees/:employee_id/leaves", get(list_leaves_handler))
        .route(
            "/employees/:employee_id/vacation-balance",
            get(vacation_balance_handler),
        )
        .with_state(state)
}

/// Maps a JSON body rejection onto an API error.
fn json_rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn json_ok<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

/// Handler for GET /policy.
async fn policy_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    json_ok(
        StatusCode::OK,
        PolicyResponse {
            policy: config.metadata().clone(),
            vacation: config.vacation_policy(),
        },
    )
}

/// Handler for POST /vacations/validate.
///
/// Always answers 200 for a well-formed request; the body says whether the
/// vacation is permitted.
async fn validate_vacation_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValidationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing vacation validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(rejection, correlation_id).into_response(),
    };

    let start_time = Instant::now();
    let result = state.service().engine().validate_request(&request);
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        requested_days = request.requested_days,
        valid = result.valid,
        duration_us = start_time.elapsed().as_micros(),
        "Vacation validation completed"
    );

    json_ok(StatusCode::OK, result)
}

/// Handler for POST /leaves.
async fn create_leave_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveApplication>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave creation request");

    let application = match payload {
        Ok(Json(app)) => app,
        Err(rejection) => return json_rejection_error(rejection, correlation_id).into_response(),
    };

    match state.service().create_leave(application) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                leave_id = %record.id,
                "Leave creation completed"
            );
            json_ok(StatusCode::CREATED, record)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Leave creation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /employees/{employee_id}/leaves.
async fn list_leaves_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let today = state.today();
    match state.service().leaves_for_employee(&employee_id) {
        Ok(records) => {
            let views: Vec<LeaveView> = records
                .into_iter()
                .map(|record| LeaveView {
                    status: record.status_on(today),
                    record,
                })
                .collect();
            json_ok(StatusCode::OK, views)
        }
        Err(err) => {
            warn!(employee_id = %employee_id, error = %err, "Listing leaves failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /employees/{employee_id}/vacation-balance.
async fn vacation_balance_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    query: Result<Query<BalanceQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };

    match state.service().balance(&employee_id, &query.period) {
        Ok(balance) => json_ok(StatusCode::OK, balance),
        Err(err) => {
            warn!(employee_id = %employee_id, error = %err, "Balance lookup failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /leaves/pending.
async fn pending_leaves_handler(
    State(state): State<AppState>,
    query: Result<Query<PendingQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };

    match state.service().pending(query.limit) {
        Ok(records) => json_ok(StatusCode::OK, records),
        Err(err) => {
            warn!(error = %err, "Listing pending leaves failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

type Decide = fn(&LeaveService, &str, LeaveDecision) -> crate::error::EngineResult<LeaveRecord>;

/// Shared body of the approve, reject and cancel handlers.
fn decide_leave(
    state: &AppState,
    leave_id: &str,
    payload: Result<Json<LeaveDecision>, JsonRejection>,
    decide: Decide,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, leave_id = %leave_id, "Processing leave decision");

    let decision = match payload {
        Ok(Json(decision)) => decision,
        Err(rejection) => return json_rejection_error(rejection, correlation_id).into_response(),
    };

    match decide(state.service(), leave_id, decision) {
        Ok(record) => json_ok(StatusCode::OK, record),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                leave_id = %leave_id,
                error = %err,
                "Leave decision failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /leaves/{leave_id}/approve.
async fn approve_leave_handler(
    State(state): State<AppState>,
    Path(leave_id): Path<String>,
    payload: Result<Json<LeaveDecision>, JsonRejection>,
) -> Response {
    decide_leave(&state, &leave_id, payload, LeaveService::approve)
}

/// Handler for POST /leaves/{leave_id}/reject.
async fn reject_leave_handler(
    State(state): State<AppState>,
    Path(leave_id): Path<String>,
    payload: Result<Json<LeaveDecision>, JsonRejection>,
) -> Response {
    decide_leave(&state, &leave_id, payload, LeaveService::reject)
}

/// Handler for POST /leaves/{leave_id}/cancel.
async fn cancel_leave_handler(
    State(state): State<AppState>,
    Path(leave_id): Path<String>,
    payload: Result<Json<LeaveDecision>, JsonRejection>,
) -> Response {
    decide_leave(&state, &leave_id, payload, LeaveService::cancel)
}
