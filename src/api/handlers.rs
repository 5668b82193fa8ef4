//! HTTP request handlers for the shift ledger API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::{
    CloseShiftRequest, ExpenseRequest, MeterReadingRequest, StartShiftRequest, TripRequest,
    ValidateShiftRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;
use crate::error::LedgerError;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/shifts", post(start_shift_handler))
        .route("/shifts/:id/trips", post(record_trip_handler))
        .route("/shifts/:id/expenses", post(record_expense_handler))
        .route("/shifts/:id/readings", post(record_reading_handler))
        .route("/shifts/:id/close", post(close_shift_handler))
        .route("/shifts/:id/validate", post(validate_shift_handler))
        .route("/shifts/:id/summary", get(shift_summary_handler))
        .with_state(state)
}

/// Unwraps a JSON payload, mapping rejections to API errors.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => Err(match rejection {
            JsonRejection::JsonDataError(err) => {
                // The body text carries the detailed error from serde.
                let body_text = err.body_text();
                warn!(
                    correlation_id = %correlation_id,
                    error = %body_text,
                    "JSON data error"
                );
                if body_text.contains("missing field") {
                    ApiError::new("VALIDATION_ERROR", body_text)
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
            JsonRejection::MissingJsonContentType(_) => ApiError::new(
                "MISSING_CONTENT_TYPE",
                "Content-Type must be application/json",
            ),
            _ => ApiError::malformed_json("Failed to parse request body"),
        }),
    }
}

fn bad_request(error: ApiError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn ledger_error(error: LedgerError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    let response: ApiErrorResponse = error.into();
    (
        response.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response.error),
    )
        .into_response()
}

fn ok_json<T: serde::Serialize>(status: StatusCode, value: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(value),
    )
        .into_response()
}

/// Handler for `POST /shifts`.
async fn start_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<StartShiftRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(req) => req,
        Err(error) => return bad_request(error),
    };
    info!(
        correlation_id = %correlation_id,
        driver_id = %request.driver_id,
        "Opening shift"
    );
    match state
        .ledger()
        .start(request.driver_id, request.vehicle_id, request.odometer_start)
    {
        Ok(shift) => ok_json(StatusCode::CREATED, &shift),
        Err(error) => ledger_error(error, correlation_id),
    }
}

/// Handler for `POST /shifts/:id/trips`.
async fn record_trip_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(req) => req,
        Err(error) => return bad_request(error),
    };
    match state.ledger().record_trip(shift_id, request.into()) {
        Ok(trip) => ok_json(StatusCode::CREATED, &trip),
        Err(error) => ledger_error(error, correlation_id),
    }
}

/// Handler for `POST /shifts/:id/expenses`.
async fn record_expense_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
    payload: Result<Json<ExpenseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(req) => req,
        Err(error) => return bad_request(error),
    };
    match state.ledger().record_expense(shift_id, request.into()) {
        Ok(expense) => ok_json(StatusCode::CREATED, &expense),
        Err(error) => ledger_error(error, correlation_id),
    }
}

/// Handler for `POST /shifts/:id/readings`.
async fn record_reading_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
    payload: Result<Json<MeterReadingRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(req) => req,
        Err(error) => return bad_request(error),
    };
    match state.ledger().record_meter_reading(shift_id, request.into()) {
        Ok(shift) => ok_json(StatusCode::OK, &shift),
        Err(error) => ledger_error(error, correlation_id),
    }
}

/// Handler for `POST /shifts/:id/close`.
async fn close_shift_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
    payload: Result<Json<CloseShiftRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(req) => req,
        Err(error) => return bad_request(error),
    };
    info!(correlation_id = %correlation_id, shift_id = %shift_id, "Closing shift");
    match state.ledger().close(
        shift_id,
        request.end_readings.into(),
        request.declared_cash,
        request.interruption_minutes,
    ) {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                shift_id = %shift_id,
                net_pay = %summary.net_pay,
                "Shift closed"
            );
            ok_json(StatusCode::OK, &summary)
        }
        Err(error) => ledger_error(error, correlation_id),
    }
}

/// Handler for `POST /shifts/:id/validate`.
async fn validate_shift_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
    payload: Result<Json<ValidateShiftRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(payload, correlation_id) {
        Ok(req) => req,
        Err(error) => return bad_request(error),
    };
    match state.ledger().validate(shift_id, &request.signature) {
        Ok(shift) => ok_json(StatusCode::OK, &shift),
        Err(error) => ledger_error(error, correlation_id),
    }
}

/// Handler for `GET /shifts/:id/summary`.
async fn shift_summary_handler(
    State(state): State<AppState>,
    Path(shift_id): Path<Uuid>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    match state.ledger().summary(shift_id) {
        Ok(summary) => ok_json(StatusCode::OK, &summary),
        Err(error) => ledger_error(error, correlation_id),
    }
}
