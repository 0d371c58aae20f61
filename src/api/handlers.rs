//! HTTP request handlers for the toll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::TollEngine;
use crate::error::EngineResult;
use crate::models::{DailyToll, TollBreakdown, TollResult, VehicleType};

use super::request::TollRequest;
use super::response::{ApiError, ApiErrorResponse, DailyTollsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tolls", post(tolls_handler))
        .route("/tolls/daily", post(daily_tolls_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Handler for POST /tolls.
///
/// Returns the capped total for all passes along with its charge windows.
async fn tolls_handler(
    State(state): State<AppState>,
    payload: Result<Json<TollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing toll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match compute_tolls(state.engine(), &request) {
        Ok((vehicle_type, breakdown)) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                vehicle_type = ?vehicle_type,
                passes_count = request.passes.len(),
                total_fee = breakdown.total_fee,
                duration_us,
                "Toll calculation completed"
            );
            let result = TollResult::from_breakdown(vehicle_type, breakdown, duration_us);
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Toll calculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /tolls/daily.
///
/// Returns a separately capped breakdown per calendar date.
async fn daily_tolls_handler(
    State(state): State<AppState>,
    payload: Result<Json<TollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing daily toll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match compute_daily_tolls(state.engine(), &request) {
        Ok(days) => {
            let response = DailyTollsResponse::new(days);
            info!(
                correlation_id = %correlation_id,
                days_count = response.days.len(),
                total_fee = response.total_fee,
                "Daily toll calculation completed"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Daily toll calculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn compute_tolls(
    engine: &TollEngine,
    request: &TollRequest,
) -> EngineResult<(Option<VehicleType>, TollBreakdown)> {
    let passes = request.parse_passes()?;
    let breakdown = engine.calculate(&passes, request.vehicle_type.clone())?;
    // An empty batch is accepted for any vehicle value, known or not.
    let vehicle_type = VehicleType::try_from(request.vehicle_type.clone()).ok();
    Ok((vehicle_type, breakdown))
}

fn compute_daily_tolls(engine: &TollEngine, request: &TollRequest) -> EngineResult<Vec<DailyToll>> {
    let passes = request.parse_passes()?;
    engine.daily_breakdown(&passes, request.vehicle_type.clone())
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, error)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}
