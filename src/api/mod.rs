//! HTTP API module for the toll engine.
//!
//! This module provides the REST API endpoints that accept JSON pass lists
//! and return toll fees.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{TollRequest, VehicleTypeValue};
pub use response::{ApiError, ApiErrorResponse, DailyTollsResponse};
pub use state::AppState;
