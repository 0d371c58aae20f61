//! Core data models for the toll engine.
//!
//! This module contains the domain models used throughout the engine.

mod toll_result;
mod vehicle;

pub use toll_result::{ChargeWindow, DailyToll, PassFee, TollBreakdown, TollResult};
pub use vehicle::VehicleType;
