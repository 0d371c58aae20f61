//! Road Toll Fee Engine
//!
//! This crate computes toll fees for a vehicle from a set of timestamped
//! gantry passes. It applies a time-of-day fee table, holiday and vehicle
//! exemptions, a grace period that bills rapid repeat passes once, and a
//! daily fee cap.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
