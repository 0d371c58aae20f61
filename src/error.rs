//! Error types for the toll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building the engine or
//! computing fees.

use std::convert::Infallible;

use thiserror::Error;

/// The main error type for the toll engine.
///
/// # Example
///
/// ```
/// use toll_engine::error::EngineError;
///
/// let error = EngineError::VehicleTypeError {
///     value: "7".to_string(),
/// };
/// assert_eq!(error.to_string(), "not a VehicleType: 7");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A fee interval or engine setting could not be parsed or is inconsistent.
    #[error("Invalid fee configuration for '{interval}': {message}")]
    ConfigurationError {
        /// The interval (or setting) that failed validation.
        interval: String,
        /// A description of what was wrong with it.
        message: String,
    },

    /// A vehicle type value outside the closed enumeration was supplied.
    #[error("not a VehicleType: {value}")]
    VehicleTypeError {
        /// The rejected value, as supplied by the caller.
        value: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A pass timestamp supplied at the boundary could not be parsed.
    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp {
        /// The raw timestamp string.
        value: String,
        /// A description of the parse error.
        message: String,
    },
}

impl From<Infallible> for EngineError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
