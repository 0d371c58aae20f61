//! Application state for the toll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::TollEngine;
use crate::config::ConfigLoader;
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the engine behind an `Arc`; the engine is read-only so handlers
/// share it without locking.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<TollEngine>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: TollEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Builds the engine from loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> EngineResult<Self> {
        Ok(Self::new(config.build_engine()?))
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &TollEngine {
        &self.engine
    }
}
