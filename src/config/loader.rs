//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading toll engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::{FixedHolidayCalendar, TollEngine};
use crate::error::{EngineError, EngineResult};

use super::types::{HolidayList, TollSettings};

/// Loads and provides access to toll engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/sweden_2013/
/// ├── schedule.yaml   # Fee intervals, grace period, cap
/// └── holidays.yaml   # Toll-free dates besides weekends
/// ```
///
/// # Example
///
/// ```no_run
/// use toll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sweden_2013")?;
/// let engine = loader.build_engine()?;
/// println!("Cap: {}", engine.daily_cap());
/// # Ok::<(), toll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: TollSettings,
    holidays: HolidayList,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or is not valid YAML.
    /// The fee schedule itself is validated by [`ConfigLoader::build_engine`].
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<TollSettings>(&path.join("schedule.yaml"))?;
        let holidays = Self::load_yaml::<HolidayList>(&path.join("holidays.yaml"))?;

        Ok(Self { settings, holidays })
    }

    /// Creates a loader from already-parsed parts.
    pub fn from_parts(settings: TollSettings, holidays: HolidayList) -> Self {
        Self { settings, holidays }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &TollSettings {
        &self.settings
    }

    /// Returns the holiday list.
    pub fn holidays(&self) -> &HolidayList {
        &self.holidays
    }

    /// Builds a calendar of weekends plus the listed holidays.
    pub fn calendar(&self) -> FixedHolidayCalendar {
        FixedHolidayCalendar::new(self.holidays.dates.iter().copied())
    }

    /// Builds an engine from the loaded settings and holidays.
    ///
    /// Fails with [`EngineError::ConfigurationError`] if the fee schedule or
    /// grace period is malformed.
    pub fn build_engine(&self) -> EngineResult<TollEngine> {
        TollEngine::with_settings(&self.settings, self.calendar())
    }
}
