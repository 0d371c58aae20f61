//! Configuration types for the toll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{DEFAULT_DAILY_CAP, DEFAULT_GRACE_PERIOD, FeeSpec, default_fee_specs};

/// Engine settings from `schedule.yaml`.
///
/// Every field is optional in YAML and falls back to the canonical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TollSettings {
    /// The time-of-day fee intervals.
    pub fee_schedule: Vec<FeeSpec>,
    /// How long a charging window stays open, in humantime syntax (e.g. "1h").
    pub grace_period: String,
    /// Ceiling on the total fee.
    pub daily_cap: u32,
}

impl Default for TollSettings {
    fn default() -> Self {
        Self {
            fee_schedule: default_fee_specs(),
            grace_period: DEFAULT_GRACE_PERIOD.to_string(),
            daily_cap: DEFAULT_DAILY_CAP,
        }
    }
}

/// A regional holiday list from `holidays.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayList {
    /// Human-readable name of the calendar.
    pub name: String,
    /// The region the calendar applies to (e.g. "SE").
    pub region: String,
    /// Toll-free dates in addition to weekends.
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
}
