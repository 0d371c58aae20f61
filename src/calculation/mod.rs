//! Calculation logic for the toll engine.
//!
//! This module contains the time-of-day fee table, toll-free date detection,
//! grace-period aggregation with the fee cap, and the [`TollEngine`] that ties
//! them together.

mod engine;
mod fee_table;
mod grace_window;
mod holiday;

pub use engine::TollEngine;
pub use fee_table::{
    DEFAULT_FEE_SCHEDULE, FeeInterval, FeeSpec, FeeTable, default_fee_specs, parse_offset,
};
pub use grace_window::{
    DEFAULT_DAILY_CAP, DEFAULT_GRACE_PERIOD, aggregate_windows, apply_cap, summarize,
};
pub use holiday::{FixedHolidayCalendar, HolidayCalendar, WeekendCalendar, is_weekend};
