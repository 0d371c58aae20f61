//! Toll calculation result models.
//!
//! This module contains the [`TollBreakdown`] produced by the engine and the
//! [`TollResult`] envelope returned by the HTTP API, along with the charge
//! windows and per-pass fees that explain how a total was reached.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::VehicleType;

/// The fee resolved for a single pass, before grace-period aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassFee {
    /// When the vehicle passed the gantry.
    pub timestamp: NaiveDateTime,
    /// The fee for this pass on its own.
    pub fee: u32,
}

/// A grace-period charging window.
///
/// All passes within the window are billed once, at the highest fee among
/// them.
///
/// # Example
///
/// ```
/// use toll_engine::models::{ChargeWindow, PassFee};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let window = ChargeWindow {
///     start: at("2013-02-07 06:00:00"),
///     passes: vec![
///         PassFee { timestamp: at("2013-02-07 06:00:00"), fee: 8 },
///         PassFee { timestamp: at("2013-02-07 06:40:00"), fee: 13 },
///     ],
///     charged_fee: 13,
/// };
/// assert_eq!(window.passes.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeWindow {
    /// The pass that opened the window.
    pub start: NaiveDateTime,
    /// Every pass billed within this window, in ascending order.
    pub passes: Vec<PassFee>,
    /// The fee charged for the window (the peak pass fee).
    pub charged_fee: u32,
}

/// The full outcome of aggregating a set of passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TollBreakdown {
    /// Charging windows in ascending order.
    pub windows: Vec<ChargeWindow>,
    /// Sum of the window charges before the cap.
    pub uncapped_fee: u32,
    /// The fee actually owed, never above `daily_cap`.
    pub total_fee: u32,
    /// The ceiling that was applied.
    pub daily_cap: u32,
}

impl TollBreakdown {
    /// An empty breakdown for a call with no passes.
    pub fn empty(daily_cap: u32) -> Self {
        Self {
            windows: Vec::new(),
            uncapped_fee: 0,
            total_fee: 0,
            daily_cap,
        }
    }

    /// Returns true if the daily cap reduced the total.
    pub fn is_capped(&self) -> bool {
        self.uncapped_fee > self.total_fee
    }
}

/// The breakdown for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyToll {
    /// The calendar date the passes fell on.
    pub date: NaiveDate,
    /// The aggregated fees for that date.
    #[serde(flatten)]
    pub breakdown: TollBreakdown,
}

/// The result envelope returned by the `/tolls` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TollResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The vehicle type the fees were computed for. Absent when an empty
    /// batch was sent with an unrecognized vehicle value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<VehicleType>,
    /// The fee owed.
    pub total_fee: u32,
    /// The fee before the cap was applied.
    pub uncapped_fee: u32,
    /// Whether the cap reduced the fee.
    pub capped: bool,
    /// The ceiling in effect.
    pub daily_cap: u32,
    /// Charging windows formed from the passes.
    pub windows: Vec<ChargeWindow>,
    /// Time taken by the calculation, in microseconds.
    pub duration_us: u64,
}

impl TollResult {
    /// Wraps an engine breakdown in a result envelope.
    pub fn from_breakdown(
        vehicle_type: Option<VehicleType>,
        breakdown: TollBreakdown,
        duration_us: u64,
    ) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            vehicle_type,
            total_fee: breakdown.total_fee,
            uncapped_fee: breakdown.uncapped_fee,
            capped: breakdown.is_capped(),
            daily_cap: breakdown.daily_cap,
            windows: breakdown.windows,
            duration_us,
        }
    }
}
