//! Request types for the toll engine API.
//!
//! This module defines the JSON request body shared by the `/tolls` and
//! `/tolls/daily` endpoints, and its conversion into engine inputs.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::VehicleType;

/// Request body for the toll endpoints.
///
/// # Example
///
/// ```
/// use toll_engine::api::TollRequest;
///
/// let request: TollRequest = serde_json::from_str(
///     r#"{ "passes": ["2013-02-07T06:00:00Z"], "vehicle_type": 6 }"#,
/// ).unwrap();
/// assert_eq!(request.parse_passes().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TollRequest {
    /// Pass timestamps in RFC 3339 format, in any order.
    pub passes: Vec<String>,
    /// The vehicle type, as a numeric code or a name.
    #[serde(alias = "vehicletype")]
    pub vehicle_type: VehicleTypeValue,
}

/// A vehicle type as it appears on the wire.
///
/// Left unvalidated so that out-of-range codes reach the engine and are
/// reported as vehicle type errors rather than malformed JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VehicleTypeValue {
    /// A numeric code, 0 (MotorBike) through 6 (Other).
    Code(i64),
    /// A name such as "other" or "motor_bike".
    Name(String),
}

impl TryFrom<VehicleTypeValue> for VehicleType {
    type Error = EngineError;

    fn try_from(value: VehicleTypeValue) -> Result<Self, Self::Error> {
        match value {
            VehicleTypeValue::Code(code) => {
                let code = u8::try_from(code).map_err(|_| EngineError::VehicleTypeError {
                    value: code.to_string(),
                })?;
                VehicleType::try_from(code)
            }
            VehicleTypeValue::Name(name) => name.parse(),
        }
    }
}

impl TollRequest {
    /// Parses the pass timestamps.
    ///
    /// The civil time written in each timestamp is used as-is; offsets are
    /// not converted between zones.
    pub fn parse_passes(&self) -> EngineResult<Vec<NaiveDateTime>> {
        self.passes
            .iter()
            .map(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .map(|timestamp| timestamp.naive_local())
                    .map_err(|e| EngineError::InvalidTimestamp {
                        value: raw.clone(),
                        message: e.to_string(),
                    })
            })
            .collect()
    }
}
