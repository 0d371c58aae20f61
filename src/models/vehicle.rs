//! Vehicle type model.
//!
//! This module defines the closed set of vehicle categories the engine knows
//! about, together with the exemption lookup and the conversions used at the
//! boundary (numeric codes and names).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The category of a vehicle passing a toll gantry.
///
/// Only [`VehicleType::Other`] is fee-liable; every other category is
/// permanently toll-exempt. Each variant has a stable numeric code equal to
/// its position in declaration order (MotorBike = 0 ... Other = 6).
///
/// # Example
///
/// ```
/// use toll_engine::models::VehicleType;
///
/// assert!(VehicleType::Diplomat.is_toll_free());
/// assert!(!VehicleType::Other.is_toll_free());
/// assert_eq!(VehicleType::try_from(6u8).unwrap(), VehicleType::Other);
/// assert!(VehicleType::try_from(7u8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    /// Motorcycles and mopeds.
    MotorBike,
    /// Agricultural tractors.
    Tractor,
    /// Emergency service vehicles.
    Emergency,
    /// Vehicles with diplomatic registration.
    Diplomat,
    /// Vehicles with foreign registration.
    Foreign,
    /// Military vehicles.
    Military,
    /// Any other vehicle. The only fee-liable category.
    Other,
}

impl VehicleType {
    /// All vehicle types, ordered by code.
    pub const ALL: [VehicleType; 7] = [
        VehicleType::MotorBike,
        VehicleType::Tractor,
        VehicleType::Emergency,
        VehicleType::Diplomat,
        VehicleType::Foreign,
        VehicleType::Military,
        VehicleType::Other,
    ];

    /// Returns true if this category never pays a toll.
    pub fn is_toll_free(self) -> bool {
        match self {
            VehicleType::MotorBike
            | VehicleType::Tractor
            | VehicleType::Emergency
            | VehicleType::Diplomat
            | VehicleType::Foreign
            | VehicleType::Military => true,
            VehicleType::Other => false,
        }
    }

    /// Returns the stable numeric code for this category.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleType::MotorBike => "MotorBike",
            VehicleType::Tractor => "Tractor",
            VehicleType::Emergency => "Emergency",
            VehicleType::Diplomat => "Diplomat",
            VehicleType::Foreign => "Foreign",
            VehicleType::Military => "Military",
            VehicleType::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

impl TryFrom<u8> for VehicleType {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        VehicleType::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| EngineError::VehicleTypeError {
                value: code.to_string(),
            })
    }
}

impl FromStr for VehicleType {
    type Err = EngineError;

    /// Parses a vehicle type name, ignoring case and `_`/`-` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "motorbike" => Ok(VehicleType::MotorBike),
            "tractor" => Ok(VehicleType::Tractor),
            "emergency" => Ok(VehicleType::Emergency),
            "diplomat" => Ok(VehicleType::Diplomat),
            "foreign" => Ok(VehicleType::Foreign),
            "military" => Ok(VehicleType::Military),
            "other" => Ok(VehicleType::Other),
            _ => Err(EngineError::VehicleTypeError {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<&str> for VehicleType {
    type Error = EngineError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
