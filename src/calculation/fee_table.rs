//! Time-of-day fee table.
//!
//! A fee table is an ordered set of half-open `[start, end)` intervals
//! measured from local midnight, each mapped to a fee. Offsets not covered by
//! any interval are free.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The canonical fee schedule as `(start, end, fee)` triples.
pub const DEFAULT_FEE_SCHEDULE: [(&str, &str, u32); 11] = [
    ("0h", "6h", 0),
    ("6h", "6h 30m", 8),
    ("6h 30m", "7h", 13),
    ("7h", "8h", 18),
    ("8h", "8h 30m", 13),
    ("8h 30m", "15h", 8),
    ("15h", "15h 30m", 13),
    ("15h 30m", "17h", 18),
    ("17h", "18h", 13),
    ("18h", "18h 30m", 8),
    ("18h 30m", "24h", 0),
];

/// An unparsed fee interval, as written in configuration.
///
/// Bounds use humantime duration syntax, e.g. `"6h"` or `"6h 30m"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSpec {
    /// Offset from midnight at which the interval starts (inclusive).
    pub start: String,
    /// Offset from midnight at which the interval ends (exclusive).
    pub end: String,
    /// The fee charged for a pass within the interval.
    pub fee: u32,
}

impl FeeSpec {
    /// Creates a new interval specification.
    pub fn new(start: impl Into<String>, end: impl Into<String>, fee: u32) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            fee,
        }
    }

    fn label(&self) -> String {
        format!("{}..{}", self.start, self.end)
    }
}

/// Returns the canonical schedule as owned specifications.
pub fn default_fee_specs() -> Vec<FeeSpec> {
    DEFAULT_FEE_SCHEDULE
        .iter()
        .map(|(start, end, fee)| FeeSpec::new(*start, *end, *fee))
        .collect()
}

/// A parsed, half-open fee interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeInterval {
    /// Inclusive start offset from midnight.
    pub start: TimeDelta,
    /// Exclusive end offset from midnight.
    pub end: TimeDelta,
    /// Fee for passes inside the interval.
    pub fee: u32,
}

impl FeeInterval {
    /// Returns true if `offset` lies in `[start, end)`.
    ///
    /// # Example
    ///
    /// ```
    /// use toll_engine::calculation::FeeInterval;
    /// use chrono::TimeDelta;
    ///
    /// let interval = FeeInterval {
    ///     start: TimeDelta::hours(6),
    ///     end: TimeDelta::minutes(390),
    ///     fee: 8,
    /// };
    /// assert!(interval.contains(TimeDelta::hours(6)));
    /// assert!(!interval.contains(TimeDelta::minutes(390)));
    /// ```
    pub fn contains(&self, offset: TimeDelta) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Parses a humantime duration string into an offset from midnight.
///
/// Fails with [`EngineError::ConfigurationError`] if the text is not a valid
/// duration or does not fit within a day.
pub fn parse_offset(value: &str) -> EngineResult<TimeDelta> {
    let std_duration =
        humantime::parse_duration(value).map_err(|e| EngineError::ConfigurationError {
            interval: value.to_string(),
            message: e.to_string(),
        })?;

    let offset = TimeDelta::from_std(std_duration).map_err(|e| EngineError::ConfigurationError {
        interval: value.to_string(),
        message: e.to_string(),
    })?;

    if offset > TimeDelta::days(1) {
        return Err(EngineError::ConfigurationError {
            interval: value.to_string(),
            message: "offset exceeds 24h".to_string(),
        });
    }

    Ok(offset)
}

/// An immutable, ordered collection of non-overlapping fee intervals.
///
/// # Example
///
/// ```
/// use toll_engine::calculation::FeeTable;
/// use chrono::TimeDelta;
///
/// let table = FeeTable::default_table().unwrap();
/// assert_eq!(table.resolve(TimeDelta::minutes(7 * 60 + 30)), 18);
/// assert_eq!(table.resolve(TimeDelta::hours(5)), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeTable {
    intervals: Vec<FeeInterval>,
}

impl FeeTable {
    /// Builds a table from interval specifications.
    ///
    /// Every bound must parse, each interval must have `start < end`, and
    /// intervals must not overlap. Gaps are allowed.
    pub fn from_specs(specs: &[FeeSpec]) -> EngineResult<Self> {
        let mut intervals = Vec::with_capacity(specs.len());

        for spec in specs {
            let start = parse_offset(&spec.start)?;
            let end = parse_offset(&spec.end)?;

            if start >= end {
                return Err(EngineError::ConfigurationError {
                    interval: spec.label(),
                    message: "interval start must be before its end".to_string(),
                });
            }

            intervals.push(FeeInterval {
                start,
                end,
                fee: spec.fee,
            });
        }

        intervals.sort_by_key(|i| i.start);

        if let Some(pair) = intervals.windows(2).find(|pair| pair[0].end > pair[1].start) {
            return Err(EngineError::ConfigurationError {
                interval: format!(
                    "{}m..{}m",
                    pair[1].start.num_minutes(),
                    pair[1].end.num_minutes()
                ),
                message: format!(
                    "overlaps the interval ending at {}m",
                    pair[0].end.num_minutes()
                ),
            });
        }

        Ok(Self { intervals })
    }

    /// Builds the canonical table.
    pub fn default_table() -> EngineResult<Self> {
        Self::from_specs(&default_fee_specs())
    }

    /// Resolves an offset from midnight to a fee, or 0 if no interval covers it.
    pub fn resolve(&self, offset: TimeDelta) -> u32 {
        self.intervals
            .iter()
            .find(|interval| interval.contains(offset))
            .map_or(0, |interval| interval.fee)
    }

    /// Returns the intervals in ascending order.
    pub fn intervals(&self) -> &[FeeInterval] {
        &self.intervals
    }
}
