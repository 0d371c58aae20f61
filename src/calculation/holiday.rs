//! Toll-free date detection.
//!
//! The engine asks a [`HolidayCalendar`] whether a calendar date is toll-free.
//! Calendars are pluggable so regional rules can be swapped without touching
//! fee logic; any `Fn(NaiveDate) -> bool` closure is also a calendar.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Decides whether passes on a given date are toll-free.
///
/// # Example
///
/// ```
/// use toll_engine::calculation::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let never_free = |_: NaiveDate| false;
/// assert!(!never_free.is_toll_free(NaiveDate::from_ymd_opt(2013, 12, 25).unwrap()));
/// ```
pub trait HolidayCalendar: Send + Sync {
    /// Returns true if no toll is charged on `date`.
    fn is_toll_free(&self, date: NaiveDate) -> bool;
}

impl<F> HolidayCalendar for F
where
    F: Fn(NaiveDate) -> bool + Send + Sync,
{
    fn is_toll_free(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

/// Returns true for Saturdays and Sundays.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A calendar where only weekends are toll-free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendCalendar;

impl HolidayCalendar for WeekendCalendar {
    fn is_toll_free(&self, date: NaiveDate) -> bool {
        is_weekend(date)
    }
}

/// A calendar of weekends plus an explicit set of holiday dates.
///
/// # Example
///
/// ```
/// use toll_engine::calculation::{FixedHolidayCalendar, HolidayCalendar};
/// use chrono::NaiveDate;
///
/// let calendar = FixedHolidayCalendar::swedish_2013();
/// // Christmas Eve
/// assert!(calendar.is_toll_free(NaiveDate::from_ymd_opt(2013, 12, 24).unwrap()));
/// // An ordinary Thursday
/// assert!(!calendar.is_toll_free(NaiveDate::from_ymd_opt(2013, 2, 7).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedHolidayCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl FixedHolidayCalendar {
    /// Creates a calendar from a list of holiday dates.
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    /// The Swedish public holidays of 2013, including the whole of July.
    pub fn swedish_2013() -> Self {
        const FIXED_DAYS: [(u32, u32); 16] = [
            (1, 1),
            (3, 28),
            (3, 29),
            (4, 1),
            (4, 30),
            (5, 1),
            (5, 8),
            (5, 9),
            (6, 5),
            (6, 6),
            (6, 21),
            (11, 1),
            (12, 24),
            (12, 25),
            (12, 26),
            (12, 31),
        ];

        let july = (1..=31).map(|day| (7, day));

        Self::new(
            FIXED_DAYS
                .into_iter()
                .chain(july)
                .filter_map(|(month, day)| NaiveDate::from_ymd_opt(2013, month, day)),
        )
    }

    /// Returns true if `date` is one of the listed holidays.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Number of listed holidays.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if no holidays are listed.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl HolidayCalendar for FixedHolidayCalendar {
    fn is_toll_free(&self, date: NaiveDate) -> bool {
        is_weekend(date) || self.is_holiday(date)
    }
}
