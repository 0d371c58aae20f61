//! The toll engine.
//!
//! [`TollEngine`] owns the fee table, the grace period, the fee cap and a
//! holiday calendar. It is immutable after construction, so a single instance
//! can be shared by concurrent callers; all per-call state lives on the stack
//! of the call.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use tracing::debug;

use crate::config::TollSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{DailyToll, PassFee, TollBreakdown, VehicleType};

use super::fee_table::FeeTable;
use super::grace_window::{aggregate_windows, summarize};
use super::holiday::HolidayCalendar;

/// Computes toll fees from timestamped passes.
///
/// Vehicle types may be passed as a [`VehicleType`], a numeric code (`u8`)
/// or a name (`&str`). An unknown code or name fails with
/// [`EngineError::VehicleTypeError`] before any pass is evaluated.
///
/// # Example
///
/// ```
/// use toll_engine::calculation::{FixedHolidayCalendar, TollEngine};
/// use toll_engine::models::VehicleType;
/// use chrono::NaiveDateTime;
///
/// let engine = TollEngine::new(FixedHolidayCalendar::swedish_2013()).unwrap();
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
///
/// // 2013-02-07 is a Thursday
/// let passes = [at("2013-02-07 06:00:00"), at("2013-02-07 06:15:00")];
/// assert_eq!(engine.get_toll_fees(&passes, VehicleType::Other).unwrap(), 8);
/// assert!(engine.get_toll_fees(&passes, 7u8).is_err());
/// ```
pub struct TollEngine {
    fee_table: FeeTable,
    grace_period: TimeDelta,
    daily_cap: u32,
    calendar: Box<dyn HolidayCalendar>,
}

impl fmt::Debug for TollEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TollEngine")
            .field("fee_table", &self.fee_table)
            .field("grace_period", &self.grace_period)
            .field("daily_cap", &self.daily_cap)
            .finish_non_exhaustive()
    }
}

impl TollEngine {
    /// Creates an engine with the canonical fee table, a one hour grace
    /// period and a cap of 60.
    ///
    /// Fails with [`EngineError::ConfigurationError`] if the table cannot be
    /// built.
    pub fn new(calendar: impl HolidayCalendar + 'static) -> EngineResult<Self> {
        Self::with_settings(&TollSettings::default(), calendar)
    }

    /// Creates an engine from explicit settings.
    pub fn with_settings(
        settings: &TollSettings,
        calendar: impl HolidayCalendar + 'static,
    ) -> EngineResult<Self> {
        let fee_table = FeeTable::from_specs(&settings.fee_schedule)?;
        let grace_period = parse_grace_period(&settings.grace_period)?;

        Ok(Self {
            fee_table,
            grace_period,
            daily_cap: settings.daily_cap,
            calendar: Box::new(calendar),
        })
    }

    /// Returns the fee table.
    pub fn fee_table(&self) -> &FeeTable {
        &self.fee_table
    }

    /// Returns the grace period.
    pub fn grace_period(&self) -> TimeDelta {
        self.grace_period
    }

    /// Returns the cap applied to totals.
    pub fn daily_cap(&self) -> u32 {
        self.daily_cap
    }

    /// Returns true if passes on `date` are free for every vehicle.
    pub fn is_toll_free_date(&self, date: NaiveDate) -> bool {
        self.calendar.is_toll_free(date)
    }

    /// Computes the fee for a single pass, with no grace-period aggregation.
    pub fn get_toll_fee<V>(&self, timestamp: NaiveDateTime, vehicle: V) -> EngineResult<u32>
    where
        V: TryInto<VehicleType>,
        EngineError: From<V::Error>,
    {
        let vehicle = vehicle.try_into()?;
        Ok(self.pass_fee(timestamp, vehicle))
    }

    /// Computes the capped total for a set of passes.
    pub fn get_toll_fees<V>(&self, passes: &[NaiveDateTime], vehicle: V) -> EngineResult<u32>
    where
        V: TryInto<VehicleType>,
        EngineError: From<V::Error>,
    {
        Ok(self.calculate(passes, vehicle)?.total_fee)
    }

    /// Computes the total for a set of passes along with the charge windows
    /// that produced it.
    ///
    /// Passes may be in any order; the caller's slice is not modified. An
    /// empty slice yields an empty breakdown without validating the vehicle.
    pub fn calculate<V>(&self, passes: &[NaiveDateTime], vehicle: V) -> EngineResult<TollBreakdown>
    where
        V: TryInto<VehicleType>,
        EngineError: From<V::Error>,
    {
        if passes.is_empty() {
            return Ok(TollBreakdown::empty(self.daily_cap));
        }

        let vehicle = vehicle.try_into()?;
        Ok(self.breakdown(passes, vehicle))
    }

    /// Computes a separate capped breakdown for each calendar date the
    /// passes fall on, in ascending date order.
    pub fn daily_breakdown<V>(
        &self,
        passes: &[NaiveDateTime],
        vehicle: V,
    ) -> EngineResult<Vec<DailyToll>>
    where
        V: TryInto<VehicleType>,
        EngineError: From<V::Error>,
    {
        if passes.is_empty() {
            return Ok(Vec::new());
        }

        let vehicle = vehicle.try_into()?;

        let mut by_date: BTreeMap<NaiveDate, Vec<NaiveDateTime>> = BTreeMap::new();
        for pass in passes {
            by_date.entry(pass.date()).or_default().push(*pass);
        }

        Ok(by_date
            .into_iter()
            .map(|(date, day_passes)| DailyToll {
                date,
                breakdown: self.breakdown(&day_passes, vehicle),
            })
            .collect())
    }

    fn pass_fee(&self, timestamp: NaiveDateTime, vehicle: VehicleType) -> u32 {
        if vehicle.is_toll_free() || self.calendar.is_toll_free(timestamp.date()) {
            return 0;
        }

        let offset = timestamp.time().signed_duration_since(NaiveTime::MIN);
        self.fee_table.resolve(offset)
    }

    fn breakdown(&self, passes: &[NaiveDateTime], vehicle: VehicleType) -> TollBreakdown {
        let mut sorted = passes.to_vec();
        sorted.sort_unstable();

        let pass_fees: Vec<PassFee> = sorted
            .into_iter()
            .map(|timestamp| PassFee {
                timestamp,
                fee: self.pass_fee(timestamp, vehicle),
            })
            .collect();

        let windows = aggregate_windows(&pass_fees, self.grace_period);
        let breakdown = summarize(windows, self.daily_cap);

        debug!(
            vehicle_type = %vehicle,
            passes = pass_fees.len(),
            windows = breakdown.windows.len(),
            uncapped_fee = breakdown.uncapped_fee,
            total_fee = breakdown.total_fee,
            "Toll fees calculated"
        );

        breakdown
    }
}

fn parse_grace_period(value: &str) -> EngineResult<TimeDelta> {
    let configuration_error = |message: String| EngineError::ConfigurationError {
        interval: format!("grace_period {}", value),
        message,
    };

    let std_duration =
        humantime::parse_duration(value).map_err(|e| configuration_error(e.to_string()))?;
    let grace_period =
        TimeDelta::from_std(std_duration).map_err(|e| configuration_error(e.to_string()))?;

    if grace_period <= TimeDelta::zero() {
        return Err(configuration_error(
            "grace period must be positive".to_string(),
        ));
    }
    if grace_period > TimeDelta::days(1) {
        return Err(configuration_error(
            "grace period must not exceed 24h".to_string(),
        ));
    }

    Ok(grace_period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::fee_table::FeeSpec;
    use crate::calculation::holiday::{FixedHolidayCalendar, WeekendCalendar};
    use proptest::prelude::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn weekday(time_str: &str) -> NaiveDateTime {
        // 2024-09-20 is a Friday
        make_datetime("2024-09-20", time_str)
    }

    fn engine() -> TollEngine {
        TollEngine::new(FixedHolidayCalendar::swedish_2013()).unwrap()
    }

    #[test]
    fn test_get_toll_fee_follows_schedule() {
        let engine = engine();
        let cases = [
            ("05:00:00", 0),
            ("06:00:00", 8),
            ("06:30:00", 13),
            ("07:30:00", 18),
            ("08:00:00", 13),
            ("12:00:00", 8),
            ("15:00:00", 13),
            ("16:00:00", 18),
            ("17:00:00", 13),
            ("18:00:00", 8),
            ("18:30:00", 0),
        ];

        for (time, expected) in cases {
            assert_eq!(
                engine.get_toll_fee(weekday(time), VehicleType::Other).unwrap(),
                expected,
                "unexpected fee at {}",
                time
            );
        }
    }

    #[test]
    fn test_weekend_is_toll_free_all_day() {
        let engine = engine();
        // 2024-09-22 is a Sunday
        for hour in 0..24 {
            let pass = make_datetime("2024-09-22", &format!("{:02}:00:00", hour));
            assert_eq!(engine.get_toll_fee(pass, VehicleType::Other).unwrap(), 0);
        }
    }

    #[test]
    fn test_public_holiday_is_toll_free() {
        let engine = engine();
        // 2013-12-24 is a Tuesday
        let pass = make_datetime("2013-12-24", "07:30:00");
        assert_eq!(engine.get_toll_fee(pass, VehicleType::Other).unwrap(), 0);
        assert!(engine.is_toll_free_date(pass.date()));
    }

    #[test]
    fn test_only_other_vehicles_pay() {
        let engine = engine();
        let pass = weekday("15:00:00");
        for vehicle in VehicleType::ALL {
            let expected = if vehicle == VehicleType::Other { 13 } else { 0 };
            assert_eq!(
                engine.get_toll_fee(pass, vehicle).unwrap(),
                expected,
                "unexpected fee for {}",
                vehicle
            );
        }
    }

    #[test]
    fn test_vehicle_codes_and_names_are_accepted() {
        let engine = engine();
        let pass = weekday("07:30:00");
        assert_eq!(engine.get_toll_fee(pass, 6u8).unwrap(), 18);
        assert_eq!(engine.get_toll_fee(pass, 0u8).unwrap(), 0);
        assert_eq!(engine.get_toll_fee(pass, "other").unwrap(), 18);
    }

    #[test]
    fn test_invalid_vehicle_code_is_rejected() {
        let engine = engine();
        let err = engine.get_toll_fee(weekday("07:30:00"), 7u8).unwrap_err();
        assert!(matches!(err, EngineError::VehicleTypeError { .. }));

        let passes = [weekday("06:00:00"), weekday("07:30:00")];
        let err = engine.get_toll_fees(&passes, 7u8).unwrap_err();
        assert_eq!(err.to_string(), "not a VehicleType: 7");
    }

    #[test]
    fn test_empty_passes_are_free() {
        let engine = engine();
        assert_eq!(engine.get_toll_fees(&[], VehicleType::Other).unwrap(), 0);
        assert_eq!(engine.get_toll_fees(&[], 7u8).unwrap(), 0);
        assert!(engine.daily_breakdown(&[], VehicleType::Other).unwrap().is_empty());
    }

    #[test]
    fn test_single_pass() {
        let engine = engine();
        let passes = [weekday("06:00:00")];
        assert_eq!(engine.get_toll_fees(&passes, VehicleType::Other).unwrap(), 8);
    }

    #[test]
    fn test_passes_within_one_window() {
        let engine = engine();
        let passes = [weekday("05:00:00"), weekday("06:00:00"), weekday("06:15:00")];
        assert_eq!(engine.get_toll_fees(&passes, VehicleType::Other).unwrap(), 8);
    }

    #[test]
    fn test_passes_over_multiple_windows() {
        let engine = engine();
        let passes = [weekday("05:00:00"), weekday("06:00:00"), weekday("07:00:00")];
        assert_eq!(engine.get_toll_fees(&passes, VehicleType::Other).unwrap(), 26);
    }

    #[test]
    fn test_total_is_capped() {
        let engine = engine();
        let passes = [
            weekday("06:00:00"),
            weekday("07:00:00"),
            weekday("08:30:00"),
            weekday("10:00:00"),
            weekday("12:00:00"),
            weekday("15:00:00"),
        ];
        let breakdown = engine.calculate(&passes, VehicleType::Other).unwrap();
        assert_eq!(breakdown.uncapped_fee, 63);
        assert_eq!(breakdown.total_fee, 60);
        assert!(breakdown.is_capped());
    }

    #[test]
    fn test_unsorted_input_is_not_mutated() {
        let engine = engine();
        let passes = vec![weekday("07:00:00"), weekday("05:00:00"), weekday("06:00:00")];
        let before = passes.clone();
        assert_eq!(engine.get_toll_fees(&passes, VehicleType::Other).unwrap(), 26);
        assert_eq!(passes, before);
    }

    #[test]
    fn test_calculate_reports_windows() {
        let engine = engine();
        let passes = [weekday("06:40:00"), weekday("06:00:00"), weekday("07:10:00")];
        let breakdown = engine.calculate(&passes, VehicleType::Other).unwrap();

        assert_eq!(breakdown.windows.len(), 2);
        assert_eq!(breakdown.windows[0].start, weekday("06:00:00"));
        assert_eq!(breakdown.windows[0].passes.len(), 2);
        assert_eq!(breakdown.windows[0].charged_fee, 13);
        assert_eq!(breakdown.windows[1].charged_fee, 18);
        assert_eq!(breakdown.total_fee, 31);
    }

    #[test]
    fn test_daily_breakdown_caps_each_day() {
        let engine = engine();
        let mut passes = Vec::new();
        // Thursday and Friday 2013-02-07/08, each above the cap on its own
        for date in ["2013-02-08", "2013-02-07"] {
            for time in ["06:00:00", "07:00:00", "08:30:00", "10:00:00", "12:00:00", "15:00:00"] {
                passes.push(make_datetime(date, time));
            }
        }

        let days = engine.daily_breakdown(&passes, VehicleType::Other).unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2013, 2, 7).unwrap());
        assert!(days.iter().all(|day| day.breakdown.total_fee == 60));

        // As a single batch the cap applies once
        assert_eq!(engine.get_toll_fees(&passes, VehicleType::Other).unwrap(), 60);
    }

    #[test]
    fn test_custom_settings() {
        let settings = TollSettings {
            fee_schedule: vec![FeeSpec::new("7h", "9h", 25)],
            grace_period: "30m".to_string(),
            daily_cap: 40,
        };
        let engine = TollEngine::with_settings(&settings, WeekendCalendar).unwrap();
        assert_eq!(engine.grace_period(), TimeDelta::minutes(30));
        assert_eq!(engine.daily_cap(), 40);

        let passes = [weekday("07:00:00"), weekday("07:30:00"), weekday("08:00:00")];
        // 07:00 window, 07:30 window, 08:00 window -> 75 capped at 40
        assert_eq!(engine.get_toll_fees(&passes, VehicleType::Other).unwrap(), 40);
    }

    #[test]
    fn test_malformed_schedule_fails_construction() {
        let settings = TollSettings {
            fee_schedule: vec![FeeSpec::new("6h", "six thirty", 8)],
            ..TollSettings::default()
        };
        let err = TollEngine::with_settings(&settings, WeekendCalendar).unwrap_err();
        assert!(matches!(err, EngineError::ConfigurationError { .. }));
    }

    #[test]
    fn test_zero_grace_period_fails_construction() {
        let settings = TollSettings {
            grace_period: "0s".to_string(),
            ..TollSettings::default()
        };
        let err = TollEngine::with_settings(&settings, WeekendCalendar).unwrap_err();
        assert!(err.to_string().contains("grace period must be positive"));
    }

    #[test]
    fn test_oversized_grace_period_fails_construction() {
        for grace_period in ["25h", "300000years"] {
            let settings = TollSettings {
                grace_period: grace_period.to_string(),
                ..TollSettings::default()
            };
            let err = TollEngine::with_settings(&settings, WeekendCalendar).unwrap_err();
            assert!(
                matches!(err, EngineError::ConfigurationError { .. }),
                "{} should be rejected, got {}",
                grace_period,
                err
            );
        }
    }

    #[test]
    fn test_full_day_grace_period_is_accepted() {
        let settings = TollSettings {
            grace_period: "24h".to_string(),
            ..TollSettings::default()
        };
        let engine = TollEngine::with_settings(&settings, WeekendCalendar).unwrap();
        assert_eq!(engine.grace_period(), TimeDelta::days(1));
    }

    #[test]
    fn test_passes_on_last_representable_day() {
        let engine = TollEngine::new(|_: NaiveDate| false).unwrap();
        let last_day = NaiveDateTime::MAX.date();
        let passes = [
            last_day.and_hms_opt(23, 10, 0).unwrap(),
            last_day.and_hms_opt(23, 20, 0).unwrap(),
        ];

        let breakdown = engine.calculate(&passes, VehicleType::Other).unwrap();
        assert_eq!(breakdown.windows.len(), 1);
        assert_eq!(breakdown.total_fee, 0);

        let days = engine.daily_breakdown(&passes, VehicleType::Other).unwrap();
        assert_eq!(days.len(), 1);
    }

    #[test]
    fn test_closure_calendar() {
        let engine = TollEngine::new(|_: NaiveDate| true).unwrap();
        assert_eq!(
            engine.get_toll_fee(weekday("07:30:00"), VehicleType::Other).unwrap(),
            0
        );
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TollEngine>();
    }

    fn weekday_passes() -> impl Strategy<Value = Vec<NaiveDateTime>> {
        // 2013-02-04..=2013-02-08 is Monday to Friday with no holidays
        prop::collection::vec((4u32..=8, 0u32..86_400), 0..20).prop_map(|raw| {
            raw.into_iter()
                .map(|(day, secs)| {
                    NaiveDate::from_ymd_opt(2013, 2, day)
                        .unwrap()
                        .and_time(NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap())
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_order_does_not_matter(
            (passes, shuffled) in weekday_passes()
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let engine = engine();
            prop_assert_eq!(
                engine.get_toll_fees(&passes, VehicleType::Other).unwrap(),
                engine.get_toll_fees(&shuffled, VehicleType::Other).unwrap()
            );
        }

        #[test]
        fn prop_total_never_exceeds_cap(passes in weekday_passes(), code in 0u8..7) {
            let engine = engine();
            let total = engine.get_toll_fees(&passes, code).unwrap();
            prop_assert!(total <= 60);
        }

        #[test]
        fn prop_exempt_vehicles_never_pay(passes in weekday_passes(), code in 0u8..6) {
            let engine = engine();
            prop_assert_eq!(engine.get_toll_fees(&passes, code).unwrap(), 0);
        }

        #[test]
        fn prop_weekends_are_free(day in 9u32..=10, secs in 0u32..86_400) {
            // 2013-02-09 and 2013-02-10 are Saturday and Sunday
            let pass = NaiveDate::from_ymd_opt(2013, 2, day)
                .unwrap()
                .and_time(NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap());
            let engine = engine();
            for vehicle in VehicleType::ALL {
                prop_assert_eq!(engine.get_toll_fee(pass, vehicle).unwrap(), 0);
            }
        }

        #[test]
        fn prop_invalid_codes_are_rejected(code in 7u8..=u8::MAX, secs in 0u32..86_400) {
            let pass = NaiveDate::from_ymd_opt(2013, 2, 7)
                .unwrap()
                .and_time(NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap());
            let is_vehicle_error = matches!(
                engine().get_toll_fees(&[pass], code),
                Err(EngineError::VehicleTypeError { .. })
            );
            prop_assert!(is_vehicle_error);
        }
    }
}
