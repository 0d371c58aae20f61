//! Grace-period aggregation and the daily cap.
//!
//! Passes are grouped into charging windows. A window opens at a pass and
//! covers `[start, start + grace_period)`; every pass inside it is billed once,
//! at the window's peak fee. The first pass at or beyond the window end opens
//! the next window.

use chrono::TimeDelta;
use tracing::debug;

use crate::models::{ChargeWindow, PassFee, TollBreakdown};

/// The default grace period.
pub const DEFAULT_GRACE_PERIOD: &str = "1h";

/// The default ceiling on the total fee.
pub const DEFAULT_DAILY_CAP: u32 = 60;

/// Groups per-pass fees into charging windows.
///
/// `pass_fees` must already be sorted ascending by timestamp.
///
/// # Example
///
/// ```
/// use toll_engine::calculation::aggregate_windows;
/// use toll_engine::models::PassFee;
/// use chrono::{NaiveDateTime, TimeDelta};
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let passes = [
///     PassFee { timestamp: at("2013-02-07 06:00:00"), fee: 8 },
///     PassFee { timestamp: at("2013-02-07 06:40:00"), fee: 13 },
///     PassFee { timestamp: at("2013-02-07 07:00:00"), fee: 18 },
/// ];
///
/// let windows = aggregate_windows(&passes, TimeDelta::hours(1));
/// assert_eq!(windows.len(), 2);
/// assert_eq!(windows[0].charged_fee, 13);
/// assert_eq!(windows[1].charged_fee, 18);
/// ```
pub fn aggregate_windows(pass_fees: &[PassFee], grace_period: TimeDelta) -> Vec<ChargeWindow> {
    let mut windows: Vec<ChargeWindow> = Vec::new();

    for pass in pass_fees {
        match windows.last_mut() {
            // A window whose end is past the representable range never closes.
            Some(window)
                if window
                    .start
                    .checked_add_signed(grace_period)
                    .is_none_or(|end| pass.timestamp < end) =>
            {
                window.charged_fee = window.charged_fee.max(pass.fee);
                window.passes.push(*pass);
            }
            _ => {
                if let Some(closed) = windows.last() {
                    debug!(
                        window_start = %closed.start,
                        passes = closed.passes.len(),
                        charged_fee = closed.charged_fee,
                        "Charge window closed"
                    );
                }
                windows.push(ChargeWindow {
                    start: pass.timestamp,
                    passes: vec![*pass],
                    charged_fee: pass.fee,
                });
            }
        }
    }

    windows
}

/// Clamps a total to the cap.
pub fn apply_cap(total: u32, daily_cap: u32) -> u32 {
    total.min(daily_cap)
}

/// Sums the window charges and applies the cap.
pub fn summarize(windows: Vec<ChargeWindow>, daily_cap: u32) -> TollBreakdown {
    let uncapped_fee = windows
        .iter()
        .fold(0u32, |sum, window| sum.saturating_add(window.charged_fee));

    TollBreakdown {
        windows,
        uncapped_fee,
        total_fee: apply_cap(uncapped_fee, daily_cap),
        daily_cap,
    }
}
