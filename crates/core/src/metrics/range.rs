//! Range resolution: token to concrete time window.

use chainboard_common::time::Clock;
use chainboard_domain::{ChartRange, TimeWindow};
use chrono::{Days, Duration, NaiveTime};

/// Resolve a range into its concrete window ending now.
///
/// Buckets are calendar-day aligned in UTC: the window starts at midnight of
/// `today - (days - 1)` and ends at the clock's current instant, so the
/// final (today's) bucket is truncated at "now". Calendar alignment is what
/// makes the `{date, count}` response contract well-defined: every bucket
/// maps to exactly one date.
///
/// The window end is read from the clock on every call, never cached, so
/// repeated calls naturally advance the window. `end > start` holds for
/// every supported range; the bucket count equals the range's day count
/// except at the exact midnight instant, when today's bucket has zero width
/// and drops out.
pub fn resolve_window(range: ChartRange, clock: &dyn Clock) -> TimeWindow {
    let now = clock.now_utc();
    let start_date = now.date_naive() - Days::new(range.days() - 1);
    let start = start_date.and_time(NaiveTime::MIN).and_utc();
    TimeWindow::new(start, now, Duration::days(1))
}
