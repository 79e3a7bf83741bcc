//! Operational day computation.
//!
//! The business day does not end at midnight: a closing submitted before
//! local noon belongs to the previous calendar day's shift.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Local wall-clock time at which a new operational day begins.
pub const CUTOVER: NaiveTime = match NaiveTime::from_hms_opt(12, 0, 0) {
    Some(time) => time,
    None => panic!("invalid cutover time"),
};

/// Returns the operational day `instant` belongs to in `tz`.
///
/// Local times before 12:00 map to the previous calendar date; 12:00:00.000
/// and later map to the local calendar date itself. A morning on
/// `NaiveDate::MIN` has no previous date and saturates to `NaiveDate::MIN`.
///
/// # Example
///
/// ```
/// use cashbox_core::gate::compute_operational_day;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// // 09:00 in Santo Domingo (UTC-4)
/// let instant = Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap();
/// let day = compute_operational_day(instant, chrono_tz::America::Santo_Domingo);
/// assert_eq!(day, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
#[must_use]
pub fn compute_operational_day(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    let local = instant.with_timezone(&tz);
    let date = local.date_naive();

    if local.time() < CUTOVER {
        // Saturates at the first representable date.
        date.pred_opt().unwrap_or(NaiveDate::MIN)
    } else {
        date
    }
}

/// Returns the instant at which the operational day after `day` begins:
/// local `day + 1` at 12:00:00.000 in `tz`.
///
/// `NaiveDate::MAX` has no successor; its result saturates to noon on
/// `NaiveDate::MAX` itself.
#[must_use]
pub fn next_eligible_instant(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let next_day = day.succ_opt().unwrap_or(NaiveDate::MAX);
    resolve_local(tz, next_day.and_time(CUTOVER))
}

/// Maps a local wall-clock time to an absolute instant.
///
/// Ambiguous times (clocks turned back) resolve to the earliest instant.
/// Times skipped by a forward transition resolve to the first valid
/// instant after the gap.
fn resolve_local(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    if let Some(instant) = tz.from_local_datetime(&local).earliest() {
        return instant.with_timezone(&Utc);
    }

    (1..=24 * 60)
        .map_while(|minutes| local.checked_add_signed(TimeDelta::minutes(minutes)))
        .find_map(|shifted| tz.from_local_datetime(&shifted).earliest())
        .map_or_else(
            || Utc.from_utc_datetime(&local),
            |instant| instant.with_timezone(&Utc),
        )
}
