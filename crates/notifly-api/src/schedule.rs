//! Schedule-string resolution for notification sends.
//!
//! The console submits wall-clock strings in the app's fixed +07:00 offset
//! (`M/d/yyyy` and `H:mm`); the provider expects a UTC instant. There is no
//! DST and no timezone database involved, only a constant shift.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

/// Fixed wall-clock offset the console operates in.
pub(crate) const UTC_OFFSET_HOURS: i64 = 7;

/// Reasons a schedule pair can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScheduleError {
    /// Date string does not parse as `M/d/yyyy`.
    BadDate,
    /// Time string does not parse as `H:mm`.
    BadTime,
    /// Resolved instant is not in the future.
    InPast,
}

/// Resolve a local date/time pair into a UTC delivery instant.
///
/// Rejects malformed fields and instants at or before `now`.
pub(crate) fn resolve_schedule(
    date: &str,
    time: &str,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ScheduleError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%m/%d/%Y")
        .map_err(|_| ScheduleError::BadDate)?;
    let time =
        NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| ScheduleError::BadTime)?;
    let local = date.and_time(time);
    let utc = (local - Duration::hours(UTC_OFFSET_HOURS)).and_utc();
    if utc <= now {
        return Err(ScheduleError::InPast);
    }
    Ok(utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn resolves_wall_clock_to_utc() {
        let now = at(2024, 1, 1, 0, 0);
        let utc = resolve_schedule("1/15/2024", "9:30", now).expect("schedule");
        assert_eq!(utc, at(2024, 1, 15, 2, 30));
    }

    #[test]
    fn rejects_malformed_fields() {
        let now = at(2024, 1, 1, 0, 0);
        assert_eq!(
            resolve_schedule("2024-01-15", "9:30", now),
            Err(ScheduleError::BadDate)
        );
        assert_eq!(
            resolve_schedule("1/15/2024", "25:00", now),
            Err(ScheduleError::BadTime)
        );
    }

    #[test]
    fn rejects_past_instants() {
        let now = at(2024, 6, 1, 12, 0);
        assert_eq!(
            resolve_schedule("1/15/2024", "9:30", now),
            Err(ScheduleError::InPast)
        );
    }
}
