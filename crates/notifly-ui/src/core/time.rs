//! Fixed-offset wall-clock conversion and schedule-string validation.
//!
//! # Design
//! - The console renders Cambodia wall-clock time as a constant +07:00 shift.
//!   No DST and no timezone database; the shifted instant carries the local
//!   calendar fields in its UTC accessors, so formatters read those fields
//!   directly and never apply a second conversion.
//! - Validators return a descriptive reason string so forms can surface the
//!   problem inline instead of panicking.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use regex::Regex;

/// Fixed wall-clock offset the console operates in.
pub const UTC_OFFSET_HOURS: i64 = 7;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap_or_else(|err| {
        panic!("invalid schedule date pattern: {err}");
    })
});

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap_or_else(|err| {
        panic!("invalid schedule time pattern: {err}");
    })
});

/// Shift a UTC instant to local wall-clock time.
#[must_use]
pub fn to_local(utc: DateTime<Utc>) -> DateTime<Utc> {
    utc + Duration::hours(UTC_OFFSET_HOURS)
}

/// Shift a local wall-clock instant back to UTC.
///
/// `to_utc(to_local(x)) == x` for every instant.
#[must_use]
pub fn to_utc(local: DateTime<Utc>) -> DateTime<Utc> {
    local - Duration::hours(UTC_OFFSET_HOURS)
}

/// Render a UTC instant as a local `dd MMM yyyy` date.
#[must_use]
pub fn format_date(utc: DateTime<Utc>) -> String {
    to_local(utc).format("%d %b %Y").to_string()
}

/// Render a UTC instant as a local `dd MMM yyyy | HH:mm` stamp.
#[must_use]
pub fn format_date_time(utc: DateTime<Utc>) -> String {
    to_local(utc).format("%d %b %Y | %H:%M").to_string()
}

/// Render a UTC instant as a local 24-hour `HH:mm` time.
#[must_use]
pub fn format_time(utc: DateTime<Utc>) -> String {
    to_local(utc).format("%H:%M").to_string()
}

/// Bucket the distance between `instant` and `now` into a relative phrase.
///
/// Under a minute is "just now"; minutes, hours, and days follow up to a
/// week; anything older falls back to [`format_date`].
#[must_use]
pub fn relative_time(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - instant;
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} minute{} ago", plural(minutes));
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{hours} hour{} ago", plural(hours));
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{days} day{} ago", plural(days));
    }
    format_date(instant)
}

const fn plural(count: i64) -> &'static str {
    if count > 1 { "s" } else { "" }
}

/// Validate a `M/d/yyyy` schedule date against the local calendar.
///
/// # Errors
///
/// Returns a descriptive reason when the shape is wrong, the fields do not
/// form a real calendar date, or the date lies before today.
pub fn validate_schedule_date(value: &str, now: DateTime<Utc>) -> Result<NaiveDate, String> {
    let captures = DATE_RE
        .captures(value.trim())
        .ok_or_else(|| "date must use the M/d/yyyy format".to_string())?;
    let month: u32 = parse_field(&captures[1], "month")?;
    let day: u32 = parse_field(&captures[2], "day")?;
    let year: i32 = parse_field(&captures[3], "year")?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("{month}/{day}/{year} is not a real calendar date"))?;
    let today = to_local(now).date_naive();
    if date < today {
        return Err("schedule date must not be in the past".to_string());
    }
    Ok(date)
}

/// Validate a `H:mm` schedule time.
///
/// # Errors
///
/// Returns a descriptive reason when the shape is wrong or the hour/minute
/// fall outside the 24-hour clock.
pub fn validate_schedule_time(value: &str) -> Result<NaiveTime, String> {
    let captures = TIME_RE
        .captures(value.trim())
        .ok_or_else(|| "time must use the H:mm format".to_string())?;
    let hour: u32 = parse_field(&captures[1], "hour")?;
    let minute: u32 = parse_field(&captures[2], "minute")?;
    if hour > 23 {
        return Err("hour must be between 0 and 23".to_string());
    }
    if minute > 59 {
        return Err("minute must be between 0 and 59".to_string());
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| format!("{hour}:{minute:02} is not a valid time"))
}

fn parse_field<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("{name} field is out of range"))
}

/// Today's local date as a `M/d/yyyy` string for schedule-form defaults.
#[must_use]
pub fn current_date_string(now: DateTime<Utc>) -> String {
    let local = to_local(now);
    format!("{}/{}/{}", local.month(), local.day(), local.year())
}

/// The current local time as a `H:mm` string for schedule-form defaults.
#[must_use]
pub fn current_time_string(now: DateTime<Utc>) -> String {
    let local = to_local(now);
    format!("{}:{:02}", local.hour(), local.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn shift_round_trips() {
        let instants = [
            at(2024, 1, 15, 10, 0),
            at(2023, 12, 31, 23, 30),
            at(2024, 2, 29, 0, 0),
        ];
        for instant in instants {
            assert_eq!(to_utc(to_local(instant)), instant);
        }
    }

    #[test]
    fn formats_cambodia_wall_clock() {
        let instant = at(2024, 1, 15, 10, 0);
        assert_eq!(format_date(instant), "15 Jan 2024");
        assert_eq!(format_date_time(instant), "15 Jan 2024 | 17:00");
        assert_eq!(format_time(instant), "17:00");
    }

    #[test]
    fn shift_crosses_the_day_boundary() {
        let instant = at(2024, 1, 15, 20, 30);
        assert_eq!(format_date(instant), "16 Jan 2024");
        assert_eq!(format_time(instant), "03:30");
    }

    #[test]
    fn relative_time_buckets_and_pluralizes() {
        let now = at(2024, 6, 1, 12, 0);
        assert_eq!(relative_time(now, now), "just now");
        assert_eq!(relative_time(at(2024, 6, 1, 11, 59), now), "1 minute ago");
        assert_eq!(relative_time(at(2024, 6, 1, 11, 58), now), "2 minutes ago");
        assert_eq!(relative_time(at(2024, 6, 1, 11, 0), now), "1 hour ago");
        assert_eq!(relative_time(at(2024, 5, 31, 12, 0), now), "1 day ago");
        assert_eq!(relative_time(at(2024, 5, 26, 12, 0), now), "6 days ago");
        assert_eq!(relative_time(at(2024, 5, 1, 12, 0), now), "01 May 2024");
    }

    #[test]
    fn schedule_date_accepts_today_and_future() {
        let now = at(2024, 1, 15, 0, 0);
        assert!(validate_schedule_date("1/15/2024", now).is_ok());
        assert!(validate_schedule_date("12/31/2024", now).is_ok());
    }

    #[test]
    fn schedule_date_rejects_shape_calendar_and_past() {
        let now = at(2024, 1, 15, 0, 0);
        assert!(
            validate_schedule_date("2024-01-15", now)
                .unwrap_err()
                .contains("M/d/yyyy")
        );
        assert!(
            validate_schedule_date("2/30/2024", now)
                .unwrap_err()
                .contains("not a real calendar date")
        );
        assert!(
            validate_schedule_date("1/1/2024", now)
                .unwrap_err()
                .contains("past")
        );
    }

    #[test]
    fn schedule_time_checks_ranges() {
        assert!(validate_schedule_time("0:00").is_ok());
        assert!(validate_schedule_time("23:59").is_ok());
        assert!(validate_schedule_time("24:00").unwrap_err().contains("hour"));
        assert!(
            validate_schedule_time("12:60")
                .unwrap_err()
                .contains("minute")
        );
        assert!(
            validate_schedule_time("noon")
                .unwrap_err()
                .contains("H:mm")
        );
    }

    #[test]
    fn current_strings_read_the_shifted_instant() {
        // 22:05 UTC on Jan 15 is 5:05 on Jan 16 in +07:00.
        let now = at(2024, 1, 15, 22, 5);
        assert_eq!(current_date_string(now), "1/16/2024");
        assert_eq!(current_time_string(now), "5:05");
    }
}
