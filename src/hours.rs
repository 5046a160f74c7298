//! Weekly business-hours evaluation in a listing's regional timezone.
//!
//! Core rule: this feeds page rendering, so every failure path degrades to
//! "closed" / no next opening rather than erroring. A malformed time string
//! is logged and treated as midnight; a missing day entry is a closed day.

use crate::timezone::region_timezone;
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// One row of a listing's weekly schedule (unique per day).
///
/// `day_of_week` is 1=Monday … 7=Sunday. Times are 12-hour wall-clock strings
/// with an AM/PM marker ("9:00 AM"), interpreted in the listing's region.
/// When `is_closed` is set the time strings are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyHourEntry {
    pub day_of_week: u8,
    #[serde(default)]
    pub open_time: String,
    #[serde(default)]
    pub close_time: String,
    #[serde(default)]
    pub is_closed: bool,
}

impl WeeklyHourEntry {
    pub fn open(day_of_week: u8, open_time: &str, close_time: &str) -> Self {
        Self {
            day_of_week,
            open_time: open_time.to_string(),
            close_time: close_time.to_string(),
            is_closed: false,
        }
    }

    pub fn closed(day_of_week: u8) -> Self {
        Self {
            day_of_week,
            open_time: String::new(),
            close_time: String::new(),
            is_closed: true,
        }
    }
}

/// Parse a 12-hour time string ("9:00 AM", "11:30 pm") to minutes since
/// midnight. Unparseable input degrades to 0 (midnight) with a warning;
/// upstream data entry is expected to validate.
pub fn parse_time_to_minutes(s: &str) -> u32 {
    match try_parse_time(s) {
        Some(m) => m,
        None => {
            eprintln!("  Warning: unparseable time string '{}', treating as midnight", s);
            0
        }
    }
}

fn try_parse_time(s: &str) -> Option<u32> {
    let upper = s.trim().to_uppercase();
    let (clock, is_pm) = if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim(), true)
    } else if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim(), false)
    } else {
        return None;
    };

    let (h_str, m_str) = clock.split_once(':')?;
    let hour: u32 = h_str.parse().ok()?;
    let minute: u32 = m_str.parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    let hour24 = match (hour, is_pm) {
        (12, false) => 0,  // 12 AM = midnight
        (12, true) => 12,  // 12 PM = noon
        (h, false) => h,
        (h, true) => h + 12,
    };
    Some(hour24 * 60 + minute)
}

fn entry_for(hours: &[WeeklyHourEntry], day: u8) -> Option<&WeeklyHourEntry> {
    hours.iter().find(|e| e.day_of_week == day)
}

fn day_name(day: u8) -> &'static str {
    match day {
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Sunday",
    }
}

/// Is the listing open right now?
pub fn is_open(hours: &[WeeklyHourEntry], region: &str) -> bool {
    is_open_at(hours, region, Utc::now())
}

/// Is the listing open at `now_utc`, evaluated in the region's local time?
///
/// Checks yesterday's window first: a window whose close time is numerically
/// earlier than its open time spills past midnight, so early-morning instants
/// may still belong to it.
pub fn is_open_at(hours: &[WeeklyHourEntry], region: &str, now_utc: DateTime<Utc>) -> bool {
    let tz = region_timezone(region);
    let local = now_utc.with_timezone(&tz);
    let today = local.weekday().number_from_monday() as u8;
    let current = local.hour() * 60 + local.minute();

    let prev_day = if today == 1 { 7 } else { today - 1 };
    if let Some(prev) = entry_for(hours, prev_day) {
        if !prev.is_closed {
            let open = parse_time_to_minutes(&prev.open_time);
            let close = parse_time_to_minutes(&prev.close_time);
            if close < open && current < close {
                return true; // carried over from yesterday's overnight window
            }
        }
    }

    let Some(entry) = entry_for(hours, today) else {
        return false;
    };
    if entry.is_closed {
        return false;
    }

    let open = parse_time_to_minutes(&entry.open_time);
    let close = parse_time_to_minutes(&entry.close_time);
    if open == close {
        // Equal boundary is the "open 24 hours" data convention.
        return true;
    }
    if close < open {
        // Today's own window crosses midnight.
        current >= open || current < close
    } else {
        open <= current && current < close
    }
}

/// When does the listing next open, as a render-ready string?
pub fn next_open_time(hours: &[WeeklyHourEntry], region: &str) -> Option<String> {
    next_open_time_at(hours, region, Utc::now())
}

/// `"Today at <open>"` if today's opening is still ahead, otherwise the first
/// non-closed day scanning forward from tomorrow (`"<DayName> at <open>"`).
/// Returns None when every day of the week is closed. The stored open-time
/// string is echoed verbatim.
pub fn next_open_time_at(
    hours: &[WeeklyHourEntry],
    region: &str,
    now_utc: DateTime<Utc>,
) -> Option<String> {
    let tz = region_timezone(region);
    let local = now_utc.with_timezone(&tz);
    let today = local.weekday().number_from_monday() as u8;
    let current = local.hour() * 60 + local.minute();

    if let Some(entry) = entry_for(hours, today) {
        if !entry.is_closed && current < parse_time_to_minutes(&entry.open_time) {
            return Some(format!("Today at {}", entry.open_time));
        }
    }

    // First match wins; offset 7 wraps back to today (next week).
    for offset in 1..=7u8 {
        let day = (today - 1 + offset) % 7 + 1;
        if let Some(entry) = entry_for(hours, day) {
            if !entry.is_closed {
                return Some(format!("{} at {}", day_name(day), entry.open_time));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Tz;

    const REGION: &str = "South Carolina"; // Eastern

    /// Build a UTC instant from Eastern wall-clock time (mid-January, no DST).
    fn eastern(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Tz::America__New_York
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn weekday_schedule() -> Vec<WeeklyHourEntry> {
        vec![
            WeeklyHourEntry::open(1, "11:00 AM", "5:00 PM"),
            WeeklyHourEntry::open(2, "11:00 AM", "5:00 PM"),
            WeeklyHourEntry::open(3, "11:00 AM", "5:00 PM"),
            WeeklyHourEntry::open(4, "11:00 AM", "5:00 PM"),
            WeeklyHourEntry::open(5, "11:00 AM", "5:00 PM"),
            WeeklyHourEntry::closed(6),
            WeeklyHourEntry::open(7, "10:00 AM", "4:00 PM"),
        ]
    }

    // 2025-01-13 is a Monday; the 15th Wednesday, 16th Thursday, 18th Saturday.

    #[test]
    fn test_parse_time_table() {
        assert_eq!(parse_time_to_minutes("9:00 AM"), 540);
        assert_eq!(parse_time_to_minutes("09:00 AM"), 540);
        assert_eq!(parse_time_to_minutes("12:00 AM"), 0);
        assert_eq!(parse_time_to_minutes("12:00 PM"), 720);
        assert_eq!(parse_time_to_minutes("11:59 PM"), 1439);
        assert_eq!(parse_time_to_minutes("1:11 pm"), 13 * 60 + 11);
        assert_eq!(parse_time_to_minutes("  3:05 Am "), 185);
    }

    #[test]
    fn test_parse_time_lenient_fallback() {
        // Known weak edge: bad strings become midnight, not errors.
        assert_eq!(parse_time_to_minutes("noonish"), 0);
        assert_eq!(parse_time_to_minutes("25:00 PM"), 0);
        assert_eq!(parse_time_to_minutes("9:75 AM"), 0);
        assert_eq!(parse_time_to_minutes(""), 0);
    }

    #[test]
    fn test_open_within_plain_window() {
        let hours = weekday_schedule();
        assert!(is_open_at(&hours, REGION, eastern(2025, 1, 13, 12, 0)));
        assert!(!is_open_at(&hours, REGION, eastern(2025, 1, 13, 10, 59)));
        // Close boundary is exclusive
        assert!(!is_open_at(&hours, REGION, eastern(2025, 1, 13, 17, 0)));
        assert!(is_open_at(&hours, REGION, eastern(2025, 1, 13, 16, 59)));
    }

    #[test]
    fn test_closed_day_and_missing_day() {
        let hours = weekday_schedule();
        assert!(!is_open_at(&hours, REGION, eastern(2025, 1, 18, 12, 0))); // Saturday closed
        let partial = vec![WeeklyHourEntry::open(1, "9:00 AM", "5:00 PM")];
        assert!(!is_open_at(&partial, REGION, eastern(2025, 1, 14, 12, 0))); // Tuesday missing
    }

    #[test]
    fn test_overnight_carryover_from_previous_day() {
        // Wednesday 1:11 PM – 3:00 AM spills into Thursday morning.
        let hours = vec![WeeklyHourEntry::open(3, "1:11 PM", "3:00 AM")];
        assert!(is_open_at(&hours, REGION, eastern(2025, 1, 16, 0, 5))); // Thu 12:05 AM
        assert!(!is_open_at(&hours, REGION, eastern(2025, 1, 16, 3, 5))); // Thu 3:05 AM
        // And the Wednesday evening side of the same window
        assert!(is_open_at(&hours, REGION, eastern(2025, 1, 15, 23, 30)));
        assert!(!is_open_at(&hours, REGION, eastern(2025, 1, 15, 12, 0)));
    }

    #[test]
    fn test_midnight_close_convention() {
        // "12:00 AM" close parses to 0 < open, so the window runs to midnight.
        let hours = vec![WeeklyHourEntry::open(1, "9:00 AM", "12:00 AM")];
        assert!(is_open_at(&hours, REGION, eastern(2025, 1, 13, 23, 59)));
        assert!(!is_open_at(&hours, REGION, eastern(2025, 1, 13, 8, 0)));
        // Nothing carries into Tuesday: close(0) < open but current < 0 never holds.
        assert!(!is_open_at(&hours, REGION, eastern(2025, 1, 14, 0, 0)));
    }

    #[test]
    fn test_open_all_day_equal_boundary() {
        // Equal open/close is the 24-hour convention.
        let hours = vec![WeeklyHourEntry::open(1, "12:00 AM", "12:00 AM")];
        assert!(is_open_at(&hours, REGION, eastern(2025, 1, 13, 0, 0)));
        assert!(is_open_at(&hours, REGION, eastern(2025, 1, 13, 12, 0)));
        assert!(is_open_at(&hours, REGION, eastern(2025, 1, 13, 23, 59)));
    }

    #[test]
    fn test_late_close_convention() {
        let hours = vec![WeeklyHourEntry::open(1, "9:00 AM", "11:59 PM")];
        assert!(is_open_at(&hours, REGION, eastern(2025, 1, 13, 23, 58)));
        assert!(!is_open_at(&hours, REGION, eastern(2025, 1, 13, 23, 59)));
    }

    #[test]
    fn test_timezone_resolution_matters() {
        // 9 PM Pacific Monday is midnight Tuesday Eastern. A Monday-evening
        // window must read as open for a California listing at that instant.
        let hours = vec![WeeklyHourEntry::open(1, "5:00 PM", "10:00 PM")];
        let instant = Tz::America__Los_Angeles
            .with_ymd_and_hms(2025, 1, 13, 21, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        assert!(is_open_at(&hours, "California", instant));
        assert!(!is_open_at(&hours, "South Carolina", instant));
    }

    #[test]
    fn test_next_open_today_before_opening() {
        let hours = weekday_schedule();
        let next = next_open_time_at(&hours, REGION, eastern(2025, 1, 13, 9, 0));
        assert_eq!(next.as_deref(), Some("Today at 11:00 AM"));
    }

    #[test]
    fn test_next_open_after_closing_rolls_to_tomorrow() {
        let hours = weekday_schedule();
        let next = next_open_time_at(&hours, REGION, eastern(2025, 1, 13, 18, 0));
        assert_eq!(next.as_deref(), Some("Tuesday at 11:00 AM"));
    }

    #[test]
    fn test_next_open_skips_closed_saturday() {
        let hours = weekday_schedule();
        let next = next_open_time_at(&hours, REGION, eastern(2025, 1, 18, 18, 0));
        assert_eq!(next.as_deref(), Some("Sunday at 10:00 AM"));
    }

    #[test]
    fn test_next_open_all_closed_is_none() {
        let hours: Vec<WeeklyHourEntry> = (1..=7).map(WeeklyHourEntry::closed).collect();
        assert_eq!(next_open_time_at(&hours, REGION, eastern(2025, 1, 18, 18, 0)), None);
        assert_eq!(next_open_time_at(&[], REGION, eastern(2025, 1, 18, 18, 0)), None);
    }

    #[test]
    fn test_next_open_never_today_once_past_close() {
        // Every day open; Monday 6 PM must report Tuesday, echoing the
        // stored "09:00 AM" string verbatim.
        let hours: Vec<WeeklyHourEntry> = (1..=7)
            .map(|d| WeeklyHourEntry::open(d, "09:00 AM", "5:00 PM"))
            .collect();
        let next = next_open_time_at(&hours, REGION, eastern(2025, 1, 13, 18, 0));
        assert_eq!(next.as_deref(), Some("Tuesday at 09:00 AM"));
    }

    #[test]
    fn test_next_open_only_day_is_next_week() {
        // Only Monday has hours; past close on Monday wraps a full week.
        let hours = vec![WeeklyHourEntry::open(1, "11:00 AM", "5:00 PM")];
        let next = next_open_time_at(&hours, REGION, eastern(2025, 1, 13, 18, 0));
        assert_eq!(next.as_deref(), Some("Monday at 11:00 AM"));
    }

    #[test]
    fn test_serde_wire_shape() {
        let json = r#"{"dayOfWeek":3,"openTime":"1:11 PM","closeTime":"3:00 AM","isClosed":false}"#;
        let entry: WeeklyHourEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.day_of_week, 3);
        assert_eq!(entry.open_time, "1:11 PM");
        assert!(!entry.is_closed);

        // Missing time fields default for closed rows
        let closed: WeeklyHourEntry =
            serde_json::from_str(r#"{"dayOfWeek":6,"isClosed":true}"#).unwrap();
        assert!(closed.is_closed);
        assert!(closed.open_time.is_empty());
    }
}
