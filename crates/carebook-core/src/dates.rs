//! Best-effort natural-date detection for scheduling messages.
//!
//! Detection is a hint for the interpreter, never a hard requirement: any
//! text it cannot read yields `None` and the turn proceeds without a date.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})-(\d{2})-(\d{2})(?:[T ](\d{2}):(\d{2}))?").expect("iso date pattern")
});

static MERIDIEM_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b").expect("meridiem pattern")
});

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").expect("clock pattern"));

/// Whether the message mentions any of the scheduling keywords.
pub fn mentions_scheduling(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw.as_str()))
}

/// Try to read a concrete datetime out of free text.
///
/// Understands ISO dates (`2026-09-14`, optionally with a time), the
/// relative words `tomorrow` and `today`, and clock times (`10:30`, `3pm`).
/// Relative dates keep the current time of day when no time is given.
pub fn detect_date(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let lower = text.to_lowercase();

    if let Some(caps) = ISO_DATE.captures(&lower) {
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )?;
        let time = match (caps.get(4), caps.get(5)) {
            (Some(h), Some(m)) => {
                NaiveTime::from_hms_opt(h.as_str().parse().ok()?, m.as_str().parse().ok()?, 0)?
            }
            _ => detect_time(&lower).unwrap_or(NaiveTime::MIN),
        };
        return Some(date.and_time(time));
    }

    let date = if lower.contains("tomorrow") {
        now.date().checked_add_days(Days::new(1))?
    } else if lower.contains("today") {
        now.date()
    } else {
        return None;
    };
    Some(date.and_time(detect_time(&lower).unwrap_or_else(|| now.time())))
}

fn detect_time(lower: &str) -> Option<NaiveTime> {
    if let Some(caps) = MERIDIEM_TIME.captures(lower) {
        let mut hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps
            .get(2)
            .map(|m| m.as_str().parse())
            .transpose()
            .ok()?
            .unwrap_or(0);
        match &caps[3].to_lowercase()[..] {
            "pm" if hour != 12 => hour += 12,
            "am" if hour == 12 => hour = 0,
            _ => {}
        }
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }
    let caps = CLOCK_TIME.captures(lower)?;
    NaiveTime::from_hms_opt(caps[1].parse().ok()?, caps[2].parse().ok()?, 0)
}
