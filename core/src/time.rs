use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Ceiling of the day-level difference between `deadline` and `now`.
///
/// A deadline 9 full days away yields 9; one second past a day boundary
/// rounds up. Zero or negative means the deadline has arrived or passed.
pub fn remaining_days(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = deadline.signed_duration_since(now).num_seconds();
    if secs > 0 {
        (secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY
    } else {
        // Truncation toward zero is already the ceiling for negatives.
        secs / SECONDS_PER_DAY
    }
}

/// Difference in whole calendar days (UTC), ignoring time of day.
pub fn calendar_day_diff(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    a.date_naive().signed_duration_since(b.date_naive()).num_days()
}

pub fn same_calendar_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    calendar_day_diff(a, b) == 0
}

/// `now`'s UTC date at `hour`:00:00. Callers pass hours below 24.
pub fn at_hour(now: DateTime<Utc>, hour: u32) -> DateTime<Utc> {
    now.date_naive().and_hms_opt(hour, 0, 0).unwrap().and_utc()
}

/// Parse user-facing date input for the CLI.
///
/// Accepts `today`, `tomorrow`, relative offsets (`+3d`, `+2w`) and the
/// standard `YYYY-MM-DD` / `YYYY-MM-DD HH:MM:SS` forms. Date-only input
/// resolves to end of day so a task is not "past deadline" at breakfast.
pub fn parse_human_date(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    let today = Utc::now().date_naive();

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(end_of_day(today)),
        "tomorrow" | "tom" => return Ok(end_of_day(today + Duration::days(1))),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('+') {
        // Split on chars, not bytes; the unit may be any character.
        let mut chars = rest.chars();
        let Some(unit) = chars.next_back() else {
            return Err(anyhow!("Invalid relative offset: {}", input));
        };
        let count: i64 = chars
            .as_str()
            .parse()
            .map_err(|_| anyhow!("Invalid relative offset: {}", input))?;
        let target = match unit {
            'd' => today + Duration::days(count),
            'w' => today + Duration::weeks(count),
            _ => return Err(anyhow!("Unknown unit in relative offset: {}", unit)),
        };
        return Ok(end_of_day(target));
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(end_of_day(d));
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(23, 59, 59).unwrap().and_utc()
}
