use crate::api::Time;

// Thresholds under which the next larger unit is not used yet
const SECONDS_FEW: i64 = 44;
const SECONDS: i64 = 45;
const MINUTES: i64 = 45;
const HOURS: i64 = 22;
const DAYS: i64 = 26;
const MONTHS: i64 = 11;

// Average month length, in days
const DAYS_PER_MONTH: f64 = 146097.0 / 4800.0;

/// Render how long ago `created` was, relative to `now`
///
/// Each unit is rounded independently, then the first threshold that matches
/// wins, so that 89 seconds reads "a minute ago" and 90 seconds "2 minutes
/// ago".
pub fn humanize_since(created: Time, now: Time) -> String {
    let ms = (now - created).num_milliseconds();
    let future = ms < 0;
    let secs_f = ms.unsigned_abs() as f64 / 1000.0;

    let seconds = secs_f.round() as i64;
    let minutes = (secs_f / 60.0).round() as i64;
    let hours = (secs_f / 3600.0).round() as i64;
    let days_f = secs_f / 86400.0;
    let days = days_f.round() as i64;
    let months = (days_f / DAYS_PER_MONTH).round() as i64;
    let years = (days_f / DAYS_PER_MONTH / 12.0).round() as i64;

    let amount = if seconds <= SECONDS_FEW {
        String::from("a few seconds")
    } else if seconds < SECONDS {
        format!("{seconds} seconds")
    } else if minutes <= 1 {
        String::from("a minute")
    } else if minutes < MINUTES {
        format!("{minutes} minutes")
    } else if hours <= 1 {
        String::from("an hour")
    } else if hours < HOURS {
        format!("{hours} hours")
    } else if days <= 1 {
        String::from("a day")
    } else if days < DAYS {
        format!("{days} days")
    } else if months <= 1 {
        String::from("a month")
    } else if months < MONTHS {
        format!("{months} months")
    } else if years <= 1 {
        String::from("a year")
    } else {
        format!("{years} years")
    };

    match future {
        true => format!("in {amount}"),
        false => format!("{amount} ago"),
    }
}
