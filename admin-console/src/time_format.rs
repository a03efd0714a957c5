use chrono::{DateTime, Local, Utc};

/// Human-friendly age of `ts` as seen at `now`.
///
/// Future timestamps (clock skew) read as "Just now". Anything 30 days or
/// older is shown as an absolute local date.
pub fn relative_time(now: DateTime<Utc>, ts: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(ts);
    let seconds = elapsed.num_seconds();

    if seconds < 60 {
        return "Just now".to_string();
    }
    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return ago(minutes, "minute");
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return ago(hours, "hour");
    }
    let days = elapsed.num_days();
    if days < 30 {
        return ago(days, "day");
    }
    absolute_date(ts)
}

pub fn absolute_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%b %-d, %Y").to_string()
}

fn ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}
