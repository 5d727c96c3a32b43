//! Human-relative durations
//!
//! Buckets: minutes below an hour, hours below a day, days below a week,
//! weeks below four weeks, then 30-day months (at least one). Negative
//! durations clamp to zero.

use chrono::{DateTime, Duration, Utc};

enum Bucket {
    Minutes(i64),
    Hours(i64),
    Days(i64),
    Weeks(i64),
    Months(i64),
}

impl Bucket {
    fn of(duration: Duration) -> Self {
        let d = duration.max(Duration::zero());
        if d < Duration::hours(1) {
            Bucket::Minutes(d.num_minutes())
        } else if d < Duration::hours(24) {
            Bucket::Hours(d.num_hours())
        } else if d < Duration::days(7) {
            Bucket::Days(d.num_days())
        } else if d < Duration::weeks(4) {
            Bucket::Weeks(d.num_weeks())
        } else {
            Bucket::Months((d.num_days() / 30).max(1))
        }
    }

    fn compact(&self) -> String {
        match self {
            Bucket::Minutes(n) => format!("{}m", n),
            Bucket::Hours(n) => format!("{}h", n),
            Bucket::Days(n) => format!("{}d", n),
            Bucket::Weeks(n) => format!("{}w", n),
            Bucket::Months(n) => format!("{}mo", n),
        }
    }
}

/// Format the time elapsed since `then` as e.g. `3h ago`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!("{} ago", Bucket::of(now - then).compact())
}

/// Format an average interval as an approximate magnitude, e.g. `~3d`.
pub fn approx_interval(interval: Duration) -> String {
    format!("~{}", Bucket::of(interval).compact())
}
