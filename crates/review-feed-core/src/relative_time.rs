use chrono::{DateTime, Utc};

/// Human-readable age of a review ("Today", "5 days ago", "2 months ago").
///
/// Buckets are calendar approximations: hours within the first day, then
/// days, 7-day weeks, 30-day months, 365-day years. Timestamps that cannot
/// be interpreted resolve to "Recently".
pub fn format_relative_time(timestamp: i64, now: DateTime<Utc>) -> String {
    let Some(review_time) = DateTime::<Utc>::from_timestamp(timestamp, 0) else {
        return "Recently".to_string();
    };

    let diff = now.signed_duration_since(review_time);
    let days = diff.num_days();
    let hours = diff.num_hours() - days * 24;

    if days <= 0 {
        if days < 0 || hours <= 0 {
            "Today".to_string()
        } else if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if days == 1 {
        "1 day ago".to_string()
    } else if days < 7 {
        format!("{} days ago", days)
    } else if days < 30 {
        let weeks = days / 7;
        format!("{} week{} ago", weeks, if weeks > 1 { "s" } else { "" })
    } else if days < 365 {
        let months = days / 30;
        format!("{} month{} ago", months, if months > 1 { "s" } else { "" })
    } else {
        let years = days / 365;
        format!("{} year{} ago", years, if years > 1 { "s" } else { "" })
    }
}
