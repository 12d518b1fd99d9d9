//! Display labels for machine timestamps.

use chrono::{DateTime, Utc};

/// Short relative label such as "Just now", "45m ago", "2h ago" or "3d ago".
///
/// Timestamps in the future read as "Just now".
pub fn relative_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);

    if elapsed.num_minutes() < 1 {
        "Just now".to_string()
    } else if elapsed.num_hours() < 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed.num_days() < 1 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_labels() {
        let now = now();
        assert_eq!(relative_label(now, now), "Just now");
        assert_eq!(relative_label(now - Duration::seconds(59), now), "Just now");
        assert_eq!(relative_label(now - Duration::minutes(45), now), "45m ago");
        assert_eq!(relative_label(now - Duration::hours(2), now), "2h ago");
        assert_eq!(relative_label(now - Duration::hours(30), now), "1d ago");
        assert_eq!(relative_label(now - Duration::days(3), now), "3d ago");
    }

    #[test]
    fn test_future_is_just_now() {
        let now = now();
        assert_eq!(relative_label(now + Duration::hours(1), now), "Just now");
    }
}
