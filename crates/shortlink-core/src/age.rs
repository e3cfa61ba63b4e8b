use jiff::Timestamp;

const MILLIS_PER_MINUTE: i64 = 60 * 1_000;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Formats the time elapsed from `timestamp` to `now` as a coarse label.
///
/// The largest non-zero unit among days, hours and minutes wins, so 25 hours
/// renders as `"1 day ago"`. Zero or negative elapsed time is
/// `"0 minutes ago"`.
pub fn format_age(timestamp: Timestamp, now: Timestamp) -> String {
    format_elapsed(
        now.as_millisecond()
            .saturating_sub(timestamp.as_millisecond()),
    )
}

pub(crate) fn format_elapsed(elapsed_millis: i64) -> String {
    let elapsed = elapsed_millis.max(0);

    let days = elapsed / MILLIS_PER_DAY;
    if days > 0 {
        return label(days, "day");
    }

    let hours = elapsed / MILLIS_PER_HOUR;
    if hours > 0 {
        return label(hours, "hour");
    }

    label(elapsed / MILLIS_PER_MINUTE, "minute")
}

fn label(count: i64, unit: &str) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    fn t() -> Timestamp {
        Timestamp::from_second(1_700_000_000).unwrap()
    }

    fn before(secs: i64) -> Timestamp {
        t() - SignedDuration::from_secs(secs)
    }

    #[test]
    fn same_instant_is_zero_minutes() {
        assert_eq!(format_age(t(), t()), "0 minutes ago");
    }

    #[test]
    fn future_timestamp_is_zero_minutes() {
        let future = t() + SignedDuration::from_hours(3);
        assert_eq!(format_age(future, t()), "0 minutes ago");
    }

    #[test]
    fn under_a_minute_is_zero_minutes() {
        assert_eq!(format_age(before(59), t()), "0 minutes ago");
    }

    #[test]
    fn minute_boundaries() {
        assert_eq!(format_age(before(90), t()), "1 minute ago");
        assert_eq!(format_age(before(120), t()), "2 minutes ago");
        assert_eq!(format_age(before(59 * 60 + 59), t()), "59 minutes ago");
    }

    #[test]
    fn hour_boundaries() {
        assert_eq!(format_age(before(3600), t()), "1 hour ago");
        assert_eq!(format_age(before(3700), t()), "1 hour ago");
        assert_eq!(format_age(before(23 * 3600 + 3599), t()), "23 hours ago");
    }

    #[test]
    fn day_boundaries() {
        assert_eq!(format_age(before(86_400), t()), "1 day ago");
        assert_eq!(format_age(before(90_000), t()), "1 day ago");
        assert_eq!(format_age(before(6 * 86_400), t()), "6 days ago");
    }
}
