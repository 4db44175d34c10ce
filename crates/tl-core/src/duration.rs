//! Duration formatting.

use chrono::TimeDelta;

/// Formats a duration as `H:MM:SS`.
///
/// Hours are unbounded; sub-second precision is truncated. Negative
/// durations (from an out-of-order log) get a leading `-`.
pub fn format_hms(duration: TimeDelta) -> String {
    let seconds = duration.num_seconds();
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.unsigned_abs();
    format!(
        "{sign}{}:{:02}:{:02}",
        seconds / 3600,
        seconds / 60 % 60,
        seconds % 60
    )
}

/// Whole hours in `duration`, truncated toward zero.
pub fn whole_hours(duration: TimeDelta) -> i64 {
    duration.num_hours()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms_pads_minutes_and_seconds() {
        assert_eq!(format_hms(TimeDelta::minutes(450)), "7:30:00");
        assert_eq!(format_hms(TimeDelta::seconds(65)), "0:01:05");
        assert_eq!(format_hms(TimeDelta::zero()), "0:00:00");
    }

    #[test]
    fn test_format_hms_hours_are_unbounded() {
        assert_eq!(format_hms(TimeDelta::hours(130)), "130:00:00");
    }

    #[test]
    fn test_format_hms_truncates_subseconds() {
        assert_eq!(format_hms(TimeDelta::milliseconds(59_999)), "0:00:59");
    }

    #[test]
    fn test_format_hms_negative() {
        assert_eq!(format_hms(TimeDelta::minutes(-90)), "-1:30:00");
    }

    #[test]
    fn test_whole_hours_truncates() {
        assert_eq!(whole_hours(TimeDelta::minutes(179)), 2);
        assert_eq!(whole_hours(TimeDelta::minutes(-90)), -1);
    }
}
