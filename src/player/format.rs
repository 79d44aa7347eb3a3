/// Formats seconds as `M:SS`, or `H:MM:SS` once an hour is reached.
/// Zero, negative and non-finite values render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Parses a catalog duration string ("98:43", "1:02:03", "45") into seconds.
/// Values too large to represent yield `None`.
pub fn parse_clock(text: &str) -> Option<f64> {
    let mut total = 0u64;
    let mut parts = 0;
    for part in text.trim().split(':') {
        let value: u64 = part.trim().parse().ok()?;
        total = total.checked_mul(60)?.checked_add(value)?;
        parts += 1;
    }
    if parts == 0 || parts > 3 {
        return None;
    }
    Some(total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.9), "0:05");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(599.0), "9:59");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_time(3600.0), "1:00:00");
        assert_eq!(format_time(5923.0), "1:38:43");
    }

    #[test]
    fn test_format_invalid_values() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("98:43"), Some(5923.0));
        assert_eq!(parse_clock("1:02:03"), Some(3723.0));
        assert_eq!(parse_clock("45"), Some(45.0));
        assert_eq!(parse_clock("abc"), None);
        assert_eq!(parse_clock("1:2:3:4"), None);
    }

    #[test]
    fn test_parse_clock_overflow() {
        assert_eq!(parse_clock("9999999999999999999:00"), None);
        assert_eq!(parse_clock("1:9999999999999999999:00"), None);
        assert_eq!(parse_clock("18446744073709551615"), Some(u64::MAX as f64));
    }
}
