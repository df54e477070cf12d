/// Playtime in hours, rounded to one decimal place.
pub fn minutes_to_hours(minutes: u64) -> f64 {
    (minutes as f64 / 6.0).round() / 10.0
}

/// Format playtime for display (e.g., "0.5 h", "12.3 h").
pub fn format_hours(minutes: u64) -> String {
    format!("{:.1} h", minutes_to_hours(minutes))
}

/// Describe a playtime increase, e.g. "+1.5 h (2.0 h total)".
pub fn describe_playtime_delta(previous: u64, current: u64) -> String {
    let delta = current.saturating_sub(previous);
    format!("+{} ({} total)", format_hours(delta), format_hours(current))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_to_hours() {
        assert_eq!(minutes_to_hours(0), 0.0);
        assert_eq!(minutes_to_hours(30), 0.5);
        assert_eq!(minutes_to_hours(45), 0.8);
        assert_eq!(minutes_to_hours(60), 1.0);
        assert_eq!(minutes_to_hours(739), 12.3);
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(90), "1.5 h");
        assert_eq!(format_hours(5), "0.1 h");
    }

    #[test]
    fn test_describe_playtime_delta() {
        assert_eq!(describe_playtime_delta(10, 45), "+0.6 h (0.8 h total)");
        assert_eq!(describe_playtime_delta(50, 10), "+0.0 h (0.2 h total)");
    }
}
