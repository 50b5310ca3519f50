/// Format remaining seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_timer(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::format_timer;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_timer(0), "00:00");
        assert_eq!(format_timer(59), "00:59");
        assert_eq!(format_timer(60), "01:00");
        assert_eq!(format_timer(300), "05:00");
        assert_eq!(format_timer(3661), "61:01");
    }
}
