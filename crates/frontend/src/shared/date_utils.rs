//! Date formatting helpers for pt-BR display.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats a backend timestamp (`RFC 3339` or `YYYY-MM-DD[ HH:MM:SS]`) as
/// `dd/mm/aaaa`. Unparseable input is shown as-is rather than hidden.
pub fn format_date_br(value: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_rfc3339() {
        assert_eq!(format_date_br("2025-03-09T14:30:00-03:00"), "09/03/2025");
        assert_eq!(format_date_br("2025-03-09T14:30:00Z"), "09/03/2025");
    }

    #[test]
    fn test_formats_plain_dates() {
        assert_eq!(format_date_br("2025-12-01 08:00:00"), "01/12/2025");
        assert_eq!(format_date_br("2025-12-01"), "01/12/2025");
    }

    #[test]
    fn test_passes_through_unparseable_input() {
        assert_eq!(format_date_br("ontem"), "ontem");
        assert_eq!(format_date_br(""), "");
    }
}
