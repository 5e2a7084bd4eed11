// ABOUTME: Small formatting helpers used by the picker adapters
// ABOUTME: Date display strings and file names derived from URIs

use chrono::NaiveDate;

use crate::constants::DATE_DISPLAY_FORMAT;

/// Format a picked date the way it is stored in the record
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

/// Parse a date previously produced by [`format_date`]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_DISPLAY_FORMAT).ok()
}

/// Last non-empty path segment of a URI or path
pub fn display_name_from_uri(uri: &str) -> Option<String> {
    uri.trim_end_matches('/')
        .rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2001, 1, 2).unwrap();
        assert_eq!(format_date(date), "Tue Jan 02 2001");
    }

    #[test]
    fn test_parse_date_roundtrip() {
        let date = NaiveDate::from_ymd_opt(1990, 12, 31).unwrap();
        assert_eq!(parse_date(&format_date(date)), Some(date));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_display_name_from_uri() {
        assert_eq!(
            display_name_from_uri("file:///tmp/docs/resume.pdf").as_deref(),
            Some("resume.pdf")
        );
        assert_eq!(display_name_from_uri("photo.png").as_deref(), Some("photo.png"));
        assert_eq!(display_name_from_uri(""), None);
    }
}
