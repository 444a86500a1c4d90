//! Date parsing and token based formatting.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Date-only layouts tried in order.
const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%a %b %d %Y",
];

/// Date-time layouts tried in order; the time part is discarded.
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a date written in one of the common layouts.
///
/// Accepts ISO 8601 dates and date-times (with or without offset),
/// US-style `M/D/YYYY`, month-name forms and RFC 2822.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(trimmed, layout).ok())
        .or_else(|| {
            DATETIME_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
                .map(|datetime| datetime.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .or_else(|_| DateTime::parse_from_rfc2822(trimmed))
                .ok()
                .map(|datetime| datetime.date_naive())
        })
}

/// Render `date` using a token layout.
///
/// Tokens: `YYYY` (four-digit year), `YY` (two-digit year), `MM`/`M`
/// (month with/without padding), `DD`/`D` (day with/without padding).
/// Everything else is copied literally.
pub fn format_date(date: NaiveDate, layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() + 4);
    let mut rest = layout;
    while let Some(c) = rest.chars().next() {
        let token = ["YYYY", "YY", "MM", "DD", "M", "D"]
            .into_iter()
            .find(|token| rest.starts_with(token));
        match token {
            Some(token) => {
                let rendered = match token {
                    "YYYY" => format!("{:04}", date.year()),
                    "YY" => format!("{:02}", date.year().rem_euclid(100)),
                    "MM" => format!("{:02}", date.month()),
                    "M" => date.month().to_string(),
                    "DD" => format!("{:02}", date.day()),
                    _ => date.day().to_string(),
                };
                out.push_str(&rendered);
                rest = &rest[token.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_layouts() {
        assert_eq!(parse_date("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("1/15/2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("01/15/2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("January 15, 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("15 Jan 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T10:30:00"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T10:30:00Z"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date(" 2024/01/15 "), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("soon"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn test_format_tokens() {
        let date = ymd(2024, 3, 7);
        assert_eq!(format_date(date, "M/D/YYYY"), "3/7/2024");
        assert_eq!(format_date(date, "MM/DD/YYYY"), "03/07/2024");
        assert_eq!(format_date(date, "YYYY-MM-DD"), "2024-03-07");
        assert_eq!(format_date(date, "DD.MM.YY"), "07.03.24");
    }
}
