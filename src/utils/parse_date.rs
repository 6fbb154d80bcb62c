use chrono::NaiveDate;

/// Accepted date layouts, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a calendar date in any of the accepted layouts.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let t = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(t, fmt).ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDate;

/// Empty input is `Ok(None)`; anything else must parse.
pub fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, InvalidDate> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_date(value).map(Some).ok_or(InvalidDate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(parse_date("2024-03-07"), Some(expected));
        assert_eq!(parse_date("2024/03/07"), Some(expected));
        assert_eq!(parse_date("03/07/2024"), Some(expected));
        assert_eq!(parse_date(" 2024-03-07 "), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn optional_date_allows_blank() {
        assert_eq!(parse_optional_date("  "), Ok(None));
        assert!(parse_optional_date("nope").is_err());
    }
}
