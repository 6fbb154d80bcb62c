/// Parse a finite floating point number.
pub fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers() {
        assert_eq!(parse_float("12.5"), Some(12.5));
        assert_eq!(parse_float(" 80 "), Some(80.0));
        assert_eq!(parse_float("-3e2"), Some(-300.0));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("high"), None);
        assert_eq!(parse_float("NaN"), None);
        assert_eq!(parse_float("inf"), None);
    }
}
