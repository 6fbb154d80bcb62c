use urlencoding::encode;

/// Build a query string from key-value pairs
pub fn build_query_string(pairs: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (k, v) in pairs {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(&encode(k));
        out.push('=');
        out.push_str(&encode(v));
    }
    out
}

/// `path` with `?q=...` appended when the search term is non-blank.
pub fn with_search_query(path: &str, query: &str) -> String {
    let q = query.trim();
    if q.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, build_query_string(&[("q", q)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_pairs() {
        assert_eq!(build_query_string(&[("q", "valve leak"), ("x", "a&b")]), "q=valve%20leak&x=a%26b");
    }

    #[test]
    fn search_query_is_omitted_when_blank() {
        assert_eq!(with_search_query("/download_csv/", "  "), "/download_csv/");
        assert_eq!(with_search_query("/download_csv/", "High"), "/download_csv/?q=High");
    }
}
