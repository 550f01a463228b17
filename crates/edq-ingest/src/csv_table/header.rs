//! CSV header normalization.

/// Normalizes a header value by trimming whitespace and a leading BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches('\u{feff}').trim().to_string()
}

/// Normalizes every header in a record.
pub fn normalize_headers<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    headers.into_iter().map(normalize_header).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  Age  "), "Age");
        assert_eq!(normalize_header("\u{feff}Time_Arrival"), "Time_Arrival");
        assert_eq!(normalize_header("Gender"), "Gender");
    }

    #[test]
    fn test_normalize_headers_keeps_order() {
        let headers = normalize_headers([" B", "A "]);
        assert_eq!(headers, vec!["B", "A"]);
    }
}
