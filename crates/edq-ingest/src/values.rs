//! Cell-level value handling for loaded CSV text.

/// Markers read as missing, matching what spreadsheet and dataframe exports emit.
pub const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns `None` when the cell is empty or a null token, otherwise the text.
///
/// Matching is exact; padded tokens such as `" NA"` stay as text.
pub fn non_null(value: &str) -> Option<&str> {
    if NULL_TOKENS.contains(&value) {
        None
    } else {
        Some(value)
    }
}

/// Parses a string as f64, returning None for invalid, empty or NaN values.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parses an integer column, accepting float notation (`3.0`) and truncating
/// toward zero. Values outside the `i64` range are absent.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }
    let float = parse_f64(trimmed)?.trunc();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if !(i64::MIN as f64..i64::MAX as f64).contains(&float) {
        return None;
    }
    Some(float as i64)
}
