//! Gender category standardization.

use edq_model::Gender;

/// Map free-form gender text to a standard category.
///
/// Matching ignores case and surrounding whitespace. Only `m`, `male`, `f`
/// and `female` map; everything else (unknown, other, numeric codes) returns
/// `None` and the row is excluded by the caller.
pub fn standardize_gender(value: &str) -> Option<Gender> {
    match value.trim().to_lowercase().as_str() {
        "m" | "male" => Some(Gender::Male),
        "f" | "female" => Some(Gender::Female),
        _ => None,
    }
}
