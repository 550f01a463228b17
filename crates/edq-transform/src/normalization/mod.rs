//! Value normalization used by the cleaning stages.
//!
//! - **datetime**: timestamp parsing across common export formats
//! - **gender**: two-category gender standardization

pub mod datetime;
pub mod gender;

pub use datetime::parse_timestamp;
pub use gender::standardize_gender;
