//! The seven cleaning stages.
//!
//! Every stage mutates the record set in place and returns a
//! [`StageReport`](edq_model::StageReport) with its counts. Stages never fail on
//! row data; malformed values are dropped or imputed.

pub mod age;
pub mod backfill;
pub mod boarding;
pub mod dedupe;
pub mod gender;
pub mod lwbs;
pub mod timestamps;

pub use age::filter_age_range;
pub use backfill::backfill_defaults;
pub use boarding::cap_boarding_time;
pub use dedupe::remove_duplicates;
pub use gender::standardize_genders;
pub use lwbs::derive_lwbs_flag;
pub use timestamps::normalize_timestamps;
