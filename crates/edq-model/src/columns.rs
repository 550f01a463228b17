//! Fixed column schema of the ED visit extract.

use std::fmt;

/// Name of the derived column appended to every output.
pub const LWBS_FLAG_COLUMN: &str = "LWBS_Flag";

/// A required input column with pipeline semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    TimeArrival,
    TimeTriage,
    TimeDocSeen,
    Gender,
    Age,
    Acuity,
    PatientKey,
    BoardingMinutes,
}

impl Column {
    /// All required columns, in canonical order.
    pub const ALL: [Column; 8] = [
        Column::TimeArrival,
        Column::TimeTriage,
        Column::TimeDocSeen,
        Column::Gender,
        Column::Age,
        Column::Acuity,
        Column::PatientKey,
        Column::BoardingMinutes,
    ];

    /// Header text as it appears in the source extract.
    pub fn header(self) -> &'static str {
        match self {
            Column::TimeArrival => "Time_Arrival",
            Column::TimeTriage => "Time_Triage",
            Column::TimeDocSeen => "Time_Doc_Seen",
            Column::Gender => "Gender",
            Column::Age => "Age",
            Column::Acuity => "ESI_Acuity",
            Column::PatientKey => "FK_Patient_ID",
            Column::BoardingMinutes => "Boarding_Time_min",
        }
    }

    /// Resolve a header to a required column. Matching is exact after trimming.
    pub fn from_header(header: &str) -> Option<Self> {
        let trimmed = header.trim();
        Self::ALL
            .into_iter()
            .find(|column| column.header() == trimmed)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.header()), Some(column));
        }
    }

    #[test]
    fn from_header_trims_but_is_case_sensitive() {
        assert_eq!(Column::from_header("  Age "), Some(Column::Age));
        assert_eq!(Column::from_header("age"), None);
        assert_eq!(Column::from_header(LWBS_FLAG_COLUMN), None);
    }
}
