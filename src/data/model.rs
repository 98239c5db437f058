use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ---------------------------------------------------------------------------
// PassStatus – outcome column
// ---------------------------------------------------------------------------

/// Whether a student passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PassStatus {
    Passed,
    #[serde(rename = "Not Passed")]
    NotPassed,
}

impl PassStatus {
    /// Label used in selectors, legends and table cells.
    pub fn label(self) -> &'static str {
        match self {
            PassStatus::Passed => "Passed",
            PassStatus::NotPassed => "Not Passed",
        }
    }
}

impl fmt::Display for PassStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the dashboard labels as well as the yes/no and boolean spellings
/// found in exported datasets.
impl FromStr for PassStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passed" | "yes" | "true" | "1" => Ok(PassStatus::Passed),
            "not passed" | "notpassed" | "no" | "false" | "0" => Ok(PassStatus::NotPassed),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single student record after imputation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub study_hours_per_week: f64,
    pub attendance_rate: f64,
    pub previous_grades: f64,
    pub extracurricular: String,
    pub parent_education_level: String,
    pub passed: PassStatus,
}

/// A row as read from the source file: every imputable cell may be missing.
/// `passed` is never imputed, so the loader rejects rows without it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub study_hours_per_week: Option<f64>,
    pub attendance_rate: Option<f64>,
    pub previous_grades: Option<f64>,
    pub extracurricular: Option<String>,
    pub parent_education_level: Option<String>,
    pub passed: Option<PassStatus>,
}

impl From<&Record> for RawRecord {
    fn from(r: &Record) -> Self {
        RawRecord {
            study_hours_per_week: Some(r.study_hours_per_week),
            attendance_rate: Some(r.attendance_rate),
            previous_grades: Some(r.previous_grades),
            extracurricular: Some(r.extracurricular.clone()),
            parent_education_level: Some(r.parent_education_level.clone()),
            passed: Some(r.passed),
        }
    }
}

// ---------------------------------------------------------------------------
// Column schema
// ---------------------------------------------------------------------------

/// A typed cell value, used wherever columns are iterated generically.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Descriptor of one declared column: identifier, display header and accessor.
#[derive(Clone, Copy)]
pub struct Column {
    /// Stable identifier (snake_case).
    pub key: &'static str,
    /// Header as it appears in the source data.
    pub header: &'static str,
    pub get: fn(&Record) -> Cell,
}

impl Column {
    /// Whether a source header names this column (display header or key).
    pub fn matches_header(&self, header: &str) -> bool {
        let header = header.trim();
        header.eq_ignore_ascii_case(self.header) || header.eq_ignore_ascii_case(self.key)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .finish()
    }
}

pub const STUDY_HOURS: Column = Column {
    key: "study_hours_per_week",
    header: "Study Hours per Week",
    get: |r| Cell::Number(r.study_hours_per_week),
};
pub const ATTENDANCE_RATE: Column = Column {
    key: "attendance_rate",
    header: "Attendance Rate",
    get: |r| Cell::Number(r.attendance_rate),
};
pub const PREVIOUS_GRADES: Column = Column {
    key: "previous_grades",
    header: "Previous Grades",
    get: |r| Cell::Number(r.previous_grades),
};
pub const EXTRACURRICULAR: Column = Column {
    key: "extracurricular",
    header: "Participation in Extracurricular Activities",
    get: |r| Cell::Text(r.extracurricular.clone()),
};
pub const PARENT_EDUCATION: Column = Column {
    key: "parent_education_level",
    header: "Parent Education Level",
    get: |r| Cell::Text(r.parent_education_level.clone()),
};
pub const PASSED: Column = Column {
    key: "passed",
    header: "Passed",
    get: |r| Cell::Text(r.passed.label().to_string()),
};

/// The six required columns, in declaration order.
pub const COLUMNS: [Column; 6] = [
    STUDY_HOURS,
    ATTENDANCE_RATE,
    PREVIOUS_GRADES,
    EXTRACURRICULAR,
    PARENT_EDUCATION,
    PASSED,
];

// ---------------------------------------------------------------------------
// Dataset – the complete imputed dataset
// ---------------------------------------------------------------------------

/// The loaded, imputed records plus the parent-education domain observed at
/// load time.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    /// Distinct `parent_education_level` values in first-occurrence order.
    education_levels: Vec<String>,
}

impl Dataset {
    /// Build the dataset and its education-level domain.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut education_levels: Vec<String> = Vec::new();
        for r in &records {
            if !education_levels.contains(&r.parent_education_level) {
                education_levels.push(r.parent_education_level.clone());
            }
        }
        Dataset {
            records,
            education_levels,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn education_levels(&self) -> &[String] {
        &self.education_levels
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hours: f64, edu: &str, passed: PassStatus) -> Record {
        Record {
            study_hours_per_week: hours,
            attendance_rate: 80.0,
            previous_grades: 70.0,
            extracurricular: "Yes".to_string(),
            parent_education_level: edu.to_string(),
            passed,
        }
    }

    #[test]
    fn pass_status_parses_known_spellings() {
        assert_eq!("Passed".parse(), Ok(PassStatus::Passed));
        assert_eq!(" yes ".parse(), Ok(PassStatus::Passed));
        assert_eq!("Not Passed".parse(), Ok(PassStatus::NotPassed));
        assert_eq!("NO".parse(), Ok(PassStatus::NotPassed));
        assert_eq!("maybe".parse::<PassStatus>(), Err(()));
    }

    #[test]
    fn education_domain_keeps_first_occurrence_order() {
        let ds = Dataset::from_records(vec![
            record(1.0, "Master", PassStatus::Passed),
            record(2.0, "Bachelor", PassStatus::NotPassed),
            record(3.0, "Master", PassStatus::Passed),
        ]);
        assert_eq!(ds.education_levels(), ["Master", "Bachelor"]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn columns_match_display_header_and_key() {
        assert!(STUDY_HOURS.matches_header("Study Hours per Week"));
        assert!(STUDY_HOURS.matches_header("study_hours_per_week"));
        assert!(!STUDY_HOURS.matches_header("Attendance Rate"));
        let keys: Vec<_> = COLUMNS.iter().map(|c| c.key).collect();
        assert_eq!(keys.len(), 6);
        assert_eq!(keys[5], "passed");
    }

    #[test]
    fn column_accessors_project_typed_cells() {
        let r = record(12.5, "PhD", PassStatus::NotPassed);
        assert_eq!((STUDY_HOURS.get)(&r), Cell::Number(12.5));
        assert_eq!((PASSED.get)(&r), Cell::Text("Not Passed".to_string()));
    }
}
