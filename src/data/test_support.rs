//! Record builders shared by unit tests.

use super::model::{Dataset, PassStatus, Record};

pub fn row(
    study_hours: f64,
    attendance: f64,
    grades: f64,
    extracurricular: &str,
    education: &str,
    passed: PassStatus,
) -> Record {
    Record {
        study_hours_per_week: study_hours,
        attendance_rate: attendance,
        previous_grades: grades,
        extracurricular: extracurricular.to_string(),
        parent_education_level: education.to_string(),
        passed,
    }
}

pub fn dataset(records: Vec<Record>) -> Dataset {
    Dataset::from_records(records)
}
