use super::error::ImputationError;
use super::model::{
    RawRecord, Record, ATTENDANCE_RATE, EXTRACURRICULAR, PARENT_EDUCATION, PASSED, PREVIOUS_GRADES,
    STUDY_HOURS,
};
use super::stats;

// ---------------------------------------------------------------------------
// Missing-value imputation
// ---------------------------------------------------------------------------

/// Fill values computed per column from the non-missing cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FillValues {
    pub study_hours_per_week: f64,
    pub attendance_rate: f64,
    pub previous_grades: f64,
    pub extracurricular: String,
    pub parent_education_level: String,
}

impl FillValues {
    /// Medians for the numeric columns, modes for the categorical ones.
    /// Columns are processed in declaration order, so the first empty column
    /// is the one reported.
    pub fn compute(rows: &[RawRecord]) -> Result<Self, ImputationError> {
        Ok(FillValues {
            study_hours_per_week: numeric_median(rows, STUDY_HOURS.key, |r| {
                r.study_hours_per_week
            })?,
            attendance_rate: numeric_median(rows, ATTENDANCE_RATE.key, |r| r.attendance_rate)?,
            previous_grades: numeric_median(rows, PREVIOUS_GRADES.key, |r| r.previous_grades)?,
            extracurricular: categorical_mode(rows, EXTRACURRICULAR.key, |r| {
                r.extracurricular.as_deref()
            })?,
            parent_education_level: categorical_mode(rows, PARENT_EDUCATION.key, |r| {
                r.parent_education_level.as_deref()
            })?,
        })
    }
}

fn numeric_median(
    rows: &[RawRecord],
    column: &'static str,
    get: impl Fn(&RawRecord) -> Option<f64>,
) -> Result<f64, ImputationError> {
    let present: Vec<f64> = rows.iter().filter_map(get).collect();
    stats::median(column, &present).ok_or(ImputationError { column })
}

fn categorical_mode(
    rows: &[RawRecord],
    column: &'static str,
    get: impl Fn(&RawRecord) -> Option<&str>,
) -> Result<String, ImputationError> {
    stats::mode(rows.iter().filter_map(get))
        .map(str::to_string)
        .ok_or(ImputationError { column })
}

/// Replace every missing cell with its column's fill value, returning new
/// records. The input is left untouched; imputing already complete rows
/// returns them unchanged.
pub fn impute(rows: &[RawRecord]) -> Result<Vec<Record>, ImputationError> {
    let fill = FillValues::compute(rows)?;

    let mut filled = [0usize; 5];
    let records = rows
        .iter()
        .map(|r| {
            let missing = [
                r.study_hours_per_week.is_none(),
                r.attendance_rate.is_none(),
                r.previous_grades.is_none(),
                r.extracurricular.is_none(),
                r.parent_education_level.is_none(),
            ];
            for (count, gap) in filled.iter_mut().zip(missing) {
                *count += usize::from(gap);
            }

            let passed = r.passed.ok_or(ImputationError { column: PASSED.key })?;
            Ok(Record {
                study_hours_per_week: r.study_hours_per_week.unwrap_or(fill.study_hours_per_week),
                attendance_rate: r.attendance_rate.unwrap_or(fill.attendance_rate),
                previous_grades: r.previous_grades.unwrap_or(fill.previous_grades),
                extracurricular: r
                    .extracurricular
                    .clone()
                    .unwrap_or_else(|| fill.extracurricular.clone()),
                parent_education_level: r
                    .parent_education_level
                    .clone()
                    .unwrap_or_else(|| fill.parent_education_level.clone()),
                passed,
            })
        })
        .collect::<Result<Vec<_>, ImputationError>>()?;

    for (column, count) in [
        STUDY_HOURS.key,
        ATTENDANCE_RATE.key,
        PREVIOUS_GRADES.key,
        EXTRACURRICULAR.key,
        PARENT_EDUCATION.key,
    ]
    .iter()
    .zip(filled)
    {
        if count > 0 {
            log::info!("Imputed {count} missing value(s) in '{column}'");
        }
    }
    log::debug!("Fill values: {fill:?}");

    Ok(records)
}
