use std::path::Path;
use std::sync::Arc;

use super::error::{ImputationError, LoadError};
use super::impute::impute;
use super::loader::load_file;
use super::model::{Dataset, RawRecord};

/// Failure while building the dataset at startup.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Imputation(#[from] ImputationError),
}

/// Owns the immutable, imputed dataset for the lifetime of the process.
///
/// Built once in `main` and handed out as an `Arc<Dataset>`; nothing mutates
/// the records after construction.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    dataset: Arc<Dataset>,
}

impl DatasetStore {
    /// Read `path` and impute missing cells.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let raw = load_file(path)?;
        log::info!("Read {} rows from {}", raw.len(), path.display());
        Ok(Self::from_raw(&raw)?)
    }

    /// Impute already parsed rows.
    pub fn from_raw(raw: &[RawRecord]) -> Result<Self, ImputationError> {
        let dataset = Dataset::from_records(impute(raw)?);
        log::info!(
            "Dataset ready: {} records, parent education levels {:?}",
            dataset.len(),
            dataset.education_levels()
        );
        Ok(DatasetStore {
            dataset: Arc::new(dataset),
        })
    }

    /// Shared read-only handle.
    pub fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PassStatus;
    use std::io::Write;

    #[test]
    fn load_imputes_and_builds_domain() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "Study Hours per Week,Attendance Rate,Previous Grades,\
             Participation in Extracurricular Activities,Parent Education Level,Passed\n\
             5,80,70,Yes,Master,Yes\n\
             15,90,,No,,No\n\
             ,85,60,Yes,Bachelor,Yes\n"
        )
        .unwrap();

        let store = DatasetStore::load(file.path()).unwrap();
        let ds = store.dataset();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records()[2].study_hours_per_week, 10.0);
        assert_eq!(ds.records()[1].previous_grades, 65.0);
        // Master and Bachelor tie; Master occurs first.
        assert_eq!(ds.records()[1].parent_education_level, "Master");
        assert_eq!(ds.records()[1].passed, PassStatus::NotPassed);
        assert_eq!(ds.education_levels(), ["Master", "Bachelor"]);
    }

    #[test]
    fn empty_column_aborts_with_imputation_error() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "Study Hours per Week,Attendance Rate,Previous Grades,\
             Participation in Extracurricular Activities,Parent Education Level,Passed\n\
             5,,70,Yes,Master,Yes\n"
        )
        .unwrap();

        match DatasetStore::load(file.path()) {
            Err(StoreError::Imputation(e)) => assert_eq!(e.column, "attendance_rate"),
            other => panic!("expected imputation error, got {other:?}"),
        }
    }

    #[test]
    fn handles_share_one_dataset() {
        let raw = vec![RawRecord {
            study_hours_per_week: Some(1.0),
            attendance_rate: Some(2.0),
            previous_grades: Some(3.0),
            extracurricular: Some("No".to_string()),
            parent_education_level: Some("PhD".to_string()),
            passed: Some(PassStatus::Passed),
        }];
        let store = DatasetStore::from_raw(&raw).unwrap();
        assert!(Arc::ptr_eq(&store.dataset(), &store.dataset()));
    }
}
