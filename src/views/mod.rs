//! View derivations: pure functions from `(Dataset, FilterState)` to
//! renderer-agnostic view data.
//!
//! Each derivation filters the dataset itself, so the four views of a
//! [`ViewBatch`] always describe the same subset of rows.

pub mod boxplot;
pub mod histogram;
pub mod line;
pub mod table;

use serde::Serialize;

use crate::data::filter::FilterState;
use crate::data::model::Dataset;

pub use boxplot::{boxplot, BoxPlotView};
pub use histogram::{histogram, HistogramView};
pub use line::{line, LineView};
pub use table::{table, TableView};

/// All four views computed from one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewBatch {
    pub histogram: HistogramView,
    pub boxplot: BoxPlotView,
    pub line: LineView,
    pub table: TableView,
}

impl ViewBatch {
    pub fn derive(dataset: &Dataset, filters: &FilterState) -> Self {
        ViewBatch {
            histogram: histogram(dataset, filters),
            boxplot: boxplot(dataset, filters),
            line: line(dataset, filters),
            table: table(dataset, filters),
        }
    }

    /// Filtered row count; every view accounts for the same rows.
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PassStatus::{NotPassed, Passed};
    use crate::data::test_support::{dataset, row};

    fn sample() -> Dataset {
        dataset(vec![
            row(5.0, 80.0, 70.0, "Yes", "Master", Passed),
            row(3.0, 60.0, 55.0, "No", "High School", NotPassed),
            row(8.0, 80.0, 90.0, "Yes", "Master", NotPassed),
            row(6.0, 75.0, 65.0, "No", "Bachelor", Passed),
            row(2.0, 40.0, 35.0, "No", "High School", NotPassed),
        ])
    }

    #[test]
    fn every_view_accounts_for_the_filtered_rows() {
        let ds = sample();
        let mut filters = FilterState::new(&ds);
        let passed: Vec<&str> = filters.passed_options();
        let levels: Vec<String> = filters
            .parent_education_options()
            .into_iter()
            .map(str::to_string)
            .collect();

        for p in &passed {
            for level in &levels {
                filters.set_passed_filter(p).unwrap();
                filters.set_parent_education_filter(level).unwrap();
                let expected = filters.apply(&ds).len();
                let batch = ViewBatch::derive(&ds, &filters);

                assert_eq!(batch.histogram.row_count(), expected, "{filters}");
                assert_eq!(batch.boxplot.row_count(), expected, "{filters}");
                assert_eq!(batch.line.row_count(), expected, "{filters}");
                assert_eq!(batch.table.row_count(), expected, "{filters}");
            }
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let ds = sample();
        let mut filters = FilterState::new(&ds);
        filters.set_parent_education_filter("Master").unwrap();
        assert_eq!(
            ViewBatch::derive(&ds, &filters),
            ViewBatch::derive(&ds, &filters)
        );
    }

    #[test]
    fn no_passing_rows_gives_four_empty_views() {
        let ds = dataset(vec![
            row(3.0, 60.0, 55.0, "No", "High School", NotPassed),
            row(2.0, 40.0, 35.0, "Yes", "Master", NotPassed),
        ]);
        let mut filters = FilterState::new(&ds);
        filters.set_passed_filter("Passed").unwrap();

        let batch = ViewBatch::derive(&ds, &filters);
        assert!(batch.histogram.is_empty());
        assert!(batch.boxplot.is_empty());
        assert!(batch.line.is_empty());
        assert!(batch.table.is_empty());
        assert_eq!(batch.table.columns.len(), 6);
    }

    #[test]
    fn serializes_with_four_named_outputs() {
        let ds = sample();
        let batch = ViewBatch::derive(&ds, &FilterState::new(&ds));
        let json = serde_json::to_value(&batch).unwrap();
        let obj = json.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["boxplot", "histogram", "line", "table"]);
        assert_eq!(json["table"]["rows"][0][5], "Passed");
    }
}
