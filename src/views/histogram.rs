use serde::Serialize;

use crate::data::filter::FilterState;
use crate::data::model::{Dataset, PassStatus};

/// Grouped bar chart: one bar per (extracurricular, passed) group.
///
/// `categories` is the x-axis; each series holds one count per category,
/// aligned by index. Both axes list values in the order they first occur in
/// the filtered rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistogramView {
    pub categories: Vec<String>,
    pub series: Vec<HistogramSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSeries {
    pub passed: PassStatus,
    pub counts: Vec<usize>,
}

impl HistogramView {
    /// Number of rows represented by all bars.
    pub fn row_count(&self) -> usize {
        self.series.iter().flat_map(|s| &s.counts).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

pub fn histogram(dataset: &Dataset, filters: &FilterState) -> HistogramView {
    let mut view = HistogramView::default();

    for r in filters.apply(dataset) {
        let ci = match view.categories.iter().position(|c| *c == r.extracurricular) {
            Some(i) => i,
            None => {
                view.categories.push(r.extracurricular.clone());
                for s in &mut view.series {
                    s.counts.push(0);
                }
                view.categories.len() - 1
            }
        };
        let si = match view.series.iter().position(|s| s.passed == r.passed) {
            Some(i) => i,
            None => {
                view.series.push(HistogramSeries {
                    passed: r.passed,
                    counts: vec![0; view.categories.len()],
                });
                view.series.len() - 1
            }
        };
        view.series[si].counts[ci] += 1;
    }

    view
}
