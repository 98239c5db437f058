use polars::prelude::ChunkAgg;
use serde::Serialize;

use crate::data::filter::FilterState;
use crate::data::model::{Dataset, PassStatus};
use crate::data::stats::{column, quantile};

/// Multiplier applied to the interquartile range to place the outlier fences.
pub const WHISKER_IQR: f64 = 1.5;

/// Study hours per week, summarised per pass status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoxPlotView {
    pub groups: Vec<BoxGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Summary of a non-empty sample; `None` when `values` is empty.
    pub fn of(values: &[f64]) -> Option<Self> {
        let ca = column("study_hours_per_week", values);
        Some(FiveNumberSummary {
            min: ca.min()?,
            q1: quantile(&ca, 0.25)?,
            median: quantile(&ca, 0.5)?,
            q3: quantile(&ca, 0.75)?,
            max: ca.max()?,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGroup {
    pub passed: PassStatus,
    pub count: usize,
    pub summary: FiveNumberSummary,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Most extreme values still inside the fences.
    pub whisker_low: f64,
    pub whisker_high: f64,
    /// Values outside the fences, in row order.
    pub outliers: Vec<f64>,
}

impl BoxGroup {
    fn from_values(passed: PassStatus, values: &[f64]) -> Option<Self> {
        let summary = FiveNumberSummary::of(values)?;
        let reach = WHISKER_IQR * summary.iqr();
        let lower_fence = summary.q1 - reach;
        let upper_fence = summary.q3 + reach;

        let inside: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| (lower_fence..=upper_fence).contains(v))
            .collect();
        Some(BoxGroup {
            passed,
            count: values.len(),
            summary,
            lower_fence,
            upper_fence,
            whisker_low: inside.iter().copied().reduce(f64::min).unwrap_or(summary.q1),
            whisker_high: inside.iter().copied().reduce(f64::max).unwrap_or(summary.q3),
            outliers: values
                .iter()
                .copied()
                .filter(|v| *v < lower_fence || *v > upper_fence)
                .collect(),
        })
    }
}

impl BoxPlotView {
    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group filtered rows by pass status (first-occurrence order) and summarise
/// their study hours.
pub fn boxplot(dataset: &Dataset, filters: &FilterState) -> BoxPlotView {
    let mut buckets: Vec<(PassStatus, Vec<f64>)> = Vec::new();
    for r in filters.apply(dataset) {
        match buckets.iter_mut().find(|(p, _)| *p == r.passed) {
            Some((_, values)) => values.push(r.study_hours_per_week),
            None => buckets.push((r.passed, vec![r.study_hours_per_week])),
        }
    }

    BoxPlotView {
        groups: buckets
            .iter()
            .filter_map(|(passed, values)| BoxGroup::from_values(*passed, values))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::PassStatus::{NotPassed, Passed};
    use crate::data::test_support::{dataset, row};

    #[test]
    fn five_number_summary_uses_linear_quantiles() {
        let s = FiveNumberSummary::of(&[30.0, 10.0, 50.0, 20.0, 40.0]).unwrap();
        assert_eq!(s.min, 10.0);
        assert_eq!(s.q1, 20.0);
        assert_eq!(s.median, 30.0);
        assert_eq!(s.q3, 40.0);
        assert_eq!(s.max, 50.0);
        assert_eq!(s.iqr(), 20.0);
        assert!(FiveNumberSummary::of(&[]).is_none());
    }

    #[test]
    fn points_beyond_fences_are_outliers() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0, 40.0];
        let ds = dataset(
            values
                .iter()
                .map(|h| row(*h, 70.0, 60.0, "No", "Bachelor", Passed))
                .collect(),
        );
        let view = boxplot(&ds, &FilterState::new(&ds));

        assert_eq!(view.groups.len(), 1);
        let g = &view.groups[0];
        // q1 = 11.25, q3 = 13.75, iqr = 2.5
        assert_eq!(g.summary.q1, 11.25);
        assert_eq!(g.summary.q3, 13.75);
        assert_eq!(g.upper_fence, 17.5);
        assert_eq!(g.outliers, vec![40.0]);
        assert_eq!(g.whisker_high, 14.0);
        assert_eq!(g.whisker_low, 10.0);
        assert_eq!(g.summary.max, 40.0);
    }

    #[test]
    fn groups_follow_first_occurrence_of_status() {
        let ds = dataset(vec![
            row(4.0, 70.0, 60.0, "No", "Bachelor", NotPassed),
            row(9.0, 70.0, 60.0, "No", "Bachelor", Passed),
            row(6.0, 70.0, 60.0, "No", "Bachelor", NotPassed),
        ]);
        let view = boxplot(&ds, &FilterState::new(&ds));
        let order: Vec<PassStatus> = view.groups.iter().map(|g| g.passed).collect();
        assert_eq!(order, vec![NotPassed, Passed]);
        assert_eq!(view.groups[0].summary.median, 5.0);
        assert_eq!(view.row_count(), 3);
    }

    #[test]
    fn empty_subset_is_an_empty_group_list() {
        let ds = dataset(vec![row(4.0, 70.0, 60.0, "No", "Bachelor", NotPassed)]);
        let mut filters = FilterState::new(&ds);
        filters.set_passed_filter("Passed").unwrap();
        assert!(boxplot(&ds, &filters).is_empty());
    }
}
