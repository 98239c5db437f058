use std::cmp::Ordering;

use serde::Serialize;

use crate::data::filter::FilterState;
use crate::data::model::{Dataset, PassStatus};

/// Previous grades against attendance rate, one series per pass status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineView {
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub passed: PassStatus,
    /// Ascending by attendance rate; equal rates keep dataset order.
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePoint {
    pub attendance_rate: f64,
    pub previous_grades: f64,
    /// Hover detail.
    pub study_hours_per_week: f64,
}

impl LineView {
    pub fn row_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Series appear in the order their status first occurs in the filtered rows.
pub fn line(dataset: &Dataset, filters: &FilterState) -> LineView {
    let mut rows = filters.apply(dataset);

    let mut view = LineView::default();
    for r in &rows {
        if !view.series.iter().any(|s| s.passed == r.passed) {
            view.series.push(LineSeries {
                passed: r.passed,
                points: Vec::new(),
            });
        }
    }

    // `sort_by` is stable, so ties (including 0.0 and -0.0) keep dataset
    // order. Imputed records never hold NaN.
    rows.sort_by(|a, b| {
        a.attendance_rate
            .partial_cmp(&b.attendance_rate)
            .unwrap_or(Ordering::Equal)
    });

    for r in rows {
        if let Some(series) = view.series.iter_mut().find(|s| s.passed == r.passed) {
            series.points.push(LinePoint {
                attendance_rate: r.attendance_rate,
                previous_grades: r.previous_grades,
                study_hours_per_week: r.study_hours_per_week,
            });
        }
    }

    view
}
