use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;

fn empty_hint(ui: &mut Ui, empty: bool) {
    if empty {
        ui.weak("No students match the current filters.");
    }
}

/// Label integer x positions with category names; blank elsewhere.
fn category_label(categories: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    categories.get(i as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Grouped bar chart
// ---------------------------------------------------------------------------

pub fn histogram_chart(ui: &mut Ui, state: &AppState) {
    let view = &state.views.histogram;
    ui.strong("Participation in Extracurricular Activities by Passing Status");
    empty_hint(ui, view.is_empty());

    // Bars of one category sit side by side within [x - 0.4, x + 0.4].
    let width = 0.8 / view.series.len().max(1) as f64;
    let charts: Vec<BarChart> = view
        .series
        .iter()
        .enumerate()
        .map(|(si, s)| {
            let bars = s
                .counts
                .iter()
                .enumerate()
                .map(|(ci, &count)| {
                    let x = ci as f64 - 0.4 + width * (si as f64 + 0.5);
                    Bar::new(x, count as f64)
                        .width(width * 0.95)
                        .name(format!("{} / {}", view.categories[ci], s.passed))
                })
                .collect();
            BarChart::new(bars)
                .name(s.passed.label())
                .color(state.colors.color_for(s.passed))
        })
        .collect();

    let categories = view.categories.clone();
    Plot::new("histogram_chart")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Participation in Extracurricular Activities")
        .y_axis_label("count")
        .x_axis_formatter(move |mark, _range| category_label(&categories, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

pub fn box_chart(ui: &mut Ui, state: &AppState) {
    let view = &state.views.boxplot;
    ui.strong("Study Hours per Week vs Passed");
    empty_hint(ui, view.is_empty());

    let labels: Vec<String> = view.groups.iter().map(|g| g.passed.to_string()).collect();
    Plot::new("box_chart")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Passed")
        .y_axis_label("Study Hours per Week")
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, g) in view.groups.iter().enumerate() {
                let color = state.colors.color_for(g.passed);
                let s = &g.summary;
                let spread = BoxSpread::new(g.whisker_low, s.q1, s.median, s.q3, g.whisker_high);
                let elem = BoxElem::new(i as f64, spread)
                    .box_width(0.5)
                    .whisker_width(0.3)
                    .name(g.passed.label());
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(g.passed.label()).color(color));

                if !g.outliers.is_empty() {
                    let pts: Vec<[f64; 2]> = g.outliers.iter().map(|&v| [i as f64, v]).collect();
                    plot_ui.points(
                        Points::new(pts)
                            .radius(3.0)
                            .color(color)
                            .name(g.passed.label()),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Trend line
// ---------------------------------------------------------------------------

pub fn line_chart(ui: &mut Ui, state: &AppState) {
    let view = &state.views.line;
    ui.strong("Attendance Rate vs Previous Grades");
    empty_hint(ui, view.is_empty());

    Plot::new("line_chart")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label("Attendance Rate")
        .y_axis_label("Previous Grades")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for series in &view.series {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|p| [p.attendance_rate, p.previous_grades])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(series.passed.label())
                        .color(state.colors.color_for(series.passed))
                        .width(1.5),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_ticks() {
        let cats = vec!["Yes".to_string(), "No".to_string()];
        assert_eq!(category_label(&cats, 0.0), "Yes");
        assert_eq!(category_label(&cats, 1.0), "No");
        assert_eq!(category_label(&cats, 0.5), "");
        assert_eq!(category_label(&cats, 2.0), "");
        assert_eq!(category_label(&cats, -1.0), "");
    }
}
