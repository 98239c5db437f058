use eframe::egui::{self, Color32, RichText, Ui};

use crate::dispatch::FilterChange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter selectors
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let filters = state.dispatcher.filters();
    let passed_current = filters.passed().label();
    let passed_options = filters.passed_options();
    let education_current = filters.parent_education().label().to_string();
    let education_options: Vec<String> = filters
        .parent_education_options()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut change: Option<FilterChange> = None;

    ui.strong("Passed status");
    egui::ComboBox::from_id_salt("passed_filter")
        .selected_text(passed_current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &passed_options {
                if ui
                    .selectable_label(*option == passed_current, *option)
                    .clicked()
                {
                    change = Some(FilterChange::Passed(option.to_string()));
                }
            }
        });
    ui.add_space(8.0);

    ui.strong("Parent education level");
    egui::ComboBox::from_id_salt("parent_education_filter")
        .selected_text(education_current.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &education_options {
                if ui
                    .selectable_label(*option == education_current, option.as_str())
                    .clicked()
                {
                    change = Some(FilterChange::ParentEducation(option.clone()));
                }
            }
        });

    if let Some(change) = change {
        // A rejection is reported through `status_message`.
        let _ = state.change_filter(change);
    }

    ui.separator();
    ui.strong("Legend");
    for (label, color) in state.colors.legend_entries() {
        ui.label(RichText::new(format!("■ {label}")).color(color));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("Student Performance Dashboard").strong());
        ui.separator();

        ui.label(format!(
            "{} students loaded, {} visible",
            state.dispatcher.dataset().len(),
            state.views.row_count()
        ));

        ui.separator();

        if ui
            .selectable_label(state.show_diagnostics, "Diagnostics")
            .clicked()
        {
            state.show_diagnostics = !state.show_diagnostics;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Diagnostics window
// ---------------------------------------------------------------------------

pub fn diagnostics(ui: &mut Ui, state: &AppState) {
    let d = &state.dispatcher;
    let views = &state.views;

    egui::Grid::new("diagnostics_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Phase");
            ui.label(format!("{:?}", d.phase()));
            ui.end_row();

            ui.label("Batches published");
            ui.label(d.generation().to_string());
            ui.end_row();

            ui.label("Filters");
            ui.label(d.filters().to_string());
            ui.end_row();

            ui.label("Dataset rows");
            ui.label(d.dataset().len().to_string());
            ui.end_row();

            for (name, rows) in [
                ("histogram rows", views.histogram.row_count()),
                ("boxplot rows", views.boxplot.row_count()),
                ("line rows", views.line.row_count()),
                ("table rows", views.table.row_count()),
            ] {
                ui.label(name);
                ui.label(rows.to_string());
                ui.end_row();
            }

            ui.label("Last rejection");
            ui.label(state.status_message.as_deref().unwrap_or("–"));
            ui.end_row();
        });
}
