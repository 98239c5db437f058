use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StudyPandaApp {
    pub state: AppState,
}

impl StudyPandaApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for StudyPandaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title, counts, status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the four linked views ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    plot::histogram_chart(ui, &self.state);
                    ui.separator();
                    plot::box_chart(ui, &self.state);
                    ui.separator();
                    plot::line_chart(ui, &self.state);
                    ui.separator();
                    table::details_table(ui, &mut self.state);
                });
        });

        // ---- Diagnostics ----
        let mut open = self.state.show_diagnostics;
        egui::Window::new("Diagnostics")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                panels::diagnostics(ui, &self.state);
            });
        self.state.show_diagnostics = open;
    }
}
