use std::sync::Arc;

use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

/// Paginated details table over the current batch.
pub fn details_table(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Details");

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("◀").clicked() {
            state.prev_page();
        }
        ui.label(format!(
            "Page {} of {}",
            state.table_page + 1,
            state.table_page_count()
        ));
        if ui.button("▶").clicked() {
            state.next_page();
        }
    });

    let views = Arc::clone(&state.views);
    let table = &views.table;
    let rows = table.page(state.table_page, state.page_size);

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .columns(Column::auto().at_least(90.0), table.columns.len())
        .header(22.0, |mut header| {
            for col in &table.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(col.name);
                });
            }
        })
        .body(|mut body| {
            for cells in rows {
                body.row(20.0, |mut row| {
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            }
        });
}
