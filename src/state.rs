use std::sync::Arc;

use crate::color::SeriesColors;
use crate::data::error::InvalidFilterError;
use crate::dispatch::{Dispatcher, FilterChange};
use crate::views::ViewBatch;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Filter state, dataset handle and last published views.
    pub dispatcher: Dispatcher,

    /// Batch the panels draw from; replaced only when a batch is published.
    pub views: Arc<ViewBatch>,

    /// Series colours shared by every chart.
    pub colors: SeriesColors,

    /// Zero-based page of the details table.
    pub table_page: usize,

    /// Rows per table page.
    pub page_size: usize,

    /// Last rejected filter change, shown in the top bar.
    pub status_message: Option<String>,

    /// Whether the diagnostics window is shown.
    pub show_diagnostics: bool,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, page_size: usize, debug: bool) -> Self {
        let views = dispatcher.current();
        AppState {
            dispatcher,
            views,
            colors: SeriesColors::default(),
            table_page: 0,
            page_size: page_size.max(1),
            status_message: None,
            show_diagnostics: debug,
        }
    }

    /// Forward a selector change to the dispatcher.
    ///
    /// An accepted change swaps in the new batch and rewinds the table; a
    /// rejected one leaves the views alone and surfaces the error.
    pub fn change_filter(&mut self, change: FilterChange) -> Result<(), InvalidFilterError> {
        match self.dispatcher.on_filter_change(change) {
            Ok(batch) => {
                self.views = batch;
                self.table_page = 0;
                self.status_message = None;
                Ok(())
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    pub fn table_page_count(&self) -> usize {
        self.views.table.page_count(self.page_size)
    }

    pub fn next_page(&mut self) {
        if self.table_page + 1 < self.table_page_count() {
            self.table_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.table_page = self.table_page.saturating_sub(1);
    }
}
