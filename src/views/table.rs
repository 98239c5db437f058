use serde::Serialize;

use crate::data::filter::FilterState;
use crate::data::model::{Cell, Dataset, COLUMNS};

/// Declared column of the details table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableColumn {
    pub id: &'static str,
    pub name: &'static str,
}

/// Every filtered row, in dataset order, over the six declared columns.
/// Paging is left to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of pages needed at `page_size` rows per page (at least one).
    pub fn page_count(&self, page_size: usize) -> usize {
        self.rows.len().div_ceil(page_size.max(1)).max(1)
    }

    /// Rows of page `page` (zero based); empty past the end.
    pub fn page(&self, page: usize, page_size: usize) -> &[Vec<Cell>] {
        let size = page_size.max(1);
        let start = page.saturating_mul(size).min(self.rows.len());
        let end = start.saturating_add(size).min(self.rows.len());
        &self.rows[start..end]
    }
}

pub fn table(dataset: &Dataset, filters: &FilterState) -> TableView {
    TableView {
        columns: COLUMNS
            .iter()
            .map(|c| TableColumn {
                id: c.key,
                name: c.header,
            })
            .collect(),
        rows: filters
            .apply(dataset)
            .into_iter()
            .map(|r| COLUMNS.iter().map(|c| (c.get)(r)).collect())
            .collect(),
    }
}
