//! Table shell: the table engine together with its filter bar and bulk-edit bar.

use crate::bulk::{self, BulkAction, BulkCommand, RowAction, RowActionEvent};
use crate::csv::{self, CsvExport};
use crate::error::{ExportError, TableResult};
use crate::filter_bar::FilterBar;
use crate::pagination::PageNav;
use crate::selection::SelectionPhase;
use crate::table::DataTable;
use crate::value::{Row, RowId};
use chrono::NaiveDate;
use std::time::Instant;

#[derive(Debug)]
pub struct TableShell<R> {
    table: DataTable<R>,
    filter_bar: FilterBar,
}

impl<R: Row> TableShell<R> {
    pub fn new(table: DataTable<R>) -> Self {
        let filter_bar = FilterBar::new(&table);
        Self { table, filter_bar }
    }

    pub fn table(&self) -> &DataTable<R> {
        &self.table
    }

    pub fn filter_bar(&self) -> &FilterBar {
        &self.filter_bar
    }

    /// Both halves at once, for filter bar edits that write to the table.
    pub fn parts_mut(&mut self) -> (&mut DataTable<R>, &mut FilterBar) {
        (&mut self.table, &mut self.filter_bar)
    }

    /// Table state changes that do not touch filters.
    pub fn table_mut(&mut self) -> &mut DataTable<R> {
        &mut self.table
    }

    pub fn phase(&self) -> SelectionPhase {
        self.table.selection().phase()
    }

    /// Row body click.
    pub fn click_row(&mut self, row: RowId) -> bool {
        self.table.toggle_row(row)
    }

    pub fn navigate(&mut self, nav: PageNav) -> bool {
        self.table.navigate(nav)
    }

    /// Release debounced text filters.
    pub fn tick(&mut self, now: Instant) -> TableResult<usize> {
        self.filter_bar.tick(&mut self.table, now)
    }

    pub fn apply_filter(&mut self, column_id: &str) -> TableResult<()> {
        self.filter_bar.apply(&mut self.table, column_id)
    }

    pub fn reset_filter(&mut self, column_id: &str) -> TableResult<()> {
        self.filter_bar.reset(&mut self.table, column_id)
    }

    pub fn dismiss_filter(&mut self, column_id: &str) -> TableResult<()> {
        self.filter_bar.dismiss(&self.table, column_id)
    }

    pub fn clear_filters(&mut self) {
        self.filter_bar.clear_filters(&mut self.table);
    }

    pub fn is_filtered(&self) -> bool {
        self.filter_bar.is_filtered(&self.table)
    }

    pub fn bulk_command(&mut self, action: BulkAction) -> Option<BulkCommand> {
        bulk::execute(&mut self.table, action)
    }

    pub fn row_action(&self, row: RowId, action: RowAction) -> TableResult<RowActionEvent> {
        bulk::row_action(&self.table, row, action)
    }

    /// CSV of the filtered, visible data.
    pub fn export(&self, base_name: &str, date: NaiveDate) -> Result<CsvExport, ExportError> {
        csv::export(&self.table, base_name, date)
    }
}
