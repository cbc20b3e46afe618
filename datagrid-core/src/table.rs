//! The table engine.
//!
//! [`DataTable`] owns the rows, the column definitions and every piece of
//! table state (filters, sort, pagination, selection, visibility, column
//! order). Derived row views are recomputed synchronously after each state
//! change: filtered rows (every filter slot AND-ed), then sorted rows, then
//! the current page.

use crate::column_order::{reconcile_order, ColumnOrderStore};
use crate::columns::{build_columns, ColumnDef, DisplayColumn};
use crate::descriptor::ColumnDescriptor;
use crate::error::{ConfigError, TableError, TableResult};
use crate::filter::FilterValue;
use crate::locale::{Language, Locale, MovedColumn};
use crate::pagination::{PageNav, PageWindow, Pagination, DEFAULT_PAGE_SIZE};
use crate::selection::{HeaderCheckState, RowSelection};
use crate::sorting::{self, SortState};
use crate::value::{CellValue, Row, RowId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

// ============================================================================
// OPTIONS
// ============================================================================

/// Table-level switches supplied by the embedder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableOptions {
    pub language: Language,
    pub page_size: usize,
    /// Adds the leading checkbox column and enables row toggling.
    pub enable_row_selection: bool,
    /// Adds the trailing add/edit/delete column.
    pub enable_row_actions: bool,
    /// When disabled, every filtered row is on a single page.
    pub enable_pagination: bool,
    /// Render the pagination footer above the table instead of below.
    pub pagination_display_top: bool,
    pub persist_column_order: bool,
    /// Key under which the column order is persisted.
    pub table_name: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            language: Language::En,
            page_size: DEFAULT_PAGE_SIZE,
            enable_row_selection: true,
            enable_row_actions: false,
            enable_pagination: true,
            pagination_display_top: false,
            persist_column_order: false,
            table_name: None,
        }
    }
}

impl TableOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize {
                page_size: self.page_size,
            });
        }
        if self.persist_column_order && self.persisted_name().is_none() {
            return Err(ConfigError::MissingTableName);
        }
        Ok(())
    }

    /// Table name when column order persistence is on.
    pub fn persisted_name(&self) -> Option<&str> {
        if !self.persist_column_order {
            return None;
        }
        self.table_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

// ============================================================================
// TABLE
// ============================================================================

pub struct DataTable<R> {
    data: Vec<R>,
    /// Accessor columns in descriptor order.
    columns: Vec<ColumnDef>,
    select_column: Option<ColumnDef>,
    actions_column: Option<ColumnDef>,
    /// Current order of the accessor columns, by id.
    order: Vec<String>,
    hidden: HashSet<String>,
    filters: BTreeMap<String, FilterValue>,
    sort: Option<SortState>,
    pagination: Pagination,
    selection: RowSelection,
    options: TableOptions,
    locale: &'static Locale,
    store: Option<Box<dyn ColumnOrderStore + Send>>,
    /// Filtered and sorted row ids.
    rows: Vec<RowId>,
}

impl<R: Row> DataTable<R> {
    /// Build a table without column order persistence.
    pub fn new(
        descriptors: &[ColumnDescriptor],
        data: Vec<R>,
        options: TableOptions,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let columns = build_columns(descriptors)?;
        let order = columns.iter().map(|c| c.id.clone()).collect();

        let select_column = options
            .enable_row_selection
            .then(|| ColumnDef::display(DisplayColumn::Select, DisplayColumn::Select.id()));
        let actions_column = options
            .enable_row_actions
            .then(|| ColumnDef::display(DisplayColumn::Actions, DisplayColumn::Actions.id()));

        let mut table = Self {
            data,
            columns,
            select_column,
            actions_column,
            order,
            hidden: HashSet::new(),
            filters: BTreeMap::new(),
            sort: None,
            pagination: Pagination::new(options.page_size),
            selection: RowSelection::new(),
            locale: options.language.locale(),
            options,
            store: None,
            rows: Vec::new(),
        };
        table.recompute();

        tracing::debug!(
            columns = table.columns.len(),
            rows = table.data.len(),
            language = %table.options.language,
            "Table built"
        );
        Ok(table)
    }

    /// Build a table whose column order is restored from, and saved to,
    /// `store`. A store that fails to load leaves the default order.
    pub fn with_store(
        descriptors: &[ColumnDescriptor],
        data: Vec<R>,
        options: TableOptions,
        store: Box<dyn ColumnOrderStore + Send>,
    ) -> Result<Self, ConfigError> {
        let mut table = Self::new(descriptors, data, options)?;

        if let Some(name) = table.options.persisted_name() {
            match store.load(name) {
                Ok(Some(stored)) => {
                    table.order = reconcile_order(&stored, &table.order);
                    tracing::debug!(table = name, order = ?table.order, "Column order restored");
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(table = name, error = %e, "Failed to load column order");
                }
            }
        }
        table.store = Some(store);
        Ok(table)
    }

    // ------------------------------------------------------------------------
    // Data and columns
    // ------------------------------------------------------------------------

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn locale(&self) -> &'static Locale {
        self.locale
    }

    pub fn data(&self) -> &[R] {
        &self.data
    }

    pub fn row(&self, id: RowId) -> Option<&R> {
        self.data.get(id.0)
    }

    pub fn total_rows(&self) -> usize {
        self.data.len()
    }

    /// Value of one cell; null for unknown rows.
    pub fn cell(&self, id: RowId, column_id: &str) -> CellValue {
        self.row(id)
            .map(|row| row.value(column_id))
            .unwrap_or_default()
    }

    /// Cell text as the column renders it.
    pub fn render_cell(&self, id: RowId, column: &ColumnDef) -> String {
        column.render_cell(&self.cell(id, &column.id))
    }

    /// Accessor column by id.
    pub fn column(&self, column_id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    fn require_column(&self, column_id: &str) -> TableResult<&ColumnDef> {
        self.column(column_id)
            .ok_or_else(|| TableError::UnknownColumn {
                column_id: column_id.to_string(),
            })
    }

    /// Accessor columns in display order, hidden ones included.
    pub fn ordered_columns(&self) -> Vec<&ColumnDef> {
        self.order
            .iter()
            .filter_map(|id| self.column(id))
            .collect()
    }

    /// Visible accessor columns in display order.
    pub fn visible_accessor_columns(&self) -> Vec<&ColumnDef> {
        self.ordered_columns()
            .into_iter()
            .filter(|c| !self.hidden.contains(&c.id))
            .collect()
    }

    /// Every rendered column: the selection column, the visible accessor
    /// columns in order, then the actions column.
    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        let mut columns = Vec::with_capacity(self.columns.len() + 2);
        columns.extend(self.select_column.as_ref());
        columns.extend(self.visible_accessor_columns());
        columns.extend(self.actions_column.as_ref());
        columns
    }

    // ------------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------------

    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }

    pub fn filter_value(&self, column_id: &str) -> Option<&FilterValue> {
        self.filters.get(column_id)
    }

    /// Write a column's filter slot. Empty values clear the slot.
    pub fn set_filter(&mut self, column_id: &str, value: FilterValue) -> TableResult<()> {
        let column = self.require_column(column_id)?;
        let kind = column.filter_kind.ok_or_else(|| TableError::NotFilterable {
            column_id: column_id.to_string(),
        })?;
        if !value.fits(kind) {
            return Err(TableError::FilterKindMismatch {
                column_id: column_id.to_string(),
                expected: kind,
                got: value.nominal_kind(),
            });
        }

        if value.is_empty() {
            self.filters.remove(column_id);
        } else {
            self.filters.insert(column_id.to_string(), value);
        }
        self.pagination.page_index = 0;
        self.recompute();

        tracing::debug!(
            column_id,
            active_filters = self.filters.len(),
            filtered_rows = self.rows.len(),
            "Filter updated"
        );
        Ok(())
    }

    pub fn clear_filter(&mut self, column_id: &str) -> TableResult<()> {
        self.require_column(column_id)?;
        if self.filters.remove(column_id).is_some() {
            self.pagination.page_index = 0;
            self.recompute();
        }
        Ok(())
    }

    /// Empty every filter slot.
    pub fn reset_filters(&mut self) {
        if self.filters.is_empty() {
            return;
        }
        self.filters.clear();
        self.pagination.page_index = 0;
        self.recompute();
        tracing::debug!(filtered_rows = self.rows.len(), "Filters cleared");
    }

    pub fn is_filtered(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Filtered rows in sorted order.
    pub fn filtered_rows(&self) -> &[RowId] {
        &self.rows
    }

    pub fn filtered_len(&self) -> usize {
        self.rows.len()
    }

    // ------------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------------

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Advance the sort cycle of a column; returns the new sort.
    pub fn toggle_sort(&mut self, column_id: &str) -> TableResult<Option<SortState>> {
        let column = self.require_column(column_id)?;
        if !column.enable_sorting {
            return Err(TableError::ColumnNotSortable {
                column_id: column_id.to_string(),
            });
        }
        let next = sorting::toggle_sort(self.sort.as_ref(), column_id, column.column_type);
        self.apply_sort(next.clone());
        Ok(next)
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) -> TableResult<()> {
        if let Some(state) = &sort {
            let column = self.require_column(&state.column_id)?;
            if !column.enable_sorting {
                return Err(TableError::ColumnNotSortable {
                    column_id: state.column_id.clone(),
                });
            }
        }
        self.apply_sort(sort);
        Ok(())
    }

    fn apply_sort(&mut self, sort: Option<SortState>) {
        tracing::debug!(sort = ?sort, "Sort changed");
        self.sort = sort;
        self.pagination.page_index = 0;
        self.recompute();
    }

    // ------------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------------

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Rows of the current page, in sorted order.
    pub fn page_rows(&self) -> &[RowId] {
        if !self.options.enable_pagination {
            return &self.rows;
        }
        &self.rows[self.pagination.range(self.rows.len())]
    }

    pub fn page_count(&self) -> usize {
        if !self.options.enable_pagination {
            return usize::from(!self.rows.is_empty());
        }
        self.pagination.page_count(self.rows.len())
    }

    pub fn can_navigate(&self, nav: PageNav) -> bool {
        self.options.enable_pagination && self.pagination.can_navigate(nav, self.rows.len())
    }

    /// Move to another page. Any move clears the row selection; a disabled
    /// move changes nothing.
    pub fn navigate(&mut self, nav: PageNav) -> bool {
        if !self.options.enable_pagination {
            return false;
        }
        if !self.pagination.navigate(nav, self.rows.len()) {
            return false;
        }
        self.selection.clear();
        tracing::debug!(
            nav = ?nav,
            page_index = self.pagination.page_index,
            "Page changed"
        );
        true
    }

    pub fn set_page_size(&mut self, page_size: usize) -> TableResult<()> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize { page_size }.into());
        }
        self.options.page_size = page_size;
        self.pagination = Pagination::new(page_size);
        Ok(())
    }

    /// "Showing first-last of total" for the footer.
    pub fn page_window(&self) -> PageWindow {
        let total = self.rows.len();
        if !self.options.enable_pagination {
            return PageWindow {
                first: usize::from(total > 0),
                last: total,
                total,
            };
        }
        self.pagination.window(total)
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    pub fn selection(&self) -> &RowSelection {
        &self.selection
    }

    pub fn is_row_selected(&self, id: RowId) -> bool {
        self.selection.is_selected(id)
    }

    /// Flip a row's selection; returns the new state. A no-op returning
    /// false when row selection is disabled or the row does not exist.
    pub fn toggle_row(&mut self, id: RowId) -> bool {
        if !self.options.enable_row_selection || id.0 >= self.data.len() {
            return false;
        }
        self.selection.toggle(id)
    }

    /// Header checkbox click.
    pub fn toggle_page_selection(&mut self) {
        if !self.options.enable_row_selection {
            return;
        }
        let page: Vec<RowId> = self.page_rows().to_vec();
        self.selection.toggle_page(&page);
    }

    pub fn header_check_state(&self) -> HeaderCheckState {
        self.selection.header_state(self.page_rows(), &self.rows)
    }

    pub fn reset_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_row_ids(&self) -> Vec<RowId> {
        self.selection.ids()
    }

    // ------------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------------

    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.column(column_id).is_some() && !self.hidden.contains(column_id)
    }

    pub fn set_column_visibility(&mut self, column_id: &str, visible: bool) -> TableResult<()> {
        let column = self.require_column(column_id)?;
        if !visible && !column.enable_hiding {
            return Err(TableError::ColumnNotHideable {
                column_id: column_id.to_string(),
            });
        }
        if visible {
            self.hidden.remove(column_id);
        } else {
            self.hidden.insert(column_id.to_string());
        }
        Ok(())
    }

    /// Flip a column's visibility; returns whether it is now visible.
    pub fn toggle_column_visibility(&mut self, column_id: &str) -> TableResult<bool> {
        let visible = !self.is_column_visible(column_id);
        self.set_column_visibility(column_id, visible)?;
        Ok(visible)
    }

    // ------------------------------------------------------------------------
    // Column order
    // ------------------------------------------------------------------------

    pub fn column_order(&self) -> &[String] {
        &self.order
    }

    /// Move a column to `to_index` (clamped) and return the announcement
    /// for the move.
    pub fn move_column(&mut self, column_id: &str, to_index: usize) -> TableResult<String> {
        let from = self
            .order
            .iter()
            .position(|id| id == column_id)
            .ok_or_else(|| TableError::UnknownColumn {
                column_id: column_id.to_string(),
            })?;
        let to = to_index.min(self.order.len().saturating_sub(1));

        let id = self.order.remove(from);
        self.order.insert(to, id);
        self.persist_order();

        let label = self.require_column(column_id)?.display_name.as_str();
        Ok(self.locale.moved_column(MovedColumn {
            label,
            previous_index: from,
            current_index: to,
            number_of_items: self.order.len(),
        }))
    }

    /// Restore descriptor order.
    pub fn reset_column_order(&mut self) {
        self.order = self.columns.iter().map(|c| c.id.clone()).collect();
        self.persist_order();
    }

    fn persist_order(&mut self) {
        let Some(name) = self.options.persisted_name() else {
            return;
        };
        let Some(store) = self.store.as_mut() else {
            return;
        };
        match store.save(name, &self.order) {
            Ok(()) => tracing::info!(table = name, order = ?self.order, "Column order saved"),
            Err(e) => tracing::warn!(table = name, error = %e, "Failed to save column order"),
        }
    }

    // ------------------------------------------------------------------------
    // Derived rows
    // ------------------------------------------------------------------------

    fn passes(&self, id: RowId) -> bool {
        let row = &self.data[id.0];
        self.filters.iter().all(|(column_id, value)| {
            match self.column(column_id).and_then(|c| c.filter_fn) {
                Some(filter_fn) => filter_fn.evaluate(&row.value(column_id), value),
                None => true,
            }
        })
    }

    fn recompute(&mut self) {
        let mut rows: Vec<RowId> = (0..self.data.len())
            .map(RowId)
            .filter(|id| self.passes(*id))
            .collect();
        if let Some(sort) = &self.sort {
            sorting::sort_row_ids(&mut rows, &self.data, sort);
        }
        self.rows = rows;
        self.pagination.clamp(self.rows.len());
    }
}

impl<R> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("rows", &self.data.len())
            .field("columns", &self.order)
            .field("filters", &self.filters)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("selected", &self.selection.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_order::MemoryColumnOrderStore;
    use crate::condition::ConditionFilter;
    use crate::descriptor::{FilterConfig, OptionItem};
    use crate::error::StoreError;
    use crate::selection::SelectionPhase;
    use crate::sorting::SortDirection;
    use crate::value::Record;
    use std::sync::{Arc, Mutex};

    fn descriptors() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::text("owner", "Owner")
                .sortable(true)
                .hideable(false)
                .filters(FilterConfig::text()),
            ColumnDescriptor::text("region", "Region")
                .options([
                    OptionItem::new("us-east-2", "US East"),
                    OptionItem::new("eu-west-1", "EU West"),
                ])
                .filters(FilterConfig::checkbox()),
            ColumnDescriptor::number("costs", "Costs")
                .sortable(true)
                .filters(FilterConfig::number()),
        ]
    }

    fn rows(costs: &[f64]) -> Vec<Record> {
        costs
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Record::new()
                    .with("owner", format!("owner-{i}"))
                    .with("region", if i % 2 == 0 { "us-east-2" } else { "eu-west-1" })
                    .with("costs", *c)
            })
            .collect()
    }

    fn table(costs: &[f64], options: TableOptions) -> DataTable<Record> {
        DataTable::new(&descriptors(), rows(costs), options).unwrap()
    }

    fn page_size(n: usize) -> TableOptions {
        TableOptions {
            page_size: n,
            ..TableOptions::default()
        }
    }

    #[test]
    fn test_greater_than_filter_end_to_end() {
        let mut t = table(&[50.0, 150.0, 100.0], TableOptions::default());
        t.set_filter(
            "costs",
            FilterValue::Condition(ConditionFilter::greater_than(100.0)),
        )
        .unwrap();
        assert_eq!(t.filtered_rows(), &[RowId(1)]);
        assert_eq!(t.cell(RowId(1), "costs"), CellValue::Number(150.0));
    }

    #[test]
    fn test_filters_are_anded() {
        let mut t = table(&[10.0, 20.0, 30.0, 40.0], TableOptions::default());
        t.set_filter(
            "region",
            FilterValue::Set(vec!["us-east-2".to_string()]),
        )
        .unwrap();
        t.set_filter(
            "costs",
            FilterValue::Condition(ConditionFilter::greater_than(15.0)),
        )
        .unwrap();
        assert_eq!(t.filtered_rows(), &[RowId(2)]);
    }

    #[test]
    fn test_empty_filter_value_clears_slot() {
        let mut t = table(&[1.0, 2.0], TableOptions::default());
        t.set_filter("owner", FilterValue::Text("owner-1".into()))
            .unwrap();
        assert!(t.is_filtered());
        assert_eq!(t.filtered_len(), 1);
        t.set_filter("owner", FilterValue::Text(String::new()))
            .unwrap();
        assert!(!t.is_filtered());
        assert_eq!(t.filtered_len(), 2);
    }

    #[test]
    fn test_reset_filters_restores_every_row() {
        let mut t = table(&[1.0, 2.0, 3.0], TableOptions::default());
        t.set_filter("owner", FilterValue::Text("nobody".into()))
            .unwrap();
        t.set_filter(
            "costs",
            FilterValue::Condition(ConditionFilter::less_than(2.0)),
        )
        .unwrap();
        assert_eq!(t.filtered_len(), 0);
        t.reset_filters();
        assert!(t.filters().is_empty());
        assert_eq!(t.filtered_len(), t.total_rows());
    }

    #[test]
    fn test_set_filter_rejects_bad_input() {
        let mut t = table(&[1.0], TableOptions::default());
        assert!(matches!(
            t.set_filter("nope", FilterValue::Text("x".into())),
            Err(TableError::UnknownColumn { .. })
        ));
        assert!(matches!(
            t.set_filter("costs", FilterValue::Text("x".into())),
            Err(TableError::FilterKindMismatch { .. })
        ));
    }

    #[test]
    fn test_filter_change_resets_page_index() {
        let mut t = table(&[1.0; 30], page_size(10));
        assert!(t.navigate(PageNav::Last));
        assert_eq!(t.pagination().page_index, 2);
        t.set_filter("owner", FilterValue::Text("owner".into()))
            .unwrap();
        assert_eq!(t.pagination().page_index, 0);
    }

    #[test]
    fn test_sort_cycle_on_number_column() {
        let mut t = table(&[5.0, 9.0, 1.0], TableOptions::default());
        let first = t.toggle_sort("costs").unwrap().unwrap();
        assert_eq!(first.direction, SortDirection::Desc);
        assert_eq!(t.filtered_rows(), &[RowId(1), RowId(0), RowId(2)]);

        t.toggle_sort("costs").unwrap();
        assert_eq!(t.filtered_rows(), &[RowId(2), RowId(0), RowId(1)]);

        assert_eq!(t.toggle_sort("costs").unwrap(), None);
        assert_eq!(t.filtered_rows(), &[RowId(0), RowId(1), RowId(2)]);
    }

    #[test]
    fn test_unsortable_column_rejected() {
        let mut t = table(&[1.0], TableOptions::default());
        assert!(matches!(
            t.toggle_sort("region"),
            Err(TableError::ColumnNotSortable { .. })
        ));
    }

    #[test]
    fn test_navigation_clears_selection() {
        let mut t = table(&[1.0; 25], page_size(10));
        t.toggle_page_selection();
        assert_eq!(t.selection().len(), 10);
        assert_eq!(t.header_check_state(), HeaderCheckState::Checked);

        assert!(t.navigate(PageNav::Next));
        assert!(t.selection().is_empty());
        assert_eq!(t.selection().phase(), SelectionPhase::NoRowsSelected);
    }

    #[test]
    fn test_disabled_navigation_keeps_selection() {
        let mut t = table(&[1.0; 5], page_size(10));
        t.toggle_row(RowId(2));
        assert!(!t.can_navigate(PageNav::Next));
        assert!(!t.navigate(PageNav::Next));
        assert!(t.is_row_selected(RowId(2)));
    }

    #[test]
    fn test_page_window() {
        let mut t = table(&[1.0; 57], TableOptions::default());
        assert_eq!(t.page_count(), 3);
        assert_eq!(t.page_rows().len(), 20);
        t.navigate(PageNav::Last);
        let window = t.page_window();
        assert_eq!((window.first, window.last, window.total), (41, 57, 57));

        t.set_filter("owner", FilterValue::Text("zzz".into()))
            .unwrap();
        let window = t.page_window();
        assert_eq!((window.first, window.last, window.total), (0, 0, 0));
    }

    #[test]
    fn test_pagination_disabled_shows_all_rows() {
        let options = TableOptions {
            enable_pagination: false,
            page_size: 2,
            ..TableOptions::default()
        };
        let mut t = table(&[1.0, 2.0, 3.0, 4.0, 5.0], options);
        assert_eq!(t.page_rows().len(), 5);
        assert_eq!(t.page_count(), 1);
        assert!(!t.navigate(PageNav::Next));
    }

    #[test]
    fn test_row_selection_disabled() {
        let options = TableOptions {
            enable_row_selection: false,
            ..TableOptions::default()
        };
        let mut t = table(&[1.0, 2.0], options);
        assert!(!t.toggle_row(RowId(0)));
        t.toggle_page_selection();
        assert!(t.selection().is_empty());
        assert!(t
            .visible_columns()
            .iter()
            .all(|c| c.id != crate::columns::SELECT_COLUMN_ID));
    }

    #[test]
    fn test_display_columns_wrap_accessors() {
        let options = TableOptions {
            enable_row_actions: true,
            ..TableOptions::default()
        };
        let t = table(&[1.0], options);
        let ids: Vec<&str> = t.visible_columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["select", "owner", "region", "costs", "actions"]);
    }

    #[test]
    fn test_hidden_column_keeps_its_filter() {
        let mut t = table(&[5.0, 50.0], TableOptions::default());
        t.set_filter(
            "costs",
            FilterValue::Condition(ConditionFilter::greater_than(10.0)),
        )
        .unwrap();
        assert!(!t.toggle_column_visibility("costs").unwrap());
        assert!(!t.is_column_visible("costs"));
        assert_eq!(t.filtered_rows(), &[RowId(1)]);
        assert!(matches!(
            t.toggle_column_visibility("owner"),
            Err(TableError::ColumnNotHideable { .. })
        ));
    }

    #[test]
    fn test_move_column_announces_one_based_positions() {
        let mut t = table(&[1.0], TableOptions::default());
        let msg = t.move_column("costs", 0).unwrap();
        assert_eq!(msg, "You've moved Costs from position 3 to position 1 of 3.");
        assert_eq!(t.column_order(), ["costs", "owner", "region"]);
    }

    #[derive(Clone, Default)]
    struct SharedStore(Arc<Mutex<MemoryColumnOrderStore>>);

    impl ColumnOrderStore for SharedStore {
        fn load(&self, table_name: &str) -> Result<Option<Vec<String>>, StoreError> {
            self.0.lock().unwrap().load(table_name)
        }

        fn save(&mut self, table_name: &str, order: &[String]) -> Result<(), StoreError> {
            self.0.lock().unwrap().save(table_name, order)
        }
    }

    #[test]
    fn test_column_order_persists_across_tables() {
        let store = SharedStore::default();
        let options = TableOptions {
            persist_column_order: true,
            table_name: Some("usage".to_string()),
            ..TableOptions::default()
        };

        let mut first =
            DataTable::with_store(&descriptors(), rows(&[1.0]), options.clone(), Box::new(store.clone()))
                .unwrap();
        first.move_column("region", 0).unwrap();

        let second =
            DataTable::with_store(&descriptors(), rows(&[1.0]), options, Box::new(store)).unwrap();
        assert_eq!(second.column_order(), ["region", "owner", "costs"]);
    }

    struct BrokenStore;

    impl ColumnOrderStore for BrokenStore {
        fn load(&self, _table_name: &str) -> Result<Option<Vec<String>>, StoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
        }

        fn save(&mut self, _table_name: &str, _order: &[String]) -> Result<(), StoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
        }
    }

    #[test]
    fn test_failing_store_keeps_table_usable() {
        let options = TableOptions {
            persist_column_order: true,
            table_name: Some("usage".to_string()),
            ..TableOptions::default()
        };
        let mut t =
            DataTable::with_store(&descriptors(), rows(&[1.0]), options, Box::new(BrokenStore))
                .unwrap();
        assert_eq!(t.column_order(), ["owner", "region", "costs"]);

        t.move_column("costs", 0).unwrap();
        assert_eq!(t.column_order(), ["costs", "owner", "region"]);
    }

    #[test]
    fn test_set_sort_validates_column() {
        let mut t = table(&[5.0, 9.0, 1.0], page_size(2));
        t.navigate(PageNav::Next);

        t.set_sort(Some(SortState {
            column_id: "costs".to_string(),
            direction: SortDirection::Asc,
        }))
        .unwrap();
        assert_eq!(t.filtered_rows(), &[RowId(2), RowId(0), RowId(1)]);
        assert_eq!(t.pagination().page_index, 0);

        assert!(matches!(
            t.set_sort(Some(SortState {
                column_id: "region".to_string(),
                direction: SortDirection::Asc,
            })),
            Err(TableError::ColumnNotSortable { .. })
        ));
        assert!(matches!(
            t.set_sort(Some(SortState {
                column_id: "missing".to_string(),
                direction: SortDirection::Asc,
            })),
            Err(TableError::UnknownColumn { .. })
        ));

        t.set_sort(None).unwrap();
        assert_eq!(t.sort(), None);
        assert_eq!(t.filtered_rows(), &[RowId(0), RowId(1), RowId(2)]);
    }

    #[test]
    fn test_set_page_size() {
        let mut t = table(&[1.0; 25], page_size(10));
        t.navigate(PageNav::Last);

        t.set_page_size(5).unwrap();
        assert_eq!(t.page_count(), 5);
        assert_eq!(t.pagination().page_index, 0);
        assert_eq!(t.page_rows().len(), 5);

        assert!(matches!(
            t.set_page_size(0),
            Err(TableError::Config(ConfigError::InvalidPageSize { page_size: 0 }))
        ));
        assert_eq!(t.options().page_size, 5);
    }

    #[test]
    fn test_options_validation() {
        assert_eq!(
            TableOptions {
                page_size: 0,
                ..TableOptions::default()
            }
            .validate(),
            Err(ConfigError::InvalidPageSize { page_size: 0 })
        );
        assert_eq!(
            TableOptions {
                persist_column_order: true,
                table_name: Some("  ".to_string()),
                ..TableOptions::default()
            }
            .validate(),
            Err(ConfigError::MissingTableName)
        );
    }
}
