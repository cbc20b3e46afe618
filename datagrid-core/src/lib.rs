//! DATAGRID Core - Headless Table Engine
//!
//! Column descriptors are turned into column definitions, and a
//! [`DataTable`] owns the rows plus every piece of table state: filters,
//! sort, pagination, selection, visibility and column order. The filter
//! bar, bulk-edit bar and CSV export are models over that table; rendering
//! is left to the front-end.

pub mod bulk;
pub mod column_order;
pub mod columns;
pub mod condition;
pub mod csv;
pub mod debounce;
pub mod descriptor;
pub mod error;
pub mod filter;
pub mod filter_bar;
pub mod locale;
pub mod pagination;
pub mod selection;
pub mod shell;
pub mod sorting;
pub mod table;
pub mod value;

pub use bulk::{BulkAction, BulkCommand, RowAction, RowActionEvent};
pub use column_order::{reconcile_order, ColumnOrderStore, MemoryColumnOrderStore};
pub use columns::{
    build_columns, validate_descriptors, ColumnDef, ColumnHeader, ColumnKind, DisplayColumn,
    ACTIONS_COLUMN_ID, SELECT_COLUMN_ID,
};
pub use condition::{number_condition, Condition, ConditionFilter, Operand};
pub use csv::{export_date, export_file_name, to_csv, CsvExport};
pub use debounce::{Debouncer, TEXT_FILTER_DEBOUNCE};
pub use descriptor::{
    Alignment, CellFormatter, ColumnDescriptor, ColumnType, FilterConfig, OptionItem,
    ValueFormatter,
};
pub use error::{ConfigError, ExportError, StoreError, TableError, TableResult};
pub use filter::{FilterFn, FilterKind, FilterValue};
pub use filter_bar::{Draft, FilterBar, FilterControl};
pub use locale::{Language, Locale, MovedColumn};
pub use pagination::{PageNav, PageWindow, Pagination, DEFAULT_PAGE_SIZE};
pub use selection::{HeaderCheckState, RowSelection, SelectionPhase};
pub use shell::TableShell;
pub use sorting::{SortDirection, SortState};
pub use table::{DataTable, TableOptions};
pub use value::{format_currency_usd, format_number, CellValue, Record, Row, RowId};
