//! Column builder: descriptors in, engine column definitions out.

use crate::descriptor::{
    Alignment, CellFormatter, ColumnDescriptor, ColumnType, OptionItem, ValueFormatter,
};
use crate::error::ConfigError;
use crate::filter::{FilterFn, FilterKind};
use crate::value::CellValue;
use std::collections::HashMap;
use std::fmt;

/// Id of the leading row-selection column.
pub const SELECT_COLUMN_ID: &str = "select";
/// Id of the trailing row-actions column.
pub const ACTIONS_COLUMN_ID: &str = "actions";

/// Columns the table adds itself; they hold no row data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColumn {
    /// Row checkbox, with the select-all checkbox in the header.
    Select,
    /// Per-row add/edit/delete menu.
    Actions,
}

impl DisplayColumn {
    pub fn id(&self) -> &'static str {
        match self {
            DisplayColumn::Select => SELECT_COLUMN_ID,
            DisplayColumn::Actions => ACTIONS_COLUMN_ID,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Reads its value from the row under the column id.
    Accessor,
    Display(DisplayColumn),
}

/// Header content of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub title: String,
    pub subtitle: Option<String>,
}

/// Engine-level column definition.
#[derive(Clone)]
pub struct ColumnDef {
    pub id: String,
    pub kind: ColumnKind,
    pub display_name: String,
    pub header: ColumnHeader,
    pub column_type: ColumnType,
    pub enable_sorting: bool,
    pub enable_hiding: bool,
    pub align: Option<Alignment>,
    pub filter_kind: Option<FilterKind>,
    pub filter_fn: Option<FilterFn>,
    pub options: Vec<OptionItem>,
    formatter: Option<CellFormatter>,
    pub filter_value_formatter: Option<ValueFormatter>,
}

impl ColumnDef {
    fn from_descriptor(desc: &ColumnDescriptor) -> Self {
        let filter_kind = desc.filter_kind();
        Self {
            id: desc.column_id.clone(),
            kind: ColumnKind::Accessor,
            display_name: desc.title.clone(),
            header: ColumnHeader {
                title: desc.title.clone(),
                subtitle: desc.subtitle.clone(),
            },
            column_type: desc.column_type,
            enable_sorting: desc.sortable,
            enable_hiding: desc.hideable,
            align: desc.aligned,
            filter_kind,
            filter_fn: filter_kind.map(FilterFn::for_kind),
            options: desc.options.clone(),
            formatter: desc.formatter.clone(),
            filter_value_formatter: desc.filter_value_formatter.clone(),
        }
    }

    /// Definition of a table-provided display column.
    pub fn display(column: DisplayColumn, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            id: column.id().to_string(),
            kind: ColumnKind::Display(column),
            header: ColumnHeader {
                title: display_name.clone(),
                subtitle: None,
            },
            display_name,
            column_type: ColumnType::Text,
            enable_sorting: false,
            enable_hiding: false,
            align: match column {
                DisplayColumn::Select => None,
                DisplayColumn::Actions => Some(Alignment::Right),
            },
            filter_kind: None,
            filter_fn: None,
            options: Vec::new(),
            formatter: None,
            filter_value_formatter: None,
        }
    }

    pub fn is_accessor(&self) -> bool {
        self.kind == ColumnKind::Accessor
    }

    /// Cell text: the formatter's output when one is set, else the value's
    /// string form (empty for null).
    pub fn render_cell(&self, value: &CellValue) -> String {
        match &self.formatter {
            Some(formatter) => formatter(value),
            None => value.display(),
        }
    }

    /// Operand text for filter chips.
    pub fn format_filter_value(&self, value: f64) -> Option<String> {
        self.filter_value_formatter.as_ref().map(|f| f(value))
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("display_name", &self.display_name)
            .field("enable_sorting", &self.enable_sorting)
            .field("enable_hiding", &self.enable_hiding)
            .field("align", &self.align)
            .field("filter_kind", &self.filter_kind)
            .field("filter_fn", &self.filter_fn)
            .finish_non_exhaustive()
    }
}

/// Reject descriptor sets the engine cannot serve unambiguously.
pub fn validate_descriptors(descriptors: &[ColumnDescriptor]) -> Result<(), ConfigError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(descriptors.len());

    for (position, desc) in descriptors.iter().enumerate() {
        let id = desc.column_id.as_str();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyColumnId { position });
        }
        if id == SELECT_COLUMN_ID || id == ACTIONS_COLUMN_ID {
            return Err(ConfigError::ReservedColumnId {
                column_id: id.to_string(),
            });
        }
        if let Some(first) = seen.insert(id, position) {
            return Err(ConfigError::DuplicateColumnId {
                column_id: id.to_string(),
                first,
                second: position,
            });
        }

        match desc.filter_kind() {
            Some(FilterKind::Number) if desc.column_type != ColumnType::Number => {
                return Err(ConfigError::NumberFilterOnTextColumn {
                    column_id: id.to_string(),
                });
            }
            Some(kind) if kind.needs_options() && desc.options.is_empty() => {
                return Err(ConfigError::MissingOptions {
                    column_id: id.to_string(),
                    kind,
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Build engine column definitions from descriptors, preserving their order.
pub fn build_columns(descriptors: &[ColumnDescriptor]) -> Result<Vec<ColumnDef>, ConfigError> {
    validate_descriptors(descriptors)?;

    Ok(descriptors
        .iter()
        .map(|desc| {
            if let Some(filters) = &desc.filters {
                if filters.declared() > 1 {
                    tracing::warn!(
                        column_id = %desc.column_id,
                        resolved = ?desc.filter_kind(),
                        "Column declares several filters; only the first by priority is used"
                    );
                }
            }
            ColumnDef::from_descriptor(desc)
        })
        .collect())
}
