//! Declarative column descriptors.
//!
//! A table is configured by an ordered slice of [`ColumnDescriptor`]s. They are
//! built once when the table is defined and are read-only afterwards; the
//! column builder turns them into the [`ColumnDef`](crate::columns::ColumnDef)s
//! the engine works with.

use crate::filter::FilterKind;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Renders a cell value for display.
pub type CellFormatter = Arc<dyn Fn(&CellValue) -> String + Send + Sync>;

/// Renders a numeric filter operand for the filter chip.
pub type ValueFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Data type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
}

/// Horizontal alignment carried through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A selectable value with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

impl OptionItem {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Filter flags declared on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Debounced text search input.
    pub text: bool,
    /// Single-value dropdown.
    pub select: bool,
    /// Multi-value checkbox list.
    pub checkbox: bool,
    /// Condition + value filter (number columns only).
    pub number: bool,
}

impl FilterConfig {
    pub fn text() -> Self {
        Self {
            text: true,
            ..Self::default()
        }
    }

    pub fn select() -> Self {
        Self {
            select: true,
            ..Self::default()
        }
    }

    pub fn checkbox() -> Self {
        Self {
            checkbox: true,
            ..Self::default()
        }
    }

    pub fn number() -> Self {
        Self {
            number: true,
            ..Self::default()
        }
    }

    /// The single filter kind in effect, by priority select, checkbox,
    /// number, text.
    pub fn resolve(&self) -> Option<FilterKind> {
        if self.select {
            Some(FilterKind::Select)
        } else if self.checkbox {
            Some(FilterKind::Checkbox)
        } else if self.number {
            Some(FilterKind::Number)
        } else if self.text {
            Some(FilterKind::Text)
        } else {
            None
        }
    }

    /// Number of flags set.
    pub fn declared(&self) -> usize {
        [self.text, self.select, self.checkbox, self.number]
            .iter()
            .filter(|flag| **flag)
            .count()
    }
}

/// Static configuration of one table column.
#[derive(Clone)]
pub struct ColumnDescriptor {
    pub column_id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub column_type: ColumnType,
    pub sortable: bool,
    pub hideable: bool,
    pub aligned: Option<Alignment>,
    pub options: Vec<OptionItem>,
    pub filters: Option<FilterConfig>,
    pub formatter: Option<CellFormatter>,
    pub filter_value_formatter: Option<ValueFormatter>,
}

impl ColumnDescriptor {
    pub fn new(column_id: impl Into<String>, title: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            column_id: column_id.into(),
            title: title.into(),
            subtitle: None,
            column_type,
            sortable: false,
            hideable: true,
            aligned: None,
            options: Vec::new(),
            filters: None,
            formatter: None,
            filter_value_formatter: None,
        }
    }

    pub fn text(column_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(column_id, title, ColumnType::Text)
    }

    pub fn number(column_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(column_id, title, ColumnType::Number)
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn hideable(mut self, hideable: bool) -> Self {
        self.hideable = hideable;
        self
    }

    pub fn aligned(mut self, aligned: Alignment) -> Self {
        self.aligned = Some(aligned);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = OptionItem>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    pub fn filters(mut self, filters: FilterConfig) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&CellValue) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    pub fn filter_value_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.filter_value_formatter = Some(Arc::new(formatter));
        self
    }

    /// Resolved filter kind, if the column declares any filter.
    pub fn filter_kind(&self) -> Option<FilterKind> {
        self.filters.as_ref().and_then(FilterConfig::resolve)
    }

    /// Label of an option value, falling back to the raw value.
    pub fn option_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("column_id", &self.column_id)
            .field("title", &self.title)
            .field("subtitle", &self.subtitle)
            .field("column_type", &self.column_type)
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .field("aligned", &self.aligned)
            .field("options", &self.options)
            .field("filters", &self.filters)
            .field("formatter", &self.formatter.is_some())
            .field("filter_value_formatter", &self.filter_value_formatter.is_some())
            .finish()
    }
}
