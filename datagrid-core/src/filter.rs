//! Filter kinds, per-column filter values and the predicates that evaluate them.

use crate::condition::ConditionFilter;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};

/// The filter control a column exposes. One kind is resolved per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Text,
    Select,
    Checkbox,
    Number,
}

impl FilterKind {
    /// Whether the kind draws its choices from the column's options.
    pub fn needs_options(&self) -> bool {
        matches!(self, FilterKind::Select | FilterKind::Checkbox)
    }
}

/// Predicate attached to a column by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterFn {
    /// Case-insensitive substring match on the cell's string form.
    IncludesString,
    /// Case-insensitive equality on the cell's string form.
    Equals,
    /// Cell value is one of the selected values.
    ArrIncludesSome,
    /// Numeric condition predicate.
    NumberCondition,
}

impl FilterFn {
    pub fn for_kind(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Text => FilterFn::IncludesString,
            FilterKind::Select => FilterFn::Equals,
            FilterKind::Checkbox => FilterFn::ArrIncludesSome,
            FilterKind::Number => FilterFn::NumberCondition,
        }
    }

    /// Evaluate a cell against a filter value. A value of the wrong shape for
    /// this predicate does not filter anything; the engine rejects such values
    /// before they are stored.
    pub fn evaluate(&self, cell: &CellValue, value: &FilterValue) -> bool {
        match (self, value) {
            (FilterFn::IncludesString, FilterValue::Text(query)) => {
                if cell.is_null() {
                    return false;
                }
                cell.display()
                    .to_lowercase()
                    .contains(&query.to_lowercase())
            }
            (FilterFn::Equals, FilterValue::Text(expected)) => {
                if cell.is_null() {
                    return false;
                }
                cell.display().to_lowercase() == expected.to_lowercase()
            }
            (FilterFn::ArrIncludesSome, FilterValue::Set(values)) => {
                if values.is_empty() {
                    return true;
                }
                let cell = cell.display();
                values.iter().any(|v| *v == cell)
            }
            (FilterFn::NumberCondition, FilterValue::Condition(filter)) => filter.matches(cell),
            _ => true,
        }
    }
}

/// Value held in a column's filter slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    /// Text search or single selected value.
    Text(String),
    /// Checked option values.
    Set(Vec<String>),
    /// Condition + operands.
    Condition(ConditionFilter),
}

impl FilterValue {
    /// The type-appropriate empty value for a filter kind.
    pub fn empty_for(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Text | FilterKind::Select => FilterValue::Text(String::new()),
            FilterKind::Checkbox => FilterValue::Set(Vec::new()),
            FilterKind::Number => FilterValue::Condition(ConditionFilter::default()),
        }
    }

    /// Empty values are removed from the filter state instead of being stored.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::Set(values) => values.is_empty(),
            FilterValue::Condition(filter) => !filter.is_active(),
        }
    }

    /// Whether the value has the shape a column of `kind` accepts.
    pub fn fits(&self, kind: FilterKind) -> bool {
        matches!(
            (self, kind),
            (FilterValue::Text(_), FilterKind::Text | FilterKind::Select)
                | (FilterValue::Set(_), FilterKind::Checkbox)
                | (FilterValue::Condition(_), FilterKind::Number)
        )
    }

    /// Kind reported when a value is rejected.
    pub(crate) fn nominal_kind(&self) -> FilterKind {
        match self {
            FilterValue::Text(_) => FilterKind::Text,
            FilterValue::Set(_) => FilterKind::Checkbox,
            FilterValue::Condition(_) => FilterKind::Number,
        }
    }
}
