//! Error types for datagrid operations

use crate::filter::FilterKind;
use crate::value::RowId;
use thiserror::Error;

/// Table configuration errors, raised while building a table from its
/// descriptors and options.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Column at position {position} has an empty column id")]
    EmptyColumnId { position: usize },

    #[error("Duplicate column id '{column_id}' at positions {first} and {second}")]
    DuplicateColumnId {
        column_id: String,
        first: usize,
        second: usize,
    },

    #[error("Column '{column_id}' declares a number filter but is not a number column")]
    NumberFilterOnTextColumn { column_id: String },

    #[error("Column '{column_id}' declares a {kind:?} filter without options")]
    MissingOptions { column_id: String, kind: FilterKind },

    #[error("Column id '{column_id}' is reserved for a display column")]
    ReservedColumnId { column_id: String },

    #[error("Invalid page size {page_size}: must be > 0")]
    InvalidPageSize { page_size: usize },

    #[error("Column order persistence requires a non-empty table name")]
    MissingTableName,

    #[error("Unknown language code '{code}' (expected one of: en, pt)")]
    UnknownLanguage { code: String },
}

/// Runtime table errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Unknown column: {column_id}")]
    UnknownColumn { column_id: String },

    #[error("Column '{column_id}' has no filter control")]
    NotFilterable { column_id: String },

    #[error("Filter kind mismatch on '{column_id}': column uses {expected:?}, got {got:?}")]
    FilterKindMismatch {
        column_id: String,
        expected: FilterKind,
        got: FilterKind,
    },

    #[error("Column '{column_id}' is not sortable")]
    ColumnNotSortable { column_id: String },

    #[error("Column '{column_id}' cannot be hidden")]
    ColumnNotHideable { column_id: String },

    #[error("Unknown row: {row}")]
    UnknownRow { row: RowId },

    #[error("Row actions are disabled for this table")]
    RowActionsDisabled,

    #[error("Option '{value}' is not declared on column '{column_id}'")]
    OptionNotFound { column_id: String, value: String },

    #[error("Column '{column_id}' needs a condition before operands can be entered")]
    ConditionRequired { column_id: String },

    #[error("Operand index {index} is not accepted by the current condition on '{column_id}'")]
    OperandDisabled { column_id: String, index: usize },

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// CSV export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export base name must not be empty")]
    EmptyBaseName,
}

/// Column order store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias for table operations.
pub type TableResult<T> = Result<T, TableError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_column_id_display() {
        let err = ConfigError::DuplicateColumnId {
            column_id: "owner".to_string(),
            first: 0,
            second: 3,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Duplicate column id"));
        assert!(msg.contains("owner"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_unknown_language_display() {
        let err = ConfigError::UnknownLanguage {
            code: "de".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("'de'"));
        assert!(msg.contains("en, pt"));
    }

    #[test]
    fn test_filter_kind_mismatch_display() {
        let err = TableError::FilterKindMismatch {
            column_id: "costs".to_string(),
            expected: FilterKind::Number,
            got: FilterKind::Text,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("costs"));
        assert!(msg.contains("Number"));
        assert!(msg.contains("Text"));
    }

    #[test]
    fn test_config_error_converts_into_table_error() {
        let err: TableError = ConfigError::MissingTableName.into();
        assert!(matches!(err, TableError::Config(ConfigError::MissingTableName)));
    }
}
