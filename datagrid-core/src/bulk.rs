//! Bulk-edit command bar and per-row actions.
//!
//! Neither edits data. Edit and delete come out as commands carrying row ids
//! for the embedder to act on.

use crate::error::{TableError, TableResult};
use crate::locale::Locale;
use crate::table::DataTable;
use crate::value::{Row, RowId};
use serde::{Deserialize, Serialize};

/// Commands of the bulk-edit bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Edit,
    Delete,
    /// Empty the selection.
    Reset,
}

impl BulkAction {
    pub fn all() -> &'static [BulkAction] {
        &[BulkAction::Edit, BulkAction::Delete, BulkAction::Reset]
    }

    /// Keyboard shortcut as shown on the bar.
    pub fn shortcut(&self) -> &'static str {
        match self {
            BulkAction::Edit => "e",
            BulkAction::Delete => "d",
            BulkAction::Reset => "esc",
        }
    }

    pub fn label<'l>(&self, locale: &'l Locale) -> &'l str {
        match self {
            BulkAction::Edit => locale.edit,
            BulkAction::Delete => locale.delete,
            BulkAction::Reset => locale.reset,
        }
    }
}

/// Work handed to the embedder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkCommand {
    Edit(Vec<RowId>),
    Delete(Vec<RowId>),
}

impl BulkCommand {
    pub fn rows(&self) -> &[RowId] {
        match self {
            BulkCommand::Edit(rows) | BulkCommand::Delete(rows) => rows,
        }
    }
}

/// The bar is shown while at least one row is selected.
pub fn is_open<R: Row>(table: &DataTable<R>) -> bool {
    !table.selection().is_empty()
}

/// "<n> selected".
pub fn summary<R: Row>(table: &DataTable<R>) -> String {
    format!("{} {}", table.selection().len(), table.locale().selected)
}

/// Run a bar command. Returns the command for the embedder, or `None` for
/// reset and when the bar is closed.
pub fn execute<R: Row>(table: &mut DataTable<R>, action: BulkAction) -> Option<BulkCommand> {
    if !is_open(table) {
        return None;
    }
    let rows = table.selected_row_ids();
    let command = match action {
        BulkAction::Edit => BulkCommand::Edit(rows),
        BulkAction::Delete => BulkCommand::Delete(rows),
        BulkAction::Reset => {
            table.reset_selection();
            tracing::debug!("Row selection reset");
            return None;
        }
    };
    tracing::info!(action = ?action, rows = command.rows().len(), "Bulk command issued");
    Some(command)
}

/// Entries of the per-row action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAction {
    Add,
    Edit,
    Delete,
}

impl RowAction {
    pub fn all() -> &'static [RowAction] {
        &[RowAction::Add, RowAction::Edit, RowAction::Delete]
    }

    pub fn label<'l>(&self, locale: &'l Locale) -> &'l str {
        match self {
            RowAction::Add => locale.add,
            RowAction::Edit => locale.edit,
            RowAction::Delete => locale.delete,
        }
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, RowAction::Delete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowActionEvent {
    pub action: RowAction,
    pub row: RowId,
}

/// Pick an entry from a row's action menu.
pub fn row_action<R: Row>(
    table: &DataTable<R>,
    row: RowId,
    action: RowAction,
) -> TableResult<RowActionEvent> {
    if !table.options().enable_row_actions {
        return Err(TableError::RowActionsDisabled);
    }
    if table.row(row).is_none() {
        return Err(TableError::UnknownRow { row });
    }
    tracing::info!(action = ?action, row = row.0, "Row action triggered");
    Ok(RowActionEvent { action, row })
}
