//! On-disk state: the row data file and per-table column order files.

use datagrid_core::{ColumnOrderStore, Record, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Read the table rows: a JSON array of objects keyed by column id.
pub fn load_rows(path: &Path) -> Result<Vec<Record>, PersistenceError> {
    let contents = std::fs::read_to_string(path)?;
    let rows = serde_json::from_str::<Vec<Record>>(&contents)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Rows loaded");
    Ok(rows)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedOrder {
    table_name: String,
    column_order: Vec<String>,
}

/// Column order kept as `<dir>/<table name>.json`.
#[derive(Debug, Clone)]
pub struct FileColumnOrderStore {
    dir: PathBuf,
}

impl FileColumnOrderStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, table_name: &str) -> PathBuf {
        let stem: String = table_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{stem}.json"))
    }
}

impl ColumnOrderStore for FileColumnOrderStore {
    fn load(&self, table_name: &str) -> Result<Option<Vec<String>>, StoreError> {
        let path = self.path_for(table_name);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        let persisted = serde_json::from_str::<PersistedOrder>(&contents)?;
        // Distinct names can share a sanitized file name.
        if persisted.table_name != table_name {
            tracing::debug!(
                requested = table_name,
                stored = %persisted.table_name,
                "Column order file belongs to another table"
            );
            return Ok(None);
        }
        Ok(Some(persisted.column_order))
    }

    fn save(&mut self, table_name: &str, order: &[String]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let persisted = PersistedOrder {
            table_name: table_name.to_string(),
            column_order: order.to_vec(),
        };
        let contents = serde_json::to_string_pretty(&persisted)?;
        std::fs::write(self.path_for(table_name), contents)?;
        Ok(())
    }
}
