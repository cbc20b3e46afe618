//! Error types for the TUI.

use crate::config::ConfigError;
use crate::persistence::PersistenceError;
use datagrid_core::{ExportError, TableError};

#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("Failed to install log subscriber: {0}")]
    Logging(String),
}

impl From<datagrid_core::ConfigError> for TuiError {
    fn from(err: datagrid_core::ConfigError) -> Self {
        TuiError::Config(ConfigError::Table(err))
    }
}
