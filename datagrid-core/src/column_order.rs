//! Column order persistence.

use crate::error::StoreError;
use std::collections::{HashMap, HashSet};

/// Storage for a table's column order, keyed by table name.
pub trait ColumnOrderStore {
    /// Stored order, or `None` when nothing was saved for this table yet.
    fn load(&self, table_name: &str) -> Result<Option<Vec<String>>, StoreError>;

    fn save(&mut self, table_name: &str, order: &[String]) -> Result<(), StoreError>;
}

/// In-process store, used by tests and by embedders that do not persist.
#[derive(Debug, Clone, Default)]
pub struct MemoryColumnOrderStore {
    orders: HashMap<String, Vec<String>>,
}

impl MemoryColumnOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ColumnOrderStore for MemoryColumnOrderStore {
    fn load(&self, table_name: &str) -> Result<Option<Vec<String>>, StoreError> {
        Ok(self.orders.get(table_name).cloned())
    }

    fn save(&mut self, table_name: &str, order: &[String]) -> Result<(), StoreError> {
        self.orders.insert(table_name.to_string(), order.to_vec());
        Ok(())
    }
}

/// Merge a stored order with the table's current columns: stored ids that
/// still exist keep their stored positions, ids the store does not know are
/// appended in their default order.
pub fn reconcile_order(stored: &[String], current: &[String]) -> Vec<String> {
    let known: HashSet<&str> = current.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(current.len());
    let mut order = Vec::with_capacity(current.len());

    for id in stored {
        if known.contains(id.as_str()) && seen.insert(id.as_str()) {
            order.push(id.clone());
        }
    }
    for id in current {
        if seen.insert(id.as_str()) {
            order.push(id.clone());
        }
    }
    order
}
