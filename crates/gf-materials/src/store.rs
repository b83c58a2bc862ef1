//! Material record store port.
//!
//! The graph never touches a persistence medium directly; callers hand it a
//! `MaterialStore` and the graph reads every row through it.

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// One row of the materials table: `name, density, ratio, parent`.
///
/// An empty `density` marks an element; an empty `parent` marks a root
/// candidate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MaterialRow {
    pub name: String,
    pub density: String,
    pub ratio: String,
    pub parent: String,
}

impl MaterialRow {
    pub fn new(
        name: impl Into<String>,
        density: impl Into<String>,
        ratio: impl Into<String>,
        parent: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            density: density.into(),
            ratio: ratio.into(),
            parent: parent.into(),
        }
    }
}

/// Read-all / write-all access to a materials table.
pub trait MaterialStore {
    /// Read every row in table order.
    fn read_all(&self) -> StoreResult<Vec<MaterialRow>>;

    /// Replace the table contents with `rows`.
    fn write_all(&mut self, rows: &[MaterialRow]) -> StoreResult<()>;
}

/// In-memory store, mainly for tests and previews.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    rows: Vec<MaterialRow>,
}

impl MemoryStore {
    pub fn new(rows: Vec<MaterialRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MaterialRow] {
        &self.rows
    }
}

impl MaterialStore for MemoryStore {
    fn read_all(&self) -> StoreResult<Vec<MaterialRow>> {
        Ok(self.rows.clone())
    }

    fn write_all(&mut self, rows: &[MaterialRow]) -> StoreResult<()> {
        self.rows = rows.to_vec();
        Ok(())
    }
}
