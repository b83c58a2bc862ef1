//! Material table editing.
//!
//! The table is kept sorted by `(parent, name)` after every edit, so root
//! candidates (blank parent) come first and each parent's rows stay together.

use std::collections::BTreeSet;

use gf_core::{GfError, is_blank, parse_positive};
use gf_materials::{MaterialRow, MaterialStore, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Material already exists: {name}")]
    DuplicateRow { name: String },

    #[error("Row {index} out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Row {row} ({name}): {source}")]
    BadNumber {
        row: usize,
        name: String,
        #[source]
        source: GfError,
    },

    #[error("Row {row} has a blank material name")]
    BlankName { row: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialTable {
    rows: Vec<MaterialRow>,
}

impl MaterialTable {
    /// Wrap rows as read, without re-sorting.
    pub fn new(rows: Vec<MaterialRow>) -> Self {
        Self { rows }
    }

    pub fn load(store: &dyn MaterialStore) -> Result<Self, TableError> {
        Ok(Self::new(store.read_all()?))
    }

    pub fn save(&self, store: &mut dyn MaterialStore) -> Result<(), TableError> {
        store.write_all(&self.rows)?;
        Ok(())
    }

    pub fn rows(&self) -> &[MaterialRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row and re-sort. An identical row already present is an error.
    pub fn add_row(&mut self, row: MaterialRow) -> Result<(), TableError> {
        if self.rows.contains(&row) {
            return Err(TableError::DuplicateRow { name: row.name });
        }
        self.rows.push(row);
        self.sort();
        Ok(())
    }

    /// Remove the row at `index` (in current table order) and re-sort.
    pub fn remove_row(&mut self, index: usize) -> Result<MaterialRow, TableError> {
        if index >= self.rows.len() {
            return Err(TableError::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        let removed = self.rows.remove(index);
        self.sort();
        Ok(removed)
    }

    /// Names a new row may use as its parent: every material plus every
    /// parent already referenced, sorted and without blanks.
    pub fn parent_candidates(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for row in &self.rows {
            if !is_blank(&row.density) {
                names.insert(row.name.clone());
            }
            if !is_blank(&row.parent) {
                names.insert(row.parent.clone());
            }
        }
        names.into_iter().collect()
    }

    /// Check that names are present and that densities and ratios are positive numbers.
    ///
    /// The graph itself carries these fields as text; this is the place to
    /// catch typos before they reach generated C++.
    pub fn validate_numbers(&self) -> Result<(), TableError> {
        for (i, row) in self.rows.iter().enumerate() {
            let bad = |source| TableError::BadNumber {
                row: i + 1,
                name: row.name.clone(),
                source,
            };
            if is_blank(&row.name) {
                return Err(TableError::BlankName { row: i + 1 });
            }
            if !is_blank(&row.density) {
                parse_positive(&row.density, "density").map_err(bad)?;
            }
            parse_positive(&row.ratio, "ratio").map_err(bad)?;
        }
        Ok(())
    }

    fn sort(&mut self) {
        self.rows
            .sort_by(|a, b| (&a.parent, &a.name).cmp(&(&b.parent, &b.name)));
    }
}
