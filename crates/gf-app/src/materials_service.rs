//! Material table editing and build-order queries.

use std::path::Path;

use gf_materials::{CompositionGraph, MaterialKind, MaterialRow};
use gf_project::{CsvMaterialStore, MaterialTable, schema::Project};
use tracing::info;

use crate::error::AppResult;
use crate::project_service::material_table_path;

/// One step of the construction sequence, detached from the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEntry {
    pub name: String,
    pub kind: MaterialKind,
    pub parent: Option<String>,
    pub ratio: String,
    pub child_count: usize,
}

fn open_store(project_path: &Path, project: &Project) -> CsvMaterialStore {
    CsvMaterialStore::new(material_table_path(project_path, project))
}

/// All rows in table order.
pub fn list_materials(project_path: &Path, project: &Project) -> AppResult<Vec<MaterialRow>> {
    let table = MaterialTable::load(&open_store(project_path, project))?;
    Ok(table.rows().to_vec())
}

/// Add a row and persist the re-sorted table.
pub fn add_material(project_path: &Path, project: &Project, row: MaterialRow) -> AppResult<()> {
    let mut store = open_store(project_path, project);
    let mut table = MaterialTable::load(&store)?;
    let name = row.name.clone();
    table.add_row(row)?;
    table.save(&mut store)?;
    info!(material = %name, rows = table.len(), "material added");
    Ok(())
}

/// Remove the row at `index` (0-based, table order) and persist.
pub fn remove_material(
    project_path: &Path,
    project: &Project,
    index: usize,
) -> AppResult<MaterialRow> {
    let mut store = open_store(project_path, project);
    let mut table = MaterialTable::load(&store)?;
    let removed = table.remove_row(index)?;
    table.save(&mut store)?;
    info!(material = %removed.name, rows = table.len(), "material removed");
    Ok(removed)
}

pub fn parent_candidates(project_path: &Path, project: &Project) -> AppResult<Vec<String>> {
    let table = MaterialTable::load(&open_store(project_path, project))?;
    Ok(table.parent_candidates())
}

/// Resolve the construction order of the current table.
pub fn build_order(project_path: &Path, project: &Project) -> AppResult<Vec<OrderEntry>> {
    let store = open_store(project_path, project);
    let graph = CompositionGraph::from_store(&store, project.materials.duplicate_policy)?;
    let order = graph.resolve()?;

    Ok(order
        .iter()
        .map(|node| OrderEntry {
            name: node.name.clone(),
            kind: node.kind(),
            parent: order.parent(node).map(|p| p.name.clone()),
            ratio: node.ratio.clone(),
            child_count: node.children().len(),
        })
        .collect())
}

/// Check numbers in the table and that it resolves to a single tree.
pub fn validate_materials(project_path: &Path, project: &Project) -> AppResult<usize> {
    let store = open_store(project_path, project);
    let table = MaterialTable::load(&store)?;
    table.validate_numbers()?;

    let graph = CompositionGraph::from_rows(table.rows(), project.materials.duplicate_policy)?;
    let order = graph.resolve()?;
    Ok(order.len())
}
