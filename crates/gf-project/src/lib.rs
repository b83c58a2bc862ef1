//! gf-project: project file format, material table, and validation.

pub mod csv_store;
pub mod legacy;
pub mod schema;
pub mod table;
pub mod validate;

pub use csv_store::CsvMaterialStore;
pub use legacy::{LegacyError, load_params_txt, params_file_name, parse_params_txt, render_params_txt};
pub use schema::*;
pub use table::{MaterialTable, TableError};
pub use validate::{LATEST_VERSION, ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Legacy parameter file error: {0}")]
    Legacy(#[from] LegacyError),

    #[error("Material table error: {0}")]
    Table(#[from] TableError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let project: Project = serde_yaml::from_str(&content)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_yaml(path: &std::path::Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_yaml::to_string(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let project: Project = serde_json::from_str(&content)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_json(path: &std::path::Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    let content = serde_json::to_string_pretty(project)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a project file, choosing the format from the extension (`.json` or YAML).
pub fn load_project_file(path: &std::path::Path) -> ProjectResult<Project> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}

/// Save a project file, choosing the format from the extension (`.json` or YAML).
pub fn save_project_file(path: &std::path::Path, project: &Project) -> ProjectResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => save_json(path, project),
        _ => save_yaml(path, project),
    }
}
