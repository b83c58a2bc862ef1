//! Project loading, saving, validation, and introspection.

use std::path::{Path, PathBuf};

use gf_project::ProjectError;
use gf_project::schema::Project;

use crate::error::{AppError, AppResult};

/// Summary of a project for listing.
#[derive(Debug, Clone)]
pub struct ProjectSummary {
    pub name: String,
    pub particle: String,
    pub pmt: bool,
    pub material_table: PathBuf,
}

/// Load and validate a project from a YAML file (or JSON, by extension).
pub fn load_project(path: &Path) -> AppResult<Project> {
    gf_project::load_project_file(path).map_err(|e| match e {
        ProjectError::Io(source) => AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

/// Validate and save a project to a YAML file (or JSON, by extension).
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    gf_project::save_project_file(path, project).map_err(|e| match e {
        ProjectError::Io(source) => AppError::ProjectFileWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

/// Validate project structure.
pub fn validate_project(project: &Project) -> AppResult<()> {
    gf_project::validate_project(project).map_err(|e| AppError::Validation(e.to_string()))
}

/// Read an old nine-line parameter file into a project.
pub fn import_legacy(path: &Path) -> AppResult<Project> {
    let project = gf_project::load_params_txt(path)?;
    validate_project(&project)?;
    Ok(project)
}

/// Directory containing the project file.
pub fn project_dir(project_path: &Path) -> PathBuf {
    match project_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Location of the material table; relative paths resolve against the project directory.
pub fn material_table_path(project_path: &Path, project: &Project) -> PathBuf {
    let table = &project.materials.table;
    if table.is_absolute() {
        table.clone()
    } else {
        project_dir(project_path).join(table)
    }
}

pub fn summarize(project_path: &Path, project: &Project) -> ProjectSummary {
    ProjectSummary {
        name: project.name.clone(),
        particle: format!(
            "{} ({} {})",
            project.params.particle.name,
            project.params.particle.property.as_str(),
            project.params.particle.value
        ),
        pmt: project.params.pmt,
        material_table: material_table_path(project_path, project),
    }
}
