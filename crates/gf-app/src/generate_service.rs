//! Source generation for a project.
//!
//! Everything that can fail on bad input (table parsing, build order, code
//! emission) runs before the first file is written, so a rejected request
//! leaves the file system untouched.

use std::fs;
use std::path::{Path, PathBuf};

use gf_codegen::{GeneratedSources, generate_sources};
use gf_materials::CompositionGraph;
use gf_project::{CsvMaterialStore, params_file_name, render_params_txt, schema::Project};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::project_service::{material_table_path, project_dir, validate_project};

/// Outcome of a generation request.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// Files written, in write order.
    pub files: Vec<PathBuf>,
    /// Files copied from the project directory into a new output directory.
    pub copied: Vec<PathBuf>,
    /// Material names in construction order.
    pub build_order: Vec<String>,
}

/// Render the sources without touching the file system.
pub fn preview(project_path: &Path, project: &Project) -> AppResult<GeneratedSources> {
    Ok(render(project_path, project)?.0)
}

/// Generate the project's C++ sources and parameter file.
///
/// Output goes to the project directory when its name matches
/// `project.name`; otherwise to a sibling directory of that name, seeded
/// with a copy of the project directory's files.
pub fn generate(project_path: &Path, project: &Project) -> AppResult<GenerateReport> {
    let (sources, build_order) = render(project_path, project)?;

    let source_dir = fs::canonicalize(project_dir(project_path))?;
    let (output_dir, copied) = prepare_output_dir(&source_dir, &project.name)?;

    let mut files = Vec::new();
    let params_path = output_dir.join(params_file_name(&project.name));
    write_file(&params_path, &render_params_txt(project))?;
    files.push(params_path);

    for (name, contents) in sources.files() {
        let path = output_dir.join(name);
        write_file(&path, contents)?;
        files.push(path);
    }

    info!(
        output = %output_dir.display(),
        files = files.len(),
        materials = build_order.len(),
        "generated project sources"
    );
    Ok(GenerateReport {
        output_dir,
        files,
        copied,
        build_order,
    })
}

fn render(project_path: &Path, project: &Project) -> AppResult<(GeneratedSources, Vec<String>)> {
    validate_project(project)?;

    let store = CsvMaterialStore::new(material_table_path(project_path, project));
    let graph = CompositionGraph::from_store(&store, project.materials.duplicate_policy)?;
    let order = graph.resolve()?;
    let sources = generate_sources(&project.params, &order)?;

    let names = order.names().into_iter().map(str::to_string).collect();
    Ok((sources, names))
}

/// Pick the output directory, creating and seeding a sibling directory when
/// the project is being generated under a new name.
fn prepare_output_dir(source_dir: &Path, name: &str) -> AppResult<(PathBuf, Vec<PathBuf>)> {
    let current = source_dir.file_name().and_then(|n| n.to_str());
    if current == Some(name) {
        return Ok((source_dir.to_path_buf(), Vec::new()));
    }

    let parent = source_dir.parent().ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Cannot create '{}' next to {}",
            name,
            source_dir.display()
        ))
    })?;
    let output_dir = parent.join(name);
    fs::create_dir_all(&output_dir).map_err(|e| AppError::OutputWrite {
        path: output_dir.clone(),
        source: e,
    })?;

    // The old directory's parameter file would be stale in the new one.
    let stale = current.map(params_file_name);
    let mut copied = Vec::new();
    for entry in fs::read_dir(source_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        if stale.as_deref() == file_name.to_str() {
            continue;
        }
        let target = output_dir.join(&file_name);
        fs::copy(entry.path(), &target).map_err(|e| AppError::OutputWrite {
            path: target.clone(),
            source: e,
        })?;
        debug!(file = %target.display(), "copied project file");
        copied.push(target);
    }
    copied.sort();

    Ok((output_dir, copied))
}

fn write_file(path: &Path, contents: &str) -> AppResult<()> {
    fs::write(path, contents).map_err(|e| AppError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
