//! Shared application service layer for g4forge.
//!
//! Front ends go through this crate for project loading, material table
//! editing, build-order resolution and source generation.

pub mod error;
pub mod generate_service;
pub mod materials_service;
pub mod project_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use generate_service::{GenerateReport, generate, preview};
pub use materials_service::{
    OrderEntry, add_material, build_order, list_materials, parent_candidates, remove_material,
    validate_materials,
};
pub use project_service::{
    ProjectSummary, import_legacy, load_project, material_table_path, project_dir, save_project,
    summarize, validate_project,
};
