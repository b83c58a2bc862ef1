//! Error types for the gf-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and gives front ends a single error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Material table error: {0}")]
    Materials(String),

    /// The table does not describe a single composition tree.
    #[error("{0}. Please configure exactly one material with the parent field left blank.")]
    MaterialOrder(String),

    /// Some rows are their own ancestors.
    #[error("{0}. Change the parent of one of these rows so its chain ends at the root material.")]
    MaterialCycle(String),

    #[error("Code generation failed: {0}")]
    Codegen(String),

    #[error("Failed to write {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for gf-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<gf_project::ProjectError> for AppError {
    fn from(err: gf_project::ProjectError) -> Self {
        match err {
            gf_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<gf_project::TableError> for AppError {
    fn from(err: gf_project::TableError) -> Self {
        AppError::Materials(err.to_string())
    }
}

impl From<gf_materials::GraphError> for AppError {
    fn from(err: gf_materials::GraphError) -> Self {
        AppError::Materials(err.to_string())
    }
}

impl From<gf_materials::StoreError> for AppError {
    fn from(err: gf_materials::StoreError) -> Self {
        AppError::Materials(err.to_string())
    }
}

impl From<gf_materials::OrderError> for AppError {
    fn from(err: gf_materials::OrderError) -> Self {
        match err {
            gf_materials::OrderError::Unreachable { .. } => {
                AppError::MaterialCycle(err.to_string())
            }
            gf_materials::OrderError::RootCount { .. } => {
                AppError::MaterialOrder(err.to_string())
            }
        }
    }
}

impl From<gf_codegen::CodegenError> for AppError {
    fn from(err: gf_codegen::CodegenError) -> Self {
        AppError::Codegen(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gf_materials::OrderError;

    #[test]
    fn root_count_asks_for_single_root() {
        let err = AppError::from(OrderError::RootCount {
            found: 2,
            roots: vec!["A".into(), "B".into()],
            missing_parents: vec![],
        });
        assert!(matches!(err, AppError::MaterialOrder(_)));
        assert!(err.to_string().contains("parent field left blank"));
    }

    #[test]
    fn cycle_gets_its_own_advice() {
        let err = AppError::from(OrderError::Unreachable {
            names: vec!["A".into(), "B".into()],
        });
        assert!(matches!(err, AppError::MaterialCycle(_)));
        let msg = err.to_string();
        assert!(msg.contains("A, B"));
        assert!(!msg.contains("parent field left blank"));
    }
}
