//! Graph-specific error types.

use std::path::PathBuf;

use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;
pub type StoreResult<T> = Result<T, StoreError>;

/// Composition graph construction errors.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A name was registered twice under `DuplicatePolicy::Reject`.
    #[error("Material '{name}' is defined more than once")]
    DuplicateName { name: String },

    /// An edge refers to a child that was never registered with `add_node`.
    #[error("Material '{name}' must be added before it can be linked to a parent")]
    UnknownNode { name: String },

    /// The node arena ran out of IDs.
    #[error("Too many materials in one graph ({count})")]
    Capacity { count: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reasons a graph has no deterministic build order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The graph must have exactly one material without a parent.
    #[error(
        "Expected exactly one material with a blank parent, found {}{}",
        .found,
        describe_roots(.roots, .missing_parents)
    )]
    RootCount {
        found: usize,
        roots: Vec<String>,
        /// Parent names referenced by rows but never defined.
        missing_parents: Vec<String>,
    },

    /// Nodes that cannot be reached from the root (their parent chain loops).
    #[error("Materials form a parent cycle and cannot be ordered: {}", .names.join(", "))]
    Unreachable { names: Vec<String> },
}

fn describe_roots(roots: &[String], missing_parents: &[String]) -> String {
    let mut out = String::new();
    if !roots.is_empty() {
        out.push_str(&format!(" ({})", roots.join(", ")));
    }
    if !missing_parents.is_empty() {
        out.push_str(&format!(
            "; undefined parent(s): {}",
            missing_parents.join(", ")
        ));
    }
    out
}

/// Errors raised by material store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on material table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed material table row {row}: {message}")]
    Malformed { row: usize, message: String },

    #[error("Material store backend error: {0}")]
    Backend(String),
}
