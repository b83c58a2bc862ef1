//! gf-materials: material composition graph for g4forge.
//!
//! Provides:
//! - Material nodes (materials with a density, elements without one)
//! - Incremental composition graph with forward-reference resolution
//! - Dependency order resolution for code emission
//! - The material record store port
//!
//! # Example
//!
//! ```
//! use gf_materials::{CompositionGraph, MaterialRow};
//!
//! let rows = vec![
//!     MaterialRow::new("H2O", "1.0", "1", ""),
//!     MaterialRow::new("H", "", "2", "H2O"),
//!     MaterialRow::new("O", "", "1", "H2O"),
//! ];
//! let graph = CompositionGraph::from_rows(&rows, Default::default()).unwrap();
//! let order = graph.traverse().unwrap();
//!
//! assert_eq!(order.names(), vec!["H2O", "H", "O"]);
//! ```

pub mod error;
pub mod graph;
pub mod node;
pub mod order;
pub mod store;

pub use error::{GraphError, GraphResult, OrderError, StoreError, StoreResult};
pub use graph::{CompositionGraph, DuplicatePolicy};
pub use node::{MaterialDef, MaterialKind, MaterialNode};
pub use order::BuildOrder;
pub use store::{MaterialRow, MaterialStore, MemoryStore};
