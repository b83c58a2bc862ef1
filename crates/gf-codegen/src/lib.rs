//! gf-codegen: C++ source emission for Geant4 projects.
//!
//! Turns simulation parameters and a material build order into
//! `construction.cc`, `construction.hh` and `generator.cc`.

pub mod emit;
pub mod error;
pub mod templates;

pub use emit::{GeneratedSources, MaterialBlock, generate_sources, material_block};
pub use error::{CodegenError, CodegenResult};
