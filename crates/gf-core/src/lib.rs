//! gf-core: shared foundation for g4forge.
//!
//! Contains:
//! - error (shared error type)
//! - ids (compact arena IDs for graph objects)
//! - numeric (parsing of user-entered numeric fields)

pub mod error;
pub mod ids;
pub mod numeric;

pub use error::{GfError, GfResult};
pub use ids::*;
pub use numeric::*;
