use thiserror::Error;

pub type CodegenResult<T> = Result<T, CodegenError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// The detector material must be constructed, not looked up.
    #[error("Root '{name}' is an element; the root must be a material with a density")]
    RootIsElement { name: String },

    /// Elements are fetched from the NIST table and cannot contain anything.
    #[error("Element '{name}' cannot be a parent; give it a density to make it a material")]
    ElementHasChildren { name: String },

    #[error("Element '{name}' has no parent material")]
    OrphanElement { name: String },

    /// Material names become C++ variable names.
    #[error("Material name '{name}' is not a valid C++ identifier")]
    InvalidIdentifier { name: String },

    #[error("Material name '{name}' clashes with a generated variable")]
    ReservedName { name: String },

    #[error("Template placeholder left unfilled: {placeholder}")]
    UnfilledPlaceholder { placeholder: String },
}
