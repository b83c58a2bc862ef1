use thiserror::Error;

pub type GfResult<T> = Result<T, GfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Cannot parse {what} from '{value}'")]
    Parse { what: &'static str, value: String },

    #[error("Value for {what} must be positive: {value}")]
    NonPositive { what: &'static str, value: f64 },
}
