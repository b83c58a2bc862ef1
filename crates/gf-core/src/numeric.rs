//! Numeric helpers for table and form fields.
//!
//! Material densities and ratios are carried through the graph as the text the
//! user typed; these helpers are used where a caller wants to check that the
//! text is actually a usable number.

use crate::{GfError, GfResult};

/// Floating point type used throughout the system.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> GfResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GfError::NonFinite { what, value: v })
    }
}

/// Parse a user-entered number, trimming surrounding whitespace.
pub fn parse_real(text: &str, what: &'static str) -> GfResult<Real> {
    let value: Real = text.trim().parse().map_err(|_| GfError::Parse {
        what,
        value: text.to_string(),
    })?;
    ensure_finite(value, what)
}

/// Parse a number that must be strictly positive (densities, mixing ratios).
pub fn parse_positive(text: &str, what: &'static str) -> GfResult<Real> {
    let value = parse_real(text, what)?;
    if value <= 0.0 {
        return Err(GfError::NonPositive { what, value });
    }
    Ok(value)
}

/// True when a form field is empty or only whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
