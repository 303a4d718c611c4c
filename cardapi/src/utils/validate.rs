//! Argument checks shared by the constructors.
//!
//! Violations surface as [`Error::InvalidArgument`] naming the offending
//! argument.

use crate::{Error, Result};

/// Ensure a collection argument holds at least one element.
pub fn not_empty<T>(items: &[T], name: &str) -> Result<()> {
    if items.is_empty() {
        return Err(Error::InvalidArgument(format!("{} must not be empty", name)));
    }
    Ok(())
}

/// Ensure `value >= min`.
pub fn greater_or_equal(value: usize, min: usize, name: &str) -> Result<()> {
    if value < min {
        return Err(Error::InvalidArgument(format!(
            "{} must be greater or equal to {}, got {}",
            name, min, value
        )));
    }
    Ok(())
}

/// Ensure `min <= value <= max`.
pub fn in_range(value: usize, min: usize, max: usize, name: &str) -> Result<()> {
    if value < min || value > max {
        return Err(Error::InvalidArgument(format!(
            "{} must be in range [{}..{}], got {}",
            name, min, max, value
        )));
    }
    Ok(())
}
