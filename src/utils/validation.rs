//! Input validation primitives.
//!
//! These replace verbose `Error::validation_invalid_argument` chains at call sites.

use crate::error::{Error, Result};

/// Require a string to be non-empty. The value is returned untouched, whitespace included.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    if value.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None))
    } else {
        Ok(value)
    }
}

/// Require two values to differ.
pub fn require_distinct(left: &str, right: &str, field: &str, message: &str) -> Result<()> {
    if left == right {
        Err(Error::validation_invalid_argument(
            field,
            message,
            Some(right.to_string()),
        ))
    } else {
        Ok(())
    }
}
