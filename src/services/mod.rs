//! Services over the key-value store.
//!
//! Each service owns a handle to the store and is cheap to clone.

mod collection;
mod dashboard;
mod divisions;
mod employees;
mod session;
mod theme;

pub use collection::*;
pub use dashboard::*;
pub use divisions::*;
pub use employees::*;
pub use session::*;
pub use theme::*;

use crate::errors::AppError;

/// Trim a required text field, rejecting blank values.
pub(crate) fn required(label: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", label)));
    }
    Ok(trimmed.to_string())
}
