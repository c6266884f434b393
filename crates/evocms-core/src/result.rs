//! Convenience result type alias for evocms.

use crate::error::AppError;

/// A specialized `Result` type for evocms operations.
pub type AppResult<T> = Result<T, AppError>;
