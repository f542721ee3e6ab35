//! Convenience result type alias for ModSkeleton.

use crate::error::AppError;

/// A specialized `Result` type for ModSkeleton operations.
pub type AppResult<T> = Result<T, AppError>;
