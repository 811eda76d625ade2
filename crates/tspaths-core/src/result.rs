//! Result type alias for tsconfig resolution

use crate::error::TsPathsError;

/// Standard Result type for tsconfig resolution
pub type Result<T> = std::result::Result<T, TsPathsError>;
