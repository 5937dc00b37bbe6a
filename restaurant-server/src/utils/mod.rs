//! Utilities
//!
//! Logging setup plus re-exports of the unified error types.

pub mod logger;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
