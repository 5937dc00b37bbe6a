use thiserror::Error;

use crate::db::repository::RepoError;

/// Errors that stop the server from starting or keep it from serving.
///
/// Request-scoped failures are reported through [`shared::error::AppError`];
/// these are the faults that abort the process instead.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] RepoError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for startup code
pub type Result<T> = std::result::Result<T, ServerError>;
