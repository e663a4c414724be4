//! Application-level errors (wraps provider errors)

use thiserror::Error;

use crate::infrastructure::ProviderError;

/// Application errors wrap provider errors and add application-level
/// context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
