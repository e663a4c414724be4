//! Infrastructure-level errors (records provider boundary)

use std::path::PathBuf;
use thiserror::Error;

/// Failures at the records provider boundary. Construction itself never
/// fails; everything here originates in fetching or decoding the feed.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("cannot read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
