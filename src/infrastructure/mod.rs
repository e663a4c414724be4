//! Infrastructure layer: provider implementations and DI container
//!
//! This layer implements the records provider boundary and wires up
//! services.

pub mod di;
pub mod error;
pub mod traits;

pub use error::{ProviderError, ProviderResult};
pub use traits::{RecordsProvider, Snapshot, SnapshotProvider};
