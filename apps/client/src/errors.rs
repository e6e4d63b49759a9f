use thiserror::Error;

use crate::persistence::PersistenceError;
use crate::remote::RemoteError;

/// Error surfaced by store operations.
///
/// Only write operations (`login`, `register`, `upload_resume`, `update_resume`,
/// `delete_resume`) return it to callers. Persistence and serialization
/// failures are logged inside the stores and never reach a screen.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
