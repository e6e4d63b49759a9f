//! Persistence Adapter: durable key-value byte storage for the session store.
//!
//! Only two keys are ever written: [`AUTH_TOKEN_KEY`] and [`USER_DATA_KEY`].
//! They are written as two separate calls, so readers must treat a half-written
//! pair as "no session".

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const USER_DATA_KEY: &str = "user_data";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Opaque durable byte store. Carried by the session store as `Arc<dyn KeyValueStore>`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when the key has never been written or was removed.
    async fn get(&self, key: &str) -> Result<Option<Bytes>, PersistenceError>;

    async fn set(&self, key: &str, value: Bytes) -> Result<(), PersistenceError>;

    /// Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}
