use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use super::errors::StorageError;

/// Key/value store holding the serialized session record.
///
/// Values are opaque strings; the session layer owns their encoding.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Read the value under `key`. `Ok(None)` means the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value under `key`. The write is durable once this returns.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local store, lost on restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    pub(super) entry: Mutex<HashMap<String, String>>,
}

/// One file per key inside `dir`.
pub struct FileSessionStore {
    pub(super) dir: PathBuf,
}

pub struct RedisSessionStore {
    pub(super) client: redis::Client,
}
