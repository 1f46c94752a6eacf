use std::{env, sync::Arc, sync::LazyLock};

use super::errors::StorageError;
use super::types::{FileSessionStore, InMemorySessionStore, RedisSessionStore, SessionStore};

/// Backend selector: "memory", "file" or "redis". Default: "memory"
pub static SESSION_STORE_TYPE: LazyLock<String> =
    LazyLock::new(|| env::var("SESSION_STORE_TYPE").unwrap_or_else(|_| "memory".to_string()));

/// Directory for the "file" backend, connection URL for "redis"
pub static SESSION_STORE_URL: LazyLock<Option<String>> =
    LazyLock::new(|| env::var("SESSION_STORE_URL").ok());

/// Build the session store described by `SESSION_STORE_TYPE` and `SESSION_STORE_URL`.
pub fn session_store_from_env() -> Result<Arc<dyn SessionStore>, StorageError> {
    build_session_store(SESSION_STORE_TYPE.as_str(), SESSION_STORE_URL.as_deref())
}

pub fn build_session_store(
    store_type: &str,
    store_url: Option<&str>,
) -> Result<Arc<dyn SessionStore>, StorageError> {
    tracing::info!(
        "Initializing session store with type: {}, url: {:?}",
        store_type,
        store_url
    );

    let store: Arc<dyn SessionStore> = match store_type {
        "memory" => Arc::new(InMemorySessionStore::new()),
        "file" => {
            let dir = store_url.ok_or_else(|| {
                StorageError::Config("SESSION_STORE_URL must be set for the file store".to_string())
            })?;
            Arc::new(FileSessionStore::new(dir))
        }
        "redis" => {
            let url = store_url.ok_or_else(|| {
                StorageError::Config(
                    "SESSION_STORE_URL must be set for the redis store".to_string(),
                )
            })?;
            Arc::new(RedisSessionStore::open(url)?)
        }
        t => {
            return Err(StorageError::Config(format!(
                "Unsupported session store type: {t}. Supported types are 'memory', 'file' and 'redis'"
            )));
        }
    };

    Ok(store)
}
