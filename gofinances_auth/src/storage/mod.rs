mod config;
mod errors;
mod file;
mod memory;
mod redis;
mod types;

pub use config::{SESSION_STORE_TYPE, SESSION_STORE_URL, build_session_store, session_store_from_env};
pub use errors::StorageError;
pub use types::{FileSessionStore, InMemorySessionStore, RedisSessionStore, SessionStore};
