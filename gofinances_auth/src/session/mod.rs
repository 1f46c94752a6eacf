mod config;
mod types;

pub use config::SESSION_STORAGE_KEY;
pub use types::{AuthState, SessionSnapshot, SessionState, UserSession};
