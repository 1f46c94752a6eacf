//! Central configuration for the gofinances_auth crate

use std::sync::LazyLock;

/// Namespace prefixed to every key this crate writes to the session store
///
/// The persisted session lives under `<namespace>:user`.
/// Default: "@gofinances"
pub static SESSION_STORAGE_NAMESPACE: LazyLock<String> =
    LazyLock::new(storage_namespace_from_env);

fn storage_namespace_from_env() -> String {
    std::env::var("SESSION_STORAGE_NAMESPACE")
        .ok()
        .filter(|ns| !ns.is_empty())
        .unwrap_or_else(|| "@gofinances".to_string())
}
