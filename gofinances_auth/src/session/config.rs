use std::sync::LazyLock;

use crate::config::SESSION_STORAGE_NAMESPACE;

/// Key of the single persisted session record: `<namespace>:user`
pub static SESSION_STORAGE_KEY: LazyLock<String> =
    LazyLock::new(|| format!("{}:user", *SESSION_STORAGE_NAMESPACE));
