use thiserror::Error;

/// Rejection reported by the platform credential API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Credential request cancelled")]
    Cancelled,

    #[error("Credential request failed: {0}")]
    Platform(String),
}
