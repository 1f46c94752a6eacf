use thiserror::Error;

use crate::native::CredentialError;
use crate::oauth2::OAuth2Error;
use crate::storage::StorageError;

/// Errors surfaced to the caller of an explicit sign-in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignInError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The profile fetch after a successful redirect exchange failed in transit
    #[error("Network error: {0}")]
    Network(String),

    /// The identity provider answered with something unusable
    #[error("Provider error: {0}")]
    Provider(String),

    /// The native credential lacks a field the session mapping requires
    #[error("Incomplete credential: missing {0}")]
    IncompleteCredential(String),

    #[error("Sign-in cancelled by the user")]
    UserCancelled,

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("A sign-in with this provider is already in progress")]
    AlreadyInProgress,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<OAuth2Error> for SignInError {
    fn from(err: OAuth2Error) -> Self {
        match err {
            OAuth2Error::Config(msg) => Self::Config(msg),
            OAuth2Error::Network(msg) => Self::Network(msg),
            OAuth2Error::Provider(msg) => Self::Provider(msg),
        }
    }
}

impl From<CredentialError> for SignInError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Cancelled => Self::UserCancelled,
            CredentialError::Platform(msg) => Self::Platform(msg),
        }
    }
}
