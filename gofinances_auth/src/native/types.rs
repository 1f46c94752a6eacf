use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::CredentialError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialScope {
    FullName,
    Email,
}

impl CredentialScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "FULL_NAME",
            Self::Email => "EMAIL",
        }
    }
}

/// Credential returned by the platform.
///
/// The platform may withhold `email` and `fullName` after the first consent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCredential {
    pub authorization_code: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<FullName>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullName {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// Platform credential API (Sign in with Apple on iOS).
#[async_trait]
pub trait CredentialProvider: Send + Sync + 'static {
    async fn request_credential(
        &self,
        scopes: &[CredentialScope],
    ) -> Result<NativeCredential, CredentialError>;
}

/// Provider for platforms without a native credential API.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedPlatformProvider;

#[async_trait]
impl CredentialProvider for UnsupportedPlatformProvider {
    async fn request_credential(
        &self,
        _scopes: &[CredentialScope],
    ) -> Result<NativeCredential, CredentialError> {
        Err(CredentialError::Platform(
            "native sign-in is not available on this platform".to_string(),
        ))
    }
}
