use async_trait::async_trait;
use std::sync::Arc;

use super::types::{CredentialProvider, CredentialScope, NativeCredential};
use crate::coordination::{SignInAdapter, SignInError};
use crate::session::UserSession;
use crate::utils::InFlight;

const REQUESTED_SCOPES: [CredentialScope; 2] = [CredentialScope::FullName, CredentialScope::Email];

/// Apple sign-in through the platform credential API.
pub struct NativeSignInAdapter {
    provider: Arc<dyn CredentialProvider>,
    in_flight: InFlight,
}

impl NativeSignInAdapter {
    pub fn new(provider: Arc<dyn CredentialProvider>) -> Self {
        Self {
            provider,
            in_flight: InFlight::new(),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub async fn sign_in(&self) -> Result<Option<UserSession>, SignInError> {
        let Some(_guard) = self.in_flight.try_acquire() else {
            tracing::warn!("Native sign-in already in progress");
            return Err(SignInError::AlreadyInProgress);
        };

        let credential = self
            .provider
            .request_credential(&REQUESTED_SCOPES)
            .await
            .map_err(|e| {
                tracing::info!("Native credential request rejected: {}", e);
                SignInError::from(e)
            })?;

        credential_to_user(credential).map(Some)
    }
}

#[async_trait]
impl SignInAdapter for NativeSignInAdapter {
    async fn sign_in(&self) -> Result<Option<UserSession>, SignInError> {
        NativeSignInAdapter::sign_in(self).await
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, SignInError> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| {
        tracing::warn!("Native credential is missing {}", field);
        SignInError::IncompleteCredential(field.to_string())
    })
}

/// Map a credential into a session. Name and picture are not supplied by the
/// platform and stay empty.
fn credential_to_user(credential: NativeCredential) -> Result<UserSession, SignInError> {
    let full_name = credential.full_name.unwrap_or_default();

    Ok(UserSession {
        id: required(credential.authorization_code, "authorizationCode")?,
        email: required(credential.email, "email")?,
        name: String::new(),
        given_name: required(full_name.given_name, "fullName.givenName")?,
        family_name: required(full_name.family_name, "fullName.familyName")?,
        picture: String::new(),
    })
}
