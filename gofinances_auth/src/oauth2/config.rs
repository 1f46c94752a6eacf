use std::{env, sync::LazyLock};

use super::errors::OAuth2Error;

pub(super) static OAUTH2_AUTH_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("OAUTH2_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".to_string())
});

pub(super) static OAUTH2_USERINFO_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("OAUTH2_USERINFO_URL")
        .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v1/userinfo".to_string())
});

static OAUTH2_SCOPE: LazyLock<String> =
    LazyLock::new(|| env::var("OAUTH2_SCOPE").unwrap_or_else(|_| "profile email".to_string()));

// Implicit grant: the access token comes back in the redirect itself.
pub(super) const OAUTH2_RESPONSE_TYPE: &str = "token";

/// Endpoints and client registration for the redirect sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectOAuthConfig {
    pub auth_url: String,
    pub userinfo_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    /// Space separated
    pub scope: String,
}

impl RedirectOAuthConfig {
    /// Google endpoints with the given client registration.
    pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            auth_url: OAUTH2_AUTH_URL.clone(),
            userinfo_url: OAUTH2_USERINFO_URL.clone(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            scope: OAUTH2_SCOPE.clone(),
        }
    }

    /// Read `OAUTH2_GOOGLE_CLIENT_ID` and `OAUTH2_REDIRECT_URI`; endpoints and
    /// scope fall back to Google's defaults.
    pub fn from_env() -> Result<Self, OAuth2Error> {
        let client_id = env::var("OAUTH2_GOOGLE_CLIENT_ID")
            .map_err(|_| OAuth2Error::Config("OAUTH2_GOOGLE_CLIENT_ID must be set".to_string()))?;
        let redirect_uri = env::var("OAUTH2_REDIRECT_URI")
            .map_err(|_| OAuth2Error::Config("OAUTH2_REDIRECT_URI must be set".to_string()))?;
        Ok(Self::new(client_id, redirect_uri))
    }
}
