use async_trait::async_trait;
use std::sync::Arc;

use crate::coordination::{SignInAdapter, SignInError};
use crate::oauth2::config::{OAUTH2_RESPONSE_TYPE, RedirectOAuthConfig};
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::RedirectLauncher;
use crate::session::UserSession;
use crate::utils::InFlight;

use super::google::{build_client, fetch_user_data_from_google};

/// Google sign-in through a browser redirect (OAuth2 implicit grant).
pub struct RedirectOAuthAdapter {
    config: RedirectOAuthConfig,
    launcher: Arc<dyn RedirectLauncher>,
    client: reqwest::Client,
    in_flight: InFlight,
}

impl RedirectOAuthAdapter {
    pub fn new(
        config: RedirectOAuthConfig,
        launcher: Arc<dyn RedirectLauncher>,
    ) -> Result<Self, OAuth2Error> {
        Ok(Self {
            config,
            launcher,
            client: build_client()?,
            in_flight: InFlight::new(),
        })
    }

    /// True while a redirect session started by this adapter is open.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Authorization request URL handed to the launcher.
    pub fn authorization_url(&self) -> Result<String, OAuth2Error> {
        let url = url::Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", OAUTH2_RESPONSE_TYPE),
                ("scope", self.config.scope.as_str()),
            ],
        )
        .map_err(|e| OAuth2Error::Config(format!("Invalid authorization URL: {e}")))?;
        Ok(url.into())
    }

    /// Run one redirect session.
    ///
    /// `Ok(None)` when the session ends without success. A second call while
    /// one is open fails with `AlreadyInProgress` without touching the first.
    pub async fn sign_in(&self) -> Result<Option<UserSession>, SignInError> {
        let Some(_guard) = self.in_flight.try_acquire() else {
            tracing::warn!("Redirect sign-in already in progress");
            return Err(SignInError::AlreadyInProgress);
        };

        let auth_url = self.authorization_url()?;
        tracing::debug!("Auth URL: {:#?}", auth_url);

        let outcome = self.launcher.launch(&auth_url).await?;
        if !outcome.is_success() {
            tracing::info!(
                "Redirect session ended without a grant: {}",
                outcome.outcome_type
            );
            return Ok(None);
        }

        let access_token = outcome
            .params
            .get("access_token")
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                OAuth2Error::Provider("Redirect succeeded without an access token".to_string())
            })?;

        let user_info =
            fetch_user_data_from_google(&self.client, &self.config.userinfo_url, access_token)
                .await?;
        let user = UserSession::try_from(user_info)?;

        tracing::debug!("User data: {:#?}", user);
        Ok(Some(user))
    }
}

#[async_trait]
impl SignInAdapter for RedirectOAuthAdapter {
    async fn sign_in(&self) -> Result<Option<UserSession>, SignInError> {
        RedirectOAuthAdapter::sign_in(self).await
    }
}
