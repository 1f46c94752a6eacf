use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::OAuth2Error;
use crate::session::UserSession;

/// Outcome type reported by a redirect session that completed the grant.
pub const REDIRECT_SUCCESS: &str = "success";

/// Terminal result of an external redirect session.
///
/// `outcome_type` is `"success"` when the provider redirected back with a
/// grant; anything else ("cancel", "dismiss", "error", ...) means no session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectOutcome {
    #[serde(rename = "type")]
    pub outcome_type: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl RedirectOutcome {
    pub fn success(params: HashMap<String, String>) -> Self {
        Self {
            outcome_type: REDIRECT_SUCCESS.to_string(),
            params,
        }
    }

    pub fn with_type(outcome_type: impl Into<String>) -> Self {
        Self {
            outcome_type: outcome_type.into(),
            params: HashMap::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome_type == REDIRECT_SUCCESS
    }

    /// Classify the URL the provider redirected the browser to.
    ///
    /// Implicit-grant parameters arrive in the fragment; query parameters are
    /// merged in as well. An empty input is a dismissed session.
    pub fn from_redirect_url(redirect_url: &str) -> Self {
        let redirect_url = redirect_url.trim();
        if redirect_url.is_empty() {
            return Self::with_type("dismiss");
        }

        let parsed = match url::Url::parse(redirect_url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Unparseable redirect URL: {}", e);
                let mut outcome = Self::with_type("error");
                outcome
                    .params
                    .insert("error".to_string(), "invalid_redirect_url".to_string());
                return outcome;
            }
        };

        let mut params: HashMap<String, String> = parsed.query_pairs().into_owned().collect();
        if let Some(fragment) = parsed.fragment() {
            params.extend(url::form_urlencoded::parse(fragment.as_bytes()).into_owned());
        }

        let outcome_type = if params.contains_key("error") {
            "error"
        } else if params.contains_key("access_token") {
            REDIRECT_SUCCESS
        } else {
            "dismiss"
        };

        Self {
            outcome_type: outcome_type.to_string(),
            params,
        }
    }
}

/// Drives the user-facing browser session for an authorization URL.
///
/// Suspends until the session reports exactly one terminal outcome. There is
/// no timeout: control returns only when the external session does.
#[async_trait]
pub trait RedirectLauncher: Send + Sync + 'static {
    async fn launch(&self, auth_url: &str) -> Result<RedirectOutcome, OAuth2Error>;
}

// The user data we'll get back from Google
#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct GoogleUserInfo {
    pub(super) id: Option<String>,
    pub(super) email: Option<String>,
    pub(super) name: Option<String>,
    pub(super) given_name: Option<String>,
    pub(super) family_name: Option<String>,
    pub(super) picture: Option<String>,
}

impl TryFrom<GoogleUserInfo> for UserSession {
    type Error = OAuth2Error;

    fn try_from(info: GoogleUserInfo) -> Result<Self, Self::Error> {
        let id = info
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| OAuth2Error::Provider("Userinfo response has no id".to_string()))?;

        Ok(Self {
            id,
            email: info.email.unwrap_or_default(),
            name: info.name.unwrap_or_default(),
            given_name: info.given_name.unwrap_or_default(),
            family_name: info.family_name.unwrap_or_default(),
            picture: info.picture.unwrap_or_default(),
        })
    }
}
