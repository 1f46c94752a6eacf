use async_trait::async_trait;

use super::errors::SignInError;
use crate::session::UserSession;

/// One identity provider's sign-in protocol.
///
/// `Ok(None)` means the flow ended without producing a session (the user
/// closed the browser, for instance); callers leave their state untouched.
#[async_trait]
pub trait SignInAdapter: Send + Sync + 'static {
    async fn sign_in(&self) -> Result<Option<UserSession>, SignInError>;
}

/// Which adapter a sign-in goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInProvider {
    Google,
    Apple,
}

impl SignInProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Apple => "apple",
        }
    }
}

/// Resolution of a sign-in that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    /// A new session was persisted and published
    Applied,
    /// The provider produced no session; nothing changed
    Unchanged,
}
