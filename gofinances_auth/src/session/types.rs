use serde::{Deserialize, Serialize};

/// The authenticated identity, held in memory and persisted as JSON.
///
/// Fields a provider does not supply stay empty. The value is replaced
/// wholesale on every sign-in, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSession {
    pub id: String,
    pub email: String,
    pub name: String,
    pub given_name: String,
    pub family_name: String,
    pub picture: String,
}

impl UserSession {
    /// A session must at least identify the user.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
    }

    /// Serialize into the persisted record format.
    pub fn to_record(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a persisted record. Records without an id are rejected.
    pub fn from_record(record: &str) -> Result<Self, String> {
        let user: Self = serde_json::from_str(record)
            .map_err(|e| format!("Failed to deserialize session record: {e}"))?;
        if !user.is_valid() {
            return Err("Session record has no id".to_string());
        }
        Ok(user)
    }
}

/// Overall status of the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Restoring,
    Anonymous,
    Authenticated,
}

/// Controller state. The user exists only in the `Authenticated` variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Restoring,
    Anonymous,
    Authenticated(UserSession),
}

impl SessionState {
    pub fn auth_state(&self) -> AuthState {
        match self {
            Self::Restoring => AuthState::Restoring,
            Self::Anonymous => AuthState::Anonymous,
            Self::Authenticated(_) => AuthState::Authenticated,
        }
    }

    pub fn user(&self) -> Option<&UserSession> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// What every subscriber sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    /// True while at least one explicit sign-in is running.
    pub sign_in_pending: bool,
}

impl SessionSnapshot {
    pub(crate) fn restoring() -> Self {
        Self {
            state: SessionState::Restoring,
            sign_in_pending: false,
        }
    }

    pub fn auth_state(&self) -> AuthState {
        self.state.auth_state()
    }

    pub fn user(&self) -> Option<&UserSession> {
        self.state.user()
    }

    /// True exactly while the persisted session is being restored.
    pub fn login_loading(&self) -> bool {
        self.state == SessionState::Restoring
    }
}
