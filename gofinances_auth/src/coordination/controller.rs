use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{OnceCell, watch};

use super::errors::SignInError;
use super::types::{SignInAdapter, SignInOutcome, SignInProvider};
use crate::session::{AuthState, SESSION_STORAGE_KEY, SessionSnapshot, SessionState, UserSession};
use crate::storage::{SessionStore, StorageError};

/// Owner of the authoritative session state.
///
/// Every transition of [`AuthState`] happens here. State is published through a
/// `watch` channel before the transitioning call returns.
pub struct SessionController {
    store: Arc<dyn SessionStore>,
    google: Arc<dyn SignInAdapter>,
    apple: Arc<dyn SignInAdapter>,
    storage_key: String,
    state: watch::Sender<SessionSnapshot>,
    restored: OnceCell<()>,
    pending_sign_ins: AtomicUsize,
}

impl SessionController {
    /// Controller in the `Restoring` state. Call [`restore`](Self::restore) to leave it.
    pub fn new(
        store: Arc<dyn SessionStore>,
        google: Arc<dyn SignInAdapter>,
        apple: Arc<dyn SignInAdapter>,
    ) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::restoring());
        Self {
            store,
            google,
            apple,
            storage_key: SESSION_STORAGE_KEY.clone(),
            state,
            restored: OnceCell::new(),
            pending_sign_ins: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn auth_state(&self) -> AuthState {
        self.state.borrow().auth_state()
    }

    pub fn user(&self) -> Option<UserSession> {
        self.state.borrow().user().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Load the persisted session, once per controller.
    ///
    /// Later and concurrent calls wait for the first run and do nothing else.
    /// Never fails: unreadable or malformed records resolve to `Anonymous`.
    pub async fn restore(&self) {
        self.restored
            .get_or_init(|| self.load_persisted_session())
            .await;
    }

    async fn load_persisted_session(&self) {
        let restored = match self.store.get(&self.storage_key).await {
            Ok(Some(record)) => match UserSession::from_record(&record) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Discarding persisted session: {}", e);
                    None
                }
            },
            Ok(None) => {
                tracing::debug!("No persisted session under {}", self.storage_key);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to read persisted session: {}", e);
                None
            }
        };

        self.state.send_if_modified(|snapshot| {
            if snapshot.state != SessionState::Restoring {
                // An explicit sign-in or sign-out already resolved the state.
                tracing::debug!("Restore finished after state was already resolved");
                return false;
            }
            snapshot.state = match restored {
                Some(user) => {
                    tracing::info!("Restored session for user id: {}", user.id);
                    SessionState::Authenticated(user)
                }
                None => {
                    tracing::info!("No session restored, user is anonymous");
                    SessionState::Anonymous
                }
            };
            true
        });
    }

    /// Run the named provider's sign-in and apply its result.
    ///
    /// Resolves to exactly one of: new session applied, nothing changed, or an
    /// error with the state left as it was.
    pub async fn sign_in(&self, provider: SignInProvider) -> Result<SignInOutcome, SignInError> {
        let adapter = match provider {
            SignInProvider::Google => &self.google,
            SignInProvider::Apple => &self.apple,
        };

        tracing::debug!("Starting {} sign-in", provider.as_str());
        let _pending = PendingSignIn::enter(self);

        let user = match adapter.sign_in().await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::info!("{} sign-in produced no session", provider.as_str());
                return Ok(SignInOutcome::Unchanged);
            }
            Err(e) => {
                tracing::error!("{} sign-in failed: {}", provider.as_str(), e);
                return Err(e);
            }
        };

        if !user.is_valid() {
            tracing::error!("{} sign-in returned a session without id", provider.as_str());
            return Err(SignInError::IncompleteCredential("id".to_string()));
        }

        self.persist(&user).await?;

        tracing::info!(
            "{} sign-in succeeded for user id: {}",
            provider.as_str(),
            user.id
        );
        self.state.send_modify(|snapshot| {
            snapshot.state = SessionState::Authenticated(user);
        });

        Ok(SignInOutcome::Applied)
    }

    async fn persist(&self, user: &UserSession) -> Result<(), SignInError> {
        let record = user
            .to_record()
            .map_err(|e| StorageError::Storage(format!("Failed to serialize session: {e}")))?;

        self.store
            .set(&self.storage_key, &record)
            .await
            .map_err(|e| {
                tracing::error!("Failed to persist session: {}", e);
                SignInError::from(e)
            })
    }

    /// Forget the session. Always ends `Anonymous`, even if the store fails.
    pub async fn sign_out(&self) {
        if let Err(e) = self.store.remove(&self.storage_key).await {
            tracing::warn!("Failed to remove persisted session: {}", e);
        }

        self.state.send_if_modified(|snapshot| {
            if snapshot.state == SessionState::Anonymous {
                return false;
            }
            tracing::info!("Signed out");
            snapshot.state = SessionState::Anonymous;
            true
        });
    }
}

/// Counts running sign-ins into `sign_in_pending`.
struct PendingSignIn<'a> {
    controller: &'a SessionController,
}

impl<'a> PendingSignIn<'a> {
    fn enter(controller: &'a SessionController) -> Self {
        controller.pending_sign_ins.fetch_add(1, Ordering::AcqRel);
        controller.state.send_if_modified(|snapshot| {
            let changed = !snapshot.sign_in_pending;
            snapshot.sign_in_pending = true;
            changed
        });
        Self { controller }
    }
}

impl Drop for PendingSignIn<'_> {
    fn drop(&mut self) {
        let remaining = self
            .controller
            .pending_sign_ins
            .fetch_sub(1, Ordering::AcqRel)
            - 1;
        self.controller.state.send_if_modified(|snapshot| {
            let pending = remaining > 0;
            let changed = snapshot.sign_in_pending != pending;
            snapshot.sign_in_pending = pending;
            changed
        });
    }
}
