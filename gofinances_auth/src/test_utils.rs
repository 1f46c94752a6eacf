//! Test utilities shared by the unit tests across the crate
//!
//! Scripted stand-ins for the external collaborators: the browser redirect
//! launcher, the platform credential API, sign-in adapters, and stores that
//! fail or hold reads back.

use async_trait::async_trait;
use std::sync::{Mutex, Once};
use tokio::sync::{Notify, Semaphore};

use crate::coordination::{SignInAdapter, SignInError};
use crate::native::{
    CredentialError, CredentialProvider, CredentialScope, FullName, NativeCredential,
};
use crate::oauth2::{OAuth2Error, RedirectLauncher, RedirectOutcome};
use crate::session::UserSession;
use crate::storage::{InMemorySessionStore, SessionStore, StorageError};

/// Load `.env_test` (falling back to `.env`) once per test binary.
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
    });
}

pub fn sample_user() -> UserSession {
    UserSession {
        id: "108".to_string(),
        email: "ana@example.com".to_string(),
        name: "Ana Souza".to_string(),
        given_name: "Ana".to_string(),
        family_name: "Souza".to_string(),
        picture: "https://example.com/ana.png".to_string(),
    }
}

pub fn stored_record(user: &UserSession) -> String {
    user.to_record().expect("UserSession always serializes")
}

pub fn full_credential() -> NativeCredential {
    NativeCredential {
        authorization_code: Some("c1a2b3".to_string()),
        email: Some("ana@privaterelay.appleid.com".to_string()),
        full_name: Some(FullName {
            given_name: Some("Ana".to_string()),
            family_name: Some("Souza".to_string()),
        }),
    }
}

/// Store whose medium is always unavailable.
pub struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Storage("medium unavailable".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Storage("medium unavailable".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Storage("medium unavailable".to_string()))
    }
}

/// In-memory store whose reads wait until [`GatedStore::open`] is called.
pub struct GatedStore {
    pub inner: InMemorySessionStore,
    gate: Semaphore,
}

impl GatedStore {
    pub fn new() -> Self {
        Self {
            inner: InMemorySessionStore::new(),
            gate: Semaphore::new(0),
        }
    }

    pub fn open(&self) {
        self.gate.add_permits(1024);
    }
}

#[async_trait]
impl SessionStore for GatedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| StorageError::Storage(e.to_string()))?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

/// Adapter that answers every sign-in with the same result.
pub struct ScriptedAdapter {
    result: Result<Option<UserSession>, SignInError>,
}

impl ScriptedAdapter {
    pub fn session(user: UserSession) -> Self {
        Self {
            result: Ok(Some(user)),
        }
    }

    pub fn no_session() -> Self {
        Self { result: Ok(None) }
    }

    pub fn failing(err: SignInError) -> Self {
        Self { result: Err(err) }
    }
}

#[async_trait]
impl SignInAdapter for ScriptedAdapter {
    async fn sign_in(&self) -> Result<Option<UserSession>, SignInError> {
        self.result.clone()
    }
}

/// Launcher that records the URLs it was given and returns a fixed outcome.
///
/// A gated launcher keeps each session open until [`ScriptedLauncher::release`].
pub struct ScriptedLauncher {
    result: Result<RedirectOutcome, OAuth2Error>,
    launched: Mutex<Vec<String>>,
    launched_notify: Notify,
    gate: Option<Semaphore>,
}

impl ScriptedLauncher {
    fn build(result: Result<RedirectOutcome, OAuth2Error>, gate: Option<Semaphore>) -> Self {
        Self {
            result,
            launched: Mutex::new(Vec::new()),
            launched_notify: Notify::new(),
            gate,
        }
    }

    pub fn returning(outcome: RedirectOutcome) -> Self {
        Self::build(Ok(outcome), None)
    }

    pub fn failing(err: OAuth2Error) -> Self {
        Self::build(Err(err), None)
    }

    pub fn gated(outcome: RedirectOutcome) -> Self {
        Self::build(Ok(outcome), Some(Semaphore::new(0)))
    }

    pub fn launched_urls(&self) -> Vec<String> {
        self.launched.lock().unwrap().clone()
    }

    pub async fn wait_until_launched(&self) {
        if !self.launched_urls().is_empty() {
            return;
        }
        self.launched_notify.notified().await;
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }
}

#[async_trait]
impl RedirectLauncher for ScriptedLauncher {
    async fn launch(&self, auth_url: &str) -> Result<RedirectOutcome, OAuth2Error> {
        self.launched.lock().unwrap().push(auth_url.to_string());
        self.launched_notify.notify_one();

        if let Some(gate) = &self.gate {
            let _permit = gate
                .acquire()
                .await
                .map_err(|e| OAuth2Error::Provider(e.to_string()))?;
        }

        self.result.clone()
    }
}

/// Credential provider that records requested scopes and returns a fixed result.
pub struct ScriptedCredentialProvider {
    result: Result<NativeCredential, CredentialError>,
    requested: Mutex<Vec<Vec<CredentialScope>>>,
}

impl ScriptedCredentialProvider {
    pub fn returning(result: Result<NativeCredential, CredentialError>) -> Self {
        Self {
            result,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_scopes(&self) -> Vec<Vec<CredentialScope>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialProvider for ScriptedCredentialProvider {
    async fn request_credential(
        &self,
        scopes: &[CredentialScope],
    ) -> Result<NativeCredential, CredentialError> {
        self.requested.lock().unwrap().push(scopes.to_vec());
        self.result.clone()
    }
}
