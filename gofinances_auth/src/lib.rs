//! gofinances_auth - Sign-in and session state for the gofinances app
//!
//! This crate authenticates a user with Google (browser-redirect OAuth2 implicit grant)
//! or Apple (platform-native credential), keeps one `UserSession` persisted across
//! restarts, and publishes the session state to every consumer through a
//! [`SessionContext`].

mod config;
mod coordination;
mod native;
mod oauth2;
mod session;
mod storage;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::SESSION_STORAGE_NAMESPACE;

pub use coordination::{
    SessionContext, SessionController, SessionSubscriber, SignInAdapter, SignInError,
    SignInOutcome, SignInProvider,
};

pub use native::{
    CredentialError, CredentialProvider, CredentialScope, FullName, NativeCredential,
    NativeSignInAdapter, UnsupportedPlatformProvider,
};

pub use oauth2::{
    OAuth2Error, REDIRECT_SUCCESS, RedirectLauncher, RedirectOAuthAdapter, RedirectOAuthConfig,
    RedirectOutcome,
};

pub use session::{AuthState, SESSION_STORAGE_KEY, SessionSnapshot, SessionState, UserSession};

pub use storage::{
    FileSessionStore, InMemorySessionStore, RedisSessionStore, SessionStore, StorageError,
    build_session_store, session_store_from_env,
};
