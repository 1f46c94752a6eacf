//! Orchestration of sign-in adapters and the session store
//!
//! [`SessionController`] owns the session state machine; [`SessionContext`]
//! publishes it to consumers.

mod context;
mod controller;
mod errors;
mod types;

pub use context::{SessionContext, SessionSubscriber};
pub use controller::SessionController;
pub use errors::SignInError;
pub use types::{SignInAdapter, SignInOutcome, SignInProvider};
