use std::sync::Arc;
use tokio::sync::watch;

use super::controller::SessionController;
use super::errors::SignInError;
use super::types::SignInProvider;
use crate::session::{SessionSnapshot, UserSession};

/// Consumer-facing view of the session: current user, loading flag and the
/// sign-in/sign-out operations.
///
/// Cheap to clone; every clone shares one controller. Reads made after an
/// operation's future resolves observe that operation's result.
#[derive(Clone)]
pub struct SessionContext {
    controller: Arc<SessionController>,
}

impl SessionContext {
    /// Wrap `controller` and start restoring the persisted session in the background.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(controller: Arc<SessionController>) -> Self {
        let restoring = controller.clone();
        tokio::spawn(async move {
            restoring.restore().await;
        });
        Self { controller }
    }

    /// Wait until the initial restore has resolved.
    pub async fn ready(&self) {
        self.controller.restore().await;
    }

    pub fn controller(&self) -> &Arc<SessionController> {
        &self.controller
    }

    pub fn user(&self) -> Option<UserSession> {
        self.controller.user()
    }

    pub fn login_loading(&self) -> bool {
        self.controller.snapshot().login_loading()
    }

    pub fn sign_in_pending(&self) -> bool {
        self.controller.snapshot().sign_in_pending
    }

    pub async fn sign_in_with_google(&self) -> Result<(), SignInError> {
        self.controller.sign_in(SignInProvider::Google).await?;
        Ok(())
    }

    pub async fn sign_in_with_apple(&self) -> Result<(), SignInError> {
        self.controller.sign_in(SignInProvider::Apple).await?;
        Ok(())
    }

    pub async fn sign_out(&self) -> Result<(), SignInError> {
        self.controller.sign_out().await;
        Ok(())
    }

    pub fn subscribe(&self) -> SessionSubscriber {
        SessionSubscriber {
            rx: self.controller.subscribe(),
        }
    }
}

/// Change feed over the session snapshot.
pub struct SessionSubscriber {
    rx: watch::Receiver<SessionSnapshot>,
}

impl SessionSubscriber {
    pub fn current(&self) -> SessionSnapshot {
        self.rx.borrow().clone()
    }

    /// Wait for the next published change. `None` once the controller is gone.
    pub async fn changed(&mut self) -> Option<SessionSnapshot> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}
