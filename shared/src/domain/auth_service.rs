use log::{info, warn};
use std::rc::Rc;

use crate::error::{DashboardError, Result};
use crate::models::{AuthUser, Session, SignInRequest, UserUpdate};
use crate::session::{AuthEvent, SessionHub};
use crate::storage::AuthGateway;

pub const MISSING_CREDENTIALS: &str = "Please enter both email and password.";

/// Sign-in, sign-out and credential changes; every change is published on
/// the session hub
#[derive(Clone)]
pub struct AuthService {
    gateway: Rc<dyn AuthGateway>,
    hub: SessionHub,
}

impl AuthService {
    pub fn new(gateway: Rc<dyn AuthGateway>, hub: SessionHub) -> Self {
        Self { gateway, hub }
    }

    pub fn hub(&self) -> &SessionHub {
        &self.hub
    }

    pub fn current_session(&self) -> Option<Session> {
        self.hub.current()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DashboardError::validation(MISSING_CREDENTIALS));
        }

        info!("Signing in {}", email);
        let session = self
            .gateway
            .sign_in_with_password(&SignInRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        info!("Signed in user {}", session.user.id);
        self.hub.publish(AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    /// Always ends signed out locally, even if the remote revoke fails
    pub async fn sign_out(&self) {
        if let Some(session) = self.hub.current() {
            if let Err(e) = self.gateway.sign_out(&session).await {
                warn!("Remote sign-out failed: {}", e);
            }
        }
        info!("Signed out");
        self.hub.publish(AuthEvent::SignedOut);
    }

    pub async fn update_user(&self, update: &UserUpdate) -> Result<AuthUser> {
        let session = self.hub.current().ok_or(DashboardError::NotLoggedIn)?;
        let user = self.gateway.update_user(&session, update).await?;

        info!("Updated auth user {}", user.id);
        self.hub.publish(AuthEvent::UserUpdated(Session {
            user: user.clone(),
            ..session
        }));
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryAuth;

    fn service() -> (Rc<MemoryAuth>, AuthService) {
        let auth = Rc::new(MemoryAuth::with_account("a@example.com", "secret"));
        let service = AuthService::new(auth.clone(), SessionHub::new(None));
        (auth, service)
    }

    #[tokio::test]
    async fn test_sign_in_requires_both_fields() {
        let (auth, service) = service();
        for (email, password) in [("", "secret"), ("a@example.com", ""), ("   ", "x")] {
            let err = service.sign_in(email, password).await.unwrap_err();
            assert_eq!(err.user_message(), MISSING_CREDENTIALS);
        }
        assert_eq!(auth.call_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_in_publishes_session() {
        let (_auth, service) = service();
        let session = service.sign_in(" a@example.com ", "secret").await.unwrap();
        assert_eq!(session.user.email.as_deref(), Some("a@example.com"));
        assert_eq!(service.current_session(), Some(session));
    }

    #[tokio::test]
    async fn test_bad_credentials_keep_signed_out() {
        let (_auth, service) = service();
        let err = service.sign_in("a@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid login credentials");
        assert!(service.current_session().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_clears_even_when_remote_fails() {
        let (auth, service) = service();
        service.sign_in("a@example.com", "secret").await.unwrap();
        auth.fail_next(DashboardError::backend("Sign out", "network down"));
        service.sign_out().await;
        assert!(service.current_session().is_none());
    }

    #[tokio::test]
    async fn test_update_user_requires_session() {
        let (auth, service) = service();
        let update = UserUpdate {
            password: Some("new".to_string()),
            ..UserUpdate::default()
        };
        assert_eq!(service.update_user(&update).await, Err(DashboardError::NotLoggedIn));

        service.sign_in("a@example.com", "secret").await.unwrap();
        service.update_user(&update).await.unwrap();
        assert_eq!(auth.accounts.borrow().get("a@example.com").map(String::as_str), Some("new"));
    }
}
