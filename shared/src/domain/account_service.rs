use log::{error, info};
use std::rc::Rc;

use crate::error::{DashboardError, Result};
use crate::models::{AccountProfile, ClientId, UserUpdate};
use crate::session::SessionHub;
use crate::storage::TenantStore;

use super::auth_service::AuthService;

pub const PROFILE_UPDATED: &str = "Profile updated successfully!";
pub const PASSWORD_UPDATED: &str = "Password updated successfully!";
pub const EMAIL_CONFIRMATION_SENT: &str = "Confirmation email sent. Please check your inbox!";

pub const EMPTY_BUSINESS_NAME: &str = "Business name cannot be empty.";
pub const EMPTY_PASSWORD: &str = "New password cannot be empty.";
pub const PASSWORD_MISMATCH: &str = "New passwords do not match!";
pub const EMPTY_EMAIL: &str = "Email cannot be empty.";

/// Account page operations: tenant profile plus auth credentials.
///
/// Errors from [`AccountService::load`] are meant to be shown with their
/// `Display` text, which names the failing query.
#[derive(Clone)]
pub struct AccountService {
    store: Rc<dyn TenantStore>,
    auth: AuthService,
}

impl AccountService {
    pub fn new(store: Rc<dyn TenantStore>, auth: AuthService) -> Self {
        Self { store, auth }
    }

    fn hub(&self) -> &SessionHub {
        self.auth.hub()
    }

    pub async fn load(&self) -> Result<AccountProfile> {
        let result = self.load_profile().await;
        if let Err(e) = &result {
            error!("Account data loading error: {}", e);
        }
        result
    }

    async fn load_profile(&self) -> Result<AccountProfile> {
        let session = self.hub().current().ok_or(DashboardError::NotLoggedIn)?;

        let client_id = self
            .store
            .find_client_id(&session.user.id)
            .await
            .map_err(|e| e.during("User query"))?
            .ok_or(DashboardError::MappingMissing)?;

        let client = self
            .store
            .find_client(&client_id)
            .await
            .map_err(|e| e.during("Client query"))?
            .ok_or(DashboardError::ClientNotFound)?;

        Ok(AccountProfile {
            client_id,
            business_name: client.name.unwrap_or_default(),
        })
    }

    /// Returns the stored (trimmed) name
    pub async fn update_business_name(&self, client_id: &ClientId, name: &str) -> Result<String> {
        if self.hub().current().is_none() {
            return Err(DashboardError::NotLoggedIn);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(DashboardError::validation(EMPTY_BUSINESS_NAME));
        }

        info!("Updating business name for client {}", client_id);
        self.store.update_client_name(client_id, name).await?;
        Ok(name.to_string())
    }

    pub async fn change_password(&self, new_password: &str, confirmation: &str) -> Result<()> {
        if new_password.is_empty() {
            return Err(DashboardError::validation(EMPTY_PASSWORD));
        }
        if new_password != confirmation {
            return Err(DashboardError::validation(PASSWORD_MISMATCH));
        }

        self.auth
            .update_user(&UserUpdate {
                password: Some(new_password.to_string()),
                ..UserUpdate::default()
            })
            .await?;
        Ok(())
    }

    /// Starts the confirmation flow; the address changes once confirmed
    pub async fn change_email(&self, new_email: &str) -> Result<()> {
        let new_email = new_email.trim();
        if new_email.is_empty() {
            return Err(DashboardError::validation(EMPTY_EMAIL));
        }

        self.auth
            .update_user(&UserUpdate {
                email: Some(new_email.to_string()),
                ..UserUpdate::default()
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::{test_session, MemoryAuth, MemoryStore};

    struct Fixture {
        store: Rc<MemoryStore>,
        auth: Rc<MemoryAuth>,
        service: AccountService,
    }

    fn fixture(store: MemoryStore) -> Fixture {
        let store = Rc::new(store);
        let auth = Rc::new(MemoryAuth::with_account("a@example.com", "secret"));
        let hub = SessionHub::new(Some(test_session("a@example.com")));
        let service = AccountService::new(store.clone(), AuthService::new(auth.clone(), hub));
        Fixture { store, auth, service }
    }

    fn tenant() -> MemoryStore {
        MemoryStore::with_tenant("user-a@example.com", ClientId::from("c-1"), "Acme")
    }

    #[tokio::test]
    async fn test_load_profile() {
        let f = fixture(tenant());
        let profile = f.service.load().await.unwrap();
        assert_eq!(profile.client_id, ClientId::from("c-1"));
        assert_eq!(profile.business_name, "Acme");
    }

    #[tokio::test]
    async fn test_load_distinguishes_missing_rows() {
        let f = fixture(MemoryStore::new());
        assert_eq!(f.service.load().await, Err(DashboardError::MappingMissing));

        let store = MemoryStore::new();
        store
            .users
            .borrow_mut()
            .insert("user-a@example.com".to_string(), Some(ClientId::Number(3)));
        let f = fixture(store);
        assert_eq!(f.service.load().await, Err(DashboardError::ClientNotFound));
    }

    #[tokio::test]
    async fn test_load_names_failing_query() {
        let f = fixture(tenant());
        f.store.fail_next(DashboardError::backend("Fetch", "JWT expired"));
        let err = f.service.load().await.unwrap_err();
        assert_eq!(err.to_string(), "User query failed: JWT expired");
    }

    #[tokio::test]
    async fn test_update_business_name_validates_and_trims() {
        let f = fixture(tenant());
        let id = ClientId::from("c-1");
        let err = f.service.update_business_name(&id, "   ").await.unwrap_err();
        assert_eq!(err.user_message(), EMPTY_BUSINESS_NAME);
        assert_eq!(f.store.call_count(), 0);

        let stored = f.service.update_business_name(&id, "  New Name ").await.unwrap();
        assert_eq!(stored, "New Name");
        assert_eq!(
            f.store.clients.borrow().get(&id).and_then(|c| c.name.clone()).as_deref(),
            Some("New Name")
        );
    }

    #[tokio::test]
    async fn test_change_password_validation() {
        let f = fixture(tenant());
        let err = f.service.change_password("", "").await.unwrap_err();
        assert_eq!(err.user_message(), EMPTY_PASSWORD);
        let err = f.service.change_password("abc", "abd").await.unwrap_err();
        assert_eq!(err.user_message(), PASSWORD_MISMATCH);
        assert_eq!(f.auth.call_count(), 0);

        f.service.change_password("abc", "abc").await.unwrap();
        assert_eq!(f.auth.accounts.borrow().get("a@example.com").map(String::as_str), Some("abc"));
    }

    #[tokio::test]
    async fn test_change_email() {
        let f = fixture(tenant());
        let err = f.service.change_email(" ").await.unwrap_err();
        assert_eq!(err.user_message(), EMPTY_EMAIL);
        assert_eq!(f.auth.call_count(), 0);

        f.service.change_email("b@example.com").await.unwrap();
        assert_eq!(f.auth.calls.borrow().as_slice(), &["update_user"]);
    }

    #[tokio::test]
    async fn test_change_email_surfaces_auth_error() {
        let f = fixture(tenant());
        f.auth.fail_next(DashboardError::backend("Update user", "Email rate limit exceeded"));
        let err = f.service.change_email("b@example.com").await.unwrap_err();
        assert_eq!(err.user_message(), "Email rate limit exceeded");
    }
}
