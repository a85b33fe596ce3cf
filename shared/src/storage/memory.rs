//! In-memory backends for service tests.
//!
//! Both record every call so tests can assert that validation failures never
//! reach the backend, and both can be told to fail the next call.

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{DashboardError, Result};
use crate::models::{
    AuthUser, Client, ClientId, ClientSettingsRow, Contact, Session, SettingsPatch, SignInRequest,
    UserUpdate,
};

use super::traits::{AuthGateway, TenantStore};

#[derive(Default)]
pub struct MemoryStore {
    pub users: RefCell<HashMap<String, Option<ClientId>>>,
    pub clients: RefCell<HashMap<ClientId, Client>>,
    pub settings: RefCell<HashMap<ClientId, ClientSettingsRow>>,
    pub contacts: RefCell<Vec<Contact>>,
    pub calls: RefCell<Vec<&'static str>>,
    fail_next: RefCell<Option<DashboardError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with one auth user mapped to one named client
    pub fn with_tenant(auth_user_id: &str, client_id: ClientId, name: &str) -> Self {
        let store = Self::new();
        store
            .users
            .borrow_mut()
            .insert(auth_user_id.to_string(), Some(client_id.clone()));
        store.clients.borrow_mut().insert(
            client_id.clone(),
            Client {
                id: client_id,
                name: Some(name.to_string()),
            },
        );
        store
    }

    pub fn fail_next(&self, error: DashboardError) {
        *self.fail_next.borrow_mut() = Some(error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn enter(&self, call: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(call);
        match self.fail_next.borrow_mut().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl TenantStore for MemoryStore {
    async fn find_client_id(&self, auth_user_id: &str) -> Result<Option<ClientId>> {
        self.enter("find_client_id")?;
        Ok(self.users.borrow().get(auth_user_id).cloned().flatten())
    }

    async fn find_client(&self, client_id: &ClientId) -> Result<Option<Client>> {
        self.enter("find_client")?;
        Ok(self.clients.borrow().get(client_id).cloned())
    }

    async fn update_client_name(&self, client_id: &ClientId, name: &str) -> Result<()> {
        self.enter("update_client_name")?;
        if let Some(client) = self.clients.borrow_mut().get_mut(client_id) {
            client.name = Some(name.to_string());
        }
        Ok(())
    }

    async fn find_settings(&self, client_id: &ClientId) -> Result<Option<ClientSettingsRow>> {
        self.enter("find_settings")?;
        Ok(self.settings.borrow().get(client_id).cloned())
    }

    async fn insert_settings(&self, row: &ClientSettingsRow) -> Result<()> {
        self.enter("insert_settings")?;
        self.settings
            .borrow_mut()
            .insert(row.client_id.clone(), row.clone());
        Ok(())
    }

    async fn update_settings(&self, client_id: &ClientId, patch: &SettingsPatch) -> Result<()> {
        self.enter("update_settings")?;
        if let Some(row) = self.settings.borrow_mut().get_mut(client_id) {
            patch.apply_to(row);
        }
        Ok(())
    }

    async fn insert_contact(&self, contact: &Contact) -> Result<()> {
        self.enter("insert_contact")?;
        self.contacts.borrow_mut().push(contact.clone());
        Ok(())
    }
}

/// Accounts keyed by email; every account's user id is `user-{email}`
#[derive(Default)]
pub struct MemoryAuth {
    pub accounts: RefCell<HashMap<String, String>>,
    pub calls: RefCell<Vec<&'static str>>,
    fail_next: RefCell<Option<DashboardError>>,
}

impl MemoryAuth {
    pub fn with_account(email: &str, password: &str) -> Self {
        let auth = Self::default();
        auth.accounts
            .borrow_mut()
            .insert(email.to_string(), password.to_string());
        auth
    }

    pub fn fail_next(&self, error: DashboardError) {
        *self.fail_next.borrow_mut() = Some(error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    fn enter(&self, call: &'static str) -> Result<()> {
        self.calls.borrow_mut().push(call);
        match self.fail_next.borrow_mut().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

pub fn test_session(email: &str) -> Session {
    Session {
        access_token: format!("token-{}", email),
        token_type: Some("bearer".to_string()),
        refresh_token: None,
        expires_at: None,
        user: AuthUser {
            id: format!("user-{}", email),
            email: Some(email.to_string()),
            last_sign_in_at: Some("2025-10-16T08:00:00Z".to_string()),
        },
    }
}

#[async_trait(?Send)]
impl AuthGateway for MemoryAuth {
    async fn sign_in_with_password(&self, request: &SignInRequest) -> Result<Session> {
        self.enter("sign_in_with_password")?;
        match self.accounts.borrow().get(&request.email) {
            Some(password) if *password == request.password => Ok(test_session(&request.email)),
            _ => Err(DashboardError::backend("Sign in", "Invalid login credentials")),
        }
    }

    async fn sign_out(&self, _session: &Session) -> Result<()> {
        self.enter("sign_out")
    }

    async fn update_user(&self, session: &Session, update: &UserUpdate) -> Result<AuthUser> {
        self.enter("update_user")?;
        let user = session.user.clone();
        if let Some(password) = &update.password {
            if let Some(email) = &user.email {
                self.accounts
                    .borrow_mut()
                    .insert(email.clone(), password.clone());
            }
        }
        if let Some(email) = &update.email {
            // Email changes wait for confirmation; the user is returned unchanged
            log::debug!("Confirmation requested for {}", email);
        }
        Ok(user)
    }
}
