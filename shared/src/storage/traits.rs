//! # Storage Traits
//!
//! The hosted store enforces row-level security, so every method runs with
//! the signed-in user's credentials and a row the user may not see looks the
//! same as a missing row: `Ok(None)`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    AuthUser, Client, ClientId, ClientSettingsRow, Contact, Session, SettingsPatch, SignInRequest,
    UserUpdate,
};

/// Tenant-scoped tables: `users`, `clients`, `client_settings`, `contacts`
#[async_trait(?Send)]
pub trait TenantStore {
    /// Tenant of an auth identity; `None` when the mapping row is missing,
    /// hidden, or has a null `client_id`
    async fn find_client_id(&self, auth_user_id: &str) -> Result<Option<ClientId>>;

    async fn find_client(&self, client_id: &ClientId) -> Result<Option<Client>>;

    async fn update_client_name(&self, client_id: &ClientId, name: &str) -> Result<()>;

    async fn find_settings(&self, client_id: &ClientId) -> Result<Option<ClientSettingsRow>>;

    async fn insert_settings(&self, row: &ClientSettingsRow) -> Result<()>;

    async fn update_settings(&self, client_id: &ClientId, patch: &SettingsPatch) -> Result<()>;

    /// Anonymous insert; works without a session
    async fn insert_contact(&self, contact: &Contact) -> Result<()>;
}

/// Password authentication against the hosted auth service
#[async_trait(?Send)]
pub trait AuthGateway {
    async fn sign_in_with_password(&self, request: &SignInRequest) -> Result<Session>;

    async fn sign_out(&self, session: &Session) -> Result<()>;

    /// Change email or password of the session's user
    async fn update_user(&self, session: &Session, update: &UserUpdate) -> Result<AuthUser>;
}
