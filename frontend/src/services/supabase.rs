//! # Supabase client
//!
//! REST access to the hosted auth service (`/auth/v1`) and data store
//! (`/rest/v1`). Data requests carry the signed-in user's token so row-level
//! security applies; without a session they fall back to the anon key.

use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use shared::config::AppConfig;
use shared::error::{DashboardError, Result};
use shared::models::{
    ApiErrorBody, AuthUser, Client, ClientId, ClientSettingsRow, Contact, Session, SettingsPatch,
    SignInRequest, UserMapping, UserUpdate,
};
use shared::session::SessionHub;
use shared::storage::{AuthGateway, TenantStore};

#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    hub: SessionHub,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig, hub: SessionHub) -> Self {
        Self {
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            hub,
        }
    }

    fn rest_url(&self, table: &str, query: &str) -> String {
        format!("{}/rest/v1/{}?{}", self.base_url, table, query)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn with_headers(&self, builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let bearer = format!("Bearer {}", token.unwrap_or(&self.anon_key));
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", &bearer)
            .header("Content-Type", "application/json")
    }

    /// Requests to the data store use the current session's token
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.hub.current().map(|session| session.access_token);
        self.with_headers(builder, token.as_deref())
    }

    async fn send(operation: &str, request: Request) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| DashboardError::backend(operation, e.to_string()))?;

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|body| body.best_message())
            .unwrap_or_else(|| format!("HTTP {}", status));
        log::warn!("{} returned {}: {}", operation, status, message);
        Err(DashboardError::backend(operation, message))
    }

    fn json_request<T: Serialize>(operation: &str, builder: RequestBuilder, body: &T) -> Result<Request> {
        builder
            .json(body)
            .map_err(|e| DashboardError::backend(operation, e.to_string()))
    }

    fn empty_request(operation: &str, builder: RequestBuilder) -> Result<Request> {
        builder
            .build()
            .map_err(|e| DashboardError::backend(operation, e.to_string()))
    }

    async fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| DashboardError::backend(operation, e.to_string()))
    }

    /// `GET` returning at most one row
    async fn select_one<T: DeserializeOwned>(&self, operation: &str, table: &str, query: &str) -> Result<Option<T>> {
        let url = self.rest_url(table, &format!("{}&limit=1", query));
        let request = Self::empty_request(operation, self.authorized(Request::get(&url)))?;
        let response = Self::send(operation, request).await?;
        let rows: Vec<T> = Self::decode(operation, response).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert<T: Serialize>(&self, operation: &str, table: &str, row: &T) -> Result<()> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let builder = self
            .authorized(Request::post(&url))
            .header("Prefer", "return=minimal");
        Self::send(operation, Self::json_request(operation, builder, row)?).await?;
        Ok(())
    }

    async fn update<T: Serialize>(&self, operation: &str, table: &str, filter: &str, body: &T) -> Result<()> {
        let url = self.rest_url(table, filter);
        let builder = self
            .authorized(Request::patch(&url))
            .header("Prefer", "return=minimal");
        Self::send(operation, Self::json_request(operation, builder, body)?).await?;
        Ok(())
    }
}

/// Percent-encode one query or path component the way the browser does
pub fn encode_component(value: &str) -> String {
    js_sys::encode_uri_component(value).into()
}

/// PostgREST equality filter value
fn eq(value: &str) -> String {
    format!("eq.{}", encode_component(value))
}

#[async_trait(?Send)]
impl TenantStore for SupabaseClient {
    async fn find_client_id(&self, auth_user_id: &str) -> Result<Option<ClientId>> {
        let query = format!("select=client_id&auth_user_id={}", eq(auth_user_id));
        let mapping: Option<UserMapping> = self.select_one("User query", "users", &query).await?;
        Ok(mapping.and_then(|m| m.client_id))
    }

    async fn find_client(&self, client_id: &ClientId) -> Result<Option<Client>> {
        let query = format!("select=id,name&id={}", eq(&client_id.to_string()));
        self.select_one("Client query", "clients", &query).await
    }

    async fn update_client_name(&self, client_id: &ClientId, name: &str) -> Result<()> {
        let filter = format!("id={}", eq(&client_id.to_string()));
        self.update("Update client", "clients", &filter, &json!({ "name": name }))
            .await
    }

    async fn find_settings(&self, client_id: &ClientId) -> Result<Option<ClientSettingsRow>> {
        let query = format!("select=*&client_id={}", eq(&client_id.to_string()));
        self.select_one("Settings query", "client_settings", &query)
            .await
    }

    async fn insert_settings(&self, row: &ClientSettingsRow) -> Result<()> {
        self.insert("Create settings", "client_settings", row).await
    }

    async fn update_settings(&self, client_id: &ClientId, patch: &SettingsPatch) -> Result<()> {
        let filter = format!("client_id={}", eq(&client_id.to_string()));
        self.update("Update settings", "client_settings", &filter, patch)
            .await
    }

    async fn insert_contact(&self, contact: &Contact) -> Result<()> {
        self.insert("Insert contact", "contacts", contact).await
    }
}

#[async_trait(?Send)]
impl AuthGateway for SupabaseClient {
    async fn sign_in_with_password(&self, request: &SignInRequest) -> Result<Session> {
        let operation = "Sign in";
        let url = self.auth_url("token?grant_type=password");
        let builder = self.with_headers(Request::post(&url), None);
        let response = Self::send(operation, Self::json_request(operation, builder, request)?).await?;
        Self::decode(operation, response).await
    }

    async fn sign_out(&self, session: &Session) -> Result<()> {
        let operation = "Sign out";
        let url = self.auth_url("logout");
        let builder = self.with_headers(Request::post(&url), Some(&session.access_token));
        Self::send(operation, Self::empty_request(operation, builder)?).await?;
        Ok(())
    }

    async fn update_user(&self, session: &Session, update: &UserUpdate) -> Result<AuthUser> {
        let operation = "Update user";
        let url = self.auth_url("user");
        let builder = self.with_headers(Request::put(&url), Some(&session.access_token));
        let response = Self::send(operation, Self::json_request(operation, builder, update)?).await?;
        Self::decode(operation, response).await
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_component_matches_browser() {
        assert_eq!(encode_component("abc-123_.~"), "abc-123_.~");
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[wasm_bindgen_test]
    fn test_eq_filter_is_encoded() {
        assert_eq!(eq("42"), "eq.42");
        assert_eq!(eq("a b,c"), "eq.a%20b%2Cc");
    }
}
