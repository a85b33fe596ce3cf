use log::info;
use std::rc::Rc;

use crate::error::Result;
use crate::session::SessionHub;
use crate::storage::TenantStore;

use super::tenant::resolve_client_id;

/// URI component encoder supplied by the platform
pub type Encoder = fn(&str) -> String;

/// Embed address for one tenant. The base already carries a query string;
/// `t` busts the iframe cache on every load.
pub fn embed_url(base: &str, client_id: &str, now_ms: i64, encode: Encoder) -> String {
    format!("{}&client_id={}&t={}", base, encode(client_id), now_ms)
}

/// Resolves the embedded analytics dashboard for the signed-in tenant
#[derive(Clone)]
pub struct DashboardService {
    store: Rc<dyn TenantStore>,
    hub: SessionHub,
    embed_base: String,
}

impl DashboardService {
    pub fn new(store: Rc<dyn TenantStore>, hub: SessionHub, embed_base: impl Into<String>) -> Self {
        Self {
            store,
            hub,
            embed_base: embed_base.into(),
        }
    }

    pub async fn embed_url(&self, now_ms: i64, encode: Encoder) -> Result<String> {
        let client_id = resolve_client_id(self.store.as_ref(), &self.hub).await?;
        info!("Embedding dashboard for client {}", client_id);
        Ok(embed_url(&self.embed_base, &client_id.to_string(), now_ms, encode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientId;
    use crate::storage::memory::{test_session, MemoryStore};

    fn spaces(value: &str) -> String {
        value.replace(' ', "%20")
    }

    #[test]
    fn test_embed_url_format() {
        let url = embed_url("https://dash.example.com/app?embed=true", "c 1", 1_700_000_000_000, spaces);
        assert_eq!(
            url,
            "https://dash.example.com/app?embed=true&client_id=c%201&t=1700000000000"
        );
    }

    #[tokio::test]
    async fn test_service_resolves_tenant() {
        let store = Rc::new(MemoryStore::with_tenant("user-a@example.com", ClientId::Number(12), "Shop"));
        let hub = SessionHub::new(Some(test_session("a@example.com")));
        let service = DashboardService::new(store, hub, "https://d.example/x?embed=true");
        assert_eq!(
            service.embed_url(42, spaces).await.unwrap(),
            "https://d.example/x?embed=true&client_id=12&t=42"
        );
    }

    #[tokio::test]
    async fn test_signed_out_prompts_login() {
        let store = Rc::new(MemoryStore::new());
        let service = DashboardService::new(store, SessionHub::new(None), "https://d.example/x?a=1");
        assert!(service.embed_url(1, spaces).await.unwrap_err().is_not_logged_in());
    }
}
