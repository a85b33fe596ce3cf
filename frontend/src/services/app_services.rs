use std::rc::Rc;

use shared::config::AppConfig;
use shared::domain::{AccountService, AuthService, ContactService, DashboardService, SettingsService};
use shared::models::Session;
use shared::session::SessionHub;
use shared::storage::{AuthGateway, TenantStore};

use super::supabase::SupabaseClient;

/// Every domain service, wired to one Supabase client and one session hub.
/// Cloning is cheap; clones compare equal.
#[derive(Clone)]
pub struct AppServices {
    pub hub: SessionHub,
    pub auth: AuthService,
    pub settings: SettingsService,
    pub account: AccountService,
    pub contact: ContactService,
    pub dashboard: DashboardService,
    identity: Rc<()>,
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.identity, &other.identity)
    }
}

impl AppServices {
    pub fn new(config: &AppConfig, restored: Option<Session>) -> Self {
        let hub = SessionHub::new(restored);
        let client = Rc::new(SupabaseClient::new(config, hub.clone()));
        let store: Rc<dyn TenantStore> = client.clone();
        let gateway: Rc<dyn AuthGateway> = client;

        let auth = AuthService::new(gateway, hub.clone());
        Self {
            settings: SettingsService::new(store.clone(), hub.clone()),
            account: AccountService::new(store.clone(), auth.clone()),
            contact: ContactService::new(store.clone()),
            dashboard: DashboardService::new(store, hub.clone(), config.dashboard_embed_url.clone()),
            auth,
            hub,
            identity: Rc::new(()),
        }
    }
}
