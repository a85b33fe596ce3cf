use log::info;
use std::rc::Rc;

use crate::error::Result;
use crate::models::{ClientSettingsRow, ReportSettings, SettingsPatch};
use crate::session::SessionHub;
use crate::storage::TenantStore;

use super::tenant::resolve_client_id;

pub const SETTINGS_SAVED: &str = "Settings saved successfully!";
pub const SETTINGS_LOAD_FAILED: &str = "Failed to load settings. Please try again.";

#[derive(Clone)]
pub struct SettingsService {
    store: Rc<dyn TenantStore>,
    hub: SessionHub,
}

impl SettingsService {
    pub fn new(store: Rc<dyn TenantStore>, hub: SessionHub) -> Self {
        Self { store, hub }
    }

    /// Settings of the signed-in tenant, creating the default row on first use
    pub async fn read(&self) -> Result<ReportSettings> {
        let client_id = resolve_client_id(self.store.as_ref(), &self.hub).await?;

        let row = match self.store.find_settings(&client_id).await? {
            Some(row) => row,
            None => {
                info!("Creating default settings for client {}", client_id);
                let row = ClientSettingsRow::defaults_for(client_id);
                self.store.insert_settings(&row).await?;
                row
            }
        };

        Ok(ReportSettings::from(&row))
    }

    /// Write the fields present in `patch`
    pub async fn update(&self, patch: &SettingsPatch) -> Result<()> {
        let client_id = resolve_client_id(self.store.as_ref(), &self.hub).await?;
        if patch.is_empty() {
            return Ok(());
        }

        info!("Updating settings for client {}", client_id);
        self.store.update_settings(&client_id, patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::models::{ClientId, ReportFrequency};
    use crate::storage::memory::{test_session, MemoryStore};

    fn service(store: &Rc<MemoryStore>) -> SettingsService {
        SettingsService::new(store.clone(), SessionHub::new(Some(test_session("a@example.com"))))
    }

    fn tenant() -> Rc<MemoryStore> {
        Rc::new(MemoryStore::with_tenant("user-a@example.com", ClientId::Number(5), "Shop"))
    }

    #[tokio::test]
    async fn test_first_read_creates_defaults() {
        let store = tenant();
        let settings = service(&store).read().await.unwrap();
        assert_eq!(settings, ReportSettings::default());
        assert_eq!(settings.report_frequency, ReportFrequency::Monthly);
        assert!(settings.include_charts);
        assert_eq!(
            store.settings.borrow().get(&ClientId::Number(5)),
            Some(&ClientSettingsRow::defaults_for(ClientId::Number(5)))
        );
    }

    #[tokio::test]
    async fn test_second_read_does_not_insert() {
        let store = tenant();
        let service = service(&store);
        service.read().await.unwrap();
        service.read().await.unwrap();
        let inserts = store.calls.borrow().iter().filter(|c| **c == "insert_settings").count();
        assert_eq!(inserts, 1);
    }

    #[tokio::test]
    async fn test_update_then_read() {
        let store = tenant();
        let service = service(&store);
        service.read().await.unwrap();

        let edited = ReportSettings {
            report_frequency: ReportFrequency::Weekly,
            sender_name: "Shop Team".to_string(),
            ..ReportSettings::default()
        };
        service.update(&SettingsPatch::from(&edited)).await.unwrap();

        let settings = service.read().await.unwrap();
        assert_eq!(settings.report_frequency, ReportFrequency::Weekly);
        assert_eq!(settings.sender_name, "Shop Team");
        assert_eq!(settings.attribution_window_days, 7);
    }

    #[tokio::test]
    async fn test_read_failure_surfaces_backend_message() {
        let store = tenant();
        store.fail_next(DashboardError::backend("User query", "permission denied"));
        let err = service(&store).read().await.unwrap_err();
        assert_eq!(err.user_message(), "permission denied");
    }

    #[tokio::test]
    async fn test_signed_out_read() {
        let store = tenant();
        let service = SettingsService::new(store.clone(), SessionHub::new(None));
        assert_eq!(service.read().await, Err(DashboardError::NotLoggedIn));
    }
}
