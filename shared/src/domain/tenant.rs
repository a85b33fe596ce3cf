use log::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::models::ClientId;
use crate::session::SessionHub;
use crate::storage::TenantStore;

/// Tenant of the signed-in user.
///
/// Fails with `NotLoggedIn` without a session and with `MappingMissing` when
/// the `users` row is absent, hidden, or has no client id.
pub async fn resolve_client_id(store: &dyn TenantStore, hub: &SessionHub) -> Result<ClientId> {
    let session = hub.current().ok_or(DashboardError::NotLoggedIn)?;
    let user_id = session.user.id;

    match store.find_client_id(&user_id).await? {
        Some(client_id) => {
            debug!("Resolved client {} for user {}", client_id, user_id);
            Ok(client_id)
        }
        None => {
            warn!("No client mapping for user {}", user_id);
            Err(DashboardError::MappingMissing)
        }
    }
}
