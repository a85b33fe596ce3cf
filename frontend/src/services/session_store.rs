use chrono::Utc;
use gloo::storage::{LocalStorage, Storage};
use shared::models::Session;
use shared::session::{SessionHub, Subscription};

const SESSION_KEY: &str = "recoverly.auth.session";

/// Keeps the auth session in browser local storage across reloads
pub struct SessionStore;

impl SessionStore {
    /// The stored session, unless it is missing, unreadable or expired
    pub fn restore() -> Option<Session> {
        let session: Session = LocalStorage::get(SESSION_KEY).ok()?;
        if session.is_expired(Utc::now()) {
            log::info!("Stored session expired; signing out");
            LocalStorage::delete(SESSION_KEY);
            return None;
        }
        Some(session)
    }

    /// Mirror every hub event into storage for as long as the handle lives
    pub fn attach(hub: &SessionHub) -> Subscription {
        hub.subscribe(|event| match event.session() {
            Some(session) => {
                if let Err(e) = LocalStorage::set(SESSION_KEY, session) {
                    log::warn!("Failed to persist session: {}", e);
                }
            }
            None => LocalStorage::delete(SESSION_KEY),
        })
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use shared::models::AuthUser;
    use shared::session::AuthEvent;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn session(expires_at: Option<i64>) -> Session {
        Session {
            access_token: "token".to_string(),
            token_type: Some("bearer".to_string()),
            refresh_token: None,
            expires_at,
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some("owner@shop.nl".to_string()),
                last_sign_in_at: None,
            },
        }
    }

    #[wasm_bindgen_test]
    fn test_attached_store_follows_hub() {
        LocalStorage::delete(SESSION_KEY);
        let hub = SessionHub::new(None);
        let _subscription = SessionStore::attach(&hub);

        hub.publish(AuthEvent::SignedIn(session(None)));
        assert_eq!(SessionStore::restore(), Some(session(None)));

        hub.publish(AuthEvent::SignedOut);
        assert_eq!(SessionStore::restore(), None);
    }

    #[wasm_bindgen_test]
    fn test_expired_session_is_dropped() {
        let expired = session(Some(Utc::now().timestamp() - 60));
        LocalStorage::set(SESSION_KEY, &expired).expect("storage available");
        assert_eq!(SessionStore::restore(), None);
        assert!(LocalStorage::raw().get_item(SESSION_KEY).ok().flatten().is_none());
    }
}
