//! # Session hub
//!
//! Single-threaded broadcast of auth state changes. Listeners are kept until
//! their [`Subscription`] is dropped, so a component that drops its handle in
//! effect teardown can never be called after it unmounts.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::models::Session;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(Session),
    SignedOut,
    UserUpdated(Session),
}

impl AuthEvent {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthEvent::SignedIn(session) | AuthEvent::UserUpdated(session) => Some(session),
            AuthEvent::SignedOut => None,
        }
    }
}

/// What the auth context provides to pages
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    /// True until the stored session has been restored
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn ready(session: Option<Session>) -> Self {
        Self {
            session,
            loading: false,
        }
    }

    pub fn apply(&self, event: &AuthEvent) -> Self {
        Self::ready(event.session().cloned())
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn email(&self) -> Option<&str> {
        self.session.as_ref().and_then(|s| s.user.email.as_deref())
    }
}

type Listener = Rc<dyn Fn(&AuthEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: BTreeMap<u64, Listener>,
}

/// Holds the current session and notifies subscribers of changes
#[derive(Clone, Default)]
pub struct SessionHub {
    current: Rc<RefCell<Option<Session>>>,
    listeners: Rc<RefCell<Listeners>>,
}

impl SessionHub {
    pub fn new(initial: Option<Session>) -> Self {
        Self {
            current: Rc::new(RefCell::new(initial)),
            listeners: Rc::default(),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthEvent) + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.insert(id, Rc::new(listener));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Record the event and deliver it to every live subscriber
    pub fn publish(&self, event: AuthEvent) {
        *self.current.borrow_mut() = event.session().cloned();

        // Collect first so listeners may subscribe or unsubscribe re-entrantly
        let snapshot: Vec<Listener> = self.listeners.borrow().entries.values().cloned().collect();
        log::debug!("Publishing auth event to {} listeners", snapshot.len());
        for listener in snapshot {
            listener(&event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Unsubscribes its listener when dropped
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthUser;
    use std::cell::Cell;

    fn session(email: &str) -> Session {
        Session {
            access_token: "token".to_string(),
            token_type: Some("bearer".to_string()),
            refresh_token: None,
            expires_at: None,
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some(email.to_string()),
                last_sign_in_at: None,
            },
        }
    }

    #[test]
    fn test_publish_updates_current_and_notifies() {
        let hub = SessionHub::new(None);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _subscription = hub.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        hub.publish(AuthEvent::SignedIn(session("a@example.com")));
        assert_eq!(hub.current().and_then(|s| s.user.email), Some("a@example.com".to_string()));

        hub.publish(AuthEvent::SignedOut);
        assert_eq!(hub.current(), None);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let hub = SessionHub::new(None);
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let subscription = hub.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(hub.listener_count(), 1);

        hub.publish(AuthEvent::SignedOut);
        drop(subscription);
        assert_eq!(hub.listener_count(), 0);
        hub.publish(AuthEvent::SignedOut);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = SessionHub::new(Some(session("a@example.com")));
        let subscription = hub.subscribe(|_| {});
        drop(hub);
        drop(subscription);
    }

    #[test]
    fn test_auth_state_transitions() {
        let state = AuthState::default();
        assert!(state.loading);
        assert!(!state.is_signed_in());

        let state = state.apply(&AuthEvent::SignedIn(session("b@example.com")));
        assert!(!state.loading);
        assert_eq!(state.email(), Some("b@example.com"));

        let state = state.apply(&AuthEvent::SignedOut);
        assert_eq!(state, AuthState::ready(None));
    }
}
