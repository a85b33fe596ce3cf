//! # Errors
//!
//! Error taxonomy shared by the services and the frontend. Every failure a
//! user can trigger maps onto exactly one variant so pages can decide whether
//! to prompt for login, show an inline message, or refuse to start.

use thiserror::Error;

use crate::config::ConfigError;

/// Convenience alias used throughout the services layer
pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// No authenticated identity when one is required
    #[error("Not logged in")]
    NotLoggedIn,

    /// Network or policy failure reported by the auth service or data store
    #[error("{operation} failed: {message}")]
    Backend { operation: String, message: String },

    /// The `users` row linking the auth identity to a tenant is missing or hidden
    #[error(
        "No user mapping found in public.users for this account. Please ensure a row exists \
         with auth_user_id = your auth UUID and a valid client_id."
    )]
    MappingMissing,

    /// The `clients` row for the resolved tenant is missing or hidden
    #[error(
        "Client not found or not accessible. Check that a clients row exists for this \
         client_id and RLS policies allow SELECT."
    )]
    ClientNotFound,

    /// Input rejected before any backend call
    #[error("{0}")]
    Validation(String),

    /// Missing startup configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DashboardError {
    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        DashboardError::Backend {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DashboardError::Validation(message.into())
    }

    /// Message suitable for an inline error banner.
    ///
    /// Backend failures show the service's own message, which is what users
    /// can act on; the operation name only goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            DashboardError::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Attribute a backend failure to `operation`; other variants pass through
    pub fn during(self, operation: &str) -> Self {
        match self {
            DashboardError::Backend { message, .. } => DashboardError::backend(operation, message),
            other => other,
        }
    }

    pub fn is_not_logged_in(&self) -> bool {
        matches!(self, DashboardError::NotLoggedIn)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::backend("Decoding response", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_user_message_hides_operation() {
        let err = DashboardError::backend("Client query", "permission denied for table clients");
        assert_eq!(err.user_message(), "permission denied for table clients");
        assert_eq!(
            err.to_string(),
            "Client query failed: permission denied for table clients"
        );
    }

    #[test]
    fn test_mapping_errors_are_distinct_and_actionable() {
        let mapping = DashboardError::MappingMissing.user_message();
        let client = DashboardError::ClientNotFound.user_message();
        assert!(mapping.contains("public.users"));
        assert!(client.contains("RLS"));
        assert_ne!(mapping, client);
    }

    #[test]
    fn test_during_relabels_backend_only() {
        let err = DashboardError::backend("Fetch", "timeout").during("User query");
        assert_eq!(err.to_string(), "User query failed: timeout");
        assert_eq!(DashboardError::NotLoggedIn.during("User query"), DashboardError::NotLoggedIn);
    }

    #[test]
    fn test_config_error_converts() {
        let err: DashboardError = ConfigError::Missing("SUPABASE_URL").into();
        assert_eq!(err.to_string(), "Missing SUPABASE_URL");
    }
}
