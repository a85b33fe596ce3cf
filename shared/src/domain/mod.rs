//! # Domain services
//!
//! Page-facing operations composed from the [`crate::storage`] traits. Each
//! service validates input before touching the backend and logs what it does.

pub mod account_service;
pub mod auth_service;
pub mod contact_service;
pub mod dashboard_service;
pub mod settings_service;
pub mod tenant;

pub use account_service::AccountService;
pub use auth_service::AuthService;
pub use contact_service::ContactService;
pub use dashboard_service::DashboardService;
pub use settings_service::SettingsService;
pub use tenant::resolve_client_id;
