pub mod app_services;
pub mod logging;
pub mod session_store;
pub mod supabase;

pub use logging::{ConsoleLogger, Logger};
pub use session_store::SessionStore;
pub use supabase::{encode_component, SupabaseClient};
pub use app_services::AppServices;
