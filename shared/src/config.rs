//! # Configuration
//!
//! Startup values for the hosted backend. The frontend bakes them in at build
//! time; anything else (tests, tools) can supply its own lookup.

use thiserror::Error;

pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const DASHBOARD_EMBED_URL: &str = "DASHBOARD_EMBED_URL";

/// Embedded analytics page used when no override is configured
pub const DEFAULT_EMBED_URL: &str =
    "https://recoverly.appsmith.com/app/recoverly-dashboard/page1-68a08c385a6a5a7e1f74ec17?embed=true";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the hosted data store, without trailing slash
    pub supabase_url: String,
    /// Public (anon) API key sent with every request
    pub supabase_anon_key: String,
    /// Base URL of the embedded analytics dashboard
    pub dashboard_embed_url: String,
}

impl AppConfig {
    /// Build the configuration from a key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let supabase_url = read(SUPABASE_URL).ok_or(ConfigError::Missing(SUPABASE_URL))?;
        let supabase_anon_key =
            read(SUPABASE_ANON_KEY).ok_or(ConfigError::Missing(SUPABASE_ANON_KEY))?;
        let dashboard_embed_url =
            read(DASHBOARD_EMBED_URL).unwrap_or_else(|| DEFAULT_EMBED_URL.to_string());

        Ok(Self {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
            dashboard_embed_url,
        })
    }
}
