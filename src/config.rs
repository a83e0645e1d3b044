use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";

/// Credentials accepted by the admin surface. Either may be unset; when only
/// `ADMIN_KEY` is configured both roles resolve from the same secret.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminConfig {
    pub view_key: Option<String>,
    pub sync_key: Option<String>,
}

impl AdminConfig {
    /// Role-specific keys win; `shared` fills whichever role has none.
    pub fn from_keys(view: Option<String>, sync: Option<String>, shared: Option<String>) -> Self {
        Self {
            view_key: view.or_else(|| shared.clone()),
            sync_key: sync.or(shared),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    pub endpoint: Option<String>,
    pub bearer_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesConfig {
    pub place_id: Option<String>,
    pub api_key: Option<String>,
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub max_connections: u32,
    pub phone_secret: Option<String>,
    pub admin: AdminConfig,
    pub sync: SyncConfig,
    pub places: PlacesConfig,
    pub upstream_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let bind_addr = format!(
            "{}:{}",
            non_empty_var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            non_empty_var("APP_PORT").unwrap_or_else(|| "8080".into())
        )
        .parse()
        .context("APP_HOST/APP_PORT do not form a socket address")?;
        let admin = AdminConfig::from_keys(
            non_empty_var("ADMIN_VIEW_KEY"),
            non_empty_var("ADMIN_SYNC_KEY"),
            non_empty_var("ADMIN_KEY"),
        );
        let sync = SyncConfig {
            endpoint: non_empty_var("SYNC_TRIGGER_URL"),
            bearer_token: non_empty_var("SYNC_TRIGGER_TOKEN"),
        };
        let places = PlacesConfig {
            place_id: non_empty_var("GOOGLE_PLACE_ID"),
            api_key: non_empty_var("GOOGLE_PLACES_API_KEY"),
            endpoint: non_empty_var("GOOGLE_PLACES_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_URL.into()),
        };
        Ok(Self {
            bind_addr,
            database_url,
            max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            phone_secret: non_empty_var("REVIEW_PHONE_SECRET"),
            admin,
            sync,
            places,
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(15),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: &str) -> Option<String> {
        Some(k.to_string())
    }

    #[test]
    fn shared_key_alone_serves_both_roles() {
        let admin = AdminConfig::from_keys(None, None, key("shared"));
        assert_eq!(admin.view_key.as_deref(), Some("shared"));
        assert_eq!(admin.sync_key.as_deref(), Some("shared"));
    }

    #[test]
    fn split_keys_stay_split() {
        let admin = AdminConfig::from_keys(key("v"), key("s"), None);
        assert_eq!(admin.view_key.as_deref(), Some("v"));
        assert_eq!(admin.sync_key.as_deref(), Some("s"));
    }

    #[test]
    fn role_keys_override_shared_key() {
        let admin = AdminConfig::from_keys(key("v"), key("s"), key("shared"));
        assert_eq!(admin.view_key.as_deref(), Some("v"));
        assert_eq!(admin.sync_key.as_deref(), Some("s"));

        let admin = AdminConfig::from_keys(key("v"), None, key("shared"));
        assert_eq!(admin.view_key.as_deref(), Some("v"));
        assert_eq!(admin.sync_key.as_deref(), Some("shared"));
    }

    #[test]
    fn nothing_configured_leaves_admin_closed() {
        let admin = AdminConfig::from_keys(None, None, None);
        assert!(admin.view_key.is_none());
        assert!(admin.sync_key.is_none());
    }
}
