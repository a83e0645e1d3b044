use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::{self, PgStore};
use crate::google::{places::PlacesClient, repo::GoogleReviewStore, PlacesSource};
use crate::reviews::repo::ReviewStore;
use crate::sync::{http_client, HttpSyncTrigger, SyncTrigger};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub reviews: Arc<dyn ReviewStore>,
    pub google_reviews: Arc<dyn GoogleReviewStore>,
    /// Unset when no trigger endpoint is configured.
    pub sync: Option<Arc<dyn SyncTrigger>>,
    pub places: Option<Arc<dyn PlacesSource>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = PgStore::new(db::connect(&config).await?);
        let client = http_client(config.upstream_timeout_secs)?;

        let sync = HttpSyncTrigger::from_config(client.clone(), &config.sync)
            .map(|t| Arc::new(t) as Arc<dyn SyncTrigger>);
        if sync.is_none() {
            tracing::warn!("SYNC_TRIGGER_URL not set; review sync is disabled");
        }
        let places = PlacesClient::from_config(client, &config.places)
            .map(|p| Arc::new(p) as Arc<dyn PlacesSource>);
        if config.phone_secret.is_none() {
            tracing::warn!("REVIEW_PHONE_SECRET not set; phone numbers are stored hashed only");
        }

        let store = Arc::new(store);
        Ok(Self::from_parts(config, store.clone(), store, sync, places))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        reviews: Arc<dyn ReviewStore>,
        google_reviews: Arc<dyn GoogleReviewStore>,
        sync: Option<Arc<dyn SyncTrigger>>,
        places: Option<Arc<dyn PlacesSource>>,
    ) -> Self {
        Self {
            config,
            reviews,
            google_reviews,
            sync,
            places,
        }
    }
}
