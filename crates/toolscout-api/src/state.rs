//! Shared, read-only server state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use toolscout_connect::{ConnectBackend, HttpConnectBackend};
use toolscout_content::Catalogue;
use toolscout_core::SiteConfig;

/// Everything a handler needs. Cheap to clone; nothing in it is mutated
/// after startup.
#[derive(Clone)]
pub struct AppState {
    /// All pages.
    pub catalogue: Arc<Catalogue>,
    /// Site configuration.
    pub config: Arc<SiteConfig>,
    /// Client for the connect functions.
    pub backend: Arc<dyn ConnectBackend>,
    /// Server start time.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// State with the real HTTP backend built from `config.connect`.
    pub fn new(config: SiteConfig, catalogue: Catalogue) -> Self {
        let backend = HttpConnectBackend::from_config(&config.connect);
        tracing::debug!(
            callback = backend.callback_url(),
            complete = backend.complete_url(),
            "Connect endpoints configured"
        );
        Self::with_backend(config, catalogue, Arc::new(backend))
    }

    /// State with a caller-supplied backend.
    pub fn with_backend(
        config: SiteConfig,
        catalogue: Catalogue,
        backend: Arc<dyn ConnectBackend>,
    ) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            config: Arc::new(config),
            backend,
            started_at: Utc::now(),
        }
    }
}
