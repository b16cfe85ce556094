//! `toolscout serve`: load content and run the HTTP server.

use anyhow::Context;
use toolscout_api::AppState;
use toolscout_content::Catalogue;
use toolscout_core::SiteConfig;

/// Apply command-line bind overrides on top of the loaded config.
pub fn apply_bind_overrides(config: &mut SiteConfig, host: Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
}

/// Validate the config, load the catalogue and serve until shutdown.
pub async fn run_server(config: SiteConfig) -> anyhow::Result<()> {
    config.validate().context("Invalid configuration")?;
    let catalogue = Catalogue::from_config(&config.content).context("Failed to load content")?;
    let addr = config.server.bind_addr();
    let state = AppState::new(config, catalogue);
    toolscout_api::serve(state, &addr)
        .await
        .with_context(|| format!("Server on {addr} failed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_overrides() {
        let mut config = SiteConfig::default();
        let default_host = config.server.host.clone();
        apply_bind_overrides(&mut config, None, Some(9999));
        assert_eq!(config.server.host, default_host);
        assert_eq!(config.server.port, 9999);

        apply_bind_overrides(&mut config, Some("0.0.0.0".into()), None);
        assert_eq!(config.server.bind_addr(), "0.0.0.0:9999");
    }
}
