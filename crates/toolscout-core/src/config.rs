//! Site configuration.
//!
//! ```toml
//! project_name = "toolscout"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [connect]
//! functions_base_url = "http://localhost:8888/.netlify/functions"
//! callback_path = "instagram-callback"
//! complete_path = "instagram-complete"
//! dashboard_url = "/dashboard"
//!
//! [content]
//! # dir = "/srv/toolscout/content"
//!
//! [logging]
//! level = "info,toolscout=debug"
//! ```
//!
//! Every field can be overridden from the environment with a
//! `TOOLSCOUT_` prefixed variable (see [`SiteConfig::apply_overrides`]).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::traits::ConfigManager;
use crate::{Error, Result};

/// Environment variable holding the serverless functions base URL.
pub const FUNCTIONS_BASE_URL_ENV: &str = "TOOLSCOUT_FUNCTIONS_BASE_URL";

/// Top-level site configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Name shown in page titles and the health endpoint.
    pub project_name: String,
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Account-connect endpoints.
    pub connect: ConnectConfig,
    /// Content source.
    pub content: ContentConfig,
    /// Logging filter.
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

/// Where the account-connect flow sends its two requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectConfig {
    /// Base URL of the serverless functions.
    pub functions_base_url: String,
    /// Path of the callback-resolution function, relative to the base URL.
    pub callback_path: String,
    /// Path of the selection-completion function, relative to the base URL.
    pub complete_path: String,
    /// Where the success page links back to.
    pub dashboard_url: String,
}

/// Content source settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory with `reviews/` and `comparisons/` markdown files.
    /// When unset the pages built into the binary are served.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            project_name: "toolscout".to_string(),
            server: ServerConfig::default(),
            connect: ConnectConfig::default(),
            content: ContentConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            functions_base_url: "http://localhost:8888/.netlify/functions".to_string(),
            callback_path: "instagram-callback".to_string(),
            complete_path: "instagram-complete".to_string(),
            dashboard_url: "/dashboard".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,toolscout=debug".to_string(),
        }
    }
}

impl ConnectConfig {
    /// Full URL of the callback-resolution function.
    pub fn callback_endpoint(&self) -> String {
        join_url(&self.functions_base_url, &self.callback_path)
    }

    /// Full URL of the selection-completion function.
    pub fn complete_endpoint(&self) -> String {
        join_url(&self.functions_base_url, &self.complete_path)
    }
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SiteConfig {
    /// Apply overrides from a variable lookup.
    ///
    /// Recognised keys are the ones [`ConfigManager::to_env_vars`] emits.
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("TOOLSCOUT_PROJECT_NAME") {
            self.project_name = v;
        }
        if let Some(v) = lookup("TOOLSCOUT_SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("TOOLSCOUT_SERVER_PORT") {
            match v.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %v, "Ignoring invalid TOOLSCOUT_SERVER_PORT"),
            }
        }
        if let Some(v) = lookup(FUNCTIONS_BASE_URL_ENV) {
            self.connect.functions_base_url = v;
        }
        if let Some(v) = lookup("TOOLSCOUT_CALLBACK_PATH") {
            self.connect.callback_path = v;
        }
        if let Some(v) = lookup("TOOLSCOUT_COMPLETE_PATH") {
            self.connect.complete_path = v;
        }
        if let Some(v) = lookup("TOOLSCOUT_DASHBOARD_URL") {
            self.connect.dashboard_url = v;
        }
        if let Some(v) = lookup("TOOLSCOUT_CONTENT_DIR") {
            self.content.dir = if v.is_empty() {
                None
            } else {
                Some(PathBuf::from(v))
            };
        }
        if let Some(v) = lookup("TOOLSCOUT_LOG_LEVEL") {
            self.logging.level = v;
        }
    }

    /// Check the values the server cannot start without.
    pub fn validate(&self) -> Result<()> {
        let base = self.connect.functions_base_url.trim();
        if base.is_empty() {
            return Err(Error::validation_field(
                "connect.functions_base_url",
                "must not be empty",
            ));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::validation_field(
                "connect.functions_base_url",
                format!("must be an http(s) URL, got '{base}'"),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(Error::validation_field("server.host", "must not be empty"));
        }
        Ok(())
    }
}

impl ConfigManager for SiteConfig {
    fn project_name() -> &'static str {
        "toolscout"
    }

    fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let mut vars = vec![
            ("TOOLSCOUT_PROJECT_NAME".to_string(), self.project_name.clone()),
            ("TOOLSCOUT_SERVER_HOST".to_string(), self.server.host.clone()),
            ("TOOLSCOUT_SERVER_PORT".to_string(), self.server.port.to_string()),
            (
                FUNCTIONS_BASE_URL_ENV.to_string(),
                self.connect.functions_base_url.clone(),
            ),
            (
                "TOOLSCOUT_CALLBACK_PATH".to_string(),
                self.connect.callback_path.clone(),
            ),
            (
                "TOOLSCOUT_COMPLETE_PATH".to_string(),
                self.connect.complete_path.clone(),
            ),
            (
                "TOOLSCOUT_DASHBOARD_URL".to_string(),
                self.connect.dashboard_url.clone(),
            ),
        ];
        if let Some(dir) = &self.content.dir {
            vars.push((
                "TOOLSCOUT_CONTENT_DIR".to_string(),
                dir.display().to_string(),
            ));
        }
        vars.push(("TOOLSCOUT_LOG_LEVEL".to_string(), self.logging.level.clone()));
        Ok(vars)
    }
}

/// Join a base URL and a relative path with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

// ============================================================================
// Tests
// ============================================================================
