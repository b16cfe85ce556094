//! Shared traits.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// A TOML-backed configuration type that the CLI `config` commands can
/// manage generically.
///
/// Implementors only need [`project_name`](ConfigManager::project_name),
/// [`apply_env`](ConfigManager::apply_env) and
/// [`to_env_vars`](ConfigManager::to_env_vars); path resolution, loading
/// and serialization have default implementations.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Project name, used for the config directory and env var prefix.
    fn project_name() -> &'static str;

    /// Apply environment variable overrides after file loading.
    fn apply_env(&mut self);

    /// Flatten the configuration into `(ENV_VAR, value)` pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>>;

    /// Environment variable that points at an explicit config file.
    fn config_env_var() -> String {
        format!(
            "{}_CONFIG",
            Self::project_name().to_uppercase().replace(['-', ' '], "_")
        )
    }

    /// `<platform config dir>/<project>/config.toml`.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve the config file path: explicit argument, then the
    /// `<PROJECT>_CONFIG` variable, then the platform default.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(Self::config_env_var())
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Load defaults, overlay the config file if it exists, then apply
    /// environment overrides.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                tracing::debug!(path = %path.display(), "Loading configuration file");
                toml::from_str(&content).map_err(|e| Error::toml(e, &path))?
            }
            Some(path) if explicit.is_some() => {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Serialize to pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}
