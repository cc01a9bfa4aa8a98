use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PackratConfig {
    pub log_level: String,
    pub storage: StorageConfig,
    pub gateway: GatewayConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON data file holding the whole collection.
    pub data_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GatewayConfig {
    /// Which model implementation to use. Only `gemini` today.
    pub provider: String,
    /// Model name passed to the provider.
    pub model: String,
    /// API base URL, overridable for testing against a local fake.
    pub api_base: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PackratConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            storage: StorageConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_path = default_packrat_dir()
            .join("articles.json")
            .to_string_lossy()
            .into_owned();
        Self { data_path }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".into(),
            model: "gemini-2.5-flash".into(),
            api_base: "https://generativelanguage.googleapis.com".into(),
            api_key_env: "GEMINI_API_KEY".into(),
            timeout_secs: 30,
        }
    }
}

/// Returns `~/.packrat/`
pub fn default_packrat_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".packrat")
}

/// Returns the default config file path: `~/.packrat/config.toml`
pub fn default_config_path() -> PathBuf {
    default_packrat_dir().join("config.toml")
}

impl PackratConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            PackratConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (PACKRAT_DATA, PACKRAT_MODEL,
    /// PACKRAT_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PACKRAT_DATA") {
            self.storage.data_path = val;
        }
        if let Ok(val) = std::env::var("PACKRAT_MODEL") {
            self.gateway.model = val;
        }
        if let Ok(val) = std::env::var("PACKRAT_LOG_LEVEL") {
            self.log_level = val;
        }
    }

    /// Resolve the data file path, expanding `~` if needed.
    pub fn resolved_data_path(&self) -> PathBuf {
        expand_tilde(&self.storage.data_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PackratConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.gateway.provider, "gemini");
        assert_eq!(config.gateway.api_key_env, "GEMINI_API_KEY");
        assert!(config.storage.data_path.ends_with("articles.json"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
log_level = "debug"

[storage]
data_path = "/tmp/test-articles.json"

[gateway]
model = "gemini-2.5-pro"
timeout_secs = 60
"#;
        let config: PackratConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.storage.data_path, "/tmp/test-articles.json");
        assert_eq!(config.gateway.model, "gemini-2.5-pro");
        assert_eq!(config.gateway.timeout_secs, 60);
        // defaults still apply for unset fields
        assert_eq!(config.gateway.provider, "gemini");
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = PackratConfig::default();
        std::env::set_var("PACKRAT_DATA", "/tmp/override.json");
        std::env::set_var("PACKRAT_MODEL", "gemini-2.0-flash");
        std::env::set_var("PACKRAT_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.storage.data_path, "/tmp/override.json");
        assert_eq!(config.gateway.model, "gemini-2.0-flash");
        assert_eq!(config.log_level, "trace");

        // Clean up
        std::env::remove_var("PACKRAT_DATA");
        std::env::remove_var("PACKRAT_MODEL");
        std::env::remove_var("PACKRAT_LOG_LEVEL");
    }
}
