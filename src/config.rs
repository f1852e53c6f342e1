//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <file>`, else `$XDG_CONFIG_HOME/cattree/cattree.toml`
//! 3. Environment variables: `BC_*` prefix (a `.env` file is loaded into the
//!    process environment by `main` beforehand)

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Prefix of the environment variables read as overrides.
pub const ENV_PREFIX: &str = "BC";

/// Default API host, the store hash is appended per store.
pub const DEFAULT_API_URL: &str = "https://api.bigcommerce.com";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Unified configuration for cattree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Store identifier, part of the catalog URL
    pub store_hash: String,
    /// API client id, sent as `X-Auth-Client`
    pub client_id: String,
    /// API client secret (required by the store, unused by read-only calls)
    pub client_secret: String,
    /// API access token, sent as `X-Auth-Token`
    pub access_token: String,
    /// API host without trailing path
    pub api_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_hash: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            access_token: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub store_hash: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub access_token: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Get the XDG config directory for cattree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cattree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("cattree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// `config_file` replaces the global config file; unlike the global file it
    /// must exist.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(config_file, None)
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file, else the global one if present
    /// * `env` - Environment to read `BC_*` overrides from, `None` for the process environment
    pub fn load_from(
        config_file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        match config_file {
            Some(path) => {
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env)?;

        Ok(current)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            store_hash: overlay
                .store_hash
                .clone()
                .unwrap_or_else(|| self.store_hash.clone()),
            client_id: overlay
                .client_id
                .clone()
                .unwrap_or_else(|| self.client_id.clone()),
            client_secret: overlay
                .client_secret
                .clone()
                .unwrap_or_else(|| self.client_secret.clone()),
            access_token: overlay
                .access_token
                .clone()
                .unwrap_or_else(|| self.access_token.clone()),
            api_url: overlay
                .api_url
                .clone()
                .unwrap_or_else(|| self.api_url.clone()),
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
        }
    }

    /// Apply `BC_*` environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("store_hash") {
            settings.store_hash = val;
        }
        if let Ok(val) = config.get_string("client_id") {
            settings.client_id = val;
        }
        if let Ok(val) = config.get_string("client_secret") {
            settings.client_secret = val;
        }
        if let Ok(val) = config.get_string("access_token") {
            settings.access_token = val;
        }
        if let Ok(val) = config.get_string("api_url") {
            settings.api_url = val;
        }
        match config.get::<u64>("timeout_secs") {
            Ok(val) => settings.timeout_secs = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Check that every credential is present.
    ///
    /// The error names the environment variable to set.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let required = [
            ("store_hash", &self.store_hash),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("access_token", &self.access_token),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ApplicationError::Config {
                    message: format!(
                        "{}_{} is required, but not present",
                        ENV_PREFIX,
                        key.to_uppercase()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Catalog v3 base URL of the configured store.
    pub fn catalog_url(&self) -> String {
        format!(
            "{}/stores/{}/v3/catalog",
            self.api_url.trim_end_matches('/'),
            self.store_hash
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Lower the per-request timeout to `secs` if it is longer, so a single
    /// in-flight request cannot outlast an overall deadline of that length.
    pub fn cap_timeout(&mut self, secs: u64) {
        self.timeout_secs = self.timeout_secs.min(secs);
    }

    /// Copy with secrets masked, for display.
    pub fn masked(&self) -> Self {
        Self {
            client_secret: mask(&self.client_secret),
            access_token: mask(&self.access_token),
            ..self.clone()
        }
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "********".to_string()
    }
}
