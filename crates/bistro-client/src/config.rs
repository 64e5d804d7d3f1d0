//! # Client Configuration
//!
//! Where the client finds the backend and who it calls it as.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BISTRO_API_URL=https://api.example.com                             │
//! │     BISTRO_API_TOKEN=eyJhbGciOi...                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bistro/bistro.toml (Linux)                               │
//! │     ~/Library/Application Support/com.bistro.bistro/bistro.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3000/api, 30s timeout, "Rs" with 2 decimals       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # bistro.toml
//! [api]
//! base_url = "https://api.example.com/v1"
//! timeout_secs = 30
//!
//! [auth]
//! token = "eyJhbGciOi..."
//! tenant_id = "tenant-42"
//!
//! [branch]
//! id = 5
//!
//! [display]
//! currency_symbol = "Rs"
//! currency_decimals = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use bistro_core::money::CurrencyFormat;

use crate::error::{ClientError, ClientResult};
use crate::headers::HeaderConfig;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "bistro.toml";

// =============================================================================
// API Settings
// =============================================================================

/// Backend location and request limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL every resource path is joined to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Auth Settings
// =============================================================================

/// Session credentials. Issuing them is the login flow's job; the client
/// only forwards what it is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Bearer token sent as `Authorization`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Tenant sent as `X-Tenant-Id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

// =============================================================================
// Branch Settings
// =============================================================================

/// The branch this terminal is assigned to, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
}

// =============================================================================
// Display Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_currency_symbol() -> String {
    "Rs".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub branch: BranchSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ClientConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (bistro.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = url::Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.branch.id == Some(0) {
            return Err(ClientError::InvalidConfig(
                "branch id must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment
    /// in [`ClientConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BISTRO_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(token) = lookup("BISTRO_API_TOKEN") {
            debug!("Overriding API token from environment");
            self.auth.token = Some(token).filter(|t| !t.is_empty());
        }

        if let Some(tenant) = lookup("BISTRO_TENANT_ID") {
            self.auth.tenant_id = Some(tenant).filter(|t| !t.is_empty());
        }

        if let Some(branch) = lookup("BISTRO_BRANCH_ID") {
            match branch.parse::<u32>() {
                Ok(id) => self.branch.id = Some(id),
                Err(_) => warn!(branch = %branch, "Ignoring non-numeric BISTRO_BRANCH_ID"),
            }
        }

        if let Some(timeout) = lookup("BISTRO_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => {
                    debug!(secs, "Overriding timeout from environment");
                    self.api.timeout_secs = secs;
                }
                Err(_) => warn!(timeout = %timeout, "Ignoring non-numeric BISTRO_TIMEOUT_SECS"),
            }
        }

        if let Some(symbol) = lookup("BISTRO_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bistro", "bistro")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Header inputs for every request made with this config.
    pub fn header_config(&self) -> HeaderConfig {
        HeaderConfig {
            token: self.auth.token.clone(),
            tenant_id: self.auth.tenant_id.clone(),
            branch_id: self.branch.id,
            ..HeaderConfig::default()
        }
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(
            self.display.currency_symbol.clone(),
            self.display.currency_decimals,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.display.currency_symbol, "Rs");
        assert!(config.auth.token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "ws://localhost:8080".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://api.example.com".to_string();
        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        config.api.timeout_secs = 5;
        config.branch.id = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = ClientConfig::default();
        config.apply_overrides(env(&[
            ("BISTRO_API_URL", "https://api.example.com"),
            ("BISTRO_API_TOKEN", "secret"),
            ("BISTRO_BRANCH_ID", "7"),
            ("BISTRO_TIMEOUT_SECS", "not-a-number"),
            ("BISTRO_CURRENCY_SYMBOL", "PKR"),
        ]));

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.auth.token.as_deref(), Some("secret"));
        assert_eq!(config.branch.id, Some(7));
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.display.currency_symbol, "PKR");
    }

    #[test]
    fn test_empty_token_override_clears_token() {
        let mut config = ClientConfig::default();
        config.auth.token = Some("old".to_string());
        config.apply_overrides(env(&[("BISTRO_API_TOKEN", "")]));
        assert_eq!(config.auth.token, None);
    }

    #[test]
    fn test_header_config_and_currency() {
        let mut config = ClientConfig::default();
        config.auth.tenant_id = Some("tenant-42".to_string());
        config.branch.id = Some(5);

        let headers = config.header_config();
        assert_eq!(headers.tenant_id.as_deref(), Some("tenant-42"));
        assert_eq!(headers.branch_id, Some(5));
        assert!(headers.token.is_none());

        assert_eq!(config.currency_format(), CurrencyFormat::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = ClientConfig::default();
        config.api.base_url = "https://api.example.com/v1".to_string();
        config.auth.tenant_id = Some("tenant-42".to_string());
        config.branch.id = Some(3);
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));
        assert!(!contents.contains("token"));

        let loaded: ClientConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: ClientConfig = toml::from_str("[branch]\nid = 9\n").unwrap();
        assert_eq!(config.branch.id, Some(9));
        assert_eq!(config.api, ApiSettings::default());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(matches!(
            ClientConfig::load(Some(path.clone())),
            Err(ClientError::ConfigLoadFailed(_))
        ));
    }
}
