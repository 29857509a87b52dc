//! # Client Configuration
//!
//! Where the backend lives and where the session credential is kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_API_URL=https://shop.example.com/api                    │
//! │     STOREFRONT_STORAGE=memory                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/client/storefront.toml (Linux)                           │
//! │     ~/Library/Application Support/com.storefront.client/... (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080/api, file storage, key "token"               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [api]
//! base_url = "http://localhost:8080/api"
//!
//! [session]
//! storage = "file"   # file | memory | none
//! key = "token"
//! # path = "/var/lib/storefront/session.json"
//!
//! [catalog]
//! page_limit = 12
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Storage Kind
// =============================================================================

/// Where the session credential is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// JSON document under the platform data directory.
    #[default]
    File,

    /// Process memory only; forgotten on exit.
    Memory,

    /// No storage at all. The token store is always empty.
    None,
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::File => write!(f, "file"),
            StorageKind::Memory => write!(f, "memory"),
            StorageKind::None => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for StorageKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "disk" => Ok(StorageKind::File),
            "memory" | "mem" => Ok(StorageKind::Memory),
            "none" | "off" | "headless" => Ok(StorageKind::None),
            other => Err(ClientError::InvalidConfig(format!(
                "Unknown session storage: '{}'. Valid options: file, memory, none",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
        }
    }
}

/// Session credential settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default)]
    pub storage: StorageKind,

    /// Key the credential is stored under.
    #[serde(default = "default_token_key")]
    pub key: String,

    /// Session file for [`StorageKind::File`].
    /// Defaults to `session.json` under the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_token_key() -> String {
    "token".to_string()
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            storage: StorageKind::default(),
            key: default_token_key(),
            path: None,
        }
    }
}

/// Catalog browsing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Products per page.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

fn default_page_limit() -> u32 {
    storefront_core::DEFAULT_PAGE_LIMIT
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            page_limit: default_page_limit(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl ClientConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults pointing at `base_url`, with in-memory session storage.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.api.base_url = base_url.into();
        config.session.storage = StorageKind::Memory;
        config
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
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

        config.apply_env_overrides();
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
        let url = Url::parse(&self.api.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.session.key.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "session key must not be empty".into(),
            ));
        }

        if self.catalog.page_limit == 0 {
            return Err(ClientError::InvalidConfig(
                "page_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("STOREFRONT_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(key) = var("STOREFRONT_TOKEN_KEY") {
            self.session.key = key;
        }

        if let Some(storage) = var("STOREFRONT_STORAGE") {
            match storage.parse() {
                Ok(kind) => {
                    debug!(storage = %storage, "Overriding session storage from environment");
                    self.session.storage = kind;
                }
                Err(_) => warn!(storage = %storage, "Unknown session storage in environment"),
            }
        }

        if let Some(path) = var("STOREFRONT_TOKEN_PATH") {
            self.session.path = Some(PathBuf::from(path));
        }

        if let Some(limit) = var("STOREFRONT_PAGE_LIMIT") {
            if let Ok(l) = limit.parse::<u32>() {
                self.catalog.page_limit = l;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The parsed backend URL.
    pub fn base_url(&self) -> ClientResult<Url> {
        Ok(Url::parse(&self.api.base_url)?)
    }

    /// Session file location for file storage.
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session
            .path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("session.json")))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "storefront", "client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_storage_kind_parsing() {
        assert_eq!("file".parse::<StorageKind>().unwrap(), StorageKind::File);
        assert_eq!("MEMORY".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert_eq!("headless".parse::<StorageKind>().unwrap(), StorageKind::None);
        assert!("cloud".parse::<StorageKind>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.session.key, "token");
        assert_eq!(config.session.storage, StorageKind::File);
        assert_eq!(config.catalog.page_limit, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "ftp://shop".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "https://shop.example.com/api".to_string();
        config.catalog.page_limit = 0;
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        config.catalog.page_limit = 24;
        config.session.key = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("STOREFRONT_API_URL", "https://shop.example.com/api"),
            ("STOREFRONT_STORAGE", "none"),
            ("STOREFRONT_TOKEN_KEY", "jwt"),
            ("STOREFRONT_PAGE_LIMIT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.session.storage, StorageKind::None);
        assert_eq!(config.session.key, "jwt");
        assert_eq!(config.catalog.page_limit, 12);
    }

    #[test]
    fn test_toml_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storefront.toml");

        let mut config = ClientConfig::for_base_url("http://127.0.0.1:9000/api");
        config.catalog.page_limit = 30;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[session]"));
        let parsed: ClientConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed.api.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(parsed.session.storage, StorageKind::Memory);
        assert_eq!(parsed.catalog.page_limit, 30);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: ClientConfig = toml::from_str("[api]\nbase_url = \"http://x/api\"\n").unwrap();
        assert_eq!(parsed.session.key, "token");
        assert_eq!(parsed.catalog.page_limit, 12);
    }
}
