//! # API Client Configuration
//!
//! Configuration for the remote storefront API client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     HARVEST_CATALOG_URL=https://api.example.com/v1                     │
//! │     HARVEST_AUTH_URL=https://auth.example.com/v1                       │
//! │     HARVEST_HTTP_TIMEOUT_SECS=10                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/freshharvest/api.toml (Linux)                            │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     hosted catalog + local auth service                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # api.toml
//! [catalog]
//! base_url = "https://code-commando.com/api/v1"
//!
//! [auth]
//! base_url = "http://localhost:3001/api/v1"
//!
//! [http]
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Sections
// =============================================================================

/// Catalog (products/categories) endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Base URL of the product catalog API.
    #[serde(default = "default_catalog_url")]
    pub base_url: String,
}

fn default_catalog_url() -> String {
    "https://code-commando.com/api/v1".to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            base_url: default_catalog_url(),
        }
    }
}

/// Auth endpoint settings. The auth service lives on a different host
/// than the catalog, hence a separate base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Base URL of the auth API.
    #[serde(default = "default_auth_url")]
    pub base_url: String,
}

fn default_auth_url() -> String {
    "http://localhost:3001/api/v1".to_string()
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            base_url: default_auth_url(),
        }
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpSettings {
            timeout_secs: default_timeout_secs(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete API client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Catalog endpoint settings.
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Auth endpoint settings.
    #[serde(default)]
    pub auth: AuthSettings,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpSettings,
}

impl ApiConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (api.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ApiResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading API config from file");
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

    /// Loads config or returns defaults if the load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load API config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        Self::validate_base_url("catalog.base_url", &self.catalog.base_url)?;
        Self::validate_base_url("auth.base_url", &self.auth.base_url)?;

        if self.http.timeout_secs == 0 {
            return Err(ApiError::InvalidConfig(
                "http.timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn validate_base_url(field: &str, value: &str) -> ApiResult<()> {
        let url = Url::parse(value)
            .map_err(|e| ApiError::InvalidConfig(format!("{field}: {e}")))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::InvalidConfig(format!(
                "{field} must use http or https, got: {}",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("HARVEST_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.base_url = url;
        }

        if let Ok(url) = std::env::var("HARVEST_AUTH_URL") {
            debug!(url = %url, "Overriding auth URL from environment");
            self.auth.base_url = url;
        }

        if let Ok(timeout) = std::env::var("HARVEST_HTTP_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                self.http.timeout_secs = secs;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "freshharvest", "storefront")
            .map(|dirs| dirs.config_dir().join("api.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.catalog.base_url, "https://code-commando.com/api/v1");
        assert_eq!(config.auth.base_url, "http://localhost:3001/api/v1");
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ApiConfig::default();

        config.catalog.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.catalog.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.catalog.base_url = "https://example.com/api".to_string();
        assert!(config.validate().is_ok());

        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_parsing() {
        let config: ApiConfig = toml::from_str(
            r#"
            [catalog]
            base_url = "https://shop.example.com/api/v2"

            [http]
            timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.base_url, "https://shop.example.com/api/v2");
        assert_eq!(config.http.timeout_secs, 10);
        // Omitted section falls back to its default
        assert_eq!(config.auth.base_url, "http://localhost:3001/api/v1");
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&ApiConfig::default()).unwrap();
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("[auth]"));
        assert!(toml_str.contains("[http]"));
    }
}
