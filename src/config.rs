//! Ingestion configuration file support
//!
//! Handles parsing of `.catalog-ingest.toml` configuration files and
//! environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".catalog-ingest.toml";

/// Default DataHub GMS endpoint
pub const DEFAULT_DATAHUB_ENDPOINT: &str = "http://localhost:8080";

/// Default environment tag for dataset URNs
pub const DEFAULT_ENV: &str = "PROD";

/// Default expectation store directory
pub const DEFAULT_STORE_DIR: &str = "gx";

/// Environment variable for the DataHub endpoint
pub const ENV_DATAHUB_ENDPOINT: &str = "CATALOG_INGEST_DATAHUB_ENDPOINT";

/// Environment variable for the DataHub access token
pub const ENV_DATAHUB_TOKEN: &str = "CATALOG_INGEST_DATAHUB_TOKEN";

/// Environment variable for the data platform name
pub const ENV_PLATFORM: &str = "CATALOG_INGEST_PLATFORM";

/// Environment variable for the environment tag
pub const ENV_ENV: &str = "CATALOG_INGEST_ENV";

/// Environment variable for the domain name
pub const ENV_DOMAIN: &str = "CATALOG_INGEST_DOMAIN";

/// Environment variable for the expectation store directory
pub const ENV_STORE_DIR: &str = "CATALOG_INGEST_STORE_DIR";

/// Error loading or saving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {}", .0.display(), .1)]
    Read(PathBuf, String),
    #[error("Failed to write config {}: {}", .0.display(), .1)]
    Write(PathBuf, String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// DataHub connection section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatahubSection {
    /// GMS REST endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Personal access token, sent as a bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for throttled or unavailable responses
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First retry delay; doubles on each attempt
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

fn default_endpoint() -> String {
    DEFAULT_DATAHUB_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    4
}

fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for DatahubSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Catalog naming section: how DCAT datasets are addressed in DataHub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Data platform name used in dataset URNs
    #[serde(default)]
    pub platform: String,

    /// Environment tag used in dataset URNs
    #[serde(default = "default_env")]
    pub env: String,

    /// Domain name for the domain aspect and browse paths
    #[serde(default)]
    pub domain: String,
}

fn default_env() -> String {
    DEFAULT_ENV.to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            platform: String::new(),
            env: default_env(),
            domain: String::new(),
        }
    }
}

impl CatalogSettings {
    pub fn new(
        platform: impl Into<String>,
        env: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            env: env.into(),
            domain: domain.into(),
        }
    }
}

/// Expectation suite storage section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectationsSection {
    /// Root directory of the file suite store (relative to the config dir)
    #[serde(default = "default_store_dir")]
    pub store_dir: String,
}

fn default_store_dir() -> String {
    DEFAULT_STORE_DIR.to_string()
}

impl Default for ExpectationsSection {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
        }
    }
}

/// Main configuration structure
///
/// Represents the `.catalog-ingest.toml` configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IngestConfig {
    #[serde(default)]
    pub datahub: DatahubSection,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub expectations: ExpectationsSection,
}

impl IngestConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.catalog-ingest.toml` in the directory.
    /// Falls back to defaults if not found.
    pub fn load(dir: &Path) -> ConfigResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::Read(config_path.clone(), e.to_string()))?;

            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a directory
    pub fn save(&self, dir: &Path) -> ConfigResult<()> {
        let config_path = dir.join(CONFIG_FILENAME);
        let content = self.to_toml()?;

        std::fs::write(&config_path, content)
            .map_err(|e| ConfigError::Write(config_path, e.to_string()))?;

        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (environment, test fixtures)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_DATAHUB_ENDPOINT) {
            self.datahub.endpoint = endpoint;
        }
        if let Some(token) = lookup(ENV_DATAHUB_TOKEN) {
            self.datahub.token = Some(token);
        }
        if let Some(platform) = lookup(ENV_PLATFORM) {
            self.catalog.platform = platform;
        }
        if let Some(env) = lookup(ENV_ENV) {
            self.catalog.env = env;
        }
        if let Some(domain) = lookup(ENV_DOMAIN) {
            self.catalog.domain = domain;
        }
        if let Some(store_dir) = lookup(ENV_STORE_DIR) {
            self.expectations.store_dir = store_dir;
        }
    }

    /// Resolve the suite store directory against a base directory
    pub fn store_path(&self, base: &Path) -> PathBuf {
        if self.expectations.store_dir.is_empty() {
            base.join(DEFAULT_STORE_DIR)
        } else if Path::new(&self.expectations.store_dir).is_absolute() {
            PathBuf::from(&self.expectations.store_dir)
        } else {
            base.join(&self.expectations.store_dir)
        }
    }

    /// Check if configuration exists in a directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILENAME).exists()
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Catalog ingestion configuration

[datahub]
# DataHub GMS REST endpoint
endpoint = "http://localhost:8080"

# Personal access token (or set CATALOG_INGEST_DATAHUB_TOKEN)
# token = "..."

timeout_secs = 30

# Retries on 429/502/503/504 and connection failures
max_retries = 4
retry_backoff_ms = 500

[catalog]
# Data platform used in dataset URNs
platform = "opendata"

# Environment tag used in dataset URNs
env = "PROD"

# Domain for the domain aspect and browse paths
domain = "open-data"

[expectations]
# Expectation suite store (relative to this file, or absolute)
store_dir = "gx"
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = IngestConfig::new();
        assert_eq!(config.datahub.endpoint, DEFAULT_DATAHUB_ENDPOINT);
        assert_eq!(config.datahub.max_retries, 4);
        assert_eq!(config.catalog.env, "PROD");
        assert_eq!(config.catalog.platform, "");
        assert_eq!(config.catalog.domain, "");
        assert_eq!(config.expectations.store_dir, DEFAULT_STORE_DIR);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[datahub]
endpoint = "http://gms:8080"
token = "secret"
max_retries = 1

[catalog]
platform = "ckan"
domain = "transport"
"#;
        let config = IngestConfig::parse(toml).unwrap();
        assert_eq!(config.datahub.endpoint, "http://gms:8080");
        assert_eq!(config.datahub.token.as_deref(), Some("secret"));
        assert_eq!(config.datahub.max_retries, 1);
        assert_eq!(config.datahub.timeout_secs, 30);
        assert_eq!(config.catalog.platform, "ckan");
        assert_eq!(config.catalog.env, "PROD");
        assert_eq!(config.catalog.domain, "transport");
    }

    #[test]
    fn test_io_error_messages() {
        let err = ConfigError::Read(PathBuf::from("/work/.catalog-ingest.toml"), "denied".into());
        assert_eq!(
            err.to_string(),
            "Failed to read config /work/.catalog-ingest.toml: denied"
        );
        let err = ConfigError::Write(PathBuf::from("/ro/.catalog-ingest.toml"), "read-only".into());
        assert_eq!(
            err.to_string(),
            "Failed to write config /ro/.catalog-ingest.toml: read-only"
        );
    }

    #[test]
    fn test_load_unreadable_config() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(CONFIG_FILENAME)).unwrap();
        let err = IngestConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read(..)));
        assert!(err.to_string().starts_with("Failed to read config "));
    }

    #[test]
    fn test_parse_invalid_config() {
        let err = IngestConfig::parse("[datahub\nendpoint = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            (ENV_PLATFORM, "socrata"),
            (ENV_ENV, "DEV"),
            (ENV_DATAHUB_TOKEN, "tok"),
        ]);
        let mut config = IngestConfig::new();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.catalog.platform, "socrata");
        assert_eq!(config.catalog.env, "DEV");
        assert_eq!(config.datahub.token.as_deref(), Some("tok"));
        assert_eq!(config.datahub.endpoint, DEFAULT_DATAHUB_ENDPOINT);
    }

    #[test]
    fn test_save_and_parse_back() {
        let dir = tempdir().unwrap();
        let mut config = IngestConfig::new();
        config.catalog = CatalogSettings::new("opendata", "PROD", "health");

        config.save(dir.path()).unwrap();
        assert!(IngestConfig::exists(dir.path()));

        let content = std::fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        let loaded = IngestConfig::parse(&content).unwrap();
        assert_eq!(loaded.catalog, config.catalog);
    }

    #[test]
    fn test_store_path() {
        let config = IngestConfig::new();
        assert_eq!(
            config.store_path(Path::new("/work")),
            PathBuf::from("/work/gx")
        );

        let mut absolute = IngestConfig::new();
        absolute.expectations.store_dir = "/var/gx".to_string();
        assert_eq!(
            absolute.store_path(Path::new("/work")),
            PathBuf::from("/var/gx")
        );
    }

    #[test]
    fn test_sample_config_is_valid() {
        let config = IngestConfig::parse(sample_config()).unwrap();
        assert_eq!(config.catalog.platform, "opendata");
        assert_eq!(config.catalog.domain, "open-data");
    }
}
