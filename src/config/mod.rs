//! Application configuration.
//!
//! Aggregates configuration for every script family into a single Config
//! struct that can be loaded from YAML files or environment variables.
//! Required values are checked by the accessors, so a script fails at
//! startup with [`ConfigError::MissingConfiguration`] instead of sending
//! requests with empty credentials.

mod bulk;
mod checkout;
mod client;
mod storage;

pub use bulk::BulkConfig;
pub use checkout::{AddressConfig, CheckoutConfig};
pub use client::{PlatformConfig, DEFAULT_HTTP_TIMEOUT_SECS};
pub use storage::SeederConfig;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "fixtures.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "FIXTURES_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "FIXTURES";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "FIXTURES_LOG";

/// Environment variable for the platform base URL.
pub const BASE_URL_ENV_VAR: &str = "BASE_URL";
/// Environment variable for the admin username.
pub const ADMIN_USERNAME_ENV_VAR: &str = "ADMIN_USERNAME";
/// Environment variable for the admin password.
pub const ADMIN_PASSWORD_ENV_VAR: &str = "ADMIN_PASSWORD";
/// Environment variable for the database URL.
pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";

use serde::Deserialize;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required value was not provided by any source.
    #[error("MissingConfiguration: {name} is not set")]
    MissingConfiguration { name: &'static str },

    /// A value was provided but cannot be used.
    #[error("Invalid configuration for {name}: {message}")]
    Invalid { name: &'static str, message: String },

    /// The layered sources could not be read or deserialized.
    #[error("Configuration load error: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platform base URL, without the `/rest` or `/graphql` suffix.
    pub base_url: Option<String>,
    /// Admin username exchanged for a bearer token.
    pub admin_username: Option<String>,
    /// Admin password exchanged for a bearer token.
    pub admin_password: Option<String>,
    /// Database connection URL for the seeder.
    pub database_url: Option<String>,
    /// HTTP client timeout in seconds.
    pub http_timeout_secs: u64,
    /// Queue-message seeder settings.
    pub seeder: SeederConfig,
    /// Overrides applied on top of the selected bulk variant.
    pub bulk: BulkConfig,
    /// Fixed values used by the checkout workflow.
    pub checkout: CheckoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            admin_username: None,
            admin_password: None,
            database_url: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            seeder: SeederConfig::default(),
            bulk: BulkConfig::default(),
            checkout: CheckoutConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `fixtures.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    /// 5. Plain `BASE_URL`, `ADMIN_USERNAME`, `ADMIN_PASSWORD`, `DATABASE_URL`
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            // Values stay strings; numeric fields convert on deserialize
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX).separator("__"))
            // Plain BASE_URL, ADMIN_USERNAME, ... as older scripts expect
            .add_source(Environment::default())
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from a YAML document only.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, File, FileFormat};

        let config = ConfigLib::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Resolve the settings every REST and GraphQL script needs.
    pub fn platform(&self) -> Result<PlatformConfig, ConfigError> {
        let base_url = required(&self.base_url, BASE_URL_ENV_VAR)?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: BASE_URL_ENV_VAR,
                message: format!("expected an http(s) URL, got '{}'", base_url),
            });
        }

        Ok(PlatformConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_username: self.admin_username.clone().unwrap_or_default(),
            admin_password: self.admin_password.clone().unwrap_or_default(),
            timeout: std::time::Duration::from_secs(self.http_timeout_secs),
        })
    }

    /// Resolve platform settings and require admin credentials.
    pub fn admin_platform(&self) -> Result<PlatformConfig, ConfigError> {
        let platform = self.platform()?;
        required(&self.admin_username, ADMIN_USERNAME_ENV_VAR)?;
        required(&self.admin_password, ADMIN_PASSWORD_ENV_VAR)?;
        Ok(platform)
    }

    /// Resolve the seeder's database URL.
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        required(&self.database_url, DATABASE_URL_ENV_VAR)
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, ConfigError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingConfiguration { name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.base_url.is_none());
        assert_eq!(config.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(config.seeder.batch_size, 1000);
    }

    #[test]
    fn test_missing_base_url() {
        let config = Config::default();
        let err = config.platform().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingConfiguration { name: "BASE_URL" }
        ));
        assert_eq!(err.to_string(), "MissingConfiguration: BASE_URL is not set");
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let config = Config {
            base_url: Some("https://shop.test".to_string()),
            admin_username: Some("   ".to_string()),
            admin_password: Some("secret".to_string()),
            ..Config::default()
        };
        let err = config.admin_platform().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingConfiguration {
                name: "ADMIN_USERNAME"
            }
        ));
    }

    #[test]
    fn test_missing_password() {
        let config = Config {
            base_url: Some("https://shop.test".to_string()),
            admin_username: Some("admin".to_string()),
            ..Config::default()
        };
        let err = config.admin_platform().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingConfiguration {
                name: "ADMIN_PASSWORD"
            }
        ));
    }

    #[test]
    fn test_platform_trims_trailing_slash() {
        let config = Config {
            base_url: Some("https://shop.test/".to_string()),
            admin_username: Some("admin".to_string()),
            admin_password: Some("secret".to_string()),
            ..Config::default()
        };
        let platform = config.admin_platform().unwrap();
        assert_eq!(platform.base_url, "https://shop.test");
        assert_eq!(platform.admin_username, "admin");
    }

    #[test]
    fn test_platform_rejects_non_http_url() {
        let config = Config {
            base_url: Some("shop.test".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            config.platform(),
            Err(ConfigError::Invalid {
                name: "BASE_URL",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_database_url() {
        let config = Config::default();
        assert!(matches!(
            config.database_url(),
            Err(ConfigError::MissingConfiguration {
                name: "DATABASE_URL"
            })
        ));
    }

    #[test]
    fn test_from_yaml_sections() {
        let yaml = r#"
base_url: "http://localhost:8080"
database_url: "sqlite::memory:"
seeder:
  batch_size: 50
  total_records: 200
bulk:
  concurrency: 10
checkout:
  guest_email: "qa@example.com"
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.platform().unwrap().base_url, "http://localhost:8080");
        assert_eq!(config.database_url().unwrap(), "sqlite::memory:");
        assert_eq!(config.seeder.batch_size, 50);
        assert_eq!(config.seeder.total_records, 200);
        assert_eq!(config.bulk.concurrency, Some(10));
        assert_eq!(config.bulk.count, None);
        assert_eq!(config.checkout.guest_email, "qa@example.com");
        // Untouched fields keep their defaults
        assert_eq!(config.checkout.payment_method, "checkmo");
    }

    #[test]
    fn test_load_from_explicit_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "base_url: \"https://from-file.test\"").unwrap();
        writeln!(file, "http_timeout_secs: 5").unwrap();

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.http_timeout_secs, 5);
    }

    #[test]
    fn test_load_keeps_numeric_looking_strings() {
        std::env::set_var("ADMIN_PASSWORD", "007");
        std::env::set_var("FIXTURES__CHECKOUT__ADDRESS__POSTCODE", "02134");
        std::env::set_var("FIXTURES__SEEDER__BATCH_SIZE", "250");

        let config = Config::load(None);

        std::env::remove_var("ADMIN_PASSWORD");
        std::env::remove_var("FIXTURES__CHECKOUT__ADDRESS__POSTCODE");
        std::env::remove_var("FIXTURES__SEEDER__BATCH_SIZE");

        let config = config.unwrap();
        assert_eq!(config.admin_password.as_deref(), Some("007"));
        assert_eq!(config.checkout.address.postcode, "02134");
        assert_eq!(config.seeder.batch_size, 250);
    }
}
