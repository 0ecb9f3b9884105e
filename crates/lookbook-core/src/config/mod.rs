use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::compatibility::DEFAULT_CANDIDATES_PER_SLOT;
use crate::looks::{GenerationSettings, SilhouettePolicy};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Where the compatibility edges live once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBackend {
    Memory,
    Sqlite,
}

impl FromStr for IndexBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(ConfigError::InvalidBackend(other.to_string())),
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
    pub index: IndexConfig,
    pub generation: GenerationSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("LOOKBOOK_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("LOOKBOOK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let path = env::var("LOOKBOOK_CATALOG_PATH").unwrap_or_else(|_| "catalog.json".to_string());

        let backend = env::var("LOOKBOOK_INDEX_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .parse::<IndexBackend>()?;
        let sqlite_url =
            env::var("LOOKBOOK_SQLITE_URL").unwrap_or_else(|_| "sqlite://lookbook.db".to_string());
        let cache_ttl_secs = parsed_var("LOOKBOOK_CACHE_TTL_SECS", 300u64)?;
        let cache_capacity = parsed_var("LOOKBOOK_CACHE_CAPACITY", 500u64)?;

        let candidates_per_slot =
            parsed_var("LOOKBOOK_CANDIDATES_PER_SLOT", DEFAULT_CANDIDATES_PER_SLOT)?;
        if candidates_per_slot == 0 {
            return Err(ConfigError::InvalidNumber {
                var: "LOOKBOOK_CANDIDATES_PER_SLOT",
                value: "0".to_string(),
            });
        }
        let streetwear_exempts_statement_top =
            flag_var("LOOKBOOK_STREETWEAR_EXEMPTS_STATEMENT_TOP", true)?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            catalog: CatalogConfig {
                path: PathBuf::from(path),
            },
            index: IndexConfig {
                backend,
                sqlite_url,
                cache_ttl: Duration::from_secs(cache_ttl_secs),
                cache_capacity,
            },
            generation: GenerationSettings {
                candidates_per_slot,
                policy: SilhouettePolicy {
                    streetwear_exempts_statement_top,
                },
            },
        })
    }
}

fn parsed_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        Err(_) => Ok(default),
    }
}

fn flag_var(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(value) = env::var(var) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var, value }),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

/// Backing store and query cache for the compatibility index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub backend: IndexBackend,
    pub sqlite_url: String,
    pub cache_ttl: Duration,
    /// Zero disables the cache.
    pub cache_capacity: u64,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBackend(String),
    InvalidNumber { var: &'static str, value: String },
    InvalidFlag { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBackend(value) => write!(
                f,
                "LOOKBOOK_INDEX_BACKEND must be `memory` or `sqlite`, got '{}'",
                value
            ),
            ConfigError::InvalidNumber { var, value } => {
                write!(f, "{} must be a positive integer, got '{}'", var, value)
            }
            ConfigError::InvalidFlag { var, value } => {
                write!(f, "{} must be true or false, got '{}'", var, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for var in [
            "LOOKBOOK_ENV",
            "LOOKBOOK_LOG_LEVEL",
            "LOOKBOOK_CATALOG_PATH",
            "LOOKBOOK_INDEX_BACKEND",
            "LOOKBOOK_SQLITE_URL",
            "LOOKBOOK_CANDIDATES_PER_SLOT",
            "LOOKBOOK_CACHE_TTL_SECS",
            "LOOKBOOK_CACHE_CAPACITY",
            "LOOKBOOK_STREETWEAR_EXEMPTS_STATEMENT_TOP",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.catalog.path, PathBuf::from("catalog.json"));
        assert_eq!(config.index.backend, IndexBackend::Memory);
        assert_eq!(config.index.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.index.cache_capacity, 500);
        assert_eq!(config.generation.candidates_per_slot, 25);
        assert!(config.generation.policy.streetwear_exempts_statement_top);
    }

    #[test]
    fn reads_backend_and_policy_switch() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LOOKBOOK_ENV", "prod");
        env::set_var("LOOKBOOK_INDEX_BACKEND", "SQLite");
        env::set_var("LOOKBOOK_STREETWEAR_EXEMPTS_STATEMENT_TOP", "off");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.index.backend, IndexBackend::Sqlite);
        assert!(!config.generation.policy.streetwear_exempts_statement_top);
        reset_env();
    }

    #[test]
    fn rejects_malformed_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LOOKBOOK_CACHE_CAPACITY", "lots");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidNumber {
                var: "LOOKBOOK_CACHE_CAPACITY",
                ..
            })
        ));

        reset_env();
        env::set_var("LOOKBOOK_INDEX_BACKEND", "postgres");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidBackend(value)) if value == "postgres"
        ));
        reset_env();
    }
}
