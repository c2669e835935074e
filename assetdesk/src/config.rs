//! Runtime configuration read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite::memory:` |
//! | `ASSETDESK_BIND` | `0.0.0.0:3000` |
//! | `ASSETDESK_PAGE_SIZE` | `10` |
//! | `ASSETDESK_MAX_PAGE_SIZE` | `1000` |
//! | `ASSETDESK_LOG` | `info` |
//! | `ASSETDESK_BOOTSTRAP_SCHEMA` | `true` for SQLite, `false` otherwise |

use std::fmt;
use std::net::SocketAddr;

use crate::filtering::DEFAULT_PAGE_SIZE;

const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_MAX_PAGE_SIZE: u64 = 1000;
const DEFAULT_LOG: &str = "info";

#[derive(Debug)]
pub enum ConfigError {
    Invalid { variable: &'static str, value: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid { variable, value, reason } => {
                write!(f, "invalid value '{value}' for {variable}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Page sizes handed to the list handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind: SocketAddr,
    pub paging: PagingConfig,
    pub log: String,
    /// Create the bundled tables on startup
    pub bootstrap_schema: bool,
}

impl AppConfig {
    /// Read the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let bind_raw = var("ASSETDESK_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            variable: "ASSETDESK_BIND",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let default_page_size = parse_page_size("ASSETDESK_PAGE_SIZE", var("ASSETDESK_PAGE_SIZE"), DEFAULT_PAGE_SIZE)?;
        let max_page_size =
            parse_page_size("ASSETDESK_MAX_PAGE_SIZE", var("ASSETDESK_MAX_PAGE_SIZE"), DEFAULT_MAX_PAGE_SIZE)?;
        if default_page_size > max_page_size {
            return Err(ConfigError::Invalid {
                variable: "ASSETDESK_PAGE_SIZE",
                value: default_page_size.to_string(),
                reason: format!("must not exceed ASSETDESK_MAX_PAGE_SIZE ({max_page_size})"),
            });
        }

        let bootstrap_schema = match var("ASSETDESK_BOOTSTRAP_SCHEMA") {
            Some(raw) => parse_flag("ASSETDESK_BOOTSTRAP_SCHEMA", &raw)?,
            None => database_url.starts_with("sqlite:"),
        };

        Ok(Self {
            database_url,
            bind,
            paging: PagingConfig {
                default_page_size,
                max_page_size,
            },
            log: var("ASSETDESK_LOG").unwrap_or_else(|| DEFAULT_LOG.to_string()),
            bootstrap_schema,
        })
    }
}

fn parse_page_size(variable: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(size) if size > 0 => Ok(size),
        Ok(_) => Err(ConfigError::Invalid {
            variable,
            value: raw,
            reason: "must be greater than zero".to_string(),
        }),
        Err(e) => Err(ConfigError::Invalid {
            variable,
            reason: e.to_string(),
            value: raw,
        }),
    }
}

fn parse_flag(variable: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            variable,
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind.port(), 3000);
        assert_eq!(config.paging, PagingConfig::default());
        assert_eq!(config.log, "info");
        assert!(config.bootstrap_schema);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("DATABASE_URL", "postgres://localhost/assetdesk"),
            ("ASSETDESK_BIND", "127.0.0.1:8080"),
            ("ASSETDESK_PAGE_SIZE", "25"),
            ("ASSETDESK_MAX_PAGE_SIZE", "200"),
            ("ASSETDESK_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.paging.default_page_size, 25);
        assert_eq!(config.paging.max_page_size, 200);
        assert_eq!(config.log, "debug");
        assert!(!config.bootstrap_schema);
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = config(&[("ASSETDESK_PAGE_SIZE", ""), ("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.paging.default_page_size, 10);
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        let err = config(&[("ASSETDESK_PAGE_SIZE", "ten")]).unwrap_err();
        assert!(err.to_string().contains("ASSETDESK_PAGE_SIZE"));
        assert!(config(&[("ASSETDESK_MAX_PAGE_SIZE", "0")]).is_err());
        assert!(config(&[("ASSETDESK_PAGE_SIZE", "50"), ("ASSETDESK_MAX_PAGE_SIZE", "20")]).is_err());
    }

    #[test]
    fn test_invalid_bind_and_flag() {
        assert!(config(&[("ASSETDESK_BIND", "localhost")]).is_err());
        assert!(config(&[("ASSETDESK_BOOTSTRAP_SCHEMA", "maybe")]).is_err());
        assert!(!config(&[("ASSETDESK_BOOTSTRAP_SCHEMA", "off")]).unwrap().bootstrap_schema);
    }
}
