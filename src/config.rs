//! Runtime configuration for the catalog binaries.

use crate::error::{Error, Result};
use crate::query::{SortSpec, DEFAULT_SORT};
use serde::{Deserialize, Serialize};

/// Environment variable naming the SQLite database file.
pub const DB_PATH_ENV: &str = "DB_PATH";
/// Environment variable naming the HTTP port.
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite database file
    pub db_path: String,
    pub host: String,
    pub port: u16,
    /// Sort used when a listing request names none
    pub default_sort: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "./data.sqlite3".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            default_sort: DEFAULT_SORT.to_string(),
        }
    }
}

/// Values given on the command line. Each one that is set replaces the
/// corresponding field of the environment-derived config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub db_path: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub default_sort: Option<String>,
}

impl AppConfig {
    /// Defaults overridden by `DB_PATH` and `PORT` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the known keys.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(db_path) = value(DB_PATH_ENV) {
            config.db_path = db_path;
        }
        if let Some(port) = value(PORT_ENV) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{} is not a valid port: {}", PORT_ENV, port)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line `overrides` and validate the result.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(db_path) = overrides.db_path {
            self.db_path = db_path;
        }
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(default_sort) = overrides.default_sort {
            self.default_sort = default_sort;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.db_path.is_empty() {
            return Err(Error::Config("db_path must not be empty".to_string()));
        }
        if SortSpec::parse(&self.default_sort).is_none() {
            return Err(Error::Config(format!("unknown default sort: {}", self.default_sort)));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.default_sort, "year_desc");
    }

    #[test]
    fn test_env_overrides() {
        let config =
            AppConfig::from_lookup(lookup(&[("DB_PATH", "/tmp/events.db"), ("PORT", "9090")]))
                .unwrap();
        assert_eq!(config.db_path, "/tmp/events.db");
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = AppConfig::from_lookup(lookup(&[("DB_PATH", ""), ("PORT", " ")])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_bad_port() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_flags_override_environment() {
        let config = AppConfig::from_lookup(lookup(&[("DB_PATH", "/tmp/env.db"), ("PORT", "9090")]))
            .unwrap()
            .with_overrides(ConfigOverrides {
                port: Some(7000),
                host: Some("0.0.0.0".to_string()),
                ..ConfigOverrides::default()
            })
            .unwrap();
        assert_eq!(config.db_path, "/tmp/env.db");
        assert_eq!(config.bind_address(), "0.0.0.0:7000");
        assert_eq!(config.default_sort, "year_desc");
    }

    #[test]
    fn test_override_is_validated() {
        let result = AppConfig::default().with_overrides(ConfigOverrides {
            default_sort: Some("newest".to_string()),
            ..ConfigOverrides::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_bad_default_sort() {
        let config = AppConfig { default_sort: "bogus".to_string(), ..AppConfig::default() };
        assert!(config.validate().is_err());
    }
}
