//! Settings for the reporters.
//!
//! JSON shape (every field optional):
//! {
//!   "log_filter": "index.php",   // null keeps every URL
//!   "top": 20,
//!   "query_width": 55,
//!   "mysql": { "host": "localhost", "port": 3306, "database": "information_schema" }
//! }
//!
//! Command line flags override the file (see [`DiagConfig::apply_overrides`]);
//! the file overrides the defaults. The process tables take no settings.

use crate::error::ConfigError;
use crate::model::{DEFAULT_URL_FILTER, UrlFilter};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagConfig {
    pub log_filter: Option<String>,
    pub top: usize,
    pub query_width: usize,
    pub mysql: MysqlConfig,
}

impl Default for DiagConfig {
    fn default() -> Self {
        Self {
            log_filter: Some(DEFAULT_URL_FILTER.to_string()),
            top: 20,
            query_width: 55,
            mysql: MysqlConfig::default(),
        }
    }
}

impl DiagConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Layer the `web` flags over whatever was loaded.
    ///
    /// `all_urls` wins over `url_match`; flags left unset keep the loaded value.
    pub fn apply_overrides(&mut self, overrides: WebOverrides) {
        if overrides.all_urls {
            self.log_filter = None;
        } else if let Some(needle) = overrides.url_match {
            self.log_filter = Some(needle);
        }
        if let Some(top) = overrides.top {
            self.top = top;
        }
        if let Some(host) = overrides.mysql_host {
            self.mysql.host = host;
        }
        if let Some(port) = overrides.mysql_port {
            self.mysql.port = port;
        }
    }

    pub fn url_filter(&self) -> UrlFilter {
        match &self.log_filter {
            Some(needle) => UrlFilter::Substring(needle.clone()),
            None => UrlFilter::All,
        }
    }
}

/// Settings given as `web` flags.
#[derive(Debug, Clone, Default)]
pub struct WebOverrides {
    pub url_match: Option<String>,
    pub all_urls: bool,
    pub top: Option<usize>,
    pub mysql_host: Option<String>,
    pub mysql_port: Option<u16>,
}

/// Where the database process list lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MysqlConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl Default for MysqlConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            database: "information_schema".to_string(),
        }
    }
}

/// Database login, passed through to the driver untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct DbCredentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl DbCredentials {
    /// Pair up the two credential flags.
    ///
    /// Neither given means no database check; only one given is a usage error.
    pub fn from_flags(
        user: Option<String>,
        password: Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        match (user, password) {
            (Some(user), Some(password)) => Ok(Some(Self { user, password })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::IncompleteCredentials),
        }
    }
}
