/// Configuration Module
///
/// Connection settings are supplied once, validated before any network
/// I/O, and never mutated after the manager is constructed.
use crate::core::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const DEFAULT_PORT: u16 = 3306;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Immutable connection settings for one [`ConnectionManager`] instance.
///
/// `host`, `database`, `user` and `password` are required; `port` defaults
/// to 3306 and `autocommit` to `false` (statements only take effect after
/// an explicit `commit`).
///
/// [`ConnectionManager`]: crate::core::db::connection::ConnectionManager
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub autocommit: bool,
}

impl ConnectionConfig {
    /// Builds a configuration from a string map.
    ///
    /// Required keys: `host`, `database`, `user`, `password`. Optional:
    /// `port` (integer) and `autocommit` (boolean). Fails fast with
    /// [`Error::Config`] on a missing required key or an unparseable
    /// value, before any connection attempt.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        let port = match map.get("port") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("invalid value for 'port': '{raw}'")))?,
            None => DEFAULT_PORT,
        };
        let autocommit = match map.get("autocommit") {
            Some(raw) => parse_bool(raw)
                .ok_or_else(|| Error::Config(format!("invalid value for 'autocommit': '{raw}'")))?,
            None => false,
        };

        Ok(ConnectionConfig {
            host: require(map, "host")?,
            port,
            database: require(map, "database")?,
            user: require(map, "user")?,
            password: require(map, "password")?,
            autocommit,
        })
    }

    /// Loads a configuration from a TOML file at the given path.
    ///
    /// # Example
    ///
    /// ```toml
    /// host = "db.example.com"
    /// database = "app"
    /// user = "app"
    /// password = "secret"
    /// autocommit = true
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Renders the configuration as driver connection options.
    pub(crate) fn to_opts(&self) -> mysql::Opts {
        let builder = mysql::OptsBuilder::new()
            .ip_or_hostname(Some(self.host.clone()))
            .tcp_port(self.port)
            .db_name(Some(self.database.clone()))
            .user(Some(self.user.clone()))
            .pass(Some(self.password.clone()));
        mysql::Opts::from(builder)
    }
}

fn require(map: &HashMap<String, String>, key: &str) -> Result<String> {
    map.get(key)
        .cloned()
        .ok_or_else(|| Error::Config(format!("missing required key '{key}'")))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn full_map() -> HashMap<String, String> {
        [
            ("host", "localhost"),
            ("database", "app"),
            ("user", "app"),
            ("password", "secret"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_from_map_with_required_keys() {
        let config = ConnectionConfig::from_map(&full_map()).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3306);
        assert_eq!(config.database, "app");
        assert!(!config.autocommit);
    }

    #[test]
    fn test_from_map_missing_key_fails_fast() {
        for key in ["host", "database", "user", "password"] {
            let mut map = full_map();
            map.remove(key);
            let err = ConnectionConfig::from_map(&map).unwrap_err();
            match err {
                Error::Config(msg) => assert!(msg.contains(key)),
                _ => panic!("Expected Config error for missing '{key}'"),
            }
        }
    }

    #[test]
    fn test_from_map_optional_keys() {
        let mut map = full_map();
        map.insert("port".to_string(), "3307".to_string());
        map.insert("autocommit".to_string(), "true".to_string());
        let config = ConnectionConfig::from_map(&map).unwrap();
        assert_eq!(config.port, 3307);
        assert!(config.autocommit);
    }

    #[test]
    fn test_from_map_rejects_bad_values() {
        let mut map = full_map();
        map.insert("port".to_string(), "not-a-port".to_string());
        assert!(matches!(
            ConnectionConfig::from_map(&map),
            Err(Error::Config(_))
        ));

        let mut map = full_map();
        map.insert("autocommit".to_string(), "maybe".to_string());
        assert!(matches!(
            ConnectionConfig::from_map(&map),
            Err(Error::Config(_))
        ));
    }

    const SAMPLE_CONFIG: &str = r#"
host = "db.example.com"
port = 3307
database = "app"
user = "app"
password = "secret"
autocommit = true
"#;

    #[test]
    fn test_load_config_from_str() {
        let config: ConnectionConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.host, "db.example.com");
        assert_eq!(config.port, 3307);
        assert!(config.autocommit);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CONFIG.as_bytes()).unwrap();

        let config = ConnectionConfig::load(file.path()).unwrap();
        assert_eq!(config.database, "app");
        assert_eq!(config.user, "app");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = ConnectionConfig::load("/nonexistent/simplemysql.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
