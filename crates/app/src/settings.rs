//! Handles settings for the application.
//!
//! Configuration is read from an optional `settings.toml` next to the binary
//! and from `CASHBOOK__*` environment variables, which take precedence
//! (e.g. `CASHBOOK__SERVER__PORT=8080`).

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    /// Log level applied to every crate of the workspace.
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_sources(DEFAULT_CONFIG_FILE, "CASHBOOK")
    }

    fn from_sources(file: &str, env_prefix: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn server_section_is_optional() {
        let settings = parse("[app]\nlevel = \"debug\"\n");
        assert_eq!(settings.app.level, "debug");
        assert!(settings.server.is_none());
    }

    #[test]
    fn sqlite_database_carries_its_path() {
        let settings = parse(
            "[server]\nport = 3000\ndatabase = { sqlite = \"cashbook.db\" }\n",
        );
        let server = settings.server.unwrap();
        assert_eq!(server.port, 3000);
        assert_eq!(server.database, Database::Sqlite("cashbook.db".to_string()));
        assert_eq!(settings.app.level, "info");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings =
            Settings::from_sources("does-not-exist/settings", "CASHBOOK_TEST_UNSET").unwrap();
        assert!(settings.server.is_none());
    }
}
