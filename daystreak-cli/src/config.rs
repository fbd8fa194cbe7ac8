//! User configuration, managed by confy
//!
//! Stored under the application name `daystreak` in the platform config
//! directory. `DAYSTREAK_STORE` overrides the store location.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const APP_NAME: &str = "daystreak";
pub const STORE_ENV: &str = "DAYSTREAK_STORE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the store file
    pub data_directory: String,
    /// File name of the key-value store
    pub store_filename: String,
    /// Log level when neither RUST_LOG nor -v is given
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_directory = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME);

        Self {
            data_directory: data_directory.to_string_lossy().into_owned(),
            store_filename: "store.json".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, None)
    }

    /// Store file location, honoring the environment override
    pub fn store_path(&self) -> PathBuf {
        self.store_path_with(std::env::var_os(STORE_ENV).map(PathBuf::from))
    }

    fn store_path_with(&self, override_path: Option<PathBuf>) -> PathBuf {
        override_path
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(&self.data_directory).join(&self.store_filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_store_path() {
        let cfg = Config {
            data_directory: "/tmp/daystreak".to_string(),
            ..Config::default()
        };
        assert_eq!(
            cfg.store_path_with(None),
            PathBuf::from("/tmp/daystreak/store.json")
        );
    }

    #[test]
    fn test_override_wins_unless_empty() {
        let cfg = Config::default();
        assert_eq!(
            cfg.store_path_with(Some(PathBuf::from("/elsewhere/s.json"))),
            PathBuf::from("/elsewhere/s.json")
        );
        assert_eq!(
            cfg.store_path_with(Some(PathBuf::new())),
            PathBuf::from(&cfg.data_directory).join("store.json")
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: Config = toml::from_str("log_level = \"debug\"").unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.store_filename, "store.json");
    }
}
