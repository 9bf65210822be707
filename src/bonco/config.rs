use crate::commands::top::DEFAULT_LIMIT;
use crate::error::{BoncoError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "BONCO_HOME";

/// Configuration for bonco, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoncoConfig {
    /// How many cards `top` lists when no limit is given
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,

    /// Whether quizzes shuffle their deck
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

fn default_top_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_shuffle() -> bool {
    true
}

impl Default for BoncoConfig {
    fn default() -> Self {
        Self {
            top_limit: default_top_limit(),
            shuffle: default_shuffle(),
        }
    }
}

impl BoncoConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BoncoError::Io)?;
        let config: BoncoConfig =
            serde_json::from_str(&content).map_err(BoncoError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BoncoError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BoncoError::Serialization)?;
        fs::write(config_path, content).map_err(BoncoError::Io)?;
        Ok(())
    }

    /// Value of `key` as text, `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "top-limit" => Some(self.top_limit.to_string()),
            "shuffle" => Some(self.shuffle.to_string()),
            _ => None,
        }
    }

    /// Set `key` from text.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "top-limit" => {
                self.top_limit = value.parse().map_err(|_| {
                    BoncoError::Api(format!("top-limit must be a number, got {:?}", value))
                })?;
            }
            "shuffle" => {
                self.shuffle = match value {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => {
                        return Err(BoncoError::Api(format!(
                            "shuffle must be true or false, got {:?}",
                            value
                        )))
                    }
                };
            }
            other => return Err(BoncoError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["top-limit", "shuffle"]
    }
}

/// Where bonco keeps its data: `explicit`, else `$BONCO_HOME`, else the platform data dir.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "bonco", "bonco")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| BoncoError::Store("Could not determine data dir".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = BoncoConfig::default();
        assert_eq!(config.top_limit, 10);
        assert!(config.shuffle);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = BoncoConfig::load(dir.path()).unwrap();
        assert_eq!(config, BoncoConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data");

        let mut config = BoncoConfig::default();
        config.set("top-limit", "25").unwrap();
        config.set("shuffle", "off").unwrap();
        config.save(&nested).unwrap();

        let loaded = BoncoConfig::load(&nested).unwrap();
        assert_eq!(loaded.top_limit, 25);
        assert!(!loaded.shuffle);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"shuffle": false}"#).unwrap();

        let config = BoncoConfig::load(dir.path()).unwrap();
        assert_eq!(config.top_limit, 10);
        assert!(!config.shuffle);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = BoncoConfig::default();
        assert!(config.set("top-limit", "many").is_err());
        assert!(config.set("shuffle", "maybe").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, BoncoConfig::default());
    }

    #[test]
    fn test_get_known_keys() {
        let config = BoncoConfig::default();
        for key in BoncoConfig::keys() {
            assert!(config.get(key).is_some());
        }
        assert_eq!(config.get("nope"), None);
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = PathBuf::from("/tmp/bonco-explicit");
        assert_eq!(resolve_data_dir(Some(dir.clone())).unwrap(), dir);
    }
}
