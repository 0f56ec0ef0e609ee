/// Flat KEY=VALUE configuration file handling
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use tracing::info;

use crate::constants::{
    DEFAULT_CONFIG_FILENAME, DEFAULT_PLAIN_TEMPLATE, DEFAULT_PRESENT_TEMPLATE,
};
use crate::utils::string_utils::split_and_trim;

/// The configuration file could not be loaded
#[derive(Debug)]
pub enum ConfigError {
    NoHomeDir,
    NotFound(PathBuf),
    Unreadable(PathBuf, String),
    MissingKey(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoHomeDir => {
                write!(f, "Could not determine the home directory for the config file")
            }
            ConfigError::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            ConfigError::Unreadable(path, reason) => {
                write!(f, "Could not read config file {}: {}", path.display(), reason)
            }
            ConfigError::MissingKey(key) => {
                write!(
                    f,
                    "Missing required key in config file: {}. Add a line like {}=<value>",
                    key, key
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub sheet_url: String,
    /// Telegram chat ids to deliver to, in configured order
    pub chat_ids: Vec<String>,
    pub template_plain: String,
    pub template_present: String,
}

impl Config {
    /// Default config file path in the user's home directory
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = UserDirs::new().ok_or(ConfigError::NoHomeDir)?;
        Ok(dirs.home_dir().join(DEFAULT_CONFIG_FILENAME))
    }

    /// Load configuration from an explicit path, or the default path
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let entries = dotenvy::from_path_iter(path)
            .map_err(|e| ConfigError::Unreadable(path.to_path_buf(), e.to_string()))?;

        let mut values = HashMap::new();
        for entry in entries {
            let (key, value) = entry
                .map_err(|e| ConfigError::Unreadable(path.to_path_buf(), e.to_string()))?;
            values.insert(key, value);
        }

        let config = Self::from_values(&values)?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    fn from_values(values: &HashMap<String, String>) -> Result<Self, ConfigError> {
        fn require<'a>(
            values: &'a HashMap<String, String>,
            key: &'static str,
        ) -> Result<&'a str, ConfigError> {
            values
                .get(key)
                .map(String::as_str)
                .ok_or(ConfigError::MissingKey(key))
        }

        Ok(Self {
            bot_token: require(values, "BOT_TOKEN")?.to_string(),
            sheet_url: require(values, "SHEET_URL")?.to_string(),
            chat_ids: split_and_trim(require(values, "CHAT_IDS")?, ','),
            template_plain: values
                .get("TEMPLATE_PLAIN")
                .cloned()
                .unwrap_or_else(|| DEFAULT_PLAIN_TEMPLATE.to_string()),
            template_present: values
                .get("TEMPLATE_PRESENT")
                .cloned()
                .unwrap_or_else(|| DEFAULT_PRESENT_TEMPLATE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Write a throwaway config file under the system temp directory
    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("bdaybot-test-{}-{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_full_config() {
        let path = write_config(
            "full",
            "BOT_TOKEN=123456:ABC\nSHEET_URL=https://docs.google.com/spreadsheets/d/abc\nCHAT_IDS=111, 222,333\n",
        );

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.bot_token, "123456:ABC");
        assert_eq!(config.sheet_url, "https://docs.google.com/spreadsheets/d/abc");
        assert_eq!(config.chat_ids, vec!["111", "222", "333"]);
        assert_eq!(config.template_plain, DEFAULT_PLAIN_TEMPLATE);
        assert_eq!(config.template_present, DEFAULT_PRESENT_TEMPLATE);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_template_overrides() {
        let path = write_config(
            "templates",
            "BOT_TOKEN=t\nSHEET_URL=u\nCHAT_IDS=1\nTEMPLATE_PLAIN={name}\nTEMPLATE_PRESENT={name} gets {present}\n",
        );

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.template_plain, "{name}");
        assert_eq!(config.template_present, "{name} gets {present}");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("bdaybot-test-does-not-exist");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_missing_required_key() {
        let path = write_config("missing-key", "BOT_TOKEN=t\nSHEET_URL=u\n");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("CHAT_IDS")));
        assert!(err.to_string().contains("CHAT_IDS"));

        std::fs::remove_file(path).unwrap();
    }
}
