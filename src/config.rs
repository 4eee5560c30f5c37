// Calculator configuration, persisted as RON

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "rpncalc";
const CONFIG_FILE_NAME: &str = "config.ron";

/// Largest number of significant digits an f64 carries
pub const MAX_PRECISION: usize = 17;

/// Upper bound on the undo history length
pub const MAX_HISTORY_LIMIT: usize = 1_000_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] ron::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How the stack is rendered after each change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number of top elements shown
    pub depth: usize,
    /// Significant digits per value
    pub precision: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            precision: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. "warn" or "rpncalc=debug"
    pub level: String,
    /// Append logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    pub display: DisplayConfig,
    /// Number of commands kept for undo
    pub history_limit: usize,
    pub show_banner: bool,
    pub log: LogConfig,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            history_limit: crate::command::manager::DEFAULT_MAX_HISTORY,
            show_banner: true,
            log: LogConfig::default(),
        }
    }
}

impl CalcConfig {
    /// `<config dir>/rpncalc/config.ron`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: CalcConfig = ron::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else the default file if it exists, else defaults
    ///
    /// An explicitly given path must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.is_file() => Self::load(&default),
            _ => Ok(Self::default()),
        }
    }

    /// Write the configuration as pretty RON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.depth == 0 {
            return Err(ConfigError::Invalid(
                "display.depth must be at least 1".into(),
            ));
        }
        if !(1..=MAX_PRECISION).contains(&self.display.precision) {
            return Err(ConfigError::Invalid(format!(
                "display.precision must be between 1 and {MAX_PRECISION}"
            )));
        }
        if !(1..=MAX_HISTORY_LIMIT).contains(&self.history_limit) {
            return Err(ConfigError::Invalid(format!(
                "history_limit must be between 1 and {MAX_HISTORY_LIMIT}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CalcConfig::default();
        assert_eq!(config.display.depth, 4);
        assert_eq!(config.display.precision, 12);
        assert_eq!(config.history_limit, 100);
        assert!(config.show_banner);
        assert_eq!(config.log.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ron");

        let mut config = CalcConfig::default();
        config.display.depth = 8;
        config.log.file = Some(PathBuf::from("/tmp/rpncalc.log"));
        config.save(&path).unwrap();

        assert_eq!(CalcConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ron");
        fs::write(&path, "(display: (precision: 6), show_banner: false)").unwrap();

        let config = CalcConfig::load(&path).unwrap();
        assert_eq!(config.display.precision, 6);
        assert_eq!(config.display.depth, 4);
        assert!(!config.show_banner);
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ron");
        fs::write(&path, "(display: (depth: 0))").unwrap();
        assert!(matches!(
            CalcConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));

        let mut config = CalcConfig::default();
        config.display.precision = 30;
        assert!(config.validate().is_err());
        config.display.precision = 12;
        config.history_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_history_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ron");
        fs::write(&path, "(history_limit: 18446744073709551615)").unwrap();
        assert!(matches!(
            CalcConfig::load(&path),
            Err(ConfigError::Invalid(_))
        ));

        let mut config = CalcConfig::default();
        config.history_limit = MAX_HISTORY_LIMIT;
        assert!(config.validate().is_ok());
        config.history_limit = MAX_HISTORY_LIMIT + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ron");
        fs::write(&path, "(display: ").unwrap();
        assert!(matches!(CalcConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.ron");
        assert!(matches!(
            CalcConfig::load_or_default(Some(&path)),
            Err(ConfigError::Io(_))
        ));
    }
}
