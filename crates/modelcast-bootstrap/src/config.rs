//! Configuration management
//!
//! This module handles loading application configuration from:
//! - Default values
//! - Configuration files (JSON, YAML or TOML)
//! - Environment variables

use crate::error::{Error, Result};
use modelcast_core::{TransformerRegistry, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable overriding the relation depth limit
pub const ENV_MAX_DEPTH: &str = "MODELCAST_MAX_DEPTH";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "MODELCAST_LOG_LEVEL";
/// Environment variable overriding the log format
pub const ENV_LOG_FORMAT: &str = "MODELCAST_LOG_FORMAT";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model type name to transformer type name
    pub transformers: TransformerRegistry,

    /// Maximum nesting of relation paths
    pub max_relation_depth: usize,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// Output format
    pub format: LogFormat,

    /// Include thread IDs
    pub thread_ids: bool,

    /// Include file and line numbers
    pub source_location: bool,

    /// Per-module level overrides
    pub module_filter: BTreeMap<String, String>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Compact format for production
    #[default]
    Compact,
    /// Full format with all details
    Full,
    /// JSON structured format
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "full" => Ok(LogFormat::Full),
            "json" => Ok(LogFormat::Json),
            other => Err(Error::config(format!("invalid log format '{}'", other))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogFormat::Compact => "compact",
            LogFormat::Full => "full",
            LogFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(Error::InvalidFormat {
                path: path.to_path_buf(),
                expected: "json, yaml or toml".to_string(),
            }),
        }
    }

    /// Parse configuration content in this format
    pub fn parse(self, content: &str) -> Result<AppConfig> {
        let config = match self {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            transformers: TransformerRegistry::empty(),
            max_relation_depth: DEFAULT_MAX_DEPTH,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            thread_ids: false,
            source_location: false,
            module_filter: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a file, picking the parser by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let config = format.parse(&content)?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from_paths(Self::default_config_paths())
    }

    /// Load the first existing file among `paths`
    ///
    /// A file that exists but cannot be read or parsed is an error; defaults
    /// are used only when none of the paths exist.
    pub fn load_from_paths<I>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations, then
    /// apply environment overrides
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.merge_with_env()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn merge_with_env(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(depth) = lookup(ENV_MAX_DEPTH) {
            self.max_relation_depth = depth.trim().parse().map_err(|e| {
                Error::config(format!("{} must be a positive integer: {}", ENV_MAX_DEPTH, e))
            })?;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }

        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format.parse()?;
        }

        self.validate()
    }

    /// Check settings that deserialization alone cannot
    pub fn validate(&self) -> Result<()> {
        if self.max_relation_depth == 0 {
            return Err(Error::config("max_relation_depth must be at least 1"));
        }

        if self.logging.level.trim().is_empty() {
            return Err(Error::config("logging level must not be empty"));
        }

        self.transformers.validate()?;
        Ok(())
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let names = ["modelcast.yaml", "modelcast.json", "modelcast.toml"];
        let mut paths = Vec::new();

        // Current directory
        for name in names {
            paths.push(PathBuf::from(format!(".{}", name)));
            paths.push(PathBuf::from(name));
        }

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            let modelcast_dir = config_dir.join("modelcast");
            paths.push(modelcast_dir.join("config.yaml"));
            paths.push(modelcast_dir.join("config.json"));
            paths.push(modelcast_dir.join("config.toml"));
        }

        // Home directory
        if let Some(home_dir) = dirs::home_dir() {
            for name in names {
                paths.push(home_dir.join(format!(".{}", name)));
            }
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.max_relation_depth, DEFAULT_MAX_DEPTH);
        assert!(config.transformers.is_empty());
        assert_eq!(config.logging.format, LogFormat::Compact);
        config.validate().unwrap();
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")).unwrap(), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")).unwrap(), ConfigFormat::Toml);
        assert!(matches!(
            ConfigFormat::from_path(Path::new("a.ini")),
            Err(Error::InvalidFormat { .. })
        ));
        assert!(ConfigFormat::from_path(Path::new("modelcast")).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup(&[
                (ENV_MAX_DEPTH, "3"),
                (ENV_LOG_LEVEL, "debug"),
                (ENV_LOG_FORMAT, "JSON"),
            ]))
            .unwrap();

        assert_eq!(config.max_relation_depth, 3);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_env_overrides() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(lookup(&[(ENV_MAX_DEPTH, "deep")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_MAX_DEPTH));

        let err = config
            .apply_overrides(lookup(&[(ENV_MAX_DEPTH, "0")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let mut config = AppConfig::default();
        assert!(config
            .apply_overrides(lookup(&[(ENV_LOG_FORMAT, "pretty")]))
            .is_err());
    }

    #[test]
    fn test_log_format_round_trip_names() {
        for format in [LogFormat::Compact, LogFormat::Full, LogFormat::Json] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_parse_partial_yaml_keeps_defaults() {
        let config = ConfigFormat::Yaml.parse("max_relation_depth: 4\n").unwrap();
        assert_eq!(config.max_relation_depth, 4);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modelcast.yaml");
        std::fs::write(&path, "transformers: [this is not a map\n").unwrap();

        let result = AppConfig::load_from_paths(vec![dir.path().join("missing.toml"), path]);
        assert!(matches!(result, Err(Error::Yaml(_))));
    }

    #[test]
    fn test_load_uses_defaults_when_no_file_exists() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().join("modelcast.toml"), dir.path().join("modelcast.yaml")];

        let config = AppConfig::load_from_paths(paths).unwrap();
        assert!(config.transformers.is_empty());
        assert_eq!(config.max_relation_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_load_takes_first_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("modelcast.json");
        let second = dir.path().join("modelcast.yaml");
        std::fs::write(&first, r#"{ "max_relation_depth": 3 }"#).unwrap();
        std::fs::write(&second, "max_relation_depth: 5\n").unwrap();

        let paths = vec![dir.path().join("modelcast.toml"), first, second];
        assert_eq!(AppConfig::load_from_paths(paths).unwrap().max_relation_depth, 3);
    }
}
