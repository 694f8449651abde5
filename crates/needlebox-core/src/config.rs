//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/needlebox/config.toml)
//! 3. Environment variables (NEEDLEBOX_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable prefix
const ENV_PREFIX: &str = "NEEDLEBOX";

/// How command output is rendered when no flag says otherwise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Human,
    Json,
}

impl std::str::FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(Format::Human),
            "json" => Ok(Format::Json),
            other => bail!("Invalid format '{}'. Use 'human' or 'json'.", other),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Human => write!(f, "human"),
            Format::Json => write!(f, "json"),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level for needlebox crates (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Output format used when neither --json nor --quiet is given
    #[serde(default)]
    pub default_format: Format,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
            default_format: Format::default(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (NEEDLEBOX_LOG_LEVEL, NEEDLEBOX_LOG_FILE, NEEDLEBOX_FORMAT)
    /// 2. Config file (~/.config/needlebox/config.toml or NEEDLEBOX_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(config_path: Option<&PathBuf>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // NEEDLEBOX_LOG_LEVEL
        if let Ok(val) = std::env::var(format!("{}_LOG_LEVEL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.log_level = val;
            }
        }

        // NEEDLEBOX_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // NEEDLEBOX_FORMAT; unparseable values keep the current format
        if let Ok(val) = std::env::var(format!("{}_FORMAT", ENV_PREFIX)) {
            match val.parse() {
                Ok(format) => self.default_format = format,
                Err(e) => warn!(
                    "Ignoring {}_FORMAT: {} (keeping {})",
                    ENV_PREFIX, e, self.default_format
                ),
            }
        }
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with NEEDLEBOX_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("needlebox")
            .join("config.toml")
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "NEEDLEBOX_LOG_LEVEL",
        "NEEDLEBOX_LOG_FILE",
        "NEEDLEBOX_FORMAT",
        "NEEDLEBOX_CONFIG",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, "warn");
        assert!(config.log_file.is_none());
        assert_eq!(config.default_format, Format::Human);
    }

    #[test]
    fn test_env_override_log_level() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("NEEDLEBOX_LOG_LEVEL", "debug");
        config.apply_env_overrides();
        assert_eq!(config.log_level, "debug");

        // Empty string keeps the current level
        env::set_var("NEEDLEBOX_LOG_LEVEL", "");
        config.apply_env_overrides();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("NEEDLEBOX_LOG_FILE", "/tmp/needlebox.log");
        config.apply_env_overrides();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/needlebox.log")));

        // Empty string clears it
        env::set_var("NEEDLEBOX_LOG_FILE", "");
        config.apply_env_overrides();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_env_override_format() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("NEEDLEBOX_FORMAT", "JSON");
        config.apply_env_overrides();
        assert_eq!(config.default_format, Format::Json);

        env::set_var("NEEDLEBOX_FORMAT", "yaml");
        config.apply_env_overrides();
        assert_eq!(config.default_format, Format::Json);
    }

    /// Collects formatted log output in memory
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_bad_env_format_is_logged() {
        let _guard = EnvGuard::new(ENV_VARS);
        env::set_var("NEEDLEBOX_FORMAT", "yaml");

        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let config = tracing::subscriber::with_default(subscriber, || {
            Config::load_from_str("default_format = \"json\"").unwrap()
        });

        assert_eq!(config.default_format, Format::Json);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Ignoring NEEDLEBOX_FORMAT"));
        assert!(output.contains("yaml"));
    }

    #[test]
    fn test_serialization() {
        let config = Config {
            log_level: "info".to_string(),
            log_file: Some(PathBuf::from("/var/log/needlebox.log")),
            default_format: Format::Json,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("log_level"));
        assert!(toml_str.contains("default_format = \"json\""));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.log_level, config.log_level);
        assert_eq!(parsed.log_file, config.log_file);
        assert_eq!(parsed.default_format, config.default_format);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            log_level = "trace"
            default_format = "json"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.default_format, Format::Json);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.default_format, Format::Human);
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            log_level: "debug".to_string(),
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_with_cli_override(Some(&path)).unwrap();
        assert_eq!(loaded.log_level, "debug");
    }

    #[test]
    fn test_config_file_path_env_override() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("NEEDLEBOX_CONFIG", "/etc/needlebox.toml");
        assert_eq!(
            Config::config_file_path(),
            PathBuf::from("/etc/needlebox.toml")
        );

        env::remove_var("NEEDLEBOX_CONFIG");
        assert!(Config::config_file_path().ends_with("needlebox/config.toml"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("human".parse::<Format>().unwrap(), Format::Human);
        assert!("xml".parse::<Format>().is_err());
        assert_eq!(Format::Json.to_string(), "json");
    }
}
