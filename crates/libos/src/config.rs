//! TOML configuration for the keyboard backends and logging.
//!
//! ```toml
//! [keyboard]
//! x11_display = ":0"   # optional; absent means $DISPLAY
//!
//! [logging]
//! level = "info"       # tracing EnvFilter directive
//! ```
//!
//! Every field has a serde default, so an empty file (or no file at all)
//! yields [`LibosConfig::default()`].  The file is looked up at:
//! - Windows:  `%APPDATA%\LibOS\config.toml`
//! - Linux:    `~/.config/libos/config.toml`
//! - macOS:    `~/Library/Application Support/LibOS/config.toml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LibosConfig {
    #[serde(default)]
    pub keyboard: KeyboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Keyboard backend settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyboardConfig {
    /// X display to open on Linux (e.g. `":1"`).  `None` uses `$DISPLAY`.
    /// Ignored on other platforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x11_display: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter directive: `"warn"`, `"info"`, `"libos=debug"` …
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ── Loading and saving ────────────────────────────────────────────────────────

impl LibosConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Renders the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads the configuration at `path`, returning the default if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system errors other than "not
    /// found", and [`ConfigError::Parse`] if the TOML is malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Writes the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system failures or
    /// [`ConfigError::Serialize`] if serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolves the platform-appropriate config file path, if the platform base
/// directory can be determined from the environment.
pub fn default_config_path() -> Option<PathBuf> {
    platform_config_dir().map(|dir| dir.join("config.toml"))
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("LibOS"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("LibOS")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("libos"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let cfg = LibosConfig::default();
        assert_eq!(cfg.keyboard.x11_display, None);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg = LibosConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, LibosConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_given_fields() {
        // Arrange
        let text = "[keyboard]\nx11_display = \":1\"\n";

        // Act
        let cfg = LibosConfig::from_toml_str(text).unwrap();

        // Assert
        assert_eq!(cfg.keyboard.x11_display.as_deref(), Some(":1"));
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_round_trip_through_toml_text() {
        let mut cfg = LibosConfig::default();
        cfg.keyboard.x11_display = Some(":2".to_string());
        cfg.logging.level = "libos=debug".to_string();

        let text = cfg.to_toml_string().unwrap();
        let back = LibosConfig::from_toml_str(&text).unwrap();

        assert_eq!(back, cfg);
    }

    #[test]
    fn test_default_display_is_not_serialized() {
        let text = LibosConfig::default().to_toml_string().unwrap();
        assert!(!text.contains("x11_display"));
    }

    #[test]
    fn test_invalid_toml_returns_parse_error() {
        let result = LibosConfig::from_toml_str("[logging\nlevel = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_returns_default_when_file_absent() {
        let path = Path::new("/nonexistent/path/that/cannot/exist/config.toml");
        let cfg = LibosConfig::load(path).unwrap();
        assert_eq!(cfg, LibosConfig::default());
    }

    #[test]
    fn test_default_config_path_ends_with_config_toml() {
        if let Some(path) = default_config_path() {
            assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("config.toml"));
        }
    }
}
