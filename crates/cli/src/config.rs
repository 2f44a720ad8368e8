//! Configuration file loading and environment variable handling.
//!
//! Precedence: CLI args > Environment vars > Config file > Defaults

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file content for `--config-init`.
pub const DEFAULT_CONFIG: &str = r#"# timeutils configuration
# See: timeutils --help for all options

# Wrap results in JSON objects ({"function": ..., "result": ...})
json = false

# Disable colored output
no_color = false
"#;

/// Configuration loaded from file and environment.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub json: Option<bool>,
    pub no_color: Option<bool>,
}

impl Config {
    /// Get the config file path.
    ///
    /// - Linux/macOS: `~/.config/timeutils/config.toml`
    /// - Windows: `%APPDATA%\timeutils\config.toml`
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("timeutils").join("config.toml"))
    }

    /// Load config from the standard location. Returns default if missing.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from a specific file. Returns default if it can't be read.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Read a boolean flag from the environment.
    ///
    /// Accepts `1`/`true`/`yes` and `0`/`false`/`no`; anything else is ignored.
    fn env_flag(name: &str) -> Option<bool> {
        match std::env::var(name).ok()?.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        }
    }

    /// Get json with precedence: env > config > default.
    pub fn json(&self) -> bool {
        Self::env_flag("TIMEUTILS_JSON")
            .or(self.json)
            .unwrap_or(false)
    }

    /// Get no_color with precedence: env > config > default.
    ///
    /// Respects the `NO_COLOR` standard (https://no-color.org/).
    pub fn no_color(&self) -> bool {
        // NO_COLOR is a standard - presence means disable color
        if std::env::var_os("NO_COLOR").is_some() {
            return true;
        }
        Self::env_flag("TIMEUTILS_NO_COLOR")
            .or(self.no_color)
            .unwrap_or(false)
    }
}

/// Create a default config file at the standard location.
pub fn init_config() -> Result<PathBuf, String> {
    let path = Config::path().ok_or("Cannot determine config directory")?;
    init_config_at(&path)?;
    Ok(path)
}

/// Write the default config to `path`, refusing to overwrite.
pub fn init_config_at(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("Config file already exists: {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create directory: {}", e))?;
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|e| format!("Failed to write config: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var("TIMEUTILS_JSON");
        std::env::remove_var("TIMEUTILS_NO_COLOR");
        std::env::remove_var("NO_COLOR");
    }

    #[test]
    #[serial]
    fn test_default_config_is_valid_toml() {
        clear_env();
        let config: Config = toml::from_str(DEFAULT_CONFIG).expect("DEFAULT_CONFIG should parse");
        assert_eq!(config.json, Some(false));
        assert_eq!(config.no_color, Some(false));
        assert!(!config.json());
        assert!(!config.no_color());
    }

    #[test]
    #[serial]
    fn test_partial_config() {
        clear_env();
        let config: Config = toml::from_str("json = true").unwrap();
        assert_eq!(config.json, Some(true));
        assert_eq!(config.no_color, None);
        assert!(config.json());
        assert!(!config.no_color());
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let config: Config = toml::from_str("json = true\nno_color = false").unwrap();

        std::env::set_var("TIMEUTILS_JSON", "0");
        std::env::set_var("TIMEUTILS_NO_COLOR", "yes");
        assert!(!config.json());
        assert!(config.no_color());

        // Unrecognized values fall through to the file
        std::env::set_var("TIMEUTILS_JSON", "maybe");
        assert!(config.json());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_no_color_standard() {
        clear_env();
        let config = Config::default();
        std::env::set_var("NO_COLOR", "");
        assert!(config.no_color());
        clear_env();
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config.json, None);
        assert_eq!(config.no_color, None);
    }

    #[test]
    fn test_load_invalid_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "json = [not toml").unwrap();
        assert_eq!(Config::load_from(&path).json, None);
    }

    #[test]
    fn test_init_config_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_config_at(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
        assert_eq!(Config::load_from(&path).json, Some(false));

        let err = init_config_at(&path).unwrap_err();
        assert!(err.contains("already exists"));
    }
}
