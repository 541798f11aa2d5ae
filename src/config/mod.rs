//! Configuration system for linegrid
//!
//! Loads settings from ~/.config/linegrid/config.toml

use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

use crate::editor::TopRowPolicy;

/// Main settings structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub editor: EditorSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Parse settings from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Editor behavior settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// What Up does on the first row (default: clamp_to_start)
    pub top_row_up: TopRowPolicy,
    /// Show line numbers (default: true)
    pub line_numbers: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            top_row_up: TopRowPolicy::ClampToStart,
            line_numbers: true,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive, e.g. "debug" or "linegrid=trace" (default: "info")
    pub level: String,
    /// Log file; logging is off when unset since the terminal belongs to the UI
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Get the config file path
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("linegrid").join("config.toml"))
}

/// Load settings from the config file
/// Returns default settings if the file doesn't exist or can't be parsed
pub fn load_config() -> Settings {
    let Some(path) = config_path() else {
        return Settings::default();
    };

    if !path.exists() {
        return Settings::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match Settings::from_toml_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), "Failed to parse config file: {}", e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!(path = %path.display(), "Failed to read config file: {}", e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.editor.top_row_up, TopRowPolicy::ClampToStart);
        assert!(settings.editor.line_numbers);
        assert_eq!(settings.log.level, "info");
        assert!(settings.log.file.is_none());
    }

    #[test]
    fn test_partial_config() {
        let settings = Settings::from_toml_str(
            r#"
            [editor]
            top_row_up = "keep_column"

            [log]
            file = "/tmp/linegrid.log"
            "#,
        )
        .unwrap();
        assert_eq!(settings.editor.top_row_up, TopRowPolicy::KeepColumn);
        assert!(settings.editor.line_numbers);
        assert_eq!(settings.log.level, "info");
        assert_eq!(settings.log.file, Some(PathBuf::from("/tmp/linegrid.log")));
    }

    #[test]
    fn test_invalid_policy_is_error() {
        assert!(Settings::from_toml_str("[editor]\ntop_row_up = \"sideways\"").is_err());
    }

    #[test]
    fn test_config_path_location() {
        if let Some(path) = config_path() {
            assert!(path.ends_with("linegrid/config.toml"));
        }
    }
}
