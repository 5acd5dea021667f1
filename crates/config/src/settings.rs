// Editor settings
// Loaded from ~/.config/mathexpr/settings.json

use mathexpr_core::VarType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of characters inspected before the cursor for a word query
pub const DEFAULT_LOOKBEHIND: usize = 50;

/// Default vertical gap between the editor and the suggestion popup, in px
pub const DEFAULT_POPUP_GAP: f32 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Autocomplete
    #[serde(rename = "autocomplete.lookbehind")]
    pub lookbehind: usize,

    // Variables
    #[serde(rename = "variables.defaultType")]
    pub default_var_type: VarType,

    // Popup
    #[serde(rename = "popup.gap")]
    pub popup_gap: f32,

    // Editor
    #[serde(rename = "editor.placeholder")]
    pub placeholder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lookbehind: DEFAULT_LOOKBEHIND,
            default_var_type: VarType::String,
            popup_gap: DEFAULT_POPUP_GAP,
            placeholder: String::new(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mathexpr");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_json_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON. Lines starting with `//` are treated as comments.
    pub fn from_json_str(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        let mut settings: Settings = serde_json::from_str(&cleaned).map_err(|e| e.to_string())?;
        if settings.lookbehind == 0 {
            settings.lookbehind = DEFAULT_LOOKBEHIND;
        }
        Ok(settings)
    }

    /// Save current settings to the default location
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.lookbehind, 50);
        assert_eq!(s.default_var_type, VarType::String);
        assert_eq!(s.popup_gap, 4.0);
    }

    #[test]
    fn test_parse_with_comments_and_partial_keys() {
        let json = r#"{
    // Autocomplete
    "autocomplete.lookbehind": 20,
    "variables.defaultType": "Number"
}"#;
        let s = Settings::from_json_str(json).unwrap();
        assert_eq!(s.lookbehind, 20);
        assert_eq!(s.default_var_type, VarType::Number);
        assert_eq!(s.popup_gap, DEFAULT_POPUP_GAP);
    }

    #[test]
    fn test_zero_lookbehind_falls_back() {
        let s = Settings::from_json_str(r#"{"autocomplete.lookbehind": 0}"#).unwrap();
        assert_eq!(s.lookbehind, DEFAULT_LOOKBEHIND);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            lookbehind: 12,
            default_var_type: VarType::Integer,
            popup_gap: 6.0,
            placeholder: "Type a formula".to_string(),
        };
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_load_missing_or_broken_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(Settings::load_from(&missing), Settings::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{").unwrap();
        assert_eq!(Settings::load_from(&broken), Settings::default());
    }
}
