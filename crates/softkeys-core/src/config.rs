//! Panel-wide key defaults and JSON loading.

use std::fs;
use std::path::Path;

use kurbo::{Insets, Size};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::style::{SerializableColor, Shadow};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default key width in pixels.
pub const DEFAULT_BUTTON_WIDTH: f64 = 40.0;
/// Default key height in pixels.
pub const DEFAULT_BUTTON_HEIGHT: f64 = 40.0;
/// Default padding on each side of a key.
pub const DEFAULT_BUTTON_PADDING: f64 = 2.0;

/// Immutable defaults used for every key that has no style override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    pub button_width: f64,
    pub button_height: f64,
    pub padding_left: f64,
    pub padding_right: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    /// Key label color.
    pub button_color: SerializableColor,
    pub button_background: SerializableColor,
    /// Label color of the shift key while shift is active.
    pub shift_button_color: SerializableColor,
    /// Border thickness of the shift key while caps lock is on.
    pub selected_shift_thickness: f64,
    pub shadow: Shadow,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            button_width: DEFAULT_BUTTON_WIDTH,
            button_height: DEFAULT_BUTTON_HEIGHT,
            padding_left: DEFAULT_BUTTON_PADDING,
            padding_right: DEFAULT_BUTTON_PADDING,
            padding_top: DEFAULT_BUTTON_PADDING,
            padding_bottom: DEFAULT_BUTTON_PADDING,
            button_color: SerializableColor::rgb(0xDD, 0xDD, 0xDD),
            button_background: SerializableColor::rgb(0x07, 0x07, 0x07),
            shift_button_color: SerializableColor::rgb(0x77, 0x99, 0xFF),
            selected_shift_thickness: 1.0,
            shadow: Shadow {
                color: SerializableColor::transparent(),
                ..Default::default()
            },
        }
    }
}

impl KeyboardConfig {
    /// Default key size.
    pub fn button_size(&self) -> Size {
        Size::new(self.button_width, self.button_height)
    }

    /// Default key padding as `(left, top, right, bottom)` insets.
    pub fn button_padding(&self) -> Insets {
        Insets::new(
            self.padding_left,
            self.padding_top,
            self.padding_right,
            self.padding_bottom,
        )
    }

    /// Reject sizes that cannot be laid out.
    pub fn validate(&self) -> ConfigResult<()> {
        let lengths = [
            ("button_width", self.button_width),
            ("button_height", self.button_height),
            ("padding_left", self.padding_left),
            ("padding_right", self.padding_right),
            ("padding_top", self.padding_top),
            ("padding_bottom", self.padding_bottom),
            ("selected_shift_thickness", self.selected_shift_thickness),
        ];
        for (name, value) in lengths {
            check_length(name, value)?;
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = from_json(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_json(&read_file(path.as_ref())?)
    }
}

/// Reject negative or non-finite lengths.
pub(crate) fn check_length(name: &str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Deserialize any JSON document, mapping failures to [`ConfigError`].
pub(crate) fn from_json<T: DeserializeOwned>(json: &str) -> ConfigResult<T> {
    serde_json::from_str(json).map_err(|e| ConfigError::Serialization(e.to_string()))
}

/// Serialize any value to pretty JSON.
pub(crate) fn to_json<T: Serialize>(value: &T) -> ConfigResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| ConfigError::Serialization(e.to_string()))
}

pub(crate) fn read_file(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

pub(crate) fn write_file(path: &Path, contents: &str) -> ConfigResult<()> {
    fs::write(path, contents)
        .map_err(|e| ConfigError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = KeyboardConfig::default();
        assert_eq!(config.button_size(), Size::new(40.0, 40.0));
        assert_eq!(config.button_padding(), Insets::uniform(2.0));
        assert_eq!(config.shift_button_color, SerializableColor::from_hex("#7799FF").unwrap());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"button_width": 50, "padding_top": 4}"#;
        let config = KeyboardConfig::from_json(json).unwrap();
        assert_eq!(config.button_width, 50.0);
        assert_eq!(config.button_height, DEFAULT_BUTTON_HEIGHT);
        assert_eq!(config.button_padding(), Insets::new(2.0, 4.0, 2.0, 2.0));
    }

    #[test]
    fn test_negative_size_rejected() {
        let result = KeyboardConfig::from_json(r#"{"button_height": -1}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_hex_colors_in_json() {
        let config = KeyboardConfig::from_json(
            r##"{"button_color": "#123456", "shadow": {"color": "#00000080", "blur": 3}}"##,
        )
        .unwrap();
        assert_eq!(config.button_color, SerializableColor::rgb(0x12, 0x34, 0x56));
        assert_eq!(config.shadow.color, SerializableColor::new(0, 0, 0, 0x80));
        assert_eq!(config.shadow.blur, 3.0);

        let result = KeyboardConfig::from_json(r##"{"button_background": "#XYZ"}"##);
        assert!(matches!(result, Err(ConfigError::Serialization(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = KeyboardConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Serialization(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keyboard.json");
        let mut config = KeyboardConfig::default();
        config.selected_shift_thickness = 3.0;
        write_file(&path, &to_json(&config).unwrap()).unwrap();

        let loaded = KeyboardConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = KeyboardConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
