//! Keyboard layout tables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{self, ConfigError, ConfigResult, KeyboardConfig};
use crate::style::KeyStyle;

/// Shift key glyph (⇧).
pub const SHIFT_KEY: &str = "\u{21E7}";
/// Backspace key glyph (←).
pub const BACKSPACE_KEY: &str = "\u{2190}";
/// Enter key glyph (↵).
pub const ENTER_KEY: &str = "\u{21B5}";
/// Space bar label.
pub const SPACE_KEY: &str = " ";

/// One row of a layout table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRow {
    pub keys: Vec<String>,
    /// Per-key overrides. Ignored unless it has one entry per key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<KeyStyle>>,
}

impl LayoutRow {
    /// Row whose keys all use the panel defaults.
    pub fn new<S: AsRef<str>>(keys: &[S]) -> Self {
        Self {
            keys: keys.iter().map(|k| k.as_ref().to_string()).collect(),
            styles: None,
        }
    }

    /// Attach per-key styles.
    pub fn with_styles(mut self, styles: Vec<KeyStyle>) -> Self {
        self.styles = Some(styles);
        self
    }
}

/// An ordered set of rows, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyboardLayout {
    pub rows: Vec<LayoutRow>,
}

impl KeyboardLayout {
    /// The compact QWERTY layout.
    ///
    /// The space bar is twice the configured key width.
    pub fn compact_qwerty(config: &KeyboardConfig) -> Self {
        Self {
            rows: vec![
                LayoutRow::new(&["1", "2", "3", "4", "5", "6", "7", "8", "9", "0", BACKSPACE_KEY]),
                LayoutRow::new(&["q", "w", "e", "r", "t", "y", "u", "i", "o", "p"]),
                LayoutRow::new(&["a", "s", "d", "f", "g", "h", "j", "k", "l", ";", "'", ENTER_KEY]),
                LayoutRow::new(&[SHIFT_KEY, "z", "x", "c", "v", "b", "n", "m", ",", ".", "/"]),
                LayoutRow::new(&[SPACE_KEY])
                    .with_styles(vec![KeyStyle::width(config.button_width * 2.0)]),
            ],
        }
    }

    /// Number of keys in each row.
    pub fn key_counts(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.keys.len()).collect()
    }

    /// Reject style overrides with negative or non-finite lengths.
    pub fn validate(&self) -> ConfigResult<()> {
        for (row, layout_row) in self.rows.iter().enumerate() {
            for (column, style) in layout_row.styles.iter().flatten().enumerate() {
                style.validate().map_err(|e| {
                    ConfigError::Invalid(format!("row {} key {}: {}", row, column, e))
                })?;
            }
        }
        Ok(())
    }

    /// Parse and validate a layout from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let layout: Self = config::from_json(json)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        config::to_json(self)
    }

    /// Load a layout file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_json(&config::read_file(path.as_ref())?)
    }

    /// Save the layout as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        config::write_file(path.as_ref(), &self.to_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_compact_qwerty_shape() {
        let layout = KeyboardLayout::compact_qwerty(&KeyboardConfig::default());
        assert_eq!(layout.key_counts(), vec![11, 10, 12, 11, 1]);
        assert_eq!(layout.rows[0].keys.last().map(String::as_str), Some(BACKSPACE_KEY));
        assert_eq!(layout.rows[2].keys.last().map(String::as_str), Some(ENTER_KEY));
        assert_eq!(layout.rows[3].keys.first().map(String::as_str), Some(SHIFT_KEY));
        assert_eq!(layout.rows[4].styles, Some(vec![KeyStyle::width(80.0)]));
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let layout = KeyboardLayout::compact_qwerty(&KeyboardConfig::default());

        layout.save(&path).unwrap();
        let loaded = KeyboardLayout::load(&path).unwrap();

        assert_eq!(loaded, layout);
    }

    #[test]
    fn test_styles_are_optional_in_json() {
        let layout = KeyboardLayout::from_json(
            r#"{"rows": [{"keys": ["a", "b"]}, {"keys": [" "], "styles": [{"width": 120}]}]}"#,
        )
        .unwrap();
        assert_eq!(layout.rows[0].styles, None);
        assert_eq!(layout.rows[1].styles, Some(vec![KeyStyle::width(120.0)]));
    }

    #[test]
    fn test_negative_style_override_rejected() {
        let result = KeyboardLayout::from_json(
            r#"{"rows": [{"keys": ["a", "b"], "styles": [{}, {"padding_left": -3}]}]}"#,
        );
        match result {
            Err(ConfigError::Invalid(message)) => assert!(message.contains("row 0 key 1")),
            other => panic!("expected invalid layout, got {:?}", other),
        }
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            KeyboardLayout::load(dir.path().join("nope.json")),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(
            KeyboardLayout::from_json(r#"{"rows": 3}"#),
            Err(ConfigError::Serialization(_))
        ));
    }
}
