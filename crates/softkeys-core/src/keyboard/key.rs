//! Typed key buttons and rows.

use kurbo::{Insets, Size};

use crate::config::KeyboardConfig;
use crate::style::{KeyStyle, SerializableColor, Shadow};

/// A key button on the panel.
///
/// `key` is the label the button was created with and what a press emits.
/// `text` is what the button currently displays and follows the shift state.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyButton {
    key: String,
    text: String,
    pub size: Size,
    /// `(left, top, right, bottom)` padding.
    pub padding: Insets,
    pub color: SerializableColor,
    pub background: SerializableColor,
    /// Border thickness; zero hides the border.
    pub thickness: f64,
    /// Suppresses the focus outline.
    pub focus_invisible: bool,
    pub shadow: Shadow,
}

impl KeyButton {
    /// Build a key from its label, an optional style override and the panel defaults.
    pub fn new(key: &str, style: Option<&KeyStyle>, config: &KeyboardConfig) -> Self {
        let (size, padding, color, background) = match style {
            Some(style) => (
                style.size_or(config.button_size()),
                style.padding_or(config.button_padding()),
                style.color.unwrap_or(config.button_color),
                style.background.unwrap_or(config.button_background),
            ),
            None => (
                config.button_size(),
                config.button_padding(),
                config.button_color,
                config.button_background,
            ),
        };

        Self {
            key: key.to_string(),
            text: key.to_string(),
            size,
            padding,
            color,
            background,
            thickness: 0.0,
            focus_invisible: true,
            shadow: config.shadow,
        }
    }

    /// The label emitted when the key is pressed.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The currently displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

/// A horizontally stacked row of keys.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRow {
    keys: Vec<KeyButton>,
    /// Height of the tallest key.
    pub height: f64,
    pub focus_invisible: bool,
}

impl KeyRow {
    /// Build a row. An empty row takes the default key height.
    pub fn new(keys: Vec<KeyButton>, default_height: f64) -> Self {
        let height = keys
            .iter()
            .map(|k| k.size.height)
            .reduce(f64::max)
            .unwrap_or(default_height);
        Self {
            keys,
            height,
            focus_invisible: true,
        }
    }

    pub fn keys(&self) -> &[KeyButton] {
        &self.keys
    }

    pub(crate) fn keys_mut(&mut self) -> &mut [KeyButton] {
        &mut self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Total width including horizontal padding.
    pub fn width(&self) -> f64 {
        self.keys
            .iter()
            .map(|k| k.size.width + k.padding.x0 + k.padding.x1)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_uses_defaults_without_style() {
        let config = KeyboardConfig::default();
        let key = KeyButton::new("q", None, &config);

        assert_eq!(key.key(), "q");
        assert_eq!(key.text(), "q");
        assert_eq!(key.size, config.button_size());
        assert_eq!(key.padding, config.button_padding());
        assert_eq!(key.color, config.button_color);
        assert_eq!(key.background, config.button_background);
        assert_eq!(key.thickness, 0.0);
        assert!(key.focus_invisible);
        assert_eq!(key.shadow, config.shadow);
    }

    #[test]
    fn test_key_style_overrides_per_field() {
        let config = KeyboardConfig::default();
        let style = KeyStyle::width(90.0).with_background(SerializableColor::rgb(1, 2, 3));
        let key = KeyButton::new(" ", Some(&style), &config);

        assert_eq!(key.size, Size::new(90.0, config.button_height));
        assert_eq!(key.background, SerializableColor::rgb(1, 2, 3));
        assert_eq!(key.color, config.button_color);
        assert_eq!(key.padding, config.button_padding());
    }

    #[test]
    fn test_row_height_is_tallest_key() {
        let config = KeyboardConfig::default();
        let tall = KeyStyle::default().with_height(60.0);
        let row = KeyRow::new(
            vec![
                KeyButton::new("a", None, &config),
                KeyButton::new("b", Some(&tall), &config),
            ],
            config.button_height,
        );
        assert_eq!(row.height, 60.0);
        assert_eq!(row.width(), 2.0 * (40.0 + 4.0));

        let empty = KeyRow::new(Vec::new(), config.button_height);
        assert!(empty.is_empty());
        assert_eq!(empty.height, config.button_height);
    }
}
