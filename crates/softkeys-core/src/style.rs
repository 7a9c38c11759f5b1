//! Colors, shadows and per-key style overrides.

use kurbo::{Insets, Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::config::{check_length, ConfigResult};

/// Serializable color representation (RGBA8).
///
/// Deserializes from either `{"r", "g", "b", "a"}` or a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` hex notation.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut it = digits.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Self::rgb(it.next()??, it.next()??, it.next()??))
            }
            6 => Some(Self::rgb(
                channel(digits.get(0..2)?)?,
                channel(digits.get(2..4)?)?,
                channel(digits.get(4..6)?)?,
            )),
            8 => Some(Self::new(
                channel(digits.get(0..2)?)?,
                channel(digits.get(2..4)?)?,
                channel(digits.get(4..6)?)?,
                channel(digits.get(6..8)?)?,
            )),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgba {
        r: u8,
        g: u8,
        b: u8,
        #[serde(default = "opaque")]
        a: u8,
    },
}

fn opaque() -> u8 {
    255
}

impl TryFrom<ColorRepr> for SerializableColor {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(hex) => {
                Self::from_hex(&hex).ok_or_else(|| format!("invalid hex color {:?}", hex))
            }
            ColorRepr::Rgba { r, g, b, a } => Ok(Self::new(r, g, b, a)),
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Drop shadow copied from the panel onto each key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shadow {
    pub color: SerializableColor,
    pub blur: f64,
    pub offset: Vec2,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            blur: 0.0,
            offset: Vec2::ZERO,
        }
    }
}

/// Sparse per-key style overrides.
///
/// Every `None` field falls back to the panel's configured default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<SerializableColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<SerializableColor>,
}

impl KeyStyle {
    /// Style that only overrides the key width.
    pub fn width(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Default::default()
        }
    }

    /// Set the height override.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Set all four padding overrides at once.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_left = Some(padding);
        self.padding_right = Some(padding);
        self.padding_top = Some(padding);
        self.padding_bottom = Some(padding);
        self
    }

    /// Set the foreground color override.
    pub fn with_color(mut self, color: SerializableColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the background color override.
    pub fn with_background(mut self, background: SerializableColor) -> Self {
        self.background = Some(background);
        self
    }

    /// Reject negative or non-finite overrides.
    pub fn validate(&self) -> ConfigResult<()> {
        let lengths = [
            ("width", self.width),
            ("height", self.height),
            ("padding_left", self.padding_left),
            ("padding_right", self.padding_right),
            ("padding_top", self.padding_top),
            ("padding_bottom", self.padding_bottom),
        ];
        for (name, value) in lengths {
            if let Some(value) = value {
                check_length(name, value)?;
            }
        }
        Ok(())
    }

    /// Resolve the key size against a default.
    pub fn size_or(&self, default: Size) -> Size {
        Size::new(
            self.width.unwrap_or(default.width),
            self.height.unwrap_or(default.height),
        )
    }

    /// Resolve the padding against a default.
    ///
    /// Insets are `(left, top, right, bottom)`.
    pub fn padding_or(&self, default: Insets) -> Insets {
        Insets::new(
            self.padding_left.unwrap_or(default.x0),
            self.padding_top.unwrap_or(default.y0),
            self.padding_right.unwrap_or(default.x1),
            self.padding_bottom.unwrap_or(default.y1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(
            SerializableColor::from_hex("#DDD"),
            Some(SerializableColor::rgb(0xDD, 0xDD, 0xDD))
        );
        assert_eq!(
            SerializableColor::from_hex("#7799FF"),
            Some(SerializableColor::rgb(0x77, 0x99, 0xFF))
        );
        assert_eq!(
            SerializableColor::from_hex("#00000080"),
            Some(SerializableColor::new(0, 0, 0, 0x80))
        );
        assert_eq!(SerializableColor::from_hex("DDD"), None);
        assert_eq!(SerializableColor::from_hex("#GGG"), None);
        assert_eq!(SerializableColor::from_hex("#12345"), None);
    }

    #[test]
    fn test_color_accepts_hex_or_components() {
        let hex: SerializableColor = serde_json::from_str(r##""#7799FF""##).unwrap();
        assert_eq!(hex, SerializableColor::rgb(0x77, 0x99, 0xFF));

        let rgb: SerializableColor = serde_json::from_str(r#"{"r": 1, "g": 2, "b": 3}"#).unwrap();
        assert_eq!(rgb, SerializableColor::rgb(1, 2, 3));

        let json = serde_json::to_string(&SerializableColor::new(1, 2, 3, 4)).unwrap();
        assert_eq!(json, r#"{"r":1,"g":2,"b":3,"a":4}"#);

        assert!(serde_json::from_str::<SerializableColor>(r##""#12""##).is_err());
    }

    #[test]
    fn test_peniko_conversion() {
        let color = SerializableColor::rgb(0x77, 0x99, 0xFF);
        let peniko: Color = color.into();
        assert_eq!(SerializableColor::from(peniko), color);
    }

    #[test]
    fn test_partial_override_resolution() {
        let style = KeyStyle::width(80.0);
        let size = style.size_or(Size::new(40.0, 40.0));
        assert_eq!(size, Size::new(80.0, 40.0));

        let padding = KeyStyle::default().padding_or(Insets::uniform(2.0));
        assert_eq!(padding, Insets::uniform(2.0));

        let mut style = KeyStyle::default();
        style.padding_top = Some(5.0);
        let padding = style.padding_or(Insets::uniform(2.0));
        assert_eq!(padding, Insets::new(2.0, 5.0, 2.0, 2.0));
    }

    #[test]
    fn test_sparse_serialization() {
        let json = serde_json::to_string(&KeyStyle::width(80.0)).unwrap();
        assert_eq!(json, r#"{"width":80.0}"#);

        let style: KeyStyle = serde_json::from_str(r#"{"height": 50}"#).unwrap();
        assert_eq!(style, KeyStyle::default().with_height(50.0));
    }
}
