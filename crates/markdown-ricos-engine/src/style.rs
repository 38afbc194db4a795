//! Presentation settings threaded through the node builders.
//!
//! A [`Style`] is built once per conversion and only ever read; builders
//! receive it by reference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConvertError, Result};

/// An opaque `#RRGGBB` foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ConvertError::InvalidStyle {
            field: "color",
            value: s.to_string(),
        };
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignment {
    #[default]
    Auto,
    Left,
    Right,
    Center,
    Justify,
}

/// Horizontal placement of block-level media and dividers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    #[default]
    Center,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineStyle {
    #[default]
    Single,
    Double,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DividerWidth {
    #[default]
    Large,
    Medium,
    Small,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DividerStyle {
    pub line_style: LineStyle,
    pub width: DividerWidth,
    pub alignment: Alignment,
}

/// Pixel size given to images whose real dimensions are unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const FALLBACK: ImageSize = ImageSize::square(800);

    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// URL fragment that identifies a hosted-media asset; the path segment
/// following it is the asset id.
pub const DEFAULT_HOSTED_MEDIA_MARKER: &str = "static.wixstatic.com/media/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub text_color: Color,
    pub heading_color: Color,
    pub text_alignment: TextAlignment,
    pub image_size: ImageSize,
    pub image_alignment: Alignment,
    pub divider: DividerStyle,
    pub hosted_media_markers: Vec<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            text_color: Color::BLACK,
            heading_color: Color::rgb(0x1D, 0x1D, 0x1B),
            text_alignment: TextAlignment::Auto,
            image_size: ImageSize::FALLBACK,
            image_alignment: Alignment::Center,
            divider: DividerStyle::default(),
            hosted_media_markers: vec![DEFAULT_HOSTED_MEDIA_MARKER.to_string()],
        }
    }
}

impl Style {
    /// Rejects settings no builder can honour.
    pub fn validate(&self) -> Result<()> {
        if self.image_size.width == 0 || self.image_size.height == 0 {
            return Err(ConvertError::InvalidStyle {
                field: "image_size",
                value: format!("{}x{}", self.image_size.width, self.image_size.height),
            });
        }
        if let Some(marker) = self.hosted_media_markers.iter().find(|m| m.trim().is_empty()) {
            return Err(ConvertError::InvalidStyle {
                field: "hosted_media_markers",
                value: marker.clone(),
            });
        }
        Ok(())
    }
}
