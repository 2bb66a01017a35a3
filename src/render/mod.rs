//! Rendering primitives and command building.
//!
//! These types are backend-agnostic. The region and legend renderers describe
//! a map as a [`RenderList`]; the raster backend turns that list into pixels.

mod legend;
mod region;
mod text;

pub use legend::{Legend, LegendEntry};
pub use text::{MonospaceMeasurer, TextMeasurer};

pub(crate) use legend::build_legend_commands;
pub(crate) use region::build_region_commands;
pub(crate) use text::{GLYPH_SIZE, glyph, glyph_scale};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseColorError;
use crate::geom::{ScreenPoint, ScreenRect};

/// Opaque 24-bit RGB color.
///
/// Serialized as an HTML hex string such as `"#63BE7B"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Parse an HTML hex color (`#RRGGBB`, the leading `#` is optional).
    pub fn from_hex(value: &str) -> Result<Self, ParseColorError> {
        let trimmed = value.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError(value.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(value.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels as an `[r, g, b]` array.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Outline styling.
///
/// The width is expressed in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    ///
    /// Glyphs are 8px bitmaps scaled by a whole factor, so the size snaps to
    /// the nearest multiple of 8 (at least 8): 12 draws at 16, 11 at 8.
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: GLYPH_SIZE,
        }
    }
}

/// Render command list.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RenderCommand {
    /// Fill the whole target.
    Clear(Color),
    /// Fill a closed polygon, then stroke its outline.
    Polygon {
        /// Vertices in screen space; the ring is closed implicitly.
        points: Vec<ScreenPoint>,
        /// Fill color.
        fill: Color,
        /// Outline styling.
        stroke: LineStyle,
    },
    /// Fill a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Fill color.
        fill: Color,
    },
    /// Draw text.
    Text {
        /// Top-left corner of the text box.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone)]
pub(crate) struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub(crate) fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub(crate) fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_and_format() {
        let color = Color::from_hex("#63BE7B").expect("valid hex");
        assert_eq!(color, Color::new(0x63, 0xBE, 0x7B));
        assert_eq!(color.to_hex(), "#63BE7B");
        assert_eq!("e15151".parse::<Color>().expect("no hash"), Color::new(0xE1, 0x51, 0x51));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        for bad in ["", "#12345", "#GGGGGG", "#1234567", "#ÿÿÿ"] {
            assert!(Color::from_hex(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn colors_serialize_as_hex_strings() {
        let json = serde_json::to_string(&LineStyle::default()).expect("serialize");
        assert_eq!(json, r##"{"color":"#000000","width":1.0}"##);
        let style: TextStyle = serde_json::from_str(r##"{"color":"#FA8E72"}"##).expect("parse");
        assert_eq!(style.color, Color::new(0xFA, 0x8E, 0x72));
        assert_eq!(style.size, GLYPH_SIZE);
    }
}
