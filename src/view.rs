//! Data ranges and the pixel viewport a map is fitted into.

use serde::{Deserialize, Serialize};

use crate::geom::ScreenRect;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range.
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has a positive, finite span.
    ///
    /// Finite bounds can still overflow to an infinite span.
    pub fn is_valid(&self) -> bool {
        let span = self.span();
        self.is_finite() && span.is_finite() && span > 0.0
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }
}

/// Padding around the drawable map area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    /// Left padding.
    pub left: u32,
    /// Right padding.
    pub right: u32,
    /// Top padding.
    pub top: u32,
    /// Bottom padding.
    pub bottom: u32,
}

impl Padding {
    /// Create padding from its four sides.
    pub fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Same padding on every side.
    pub fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Output image size plus padding.
///
/// The usable rectangle is what remains after padding; it must have positive
/// width and height for a map to be rendered or queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Padding on each side.
    #[serde(default)]
    pub padding: Padding,
}

impl Viewport {
    /// Create a viewport without padding.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
        }
    }

    /// Replace the padding.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Usable width after horizontal padding. May be zero or negative.
    pub fn usable_width(&self) -> i64 {
        i64::from(self.width) - i64::from(self.padding.left) - i64::from(self.padding.right)
    }

    /// Usable height after vertical padding. May be zero or negative.
    pub fn usable_height(&self) -> i64 {
        i64::from(self.height) - i64::from(self.padding.top) - i64::from(self.padding.bottom)
    }

    /// The usable rectangle, or `None` if padding leaves no room.
    pub fn usable_rect(&self) -> Option<ScreenRect> {
        let width = self.usable_width();
        let height = self.usable_height();
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(ScreenRect::from_origin_size(
            self.padding.left as f32,
            self.padding.top as f32,
            width as f32,
            height as f32,
        ))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(500, 500).with_padding(Padding::uniform(50))
    }
}
