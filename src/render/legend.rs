//! Legend caption and color swatches.

use serde::{Deserialize, Serialize};

use crate::geom::{ScreenPoint, ScreenRect};

use super::text::TextMeasurer;
use super::{Color, RenderCommand, RenderList, TextStyle};

/// Gap between the widest label and the swatch column.
const SWATCH_GAP: f32 = 5.0;
/// Width of each color swatch.
const SWATCH_WIDTH: f32 = 50.0;

/// A legend row: swatch color and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Swatch color.
    pub color: Color,
    /// Row label.
    pub label: String,
}

impl LegendEntry {
    /// Create a legend entry.
    pub fn new(color: Color, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
        }
    }
}

/// Map legend drawn in the top-left padding corner.
///
/// Entries are supplied by the caller and are unrelated to region data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Legend {
    /// Caption above the rows.
    pub caption: String,
    /// Rows in display order.
    pub entries: Vec<LegendEntry>,
    /// Caption and label styling.
    pub text: TextStyle,
    /// Row height as a multiple of the tallest label.
    pub line_spacing: f32,
}

impl Legend {
    /// Create an empty legend with a caption.
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            ..Self::default()
        }
    }

    /// Append a row.
    pub fn entry(mut self, color: Color, label: impl Into<String>) -> Self {
        self.entries.push(LegendEntry::new(color, label));
        self
    }

    /// Set the text style.
    pub fn text(mut self, style: TextStyle) -> Self {
        self.text = style;
        self
    }

    /// Set the line spacing.
    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Label of the first entry with the given color.
    pub fn label_for(&self, color: Color) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.color == color)
            .map(|entry| entry.label.as_str())
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            caption: String::new(),
            entries: Vec::new(),
            text: TextStyle::default(),
            line_spacing: 1.5,
        }
    }
}

/// Emit caption, labels and swatches with the caption at `anchor`.
///
/// Nothing wraps; entries running past the image are clipped by the backend.
pub(crate) fn build_legend_commands(
    legend: &Legend,
    anchor: ScreenPoint,
    measurer: &dyn TextMeasurer,
    out: &mut RenderList,
) {
    let size = legend.text.size;
    let (_, caption_height) = measurer.measure(&legend.caption, size);
    if !legend.caption.is_empty() {
        out.push(RenderCommand::Text {
            position: anchor,
            text: legend.caption.clone(),
            style: legend.text,
        });
    }
    if legend.entries.is_empty() {
        return;
    }

    let (label_width, label_height) = legend
        .entries
        .iter()
        .map(|entry| measurer.measure(&entry.label, size))
        .fold((0.0_f32, 0.0_f32), |(w, h), (ew, eh)| (w.max(ew), h.max(eh)));
    let row_height = label_height * legend.line_spacing;
    let rows_top = anchor.y + caption_height * legend.line_spacing;
    let swatch_x = anchor.x + label_width + SWATCH_GAP;

    for (index, entry) in legend.entries.iter().enumerate() {
        let y = rows_top + index as f32 * row_height;
        out.push(RenderCommand::Text {
            position: ScreenPoint::new(anchor.x, y),
            text: entry.label.clone(),
            style: legend.text,
        });
        out.push(RenderCommand::Rect {
            rect: ScreenRect::from_origin_size(swatch_x, y, SWATCH_WIDTH, row_height),
            fill: entry.color,
        });
    }
}
