//! Named, colored map regions.

use crate::geom::Geometry;
use crate::render::Color;

/// One named, colored area to render and hit-test.
///
/// Regions are rebuilt from the source for every call and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Display name, drawn as the label.
    pub name: String,
    /// Fill color.
    pub color: Color,
    /// Region outline.
    pub geometry: Geometry,
}

impl Region {
    /// Create a new region.
    pub fn new(name: impl Into<String>, color: Color, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            color,
            geometry,
        }
    }

    /// Name and color, as reported by hit tests.
    pub fn info(&self) -> RegionInfo {
        RegionInfo {
            name: self.name.clone(),
            color: self.color,
        }
    }
}

/// Appearance of a region: what a hit test reports back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionInfo {
    /// Region name.
    pub name: String,
    /// Region color.
    pub color: Color,
}
