//! Bounding extents of region geometry in geo space.

use crate::error::MapError;
use crate::geom::{GeoPoint, Geometry};
use crate::region::Region;
use crate::view::Range;

/// Axis-aligned bounding box in geo space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// X range.
    pub x: Range,
    /// Y range.
    pub y: Range,
}

impl Extent {
    /// Create an extent from X and Y ranges.
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// Extent of all defined points, or `None` when there are none.
    pub fn from_points(points: impl IntoIterator<Item = GeoPoint>) -> Option<Self> {
        let mut extent: Option<Self> = None;
        for point in points {
            if !point.is_defined() {
                continue;
            }
            match extent.as_mut() {
                None => {
                    extent = Some(Self::new(
                        Range::new(point.x, point.x),
                        Range::new(point.y, point.y),
                    ));
                }
                Some(existing) => {
                    existing.x.expand_to_include(point.x);
                    existing.y.expand_to_include(point.y);
                }
            }
        }
        extent
    }

    /// Envelope of a geometry, covering every part.
    pub fn of_geometry(geometry: &Geometry) -> Option<Self> {
        Self::from_points(geometry.points())
    }

    /// Corners of the bounding rectangle.
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint::new(self.x.min, self.y.min),
            GeoPoint::new(self.x.max, self.y.min),
            GeoPoint::new(self.x.max, self.y.max),
            GeoPoint::new(self.x.min, self.y.max),
        ]
    }

    /// Center of the bounding rectangle.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.x.center(), self.y.center())
    }

    /// Check whether both axes have positive, finite span.
    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }
}

/// Combined extent of all regions.
///
/// Each region contributes the corners of its envelope, which bound exactly
/// the same box as its full boundary. Undefined points are ignored.
pub fn compute_extent(regions: &[Region]) -> Result<Extent, MapError> {
    if regions.is_empty() {
        return Err(MapError::EmptyInput);
    }
    let corners = regions
        .iter()
        .filter_map(|region| Extent::of_geometry(&region.geometry))
        .flat_map(|envelope| envelope.corners());
    Extent::from_points(corners).ok_or(MapError::EmptyInput)
}
