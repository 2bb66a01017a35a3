//! Coordinate transforms between geo and screen space.
//!
//! The extent is fitted into the usable rectangle with one uniform scale,
//! `min(usable width, usable height)`, so shapes are never stretched. The
//! shorter usable side is filled exactly; along the longer side the map is
//! centered.

use crate::error::MapError;
use crate::extent::Extent;
use crate::geom::{GeoPoint, ScreenPoint, ScreenRect};
use crate::view::Viewport;

/// Affine mapping from geo space into the usable pixel rectangle.
///
/// Built once per render or hit-test call; the extent can change between
/// calls, so a transform is never reused across them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    extent: Extent,
    screen: ScreenRect,
    scale: f64,
}

impl Transform {
    /// Fit `extent` into the usable area of `viewport`.
    pub fn new(extent: Extent, viewport: &Viewport) -> Result<Self, MapError> {
        let screen = viewport.usable_rect().ok_or(MapError::InvalidViewport {
            usable_width: viewport.usable_width(),
            usable_height: viewport.usable_height(),
        })?;
        if !extent.is_valid() {
            return Err(MapError::DegenerateExtent {
                x_span: extent.x.span(),
                y_span: extent.y.span(),
            });
        }
        let scale = f64::from(screen.width().min(screen.height()));
        Ok(Self {
            extent,
            screen,
            scale,
        })
    }

    /// Access the geo extent.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Access the usable screen rectangle.
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Uniform scale coefficient in pixels.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Map a geo point into screen space.
    ///
    /// Returns `None` for undefined points; callers skip such vertices.
    pub fn to_screen(&self, point: GeoPoint) -> Option<ScreenPoint> {
        if !point.is_defined() {
            return None;
        }
        let (center_x, center_y) = self.screen_center();
        let x_norm = (point.x - self.extent.x.min) / self.extent.x.span();
        let y_norm = (point.y - self.extent.y.min) / self.extent.y.span();
        let sx = center_x + self.scale * (x_norm - 0.5);
        let sy = center_y - self.scale * (y_norm - 0.5);
        Some(ScreenPoint::new(sx as f32, sy as f32))
    }

    /// Map a screen point back into geo space.
    ///
    /// Exact algebraic inverse of [`Transform::to_screen`].
    pub fn to_geo(&self, point: ScreenPoint) -> Option<GeoPoint> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        let (center_x, center_y) = self.screen_center();
        let x_norm = (f64::from(point.x) - center_x) / self.scale + 0.5;
        let y_norm = (center_y - f64::from(point.y)) / self.scale + 0.5;
        Some(GeoPoint::new(
            self.extent.x.min + x_norm * self.extent.x.span(),
            self.extent.y.min + y_norm * self.extent.y.span(),
        ))
    }

    fn screen_center(&self) -> (f64, f64) {
        let left = f64::from(self.screen.min.x);
        let top = f64::from(self.screen.min.y);
        (
            left + f64::from(self.screen.width()) / 2.0,
            top + f64::from(self.screen.height()) / 2.0,
        )
    }
}
