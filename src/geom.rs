//! Geometric primitives used by the map pipeline.
//!
//! Geo-space types use `f64` coordinates with Y growing upward. Screen-space
//! types use `f32` pixel coordinates with the origin at the top-left corner and
//! Y growing downward. The two are never interchangeable.

/// A point in geo space.
///
/// A point whose coordinates are not finite is *undefined*. Undefined points
/// contribute nothing to extents, shapes or labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// X value in source units.
    pub x: f64,
    /// Y value in source units.
    pub y: f64,
}

impl GeoPoint {
    /// A point without defined coordinates.
    pub const UNDEFINED: Self = Self {
        x: f64::NAN,
        y: f64::NAN,
    };

    /// Create a new geo point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both coordinates are defined.
    pub fn is_defined(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Center of the pixel at column `x`, row `y`.
    ///
    /// The rasterizer colors a pixel by sampling its center, so hit tests
    /// for a clicked pixel should use this point rather than its corner.
    pub fn pixel_center(x: u32, y: u32) -> Self {
        Self::new(x as f32 + 0.5, y as f32 + 0.5)
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from its top-left corner and size.
    pub fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(ScreenPoint::new(x, y), ScreenPoint::new(x + width, y + height))
    }

    /// Smallest rectangle enclosing all points, or `None` for no points.
    pub fn bounding(points: impl IntoIterator<Item = ScreenPoint>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut rect = Self::new(first, first);
        for point in points {
            rect.min.x = rect.min.x.min(point.x);
            rect.min.y = rect.min.y.min(point.y);
            rect.max.x = rect.max.x.max(point.x);
            rect.max.y = rect.max.y.max(point.y);
        }
        Some(rect)
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Rectangle center.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }
}

/// Region geometry: a single closed ring or a multi-part collection.
///
/// Rings are implicitly closed; a trailing point equal to the first one is
/// allowed but not required. Multi-part geometries nest to any depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single closed polygon ring.
    Polygon(Vec<GeoPoint>),
    /// An ordered collection of independently closed parts.
    Multi(Vec<Geometry>),
}

impl Geometry {
    /// Build a polygon from coordinate pairs.
    pub fn polygon<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<GeoPoint>,
    {
        Self::Polygon(points.into_iter().map(Into::into).collect())
    }

    /// Build a multi-part geometry.
    pub fn multi(parts: impl IntoIterator<Item = Geometry>) -> Self {
        Self::Multi(parts.into_iter().collect())
    }

    /// Leaf rings in depth-first order.
    pub fn rings(&self) -> Vec<&[GeoPoint]> {
        let mut out = Vec::new();
        self.collect_rings(&mut out);
        out
    }

    fn collect_rings<'a>(&'a self, out: &mut Vec<&'a [GeoPoint]>) {
        match self {
            Self::Polygon(points) => out.push(points),
            Self::Multi(parts) => {
                for part in parts {
                    part.collect_rings(out);
                }
            }
        }
    }

    /// Every defined boundary point across all parts.
    pub fn points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.rings()
            .into_iter()
            .flat_map(|ring| ring.iter().copied())
            .filter(|point| point.is_defined())
    }
}
