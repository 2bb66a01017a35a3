//! Region sources.
//!
//! A [`RegionSource`] hands out the full list of regions on every call. The
//! core never caches what it receives, so a source backed by changing data is
//! picked up on the next render or hit test.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use geo::{Coord, Intersects, Line};
use log::{debug, warn};
use serde::Deserialize;

use crate::error::SourceError;
use crate::geom::{GeoPoint, Geometry};
use crate::region::Region;
use crate::render::Color;

/// Supplies the regions to draw and query.
///
/// Implementations are responsible for the validity of the geometry they
/// return; invalid records should be filtered out rather than handed on.
pub trait RegionSource {
    /// Fetch every region, in the order used for drawing and hit testing.
    fn fetch_regions(&self) -> Result<Vec<Region>, SourceError>;
}

impl RegionSource for [Region] {
    fn fetch_regions(&self) -> Result<Vec<Region>, SourceError> {
        Ok(self.to_vec())
    }
}

impl RegionSource for Vec<Region> {
    fn fetch_regions(&self) -> Result<Vec<Region>, SourceError> {
        Ok(self.clone())
    }
}

impl<T: RegionSource + ?Sized> RegionSource for &T {
    fn fetch_regions(&self) -> Result<Vec<Region>, SourceError> {
        (**self).fetch_regions()
    }
}

/// Regions stored as a JSON array of records in a file.
///
/// The file is read again on every fetch. Each record looks like
///
/// ```json
/// {"name": "Delft", "color": "#63BE7B",
///  "geometry": {"type": "Polygon", "coordinates": [[4.3, 52.0], [4.4, 52.0], [4.4, 52.1], [4.3, 52.0]]}}
/// ```
///
/// and multi-part geometries use `{"type": "Multi", "coordinates": [<geometry>, ...]}`.
/// A `null` coordinate marks an undefined point.
#[derive(Debug, Clone)]
pub struct JsonRegionSource {
    path: PathBuf,
}

impl JsonRegionSource {
    /// Create a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Access the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegionSource for JsonRegionSource {
    fn fetch_regions(&self) -> Result<Vec<Region>, SourceError> {
        let json = fs::read_to_string(&self.path)?;
        let regions = parse_regions(&json)?;
        debug!("loaded {} regions from {}", regions.len(), self.path.display());
        Ok(regions)
    }
}

/// Parse region records, keeping only those with closed, non-degenerate rings.
///
/// Records with invalid geometry are skipped with a warning. A malformed
/// document or an unparseable color fails the whole parse.
pub fn parse_regions(json: &str) -> Result<Vec<Region>, SourceError> {
    let records: Vec<RegionRecord> = serde_json::from_str(json)?;
    let mut regions = Vec::with_capacity(records.len());
    for record in records {
        let color = Color::from_hex(&record.color)?;
        let geometry = record.geometry.into_geometry();
        if !is_valid_geometry(&geometry) {
            warn!("skipping region {:?}: invalid or unclosed geometry", record.name);
            continue;
        }
        regions.push(Region::new(record.name, color, geometry));
    }
    Ok(regions)
}

#[derive(Debug, Deserialize)]
struct RegionRecord {
    name: String,
    color: String,
    geometry: GeometryRecord,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum GeometryRecord {
    Polygon(Vec<[Option<f64>; 2]>),
    #[serde(alias = "MultiPolygon")]
    Multi(Vec<GeometryRecord>),
}

impl GeometryRecord {
    fn into_geometry(self) -> Geometry {
        match self {
            Self::Polygon(points) => Geometry::Polygon(
                points
                    .into_iter()
                    .map(|[x, y]| match (x, y) {
                        (Some(x), Some(y)) => GeoPoint::new(x, y),
                        _ => GeoPoint::UNDEFINED,
                    })
                    .collect(),
            ),
            Self::Multi(parts) => {
                Geometry::Multi(parts.into_iter().map(Self::into_geometry).collect())
            }
        }
    }
}

/// A geometry is valid when it has at least one ring and every ring is
/// closed, spans at least three distinct defined vertices and does not cross
/// itself.
fn is_valid_geometry(geometry: &Geometry) -> bool {
    let rings = geometry.rings();
    !rings.is_empty() && rings.into_iter().all(is_valid_ring)
}

fn is_valid_ring(ring: &[GeoPoint]) -> bool {
    let (Some(first), Some(last)) = (ring.first(), ring.last()) else {
        return false;
    };
    if !first.is_defined() || first != last {
        return false;
    }
    let distinct: HashSet<(u64, u64)> = ring
        .iter()
        .filter(|point| point.is_defined())
        .map(|point| (point.x.to_bits(), point.y.to_bits()))
        .collect();
    distinct.len() >= 3 && !is_self_intersecting(ring)
}

/// Check whether any two non-adjacent edges of a closed ring touch.
fn is_self_intersecting(ring: &[GeoPoint]) -> bool {
    let mut vertices: Vec<Coord<f64>> = Vec::with_capacity(ring.len());
    for point in ring.iter().filter(|point| point.is_defined()) {
        let coord = Coord {
            x: point.x,
            y: point.y,
        };
        if vertices.last() != Some(&coord) {
            vertices.push(coord);
        }
    }
    let edges: Vec<Line<f64>> = vertices
        .windows(2)
        .map(|pair| Line::new(pair[0], pair[1]))
        .collect();
    let last = edges.len().saturating_sub(1);
    for (i, a) in edges.iter().enumerate() {
        for (j, b) in edges.iter().enumerate().skip(i + 2) {
            if i == 0 && j == last {
                continue;
            }
            if a.intersects(b) {
                return true;
            }
        }
    }
    false
}
