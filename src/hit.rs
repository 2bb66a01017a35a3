//! Pixel-to-region hit testing.

use geo::{Coord, Intersects, LineString, Point, Polygon};

use crate::geom::{GeoPoint, Geometry, ScreenPoint};
use crate::region::Region;
use crate::transform::Transform;

/// First region, in source order, whose geometry contains the pixel.
///
/// The pixel is mapped back into geo space with the same transform that drew
/// the image. Overlapping regions resolve to whichever comes first.
pub(crate) fn region_at<'a>(
    regions: &'a [Region],
    transform: &Transform,
    pixel: ScreenPoint,
) -> Option<&'a Region> {
    let point = transform.to_geo(pixel)?;
    regions
        .iter()
        .find(|region| geometry_contains(&region.geometry, point))
}

/// Check whether any part of the geometry contains the point.
///
/// Points on a ring's boundary count as contained.
pub fn geometry_contains(geometry: &Geometry, point: GeoPoint) -> bool {
    if !point.is_defined() {
        return false;
    }
    let target = Point::new(point.x, point.y);
    geometry
        .rings()
        .into_iter()
        .filter_map(ring_polygon)
        .any(|polygon| target.intersects(&polygon))
}

fn ring_polygon(ring: &[GeoPoint]) -> Option<Polygon<f64>> {
    let coords: Vec<Coord<f64>> = ring
        .iter()
        .filter(|point| point.is_defined())
        .map(|point| Coord {
            x: point.x,
            y: point.y,
        })
        .collect();
    if coords.len() < 3 {
        return None;
    }
    Some(Polygon::new(LineString::new(coords), Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::compute_extent;
    use crate::render::Color;
    use crate::view::Viewport;

    fn square(name: &str, x: f64, y: f64, size: f64) -> Region {
        Region::new(
            name,
            Color::WHITE,
            Geometry::polygon([(x, y), (x + size, y), (x + size, y + size), (x, y + size)]),
        )
    }

    #[test]
    fn boundary_counts_as_inside() {
        let geometry = square("edge", 0.0, 0.0, 10.0).geometry;
        assert!(geometry_contains(&geometry, GeoPoint::new(5.0, 5.0)));
        assert!(geometry_contains(&geometry, GeoPoint::new(10.0, 5.0)));
        assert!(geometry_contains(&geometry, GeoPoint::new(0.0, 0.0)));
        assert!(!geometry_contains(&geometry, GeoPoint::new(10.5, 5.0)));
        assert!(!geometry_contains(&geometry, GeoPoint::UNDEFINED));
    }

    #[test]
    fn any_part_of_a_multi_geometry_matches() {
        let geometry = Geometry::multi([
            square("a", 0.0, 0.0, 1.0).geometry,
            square("b", 5.0, 5.0, 1.0).geometry,
        ]);
        assert!(geometry_contains(&geometry, GeoPoint::new(5.5, 5.5)));
        assert!(!geometry_contains(&geometry, GeoPoint::new(3.0, 3.0)));
    }

    #[test]
    fn first_region_in_source_order_wins() {
        let regions = [
            square("west", 0.0, 0.0, 10.0),
            square("overlap", 5.0, 0.0, 10.0),
        ];
        let extent = compute_extent(&regions).expect("extent");
        let transform = Transform::new(extent, &Viewport::new(150, 150)).expect("transform");
        let pixel = transform.to_screen(GeoPoint::new(7.0, 5.0)).expect("defined");
        let hit = region_at(&regions, &transform, pixel).expect("hit");
        assert_eq!(hit.name, "west");
        let pixel = transform.to_screen(GeoPoint::new(12.0, 5.0)).expect("defined");
        let hit = region_at(&regions, &transform, pixel).expect("hit");
        assert_eq!(hit.name, "overlap");
    }

    #[test]
    fn clicking_background_finds_nothing() {
        let regions = [square("only", 0.0, 0.0, 10.0)];
        let extent = compute_extent(&regions).expect("extent");
        let transform = Transform::new(extent, &Viewport::new(100, 100)).expect("transform");
        let outside = transform.to_screen(GeoPoint::new(20.0, 20.0)).expect("defined");
        assert!(region_at(&regions, &transform, outside).is_none());
    }
}
