//! Map rendering and hit-testing entry points.

use image::RgbImage;
use log::debug;

use crate::config::RenderOptions;
use crate::error::MapError;
use crate::extent::compute_extent;
use crate::geom::ScreenPoint;
use crate::hit::region_at;
use crate::raster::rasterize;
use crate::region::{Region, RegionInfo};
use crate::render::{
    MonospaceMeasurer, RenderCommand, RenderList, build_legend_commands, build_region_commands,
};
use crate::source::RegionSource;
use crate::transform::Transform;
use crate::view::Viewport;

/// Renders and queries the regions supplied by a [`RegionSource`].
///
/// Every call fetches the regions afresh and derives its own transform, so
/// the renderer holds no state besides the source.
#[derive(Debug, Clone)]
pub struct MapRenderer<S> {
    source: S,
}

impl<S: RegionSource> MapRenderer<S> {
    /// Create a renderer over a region source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Access the region source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Draw every region followed by the legend into a new image.
    ///
    /// The image has exactly the viewport's size. It is cleared to the
    /// background color, then regions are painted in source order.
    pub fn draw_map(&self, options: &RenderOptions) -> Result<RgbImage, MapError> {
        let regions = self.source.fetch_regions()?;
        let list = build_map_commands(&regions, options)?;
        debug!(
            "rasterizing {} commands at {}x{}",
            list.commands().len(),
            options.viewport.width,
            options.viewport.height
        );
        Ok(rasterize(
            &list,
            options.viewport.width,
            options.viewport.height,
        ))
    }

    /// Find the region under a pixel of an image drawn with `viewport`.
    ///
    /// `pixel` is a continuous screen position. To ask about a whole pixel
    /// of the drawn image, pass [`ScreenPoint::pixel_center`], which is where
    /// the rasterizer sampled its color. Returns `Ok(None)` when the pixel is
    /// background. Overlapping regions resolve to the first one in source
    /// order.
    pub fn region_at_point(
        &self,
        viewport: &Viewport,
        pixel: ScreenPoint,
    ) -> Result<Option<RegionInfo>, MapError> {
        let regions = self.source.fetch_regions()?;
        let transform = fit_transform(&regions, viewport)?;
        let hit = region_at(&regions, &transform, pixel).map(Region::info);
        match &hit {
            Some(info) => debug!("pixel ({}, {}) hits {:?}", pixel.x, pixel.y, info.name),
            None => debug!("pixel ({}, {}) hits nothing", pixel.x, pixel.y),
        }
        Ok(hit)
    }
}

/// Fit the combined extent of `regions` into `viewport`.
pub fn fit_transform(regions: &[Region], viewport: &Viewport) -> Result<Transform, MapError> {
    let extent = compute_extent(regions)?;
    let transform = Transform::new(extent, viewport)?;
    debug!(
        "fitted {} regions: x {:?}, y {:?}, scale {}",
        regions.len(),
        extent.x,
        extent.y,
        transform.scale()
    );
    Ok(transform)
}

fn build_map_commands(
    regions: &[Region],
    options: &RenderOptions,
) -> Result<RenderList, MapError> {
    let transform = fit_transform(regions, &options.viewport)?;
    let mut list = RenderList::new();
    list.push(RenderCommand::Clear(options.background));
    for region in regions {
        build_region_commands(
            region,
            &transform,
            options.border,
            &MonospaceMeasurer,
            &mut list,
        );
    }
    let padding = options.viewport.padding;
    build_legend_commands(
        &options.legend,
        ScreenPoint::new(padding.left as f32, padding.top as f32),
        &MonospaceMeasurer,
        &mut list,
    );
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::geom::{GeoPoint, Geometry};
    use crate::render::{Color, Legend, LineStyle};
    use crate::view::Padding;

    const GREEN: Color = Color::new(0x63, 0xBE, 0x7B);
    const RED: Color = Color::new(0xE1, 0x51, 0x51);
    const BLUE: Color = Color::new(0, 0, 255);

    fn square(name: &str, color: Color, x: f64, y: f64, size: f64) -> Region {
        Region::new(
            name,
            color,
            Geometry::polygon([(x, y), (x + size, y), (x + size, y + size), (x, y + size)]),
        )
    }

    fn bare_options(width: u32, height: u32) -> RenderOptions {
        RenderOptions {
            border: LineStyle {
                color: BLUE,
                width: 1.0,
            },
            ..RenderOptions::default()
        }
        .with_viewport(Viewport::new(width, height))
    }

    fn pixel(image: &RgbImage, x: u32, y: u32) -> Color {
        let [r, g, b] = image.get_pixel(x, y).0;
        Color::new(r, g, b)
    }

    struct Offline;

    impl RegionSource for Offline {
        fn fetch_regions(&self) -> Result<Vec<Region>, SourceError> {
            Err(SourceError::Io(std::io::Error::other("offline")))
        }
    }

    #[test]
    fn click_inside_square_finds_it() {
        let regions = vec![square("Square", GREEN, 0.0, 0.0, 10.0)];
        let viewport = Viewport::new(100, 100);
        let transform = fit_transform(&regions, &viewport).expect("transform");
        let renderer = MapRenderer::new(regions);

        let inside = transform.to_screen(GeoPoint::new(5.0, 5.0)).expect("defined");
        let hit = renderer
            .region_at_point(&viewport, inside)
            .expect("query")
            .expect("hit");
        assert_eq!(hit.name, "Square");
        assert_eq!(hit.color, GREEN);

        let outside = transform.to_screen(GeoPoint::new(20.0, 20.0)).expect("defined");
        assert_eq!(renderer.region_at_point(&viewport, outside).expect("query"), None);
    }

    #[test]
    fn hit_test_matches_what_was_drawn() {
        let regions = vec![
            square("West", GREEN, 0.0, 0.0, 5.0),
            square("East", RED, 5.0, 0.0, 5.0),
        ];
        let options = bare_options(200, 100);
        let renderer = MapRenderer::new(regions);
        let image = renderer.draw_map(&options).expect("draw");
        for (x, y) in [(70, 20), (130, 80)] {
            let hit = renderer
                .region_at_point(&options.viewport, ScreenPoint::new(x as f32, y as f32))
                .expect("query")
                .expect("hit");
            assert_eq!(pixel(&image, x, y), hit.color);
        }
    }

    #[test]
    fn pixel_centers_agree_with_painted_edges() {
        let regions = vec![
            square("", GREEN, 0.0, 0.0, 5.0),
            square("", RED, 5.0, 0.0, 5.0),
        ];
        let options = RenderOptions {
            border: LineStyle {
                color: BLUE,
                width: 0.0,
            },
            ..RenderOptions::default()
        }
        .with_viewport(Viewport::new(200, 100));
        let renderer = MapRenderer::new(regions);
        let image = renderer.draw_map(&options).expect("draw");
        // the shared edge lies on x = 100
        assert_eq!(pixel(&image, 99, 50), GREEN);
        assert_eq!(pixel(&image, 100, 50), RED);
        for x in [99, 100] {
            let hit = renderer
                .region_at_point(&options.viewport, ScreenPoint::pixel_center(x, 50))
                .expect("query")
                .expect("hit");
            assert_eq!(hit.color, pixel(&image, x, 50));
        }
    }

    #[test]
    fn multi_part_region_paints_both_parts() {
        let region = Region::new(
            "Twin",
            GREEN,
            Geometry::multi([
                Geometry::polygon([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
                Geometry::polygon([(3.0, 3.0), (4.0, 3.0), (4.0, 4.0), (3.0, 4.0)]),
            ]),
        );
        let image = MapRenderer::new(vec![region])
            .draw_map(&bare_options(200, 200))
            .expect("draw");
        assert_eq!(pixel(&image, 25, 175), GREEN);
        assert_eq!(pixel(&image, 175, 25), GREEN);
        assert_eq!(pixel(&image, 120, 80), Color::WHITE);
    }

    #[test]
    fn labels_stay_inside_their_region_box() {
        let regions = vec![
            square("", GREEN, 0.0, 0.0, 10.0),
            square("Tiny", RED, 0.0, 0.0, 1.0),
            square("Big", RED, 5.0, 5.0, 5.0),
        ];
        let image = MapRenderer::new(regions)
            .draw_map(&bare_options(100, 100))
            .expect("draw");
        let black: Vec<_> = image
            .enumerate_pixels()
            .filter(|(_, _, value)| value.0 == Color::BLACK.to_array())
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!black.is_empty());
        assert!(
            black
                .iter()
                .all(|&(x, y)| (50..=100).contains(&x) && y <= 50)
        );
    }

    #[test]
    fn image_has_viewport_size_and_background() {
        let options = RenderOptions {
            background: Color::new(0xF0, 0xF0, 0xF0),
            ..RenderOptions::default()
        };
        let image = MapRenderer::new(vec![square("", GREEN, 0.0, 0.0, 1.0)])
            .draw_map(&options)
            .expect("draw");
        assert_eq!(image.dimensions(), (500, 500));
        assert_eq!(pixel(&image, 0, 0), Color::new(0xF0, 0xF0, 0xF0));
        assert_eq!(pixel(&image, 499, 499), Color::new(0xF0, 0xF0, 0xF0));
        assert_eq!(pixel(&image, 30, 250), Color::new(0xF0, 0xF0, 0xF0));
        assert_eq!(pixel(&image, 250, 250), GREEN);
    }

    #[test]
    fn legend_is_drawn_over_the_map() {
        let options = RenderOptions::default().with_legend(Legend::new("Legenda").entry(RED, ">95%"));
        let image = MapRenderer::new(vec![square("", GREEN, 0.0, 0.0, 1.0)])
            .draw_map(&options)
            .expect("draw");
        // caption at (50, 50), first row at y = 62, swatch at x = 50 + 32 + 5
        assert_eq!(pixel(&image, 100, 66), RED);
        assert_eq!(pixel(&image, 140, 66), GREEN);
        let caption_ink = (50..114)
            .flat_map(|x| (50..58).map(move |y| (x, y)))
            .any(|(x, y)| pixel(&image, x, y) == Color::BLACK);
        assert!(caption_ink);
    }

    #[test]
    fn padding_shrinks_the_map_area() {
        let options = bare_options(100, 100).with_viewport(
            Viewport::new(100, 100).with_padding(Padding::new(40, 0, 0, 0)),
        );
        let image = MapRenderer::new(vec![square("", GREEN, 0.0, 0.0, 1.0)])
            .draw_map(&options)
            .expect("draw");
        assert_eq!(pixel(&image, 20, 50), Color::WHITE);
        assert_eq!(pixel(&image, 70, 50), GREEN);
    }

    #[test]
    fn errors_propagate() {
        let options = RenderOptions::default();
        let empty = MapRenderer::new(Vec::new());
        assert!(matches!(empty.draw_map(&options), Err(MapError::EmptyInput)));

        let flat = MapRenderer::new(vec![Region::new(
            "Flat",
            GREEN,
            Geometry::polygon([(0.0, 0.0), (5.0, 0.0), (2.0, 0.0)]),
        )]);
        assert!(matches!(
            flat.draw_map(&options),
            Err(MapError::DegenerateExtent { .. })
        ));

        let cramped = options.clone().with_viewport(
            Viewport::new(80, 80).with_padding(Padding::uniform(40)),
        );
        let fine = MapRenderer::new(vec![square("", GREEN, 0.0, 0.0, 1.0)]);
        assert!(matches!(
            fine.draw_map(&cramped),
            Err(MapError::InvalidViewport { .. })
        ));
        assert!(matches!(
            fine.region_at_point(&cramped.viewport, ScreenPoint::new(1.0, 1.0)),
            Err(MapError::InvalidViewport { .. })
        ));

        let offline = MapRenderer::new(Offline);
        assert!(matches!(
            offline.region_at_point(&options.viewport, ScreenPoint::new(0.0, 0.0)),
            Err(MapError::Source(SourceError::Io(_)))
        ));
    }
}
