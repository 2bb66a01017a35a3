//! Region filling, outlining and labeling.

use log::trace;

use crate::geom::{Geometry, ScreenPoint, ScreenRect};
use crate::region::Region;
use crate::transform::Transform;

use super::text::TextMeasurer;
use super::{Color, LineStyle, RenderCommand, RenderList, TextStyle};

/// Labels always use the 8px monospace font.
const LABEL_FONT_SIZE: f32 = 8.0;

/// Emit fill, outline and label commands for one region.
pub(crate) fn build_region_commands(
    region: &Region,
    transform: &Transform,
    border: LineStyle,
    measurer: &dyn TextMeasurer,
    out: &mut RenderList,
) {
    push_geometry(&region.geometry, region.color, border, transform, out);
    if let Some(label) = label_command(region, transform, measurer) {
        out.push(label);
    }
}

fn push_geometry(
    geometry: &Geometry,
    color: Color,
    border: LineStyle,
    transform: &Transform,
    out: &mut RenderList,
) {
    match geometry {
        Geometry::Multi(parts) => {
            for part in parts {
                push_geometry(part, color, border, transform, out);
            }
        }
        Geometry::Polygon(ring) => {
            let points: Vec<_> = ring
                .iter()
                .filter_map(|point| transform.to_screen(*point))
                .collect();
            if points.len() < 3 {
                trace!("skipping ring with {} drawable vertices", points.len());
                return;
            }
            out.push(RenderCommand::Polygon {
                points,
                fill: color,
                stroke: border,
            });
        }
    }
}

/// Centered label, or `None` when the name does not fit the region's box.
fn label_command(
    region: &Region,
    transform: &Transform,
    measurer: &dyn TextMeasurer,
) -> Option<RenderCommand> {
    if region.name.is_empty() {
        return None;
    }
    let bounds = ScreenRect::bounding(
        region
            .geometry
            .points()
            .filter_map(|point| transform.to_screen(point)),
    )?;
    let (text_width, text_height) = measurer.measure(&region.name, LABEL_FONT_SIZE);
    if bounds.width() <= text_width || bounds.height() <= text_height {
        trace!(
            "label {:?} ({text_width}x{text_height}) does not fit {}x{}",
            region.name,
            bounds.width(),
            bounds.height()
        );
        return None;
    }
    let center = bounds.center();
    Some(RenderCommand::Text {
        position: ScreenPoint::new(
            center.x - text_width / 2.0,
            center.y - text_height / 2.0,
        ),
        text: region.name.clone(),
        style: TextStyle {
            color: Color::BLACK,
            size: LABEL_FONT_SIZE,
        },
    })
}
