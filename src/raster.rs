//! CPU raster backend.
//!
//! Paints a [`RenderList`] into a 24-bit RGB image. Shapes are filled with an
//! even-odd scanline fill sampled at pixel centers; outlines are drawn as
//! filled quads along each edge; text uses the 8x8 bitmap font.

use image::{Rgb, RgbImage};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    Color, GLYPH_SIZE, LineStyle, RenderCommand, RenderList, TextStyle, glyph, glyph_scale,
};

/// Paint every command, in order, onto a fresh image.
pub(crate) fn rasterize(list: &RenderList, width: u32, height: u32) -> RgbImage {
    let mut canvas = Canvas::new(width, height);
    for command in list.commands() {
        match command {
            RenderCommand::Clear(color) => canvas.clear(*color),
            RenderCommand::Polygon {
                points,
                fill,
                stroke,
            } => {
                canvas.fill_polygon(points, *fill);
                canvas.stroke_polygon(points, *stroke);
            }
            RenderCommand::Rect { rect, fill } => canvas.fill_rect(*rect, *fill),
            RenderCommand::Text {
                position,
                text,
                style,
            } => canvas.draw_text(*position, text, style),
        }
    }
    canvas.into_image()
}

struct Canvas {
    image: RgbImage,
    crossings: Vec<f32>,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
            crossings: Vec::new(),
        }
    }

    fn into_image(self) -> RgbImage {
        self.image
    }

    fn clear(&mut self, color: Color) {
        let pixel = to_rgb(color);
        for target in self.image.pixels_mut() {
            *target = pixel;
        }
    }

    fn put(&mut self, x: i64, y: i64, pixel: Rgb<u8>) {
        if x < 0 || y < 0 || x >= i64::from(self.image.width()) || y >= i64::from(self.image.height())
        {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, pixel);
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Color) {
        let corners = [
            rect.min,
            ScreenPoint::new(rect.max.x, rect.min.y),
            rect.max,
            ScreenPoint::new(rect.min.x, rect.max.y),
        ];
        self.fill_polygon(&corners, color);
    }

    /// Even-odd fill of a closed ring, covering pixels whose centers lie inside.
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Color) {
        if points.len() < 3 {
            return;
        }
        let pixel = to_rgb(color);
        let (min_y, max_y) = points
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), point| {
                (lo.min(point.y), hi.max(point.y))
            });
        let first_row = (min_y - 0.5).ceil().max(0.0);
        let last_row = (max_y - 0.5).floor().min(self.image.height() as f32 - 1.0);
        if !(first_row <= last_row) {
            return;
        }
        let last_column = self.image.width() as f32 - 1.0;

        for row in first_row as i64..=last_row as i64 {
            let sample_y = row as f32 + 0.5;
            self.crossings.clear();
            for (index, start) in points.iter().enumerate() {
                let end = points[(index + 1) % points.len()];
                if (start.y <= sample_y) != (end.y <= sample_y) {
                    let t = (sample_y - start.y) / (end.y - start.y);
                    self.crossings.push(start.x + t * (end.x - start.x));
                }
            }
            self.crossings.sort_by(f32::total_cmp);
            for pair in self.crossings.chunks_exact(2) {
                let from = (pair[0] - 0.5).ceil().max(0.0);
                let to = (pair[1] - 0.5).floor().min(last_column);
                if from > to {
                    continue;
                }
                for column in from as u32..=to as u32 {
                    self.image.put_pixel(column, row as u32, pixel);
                }
            }
        }
    }

    /// Outline a closed ring, including the closing edge.
    fn stroke_polygon(&mut self, points: &[ScreenPoint], style: LineStyle) {
        if style.width <= 0.0 || points.len() < 2 {
            return;
        }
        let half = style.width.max(1.0) * 0.5;
        for (index, start) in points.iter().enumerate() {
            let end = points[(index + 1) % points.len()];
            self.stroke_segment(*start, end, half, style.color);
        }
    }

    /// A segment as a filled quad, extended by `half` past both ends so that
    /// consecutive segments join without gaps.
    fn stroke_segment(&mut self, start: ScreenPoint, end: ScreenPoint, half: f32, color: Color) {
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length <= f32::EPSILON {
            return;
        }
        let (ux, uy) = (dx / length * half, dy / length * half);
        let (nx, ny) = (-uy, ux);
        let a = ScreenPoint::new(start.x - ux, start.y - uy);
        let b = ScreenPoint::new(end.x + ux, end.y + uy);
        let quad = [
            ScreenPoint::new(a.x + nx, a.y + ny),
            ScreenPoint::new(b.x + nx, b.y + ny),
            ScreenPoint::new(b.x - nx, b.y - ny),
            ScreenPoint::new(a.x - nx, a.y - ny),
        ];
        self.fill_polygon(&quad, color);
    }

    /// Draw text with its top-left corner at `position`.
    fn draw_text(&mut self, position: ScreenPoint, text: &str, style: &TextStyle) {
        let pixel = to_rgb(style.color);
        let scale = i64::from(glyph_scale(style.size));
        let cell = GLYPH_SIZE as i64 * scale;
        let origin_x = position.x.round() as i64;
        let origin_y = position.y.round() as i64;

        for (line_index, line) in text.lines().enumerate() {
            let top = origin_y + line_index as i64 * cell;
            for (column, ch) in line.chars().enumerate() {
                let left = origin_x + column as i64 * cell;
                for (row, bits) in glyph(ch).iter().enumerate() {
                    for bit in 0..8 {
                        if bits & (1 << bit) == 0 {
                            continue;
                        }
                        let x = left + bit * scale;
                        let y = top + row as i64 * scale;
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.put(x + sx, y + sy, pixel);
                            }
                        }
                    }
                }
            }
        }
    }
}

fn to_rgb(color: Color) -> Rgb<u8> {
    Rgb(color.to_array())
}
