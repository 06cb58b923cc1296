//! Stroke primitives built on top of [`Surface`].
//!
//! The surface only knows 1px lines and filled triangles, so thick strokes
//! are emitted as quads offset along the segment normal and patterned
//! strokes are cut into short thick dashes.

use crate::series::LineStyle;
use crate::surface::{Surface, Vertex};
use iced::{Color, Point, Rectangle, Size};

/// Two triangles covering the thick segment `from -> to`, or `None` when the
/// segment has no direction or the thickness is not finite.
pub fn thick_line_quad(from: Point, to: Point, thickness: f32, color: Color) -> Option<[Vertex; 6]> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let len = (dx * dx + dy * dy).sqrt();
    let half = thickness / 2.0;
    if !len.is_finite() || len < 0.001 || !half.is_finite() {
        return None;
    }

    let nx = -dy / len * half;
    let ny = dx / len * half;

    let v0 = Vertex::new(from.x + nx, from.y + ny, color);
    let v1 = Vertex::new(from.x - nx, from.y - ny, color);
    let v2 = Vertex::new(to.x - nx, to.y - ny, color);
    let v3 = Vertex::new(to.x + nx, to.y + ny, color);

    Some([v0, v1, v2, v0, v2, v3])
}

/// Draws a segment of the given thickness in the surface's draw color.
pub fn thick_line(surface: &mut impl Surface, from: Point, to: Point, thickness: f32) {
    if thickness <= 1.0 {
        surface.line(from, to);
        return;
    }

    if let Some(quad) = thick_line_quad(from, to, thickness, surface.draw_color()) {
        surface.fill_geometry(&quad);
    }
}

/// Splits `from -> to` into dashes of `dash` pixels separated by `gap`
/// pixels. The last dash is clipped to the segment end.
pub fn dash_segments(from: Point, to: Point, dash: f32, gap: f32) -> Vec<(Point, Point)> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let distance = (dx * dx + dy * dy).sqrt();
    let step = dash + gap;
    if !distance.is_finite() || distance == 0.0 || step <= 0.0 {
        return Vec::new();
    }

    let (ux, uy) = (dx / distance, dy / distance);
    let at = |d: f32| Point::new(from.x + ux * d, from.y + uy * d);

    let mut segments = Vec::with_capacity((distance / step) as usize + 1);
    let mut start = 0.0;
    while start < distance {
        let end = (start + dash).min(distance);
        segments.push((at(start), at(end)));
        start += step;
    }
    segments
}

/// Strokes `from -> to` with the given thickness and pattern.
pub fn stroke_segment(
    surface: &mut impl Surface,
    from: Point,
    to: Point,
    thickness: f32,
    style: LineStyle,
) {
    match style.pattern() {
        None => thick_line(surface, from, to, thickness),
        Some((dash, gap)) => {
            for (a, b) in dash_segments(from, to, dash, gap) {
                thick_line(surface, a, b, thickness);
            }
        }
    }
}

/// Filled square of side `size` centered on `center`.
pub fn square_marker(surface: &mut impl Surface, center: Point, size: f32) {
    surface.fill_rect(Rectangle::new(
        Point::new(center.x - size / 2.0, center.y - size / 2.0),
        Size::new(size, size),
    ));
}
