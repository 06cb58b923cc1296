//! Software [`Surface`] over an in-memory RGBA image.
//!
//! Used to render figures without a window, e.g. for PNG export. Text is
//! rasterized with `fontdue` when a font is available and dropped otherwise.

use crate::PlotError;
use crate::glyphs::GlyphCache;
use crate::surface::{PixelBuffer, Surface, TextAlign, Typeface, Vertex};
use iced::{Color, Point, Rectangle, Size};
use image::{Rgba, RgbaImage};

#[derive(Clone, Debug)]
pub struct RasterSurface {
    image: RgbaImage,
    color: Color,
    glyphs: Option<GlyphCache>,
}

fn to_rgba8(color: Color) -> [u8; 4] {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    ]
}

fn put(image: &mut RgbaImage, x: i64, y: i64, rgba: [u8; 4]) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    let blended = blend(*image.get_pixel(x, y), rgba);
    image.put_pixel(x, y, blended);
}

/// Source-over blend of `fg` onto an opaque background.
fn blend(bg: Rgba<u8>, fg: [u8; 4]) -> Rgba<u8> {
    let a = fg[3] as u32;
    let inv = 255 - a;
    let mix = |f: u8, b: u8| ((f as u32 * a + b as u32 * inv) / 255) as u8;
    Rgba([mix(fg[0], bg[0]), mix(fg[1], bg[1]), mix(fg[2], bg[2]), 255])
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, PlotError> {
        if width == 0 || height == 0 {
            return Err(PlotError::InvalidDimensions { width, height });
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
            color: Color::BLACK,
            glyphs: None,
        })
    }

    /// Rasterizes text with the font in `data`, or with a system font when
    /// `data` is `None` or does not parse. Without any font, text is skipped.
    pub fn with_font(mut self, data: Option<&[u8]>) -> Self {
        self.glyphs = GlyphCache::load(data);
        if self.glyphs.is_none() {
            log::warn!("no font available, text will not be rasterized");
        }
        self
    }

    pub fn renders_text(&self) -> bool {
        self.glyphs.is_some()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// RGBA of the pixel at `(x, y)`; panics outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    fn plot(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        put(&mut self.image, x, y, rgba);
    }

    /// Bresenham between two pixel positions.
    fn plot_line(&mut self, from: (i64, i64), to: (i64, i64), rgba: [u8; 4]) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = (to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.plot(x, y, rgba);
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Pixel span `[start, end)` covered by `[lo, hi)` and clipped to `limit`.
    fn span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<i64> {
        let start = (lo.round() as i64).max(0);
        let end = (hi.round() as i64).min(limit as i64);
        start..end.max(start)
    }

    fn fill_triangle(&mut self, a: &Vertex, b: &Vertex, c: &Vertex) {
        let (pa, pb, pc) = (a.point(), b.point(), c.point());
        let area = (pb.x - pa.x) * (pc.y - pa.y) - (pc.x - pa.x) * (pb.y - pa.y);
        if !area.is_finite() || area.abs() < f32::EPSILON {
            return;
        }

        let xs = Self::span(
            pa.x.min(pb.x).min(pc.x),
            pa.x.max(pb.x).max(pc.x) + 1.0,
            self.image.width(),
        );
        let ys = Self::span(
            pa.y.min(pb.y).min(pc.y),
            pa.y.max(pb.y).max(pc.y) + 1.0,
            self.image.height(),
        );

        let edge = |p: Point, q: Point, r: Point| (q.x - p.x) * (r.y - p.y) - (r.x - p.x) * (q.y - p.y);

        for y in ys {
            for x in xs.clone() {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(pb, pc, center) / area;
                let w1 = edge(pc, pa, center) / area;
                let w2 = edge(pa, pb, center) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let [ca, cb, cc] = [a.color, b.color, c.color];
                let color = Color {
                    r: ca[0] * w0 + cb[0] * w1 + cc[0] * w2,
                    g: ca[1] * w0 + cb[1] * w1 + cc[1] * w2,
                    b: ca[2] * w0 + cb[2] * w1 + cc[2] * w2,
                    a: ca[3] * w0 + cb[3] * w1 + cc[3] * w2,
                };
                self.plot(x, y, to_rgba8(color));
            }
        }
    }
}

/// Liang-Barsky clip of `from -> to` against `[-1, w] x [-1, h]`.
fn clip(from: Point, to: Point, width: f32, height: f32) -> Option<(Point, Point)> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let (mut t0, mut t1) = (0.0f32, 1.0f32);

    for (p, q) in [
        (-dx, from.x + 1.0),
        (dx, width - from.x),
        (-dy, from.y + 1.0),
        (dy, height - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
        }
    }

    (t0 <= t1).then(|| {
        (
            Point::new(from.x + t0 * dx, from.y + t0 * dy),
            Point::new(from.x + t1 * dx, from.y + t1 * dy),
        )
    })
}

fn pixel_of(p: Point) -> Option<(i64, i64)> {
    (p.x.is_finite() && p.y.is_finite()).then(|| (p.x.round() as i64, p.y.round() as i64))
}

impl Surface for RasterSurface {
    fn size(&self) -> Size {
        Size::new(self.image.width() as f32, self.image.height() as f32)
    }

    fn set_draw_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_color(&self) -> Color {
        self.color
    }

    fn clear(&mut self) {
        let [r, g, b, _] = to_rgba8(self.color);
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([r, g, b, 255]);
        }
    }

    fn fill_rect(&mut self, rect: Rectangle) {
        let rgba = to_rgba8(self.color);
        let xs = Self::span(rect.x, rect.x + rect.width, self.image.width());
        for y in Self::span(rect.y, rect.y + rect.height, self.image.height()) {
            for x in xs.clone() {
                self.plot(x, y, rgba);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rectangle) {
        let rgba = to_rgba8(self.color);
        let (Some((x0, y0)), Some((x1, y1))) = (
            pixel_of(Point::new(rect.x, rect.y)),
            pixel_of(Point::new(rect.x + rect.width, rect.y + rect.height)),
        ) else {
            return;
        };
        let (x1, y1) = (x1 - 1, y1 - 1);

        self.plot_line((x0, y0), (x1, y0), rgba);
        self.plot_line((x0, y1), (x1, y1), rgba);
        if y1 - y0 > 1 {
            self.plot_line((x0, y0 + 1), (x0, y1 - 1), rgba);
            self.plot_line((x1, y0 + 1), (x1, y1 - 1), rgba);
        }
    }

    fn line(&mut self, from: Point, to: Point) {
        if pixel_of(from).is_none() || pixel_of(to).is_none() {
            return;
        }
        let size = self.size();
        let Some((from, to)) = clip(from, to, size.width, size.height) else {
            return;
        };
        if let (Some(a), Some(b)) = (pixel_of(from), pixel_of(to)) {
            let rgba = to_rgba8(self.color);
            self.plot_line(a, b, rgba);
        }
    }

    fn fill_geometry(&mut self, vertices: &[Vertex]) {
        for triangle in vertices.chunks_exact(3) {
            self.fill_triangle(&triangle[0], &triangle[1], &triangle[2]);
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point,
        align: TextAlign,
        color: Color,
        typeface: &Typeface,
    ) {
        let Self { image, glyphs, .. } = self;
        let Some(glyphs) = glyphs.as_mut() else {
            return;
        };
        let px = typeface.size;
        if text.is_empty() || !px.is_finite() || px <= 0.0 || pixel_of(anchor).is_none() {
            return;
        }

        let width = glyphs.measure(text, px);
        let left = match align {
            TextAlign::Center => anchor.x - width / 2.0,
            TextAlign::Right => anchor.x - width,
        };
        let baseline = anchor.y + glyphs.baseline_offset(px);
        let [r, g, b, a] = to_rgba8(color);

        glyphs.rasterize(text, Point::new(left, baseline), px, |x, y, coverage| {
            let alpha = (a as u32 * coverage as u32 / 255) as u8;
            put(image, x, y, [r, g, b, alpha]);
        });
    }

    fn read_pixels(&self) -> Result<PixelBuffer, PlotError> {
        Ok(PixelBuffer {
            width: self.image.width(),
            height: self.image.height(),
            rgba: self.image.as_raw().clone(),
        })
    }
}
