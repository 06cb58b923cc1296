//! The drawing surface the plotting core renders onto.
//!
//! Everything the renderer draws is expressed with the handful of primitives
//! on [`Surface`]. Backends:
//! - [`FrameSurface`](crate::frame::FrameSurface) over an iced canvas frame
//! - [`RasterSurface`](crate::raster::RasterSurface) over an in-memory image
//! - [`RecordingSurface`], which only records the calls

use crate::PlotError;
use iced::{Color, Font, Point, Rectangle, Size};

/// A vertex of a filled triangle, with its own color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    /// Position in screen coordinates
    pub position: [f32; 2],
    /// RGBA color
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color: [color.r, color.g, color.b, color.a],
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.position[0], self.position[1])
    }

    pub fn color(&self) -> Color {
        let [r, g, b, a] = self.color;
        Color { r, g, b, a }
    }
}

/// Horizontal placement of text relative to its anchor. Text is always
/// vertically centered on the anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Center,
    /// The anchor is the right edge of the text.
    Right,
}

/// Font selection handed to the surface with every text draw.
#[derive(Clone, Debug, PartialEq)]
pub struct Typeface {
    pub font: Font,
    pub size: f32,
}

impl Default for Typeface {
    fn default() -> Self {
        Self {
            font: Font::DEFAULT,
            size: 16.0,
        }
    }
}

/// Tightly packed RGBA8 pixels, row-major from the top-left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Immediate-mode drawing primitives.
pub trait Surface {
    /// Size of the drawable area in pixels.
    fn size(&self) -> Size;

    /// Sets the color used by the fill, stroke, line and clear calls.
    fn set_draw_color(&mut self, color: Color);

    fn draw_color(&self) -> Color;

    /// Fills the whole surface with the draw color.
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rectangle);

    /// Outlines `rect` with a 1px border.
    fn stroke_rect(&mut self, rect: Rectangle);

    /// Draws a 1px line.
    fn line(&mut self, from: Point, to: Point);

    /// Fills a triangle list; every three vertices form one triangle.
    fn fill_geometry(&mut self, vertices: &[Vertex]);

    /// Draws `text` at `anchor`, centered vertically.
    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point,
        align: TextAlign,
        color: Color,
        typeface: &Typeface,
    );

    /// Marks the end of a frame.
    fn present(&mut self) {}

    /// Reads back the last presented frame.
    fn read_pixels(&self) -> Result<PixelBuffer, PlotError> {
        Err(PlotError::Readback(
            "surface does not support pixel readback".to_string(),
        ))
    }
}

// ================================================================================
// Recording surface
// ================================================================================

/// One call made on a [`RecordingSurface`], with the draw color at the time.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect(Rectangle, Color),
    StrokeRect(Rectangle, Color),
    Line(Point, Point, Color),
    Geometry(Vec<Vertex>),
    Text {
        text: String,
        anchor: Point,
        align: TextAlign,
        color: Color,
    },
    Present,
}

/// A surface that draws nothing and remembers every call, for tests and for
/// inspecting what a frame would contain.
#[derive(Debug)]
pub struct RecordingSurface {
    size: Size,
    color: Color,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            color: Color::BLACK,
            commands: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Point, TextAlign)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text {
                text, anchor, align, ..
            } => Some((text.as_str(), *anchor, *align)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line(a, b, color) => Some((*a, *b, *color)),
            _ => None,
        })
    }

    pub fn geometry(&self) -> impl Iterator<Item = &[Vertex]> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Geometry(v) => Some(v.as_slice()),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (Rectangle, Color)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect(r, color) => Some((*r, *color)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn set_draw_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_color(&self) -> Color {
        self.color
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(self.color));
    }

    fn fill_rect(&mut self, rect: Rectangle) {
        self.commands.push(DrawCommand::FillRect(rect, self.color));
    }

    fn stroke_rect(&mut self, rect: Rectangle) {
        self.commands.push(DrawCommand::StrokeRect(rect, self.color));
    }

    fn line(&mut self, from: Point, to: Point) {
        self.commands.push(DrawCommand::Line(from, to, self.color));
    }

    fn fill_geometry(&mut self, vertices: &[Vertex]) {
        self.commands.push(DrawCommand::Geometry(vertices.to_vec()));
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point,
        align: TextAlign,
        color: Color,
        _typeface: &Typeface,
    ) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            align,
            color,
        });
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
    }
}
