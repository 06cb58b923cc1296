use crate::surface::{Surface, TextAlign, Typeface, Vertex};
use iced::alignment;
use iced::widget::canvas::{self, Path, Stroke};
use iced::{Color, Point, Rectangle, Size};

/// [`Surface`] that draws into an iced canvas frame.
pub struct FrameSurface<'a> {
    frame: &'a mut canvas::Frame,
    color: Color,
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut canvas::Frame) -> Self {
        Self {
            frame,
            color: Color::BLACK,
        }
    }

    fn hairline(&self) -> Stroke<'static> {
        Stroke::default().with_color(self.color).with_width(1.0)
    }
}

impl Surface for FrameSurface<'_> {
    fn size(&self) -> Size {
        self.frame.size()
    }

    fn set_draw_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_color(&self) -> Color {
        self.color
    }

    fn clear(&mut self) {
        let size = self.frame.size();
        self.frame.fill_rectangle(Point::ORIGIN, size, self.color);
    }

    fn fill_rect(&mut self, rect: Rectangle) {
        self.frame
            .fill_rectangle(rect.position(), rect.size(), self.color);
    }

    fn stroke_rect(&mut self, rect: Rectangle) {
        let stroke = self.hairline();
        self.frame
            .stroke(&Path::rectangle(rect.position(), rect.size()), stroke);
    }

    fn line(&mut self, from: Point, to: Point) {
        let stroke = self.hairline();
        self.frame.stroke(&Path::line(from, to), stroke);
    }

    fn fill_geometry(&mut self, vertices: &[Vertex]) {
        // Canvas fills are single-colored; the first vertex picks the color.
        for triangle in vertices.chunks_exact(3) {
            let path = Path::new(|b| {
                b.move_to(triangle[0].point());
                b.line_to(triangle[1].point());
                b.line_to(triangle[2].point());
                b.close();
            });
            self.frame.fill(&path, triangle[0].color());
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
        let horizontal = match align {
            TextAlign::Center => alignment::Horizontal::Center,
            TextAlign::Right => alignment::Horizontal::Right,
        };

        self.frame.fill_text(canvas::Text {
            content: text.to_string(),
            position: anchor,
            color,
            size: typeface.size.into(),
            font: typeface.font,
            align_x: horizontal.into(),
            align_y: alignment::Vertical::Center,
            ..canvas::Text::default()
        });
    }
}
