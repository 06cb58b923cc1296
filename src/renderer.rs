use crate::axes::{Axes, Projection};
use crate::series::{Series, SeriesKind};
use crate::stroke::{square_marker, stroke_segment, thick_line};
use crate::surface::{Surface, TextAlign, Typeface};
use crate::ticks::{TickConfig, compute_ticks};
use crate::transform::{Camera, PlanarScale, SpatialProjection};
use iced::{Color, Point, Rectangle, Size};

// ================================================================================
// Palette & Metrics
// ================================================================================

const fn gray(level: f32, alpha: f32) -> Color {
    Color {
        r: level / 255.0,
        g: level / 255.0,
        b: level / 255.0,
        a: alpha / 255.0,
    }
}

pub const PLOT_BACKGROUND: Color = gray(245.0, 255.0);
pub const GRID_COLOR: Color = gray(200.0, 100.0);
pub const CAGE_COLOR: Color = gray(200.0, 255.0);
pub const LEGEND_BACKGROUND: Color = gray(255.0, 180.0);
pub const TEXT_COLOR: Color = Color::BLACK;

const LEGEND_PADDING: f32 = 10.0;
const LEGEND_ROW_HEIGHT: f32 = 20.0;
const LEGEND_WIDTH: f32 = 120.0;
/// Horizontal space taken by the swatch at the start of a legend row.
const LEGEND_SWATCH_AREA: f32 = 35.0;

// ================================================================================
// Free Functions
// ================================================================================

/// Draws `text` if both the text and a typeface are present.
pub fn draw_text(
    surface: &mut impl Surface,
    typeface: Option<&Typeface>,
    text: Option<&str>,
    anchor: Point,
    align: TextAlign,
    color: Color,
) {
    if let (Some(text), Some(typeface)) = (text, typeface) {
        surface.draw_text(text, anchor, align, color, typeface);
    }
}

/// Draws one series through `project`, which maps a data sample to a pixel.
/// Segments touching a non-finite sample are skipped.
fn draw_series(
    surface: &mut impl Surface,
    series: &Series,
    project: impl Fn(f32, f32, f32) -> Point,
) {
    surface.set_draw_color(series.color);

    let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
    let points: Vec<Point> = series.points().map(|(x, y, z)| project(x, y, z)).collect();

    match series.kind {
        SeriesKind::Line => {
            for pair in points.windows(2) {
                if finite(&pair[0]) && finite(&pair[1]) {
                    stroke_segment(surface, pair[0], pair[1], series.thickness(), series.style);
                }
            }
        }
        SeriesKind::Scatter => {
            for p in points.iter().filter(|p| finite(p)) {
                square_marker(surface, *p, series.marker_size());
            }
        }
    }
}

/// Top-right legend box with one row per series.
fn draw_legend(surface: &mut impl Surface, typeface: Option<&Typeface>, axes: &Axes) {
    let series = axes.series();
    if !axes.show_legend || series.is_empty() {
        return;
    }

    let rect = axes.rect();
    let box_h = series.len() as f32 * LEGEND_ROW_HEIGHT + LEGEND_PADDING * 2.0;
    let box_x = rect.x + rect.width - LEGEND_WIDTH - LEGEND_PADDING;
    let box_y = rect.y + LEGEND_PADDING;
    let legend = Rectangle::new(Point::new(box_x, box_y), Size::new(LEGEND_WIDTH, box_h));

    surface.set_draw_color(LEGEND_BACKGROUND);
    surface.fill_rect(legend);
    surface.set_draw_color(Color::BLACK);
    surface.stroke_rect(legend);

    let label_x = box_x + LEGEND_SWATCH_AREA + (LEGEND_WIDTH - LEGEND_SWATCH_AREA - 5.0) / 2.0;

    for (i, s) in series.iter().enumerate() {
        let row_y = box_y + LEGEND_PADDING + i as f32 * LEGEND_ROW_HEIGHT + LEGEND_ROW_HEIGHT / 2.0;

        surface.set_draw_color(Color { a: 1.0, ..s.color });
        match s.kind {
            SeriesKind::Line => thick_line(
                surface,
                Point::new(box_x + 5.0, row_y),
                Point::new(box_x + 25.0, row_y),
                2.0,
            ),
            SeriesKind::Scatter => surface.fill_rect(Rectangle::new(
                Point::new(box_x + 12.0, row_y - 3.0),
                Size::new(6.0, 6.0),
            )),
        }

        draw_text(
            surface,
            typeface,
            Some(s.label()),
            Point::new(label_x, row_y),
            TextAlign::Center,
            TEXT_COLOR,
        );
    }
}

fn draw_title(surface: &mut impl Surface, typeface: Option<&Typeface>, axes: &Axes) {
    let rect = axes.rect();
    draw_text(
        surface,
        typeface,
        axes.title(),
        Point::new(rect.center_x(), rect.y - 30.0),
        TextAlign::Center,
        TEXT_COLOR,
    );
}

// ================================================================================
// Axes Rendering
// ================================================================================

impl Axes {
    /// Draws this axes with the renderer matching its projection.
    pub fn render(&self, surface: &mut impl Surface, typeface: Option<&Typeface>) {
        match self.projection() {
            Projection::Flat => self.render_flat(surface, typeface),
            Projection::Spatial(camera) => self.render_spatial(surface, typeface, &camera),
        }
    }

    /// 2D pass: background, ticks and grid, series, legend, then titles.
    fn render_flat(&self, surface: &mut impl Surface, typeface: Option<&Typeface>) {
        let rect = self.rect();

        surface.set_draw_color(PLOT_BACKGROUND);
        surface.fill_rect(rect);
        surface.set_draw_color(Color::BLACK);
        surface.stroke_rect(rect);

        self.draw_ticks(surface, typeface);

        let scale = PlanarScale::new(rect, self.x_limits(), self.y_limits());
        for series in self.series() {
            draw_series(surface, series, |x, y, _| scale.to_screen(x, y));
        }

        draw_legend(surface, typeface, self);
        draw_title(surface, typeface, self);

        let bottom = rect.y + rect.height;
        draw_text(
            surface,
            typeface,
            self.x_label(),
            Point::new(rect.center_x(), bottom + 40.0),
            TextAlign::Center,
            TEXT_COLOR,
        );
        draw_text(
            surface,
            typeface,
            self.y_label(),
            Point::new(rect.x - 60.0, rect.center_y()),
            TextAlign::Center,
            TEXT_COLOR,
        );
    }

    /// Tick marks, their labels and, if enabled, grid lines at every tick.
    fn draw_ticks(&self, surface: &mut impl Surface, typeface: Option<&Typeface>) {
        let config = TickConfig::default();
        let rect = self.rect();
        let bottom = rect.y + rect.height;

        let (x_min, x_max) = self.x_limits().resolve((0.0, 1.0));
        let (y_min, y_max) = self.y_limits().resolve((0.0, 1.0));
        let x_ticks = compute_ticks(x_min, x_max, &config);
        let y_ticks = compute_ticks(y_min, y_max, &config);

        for (x_tick, y_tick) in x_ticks.iter().zip(&y_ticks) {
            let y_pos = bottom - y_tick.ratio * rect.height;
            let x_pos = rect.x + x_tick.ratio * rect.width;

            surface.set_draw_color(Color::BLACK);
            surface.line(
                Point::new(rect.x - config.mark_length, y_pos),
                Point::new(rect.x, y_pos),
            );
            draw_text(
                surface,
                typeface,
                Some(&y_tick.label()),
                Point::new(rect.x - 10.0, y_pos),
                TextAlign::Right,
                TEXT_COLOR,
            );

            surface.line(
                Point::new(x_pos, bottom),
                Point::new(x_pos, bottom + config.mark_length),
            );
            draw_text(
                surface,
                typeface,
                Some(&x_tick.label()),
                Point::new(x_pos, bottom + 15.0),
                TextAlign::Center,
                TEXT_COLOR,
            );

            if self.show_grid {
                surface.set_draw_color(GRID_COLOR);
                surface.line(Point::new(rect.x, y_pos), Point::new(rect.x + rect.width, y_pos));
                surface.line(Point::new(x_pos, rect.y), Point::new(x_pos, bottom));
            }
        }
    }

    /// 3D pass: bounding cage, series, legend, then title and axis labels
    /// placed next to the projected cage edges.
    fn render_spatial(
        &self,
        surface: &mut impl Surface,
        typeface: Option<&Typeface>,
        camera: &Camera,
    ) {
        let (x, y, z) = (self.x_limits(), self.y_limits(), self.z_limits());
        let projection = SpatialProjection::new(self.rect(), x, y, z, camera);

        surface.set_draw_color(CAGE_COLOR);
        for (a, b) in projection.cage_edges() {
            surface.line(a, b);
        }

        for series in self.series() {
            draw_series(surface, series, |x, y, z| projection.to_screen(x, y, z));
        }

        draw_legend(surface, typeface, self);
        draw_title(surface, typeface, self);

        let (x_lo, x_hi) = x.resolve((-1.0, 1.0));
        let (y_lo, _) = y.resolve((-1.0, 1.0));
        let (z_lo, _) = z.resolve((-1.0, 1.0));
        let unit = (-1.0, 1.0);

        let labels = [
            (
                self.x_label(),
                projection.to_screen(x.midpoint(unit), y_lo, z_lo),
                (0.0, 30.0),
            ),
            (
                self.y_label(),
                projection.to_screen(x_hi, y.midpoint(unit), z_lo),
                (35.0, 15.0),
            ),
            (
                self.z_label(),
                projection.to_screen(x_lo, y_lo, z.midpoint(unit)),
                (-40.0, 0.0),
            ),
        ];
        for (text, at, (dx, dy)) in labels {
            draw_text(
                surface,
                typeface,
                text,
                Point::new(at.x + dx, at.y + dy),
                TextAlign::Center,
                TEXT_COLOR,
            );
        }
    }
}
