//! Control panel for editing the series of a figure.
//!
//! The toolbar never touches the figure directly. It hit-tests pointer events
//! against fixed widget rectangles and returns [`Intent`]s, which the figure
//! applies between frames through its public setters.

use crate::axes::Axes;
use crate::event::{InputEvent, WindowId};
use crate::renderer::draw_text;
use crate::series::LineStyle;
use crate::surface::{Surface, TextAlign, Typeface};
use iced::{Color, Point, Rectangle, Size};
use std::path::PathBuf;

pub const PANEL_WIDTH: f32 = 250.0;
pub const PANEL_HEIGHT: f32 = 500.0;

pub const MIN_THICKNESS: f32 = 1.0;
pub const MAX_THICKNESS: f32 = 10.0;

const fn rect(x: f32, y: f32, width: f32, height: f32) -> Rectangle {
    Rectangle {
        x,
        y,
        width,
        height,
    }
}

const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color {
        r: r / 255.0,
        g: g / 255.0,
        b: b / 255.0,
        a: 1.0,
    }
}

const PREV_LINE: Rectangle = rect(25.0, 10.0, 40.0, 30.0);
const NEXT_LINE: Rectangle = rect(185.0, 10.0, 40.0, 30.0);
const SLIDER_TRACK: Rectangle = rect(25.0, 270.0, 200.0, 10.0);
const HANDLE_SIZE: Size = Size {
    width: 15.0,
    height: 30.0,
};
const GRID_TOGGLE: Rectangle = rect(25.0, 330.0, 20.0, 20.0);
const SAVE_BUTTON: Rectangle = rect(25.0, 430.0, 200.0, 40.0);
const PREV_AXES: Rectangle = rect(25.0, 475.0, 40.0, 20.0);
const NEXT_AXES: Rectangle = rect(185.0, 475.0, 40.0, 20.0);

const STYLES: [(LineStyle, &str); 3] = [
    (LineStyle::Solid, "Solid"),
    (LineStyle::Dashed, "Dashed"),
    (LineStyle::Dotted, "Dotted"),
];

pub const SWATCHES: [Color; 3] = [
    rgb(255.0, 0.0, 0.0),
    rgb(0.0, 255.0, 0.0),
    rgb(0.0, 0.0, 255.0),
];

const PANEL_BACKGROUND: Color = rgb(240.0, 240.0, 240.0);
const BUTTON: Color = rgb(200.0, 200.0, 200.0);
const SAVE: Color = rgb(150.0, 150.0, 150.0);
const TRACK: Color = rgb(180.0, 180.0, 180.0);
const ACCENT: Color = rgb(50.0, 150.0, 255.0);

fn style_button(i: usize) -> Rectangle {
    rect(25.0, 50.0 + i as f32 * 60.0, 200.0, 40.0)
}

fn swatch(i: usize) -> Rectangle {
    rect(25.0 + i as f32 * 70.0, 380.0, 50.0, 30.0)
}

/// Edges count as inside.
fn hit(rect: &Rectangle, x: f32, y: f32) -> bool {
    x >= rect.x && x <= rect.x + rect.width && y >= rect.y && y <= rect.y + rect.height
}

/// A change the toolbar wants applied to the figure.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    SetStyle {
        axes: usize,
        series: usize,
        style: LineStyle,
    },
    SetColor {
        axes: usize,
        series: usize,
        color: Color,
    },
    SetThickness {
        axes: usize,
        series: usize,
        thickness: f32,
    },
    /// Flips the grid of every axes.
    ToggleGrid,
    /// Save the next rendered frame as a PNG.
    Save { path: PathBuf },
}

#[derive(Clone, Debug)]
pub struct Toolbar {
    active_axes: usize,
    active_line: usize,
    /// Slider position in [0, 1].
    slider: f32,
    dragging: bool,
    save_path: PathBuf,
}

impl Toolbar {
    pub fn new(save_path: impl Into<PathBuf>) -> Self {
        Self {
            active_axes: 0,
            active_line: 0,
            slider: 0.0,
            dragging: false,
            save_path: save_path.into(),
        }
    }

    pub fn active_axes(&self) -> usize {
        self.active_axes
    }

    pub fn active_line(&self) -> usize {
        self.active_line
    }

    /// Thickness the slider currently selects.
    pub fn slider_thickness(&self) -> f32 {
        MIN_THICKNESS + self.slider * (MAX_THICKNESS - MIN_THICKNESS)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn handle_rect(&self) -> Rectangle {
        Rectangle::new(
            Point::new(
                SLIDER_TRACK.x + self.slider * SLIDER_TRACK.width - HANDLE_SIZE.width / 2.0,
                SLIDER_TRACK.center_y() - HANDLE_SIZE.height / 2.0,
            ),
            HANDLE_SIZE,
        )
    }

    /// Moves the slider to the active line's thickness.
    fn sync_slider(&mut self, axes: &[Axes]) {
        if let Some(series) = axes
            .get(self.active_axes)
            .and_then(|ax| ax.series().get(self.active_line))
        {
            let t = (series.thickness() - MIN_THICKNESS) / (MAX_THICKNESS - MIN_THICKNESS);
            self.slider = t.clamp(0.0, 1.0);
        }
    }

    /// Processes one event against the current figure state and returns the
    /// intents it produced. Only toolbar-window events are hit-tested; any
    /// button release ends a slider drag.
    pub fn handle_event(&mut self, event: &InputEvent, axes: &[Axes]) -> Vec<Intent> {
        let mut intents = Vec::new();

        if self.active_axes >= axes.len() {
            self.active_axes = 0;
            self.active_line = 0;
        }
        let line_count = axes.get(self.active_axes).map_or(0, Axes::line_count);
        if self.active_line >= line_count {
            self.active_line = 0;
        }

        match *event {
            InputEvent::MouseDown {
                window: WindowId::Toolbar,
                x,
                y,
                ..
            } => {
                if hit(&NEXT_LINE, x, y) && line_count > 0 {
                    self.active_line = (self.active_line + 1) % line_count;
                    self.sync_slider(axes);
                }
                if hit(&PREV_LINE, x, y) && line_count > 0 {
                    self.active_line = (self.active_line + line_count - 1) % line_count;
                    self.sync_slider(axes);
                }
                if !axes.is_empty() {
                    if hit(&NEXT_AXES, x, y) {
                        self.active_axes = (self.active_axes + 1) % axes.len();
                        self.active_line = 0;
                        self.sync_slider(axes);
                    }
                    if hit(&PREV_AXES, x, y) {
                        self.active_axes = (self.active_axes + axes.len() - 1) % axes.len();
                        self.active_line = 0;
                        self.sync_slider(axes);
                    }
                }

                if line_count > 0 {
                    let (ax, series) = (self.active_axes, self.active_line);
                    for (i, color) in SWATCHES.iter().enumerate() {
                        if hit(&swatch(i), x, y) {
                            intents.push(Intent::SetColor {
                                axes: ax,
                                series,
                                color: *color,
                            });
                        }
                    }
                    for (i, (style, name)) in STYLES.iter().enumerate() {
                        if hit(&style_button(i), x, y) {
                            log::info!("line {} style set to {name}", series + 1);
                            intents.push(Intent::SetStyle {
                                axes: ax,
                                series,
                                style: *style,
                            });
                        }
                    }
                }

                if hit(&SAVE_BUTTON, x, y) {
                    intents.push(Intent::Save {
                        path: self.save_path.clone(),
                    });
                }
                if hit(&GRID_TOGGLE, x, y) {
                    intents.push(Intent::ToggleGrid);
                }
                if hit(&self.handle_rect(), x, y) {
                    self.dragging = true;
                }
            }
            InputEvent::MouseMotion {
                window: WindowId::Toolbar,
                x,
                ..
            } if self.dragging => {
                let x = x.clamp(SLIDER_TRACK.x, SLIDER_TRACK.x + SLIDER_TRACK.width);
                self.slider = (x - SLIDER_TRACK.x) / SLIDER_TRACK.width;
                if line_count > 0 {
                    intents.push(Intent::SetThickness {
                        axes: self.active_axes,
                        series: self.active_line,
                        thickness: self.slider_thickness(),
                    });
                }
            }
            InputEvent::MouseUp { .. } => self.dragging = false,
            _ => {}
        }

        intents
    }

    /// Draws the panel for the current figure state.
    pub fn render<S: Surface>(&self, axes: &[Axes], surface: &mut S, typeface: Option<&Typeface>) {
        let black = Color::BLACK;
        let current = axes.get(self.active_axes);
        let line_count = current.map_or(0, Axes::line_count);
        let text = |surface: &mut S, content: &str, at: Point| {
            draw_text(surface, typeface, Some(content), at, TextAlign::Center, black);
        };

        surface.set_draw_color(PANEL_BACKGROUND);
        surface.clear();

        surface.set_draw_color(BUTTON);
        for (nav, label) in [(PREV_LINE, "<"), (NEXT_LINE, ">"), (PREV_AXES, "<"), (NEXT_AXES, ">")] {
            surface.fill_rect(nav);
            text(surface, label, Point::new(nav.x + 15.0, nav.center_y()));
        }
        let shown_line = if line_count == 0 { 0 } else { self.active_line + 1 };
        text(
            surface,
            &format!("Line {shown_line} / {line_count}"),
            Point::new(112.0, 35.0),
        );
        text(
            surface,
            &format!("Axes {} / {}", self.active_axes + 1, axes.len()),
            Point::new(125.0, NEXT_AXES.center_y()),
        );

        for (i, (_, name)) in STYLES.iter().enumerate() {
            let button = style_button(i);
            surface.set_draw_color(BUTTON);
            surface.fill_rect(button);
            text(surface, name, button.center());
        }

        text(surface, "Line Thickness", Point::new(125.0, 240.0));
        surface.set_draw_color(TRACK);
        surface.fill_rect(SLIDER_TRACK);
        surface.set_draw_color(ACCENT);
        surface.fill_rect(self.handle_rect());

        surface.set_draw_color(black);
        surface.stroke_rect(GRID_TOGGLE);
        if current.is_some_and(|ax| ax.show_grid) {
            surface.set_draw_color(ACCENT);
            surface.fill_rect(rect(
                GRID_TOGGLE.x + 3.0,
                GRID_TOGGLE.y + 3.0,
                GRID_TOGGLE.width - 6.0,
                GRID_TOGGLE.height - 6.0,
            ));
        }
        text(
            surface,
            "Show Grid",
            Point::new(GRID_TOGGLE.x + 80.0, GRID_TOGGLE.y + 10.0),
        );

        for (i, color) in SWATCHES.iter().enumerate() {
            surface.set_draw_color(*color);
            surface.fill_rect(swatch(i));
            surface.set_draw_color(black);
            surface.stroke_rect(swatch(i));
        }

        surface.set_draw_color(SAVE);
        surface.fill_rect(SAVE_BUTTON);
        surface.set_draw_color(black);
        surface.stroke_rect(SAVE_BUTTON);
        text(surface, "Save as PNG", SAVE_BUTTON.center());
    }
}
