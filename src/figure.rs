//! The figure: a window-sized canvas holding a grid of axes.

use crate::PlotError;
use crate::axes::{Axes, ProjectionMode};
use crate::event::{EventSource, Flow, InputEvent, WindowId};
use crate::export::save_frame;
use crate::layout::{CellPadding, compute_layout};
use crate::raster::RasterSurface;
use crate::surface::{Surface, Typeface};
use crate::toolbar::{Intent, Toolbar};
use iced::{Color, Font, Size};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ================================================================================
// Configuration
// ================================================================================

#[derive(Clone, Debug, bon::Builder)]
pub struct FigureConfig {
    /// Window title, also the default title of every subplot.
    #[builder(default = "Figure".to_string(), into)]
    pub title: String,
    #[builder(default = 800)]
    pub width: u32,
    #[builder(default = 600)]
    pub height: u32,
    #[builder(default = 1)]
    pub subplots: usize,
    #[builder(default = 16.0)]
    pub font_size: f32,
    /// TrueType file loaded at construction. Uses the built-in font when unset.
    #[builder(into)]
    pub font_path: Option<PathBuf>,
    /// Family name to select from the loaded font file.
    pub font_family: Option<&'static str>,
    /// Attach the control panel.
    #[builder(default)]
    pub toolbar: bool,
    /// Pause between frames of the display loop.
    #[builder(default = Duration::from_millis(16))]
    pub frame_interval: Duration,
    /// Where the toolbar's save button writes.
    #[builder(default = PathBuf::from("my_graph.png"), into)]
    pub save_path: PathBuf,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ================================================================================
// Figure
// ================================================================================

#[derive(Clone, Debug)]
pub struct Figure {
    title: String,
    size: Size,
    axes: Vec<Axes>,
    padding: CellPadding,
    typeface: Typeface,
    font_data: Option<Vec<u8>>,
    toolbar: Option<Toolbar>,
    save_path: PathBuf,
    intents: VecDeque<Intent>,
    frame_interval: Duration,
}

impl Figure {
    pub fn new(config: FigureConfig) -> Result<Self, PlotError> {
        if config.width == 0 || config.height == 0 {
            log::error!(
                "cannot create a {}x{} figure",
                config.width,
                config.height
            );
            return Err(PlotError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }

        let font_data = match &config.font_path {
            Some(path) => Some(std::fs::read(path).map_err(|source| {
                log::error!("failed to load font {}: {source}", path.display());
                PlotError::FontLoad {
                    path: path.clone(),
                    source,
                }
            })?),
            None => None,
        };
        let font = config.font_family.map_or(Font::DEFAULT, Font::with_name);

        let axes = (0..config.subplots)
            .map(|_| Axes::new(Some(config.title.clone())))
            .collect();

        let mut figure = Self {
            title: config.title,
            size: Size::new(config.width as f32, config.height as f32),
            axes,
            padding: CellPadding::default(),
            typeface: Typeface {
                font,
                size: config.font_size,
            },
            font_data,
            toolbar: None,
            save_path: config.save_path,
            intents: VecDeque::new(),
            frame_interval: config.frame_interval,
        };
        figure.relayout();
        if config.toolbar {
            figure.attach_toolbar();
        }

        log::debug!(
            "created figure \"{}\" ({}x{}, {} subplots)",
            figure.title,
            config.width,
            config.height,
            config.subplots
        );
        Ok(figure)
    }

    /// Shorthand for a figure with `count` subplots and default settings.
    pub fn subplots(
        title: impl Into<String>,
        width: u32,
        height: u32,
        count: usize,
    ) -> Result<Self, PlotError> {
        Self::new(
            FigureConfig::builder()
                .title(title)
                .width(width)
                .height(height)
                .subplots(count)
                .build(),
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn typeface(&self) -> &Typeface {
        &self.typeface
    }

    /// Bytes of the font loaded from `font_path`, if any.
    pub fn font_data(&self) -> Option<&[u8]> {
        self.font_data.as_deref()
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn axes_mut(&mut self, index: usize) -> Result<&mut Axes, PlotError> {
        let len = self.axes.len();
        self.axes.get_mut(index).ok_or_else(|| {
            log::warn!("axes {index} requested; figure has {len}");
            PlotError::AxesIndex { index, len }
        })
    }

    /// Sets the projection of one axes.
    pub fn set_projection(&mut self, index: usize, mode: ProjectionMode) -> Result<(), PlotError> {
        self.axes_mut(index)?.set_projection(mode);
        Ok(())
    }

    /// Re-runs the layout for a new window size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
        self.relayout();
    }

    fn relayout(&mut self) {
        let rects = compute_layout(self.size, self.axes.len(), &self.padding);
        for (ax, rect) in self.axes.iter_mut().zip(rects) {
            ax.set_rect(rect);
        }
        log::debug!(
            "laid out {} axes in {}x{}",
            self.axes.len(),
            self.size.width,
            self.size.height
        );
    }

    // ================================================================================
    // Toolbar
    // ================================================================================

    /// Attaches the control panel if it is not attached yet.
    pub fn attach_toolbar(&mut self) {
        if self.toolbar.is_none() {
            self.toolbar = Some(Toolbar::new(self.save_path.clone()));
        }
    }

    pub fn toolbar(&self) -> Option<&Toolbar> {
        self.toolbar.as_ref()
    }

    /// Queues an intent for the next frame.
    pub fn push_intent(&mut self, intent: Intent) {
        self.intents.push_back(intent);
    }

    /// Applies every queued intent. Returns the paths that saves were
    /// requested for; rejected intents are logged and dropped.
    pub fn apply_pending(&mut self) -> Vec<PathBuf> {
        let mut saves = Vec::new();
        while let Some(intent) = self.intents.pop_front() {
            match self.apply(intent) {
                Ok(Some(path)) => saves.push(path),
                Ok(None) => {}
                Err(err) => log::warn!("dropping toolbar intent: {err}"),
            }
        }
        saves
    }

    fn apply(&mut self, intent: Intent) -> Result<Option<PathBuf>, PlotError> {
        match intent {
            Intent::SetStyle {
                axes,
                series,
                style,
            } => self.axes_mut(axes)?.set_linestyle(series, style)?,
            Intent::SetColor {
                axes,
                series,
                color,
            } => self.axes_mut(axes)?.set_color(series, color)?,
            Intent::SetThickness {
                axes,
                series,
                thickness,
            } => self.axes_mut(axes)?.set_thickness(series, thickness)?,
            Intent::ToggleGrid => {
                for ax in &mut self.axes {
                    ax.show_grid = !ax.show_grid;
                }
            }
            Intent::Save { path } => return Ok(Some(path)),
        }
        Ok(None)
    }

    // ================================================================================
    // Events & Rendering
    // ================================================================================

    /// Reacts to one input event. Toolbar intents are queued, not applied.
    pub fn handle_event(&mut self, event: &InputEvent) -> Flow {
        match *event {
            InputEvent::Quit | InputEvent::CloseRequested { .. } => return Flow::Exit,
            InputEvent::Resized { width, height } => self.resize(width, height),
            InputEvent::MouseMotion {
                window: WindowId::Main,
                dx,
                dy,
                left_held: true,
                ..
            } => {
                for camera in self.axes.iter_mut().filter_map(Axes::camera_mut) {
                    camera.drag(dx, dy);
                }
            }
            _ => {}
        }

        if let Some(toolbar) = self.toolbar.as_mut() {
            self.intents
                .extend(toolbar.handle_event(event, &self.axes));
        }
        Flow::Continue
    }

    /// Draws every axes onto `surface` without clearing or presenting.
    pub fn render(&self, surface: &mut impl Surface) {
        for ax in &self.axes {
            ax.render(surface, Some(&self.typeface));
        }
    }

    /// Draws one complete frame: clear to white, every axes, present.
    pub fn render_frame(&self, surface: &mut impl Surface) {
        surface.set_draw_color(Color::WHITE);
        surface.clear();
        self.render(surface);
        surface.present();
    }

    /// Draws the control panel, if attached.
    pub fn render_toolbar(&self, surface: &mut impl Surface) {
        if let Some(toolbar) = &self.toolbar {
            toolbar.render(&self.axes, surface, Some(&self.typeface));
            surface.present();
        }
    }

    /// Renders one frame off-screen and writes it to `path` as a PNG. Text
    /// uses the configured font file, or a system font without one.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), PlotError> {
        let mut surface = RasterSurface::new(self.size.width as u32, self.size.height as u32)?
            .with_font(self.font_data());
        self.render_frame(&mut surface);
        save_frame(&surface, path.as_ref())
    }

    /// Runs the blocking display loop until a quit or close request.
    ///
    /// Every iteration drains the pending events, applies toolbar intents,
    /// redraws the figure (and the toolbar when a surface is given for it),
    /// services save requests and then sleeps for the frame interval.
    pub fn display_with<S: Surface>(
        mut self,
        events: &mut impl EventSource,
        surface: &mut S,
        mut toolbar_surface: Option<&mut S>,
    ) {
        log::debug!("entering display loop for \"{}\"", self.title);
        let mut frames = 0usize;

        'running: loop {
            while let Some(event) = events.poll_event() {
                if self.handle_event(&event) == Flow::Exit {
                    log::debug!("{event:?} received, leaving display loop");
                    break 'running;
                }
            }

            let saves = self.apply_pending();
            self.render_frame(surface);
            if let Some(toolbar_surface) = toolbar_surface.as_deref_mut() {
                self.render_toolbar(toolbar_surface);
            }
            for path in saves {
                // Failures are logged by save_frame and do not stop the loop.
                let _ = save_frame(surface, &path);
            }

            frames += 1;
            if !self.frame_interval.is_zero() {
                std::thread::sleep(self.frame_interval);
            }
        }

        log::debug!("display loop ran {frames} frames");
    }
}

impl Drop for Figure {
    fn drop(&mut self) {
        log::debug!("releasing figure \"{}\"", self.title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{MouseButton, ScriptedEvents};
    use crate::series::LineStyle;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn figure(count: usize) -> Figure {
        Figure::new(
            FigureConfig::builder()
                .subplots(count)
                .frame_interval(Duration::ZERO)
                .build(),
        )
        .unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = FigureConfig::default();
        assert_eq!(config.title, "Figure");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.subplots, 1);
        assert_eq!(config.frame_interval, Duration::from_millis(16));
        assert_eq!(config.save_path, PathBuf::from("my_graph.png"));
        assert!(!config.toolbar);
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = Figure::subplots("bad", 0, 600, 1).unwrap_err();
        assert!(matches!(err, PlotError::InvalidDimensions { width: 0, .. }));
    }

    #[test]
    fn missing_font_is_init_error() {
        let config = FigureConfig::builder()
            .font_path("/definitely/not/here.ttf")
            .build();
        assert!(matches!(Figure::new(config), Err(PlotError::FontLoad { .. })));
    }

    #[test]
    fn subplot_titles_default_to_figure_title() {
        let fig = Figure::subplots("Sensors", 800, 600, 3).unwrap();
        assert_eq!(fig.axes().len(), 3);
        assert!(fig.axes().iter().all(|ax| ax.title() == Some("Sensors")));
    }

    #[test]
    fn resize_relayouts_idempotently() {
        let mut fig = figure(4);
        fig.resize(1024.0, 768.0);
        let first: Vec<_> = fig.axes().iter().map(Axes::rect).collect();
        fig.resize(1024.0, 768.0);
        let second: Vec<_> = fig.axes().iter().map(Axes::rect).collect();
        assert_eq!(first, second);
        assert_eq!(first, compute_layout(Size::new(1024.0, 768.0), 4, &CellPadding::default()));
    }

    #[test]
    fn axes_index_is_checked() {
        let mut fig = figure(2);
        assert!(matches!(
            fig.axes_mut(2),
            Err(PlotError::AxesIndex { index: 2, len: 2 })
        ));
    }

    #[test]
    fn drag_rotates_only_spatial_axes() {
        let mut fig = figure(2);
        fig.set_projection(1, ProjectionMode::ThreeD).unwrap();
        fig.handle_event(&InputEvent::MouseMotion {
            window: WindowId::Main,
            x: 0.0,
            y: 0.0,
            dx: 10.0,
            dy: 4.0,
            left_held: true,
        });

        assert!(fig.axes()[0].camera().is_none());
        let camera = fig.axes()[1].camera().unwrap();
        assert_eq!((camera.azimuth, camera.elevation), (305.0, 28.0));
    }

    #[test]
    fn intents_apply_in_order() {
        let mut fig = figure(1);
        fig.axes_mut(0)
            .unwrap()
            .plot(&[0.0, 1.0], &[0.0, 1.0], Color::BLACK)
            .unwrap();

        fig.push_intent(Intent::SetStyle {
            axes: 0,
            series: 0,
            style: LineStyle::Dotted,
        });
        fig.push_intent(Intent::SetStyle {
            axes: 0,
            series: 5,
            style: LineStyle::Dashed,
        });
        fig.push_intent(Intent::ToggleGrid);
        fig.push_intent(Intent::Save {
            path: PathBuf::from("a.png"),
        });

        assert_eq!(fig.apply_pending(), vec![PathBuf::from("a.png")]);
        assert_eq!(fig.axes()[0].series()[0].style, LineStyle::Dotted);
        assert!(fig.axes()[0].show_grid);
        assert!(fig.apply_pending().is_empty());
    }

    #[test]
    fn frame_is_cleared_white_and_presented() {
        let fig = figure(1);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        fig.render_frame(&mut surface);
        assert_eq!(surface.commands.first(), Some(&DrawCommand::Clear(Color::WHITE)));
        assert_eq!(surface.commands.last(), Some(&DrawCommand::Present));
    }

    #[test]
    fn display_loop_stops_on_close() {
        let mut fig = figure(1);
        fig.attach_toolbar();
        let mut events = ScriptedEvents::new()
            .idle(2)
            .frame([
                InputEvent::MouseDown {
                    window: WindowId::Toolbar,
                    x: 35.0,
                    y: 340.0,
                    button: MouseButton::Left,
                },
                InputEvent::CloseRequested {
                    window: WindowId::Toolbar,
                },
            ]);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let mut panel = RecordingSurface::new(250.0, 500.0);

        fig.display_with(&mut events, &mut surface, Some(&mut panel));

        assert_eq!(surface.commands.last(), Some(&DrawCommand::Present));
        assert!(panel.texts().any(|(t, _, _)| t == "Save as PNG"));
        // The close arrived before a third frame could show the toggled grid.
        assert_eq!(panel.fills().filter(|(r, _)| r.width == 14.0).count(), 0);
    }
}
