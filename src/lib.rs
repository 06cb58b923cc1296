//! Figure/axes plotting on an iced canvas.
//!
//! A [`Figure`] holds a grid of [`Axes`]; each axes holds line or scatter
//! [`Series`] drawn with a flat 2D mapping or an orthographic 3D camera.
//! Figures render onto anything implementing [`Surface`]: an iced canvas
//! frame ([`show`]), an in-memory image ([`RasterSurface`]), or a recorder.
//!
//! ```no_run
//! use iced::Color;
//! use iced_subplots::{Figure, FigureConfig};
//!
//! let mut fig = Figure::new(FigureConfig::builder().title("Demo").build())?;
//! let ax = fig.axes_mut(0)?;
//! ax.plot(&[1.0, 2.0, 3.0, 4.0], &[1.0, 4.0, 2.0, 3.0], Color::from_rgb8(0, 0, 255))?;
//! ax.set_grid(true);
//! fig.display()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod app;
pub mod axes;
pub mod canvas;
pub mod error;
pub mod event;
pub mod export;
pub mod figure;
pub mod frame;
pub mod glyphs;
pub mod layout;
pub mod raster;
pub mod renderer;
pub mod series;
pub mod stroke;
pub mod surface;
pub mod ticks;
pub mod toolbar;
pub mod transform;

pub use app::show;
pub use axes::{Axes, Projection, ProjectionMode};
pub use error::PlotError;
pub use event::{EventSource, Flow, InputEvent, MouseButton, ScriptedEvents, WindowId};
pub use figure::{Figure, FigureConfig};
pub use raster::RasterSurface;
pub use series::{LineStyle, Series, SeriesKind};
pub use surface::{RecordingSurface, Surface, Typeface};
pub use toolbar::{Intent, Toolbar};
pub use transform::Camera;
