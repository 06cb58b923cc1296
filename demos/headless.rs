//! Renders a few frames without a window and writes the last one to disk.

use iced::Color;
use iced_subplots::{
    Figure, FigureConfig, InputEvent, PlotError, RasterSurface, ScriptedEvents, WindowId,
};
use std::time::Duration;

fn run() -> Result<(), PlotError> {
    let mut fig = Figure::new(
        FigureConfig::builder()
            .title("Headless Render")
            .subplots(2)
            .frame_interval(Duration::ZERO)
            .build(),
    )?;

    let x: Vec<f32> = (0..50).map(|i| i as f32 * 0.2).collect();
    let y: Vec<f32> = x.iter().map(|x| x.sin()).collect();
    let ax = fig.axes_mut(0)?;
    ax.plot(&x, &y, Color::from_rgb8(50, 100, 255))?;
    ax.set_grid(true);
    ax.set_legend(true);

    let z: Vec<f32> = x.iter().map(|x| x.cos()).collect();
    fig.axes_mut(1)?
        .plot3d(&x, &y, &z, Color::from_rgb8(255, 50, 50))?;

    fig.save_png("headless.png")?;

    // Rotate the 3D axes by dragging across the main window for a few frames.
    let drag = |dx| InputEvent::MouseMotion {
        window: WindowId::Main,
        x: 0.0,
        y: 0.0,
        dx,
        dy: 0.0,
        left_held: true,
    };
    let mut events = ScriptedEvents::new()
        .frame([drag(20.0)])
        .frame([drag(20.0)])
        .idle(1);
    let mut surface = RasterSurface::new(800, 600)?.with_font(fig.font_data());
    fig.display_with(&mut events, &mut surface, None);

    Ok(())
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
