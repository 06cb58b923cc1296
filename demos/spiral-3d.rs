use iced::Color;
use iced_subplots::{Figure, PlotError};
use std::f32::consts::TAU;

const SAMPLES: usize = 100;
const TURNS: f32 = 4.0;

fn build() -> Result<Figure, PlotError> {
    let mut fig = Figure::subplots("3D Spiral Demo", 800, 600, 1)?;

    // Radius and height both grow with t.
    let t: Vec<f32> = (0..SAMPLES).map(|i| i as f32 / SAMPLES as f32).collect();
    let x: Vec<f32> = t.iter().map(|t| t * (t * TAU * TURNS).cos()).collect();
    let y: Vec<f32> = t.iter().map(|t| t * (t * TAU * TURNS).sin()).collect();

    let ax = fig.axes_mut(0)?;
    ax.plot3d(&x, &y, &t, Color::from_rgb8(50, 255, 100))?;
    ax.set_title("3D Parametric Spiral");

    Ok(fig)
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let fig = build().unwrap_or_else(|err| {
        log::error!("failed to set up figure: {err}");
        std::process::exit(1);
    });
    fig.display().unwrap()
}
