use iced::Color;
use iced_subplots::{Figure, FigureConfig, PlotError};

fn build() -> Result<Figure, PlotError> {
    let mut fig = Figure::new(
        FigureConfig::builder()
            .title("Multi Subplot With Tools")
            .subplots(2)
            .toolbar(true)
            .build(),
    )?;

    let x = [1.0, 2.0, 3.0, 4.0];
    let y = [1.0, 4.0, 2.0, 3.0];
    let y2 = [1.0, 14.0, 22.0, 13.0];

    let ax = fig.axes_mut(0)?;
    ax.plot(&x, &y, Color::from_rgb8(50, 100, 255))?;
    ax.plot(&x, &y2, Color::from_rgb8(0, 255, 255))?;
    ax.set_title("Temperature Over Time");
    ax.set_grid(true);

    let ax = fig.axes_mut(1)?;
    ax.plot(&x, &y, Color::from_rgb8(255, 50, 50))?;
    ax.set_title("Pressure");
    ax.set_grid(true);

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
