use iced::Color;
use iced_subplots::{Figure, FigureConfig, PlotError};

fn build() -> Result<Figure, PlotError> {
    let mut fig = Figure::new(
        FigureConfig::builder()
            .title("Toolbar Example")
            .toolbar(true)
            .save_path("growth.png")
            .build(),
    )?;

    let color = Color::from_rgb8(50, 150, 255);
    let ax = fig.axes_mut(0)?;
    ax.plot(&[1.0, 2.0, 3.0, 4.0, 5.0], &[10.0, 20.0, 15.0, 25.0, 30.0], color)?;
    ax.plot(&[-1.0, 0.0, 3.0, 6.0, 9.0], &[11.0, 22.0, 6.0, 18.0, 33.0], color)?;
    ax.set_title("Growth Over Time");

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
