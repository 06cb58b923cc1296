use iced::Color;
use iced_subplots::{Figure, PlotError};

fn build() -> Result<Figure, PlotError> {
    let mut fig = Figure::subplots("Simple Scatter Plot", 800, 600, 1)?;

    let ax = fig.axes_mut(0)?;
    ax.set_grid(true);
    ax.scatter(
        &[1.0, 2.0, 3.0, 4.0],
        &[1.0, 4.0, 2.0, 3.0],
        Color::from_rgb8(50, 100, 255),
        8.0,
    )?;
    ax.set_legend(true);
    ax.set_title("Scatter Plot");
    ax.set_xlabel("Time (seconds)");
    ax.set_ylabel("Celsius");

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
