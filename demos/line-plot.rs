use iced::Color;
use iced_subplots::{Figure, LineStyle, PlotError};

fn build() -> Result<Figure, PlotError> {
    let mut fig = Figure::subplots("Main Example", 800, 600, 2)?;

    let x = [1.0, 2.0, 3.0, 4.0];
    let y = [1.0, 4.0, 2.0, 3.0];
    let x2 = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y2 = [2.0, 4.0, 1.0, 5.0, 3.0];

    let blue = Color::from_rgb8(50, 100, 255);
    let red = Color::from_rgb8(255, 50, 50);
    let green = Color::from_rgb8(50, 200, 50);

    let ax = fig.axes_mut(0)?;
    ax.set_grid(true);
    let dashed = ax.plot(&x, &y, blue)?;
    ax.set_thickness(dashed, 5.0)?;
    ax.set_linestyle(dashed, LineStyle::Dashed)?;
    ax.set_label(dashed, "Sensor A")?;
    let solid = ax.plot(&x2, &y2, red)?;
    ax.set_label(solid, "Sensor B")?;
    let points = ax.scatter(&x, &y, green, 8.0)?;
    ax.set_label(points, "Samples")?;
    ax.set_legend(true);
    ax.set_title("Temperature Over Time");
    ax.set_xlabel("Time (seconds)");
    ax.set_ylabel("Celsius");

    let ax = fig.axes_mut(1)?;
    ax.plot(&x, &y, red)?;
    ax.set_grid(true);
    ax.set_title("Pressure");

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
