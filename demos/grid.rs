use iced::Color;
use iced_subplots::{Figure, PlotError};

fn build() -> Result<Figure, PlotError> {
    let mut fig = Figure::subplots("Sensor Dashboard", 1024, 768, 4)?;

    let x = [1.0, 2.0, 3.0, 4.0];
    let y = [1.0, 4.0, 2.0, 3.0];
    let panels = [
        ("Temperature", Color::from_rgb8(255, 50, 50)),
        ("Pressure", Color::from_rgb8(50, 100, 255)),
        ("Humidity", Color::from_rgb8(50, 200, 50)),
        ("CO2 Levels", Color::from_rgb8(255, 200, 120)),
    ];

    for (i, (title, color)) in panels.into_iter().enumerate() {
        let ax = fig.axes_mut(i)?;
        ax.plot(&x, &y, color)?;
        ax.set_title(title);
    }

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
