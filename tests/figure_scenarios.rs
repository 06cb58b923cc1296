use iced::{Color, Point};
use iced_subplots::layout::{CellPadding, compute_layout};
use iced_subplots::transform::Extent;
use iced_subplots::{
    Figure, FigureConfig, InputEvent, LineStyle, MouseButton, PlotError, ProjectionMode,
    RasterSurface, RecordingSurface, ScriptedEvents, SeriesKind, WindowId,
};
use std::time::Duration;

const X: [f32; 4] = [1.0, 2.0, 3.0, 4.0];
const Y: [f32; 4] = [1.0, 4.0, 2.0, 3.0];

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn quiet_config() -> FigureConfig {
    FigureConfig::builder()
        .frame_interval(Duration::ZERO)
        .build()
}

#[test]
fn basic_line_plot() {
    init_logging();
    let mut fig = Figure::subplots("Line", 800, 600, 1).unwrap();
    let ax = fig.axes_mut(0).unwrap();
    ax.plot(&X, &Y, Color::BLACK).unwrap();

    assert_eq!(ax.x_limits(), Extent::new(1.0, 4.0));
    assert_eq!(ax.y_limits(), Extent::new(1.0, 4.0));
    assert_eq!(ax.line_count(), 1);
    assert_eq!(ax.series()[0].kind, SeriesKind::Line);
}

#[test]
fn scatter_overrides_kind() {
    let mut fig = Figure::subplots("Scatter", 800, 600, 1).unwrap();
    let ax = fig.axes_mut(0).unwrap();
    ax.scatter(&X, &Y, Color::BLACK, 8.0).unwrap();

    let series = &ax.series()[0];
    assert_eq!(series.kind, SeriesKind::Scatter);
    assert_eq!(series.marker_size(), 8.0);
    assert_eq!(ax.x_limits(), Extent::new(1.0, 4.0));
    assert_eq!(ax.y_limits(), Extent::new(1.0, 4.0));
}

#[test]
fn multi_subplot_layout() {
    let fig = Figure::subplots("Grid", 1024, 768, 4).unwrap();
    let rects: Vec<_> = fig.axes().iter().map(|ax| ax.rect()).collect();

    for r in &rects {
        assert!((r.width - 512.0 * 0.83).abs() < 1e-3);
        assert!((r.height - 384.0 * 0.75).abs() < 1e-3);
    }
    assert!(rects[0].x < 512.0 && rects[0].y < 384.0);
    assert!(rects[3].x > 512.0 && rects[3].y > 384.0);
}

#[test]
fn out_of_bounds_setter_is_noop() {
    init_logging();
    let mut fig = Figure::subplots("Setters", 800, 600, 1).unwrap();
    let ax = fig.axes_mut(0).unwrap();
    ax.plot(&X, &Y, Color::BLACK).unwrap();
    ax.set_linestyle(0, LineStyle::Dotted).unwrap();

    assert!(matches!(
        ax.set_linestyle(1, LineStyle::Dashed),
        Err(PlotError::SeriesIndex { index: 1, len: 1 })
    ));
    assert_eq!(ax.series()[0].style, LineStyle::Dotted);
}

#[test]
fn unbounded_thickness_keeps_geometry_finite() {
    let mut fig = Figure::subplots("Thickness", 800, 600, 1).unwrap();
    let ax = fig.axes_mut(0).unwrap();
    ax.plot(&[1.0, 2.0], &[2.0, 2.0], Color::BLACK).unwrap();
    assert!(matches!(
        ax.set_thickness(0, f32::INFINITY),
        Err(PlotError::InvalidThickness(_))
    ));

    let mut surface = RecordingSurface::new(800.0, 600.0);
    fig.render_frame(&mut surface);
    assert!(surface.geometry().count() > 0);
    assert!(
        surface
            .geometry()
            .flatten()
            .all(|v| v.position.iter().all(|c| c.is_finite()))
    );
}

#[test]
fn resize_event_relayouts() {
    let mut fig = Figure::new(quiet_config()).unwrap();
    fig.handle_event(&InputEvent::Resized {
        width: 400.0,
        height: 300.0,
    });
    assert_eq!(
        fig.axes()[0].rect(),
        compute_layout(iced::Size::new(400.0, 300.0), 1, &CellPadding::default())[0]
    );
}

#[test]
fn headless_png_contains_plot() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("figure.png");

    let mut fig = Figure::subplots("Export", 320, 240, 1).unwrap();
    let ax = fig.axes_mut(0).unwrap();
    ax.plot(&X, &Y, Color::from_rgb8(255, 0, 0)).unwrap();
    ax.set_thickness(0, 4.0).unwrap();
    fig.save_png(&path).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (320, 240));
    assert!(image.pixels().any(|p| p.0 == [255, 0, 0, 255]));
    // Outside every axes the frame is cleared to white.
    assert_eq!(image.get_pixel(1, 1).0, [255, 255, 255, 255]);
}

#[test]
fn headless_png_has_tick_labels() {
    init_logging();
    if !RasterSurface::new(1, 1).unwrap().with_font(None).renders_text() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("labels.png");

    let mut fig = Figure::subplots("Labels", 320, 240, 1).unwrap();
    fig.axes_mut(0).unwrap().plot(&X, &Y, Color::BLACK).unwrap();
    fig.save_png(&path).unwrap();

    // Right half of the first x tick label, "1.0", centered under the left edge.
    let rect = fig.axes()[0].rect();
    let (x, bottom) = (rect.x.round() as u32, (rect.y + rect.height).round() as u32);
    let image = image::open(&path).unwrap().to_rgba8();
    let dark = (bottom + 8..bottom + 23)
        .flat_map(|y| (x + 3..x + 14).map(move |x| (x, y)))
        .filter(|&(x, y)| image.get_pixel(x, y).0[0] < 128)
        .count();
    assert!(dark > 0);
}

#[test]
fn toolbar_save_writes_png_from_loop() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("my_graph.png");

    let mut fig = Figure::new(
        FigureConfig::builder()
            .width(320)
            .height(240)
            .toolbar(true)
            .save_path(&path)
            .frame_interval(Duration::ZERO)
            .build(),
    )
    .unwrap();
    fig.axes_mut(0)
        .unwrap()
        .plot(&X, &Y, Color::BLACK)
        .unwrap();

    let mut events = ScriptedEvents::new().frame([InputEvent::MouseDown {
        window: WindowId::Toolbar,
        x: 125.0,
        y: 450.0,
        button: MouseButton::Left,
    }]);
    let mut surface = RasterSurface::new(320, 240)
        .unwrap()
        .with_font(fig.font_data());
    let mut panel = RasterSurface::new(250, 500).unwrap();
    fig.display_with(&mut events, &mut surface, Some(&mut panel));

    assert!(path.exists());
    assert_eq!(image::open(&path).unwrap().to_rgba8().dimensions(), (320, 240));
}

#[test]
fn toolbar_edits_apply_next_frame() {
    let mut fig = Figure::new(quiet_config()).unwrap();
    fig.attach_toolbar();
    fig.axes_mut(0)
        .unwrap()
        .plot(&X, &Y, Color::BLACK)
        .unwrap();

    let click = |x, y| InputEvent::MouseDown {
        window: WindowId::Toolbar,
        x,
        y,
        button: MouseButton::Left,
    };
    fig.handle_event(&click(100.0, 190.0));
    fig.handle_event(&click(50.0, 395.0));
    fig.handle_event(&click(35.0, 340.0));

    // Nothing changes until the queue is applied.
    assert_eq!(fig.axes()[0].series()[0].style, LineStyle::Solid);
    assert!(fig.apply_pending().is_empty());

    let ax = &fig.axes()[0];
    assert_eq!(ax.series()[0].style, LineStyle::Dotted);
    assert_eq!(ax.series()[0].color, Color::from_rgb8(255, 0, 0));
    assert!(ax.show_grid);
}

#[test]
fn spatial_drag_changes_projection_output() {
    let mut fig = Figure::new(quiet_config()).unwrap();
    fig.axes_mut(0)
        .unwrap()
        .plot3d(&[0.0, 1.0], &[0.0, 1.0], &[0.0, 1.0], Color::BLACK)
        .unwrap();
    assert_eq!(
        fig.axes()[0].projection().mode(),
        ProjectionMode::ThreeD
    );

    let endpoints = |fig: &Figure| {
        let mut surface = RecordingSurface::new(800.0, 600.0);
        fig.render_frame(&mut surface);
        surface
            .geometry()
            .map(|quad| quad[0].point())
            .collect::<Vec<Point>>()
    };

    let before = endpoints(&fig);
    fig.handle_event(&InputEvent::MouseMotion {
        window: WindowId::Main,
        x: 0.0,
        y: 0.0,
        dx: 40.0,
        dy: 0.0,
        left_held: true,
    });
    assert_ne!(before, endpoints(&fig));
}
