//! One subplot: its series, data limits, projection and display flags.

use crate::PlotError;
use crate::series::{LineStyle, Series, SeriesKind};
use crate::transform::{Camera, Extent};
use iced::{Color, Point, Rectangle, Size};

/// Which projection an axes is drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectionMode {
    #[default]
    TwoD,
    ThreeD,
}

/// Projection state. The spatial variant carries its camera.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Projection {
    #[default]
    Flat,
    Spatial(Camera),
}

impl Projection {
    pub fn mode(&self) -> ProjectionMode {
        match self {
            Projection::Flat => ProjectionMode::TwoD,
            Projection::Spatial(_) => ProjectionMode::ThreeD,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Axes {
    rect: Rectangle,
    projection: Projection,
    series: Vec<Series>,
    x: Extent,
    y: Extent,
    z: Extent,
    /// The z extent is the [-1, 1] stand-in set when switching to 3D.
    z_placeholder: bool,
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    z_label: Option<String>,
    pub show_grid: bool,
    pub show_legend: bool,
}

// ================================================================================
// Public Methods
// ================================================================================

impl Axes {
    pub(crate) fn new(title: Option<String>) -> Self {
        Self {
            rect: Rectangle::new(Point::ORIGIN, Size::ZERO),
            projection: Projection::Flat,
            series: Vec::new(),
            x: Extent::EMPTY,
            y: Extent::EMPTY,
            z: Extent::EMPTY,
            z_placeholder: false,
            title,
            x_label: None,
            y_label: None,
            z_label: None,
            show_grid: false,
            show_legend: false,
        }
    }

    /// Screen rectangle of the plot area, as set by the last layout pass.
    pub fn rect(&self) -> Rectangle {
        self.rect
    }

    pub(crate) fn set_rect(&mut self, rect: Rectangle) {
        self.rect = rect;
    }

    /// Adds a solid line series and widens the limits to include it.
    /// Returns the index of the new series.
    pub fn plot(&mut self, x: &[f32], y: &[f32], color: Color) -> Result<usize, PlotError> {
        check_lengths(x, y, None)?;
        Ok(self.push_series(Series::line(x, y, None, color)))
    }

    /// Like [`Axes::plot`], but the series is drawn as square markers of side
    /// `marker_size` pixels.
    pub fn scatter(
        &mut self,
        x: &[f32],
        y: &[f32],
        color: Color,
        marker_size: f32,
    ) -> Result<usize, PlotError> {
        let index = self.plot(x, y, color)?;
        let series = &mut self.series[index];
        series.kind = SeriesKind::Scatter;
        series.set_marker_size(marker_size);
        Ok(index)
    }

    /// Adds a 3D line series, switching the axes to 3D first if needed.
    pub fn plot3d(
        &mut self,
        x: &[f32],
        y: &[f32],
        z: &[f32],
        color: Color,
    ) -> Result<usize, PlotError> {
        check_lengths(x, y, Some(z))?;

        if self.projection.mode() != ProjectionMode::ThreeD {
            self.set_projection(ProjectionMode::ThreeD);
        }

        if self.z_placeholder && !z.is_empty() {
            self.z = Extent::EMPTY;
            self.z_placeholder = false;
            if self.series.iter().any(Series::is_planar) {
                self.z.include(0.0);
            }
        }
        self.z.include_all(z);

        Ok(self.push_series(Series::line(x, y, Some(z), color)))
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn line_count(&self) -> usize {
        self.series.len()
    }

    pub fn x_limits(&self) -> Extent {
        self.x
    }

    pub fn y_limits(&self) -> Extent {
        self.y
    }

    pub fn z_limits(&self) -> Extent {
        self.z
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Switches projection. Entering 3D resets the camera to its default
    /// view, installs a [-1, 1] z range until z data arrives and gives unset
    /// axis labels generic names. Planar series sit at z = 0.
    pub fn set_projection(&mut self, mode: ProjectionMode) {
        match mode {
            ProjectionMode::TwoD => self.projection = Projection::Flat,
            ProjectionMode::ThreeD => {
                self.projection = Projection::Spatial(Camera::default());
                if self.z.is_empty() || self.z_placeholder {
                    self.z = Extent::new(-1.0, 1.0);
                    self.z_placeholder = true;
                }
                self.x_label.get_or_insert_with(|| "X-Axis".to_string());
                self.y_label.get_or_insert_with(|| "Y-Axis".to_string());
                self.z_label.get_or_insert_with(|| "Z-Axis".to_string());
            }
        }
        log::debug!("axes projection set to {mode:?}");
    }

    pub fn camera(&self) -> Option<&Camera> {
        match &self.projection {
            Projection::Spatial(camera) => Some(camera),
            Projection::Flat => None,
        }
    }

    /// Camera of a 3D axes; `None` for 2D.
    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        match &mut self.projection {
            Projection::Spatial(camera) => Some(camera),
            Projection::Flat => None,
        }
    }

    /// Sets azimuth and elevation in degrees. Ignored for 2D axes.
    pub fn set_view(&mut self, azimuth: f32, elevation: f32) {
        if let Some(camera) = self.camera_mut() {
            camera.azimuth = azimuth;
            camera.elevation = elevation;
        }
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        if let Some(camera) = self.camera_mut() {
            camera.zoom = zoom;
        }
    }

    pub fn set_grid(&mut self, enabled: bool) {
        self.show_grid = enabled;
    }

    pub fn set_legend(&mut self, enabled: bool) {
        self.show_legend = enabled;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn x_label(&self) -> Option<&str> {
        self.x_label.as_deref()
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.x_label = Some(label.into());
    }

    pub fn y_label(&self) -> Option<&str> {
        self.y_label.as_deref()
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.y_label = Some(label.into());
    }

    pub fn z_label(&self) -> Option<&str> {
        self.z_label.as_deref()
    }

    pub fn set_zlabel(&mut self, label: impl Into<String>) {
        self.z_label = Some(label.into());
    }

    pub fn set_linestyle(&mut self, index: usize, style: LineStyle) -> Result<(), PlotError> {
        self.series_at(index)?.style = style;
        Ok(())
    }

    /// Sets the legend label of a series (at most 31 characters are kept).
    pub fn set_label(&mut self, index: usize, label: &str) -> Result<(), PlotError> {
        self.series_at(index)?.set_label(label);
        Ok(())
    }

    pub fn set_thickness(&mut self, index: usize, thickness: f32) -> Result<(), PlotError> {
        self.series_at(index)?.set_thickness(thickness)
    }

    pub fn set_color(&mut self, index: usize, color: Color) -> Result<(), PlotError> {
        self.series_at(index)?.color = color;
        Ok(())
    }
}

// ================================================================================
// Private Methods
// ================================================================================

impl Axes {
    fn push_series(&mut self, series: Series) -> usize {
        self.x.include_all(series.x());
        self.y.include_all(series.y());
        if self.projection.mode() == ProjectionMode::ThreeD && series.is_planar() {
            self.z.include(0.0);
        }
        self.series.push(series);
        self.series.len() - 1
    }

    fn series_at(&mut self, index: usize) -> Result<&mut Series, PlotError> {
        let len = self.series.len();
        self.series.get_mut(index).ok_or_else(|| {
            log::warn!("ignoring setter for series {index}; axes has {len} series");
            PlotError::SeriesIndex { index, len }
        })
    }
}

fn check_lengths(x: &[f32], y: &[f32], z: Option<&[f32]>) -> Result<(), PlotError> {
    let z_len = z.map(<[f32]>::len);
    if x.len() != y.len() || z_len.is_some_and(|n| n != x.len()) {
        log::warn!(
            "rejecting series with mismatched lengths x={} y={} z={z_len:?}",
            x.len(),
            y.len()
        );
        return Err(PlotError::LengthMismatch {
            x: x.len(),
            y: y.len(),
            z: z_len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: [f32; 4] = [1.0, 2.0, 3.0, 4.0];
    const Y: [f32; 4] = [1.0, 4.0, 2.0, 3.0];

    #[test]
    fn plot_sets_limits_and_defaults() {
        let mut ax = Axes::new(None);
        assert!(ax.x_limits().is_empty());

        assert_eq!(ax.plot(&X, &Y, Color::BLACK).unwrap(), 0);
        assert_eq!(ax.x_limits(), Extent::new(1.0, 4.0));
        assert_eq!(ax.y_limits(), Extent::new(1.0, 4.0));
        assert_eq!(ax.line_count(), 1);
        assert_eq!(ax.series()[0].kind, SeriesKind::Line);
    }

    #[test]
    fn limits_never_shrink() {
        let mut ax = Axes::new(None);
        ax.plot(&[-5.0, 5.0], &[0.0, 10.0], Color::BLACK).unwrap();
        ax.plot(&[1.0], &[2.0], Color::BLACK).unwrap();
        assert_eq!(ax.x_limits(), Extent::new(-5.0, 5.0));
        assert_eq!(ax.y_limits(), Extent::new(0.0, 10.0));

        ax.scatter(&[7.0], &[-1.0], Color::BLACK, 4.0).unwrap();
        assert_eq!(ax.x_limits(), Extent::new(-5.0, 7.0));
        assert_eq!(ax.y_limits(), Extent::new(-1.0, 10.0));
    }

    #[test]
    fn empty_plot_registers_series() {
        let mut ax = Axes::new(None);
        ax.plot(&[], &[], Color::BLACK).unwrap();
        assert_eq!(ax.line_count(), 1);
        assert!(ax.x_limits().is_empty());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let mut ax = Axes::new(None);
        assert!(matches!(
            ax.plot(&[1.0, 2.0], &[1.0], Color::BLACK),
            Err(PlotError::LengthMismatch { x: 2, y: 1, z: None })
        ));
        assert!(ax.plot3d(&[1.0], &[1.0], &[], Color::BLACK).is_err());
        assert_eq!(ax.line_count(), 0);
        assert_eq!(ax.projection(), Projection::Flat);
    }

    #[test]
    fn scatter_overrides_kind_and_size() {
        let mut ax = Axes::new(None);
        ax.scatter(&X, &Y, Color::BLACK, 8.0).unwrap();
        let s = &ax.series()[0];
        assert_eq!(s.kind, SeriesKind::Scatter);
        assert_eq!(s.marker_size(), 8.0);
        assert_eq!(ax.x_limits(), Extent::new(1.0, 4.0));
    }

    #[test]
    fn plot3d_switches_projection() {
        let mut ax = Axes::new(None);
        ax.plot3d(&[0.0, 1.0], &[0.0, 2.0], &[5.0, 6.0], Color::BLACK)
            .unwrap();

        let camera = ax.camera().copied().unwrap();
        assert_eq!(camera, Camera::default());
        assert_eq!(ax.z_limits(), Extent::new(5.0, 6.0));
        assert_eq!(ax.z_label(), Some("Z-Axis"));

        ax.plot3d(&[0.5], &[0.5], &[-3.0], Color::BLACK).unwrap();
        assert_eq!(ax.z_limits(), Extent::new(-3.0, 6.0));
    }

    #[test]
    fn planar_series_on_3d_axes_widens_z() {
        let mut ax = Axes::new(None);
        ax.plot3d(&[0.0, 1.0], &[0.0, 1.0], &[5.0, 6.0], Color::BLACK)
            .unwrap();
        ax.plot(&[0.0, 1.0], &[0.0, 1.0], Color::BLACK).unwrap();
        assert_eq!(ax.z_limits(), Extent::new(0.0, 6.0));

        let mut ax = Axes::new(None);
        ax.plot(&X, &Y, Color::BLACK).unwrap();
        ax.plot3d(&[0.0], &[0.0], &[5.0], Color::BLACK).unwrap();
        assert_eq!(ax.z_limits(), Extent::new(0.0, 5.0));

        ax.set_projection(ProjectionMode::TwoD);
        ax.set_projection(ProjectionMode::ThreeD);
        assert_eq!(ax.z_limits(), Extent::new(0.0, 5.0));
    }

    #[test]
    fn entering_3d_keeps_custom_labels() {
        let mut ax = Axes::new(None);
        ax.set_xlabel("time");
        ax.set_projection(ProjectionMode::ThreeD);
        assert_eq!(ax.x_label(), Some("time"));
        assert_eq!(ax.y_label(), Some("Y-Axis"));
        assert_eq!(ax.z_limits(), Extent::new(-1.0, 1.0));

        ax.set_projection(ProjectionMode::TwoD);
        assert!(ax.camera().is_none());
    }

    #[test]
    fn out_of_range_setters_change_nothing() {
        let mut ax = Axes::new(None);
        ax.plot(&X, &Y, Color::BLACK).unwrap();
        ax.plot(&X, &Y, Color::BLACK).unwrap();

        let err = ax.set_linestyle(2, LineStyle::Dashed).unwrap_err();
        assert!(matches!(err, PlotError::SeriesIndex { index: 2, len: 2 }));
        assert!(ax.series().iter().all(|s| s.style == LineStyle::Solid));

        assert!(ax.set_label(9, "nope").is_err());
        assert!(ax.set_thickness(9, 3.0).is_err());
        assert!(ax.series().iter().all(|s| s.label() == "Series"));
    }

    #[test]
    fn view_setters_only_touch_3d() {
        let mut ax = Axes::new(None);
        ax.set_view(10.0, 20.0);
        assert!(ax.camera().is_none());

        ax.set_projection(ProjectionMode::ThreeD);
        ax.set_view(10.0, 20.0);
        ax.set_zoom(2.0);
        let camera = ax.camera().unwrap();
        assert_eq!((camera.azimuth, camera.elevation, camera.zoom), (10.0, 20.0, 2.0));
    }
}
