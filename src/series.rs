use iced::Color;

// ================================================================================
// Utility Types
// ================================================================================

/// Longest label a series keeps; longer names are cut at a char boundary.
pub const MAX_LABEL_CHARS: usize = 31;

pub const DEFAULT_LABEL: &str = "Series";
pub const DEFAULT_THICKNESS: f32 = 2.0;

/// How the samples of a series are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeriesKind {
    /// Consecutive samples joined by stroked segments.
    #[default]
    Line,
    /// One filled square marker per sample.
    Scatter,
}

/// Stroke pattern for line series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Dash and gap lengths in pixels, `None` for a continuous stroke.
    pub fn pattern(self) -> Option<(f32, f32)> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some((10.0, 5.0)),
            LineStyle::Dotted => Some((3.0, 3.0)),
        }
    }
}

// ================================================================================
// Series
// ================================================================================

/// One plotted dataset.
///
/// The series owns a copy of the samples it was created from, so the caller's
/// buffers may be dropped or reused right after the plot call returns.
#[derive(Clone, Debug)]
pub struct Series {
    x: Vec<f32>,
    y: Vec<f32>,
    z: Option<Vec<f32>>,
    pub color: Color,
    pub kind: SeriesKind,
    pub style: LineStyle,
    marker_size: f32,
    thickness: f32,
    label: String,
}

impl Series {
    /// Creates a solid line series. `x` and `y` must have equal length; the
    /// owning [`Axes`](crate::axes::Axes) checks that before calling.
    pub(crate) fn line(x: &[f32], y: &[f32], z: Option<&[f32]>, color: Color) -> Self {
        Self {
            x: x.to_vec(),
            y: y.to_vec(),
            z: z.map(<[f32]>::to_vec),
            color,
            kind: SeriesKind::Line,
            style: LineStyle::Solid,
            marker_size: 0.0,
            thickness: DEFAULT_THICKNESS,
            label: DEFAULT_LABEL.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f32] {
        &self.x
    }

    pub fn y(&self) -> &[f32] {
        &self.y
    }

    pub fn z(&self) -> Option<&[f32]> {
        self.z.as_deref()
    }

    /// A series without z data that has samples to draw at z = 0.
    pub fn is_planar(&self) -> bool {
        self.z.is_none() && !self.x.is_empty()
    }

    /// Iterates over `(x, y, z)` samples; `z` is 0 for planar series.
    pub fn points(&self) -> impl Iterator<Item = (f32, f32, f32)> + '_ {
        let z = self.z.as_deref();
        self.x
            .iter()
            .zip(&self.y)
            .enumerate()
            .map(move |(i, (&x, &y))| (x, y, z.map_or(0.0, |z| z[i])))
    }

    pub fn marker_size(&self) -> f32 {
        self.marker_size
    }

    pub fn set_marker_size(&mut self, size: f32) {
        self.marker_size = size.max(0.0);
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Rejects non-positive or non-finite thickness, leaving the old value.
    pub fn set_thickness(&mut self, thickness: f32) -> Result<(), crate::PlotError> {
        if !thickness.is_finite() || thickness <= 0.0 {
            return Err(crate::PlotError::InvalidThickness(thickness));
        }
        self.thickness = thickness;
        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: &str) {
        self.label = label.chars().take(MAX_LABEL_CHARS).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_line_has_defaults() {
        let s = Series::line(&[1.0, 2.0], &[3.0, 4.0], None, Color::BLACK);
        assert_eq!(s.kind, SeriesKind::Line);
        assert_eq!(s.style, LineStyle::Solid);
        assert_eq!(s.thickness(), 2.0);
        assert_eq!(s.label(), "Series");
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn label_is_truncated() {
        let mut s = Series::line(&[], &[], None, Color::BLACK);
        s.set_label(&"a".repeat(64));
        assert_eq!(s.label().chars().count(), MAX_LABEL_CHARS);

        s.set_label("Sensör ☀");
        assert_eq!(s.label(), "Sensör ☀");
    }

    #[test]
    fn thickness_must_be_positive() {
        let mut s = Series::line(&[], &[], None, Color::BLACK);
        assert!(s.set_thickness(0.0).is_err());
        assert!(s.set_thickness(f32::NAN).is_err());
        assert!(s.set_thickness(f32::INFINITY).is_err());
        assert_eq!(s.thickness(), 2.0);
        s.set_thickness(4.5).unwrap();
        assert_eq!(s.thickness(), 4.5);
    }

    #[test]
    fn points_fill_missing_z() {
        let s = Series::line(&[1.0, 2.0], &[3.0, 4.0], None, Color::BLACK);
        let pts: Vec<_> = s.points().collect();
        assert_eq!(pts, vec![(1.0, 3.0, 0.0), (2.0, 4.0, 0.0)]);
    }
}
