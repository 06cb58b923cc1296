//! Data-space to screen-space mapping.
//!
//! Two transforms exist: [`PlanarScale`], a linear map with 10% headroom for
//! 2D axes, and [`SpatialProjection`], an orthographic camera for 3D axes.
//! Both work on the pixel rectangle an [`Axes`](crate::axes::Axes) was given
//! by the layout engine. Screen y grows downward, data y grows upward.

use iced::{Point, Rectangle};

/// Headroom multiplier applied to non-degenerate 2D data ranges.
pub const RANGE_PADDING: f32 = 1.1;

/// Fraction of the smaller rect side covered by the unit cube at zoom 1.
pub const SPATIAL_SCALE: f32 = 0.4;

// ================================================================================
// Extent
// ================================================================================

/// Running min/max of one data axis.
///
/// Starts empty (`+inf`, `-inf`) and only ever widens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min: f32,
    pub max: f32,
}

impl Default for Extent {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Extent {
    pub const EMPTY: Extent = Extent {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Folds a sample in. Non-finite samples are ignored.
    pub fn include(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn include_all(&mut self, values: &[f32]) {
        for &v in values {
            self.include(v);
        }
    }

    /// `max - min`, or 0 while empty.
    pub fn span(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max - self.min
        }
    }

    /// The extent as a `(min, max)` pair, or `fallback` while empty.
    pub fn resolve(&self, fallback: (f32, f32)) -> (f32, f32) {
        if self.is_empty() {
            fallback
        } else {
            (self.min, self.max)
        }
    }

    pub fn midpoint(&self, fallback: (f32, f32)) -> f32 {
        let (lo, hi) = self.resolve(fallback);
        (lo + hi) * 0.5
    }
}

// ================================================================================
// 2D
// ================================================================================

/// The on-screen length of a data range: padded by 10%, or 1.0 when the data
/// has no spread.
pub fn padded_range(span: f32) -> f32 {
    if span > 0.0 { span * RANGE_PADDING } else { 1.0 }
}

/// Linear data-to-pixel map for a 2D axes.
#[derive(Clone, Copy, Debug)]
pub struct PlanarScale {
    rect: Rectangle,
    x_min: f32,
    x_range: f32,
    y_min: f32,
    y_range: f32,
}

impl PlanarScale {
    pub fn new(rect: Rectangle, x: Extent, y: Extent) -> Self {
        let (x_min, x_max) = x.resolve((0.0, 1.0));
        let (y_min, y_max) = y.resolve((0.0, 1.0));

        Self {
            rect,
            x_min,
            x_range: padded_range(x_max - x_min),
            y_min,
            y_range: padded_range(y_max - y_min),
        }
    }

    pub fn to_screen(&self, x: f32, y: f32) -> Point {
        let screen_x = self.rect.x + ((x - self.x_min) / self.x_range) * self.rect.width;
        let screen_y = self.rect.y + self.rect.height
            - ((y - self.y_min) / self.y_range) * self.rect.height;
        Point::new(screen_x, screen_y)
    }
}

// ================================================================================
// 3D
// ================================================================================

pub const DEFAULT_AZIMUTH: f32 = 300.0;
pub const DEFAULT_ELEVATION: f32 = 30.0;
/// Degrees of rotation per pixel of mouse drag.
pub const DRAG_SENSITIVITY: f32 = 0.5;
/// Elevation limit in degrees; keeps the view from flipping over the pole.
pub const MAX_ELEVATION: f32 = 89.0;

/// Orthographic camera angles, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Rotation around the vertical axis (phi).
    pub azimuth: f32,
    /// Tilt towards the viewer (theta).
    pub elevation: f32,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            azimuth: DEFAULT_AZIMUTH,
            elevation: DEFAULT_ELEVATION,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Applies a mouse drag of `(dx, dy)` pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.azimuth += dx * DRAG_SENSITIVITY;
        self.elevation =
            (self.elevation - dy * DRAG_SENSITIVITY).clamp(-MAX_ELEVATION, MAX_ELEVATION);
    }
}

/// `(min, span)` used to normalize one axis into [-1, 1].
fn normalizer(extent: Extent) -> (f32, f32) {
    let (min, max) = extent.resolve((-1.0, 1.0));
    let span = max - min;
    if span > 0.0 { (min, span) } else { (min, 1.0) }
}

/// Projects 3D data points into an axes rect.
#[derive(Clone, Copy, Debug)]
pub struct SpatialProjection {
    center: Point,
    scale: f32,
    x: (f32, f32),
    y: (f32, f32),
    z: (f32, f32),
    sin_phi: f32,
    cos_phi: f32,
    sin_theta: f32,
    cos_theta: f32,
}

impl SpatialProjection {
    pub fn new(rect: Rectangle, x: Extent, y: Extent, z: Extent, camera: &Camera) -> Self {
        let (sin_phi, cos_phi) = camera.azimuth.to_radians().sin_cos();
        let (sin_theta, cos_theta) = camera.elevation.to_radians().sin_cos();

        Self {
            center: rect.center(),
            scale: rect.width.min(rect.height) * SPATIAL_SCALE * camera.zoom,
            x: normalizer(x),
            y: normalizer(y),
            z: normalizer(z),
            sin_phi,
            cos_phi,
            sin_theta,
            cos_theta,
        }
    }

    pub fn to_screen(&self, x: f32, y: f32, z: f32) -> Point {
        let normalize = |v: f32, (min, span): (f32, f32)| 2.0 * (v - min) / span - 1.0;
        let nx = normalize(x, self.x);
        let ny = normalize(y, self.y);
        let nz = normalize(z, self.z);

        // Azimuth: rotate around the vertical axis.
        let x1 = nx * self.cos_phi - ny * self.sin_phi;
        let y1 = nx * self.sin_phi + ny * self.cos_phi;

        // Elevation: rotate around the horizontal axis. The depth component
        // is dropped by the orthographic projection.
        let y2 = y1 * self.cos_theta - nz * self.sin_theta;

        Point::new(
            self.center.x + x1 * self.scale,
            self.center.y - y2 * self.scale,
        )
    }

    /// Screen positions of the 8 corners of the data bounding box; bottom
    /// face (z min) first, both faces wound the same way.
    pub fn corners(&self) -> [Point; 8] {
        let (x0, x1) = (self.x.0, self.x.0 + self.x.1);
        let (y0, y1) = (self.y.0, self.y.0 + self.y.1);
        let (z0, z1) = (self.z.0, self.z.0 + self.z.1);

        [
            self.to_screen(x0, y0, z0),
            self.to_screen(x1, y0, z0),
            self.to_screen(x1, y1, z0),
            self.to_screen(x0, y1, z0),
            self.to_screen(x0, y0, z1),
            self.to_screen(x1, y0, z1),
            self.to_screen(x1, y1, z1),
            self.to_screen(x0, y1, z1),
        ]
    }

    /// The 12 edges of the bounding-box cage.
    pub fn cage_edges(&self) -> [(Point, Point); 12] {
        let c = self.corners();
        std::array::from_fn(|i| {
            let k = i % 4;
            let next = (k + 1) % 4;
            match i / 4 {
                0 => (c[k], c[next]),
                1 => (c[k + 4], c[next + 4]),
                _ => (c[k], c[k + 4]),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Size;

    fn rect() -> Rectangle {
        Rectangle::new(Point::new(100.0, 50.0), Size::new(400.0, 300.0))
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn extent_widens_and_skips_nan() {
        let mut e = Extent::EMPTY;
        assert!(e.is_empty());
        assert_eq!(e.span(), 0.0);

        e.include_all(&[3.0, f32::NAN, -2.0, f32::INFINITY]);
        assert_eq!(e, Extent::new(-2.0, 3.0));

        e.include(0.5);
        assert_eq!(e, Extent::new(-2.0, 3.0));
    }

    #[test]
    fn min_corner_maps_to_bottom_left() {
        let scale = PlanarScale::new(rect(), Extent::new(1.0, 4.0), Extent::new(1.0, 4.0));
        assert!(close(scale.to_screen(1.0, 1.0), Point::new(100.0, 350.0)));
    }

    #[test]
    fn max_corner_maps_inside_top_right_padding() {
        let scale = PlanarScale::new(rect(), Extent::new(1.0, 4.0), Extent::new(1.0, 4.0));
        let p = scale.to_screen(4.0, 4.0);
        assert!(close(p, Point::new(100.0 + 400.0 / 1.1, 350.0 - 300.0 / 1.1)));
        assert!(rect().contains(p));
    }

    #[test]
    fn constant_data_uses_unit_range() {
        let scale = PlanarScale::new(rect(), Extent::new(2.0, 2.0), Extent::new(5.0, 5.0));
        let p = scale.to_screen(2.0, 5.0);
        assert!(p.x.is_finite() && p.y.is_finite());
        assert!(close(p, Point::new(100.0, 350.0)));
    }

    #[test]
    fn empty_extents_stay_finite() {
        let scale = PlanarScale::new(rect(), Extent::EMPTY, Extent::EMPTY);
        let p = scale.to_screen(0.5, 0.5);
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn spatial_center_lands_on_rect_center() {
        let camera = Camera {
            azimuth: 0.0,
            elevation: 0.0,
            zoom: 1.0,
        };
        let unit = Extent::new(-1.0, 1.0);
        let projection = SpatialProjection::new(rect(), unit, unit, unit, &camera);
        assert!(close(projection.to_screen(0.0, 0.0, 0.0), rect().center()));
    }

    #[test]
    fn azimuth_quarter_turn_moves_x_axis_up() {
        let camera = Camera {
            azimuth: 90.0,
            elevation: 0.0,
            zoom: 1.0,
        };
        let unit = Extent::new(-1.0, 1.0);
        let projection = SpatialProjection::new(rect(), unit, unit, unit, &camera);
        let scale = 300.0 * SPATIAL_SCALE;
        let p = projection.to_screen(1.0, 0.0, 0.0);
        assert!(close(p, Point::new(300.0, 200.0 - scale)));
    }

    #[test]
    fn degenerate_spatial_axes_stay_finite() {
        let flat = Extent::new(3.0, 3.0);
        let projection =
            SpatialProjection::new(rect(), flat, Extent::EMPTY, flat, &Camera::default());
        for corner in projection.corners() {
            assert!(corner.x.is_finite() && corner.y.is_finite());
        }
    }

    #[test]
    fn cage_has_twelve_distinct_edges() {
        let unit = Extent::new(-1.0, 1.0);
        let projection = SpatialProjection::new(rect(), unit, unit, unit, &Camera::default());
        let edges = projection.cage_edges();
        for (i, a) in edges.iter().enumerate() {
            for b in &edges[i + 1..] {
                assert!(!(close(a.0, b.0) && close(a.1, b.1)));
            }
        }
    }

    #[test]
    fn drag_clamps_elevation() {
        let mut camera = Camera::default();
        camera.drag(10.0, -1000.0);
        assert_eq!(camera.azimuth, 305.0);
        assert_eq!(camera.elevation, MAX_ELEVATION);
        camera.drag(0.0, 1000.0);
        assert_eq!(camera.elevation, -MAX_ELEVATION);
    }
}
