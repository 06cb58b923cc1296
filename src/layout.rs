//! Grid layout of subplots inside the window.

use iced::{Point, Rectangle, Size};

/// Fractions of a grid cell left empty around the plot area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPadding {
    /// Room for y tick labels.
    pub left: f32,
    pub right: f32,
    /// Room for the title.
    pub top: f32,
    /// Room for x tick labels and the x label.
    pub bottom: f32,
}

impl Default for CellPadding {
    fn default() -> Self {
        Self {
            left: 0.12,
            right: 0.05,
            top: 0.10,
            bottom: 0.15,
        }
    }
}

/// `(columns, rows)` for `count` subplots: two columns as soon as there is more
/// than one.
pub fn grid_shape(count: usize) -> (usize, usize) {
    let columns = if count > 1 { 2 } else { 1 };
    (columns, count.div_ceil(columns))
}

/// Computes the plot rectangle of each of `count` subplots, row-major.
pub fn compute_layout(window: Size, count: usize, padding: &CellPadding) -> Vec<Rectangle> {
    if count == 0 {
        return Vec::new();
    }

    let (columns, rows) = grid_shape(count);
    let cell_w = window.width / columns as f32;
    let cell_h = window.height / rows as f32;

    let pad_left = cell_w * padding.left;
    let pad_right = cell_w * padding.right;
    let pad_top = cell_h * padding.top;
    let pad_bottom = cell_h * padding.bottom;

    (0..count)
        .map(|i| {
            let row = (i / columns) as f32;
            let col = (i % columns) as f32;
            Rectangle::new(
                Point::new(col * cell_w + pad_left, row * cell_h + pad_top),
                Size::new(
                    cell_w - (pad_left + pad_right),
                    cell_h - (pad_top + pad_bottom),
                ),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn single_subplot_fills_window() {
        let rects = compute_layout(Size::new(800.0, 600.0), 1, &CellPadding::default());
        assert_eq!(rects.len(), 1);
        let r = rects[0];
        assert!(approx(r.x, 96.0));
        assert!(approx(r.y, 60.0));
        assert!(approx(r.width, 800.0 * 0.83));
        assert!(approx(r.height, 600.0 * 0.75));
    }

    #[test]
    fn four_subplots_form_two_by_two() {
        let rects = compute_layout(Size::new(1024.0, 768.0), 4, &CellPadding::default());
        assert_eq!(grid_shape(4), (2, 2));

        for r in &rects {
            assert!(approx(r.width, 512.0 * 0.83));
            assert!(approx(r.height, 384.0 * 0.75));
        }
        assert!(rects[0].x < rects[1].x && approx(rects[0].y, rects[1].y));
        assert!(rects[3].x > rects[2].x && rects[3].y > rects[0].y);
        assert!(approx(rects[3].x, 512.0 + 512.0 * 0.12));
        assert!(approx(rects[3].y, 384.0 + 384.0 * 0.10));
    }

    #[test]
    fn odd_count_adds_a_row() {
        assert_eq!(grid_shape(3), (2, 2));
        assert_eq!(grid_shape(5), (2, 3));
        let rects = compute_layout(Size::new(600.0, 900.0), 3, &CellPadding::default());
        assert!(approx(rects[2].y, 450.0 + 45.0));
    }

    #[test]
    fn zero_subplots_is_empty() {
        assert!(compute_layout(Size::new(800.0, 600.0), 0, &CellPadding::default()).is_empty());
    }

    #[test]
    fn rects_stay_inside_window() {
        for &(w, h) in &[(64.0, 48.0), (800.0, 600.0), (1920.0, 1080.0), (333.0, 777.0)] {
            for count in 1..=9 {
                for r in compute_layout(Size::new(w, h), count, &CellPadding::default()) {
                    assert!(r.width > 0.0 && r.height > 0.0);
                    assert!(r.x >= 0.0 && r.y >= 0.0);
                    assert!(r.x + r.width <= w + 1e-3);
                    assert!(r.y + r.height <= h + 1e-3);
                }
            }
        }
    }
}
