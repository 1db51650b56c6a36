//! Half-inch grid snapping.

use kurbo::Point;

/// Grid step for snapping, in inches. Squares come to rest on multiples of
/// this step; mid-drag positions may be arbitrary.
pub const GRID_STEP: f64 = 0.5;

/// Snap a coordinate to the nearest half-inch grid line.
pub fn snap(v: f64) -> f64 {
    (v * 2.0).round() / 2.0
}

/// Snap both coordinates of a point to the half-inch grid.
pub fn snap_point(point: Point) -> Point {
    Point::new(snap(point.x), snap(point.y))
}
