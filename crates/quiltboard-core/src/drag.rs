//! Ephemeral drag projection.
//!
//! While a square is being dragged its live position lives here, separate
//! from the committed layout. The projection is merged back only at
//! drag-end, through the placement resolver.

use crate::quilt::QuiltConfig;
use crate::snap::snap_point;
use crate::square::SquareId;
use kurbo::{Point, Vec2};

/// State of the square currently in drag. At most one exists at a time.
#[derive(Debug, Clone)]
pub struct DragState {
    /// The square being dragged.
    pub square_id: SquareId,
    /// Pointer position at drag start, in inches.
    pub start_point: Point,
    /// Current pointer position, in inches.
    pub current_point: Point,
    /// Committed top-left position at drag start.
    pub original_position: Point,
    /// Square width, captured at drag start.
    pub width: f64,
    /// Square height, captured at drag start.
    pub height: f64,
}

impl DragState {
    /// Create a new drag state anchored at the pointer's start position.
    pub fn new(
        square_id: SquareId,
        start_point: Point,
        original_position: Point,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            square_id,
            start_point,
            current_point: start_point,
            original_position,
            width,
            height,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        Vec2::new(
            self.current_point.x - self.start_point.x,
            self.current_point.y - self.start_point.y,
        )
    }

    /// The position handed to the resolver at drag-end: the original
    /// top-left moved by the drag delta, snapped but *not* clamped, so
    /// out-of-surface drops can still park in holding.
    pub fn drop_position(&self) -> Point {
        let delta = self.delta();
        snap_point(Point::new(
            self.original_position.x + delta.x,
            self.original_position.y + delta.y,
        ))
    }

    /// Live position for visual feedback: snapped and clamped into the
    /// working surface. Never committed to the layout.
    pub fn preview_position(&self, quilt: &QuiltConfig) -> Point {
        let unclamped = self.drop_position();
        let max_x = (quilt.total_width() - self.width).max(0.0);
        let max_y = (quilt.total_height() - self.height).max(0.0);
        Point::new(
            unclamped.x.min(max_x).max(0.0),
            unclamped.y.min(max_y).max(0.0),
        )
    }
}
