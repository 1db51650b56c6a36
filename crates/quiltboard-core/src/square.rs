//! Square entity: the draggable quilt tile.

use crate::fill::Fill;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for squares.
pub type SquareId = Uuid;

/// Where a square currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Membership {
    /// On the working surface, subject to the no-overlap and bounds
    /// invariants.
    Surface,
    /// In the unconstrained holding strip below the working surface.
    Holding,
}

/// A rectangular quilt square.
///
/// `position` is the top-left corner in inches, relative to the working
/// surface's origin — the buffer-inset area is a valid placement target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Square {
    pub(crate) id: SquareId,
    /// Top-left corner in inches.
    pub position: Point,
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
    /// Surface or holding.
    pub membership: Membership,
    /// Visual fill: captured image or palette color.
    pub fill: Fill,
}

impl Square {
    /// Create a new square at the origin, in holding. The layout assigns the
    /// holding park position on insert.
    pub fn new(fill: Fill, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: Point::ZERO,
            width,
            height,
            membership: Membership::Holding,
            fill,
        }
    }

    /// Get the unique identifier.
    pub fn id(&self) -> SquareId {
        self.id
    }

    /// Get the bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Strict-interior overlap with another square. Touching edges do not
    /// count as overlap.
    pub fn overlaps(&self, other: &Square) -> bool {
        boxes_overlap(self.bounds(), other.bounds())
    }
}

/// Strict-interior AABB overlap test: true iff the interiors intersect, so
/// shared edges and corners are permitted.
pub fn boxes_overlap(a: Rect, b: Rect) -> bool {
    !(a.x1 <= b.x0 || b.x1 <= a.x0 || a.y1 <= b.y0 || b.y1 <= a.y0)
}
