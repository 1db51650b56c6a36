//! Board state: the authoritative square list and its mutation entry points.
//!
//! `Layout` is the serializable document (quilt config plus squares);
//! `Board` wraps it with the runtime drag projection. The UI event layer
//! mutates the model only through the operations here, so the resolver can
//! be unit-tested with an injected square list and quilt config.

use crate::drag::DragState;
use crate::fill::{Fill, ImageData};
use crate::placement::{self, HOLDING_OFFSET, Placement};
use crate::quilt::{DimensionError, QuiltConfig};
use crate::square::{Membership, Square, SquareId};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serializable authoritative state: quilt configuration plus all squares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// Quilt and buffer dimensions.
    pub quilt: QuiltConfig,
    /// All squares, keyed by ID.
    squares: HashMap<SquareId, Square>,
    /// Creation order, for deterministic iteration.
    order: Vec<SquareId>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(QuiltConfig::default())
    }
}

impl Layout {
    /// Create an empty layout for the given quilt.
    pub fn new(quilt: QuiltConfig) -> Self {
        Self {
            quilt,
            squares: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a new square and park it in holding at the default overflow
    /// position `(0, total height + 2)`.
    ///
    /// The fill is the captured image when one is supplied, otherwise a
    /// pseudo-random palette color. Dimensions are pre-validated by the
    /// caller (see [`crate::quilt::validate_size`]); there are no failure
    /// modes here.
    pub fn create_square(&mut self, image: Option<ImageData>, width: f64, height: f64) -> SquareId {
        let mut square = Square::new(Fill::from_capture(image), width, height);
        square.position = Point::new(0.0, self.quilt.total_height() + HOLDING_OFFSET);
        let id = square.id();
        self.order.push(id);
        self.squares.insert(id, square);
        log::debug!("created square {id} ({width} x {height}) in holding");
        id
    }

    /// Replace a square's position and membership. Unknown ids are ignored.
    pub fn update_position(&mut self, id: SquareId, position: Point, membership: Membership) {
        match self.squares.get_mut(&id) {
            Some(square) => {
                square.position = position;
                square.membership = membership;
            }
            None => log::warn!("update_position: unknown square {id}"),
        }
    }

    /// Replace a square's dimensions in place. Unknown ids are ignored.
    ///
    /// The square does not move and no collision resolution runs, so a
    /// resize can leave overlapping surface squares (trusted edit).
    pub fn update_dimensions(&mut self, id: SquareId, width: f64, height: f64) {
        match self.squares.get_mut(&id) {
            Some(square) => {
                square.width = width;
                square.height = height;
            }
            None => log::warn!("update_dimensions: unknown square {id}"),
        }
    }

    /// Remove a square. Unknown ids are ignored.
    pub fn remove(&mut self, id: SquareId) {
        if self.squares.remove(&id).is_none() {
            log::warn!("remove: unknown square {id}");
            return;
        }
        self.order.retain(|&sid| sid != id);
    }

    /// Replace the quilt configuration. Existing squares keep their
    /// positions; the next drop re-resolves against the new bounds.
    pub fn set_quilt(&mut self, quilt: QuiltConfig) {
        self.quilt = quilt;
    }

    /// Get a square by ID.
    pub fn get(&self, id: SquareId) -> Option<&Square> {
        self.squares.get(&id)
    }

    /// All squares in creation order.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.order.iter().filter_map(|id| self.squares.get(id))
    }

    /// Squares currently on the working surface.
    pub fn surface_squares(&self) -> impl Iterator<Item = &Square> {
        self.squares()
            .filter(|sq| sq.membership == Membership::Surface)
    }

    /// Squares currently in holding.
    pub fn holding_squares(&self) -> impl Iterator<Item = &Square> {
        self.squares()
            .filter(|sq| sq.membership == Membership::Holding)
    }

    /// Total working-surface size.
    pub fn total_size(&self) -> Size {
        self.quilt.total_size()
    }

    /// Number of squares.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Check if the layout has no squares.
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Serialize the layout to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a layout from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Runtime board: the committed layout plus the ephemeral drag projection.
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// The committed layout.
    pub layout: Layout,
    /// The square currently in drag, if any.
    drag: Option<DragState>,
}

impl Board {
    /// Create a board for the given quilt.
    pub fn new(quilt: QuiltConfig) -> Self {
        Self {
            layout: Layout::new(quilt),
            drag: None,
        }
    }

    /// Create a new square in holding. See [`Layout::create_square`].
    pub fn create_square(&mut self, image: Option<ImageData>, width: f64, height: f64) -> SquareId {
        self.layout.create_square(image, width, height)
    }

    /// Edit a square's dimensions in place. See [`Layout::update_dimensions`].
    pub fn update_dimensions(&mut self, id: SquareId, width: f64, height: f64) {
        self.layout.update_dimensions(id, width, height);
    }

    /// Remove a square, whichever side it is on.
    pub fn remove_square(&mut self, id: SquareId) {
        self.layout.remove(id);
    }

    /// Replace the quilt configuration from raw form values. This is the
    /// validation boundary: invalid dimensions never reach the layout.
    pub fn set_quilt_config(
        &mut self,
        width: f64,
        height: f64,
        buffer: f64,
    ) -> Result<(), DimensionError> {
        self.layout.set_quilt(QuiltConfig::new(width, height, buffer)?);
        Ok(())
    }

    /// Resolve a drop of `id` at `proposed` and commit the result. Returns
    /// the committed placement, or `None` for an unknown id (a no-op).
    pub fn resolve_drop(&mut self, id: SquareId, proposed: Point) -> Option<Placement> {
        let square = match self.layout.get(id) {
            Some(square) => square,
            None => {
                log::warn!("resolve_drop: unknown square {id}");
                return None;
            }
        };
        let (width, height) = (square.width, square.height);
        let others = self.other_surface_bounds(id);
        let placement =
            placement::resolve_drop(proposed, width, height, &others, &self.layout.quilt);
        log::debug!(
            "square {id} dropped at {proposed:?}, resolved to {:?} ({:?})",
            placement.position,
            placement.membership
        );
        self.layout
            .update_position(id, placement.position, placement.membership);
        Some(placement)
    }

    /// Bounding boxes of every surface square except `id`.
    fn other_surface_bounds(&self, id: SquareId) -> Vec<Rect> {
        self.layout
            .surface_squares()
            .filter(|sq| sq.id() != id)
            .map(|sq| sq.bounds())
            .collect()
    }

    /// Start dragging a square from the given pointer position. Returns
    /// false (and changes nothing) if another drag is active or the id is
    /// unknown — exactly one square may be in drag at a time.
    pub fn begin_drag(&mut self, id: SquareId, pointer: Point) -> bool {
        if self.drag.is_some() {
            log::warn!("begin_drag: a drag is already active");
            return false;
        }
        match self.layout.get(id) {
            Some(square) => {
                self.drag = Some(DragState::new(
                    id,
                    pointer,
                    square.position,
                    square.width,
                    square.height,
                ));
                true
            }
            None => {
                log::warn!("begin_drag: unknown square {id}");
                false
            }
        }
    }

    /// Update the active drag with the current pointer position. Cheap and
    /// side-effect-free on the committed layout.
    pub fn drag_to(&mut self, pointer: Point) {
        if let Some(drag) = &mut self.drag {
            drag.current_point = pointer;
        }
    }

    /// Live snapped-and-clamped position of the dragged square, for visual
    /// feedback. `None` when no drag is active.
    pub fn drag_preview(&self) -> Option<Point> {
        self.drag
            .as_ref()
            .map(|drag| drag.preview_position(&self.layout.quilt))
    }

    /// The active drag state, if any.
    pub fn dragging(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// End the active drag: run the resolver on the final drag position and
    /// commit. This is the sole point where a gesture mutates the layout.
    pub fn end_drag(&mut self) -> Option<Placement> {
        let drag = self.drag.take()?;
        self.resolve_drop(drag.square_id, drag.drop_position())
    }
}
