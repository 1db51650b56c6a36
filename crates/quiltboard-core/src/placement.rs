//! Drop resolution: where a square lands when a drag gesture ends.
//!
//! Given a proposed top-left position, the resolver returns either a valid
//! non-overlapping position inside the working surface or a decision to park
//! the square in the holding strip. It never fails; every input yields a
//! committed position.

use crate::quilt::QuiltConfig;
use crate::snap::{GRID_STEP, snap};
use crate::square::{Membership, boxes_overlap};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Vertical offset of parked holding squares below the working surface, in
/// inches.
pub const HOLDING_OFFSET: f64 = 2.0;

/// A committed drop decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Resolved top-left corner.
    pub position: Point,
    /// Surface or holding.
    pub membership: Membership,
}

/// Clamp a coordinate into `[0, max]`. `max` may be negative when the square
/// is larger than the surface; the result then pins to 0.
fn clamp_axis(v: f64, max: f64) -> f64 {
    v.min(max).max(0.0)
}

/// Resolve a drop of a `width` x `height` square proposed at `proposed`,
/// against the bounding boxes of the *other* squares currently on the
/// surface.
///
/// Out-of-surface proposals park in holding with `x` clamped and
/// `y = total height + HOLDING_OFFSET`; holding never rejects a position.
/// In-surface proposals are snapped, clamped, and committed directly when
/// collision-free (the common case, O(n)). On collision, every half-unit
/// cell of the surface is scanned and the free cell nearest the proposal
/// wins, scan order (increasing `y`, then `x`) breaking distance ties. A
/// fully packed surface falls back to the snapped proposal, overlapping —
/// a best-effort result, not an error.
pub fn resolve_drop(
    proposed: Point,
    width: f64,
    height: f64,
    others: &[Rect],
    quilt: &QuiltConfig,
) -> Placement {
    let total = quilt.total_size();
    let max_x = total.width - width;
    let max_y = total.height - height;

    let in_surface =
        proposed.x >= 0.0 && proposed.x <= max_x && proposed.y >= 0.0 && proposed.y <= max_y;
    if !in_surface {
        return Placement {
            position: Point::new(
                clamp_axis(proposed.x, max_x),
                total.height + HOLDING_OFFSET,
            ),
            membership: Membership::Holding,
        };
    }

    let snapped = Point::new(
        clamp_axis(snap(proposed.x), max_x),
        clamp_axis(snap(proposed.y), max_y),
    );
    if is_free(snapped, width, height, others) {
        return Placement {
            position: snapped,
            membership: Membership::Surface,
        };
    }

    let position = nearest_free_cell(snapped, width, height, max_x, max_y, others)
        // Fully packed for this footprint: keep the snapped proposal even
        // though it overlaps.
        .unwrap_or(snapped);
    Placement {
        position,
        membership: Membership::Surface,
    }
}

/// True if a box at `origin` overlaps none of `others`.
fn is_free(origin: Point, width: f64, height: f64, others: &[Rect]) -> bool {
    let candidate = Rect::new(origin.x, origin.y, origin.x + width, origin.y + height);
    !others.iter().any(|&other| boxes_overlap(candidate, other))
}

/// Exhaustive half-unit scan over the surface, returning the free cell with
/// the smallest Euclidean distance to `target`. Rows are scanned top to
/// bottom, cells left to right, and only a strictly smaller distance
/// replaces the best candidate, so the first cell found at the minimal
/// distance wins.
fn nearest_free_cell(
    target: Point,
    width: f64,
    height: f64,
    max_x: f64,
    max_y: f64,
    others: &[Rect],
) -> Option<Point> {
    let mut best: Option<Point> = None;
    let mut best_dist_sq = f64::INFINITY;

    let mut y = 0.0;
    while y <= max_y {
        let mut x = 0.0;
        while x <= max_x {
            if is_free(Point::new(x, y), width, height, others) {
                let dx = x - target.x;
                let dy = y - target.y;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq < best_dist_sq {
                    best_dist_sq = dist_sq;
                    best = Some(Point::new(x, y));
                }
            }
            x += GRID_STEP;
        }
        y += GRID_STEP;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quilt(width: f64, height: f64, buffer: f64) -> QuiltConfig {
        QuiltConfig::new(width, height, buffer).unwrap()
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(x, y, x + w, y + h)
    }

    #[test]
    fn test_empty_surface_commits_proposal() {
        let placement = resolve_drop(Point::new(3.0, 4.5), 12.0, 12.0, &[], &quilt(60.0, 48.0, 0.0));
        assert_eq!(placement.position, Point::new(3.0, 4.5));
        assert_eq!(placement.membership, Membership::Surface);
    }

    #[test]
    fn test_unsnapped_proposal_is_snapped() {
        let placement = resolve_drop(
            Point::new(3.2, 4.7),
            12.0,
            12.0,
            &[],
            &quilt(60.0, 48.0, 0.0),
        );
        assert_eq!(placement.position, Point::new(3.0, 4.5));
        assert_eq!(placement.membership, Membership::Surface);
    }

    #[test]
    fn test_idempotent_redrop() {
        let q = quilt(60.0, 48.0, 0.0);
        let first = resolve_drop(Point::new(10.0, 10.0), 12.0, 12.0, &[], &q);
        let second = resolve_drop(first.position, 12.0, 12.0, &[], &q);
        assert_eq!(second, first);
    }

    #[test]
    fn test_drop_above_surface_parks_in_holding() {
        let placement = resolve_drop(
            Point::new(14.0, -5.0),
            12.0,
            12.0,
            &[],
            &quilt(60.0, 48.0, 0.0),
        );
        assert_eq!(placement.membership, Membership::Holding);
        assert_eq!(placement.position, Point::new(14.0, 50.0));
    }

    #[test]
    fn test_drop_below_surface_parks_in_holding() {
        let placement = resolve_drop(
            Point::new(70.0, 58.0),
            12.0,
            12.0,
            &[],
            &quilt(60.0, 48.0, 0.0),
        );
        assert_eq!(placement.membership, Membership::Holding);
        // x clamped into [0, 48], y at the fixed holding offset.
        assert_eq!(placement.position, Point::new(48.0, 50.0));
    }

    #[test]
    fn test_holding_never_collides() {
        let others = vec![rect(0.0, 0.0, 60.0, 48.0)];
        let placement = resolve_drop(
            Point::new(-3.0, 60.0),
            12.0,
            12.0,
            &others,
            &quilt(60.0, 48.0, 0.0),
        );
        assert_eq!(placement.membership, Membership::Holding);
        assert_eq!(placement.position, Point::new(0.0, 50.0));
    }

    #[test]
    fn test_collision_moves_to_nearest_free_cell() {
        // A 12x12 square sits at (0,0); a second one dropped there must
        // land at (12,0): it ties with (0,12) at distance 12, and the
        // earlier row wins the tie.
        let others = vec![rect(0.0, 0.0, 12.0, 12.0)];
        let placement = resolve_drop(
            Point::new(0.0, 0.0),
            12.0,
            12.0,
            &others,
            &quilt(60.0, 48.0, 0.0),
        );
        assert_eq!(placement.membership, Membership::Surface);
        assert_eq!(placement.position, Point::new(12.0, 0.0));
    }

    #[test]
    fn test_nearest_cell_beats_scan_order_when_closer() {
        // Occupier pushed right: the free cell left of the proposal is
        // strictly nearer than anything in an earlier row.
        let others = vec![rect(20.0, 20.0, 12.0, 12.0)];
        let placement = resolve_drop(
            Point::new(20.5, 20.5),
            12.0,
            12.0,
            &others,
            &quilt(60.0, 48.0, 0.0),
        );
        assert_eq!(placement.membership, Membership::Surface);
        let pos = placement.position;
        // Must touch but not overlap the occupier, and be within half a
        // diagonal step of it.
        assert!(!boxes_overlap(
            Rect::new(pos.x, pos.y, pos.x + 12.0, pos.y + 12.0),
            others[0]
        ));
        let dist = ((pos.x - 20.5).powi(2) + (pos.y - 20.5).powi(2)).sqrt();
        assert!(dist <= 12.5, "landed too far away: {pos:?}");
    }

    #[test]
    fn test_fully_packed_surface_overlaps_best_effort() {
        // One 10x10 square fills the whole 10x10 surface; a 5x5 drop finds
        // no free cell and keeps the snapped proposal.
        let others = vec![rect(0.0, 0.0, 10.0, 10.0)];
        let placement = resolve_drop(
            Point::new(2.5, 2.5),
            5.0,
            5.0,
            &others,
            &quilt(10.0, 10.0, 0.0),
        );
        assert_eq!(placement.membership, Membership::Surface);
        assert_eq!(placement.position, Point::new(2.5, 2.5));
    }

    #[test]
    fn test_buffer_inflates_surface() {
        // 10x10 quilt with a 1" buffer: total 12x12, so x = 11 is in bounds
        // for a 1x1 square and a drop at y = 12.5 lands past the edge.
        let q = quilt(10.0, 10.0, 1.0);
        let inside = resolve_drop(Point::new(11.0, 11.0), 1.0, 1.0, &[], &q);
        assert_eq!(inside.membership, Membership::Surface);
        assert_eq!(inside.position, Point::new(11.0, 11.0));

        let outside = resolve_drop(Point::new(11.0, 12.5), 1.0, 1.0, &[], &q);
        assert_eq!(outside.membership, Membership::Holding);
        assert_eq!(outside.position, Point::new(11.0, 14.0));
    }

    #[test]
    fn test_edge_positions_are_inclusive() {
        let q = quilt(60.0, 48.0, 0.0);
        let placement = resolve_drop(Point::new(48.0, 36.0), 12.0, 12.0, &[], &q);
        assert_eq!(placement.membership, Membership::Surface);
        assert_eq!(placement.position, Point::new(48.0, 36.0));

        let past = resolve_drop(Point::new(48.5, 36.0), 12.0, 12.0, &[], &q);
        assert_eq!(past.membership, Membership::Holding);
    }

    #[test]
    fn test_resolved_positions_stay_on_grid_and_in_bounds() {
        let q = quilt(25.0, 17.0, 0.5);
        let others = vec![rect(0.0, 0.0, 6.0, 6.0), rect(6.0, 0.0, 6.0, 6.0)];
        for &(px, py) in &[(0.3, 0.2), (1.9, 1.1), (5.7, 0.4), (0.0, 0.0)] {
            let placement = resolve_drop(Point::new(px, py), 6.0, 6.0, &others, &q);
            assert_eq!(placement.membership, Membership::Surface);
            let pos = placement.position;
            assert_eq!(pos.x * 2.0, (pos.x * 2.0).round());
            assert_eq!(pos.y * 2.0, (pos.y * 2.0).round());
            assert!(pos.x >= 0.0 && pos.x <= q.total_width() - 6.0);
            assert!(pos.y >= 0.0 && pos.y <= q.total_height() - 6.0);
        }
    }

    #[test]
    fn test_oversized_square_clamps_holding_x_to_zero() {
        let placement = resolve_drop(
            Point::new(5.0, 2.0),
            80.0,
            80.0,
            &[],
            &quilt(60.0, 48.0, 0.0),
        );
        assert_eq!(placement.membership, Membership::Holding);
        assert_eq!(placement.position, Point::new(0.0, 50.0));
    }
}
