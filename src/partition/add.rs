use tracing::{debug, trace};

use super::{Alignment, AttachTarget, Attachment, Attachments, Partition, PartitionId, SplitInnerWall};
use crate::error::{GeometryError, Result, TopologyError};
use crate::math::intersect_2d::line_intersection;
use crate::math::{distance, Point2, TOLERANCE};
use crate::operations::intersections::{refresh_all_helpers, FindAllIntersections, WallHit};
use crate::operations::nearest::{point_on_inner_wall, point_on_polygon_wall};
use crate::walls::Walls;

/// Adds an inner wall along `start → end`.
///
/// Existing inner walls crossed by the new line are split first, so every
/// crossing becomes a recorded junction. The new line is then cut at every
/// boundary and inner wall it crosses, producing one segment per span.
#[derive(Debug)]
pub struct AddInnerWall {
    start: Point2,
    end: Point2,
    alignment: Alignment,
}

impl AddInnerWall {
    #[must_use]
    pub fn new(start: Point2, end: Point2, alignment: Alignment) -> Self {
        Self {
            start,
            end,
            alignment,
        }
    }

    /// Executes the operation, returning the keys of the new segments in
    /// order from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::BoundaryNotClosed`] while the room is still
    /// being drawn, and [`GeometryError::Degenerate`] if `start` and `end`
    /// coincide. Nothing is added in either case.
    pub fn execute(&self, walls: &mut Walls) -> Result<Vec<PartitionId>> {
        if !walls.boundary.is_complete() {
            return Err(TopologyError::BoundaryNotClosed.into());
        }
        if distance(&self.start, &self.end) < TOLERANCE {
            let reason = "inner wall start and end coincide".to_string();
            return Err(GeometryError::Degenerate(reason).into());
        }
        let mut start = self.start;
        let mut end = self.end;

        // Split crossed inner walls at the crossing.
        let crossings: Vec<(PartitionId, Point2)> = walls
            .partitions
            .iter()
            .filter_map(|(id, w)| {
                line_intersection(&start, &end, &w.start, &w.end)
                    .filter(|hit| hit.on_both())
                    .map(|hit| (id, hit.point))
            })
            .collect();
        for (id, point) in crossings {
            if let Err(err) = SplitInnerWall::at_point(id, point).execute(walls) {
                trace!(?id, %err, "crossed inner wall kept whole");
            }
        }

        // Ends landing on an inner wall split it and snap onto it.
        if let Some(hit) = point_on_inner_wall(walls, &start) {
            if SplitInnerWall::at_point(hit.id, hit.point).execute(walls).is_ok() {
                start = hit.point;
            }
        }
        if let Some(hit) = point_on_inner_wall(walls, &end) {
            if SplitInnerWall::at_point(hit.id, hit.point).execute(walls).is_ok() {
                end = hit.point;
            }
        }

        let hits = FindAllIntersections::new(start, end).execute(walls);
        let start_anchor = boundary_anchor(walls, start);
        let end_anchor = boundary_anchor(walls, end);

        // Stops along the line: start, every hit, end.
        let mut stops: Vec<(Point2, Option<Attachment>)> = Vec::with_capacity(hits.len() + 2);
        stops.push((start, start_anchor));
        stops.extend(hits.iter().map(|h| (h.point, Some(hit_anchor(h)))));
        stops.push((end, end_anchor));

        let mut added = Vec::with_capacity(stops.len() - 1);
        for pair in stops.windows(2) {
            let ((a, a_anchor), (b, b_anchor)) = (pair[0], pair[1]);
            let wall = Partition {
                start: a,
                end: b,
                alignment: self.alignment,
                attachments: Attachments {
                    start: a_anchor,
                    end: b_anchor,
                },
                helpers: Vec::new(),
            };
            added.push(walls.partitions.push(wall));
        }

        refresh_all_helpers(walls);

        debug!(
            segments = added.len(),
            crossings = hits.len(),
            alignment = %self.alignment,
            "inner wall added"
        );
        Ok(added)
    }
}

/// Anchor for a free end lying on a boundary wall.
fn boundary_anchor(walls: &Walls, p: Point2) -> Option<Attachment> {
    point_on_polygon_wall(walls, &p).map(|hit| Attachment {
        point: p,
        target: AttachTarget::Boundary(hit.wall_index),
        is_point: hit.is_endpoint,
    })
}

/// Anchor for a crossing found along the new line.
fn hit_anchor(hit: &WallHit) -> Attachment {
    Attachment {
        point: hit.point,
        target: hit.target,
        is_point: false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::WallSketchError;
    use approx::assert_abs_diff_eq;

    fn square() -> Walls {
        Walls::from_polygon(&[
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 100.0),
            Point2::new(0.0, 100.0),
        ])
    }

    #[test]
    fn open_boundary_takes_no_inner_walls() {
        let mut walls = Walls::new();
        walls.add_point(0.0, 0.0);
        walls.add_point(100.0, 0.0);
        let err = AddInnerWall::new(Point2::new(50.0, -20.0), Point2::new(50.0, 20.0), Alignment::Center)
            .execute(&mut walls)
            .unwrap_err();
        assert!(matches!(
            err,
            WallSketchError::Topology(TopologyError::BoundaryNotClosed)
        ));
        assert!(walls.partitions.is_empty());
    }

    #[test]
    fn zero_length_request_is_degenerate() {
        let mut walls = square();
        let p = Point2::new(40.0, 40.0);
        let err = AddInnerWall::new(p, p, Alignment::Center)
            .execute(&mut walls)
            .unwrap_err();
        assert!(matches!(
            err,
            WallSketchError::Geometry(GeometryError::Degenerate(_))
        ));
        assert!(walls.partitions.is_empty());
    }

    #[test]
    fn line_across_square_makes_three_segments() {
        let mut walls = square();
        let ids = AddInnerWall::new(Point2::new(50.0, -10.0), Point2::new(50.0, 110.0), Alignment::Center)
            .execute(&mut walls)
            .unwrap();
        assert_eq!(ids.len(), 3);

        let first = walls.partitions.get(ids[0]).unwrap();
        let middle = walls.partitions.get(ids[1]).unwrap();
        let last = walls.partitions.get(ids[2]).unwrap();

        assert!(first.attachments.start.is_none());
        assert!(first.attachments.end.unwrap().is_outer());
        assert!(middle.attachments.start.unwrap().is_outer());
        assert!(middle.attachments.end.unwrap().is_outer());
        assert!(last.attachments.start.unwrap().is_outer());
        assert!(last.attachments.end.is_none());

        assert_abs_diff_eq!(middle.start.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(middle.end.y, 100.0, epsilon = 1e-9);
        assert_eq!(middle.attachments.start.unwrap().target, AttachTarget::Boundary(0));
        assert_eq!(middle.attachments.end.unwrap().target, AttachTarget::Boundary(2));
    }

    #[test]
    fn wall_to_wall_line_anchors_both_ends() {
        let mut walls = square();
        let ids = AddInnerWall::new(Point2::new(0.0, 40.0), Point2::new(100.0, 40.0), Alignment::Left)
            .execute(&mut walls)
            .unwrap();
        assert_eq!(ids.len(), 1);
        let w = walls.partitions.get(ids[0]).unwrap();
        let s = w.attachments.start.unwrap();
        let e = w.attachments.end.unwrap();
        assert_eq!(s.target, AttachTarget::Boundary(3));
        assert_eq!(e.target, AttachTarget::Boundary(1));
        assert!(!s.is_point);
        assert!(!e.is_point);
    }

    #[test]
    fn end_near_corner_is_a_vertex_anchor() {
        let mut walls = square();
        let ids = AddInnerWall::new(Point2::new(50.0, 50.0), Point2::new(100.0, 95.0), Alignment::Center)
            .execute(&mut walls)
            .unwrap();
        let w = walls.partitions.get(*ids.last().unwrap()).unwrap();
        assert!(w.attachments.end.unwrap().is_point);
    }

    #[test]
    fn crossing_existing_wall_splits_it() {
        let mut walls = square();
        AddInnerWall::new(Point2::new(0.0, 50.0), Point2::new(100.0, 50.0), Alignment::Center)
            .execute(&mut walls)
            .unwrap();
        let ids = AddInnerWall::new(Point2::new(30.0, 0.0), Point2::new(30.0, 100.0), Alignment::Center)
            .execute(&mut walls)
            .unwrap();

        // The horizontal wall is split in two, the new line cut in two.
        assert_eq!(ids.len(), 2);
        assert_eq!(walls.partitions.len(), 4);
        let lower = walls.partitions.get(ids[0]).unwrap();
        assert_abs_diff_eq!(lower.end.y, 50.0, epsilon = 1e-9);
        assert!(matches!(
            lower.attachments.end.unwrap().target,
            AttachTarget::Partition(_)
        ));

        // Every segment respects the minimum length.
        for (_, w) in walls.partitions.iter() {
            assert!(w.length() >= walls.config.min_segment_length);
        }
    }

    #[test]
    fn t_junction_on_existing_wall() {
        let mut walls = square();
        AddInnerWall::new(Point2::new(0.0, 50.0), Point2::new(100.0, 50.0), Alignment::Center)
            .execute(&mut walls)
            .unwrap();
        let ids = AddInnerWall::new(Point2::new(60.0, 50.0), Point2::new(60.0, 100.0), Alignment::Right)
            .execute(&mut walls)
            .unwrap();
        assert_eq!(ids.len(), 1);
        // 2 halves of the horizontal wall plus the new one.
        assert_eq!(walls.partitions.len(), 3);
        let w = walls.partitions.get(ids[0]).unwrap();
        assert_eq!(w.start, Point2::new(60.0, 50.0));
        assert_eq!(w.attachments.end.unwrap().target, AttachTarget::Boundary(2));
    }

    #[test]
    fn crossing_walls_get_helpers() {
        let mut walls = square();
        let first = AddInnerWall::new(Point2::new(10.0, 30.0), Point2::new(90.0, 30.0), Alignment::Center)
            .execute(&mut walls)
            .unwrap();
        assert!(walls.partitions.get(first[0]).unwrap().helpers.is_empty());
        AddInnerWall::new(Point2::new(50.0, 10.0), Point2::new(50.0, 90.0), Alignment::Center)
            .execute(&mut walls)
            .unwrap();
        // The first wall was split at the crossing, so the junction is now
        // an endpoint of each piece rather than an interior helper.
        for (_, w) in walls.partitions.iter() {
            assert!(w.helpers.is_empty());
        }
    }
}
