use tracing::{debug, trace};

use super::{AttachTarget, Attachment, Attachments, Partition, PartitionId};
use crate::error::{Result, TopologyError};
use crate::math::distance_2d::parametric_position;
use crate::math::{distance, Point2};
use crate::walls::Walls;

/// Splits one inner wall into two at a point.
///
/// The split is refused if either half would be shorter than the minimum
/// segment length. Helpers are distributed to the half on their side of
/// the split point, and ends of other inner walls anchored to the split
/// wall are re-pointed to the half they rest on.
#[derive(Debug)]
pub struct SplitInnerWall {
    id: PartitionId,
    point: Point2,
    rigid: bool,
}

impl SplitInnerWall {
    /// Splits at a junction point; the new ends are rigid vertex anchors.
    #[must_use]
    pub fn at_point(id: PartitionId, point: Point2) -> Self {
        Self {
            id,
            point,
            rigid: true,
        }
    }

    /// Splits at a crossing; the new ends ride on the crossing line.
    #[must_use]
    pub fn at_intersection(id: PartitionId, point: Point2) -> Self {
        Self {
            id,
            point,
            rigid: false,
        }
    }

    /// Executes the split, returning the keys of the two halves.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::PartitionNotFound`] if the wall does not
    /// exist, or [`TopologyError::SegmentTooShort`] if a half would be
    /// shorter than the minimum segment length. The network is unchanged in
    /// both cases.
    pub fn execute(&self, walls: &mut Walls) -> Result<(PartitionId, PartitionId)> {
        let min_len = walls.config.min_segment_length;
        let wall = walls
            .partitions
            .get(self.id)
            .ok_or(TopologyError::PartitionNotFound)?;
        let p = self.point;

        let to_start = distance(&p, &wall.start);
        let to_end = distance(&p, &wall.end);
        if to_start < min_len || to_end < min_len {
            trace!(to_start, to_end, min_len, "inner wall split refused");
            return Err(TopologyError::SegmentTooShort {
                length: to_start.min(to_end),
                min: min_len,
            }
            .into());
        }

        let junction = Attachment {
            point: p,
            target: AttachTarget::Junction,
            is_point: self.rigid,
        };
        let (old_start, old_end) = (wall.start, wall.end);

        let first = Partition {
            start: wall.start,
            end: p,
            alignment: wall.alignment,
            attachments: Attachments {
                start: wall.attachments.start,
                end: Some(junction),
            },
            helpers: wall
                .helpers
                .iter()
                .filter(|h| distance(&h.point, &wall.start) < to_start)
                .copied()
                .collect(),
        };
        let second = Partition {
            start: p,
            end: wall.end,
            alignment: wall.alignment,
            attachments: Attachments {
                start: Some(junction),
                end: wall.attachments.end,
            },
            helpers: wall
                .helpers
                .iter()
                .filter(|h| distance(&h.point, &wall.end) < to_end)
                .copied()
                .collect(),
        };

        let (a, b) = walls
            .partitions
            .replace_with_pair(self.id, first, second)
            .ok_or(TopologyError::PartitionNotFound)?;

        let split_at = parametric_position(&p, &old_start, &old_end);
        let half_for = |point: &Point2| {
            if parametric_position(point, &old_start, &old_end) <= split_at {
                a
            } else {
                b
            }
        };
        for other in walls.partitions.ids() {
            let Some(wall) = walls.partitions.get_mut(other) else {
                continue;
            };
            for anchor in [&mut wall.attachments.start, &mut wall.attachments.end]
                .into_iter()
                .flatten()
            {
                if anchor.target == AttachTarget::Partition(self.id) {
                    anchor.target = AttachTarget::Partition(half_for(&anchor.point));
                }
            }
        }

        debug!(x = p.x, y = p.y, rigid = self.rigid, "inner wall split");
        Ok((a, b))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::WallSketchError;
    use crate::partition::{Alignment, HelperKind, HelperPoint};
    use approx::assert_abs_diff_eq;

    fn walls_with_wall() -> (Walls, PartitionId) {
        let mut walls = Walls::from_polygon(&[
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 100.0),
            Point2::new(0.0, 100.0),
        ]);
        let mut wall = Partition::new(Point2::new(0.0, 50.0), Point2::new(100.0, 50.0), Alignment::Right);
        wall.attachments.start = Some(Attachment {
            point: wall.start,
            target: AttachTarget::Boundary(3),
            is_point: false,
        });
        wall.helpers = vec![
            HelperPoint {
                point: Point2::new(20.0, 50.0),
                kind: HelperKind::Intersection,
            },
            HelperPoint {
                point: Point2::new(80.0, 50.0),
                kind: HelperKind::Intersection,
            },
        ];
        let id = walls.partitions.push(wall);
        (walls, id)
    }

    #[test]
    fn split_preserves_length_and_shares_point() {
        let (mut walls, id) = walls_with_wall();
        let p = Point2::new(37.5, 50.0);
        let (a, b) = SplitInnerWall::at_point(id, p).execute(&mut walls).unwrap();
        let wa = walls.partitions.get(a).unwrap();
        let wb = walls.partitions.get(b).unwrap();
        assert_abs_diff_eq!(wa.length() + wb.length(), 100.0, epsilon = 1e-9);
        assert_eq!(wa.end, p);
        assert_eq!(wb.start, p);
        assert_eq!(wa.alignment, Alignment::Right);
        assert_eq!(walls.partitions.len(), 2);
        assert!(walls.partitions.get(id).is_none());
    }

    #[test]
    fn split_carries_anchors_and_marks_junction() {
        let (mut walls, id) = walls_with_wall();
        let (a, b) = SplitInnerWall::at_point(id, Point2::new(50.0, 50.0))
            .execute(&mut walls)
            .unwrap();
        let wa = walls.partitions.get(a).unwrap();
        let wb = walls.partitions.get(b).unwrap();
        assert_eq!(wa.attachments.start.unwrap().target, AttachTarget::Boundary(3));
        let junction = wa.attachments.end.unwrap();
        assert_eq!(junction.target, AttachTarget::Junction);
        assert!(junction.is_point);
        assert!(wb.attachments.end.is_none());
    }

    #[test]
    fn split_at_intersection_is_not_rigid() {
        let (mut walls, id) = walls_with_wall();
        let (_, b) = SplitInnerWall::at_intersection(id, Point2::new(50.0, 50.0))
            .execute(&mut walls)
            .unwrap();
        assert!(!walls.partitions.get(b).unwrap().attachments.start.unwrap().is_point);
    }

    #[test]
    fn helpers_follow_their_half() {
        let (mut walls, id) = walls_with_wall();
        let (a, b) = SplitInnerWall::at_point(id, Point2::new(50.0, 50.0))
            .execute(&mut walls)
            .unwrap();
        let ha = &walls.partitions.get(a).unwrap().helpers;
        let hb = &walls.partitions.get(b).unwrap().helpers;
        assert_eq!(ha.len(), 1);
        assert_eq!(hb.len(), 1);
        assert_abs_diff_eq!(ha[0].point.x, 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hb[0].point.x, 80.0, epsilon = 1e-12);
    }

    #[test]
    fn split_too_close_to_end_is_refused() {
        let (mut walls, id) = walls_with_wall();
        let err = SplitInnerWall::at_point(id, Point2::new(2.0, 50.0))
            .execute(&mut walls)
            .unwrap_err();
        assert!(matches!(
            err,
            WallSketchError::Topology(TopologyError::SegmentTooShort { min, .. }) if (min - 3.0).abs() < 1e-12
        ));
        assert!(SplitInnerWall::at_point(id, Point2::new(98.5, 50.0))
            .execute(&mut walls)
            .is_err());
        assert_eq!(walls.partitions.ids(), vec![id]);
    }

    #[test]
    fn split_of_missing_wall_is_an_error() {
        let (mut walls, id) = walls_with_wall();
        SplitInnerWall::at_point(id, Point2::new(50.0, 50.0))
            .execute(&mut walls)
            .unwrap();
        let err = SplitInnerWall::at_point(id, Point2::new(30.0, 50.0))
            .execute(&mut walls)
            .unwrap_err();
        assert!(matches!(
            err,
            WallSketchError::Topology(TopologyError::PartitionNotFound)
        ));
    }

    #[test]
    fn anchors_on_split_wall_move_to_their_half() {
        let (mut walls, id) = walls_with_wall();
        let mut branch = Partition::new(Point2::new(80.0, 50.0), Point2::new(80.0, 100.0), Alignment::Left);
        branch.attachments.start = Some(Attachment {
            point: branch.start,
            target: AttachTarget::Partition(id),
            is_point: false,
        });
        let branch = walls.partitions.push(branch);

        let (_, b) = SplitInnerWall::at_point(id, Point2::new(50.0, 50.0))
            .execute(&mut walls)
            .unwrap();
        let anchor = walls.partitions.get(branch).unwrap().attachments.start.unwrap();
        assert_eq!(anchor.target, AttachTarget::Partition(b));
        assert_eq!(anchor.point, Point2::new(80.0, 50.0));
    }
}
