use tracing::{debug, trace};

use super::Selection;
use crate::math::intersect_2d::line_intersection;
use crate::math::{distance, points_equal, Point2};
use crate::operations::intersections::refresh_all_helpers;
use crate::partition::{AttachTarget, Attachment, PartitionId};
use crate::walls::Walls;

/// Tolerance for treating two inner wall ends as the same junction.
const JUNCTION_EPSILON: f64 = 1e-3;

/// Slides the selected inner wall along its normal.
///
/// The displacement is the cursor movement since the drag started,
/// projected onto the wall's normal and applied to the wall as it was at
/// drag start. The moved line is then extended in both directions and its
/// ends re-derived from the nearest wall it meets on each side, so the
/// wall always spans whatever it now crosses. Inner walls that shared an
/// end with it follow that end.
#[derive(Debug)]
pub struct DragInnerWall {
    cursor: Point2,
}

impl DragInnerWall {
    #[must_use]
    pub fn new(cursor: Point2) -> Self {
        Self { cursor }
    }

    /// Executes one drag frame.
    ///
    /// Returns `false` and leaves the wall unmoved if no inner wall is being
    /// dragged, the moved line does not meet a wall on both sides, or the
    /// span between those walls is shorter than the minimum segment length.
    pub fn execute(&self, walls: &mut Walls) -> bool {
        let Selection::InnerWall(id) = walls.edit.selection else {
            return false;
        };
        let Some(drag_start) = walls.edit.drag_start else {
            return false;
        };
        let Some(original) = walls.edit.snapshot.as_ref().and_then(|s| s.inner_wall) else {
            return false;
        };
        let Ok(dir) = original.direction() else {
            return false;
        };
        let Ok(normal) = original.left_normal() else {
            return false;
        };

        let moved = original.translated(normal * (self.cursor - drag_start).dot(&normal));
        let reach = walls.config.partition_extension;
        let line_start = moved.start - dir * reach;
        let line_end = moved.end + dir * reach;

        let Some((before, after)) = nearest_ends(walls, id, line_start, line_end) else {
            trace!(?id, "inner wall drag found no walls to span");
            return false;
        };
        let span = distance(&before.point, &after.point);
        if span < walls.config.min_segment_length {
            trace!(?id, span, "inner wall drag span too short");
            return false;
        }

        let Some(wall) = walls.partitions.get_mut(id) else {
            return false;
        };
        let (old_start, old_end) = (wall.start, wall.end);
        wall.start = before.point;
        wall.end = after.point;
        wall.attachments.start = Some(before);
        wall.attachments.end = Some(after);

        follow_shared_ends(walls, id, (old_start, old_end), (before.point, after.point));
        refresh_all_helpers(walls);
        debug!(
            ?id,
            start_x = before.point.x,
            start_y = before.point.y,
            end_x = after.point.x,
            end_y = after.point.y,
            "inner wall moved"
        );
        true
    }
}

/// Returns the nearest wall crossing on each side of the extended line's midpoint.
///
/// Boundary walls and other inner walls are considered; a crossing only
/// needs to lie within the wall that was hit, not within the extended line.
fn nearest_ends(
    walls: &Walls,
    id: PartitionId,
    line_start: Point2,
    line_end: Point2,
) -> Option<(Attachment, Attachment)> {
    let boundary = walls
        .boundary
        .segments()
        .enumerate()
        .map(|(i, s)| (AttachTarget::Boundary(i), s));
    let inner = walls
        .partitions
        .iter()
        .filter(|(other, _)| *other != id)
        .map(|(other, w)| (AttachTarget::Partition(other), w.segment()));

    let mut before: Option<(f64, Attachment)> = None;
    let mut after: Option<(f64, Attachment)> = None;
    for (target, seg) in boundary.chain(inner) {
        let Some(hit) = line_intersection(&line_start, &line_end, &seg.start, &seg.end) else {
            continue;
        };
        if !hit.on_line2() {
            continue;
        }
        let anchor = Attachment {
            point: hit.point,
            target,
            is_point: false,
        };
        if hit.ua < 0.5 {
            if before.is_none_or(|(t, _)| hit.ua > t) {
                before = Some((hit.ua, anchor));
            }
        } else if after.is_none_or(|(t, _)| hit.ua < t) {
            after = Some((hit.ua, anchor));
        }
    }
    Some((before?.1, after?.1))
}

/// Moves ends of other inner walls that coincided with the dragged wall's
/// previous ends.
fn follow_shared_ends(
    walls: &mut Walls,
    id: PartitionId,
    (old_start, old_end): (Point2, Point2),
    (new_start, new_end): (Point2, Point2),
) {
    let follow = |p: &Point2| {
        if points_equal(p, &old_start, JUNCTION_EPSILON) {
            Some(new_start)
        } else if points_equal(p, &old_end, JUNCTION_EPSILON) {
            Some(new_end)
        } else {
            None
        }
    };

    for other in walls.partitions.ids() {
        if other == id {
            continue;
        }
        let Some(wall) = walls.partitions.get_mut(other) else {
            continue;
        };
        if let Some(p) = follow(&wall.start) {
            wall.start = p;
            if let Some(a) = wall.attachments.start.as_mut() {
                a.point = p;
            }
        }
        if let Some(p) = follow(&wall.end) {
            wall.end = p;
            if let Some(a) = wall.attachments.end.as_mut() {
                a.point = p;
            }
        }
    }
}
