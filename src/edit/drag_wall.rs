use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use super::Selection;
use crate::boundary::Boundary;
use crate::error::{Result, TopologyError};
use crate::math::distance_2d::parametric_position;
use crate::math::intersect_2d::line_intersection;
use crate::math::Point2;
use crate::operations::intersections::refresh_all_helpers;
use crate::partition::{AttachTarget, Attachment};
use crate::walls::Walls;

/// Moves the selected boundary wall so that its line passes through the
/// cursor.
///
/// The wall only moves along its normal. Both its vertices are translated,
/// then every wall that the moved wall or its stretched neighbours now
/// cross has its nearer endpoint pulled onto the crossing, repeatedly until
/// nothing changes. Inner walls anchored to the boundary are carried along.
/// A frame that leaves two walls properly crossing is discarded; pulled
/// endpoints resting on a wall are kept.
#[derive(Debug)]
pub struct DragWall {
    cursor: Point2,
}

impl DragWall {
    #[must_use]
    pub fn new(cursor: Point2) -> Self {
        Self { cursor }
    }

    /// Executes one drag frame.
    ///
    /// Returns `Ok(false)` if no boundary wall is being dragged.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::SelfIntersection`] if the moved boundary
    /// would intersect itself. The network is left as it was before the
    /// call.
    pub fn execute(&self, walls: &mut Walls) -> Result<bool> {
        let Selection::Wall(index) = walls.edit.selection else {
            return Ok(false);
        };
        if walls.edit.drag_start.is_none() {
            return Ok(false);
        }
        let Some(segment) = walls.boundary.segment(index) else {
            return Ok(false);
        };
        let Ok(normal) = segment.left_normal() else {
            trace!(index, "zero-length wall cannot be dragged");
            return Ok(false);
        };

        let frame_vertices = walls.boundary.vertices().to_vec();
        let frame_partitions = walls.partitions.clone();

        let offset = normal * (self.cursor - segment.start).dot(&normal);
        if let Some((a, b)) = walls.boundary.segment_vertices(index) {
            for v in [a, b] {
                if let Some(p) = walls.boundary.vertex_mut(v) {
                    *p += offset;
                }
            }
        }

        propagate(
            &mut walls.boundary,
            index,
            walls.config.max_propagation_rounds,
        );
        reanchor_partitions(walls, &frame_vertices);
        refresh_all_helpers(walls);

        if !walls.boundary.is_simple() {
            walls.boundary.set_vertices(frame_vertices);
            walls.partitions = frame_partitions;
            debug!(index, "wall drag rejected: boundary would self-intersect");
            return Err(TopologyError::SelfIntersection.into());
        }

        debug!(index, dx = offset.x, dy = offset.y, "wall moved");
        Ok(true)
    }
}

/// Pulls walls crossed by moved walls onto the crossing point.
///
/// The dragged wall and its two neighbours, which were stretched by the
/// move, seed the worklist. A wall sharing a vertex with the one being
/// scanned always touches it there and is skipped. Each wall is updated at
/// most once; processing stops after `max_rounds` walls have been examined.
fn propagate(boundary: &mut Boundary, moved: usize, max_rounds: usize) {
    let count = boundary.segment_count();
    if count == 0 {
        return;
    }
    let mut updated = vec![false; count];
    let mut queue = VecDeque::with_capacity(count);
    for seed in [moved, (moved + count - 1) % count, (moved + 1) % count] {
        if let Some(flag) = updated.get_mut(seed) {
            if !*flag {
                *flag = true;
                queue.push_back(seed);
            }
        }
    }
    let mut rounds = 0;

    while let Some(current) = queue.pop_front() {
        rounds += 1;
        if rounds > max_rounds {
            warn!(max_rounds, "wall drag propagation stopped at round limit");
            break;
        }
        let Some(moved_seg) = boundary.segment(current) else {
            continue;
        };

        for i in 0..count {
            if updated[i] || adjacent(current, i, count) {
                continue;
            }
            let Some((a, b)) = boundary.segment_vertices(i) else {
                continue;
            };
            let Some(seg) = boundary.segment(i) else {
                continue;
            };
            let Some(hit) = line_intersection(&seg.start, &seg.end, &moved_seg.start, &moved_seg.end)
            else {
                continue;
            };
            if !hit.on_both() {
                continue;
            }

            let vertex = if hit.ua < 0.5 { a } else { b };
            if let Some(p) = boundary.vertex_mut(vertex) {
                *p = hit.point;
            }
            trace!(wall = i, vertex, by = current, "wall endpoint pulled onto moved wall");
            updated[i] = true;
            queue.push_back(i);
        }
    }
}

/// Returns `true` if walls `i` and `j` of a ring of `count` walls share a
/// vertex.
fn adjacent(i: usize, j: usize, count: usize) -> bool {
    i == j || (i + 1) % count == j || (j + 1) % count == i
}

/// Moves boundary-anchored inner wall ends after the boundary changed.
///
/// Vertex anchors snap to the nearest vertex of the new boundary. Line
/// anchors keep their parameter along the wall they ride on.
fn reanchor_partitions(walls: &mut Walls, old_vertices: &[Point2]) {
    let old = Boundary::closed_from(old_vertices.to_vec());
    for id in walls.partitions.ids() {
        let Some(wall) = walls.partitions.get(id) else {
            continue;
        };
        let start = wall
            .attachments
            .start
            .and_then(|a| reanchor(&walls.boundary, &old, wall.start, a));
        let end = wall
            .attachments
            .end
            .and_then(|a| reanchor(&walls.boundary, &old, wall.end, a));

        let Some(wall) = walls.partitions.get_mut(id) else {
            continue;
        };
        if let Some(a) = start {
            wall.start = a.point;
            wall.attachments.start = Some(a);
        }
        if let Some(a) = end {
            wall.end = a.point;
            wall.attachments.end = Some(a);
        }
    }
}

fn reanchor(
    boundary: &Boundary,
    old: &Boundary,
    point: Point2,
    anchor: Attachment,
) -> Option<Attachment> {
    let index = anchor.boundary_index()?;
    if anchor.is_point {
        let (vertex, position) = boundary.nearest_vertex(&point)?;
        return Some(Attachment {
            point: position,
            target: AttachTarget::Boundary(vertex),
            ..anchor
        });
    }
    let before = old.segment(index)?;
    let after = boundary.segment(index)?;
    let t = parametric_position(&point, &before.start, &before.end);
    Some(Attachment {
        point: after.point_at(t),
        ..anchor
    })
}
