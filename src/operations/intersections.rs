use crate::math::intersect_2d::line_intersection;
use crate::math::{distance, points_equal, Point2};
use crate::partition::{AttachTarget, HelperKind, HelperPoint, PartitionId};
use crate::walls::Walls;

/// Two hits closer than this on both axes are treated as one.
const DUPLICATE_EPSILON: f64 = 1e-4;

/// A crossing between a query segment and an existing wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub point: Point2,
    /// The wall that was hit: a boundary segment index or an inner wall.
    pub target: AttachTarget,
    /// Parameter of the hit along the query segment.
    pub param: f64,
}

impl WallHit {
    /// Returns `true` if the hit wall is a boundary wall.
    #[must_use]
    pub fn is_outer(&self) -> bool {
        matches!(self.target, AttachTarget::Boundary(_))
    }
}

/// Finds every crossing of a segment with the boundary and inner walls.
///
/// Hits within the minimum segment length of either query endpoint are
/// dropped, as are hits closer than that length to the previous kept hit.
/// Results are sorted by distance from `start`.
pub struct FindAllIntersections {
    start: Point2,
    end: Point2,
    exclude: Option<PartitionId>,
}

impl FindAllIntersections {
    /// Creates a new query for the segment `start → end`.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self {
            start,
            end,
            exclude: None,
        }
    }

    /// Skips the given inner wall (typically the wall being queried).
    #[must_use]
    pub fn excluding(mut self, id: PartitionId) -> Self {
        self.exclude = Some(id);
        self
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self, walls: &Walls) -> Vec<WallHit> {
        let min_len = walls.config.min_segment_length;
        let mut hits: Vec<WallHit> = Vec::new();

        let too_close = |p: &Point2| {
            distance(p, &self.start) < min_len || distance(p, &self.end) < min_len
        };

        let candidates = walls
            .boundary
            .segments()
            .enumerate()
            .map(|(i, s)| (AttachTarget::Boundary(i), s))
            .chain(
                walls
                    .partitions
                    .iter()
                    .filter(|(id, _)| Some(*id) != self.exclude)
                    .map(|(id, w)| (AttachTarget::Partition(id), w.segment())),
            );

        for (target, seg) in candidates {
            let Some(hit) = line_intersection(&self.start, &self.end, &seg.start, &seg.end) else {
                continue;
            };
            if !hit.on_both() || too_close(&hit.point) {
                continue;
            }
            if hits
                .iter()
                .any(|h| points_equal(&h.point, &hit.point, DUPLICATE_EPSILON))
            {
                continue;
            }
            hits.push(WallHit {
                point: hit.point,
                target,
                param: hit.ua,
            });
        }

        hits.sort_by(|a, b| {
            distance(&self.start, &a.point).total_cmp(&distance(&self.start, &b.point))
        });

        let mut filtered: Vec<WallHit> = Vec::with_capacity(hits.len());
        for hit in hits {
            if let Some(prev) = filtered.last() {
                if distance(&prev.point, &hit.point) < min_len {
                    continue;
                }
            }
            filtered.push(hit);
        }
        filtered
    }
}

/// Recomputes the junction markers of an inner wall from the current
/// network state.
#[must_use]
pub fn helper_points(walls: &Walls, id: PartitionId) -> Vec<HelperPoint> {
    let Some(wall) = walls.partitions.get(id) else {
        return Vec::new();
    };
    FindAllIntersections::new(wall.start, wall.end)
        .excluding(id)
        .execute(walls)
        .into_iter()
        .map(|h| HelperPoint {
            point: h.point,
            kind: HelperKind::Intersection,
        })
        .collect()
}

/// Recomputes junction markers on every inner wall.
pub fn refresh_all_helpers(walls: &mut Walls) {
    for id in walls.partitions.ids() {
        let helpers = helper_points(walls, id);
        if let Some(wall) = walls.partitions.get_mut(id) {
            wall.helpers = helpers;
        }
    }
}
