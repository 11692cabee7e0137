use crate::math::distance_2d::point_to_segment;
use crate::math::Point2;
use crate::partition::PartitionId;
use crate::walls::Walls;

/// Closest boundary wall to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestWall {
    /// Closest point on the wall.
    pub point: Point2,
    pub distance: f64,
    /// Direction of the wall in radians.
    pub angle: f64,
    pub wall_index: usize,
}

/// Finds the boundary wall closest to a point, at any distance.
pub struct FindNearestWall {
    point: Point2,
}

impl FindNearestWall {
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }

    /// Executes the query. Returns `None` if the boundary has no walls.
    #[must_use]
    pub fn execute(&self, walls: &Walls) -> Option<NearestWall> {
        let mut best: Option<NearestWall> = None;
        for (i, seg) in walls.boundary.segments().enumerate() {
            let proj = point_to_segment(&self.point, &seg.start, &seg.end);
            if best.is_none_or(|b| proj.distance < b.distance) {
                best = Some(NearestWall {
                    point: proj.closest,
                    distance: proj.distance,
                    angle: seg.angle(),
                    wall_index: i,
                });
            }
        }
        best.filter(|b| b.distance.is_finite())
    }
}

/// Boundary wall point found within the snap radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPoint {
    pub point: Point2,
    pub wall_index: usize,
}

/// Returns the closest point on any boundary wall within the snap radius.
#[must_use]
pub fn nearest_wall_point(walls: &Walls, p: &Point2) -> Option<WallPoint> {
    let radius = walls.config.magnet_distance;
    let mut best: Option<(f64, WallPoint)> = None;
    for (i, seg) in walls.boundary.segments().enumerate() {
        let proj = point_to_segment(p, &seg.start, &seg.end);
        if proj.distance < radius && best.is_none_or(|(d, _)| proj.distance < d) {
            best = Some((
                proj.distance,
                WallPoint {
                    point: proj.closest,
                    wall_index: i,
                },
            ));
        }
    }
    best.map(|(_, wp)| wp)
}

/// Location of a point lying on a boundary wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonWallHit {
    pub wall_index: usize,
    /// Parameter along the wall.
    pub param: f64,
    /// `true` within the outer tenth of the wall at either end.
    pub is_endpoint: bool,
}

/// Returns the first boundary wall the point lies on.
#[must_use]
pub fn point_on_polygon_wall(walls: &Walls, p: &Point2) -> Option<PolygonWallHit> {
    let eps = walls.config.on_wall_epsilon;
    walls.boundary.segments().enumerate().find_map(|(i, seg)| {
        let proj = point_to_segment(p, &seg.start, &seg.end);
        (proj.distance < eps && proj.is_within()).then_some(PolygonWallHit {
            wall_index: i,
            param: proj.param,
            is_endpoint: proj.param < 0.1 || proj.param > 0.9,
        })
    })
}

/// Location of a point lying on an inner wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerWallHit {
    pub id: PartitionId,
    pub param: f64,
    /// Projection of the query point onto the wall.
    pub point: Point2,
}

/// Returns the first inner wall the point lies on.
#[must_use]
pub fn point_on_inner_wall(walls: &Walls, p: &Point2) -> Option<InnerWallHit> {
    let eps = walls.config.on_wall_epsilon;
    walls.partitions.iter().find_map(|(id, wall)| {
        let proj = point_to_segment(p, &wall.start, &wall.end);
        (proj.distance < eps && proj.is_within()).then_some(InnerWallHit {
            id,
            param: proj.param,
            point: proj.closest,
        })
    })
}
