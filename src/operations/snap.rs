use crate::math::distance_2d::point_to_segment;
use crate::math::{distance, Point2, TOLERANCE};
use crate::walls::Walls;

/// Which pass produced a resolved snap point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    Tangent,
    Endpoint,
    Line,
    Ortho,
    /// Nothing matched; the raw point is returned.
    Free,
}

/// Resolved cursor position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetPoint {
    pub point: Point2,
    pub kind: SnapKind,
}

/// Resolves a raw cursor position to the most relevant snap target.
///
/// Passes run in a fixed order: tangent points, wall endpoints, wall
/// interiors, then the orthogonal axis through the last placed point.
/// The smallest effective distance wins; ties go to the earlier pass.
pub struct MagnetSnap {
    point: Point2,
    ortho: bool,
}

impl MagnetSnap {
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self {
            point,
            ortho: false,
        }
    }

    /// Enables the orthogonal-axis pass.
    #[must_use]
    pub fn with_ortho(mut self, ortho: bool) -> Self {
        self.ortho = ortho;
        self
    }

    /// Executes the resolution.
    #[must_use]
    pub fn execute(&self, walls: &Walls) -> MagnetPoint {
        let magnet = walls.config.magnet_distance;
        let mut best: Option<(f64, MagnetPoint)> = None;

        if walls.config.snap_to_tangent {
            for candidate in tangent_points(walls, &self.point) {
                let d = distance(&self.point, &candidate);
                if d >= magnet * 2.0 {
                    continue;
                }
                let hit = MagnetPoint {
                    point: candidate,
                    kind: SnapKind::Tangent,
                };
                if d < magnet {
                    return hit;
                }
                if best.is_none_or(|(bd, _)| d < bd) {
                    best = Some((d, hit));
                }
            }
        }

        if best.is_some() {
            return best.map_or_else(|| self.free(), |(_, hit)| hit);
        }

        best = regular_magnet_point(walls, &self.point);

        if self.ortho {
            if let Some(origin) = walls.boundary.last_point() {
                let threshold = walls.config.ortho_snap_threshold_deg;
                let candidate = ortho_point(&origin, &self.point, threshold);
                let d = distance(&candidate, &self.point);
                if best.is_none_or(|(bd, _)| d < bd) {
                    best = Some((
                        d,
                        MagnetPoint {
                            point: candidate,
                            kind: SnapKind::Ortho,
                        },
                    ));
                }
            }
        }

        best.map_or_else(|| self.free(), |(_, hit)| hit)
    }

    fn free(&self) -> MagnetPoint {
        MagnetPoint {
            point: self.point,
            kind: SnapKind::Free,
        }
    }
}

/// Points offset from `p` by the tangent radius along each boundary wall's
/// normal that land on that wall.
fn tangent_points(walls: &Walls, p: &Point2) -> Vec<Point2> {
    let radius = walls.config.tangent_radius;
    let magnet = walls.config.magnet_distance;
    let mut out = Vec::new();
    for seg in walls.boundary.segments() {
        let Ok(normal) = seg.left_normal() else {
            continue;
        };
        for candidate in [p + normal * radius, p - normal * radius] {
            let proj = point_to_segment(&candidate, &seg.start, &seg.end);
            if proj.distance < magnet && proj.is_within() {
                out.push(candidate);
            }
        }
    }
    out
}

/// Endpoint pass followed, if nothing matched, by the wall-interior pass.
///
/// Endpoints use twice the snap radius and have their distance scaled by
/// the endpoint priority, which is the effective distance returned.
fn regular_magnet_point(walls: &Walls, p: &Point2) -> Option<(f64, MagnetPoint)> {
    let magnet = walls.config.magnet_distance;
    let priority = walls.config.endpoint_priority;
    let mut best: Option<(f64, MagnetPoint)> = None;

    let boundary_ends = walls
        .boundary
        .segments()
        .flat_map(|s| [s.start, s.end]);
    let partition_ends = walls.partitions.iter().flat_map(|(_, w)| [w.start, w.end]);

    for end in boundary_ends.chain(partition_ends) {
        let d = distance(p, &end);
        let effective = d * priority;
        if d < magnet * 2.0 && best.is_none_or(|(bd, _)| effective < bd) {
            best = Some((
                effective,
                MagnetPoint {
                    point: end,
                    kind: SnapKind::Endpoint,
                },
            ));
        }
    }

    if best.is_some() {
        return best;
    }

    let boundary_lines = walls.boundary.segments();
    let partition_lines = walls.partitions.iter().map(|(_, w)| w.segment());

    for seg in boundary_lines.chain(partition_lines) {
        let proj = point_to_segment(p, &seg.start, &seg.end);
        if proj.distance < magnet
            && proj.is_within()
            && best.is_none_or(|(bd, _)| proj.distance < bd)
        {
            best = Some((
                proj.distance,
                MagnetPoint {
                    point: proj.closest,
                    kind: SnapKind::Line,
                },
            ));
        }
    }

    best
}

/// Projects `p` onto the horizontal or vertical axis through `origin`,
/// whichever is nearer, or onto a 45° diagonal when the direction is
/// within `threshold_deg` of one.
#[must_use]
pub fn ortho_point(origin: &Point2, p: &Point2, threshold_deg: f64) -> Point2 {
    let d = p - origin;
    let len = d.norm();
    if len < TOLERANCE {
        return *p;
    }

    let angle = d.y.atan2(d.x).to_degrees();
    let abs = angle.abs();
    if (abs - 45.0).abs() <= threshold_deg || (abs - 135.0).abs() <= threshold_deg {
        let unit = len / std::f64::consts::SQRT_2;
        let sign = if angle > 0.0 { 1.0 } else { -1.0 };
        let dx = if abs < 90.0 { unit } else { -unit };
        return Point2::new(origin.x + dx, origin.y + unit * sign);
    }

    if d.x.abs() >= d.y.abs() {
        Point2::new(p.x, origin.y)
    } else {
        Point2::new(origin.x, p.y)
    }
}
