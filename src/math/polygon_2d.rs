use super::intersect_2d::line_intersection;
use super::{distance, Point2, TOLERANCE};

/// Parameter distance from a segment end below which a contact counts as
/// touching rather than crossing.
const CONTACT_TOLERANCE: f64 = 1e-9;

/// Computes the signed area of a polygon (shoelace formula).
///
/// The closing edge from the last point back to the first is always
/// included. Positive for counter-clockwise in a y-up frame, which is
/// clockwise on a y-down screen.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Even-odd point-in-polygon test over the closed ring `points`.
///
/// A trailing duplicate of the first point is harmless.
#[must_use]
pub fn contains_point(points: &[Point2], p: &Point2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns `true` if the closed ring of unique `vertices` does not
/// intersect itself.
///
/// Only non-adjacent edge pairs are tested; adjacent edges always meet at
/// their shared vertex. A vertex resting on another edge is a touch, not a
/// crossing, so rings pinched at a point still count as simple.
#[must_use]
pub fn is_simple_polygon(vertices: &[Point2]) -> bool {
    let n = vertices.len();
    if n < 4 {
        return true;
    }
    for i in 0..n {
        let a0 = vertices[i];
        let a1 = vertices[(i + 1) % n];
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = vertices[j];
            let b1 = vertices[(j + 1) % n];
            if let Some(hit) = line_intersection(&a0, &a1, &b0, &b1) {
                if hit.crosses_interior(CONTACT_TOLERANCE) {
                    return false;
                }
            }
        }
    }
    true
}

/// Returns the index and position of the vertex nearest to `p`.
#[must_use]
pub fn nearest_vertex(vertices: &[Point2], p: &Point2) -> Option<(usize, Point2)> {
    let mut best: Option<(usize, Point2)> = None;
    let mut best_dist = f64::INFINITY;
    for (i, v) in vertices.iter().enumerate() {
        let d = distance(p, v);
        if d < best_dist - TOLERANCE {
            best_dist = d;
            best = Some((i, *v));
        }
    }
    best
}
