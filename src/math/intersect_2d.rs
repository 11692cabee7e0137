use super::{Point2, TOLERANCE};

/// Intersection of two infinite lines, with segment membership flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineIntersection {
    /// The intersection point.
    pub point: Point2,
    /// Parameter along the first line (`p1 + ua * (p2 - p1)`).
    pub ua: f64,
    /// Parameter along the second line (`p3 + ub * (p4 - p3)`).
    pub ub: f64,
}

impl LineIntersection {
    /// Returns `true` if the intersection lies within the first segment.
    #[must_use]
    pub fn on_line1(&self) -> bool {
        (0.0..=1.0).contains(&self.ua)
    }

    /// Returns `true` if the intersection lies within the second segment.
    #[must_use]
    pub fn on_line2(&self) -> bool {
        (0.0..=1.0).contains(&self.ub)
    }

    /// Returns `true` if the intersection lies within both segments.
    #[must_use]
    pub fn on_both(&self) -> bool {
        self.on_line1() && self.on_line2()
    }

    /// Returns `true` if the intersection lies strictly inside both
    /// segments, more than `tolerance` (in parameter space) from every end.
    ///
    /// A segment end touching the other segment is not a crossing.
    #[must_use]
    pub fn crosses_interior(&self, tolerance: f64) -> bool {
        let inside = |t: f64| t > tolerance && t < 1.0 - tolerance;
        inside(self.ua) && inside(self.ub)
    }
}

/// Intersects the line through `p1, p2` with the line through `p3, p4`.
///
/// Returns `None` if the lines are parallel (or either is degenerate).
#[must_use]
pub fn line_intersection(
    p1: &Point2,
    p2: &Point2,
    p3: &Point2,
    p4: &Point2,
) -> Option<LineIntersection> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = d2.y * d1.x - d2.x * d1.y;
    if denom.abs() < TOLERANCE {
        return None;
    }

    let ua = (d2.x * (p1.y - p3.y) - d2.y * (p1.x - p3.x)) / denom;
    let ub = (d1.x * (p1.y - p3.y) - d1.y * (p1.x - p3.x)) / denom;

    Some(LineIntersection {
        point: p1 + d1 * ua,
        ua,
        ub,
    })
}

/// Intersects two offset lines for a mitred corner.
///
/// Near-parallel lines fall back to the midpoint between the end of the
/// first line and the start of the second, so a corner is always produced.
#[must_use]
pub fn mitre_point(
    line1_start: &Point2,
    line1_end: &Point2,
    line2_start: &Point2,
    line2_end: &Point2,
) -> Point2 {
    let a1 = line1_end.y - line1_start.y;
    let b1 = line1_start.x - line1_end.x;
    let c1 = a1 * line1_start.x + b1 * line1_start.y;

    let a2 = line2_end.y - line2_start.y;
    let b2 = line2_start.x - line2_end.x;
    let c2 = a2 * line2_start.x + b2 * line2_start.y;

    let det = a1 * b2 - a2 * b1;
    if det.abs() < TOLERANCE {
        return nalgebra::center(line1_end, line2_start);
    }

    Point2::new((b2 * c1 - b1 * c2) / det, (a1 * c2 - a2 * c1) / det)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_segments() {
        let r = line_intersection(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0)).unwrap();
        assert_abs_diff_eq!(r.point.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r.point.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r.ua, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(r.ub, 0.5, epsilon = 1e-12);
        assert!(r.on_both());
    }

    #[test]
    fn intersection_outside_second_segment() {
        // Vertical line x=5 against the segment (0,0)→(2,0): the lines meet
        // at (5,0), which is beyond the second segment.
        let r = line_intersection(&p(5.0, -1.0), &p(5.0, 1.0), &p(0.0, 0.0), &p(2.0, 0.0)).unwrap();
        assert!(r.on_line1());
        assert!(!r.on_line2());
        assert_abs_diff_eq!(r.ub, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn touching_end_is_not_an_interior_crossing() {
        // (5,0)→(5,10) starts on the segment (0,0)→(10,0).
        let r = line_intersection(&p(5.0, 0.0), &p(5.0, 10.0), &p(0.0, 0.0), &p(10.0, 0.0)).unwrap();
        assert!(r.on_both());
        assert!(!r.crosses_interior(1e-9));

        let r = line_intersection(&p(5.0, -1.0), &p(5.0, 10.0), &p(0.0, 0.0), &p(10.0, 0.0)).unwrap();
        assert!(r.crosses_interior(1e-9));
    }

    #[test]
    fn parallel_lines_have_no_intersection() {
        let r = line_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0));
        assert!(r.is_none());
    }

    #[test]
    fn zero_length_line_has_no_intersection() {
        let r = line_intersection(&p(1.0, 1.0), &p(1.0, 1.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!(r.is_none());
    }

    #[test]
    fn mitre_of_perpendicular_lines() {
        let m = mitre_point(&p(0.0, -1.0), &p(10.0, -1.0), &p(11.0, 0.0), &p(11.0, 10.0));
        assert_abs_diff_eq!(m.x, 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn mitre_of_collinear_lines_falls_back_to_midpoint() {
        let m = mitre_point(&p(0.0, 0.0), &p(4.0, 0.0), &p(6.0, 0.0), &p(10.0, 0.0));
        assert_abs_diff_eq!(m.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.y, 0.0, epsilon = 1e-12);
    }
}
