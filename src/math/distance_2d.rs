use super::{Point2, TOLERANCE};

/// Result of projecting a point onto a bounded segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Distance from the query point to `closest`.
    pub distance: f64,
    /// Closest point on the segment (projection clamped to the segment).
    pub closest: Point2,
    /// Unclamped projection parameter along `a → b`.
    ///
    /// Values in `[0, 1]` mean the perpendicular foot lies on the segment.
    pub param: f64,
}

impl SegmentProjection {
    /// Returns `true` if the perpendicular foot falls within the segment.
    #[must_use]
    pub fn is_within(&self) -> bool {
        (0.0..=1.0).contains(&self.param)
    }
}

/// Projects `p` onto the segment `a → b`.
///
/// A zero-length segment yields an infinite distance and a parameter of
/// `-1`, so it never counts as "on segment".
#[must_use]
pub fn point_to_segment(p: &Point2, a: &Point2, b: &Point2) -> SegmentProjection {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < TOLERANCE * TOLERANCE {
        return SegmentProjection {
            distance: f64::INFINITY,
            closest: *a,
            param: -1.0,
        };
    }

    let param = (p - a).dot(&d) / len_sq;
    let closest = a + d * param.clamp(0.0, 1.0);

    SegmentProjection {
        distance: (p - closest).norm(),
        closest,
        param,
    }
}

/// Returns the unclamped parameter of `p` projected onto the line `a → b`.
///
/// Zero-length lines return `0`.
#[must_use]
pub fn parametric_position(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return 0.0;
    }
    (p - a).dot(&d) / len_sq
}
