use crate::geometry::Segment;
use crate::math::intersect_2d::mitre_point;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2, Vector2};
use crate::partition::{Alignment, Partition};

/// Fillable region of one thick wall.
#[derive(Debug, Clone, PartialEq)]
pub struct WallRegion {
    /// Index of the centerline segment in the input point list.
    pub wall_index: usize,
    /// Closed outline: inner start, inner end, outer end, outer start.
    pub fill: [Point2; 4],
    /// Centerline edge.
    pub inner_line: Segment,
    /// Mitred offset edge.
    pub outer_line: Segment,
}

#[derive(Debug, Clone, Copy)]
struct OffsetSegment {
    index: usize,
    start: Point2,
    end: Point2,
    offset_start: Point2,
    offset_end: Point2,
}

/// Converts a centerline point list into thick wall regions.
///
/// Each segment's band extends toward the polygon exterior regardless of
/// drawing direction. Consecutive bands meet at mitred corners; an open
/// list gets flat caps at its first start and last end.
#[derive(Debug)]
pub struct ThickWalls<'a> {
    points: &'a [Point2],
    thickness: f64,
    closed: bool,
}

impl<'a> ThickWalls<'a> {
    /// Creates a new generator.
    ///
    /// `closed` should be set only for a completed boundary whose point
    /// list repeats its first point at the end.
    #[must_use]
    pub fn new(points: &'a [Point2], thickness: f64, closed: bool) -> Self {
        Self {
            points,
            thickness,
            closed,
        }
    }

    /// Executes the generation.
    #[must_use]
    pub fn execute(&self) -> Vec<WallRegion> {
        if self.points.len() < 2 {
            return Vec::new();
        }

        // Positive area is clockwise on a y-down canvas; the right-hand
        // normal then points outward.
        let sign = if signed_area_2d(self.points) > 0.0 { 1.0 } else { -1.0 };
        let distance = self.thickness * sign;

        let mut segs: Vec<OffsetSegment> = self
            .points
            .windows(2)
            .enumerate()
            .filter_map(|(index, pair)| {
                let seg = Segment::new(pair[0], pair[1]);
                let offset = right_offset(&seg, distance)?;
                Some(OffsetSegment {
                    index,
                    start: seg.start,
                    end: seg.end,
                    offset_start: offset.start,
                    offset_end: offset.end,
                })
            })
            .collect();

        let n = segs.len();
        let mut regions = Vec::with_capacity(n);

        for i in 0..n {
            let next = segs[(i + 1) % n];
            let curr = segs[i];

            let end_corner = if self.closed || i + 1 < n {
                mitre_point(
                    &curr.offset_start,
                    &curr.offset_end,
                    &next.offset_start,
                    &next.offset_end,
                )
            } else {
                curr.offset_end
            };
            segs[i].offset_end = end_corner;

            let start_corner = if i > 0 || self.closed {
                let prev = segs[(i + n - 1) % n];
                mitre_point(
                    &prev.offset_start,
                    &prev.offset_end,
                    &segs[i].offset_start,
                    &segs[i].offset_end,
                )
            } else {
                curr.offset_start
            };
            segs[i].offset_start = start_corner;

            regions.push(WallRegion {
                wall_index: curr.index,
                fill: [curr.start, curr.end, end_corner, start_corner],
                inner_line: Segment::new(curr.start, curr.end),
                outer_line: Segment::new(start_corner, end_corner),
            });
        }

        regions
    }
}

/// Translates a segment along its right-hand normal `(dy, -dx)` by
/// `distance`. Returns `None` for zero-length segments.
fn right_offset(seg: &Segment, distance: f64) -> Option<Segment> {
    let dir = seg.direction().ok()?;
    let normal = Vector2::new(dir.y, -dir.x);
    Some(seg.translated(normal * distance))
}

/// Fill outline of an inner wall for its alignment.
///
/// `Left` and `Right` put the full thickness on one side of the
/// centerline; `Center` splits it evenly.
#[derive(Debug)]
pub struct PartitionBand<'a> {
    wall: &'a Partition,
    thickness: f64,
}

impl<'a> PartitionBand<'a> {
    #[must_use]
    pub fn new(wall: &'a Partition, thickness: f64) -> Self {
        Self { wall, thickness }
    }

    /// Returns the four corners of the band, or `None` for a zero-length
    /// wall.
    #[must_use]
    pub fn execute(&self) -> Option<[Point2; 4]> {
        let seg = self.wall.segment();
        let distance = match self.wall.alignment {
            Alignment::Right => -self.thickness,
            Alignment::Left | Alignment::Center => self.thickness,
        };
        let offset = right_offset(&seg, distance)?;

        Some(match self.wall.alignment {
            Alignment::Left | Alignment::Right => [seg.start, seg.end, offset.end, offset.start],
            Alignment::Center => {
                let half_start = (offset.start - seg.start) * 0.5;
                let half_end = (offset.end - seg.end) * 0.5;
                [
                    seg.start - half_start,
                    seg.end - half_end,
                    seg.end + half_end,
                    seg.start + half_start,
                ]
            }
        })
    }
}
