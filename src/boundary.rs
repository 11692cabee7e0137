//! The outer room polygon.
//!
//! Vertices are stored once; a closed boundary connects the last vertex
//! back to the first, so moving vertex `0` moves both ends of the ring.

use tracing::{debug, trace};

use crate::geometry::Segment;
use crate::math::polygon_2d::{contains_point, is_simple_polygon, nearest_vertex};
use crate::math::Point2;

/// Fewest vertices a closed room can have.
const MIN_CLOSED_VERTICES: usize = 3;

/// Length report for one boundary wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallLength {
    pub wall_index: usize,
    pub length: f64,
    pub start: Point2,
    pub end: Point2,
}

/// Ordered boundary vertices, optionally closed into a polygon.
#[derive(Debug, Clone, Default)]
pub struct Boundary {
    vertices: Vec<Point2>,
    closed: bool,
}

impl Boundary {
    /// Creates an empty, open boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a closed boundary from unique vertices.
    #[must_use]
    pub fn closed_from(vertices: Vec<Point2>) -> Self {
        Self {
            vertices,
            closed: true,
        }
    }

    /// Returns the point list, repeating the first vertex at the end once
    /// the polygon is closed.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        let mut pts = self.vertices.clone();
        if self.closed {
            if let Some(first) = self.vertices.first() {
                pts.push(*first);
            }
        }
        pts
    }

    /// Returns the unique vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.closed
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the most recently placed vertex.
    #[must_use]
    pub fn last_point(&self) -> Option<Point2> {
        if self.closed {
            self.vertices.first().copied()
        } else {
            self.vertices.last().copied()
        }
    }

    /// Number of wall segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        if self.closed {
            self.vertices.len()
        } else {
            self.vertices.len().saturating_sub(1)
        }
    }

    /// Returns the vertex indices bounding segment `index`.
    #[must_use]
    pub fn segment_vertices(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.segment_count() {
            return None;
        }
        Some((index, (index + 1) % self.vertices.len()))
    }

    /// Returns segment `index`.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<Segment> {
        let (a, b) = self.segment_vertices(index)?;
        Some(Segment::new(self.vertices[a], self.vertices[b]))
    }

    /// Iterates over all wall segments in order.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.segment_count()).filter_map(|i| self.segment(i))
    }

    /// Returns the length and endpoints of every wall.
    #[must_use]
    pub fn wall_lengths(&self) -> Vec<WallLength> {
        self.segments()
            .enumerate()
            .map(|(wall_index, s)| WallLength {
                wall_index,
                length: s.length(),
                start: s.start,
                end: s.end,
            })
            .collect()
    }

    /// Appends an already-resolved point, closing the polygon if it lands
    /// within `magnet_distance` of the first vertex on both axes.
    ///
    /// A click near the first vertex before there are three vertices is
    /// ignored, so a closed boundary is always at least a triangle.
    ///
    /// Returns `true` if the polygon is (now) closed.
    pub fn push_resolved(&mut self, p: Point2, magnet_distance: f64) -> bool {
        if self.closed {
            return true;
        }
        if let Some(first) = self.vertices.first() {
            if (p.x - first.x).abs() < magnet_distance && (p.y - first.y).abs() < magnet_distance {
                if self.vertices.len() < MIN_CLOSED_VERTICES {
                    trace!(vertices = self.vertices.len(), "too few vertices to close");
                    return false;
                }
                self.closed = true;
                debug!(vertices = self.vertices.len(), "boundary completed");
                return true;
            }
        }
        self.vertices.push(p);
        debug!(x = p.x, y = p.y, count = self.vertices.len(), "boundary point added");
        false
    }

    /// Removes all vertices and reopens the boundary.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.closed = false;
    }

    pub(crate) fn vertex_mut(&mut self, index: usize) -> Option<&mut Point2> {
        self.vertices.get_mut(index)
    }

    pub(crate) fn set_vertices(&mut self, vertices: Vec<Point2>) {
        self.vertices = vertices;
    }

    /// Even-odd containment test against the polygon.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        contains_point(&self.vertices, p)
    }

    /// Returns `true` if no two non-adjacent walls cross.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        !self.closed || is_simple_polygon(&self.vertices)
    }

    /// Returns the index and position of the vertex nearest to `p`.
    #[must_use]
    pub fn nearest_vertex(&self, p: &Point2) -> Option<(usize, Point2)> {
        nearest_vertex(&self.vertices, p)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn drawn_square() -> Boundary {
        let mut b = Boundary::new();
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)] {
            assert!(!b.push_resolved(Point2::new(x, y), 8.0));
        }
        b
    }

    #[test]
    fn closing_near_first_point() {
        let mut b = drawn_square();
        assert!(!b.is_complete());
        assert!(b.push_resolved(Point2::new(3.0, -2.0), 8.0));
        assert!(b.is_complete());
        let pts = b.points();
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], pts[4]);
    }

    #[test]
    fn closing_needs_three_vertices() {
        let mut b = Boundary::new();
        assert!(!b.push_resolved(Point2::new(0.0, 0.0), 8.0));
        assert!(!b.push_resolved(Point2::new(2.0, 1.0), 8.0));
        assert_eq!(b.vertices().len(), 1);
        assert!(!b.push_resolved(Point2::new(100.0, 0.0), 8.0));
        assert!(!b.push_resolved(Point2::new(-3.0, 4.0), 8.0));
        assert!(!b.is_complete());
        assert_eq!(b.vertices().len(), 2);

        assert!(!b.push_resolved(Point2::new(50.0, 80.0), 8.0));
        assert!(b.push_resolved(Point2::new(-3.0, 4.0), 8.0));
        assert_eq!(b.points().len(), 4);
    }

    #[test]
    fn far_point_does_not_close() {
        let mut b = drawn_square();
        assert!(!b.push_resolved(Point2::new(9.0, 0.0), 8.0));
        assert_eq!(b.vertices().len(), 5);
    }

    #[test]
    fn push_after_close_is_ignored() {
        let mut b = drawn_square();
        b.push_resolved(Point2::new(0.0, 0.0), 8.0);
        assert!(b.push_resolved(Point2::new(500.0, 500.0), 8.0));
        assert_eq!(b.vertices().len(), 4);
    }

    #[test]
    fn segment_counts() {
        let mut b = drawn_square();
        assert_eq!(b.segment_count(), 3);
        b.push_resolved(Point2::new(0.0, 0.0), 8.0);
        assert_eq!(b.segment_count(), 4);
        assert_eq!(b.segment_vertices(3), Some((3, 0)));
        assert!(b.segment(4).is_none());
    }

    #[test]
    fn wall_lengths_of_closed_square() {
        let mut b = drawn_square();
        b.push_resolved(Point2::new(0.0, 0.0), 8.0);
        let lengths = b.wall_lengths();
        assert_eq!(lengths.len(), 4);
        for (i, w) in lengths.iter().enumerate() {
            assert_eq!(w.wall_index, i);
            assert_abs_diff_eq!(w.length, 100.0, epsilon = 1e-10);
        }
        assert_eq!(lengths[3].end, Point2::new(0.0, 0.0));
    }

    #[test]
    fn moving_first_vertex_moves_closing_point() {
        let mut b = drawn_square();
        b.push_resolved(Point2::new(0.0, 0.0), 8.0);
        *b.vertex_mut(0).unwrap() = Point2::new(-5.0, -5.0);
        let pts = b.points();
        assert_eq!(pts[0], pts[4]);
        assert_eq!(b.segment(3).unwrap().end, Point2::new(-5.0, -5.0));
    }

    #[test]
    fn last_point_tracks_drawing() {
        let mut b = Boundary::new();
        assert!(b.last_point().is_none());
        b.push_resolved(Point2::new(1.0, 2.0), 8.0);
        b.push_resolved(Point2::new(50.0, 2.0), 8.0);
        assert_eq!(b.last_point(), Some(Point2::new(50.0, 2.0)));
    }

    #[test]
    fn clear_resets() {
        let mut b = drawn_square();
        b.push_resolved(Point2::new(0.0, 0.0), 8.0);
        b.clear();
        assert!(b.is_empty());
        assert!(!b.is_complete());
        assert_eq!(b.segment_count(), 0);
    }

    #[test]
    fn containment() {
        let b = Boundary::closed_from(drawn_square().vertices().to_vec());
        assert!(b.contains_point(&Point2::new(10.0, 10.0)));
        assert!(!b.contains_point(&Point2::new(-10.0, 10.0)));
    }
}
