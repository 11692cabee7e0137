use crate::error::{GeometryError, Result};
use crate::math::{distance, Point2, Vector2, TOLERANCE};

/// A bounded straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    /// Creates a new segment.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Returns the Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        distance(&self.start, &self.end)
    }

    /// Returns the midpoint of the segment.
    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.start, &self.end)
    }

    /// Returns the unnormalized vector from start to end.
    #[must_use]
    pub fn delta(&self) -> Vector2 {
        self.end - self.start
    }

    /// Returns the unit direction from start to end.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the segment has zero length.
    pub fn direction(&self) -> Result<Vector2> {
        let d = self.delta();
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d / len)
    }

    /// Returns the unit normal `(-dy, dx)`, pointing left of the direction
    /// in a y-up frame.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the segment has zero length.
    pub fn left_normal(&self) -> Result<Vector2> {
        let dir = self.direction()?;
        Ok(Vector2::new(-dir.y, dir.x))
    }

    /// Returns the angle of the segment direction in radians.
    #[must_use]
    pub fn angle(&self) -> f64 {
        let d = self.delta();
        d.y.atan2(d.x)
    }

    /// Returns the point at parameter `t` (`0` = start, `1` = end).
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.start + self.delta() * t
    }

    /// Returns this segment moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector2) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }
}
