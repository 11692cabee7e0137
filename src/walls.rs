//! The wall engine facade.
//!
//! [`Walls`] owns the boundary polygon, the inner wall network, the engine
//! settings and the interaction state. Every accessor returns values, so no
//! caller can hold a reference into engine state across a mutation.

use tracing::debug;

use crate::boundary::{Boundary, WallLength};
use crate::config::WallConfig;
use crate::edit::EditState;
use crate::error::{ConfigError, Result};
use crate::math::distance_2d::point_to_segment;
use crate::math::intersect_2d::line_intersection;
use crate::math::{points_equal, Point2};
use crate::operations::intersections::{FindAllIntersections, WallHit};
use crate::operations::nearest::{
    nearest_wall_point, point_on_polygon_wall, FindNearestWall, NearestWall, PolygonWallHit,
    WallPoint,
};
use crate::operations::offset::{PartitionBand, ThickWalls, WallRegion};
use crate::operations::snap::MagnetSnap;
use crate::partition::{
    AddInnerWall, Alignment, Partition, PartitionId, PartitionStore, SplitInnerWall,
};

/// Points closer than this on both axes count as the same crossing end.
const CROSSING_ENDPOINT_EPSILON: f64 = 1e-3;

/// Wall geometry engine for one room.
#[derive(Debug, Clone, Default)]
pub struct Walls {
    pub(crate) boundary: Boundary,
    pub(crate) partitions: PartitionStore,
    pub(crate) config: WallConfig,
    pub(crate) edit: EditState,
    pub(crate) hovered: Option<usize>,
}

impl Walls {
    /// Creates an empty engine with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine with the given settings.
    #[must_use]
    pub fn with_config(config: WallConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates an engine whose boundary is the closed polygon through
    /// `vertices` (without a repeated closing point).
    #[must_use]
    pub fn from_polygon(vertices: &[Point2]) -> Self {
        Self::from_polygon_with(vertices, WallConfig::default())
    }

    /// Like [`Walls::from_polygon`], with explicit settings.
    #[must_use]
    pub fn from_polygon_with(vertices: &[Point2], config: WallConfig) -> Self {
        Self {
            boundary: Boundary::closed_from(vertices.to_vec()),
            config,
            ..Self::default()
        }
    }

    // --- Boundary construction ---

    /// Adds a boundary point at the snapped cursor position.
    ///
    /// Returns `true` once the polygon is closed. Closing happens when the
    /// snapped point lands within the magnet distance of the first point.
    pub fn add_point(&mut self, x: f64, y: f64) -> bool {
        let resolved = MagnetSnap::new(Point2::new(x, y)).execute(self).point;
        self.boundary
            .push_resolved(resolved, self.config.magnet_distance)
    }

    /// Clears the boundary, every inner wall and all interaction state.
    pub fn reset(&mut self) {
        self.boundary.clear();
        self.partitions.clear();
        self.edit.clear();
        self.hovered = None;
        debug!("walls reset");
    }

    /// Sets the wall thickness.
    ///
    /// # Errors
    ///
    /// Returns an error if `thickness` is not in `(0, max_thickness]`; the
    /// previous thickness is kept.
    pub fn set_thickness(&mut self, thickness: f64) -> Result<()> {
        self.config.thickness = self.config.check_thickness(thickness)?;
        debug!(thickness, "thickness updated");
        Ok(())
    }

    /// Parses a thickness edit from text and applies it.
    ///
    /// The leading integer of `input` is used. Returns `false` and keeps the
    /// previous thickness if no integer is present or it is out of range.
    pub fn update_thickness(&mut self, input: &str) -> bool {
        let result = match parse_leading_int(input) {
            Some(value) => self.set_thickness(f64::from(value)),
            None => Err(ConfigError::InvalidThickness(input.to_owned()).into()),
        };
        if let Err(err) = result {
            debug!(input, %err, "thickness edit rejected");
            return false;
        }
        true
    }

    /// Sets the snap radius.
    ///
    /// # Errors
    ///
    /// Returns an error if `distance` is not positive.
    pub fn set_magnet_distance(&mut self, distance: f64) -> Result<()> {
        self.config = self.config.with_magnet_distance(distance)?;
        Ok(())
    }

    // --- Queries ---

    /// Returns the boundary points; a closed boundary repeats its first
    /// point at the end.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        self.boundary.points()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.boundary.is_complete()
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.config.thickness
    }

    #[must_use]
    pub fn magnet_distance(&self) -> f64 {
        self.config.magnet_distance
    }

    #[must_use]
    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    #[must_use]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    #[must_use]
    pub fn wall_lengths(&self) -> Vec<WallLength> {
        self.boundary.wall_lengths()
    }

    /// Resolves a raw cursor position to its snap target.
    #[must_use]
    pub fn find_magnet_point(&self, x: f64, y: f64, ortho: bool) -> Point2 {
        MagnetSnap::new(Point2::new(x, y))
            .with_ortho(ortho)
            .execute(self)
            .point
    }

    /// Returns the boundary wall closest to `(x, y)` at any distance.
    #[must_use]
    pub fn find_nearest_wall(&self, x: f64, y: f64) -> Option<NearestWall> {
        FindNearestWall::new(Point2::new(x, y)).execute(self)
    }

    /// Returns the closest boundary wall point within the snap radius.
    #[must_use]
    pub fn find_nearest_wall_point(&self, p: &Point2) -> Option<WallPoint> {
        nearest_wall_point(self, p)
    }

    /// Returns the boundary wall `p` lies on, if any.
    #[must_use]
    pub fn is_point_on_polygon_wall(&self, p: &Point2) -> Option<PolygonWallHit> {
        point_on_polygon_wall(self, p)
    }

    /// Returns every wall crossing of `start → end`, sorted from `start`.
    #[must_use]
    pub fn find_all_intersections(&self, start: Point2, end: Point2) -> Vec<WallHit> {
        FindAllIntersections::new(start, end).execute(self)
    }

    /// Even-odd test of `p` against the boundary polygon.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        self.boundary.is_complete() && self.boundary.contains_point(p)
    }

    /// Returns `true` if `start → end` crosses a boundary wall anywhere
    /// other than at its own ends.
    #[must_use]
    pub fn wall_crosses_polygon(&self, start: Point2, end: Point2) -> bool {
        self.boundary.segments().any(|seg| {
            line_intersection(&start, &end, &seg.start, &seg.end).is_some_and(|hit| {
                hit.on_both()
                    && !points_equal(&hit.point, &start, CROSSING_ENDPOINT_EPSILON)
                    && !points_equal(&hit.point, &end, CROSSING_ENDPOINT_EPSILON)
            })
        })
    }

    /// Updates the hovered boundary wall from the cursor position.
    ///
    /// A wall is hovered when the cursor is within one thickness of its
    /// outer offset line; the first such wall wins.
    pub fn update_hovered_wall(&mut self, x: f64, y: f64) -> Option<usize> {
        let p = Point2::new(x, y);
        let hovered = self.thick_walls().into_iter().find_map(|region| {
            let outer = region.outer_line;
            (point_to_segment(&p, &outer.start, &outer.end).distance <= self.config.thickness)
                .then_some(region.wall_index)
        });
        self.hovered = hovered;
        hovered
    }

    #[must_use]
    pub fn hovered_wall(&self) -> Option<usize> {
        self.hovered
    }

    // --- Inner walls ---

    /// Adds an inner wall, returning the keys of the segments created.
    ///
    /// Nothing is added, and the list is empty, while the room is still
    /// open or if `start` and `end` coincide.
    pub fn add_inner_wall(
        &mut self,
        start: Point2,
        end: Point2,
        alignment: Alignment,
    ) -> Vec<PartitionId> {
        self.try_add_inner_wall(start, end, alignment)
            .unwrap_or_else(|err| {
                debug!(%err, "inner wall not added");
                Vec::new()
            })
    }

    /// Adds an inner wall, reporting why nothing was added.
    ///
    /// # Errors
    ///
    /// See [`AddInnerWall::execute`].
    pub fn try_add_inner_wall(
        &mut self,
        start: Point2,
        end: Point2,
        alignment: Alignment,
    ) -> Result<Vec<PartitionId>> {
        AddInnerWall::new(start, end, alignment).execute(self)
    }

    /// Splits an inner wall at a junction point.
    pub fn split_inner_wall_at_point(
        &mut self,
        id: PartitionId,
        point: Point2,
    ) -> Option<(PartitionId, PartitionId)> {
        SplitInnerWall::at_point(id, point).execute(self).ok()
    }

    /// Splits an inner wall at a crossing.
    pub fn split_inner_wall_at_intersection(
        &mut self,
        id: PartitionId,
        point: Point2,
    ) -> Option<(PartitionId, PartitionId)> {
        SplitInnerWall::at_intersection(id, point).execute(self).ok()
    }

    /// Returns copies of every inner wall in display order.
    #[must_use]
    pub fn inner_walls(&self) -> Vec<(PartitionId, Partition)> {
        self.partitions
            .iter()
            .map(|(id, w)| (id, w.clone()))
            .collect()
    }

    /// Returns a copy of one inner wall.
    #[must_use]
    pub fn inner_wall(&self, id: PartitionId) -> Option<Partition> {
        self.partitions.get(id).cloned()
    }

    #[must_use]
    pub fn inner_wall_count(&self) -> usize {
        self.partitions.len()
    }

    // --- Derived geometry ---

    /// Thick wall regions of the boundary as it stands.
    #[must_use]
    pub fn thick_walls(&self) -> Vec<WallRegion> {
        let points = self.boundary.points();
        ThickWalls::new(&points, self.config.thickness, self.boundary.is_complete()).execute()
    }

    /// Thick wall regions for an arbitrary point list.
    #[must_use]
    pub fn wall_regions(&self, points: &[Point2], closed: bool) -> Vec<WallRegion> {
        ThickWalls::new(points, self.config.thickness, closed).execute()
    }

    /// Thick wall regions of the open boundary extended to the snapped
    /// cursor position, for drawing feedback.
    #[must_use]
    pub fn preview_regions(&self, x: f64, y: f64, ortho: bool) -> Vec<WallRegion> {
        if self.boundary.is_complete() {
            return self.thick_walls();
        }
        let mut points = self.boundary.points();
        points.push(self.find_magnet_point(x, y, ortho));
        ThickWalls::new(&points, self.config.thickness, false).execute()
    }

    /// Fill quadrilaterals of every inner wall, in display order.
    #[must_use]
    pub fn partition_bands(&self) -> Vec<(PartitionId, [Point2; 4])> {
        self.partitions
            .iter()
            .filter_map(|(id, w)| {
                PartitionBand::new(w, self.config.thickness)
                    .execute()
                    .map(|band| (id, band))
            })
            .collect()
    }

    #[must_use]
    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }
}

/// Parses the leading integer of `input`, ignoring leading whitespace and
/// anything after the digits.
fn parse_leading_int(input: &str) -> Option<i32> {
    let s = input.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..digits_end].parse::<i32>().ok().map(|v| v * sign)
}
