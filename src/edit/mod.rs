//! Wall selection and dragging.
//!
//! One boundary wall or one inner wall may be selected at a time. Selecting
//! records a snapshot of the network so a drag can be reverted as a whole.

mod drag_partition;
mod drag_wall;

pub use drag_partition::DragInnerWall;
pub use drag_wall::DragWall;

use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::geometry::Segment;
use crate::math::{points_equal, Point2};
use crate::partition::{PartitionId, PartitionStore};
use crate::walls::Walls;

/// Points closer than this on both axes are treated as shared.
const SHARED_POINT_EPSILON: f64 = 1e-3;

/// What is currently selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Wall(usize),
    InnerWall(PartitionId),
}

/// Coarse interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Idle,
    Selected,
    Dragging,
}

/// Network state captured when a wall is selected.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub(crate) vertices: Vec<Point2>,
    pub(crate) partitions: PartitionStore,
    /// Selected inner wall centerline at selection time.
    pub(crate) inner_wall: Option<Segment>,
}

/// Selection and drag bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct EditState {
    pub(crate) selection: Selection,
    pub(crate) drag_start: Option<Point2>,
    pub(crate) snapshot: Option<Snapshot>,
}

impl EditState {
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn phase(&self) -> EditPhase {
        match (self.selection, self.drag_start) {
            (Selection::None, _) => EditPhase::Idle,
            (_, None) => EditPhase::Selected,
            (_, Some(_)) => EditPhase::Dragging,
        }
    }

    #[must_use]
    pub fn drag_start(&self) -> Option<Point2> {
        self.drag_start
    }

    pub(crate) fn select(&mut self, selection: Selection, snapshot: Snapshot) {
        self.selection = selection;
        self.drag_start = None;
        self.snapshot = Some(snapshot);
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Walls {
    /// Selects boundary wall `index`, deselecting any inner wall.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a boundary wall.
    pub fn select_wall(&mut self, index: usize) -> Result<()> {
        let count = self.boundary.segment_count();
        if index >= count {
            return Err(TopologyError::WallIndexOutOfRange { index, count }.into());
        }
        let snapshot = self.snapshot(None);
        self.edit.select(Selection::Wall(index), snapshot);
        debug!(index, "wall selected");
        Ok(())
    }

    /// Selects an inner wall, deselecting any boundary wall.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` does not name an inner wall.
    pub fn select_inner_wall(&mut self, id: PartitionId) -> Result<()> {
        let segment = self
            .partitions
            .get(id)
            .map(crate::partition::Partition::segment)
            .ok_or(TopologyError::PartitionNotFound)?;
        let snapshot = self.snapshot(Some(segment));
        self.edit.select(Selection::InnerWall(id), snapshot);
        debug!(?id, "inner wall selected");
        Ok(())
    }

    /// Clears a boundary wall selection. Does nothing if an inner wall is
    /// selected.
    pub fn deselect_wall(&mut self) {
        if matches!(self.edit.selection, Selection::Wall(_)) {
            self.edit.clear();
            debug!("wall deselected");
        }
    }

    /// Clears an inner wall selection. Does nothing if a boundary wall is
    /// selected.
    pub fn deselect_inner_wall(&mut self) {
        if matches!(self.edit.selection, Selection::InnerWall(_)) {
            self.edit.clear();
            debug!("inner wall deselected");
        }
    }

    /// Begins dragging the selected wall from `point`.
    ///
    /// The current network becomes the revert point. Returns `false` if
    /// nothing is selected.
    pub fn start_dragging(&mut self, point: Point2) -> bool {
        let inner_wall = match self.edit.selection {
            Selection::None => return false,
            Selection::Wall(_) => None,
            Selection::InnerWall(id) => match self.partitions.get(id) {
                Some(wall) => Some(wall.segment()),
                None => return false,
            },
        };
        self.edit.snapshot = Some(self.snapshot(inner_wall));
        self.edit.drag_start = Some(point);
        debug!(x = point.x, y = point.y, "drag started");
        true
    }

    /// Ends the current drag, keeping the selection.
    pub fn stop_dragging(&mut self) {
        if self.edit.drag_start.take().is_some() {
            debug!("drag stopped");
        }
    }

    /// Restores the network captured when the drag (or selection) began.
    ///
    /// Returns `false` if there is nothing to restore.
    pub fn revert_drag(&mut self) -> bool {
        let Some(snapshot) = self.edit.snapshot.clone() else {
            return false;
        };
        self.boundary.set_vertices(snapshot.vertices);
        self.partitions = snapshot.partitions;
        self.edit.drag_start = None;
        debug!("drag reverted");
        true
    }

    /// Moves the selected boundary wall toward `(x, y)`.
    ///
    /// See [`DragWall`].
    ///
    /// # Errors
    ///
    /// Returns an error if the move would make the boundary intersect
    /// itself; the frame is discarded.
    pub fn update_wall_position(&mut self, x: f64, y: f64) -> Result<bool> {
        DragWall::new(Point2::new(x, y)).execute(self)
    }

    /// Slides the selected inner wall toward `(x, y)`.
    ///
    /// See [`DragInnerWall`].
    pub fn update_inner_wall_position(&mut self, x: f64, y: f64) -> bool {
        DragInnerWall::new(Point2::new(x, y)).execute(self)
    }

    /// Returns `true` while a boundary drag is moving a wall that shares
    /// an endpoint with `wall`.
    #[must_use]
    pub fn is_wall_moving(&self, wall: &Segment) -> bool {
        let (Selection::Wall(index), Some(_), Some(snapshot)) =
            (self.edit.selection, self.edit.drag_start, self.edit.snapshot.as_ref())
        else {
            return false;
        };
        let (Some(current), Some((a, b))) = (
            self.boundary.segment(index),
            self.boundary.segment_vertices(index),
        ) else {
            return false;
        };
        let (Some(orig_start), Some(orig_end)) = (snapshot.vertices.get(a), snapshot.vertices.get(b))
        else {
            return false;
        };

        let shares = |p: &Point2| {
            points_equal(p, &current.start, SHARED_POINT_EPSILON)
                || points_equal(p, &current.end, SHARED_POINT_EPSILON)
        };
        let moved = !points_equal(&current.start, orig_start, SHARED_POINT_EPSILON)
            || !points_equal(&current.end, orig_end, SHARED_POINT_EPSILON);

        (shares(&wall.start) || shares(&wall.end)) && moved
    }

    #[must_use]
    pub fn selected_wall(&self) -> Option<usize> {
        match self.edit.selection {
            Selection::Wall(index) => Some(index),
            _ => None,
        }
    }

    #[must_use]
    pub fn selected_inner_wall(&self) -> Option<PartitionId> {
        match self.edit.selection {
            Selection::InnerWall(id) => Some(id),
            _ => None,
        }
    }

    fn snapshot(&self, inner_wall: Option<Segment>) -> Snapshot {
        Snapshot {
            vertices: self.boundary.vertices().to_vec(),
            partitions: self.partitions.clone(),
            inner_wall,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            vertices: Vec::new(),
            partitions: PartitionStore::new(),
            inner_wall: None,
        }
    }

    #[test]
    fn phases() {
        let mut state = EditState::default();
        assert_eq!(state.phase(), EditPhase::Idle);
        state.select(Selection::Wall(1), snapshot());
        assert_eq!(state.phase(), EditPhase::Selected);
        state.drag_start = Some(Point2::new(0.0, 0.0));
        assert_eq!(state.phase(), EditPhase::Dragging);
        state.clear();
        assert_eq!(state.phase(), EditPhase::Idle);
        assert!(state.snapshot.is_none());
    }

    #[test]
    fn reselect_resets_drag() {
        let mut state = EditState::default();
        state.select(Selection::Wall(0), snapshot());
        state.drag_start = Some(Point2::new(1.0, 1.0));
        state.select(Selection::Wall(2), snapshot());
        assert_eq!(state.selection(), Selection::Wall(2));
        assert!(state.drag_start().is_none());
    }

    fn square() -> Walls {
        Walls::from_polygon(&[
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 100.0),
            Point2::new(0.0, 100.0),
        ])
    }

    #[test]
    fn selecting_one_kind_replaces_the_other() {
        let mut walls = square();
        let ids = walls.add_inner_wall(
            Point2::new(50.0, 0.0),
            Point2::new(50.0, 100.0),
            crate::partition::Alignment::Center,
        );
        walls.select_wall(2).unwrap();
        assert_eq!(walls.selected_wall(), Some(2));

        walls.select_inner_wall(ids[0]).unwrap();
        assert_eq!(walls.selected_wall(), None);
        assert_eq!(walls.selected_inner_wall(), Some(ids[0]));

        walls.deselect_wall();
        assert_eq!(walls.selected_inner_wall(), Some(ids[0]));
        walls.deselect_inner_wall();
        assert_eq!(walls.edit_state().phase(), EditPhase::Idle);
    }

    #[test]
    fn select_rejects_unknown_walls() {
        let mut walls = square();
        let err = walls.select_wall(4).unwrap_err();
        assert!(matches!(
            err,
            crate::error::WallSketchError::Topology(TopologyError::WallIndexOutOfRange {
                index: 4,
                count: 4
            })
        ));
        assert!(walls.select_inner_wall(PartitionId::default()).is_err());
        assert_eq!(walls.edit_state().phase(), EditPhase::Idle);
    }

    #[test]
    fn dragging_requires_selection() {
        let mut walls = square();
        assert!(!walls.start_dragging(Point2::new(50.0, 0.0)));
        walls.select_wall(0).unwrap();
        assert!(walls.start_dragging(Point2::new(50.0, 0.0)));
        assert_eq!(walls.edit_state().phase(), EditPhase::Dragging);
        walls.stop_dragging();
        assert_eq!(walls.edit_state().phase(), EditPhase::Selected);
    }

    #[test]
    fn revert_restores_drag_start_state() {
        let mut walls = square();
        let before = walls.points();
        walls.select_wall(0).unwrap();
        walls.start_dragging(Point2::new(50.0, 0.0));
        assert!(walls.update_wall_position(50.0, -30.0).unwrap());
        assert_ne!(walls.points(), before);
        assert!(walls.revert_drag());
        assert_eq!(walls.points(), before);
    }

    #[test]
    fn moving_wall_detection() {
        let mut walls = square();
        walls.select_wall(0).unwrap();
        walls.start_dragging(Point2::new(50.0, 0.0));
        let right = walls.boundary().segment(1).unwrap();
        assert!(!walls.is_wall_moving(&right));

        walls.update_wall_position(50.0, -10.0).unwrap();
        let right = walls.boundary().segment(1).unwrap();
        assert!(walls.is_wall_moving(&right));
        let detached = Segment::new(Point2::new(50.0, 50.0), Point2::new(50.0, 60.0));
        assert!(!walls.is_wall_moving(&detached));

        walls.stop_dragging();
        assert!(!walls.is_wall_moving(&right));
    }
}
