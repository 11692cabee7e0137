//! Inner (partition) walls.
//!
//! Partitions live in a slotmap arena; their order is tracked separately so
//! that index-based selection and rendering order stay stable. Attachments
//! name what an end is anchored to by boundary wall index or partition key,
//! never by holding onto another wall's data.

mod add;
mod split;

pub use add::AddInnerWall;
pub use split::SplitInnerWall;

use std::fmt;
use std::str::FromStr;

use slotmap::SlotMap;

use crate::error::{ConfigError, WallSketchError};
use crate::geometry::Segment;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for an inner wall.
    pub struct PartitionId;
}

/// Which side of the centerline an inner wall's thickness extends toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl FromStr for Alignment {
    type Err = WallSketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" | "centre" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(ConfigError::InvalidAlignment(other.to_owned()).into()),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// The feature an inner wall end is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachTarget {
    /// Boundary wall segment (or, for vertex anchors, boundary vertex) index.
    Boundary(usize),
    /// Another inner wall. Splitting that wall re-points the anchor to the
    /// half it rests on.
    Partition(PartitionId),
    /// A point produced by splitting an inner wall.
    Junction,
}

/// Anchor metadata for one inner wall end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attachment {
    pub point: Point2,
    pub target: AttachTarget,
    /// `true` for rigid vertex anchors, `false` for points riding on a line.
    pub is_point: bool,
}

impl Attachment {
    /// Returns `true` if the end is anchored to the boundary.
    #[must_use]
    pub fn is_outer(&self) -> bool {
        matches!(self.target, AttachTarget::Boundary(_))
    }

    /// Returns the boundary index this end is anchored to, if any.
    #[must_use]
    pub fn boundary_index(&self) -> Option<usize> {
        match self.target {
            AttachTarget::Boundary(i) => Some(i),
            _ => None,
        }
    }
}

/// Start and end anchors of an inner wall.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Attachments {
    pub start: Option<Attachment>,
    pub end: Option<Attachment>,
}

/// Kind of marker placed on an inner wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperKind {
    Intersection,
}

/// Junction marker on an inner wall, consumed by renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelperPoint {
    pub point: Point2,
    pub kind: HelperKind,
}

/// A secondary wall segment inside the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub start: Point2,
    pub end: Point2,
    pub alignment: Alignment,
    pub attachments: Attachments,
    pub helpers: Vec<HelperPoint>,
}

impl Partition {
    /// Creates a free-standing inner wall with no anchors or helpers.
    #[must_use]
    pub fn new(start: Point2, end: Point2, alignment: Alignment) -> Self {
        Self {
            start,
            end,
            alignment,
            attachments: Attachments::default(),
            helpers: Vec::new(),
        }
    }

    /// Returns the centerline segment.
    #[must_use]
    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
    }

    /// Returns the centerline length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segment().length()
    }
}

/// Ordered arena of inner walls.
#[derive(Debug, Clone, Default)]
pub struct PartitionStore {
    walls: SlotMap<PartitionId, Partition>,
    order: Vec<PartitionId>,
}

impl PartitionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Appends a wall and returns its key.
    pub fn push(&mut self, wall: Partition) -> PartitionId {
        let id = self.walls.insert(wall);
        self.order.push(id);
        id
    }

    #[must_use]
    pub fn get(&self, id: PartitionId) -> Option<&Partition> {
        self.walls.get(id)
    }

    pub fn get_mut(&mut self, id: PartitionId) -> Option<&mut Partition> {
        self.walls.get_mut(id)
    }

    /// Returns the key of the wall at display position `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<PartitionId> {
        self.order.get(index).copied()
    }

    /// Returns the display position of `id`.
    #[must_use]
    pub fn position(&self, id: PartitionId) -> Option<usize> {
        self.order.iter().position(|&o| o == id)
    }

    /// Returns the keys in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<PartitionId> {
        self.order.clone()
    }

    /// Iterates over walls in display order.
    pub fn iter(&self) -> impl Iterator<Item = (PartitionId, &Partition)> + '_ {
        self.order
            .iter()
            .filter_map(move |&id| self.walls.get(id).map(|w| (id, w)))
    }

    /// Replaces `id` with `first` and `second` at the same display position.
    ///
    /// Returns `None` (and changes nothing) if `id` is not present.
    pub fn replace_with_pair(
        &mut self,
        id: PartitionId,
        first: Partition,
        second: Partition,
    ) -> Option<(PartitionId, PartitionId)> {
        let pos = self.position(id)?;
        self.walls.remove(id);
        let a = self.walls.insert(first);
        let b = self.walls.insert(second);
        self.order.splice(pos..=pos, [a, b]);
        Some((a, b))
    }

    /// Removes every wall.
    pub fn clear(&mut self) {
        self.walls.clear();
        self.order.clear();
    }
}
