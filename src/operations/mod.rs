pub mod intersections;
pub mod nearest;
pub mod offset;
pub mod snap;

pub use intersections::{FindAllIntersections, WallHit};
pub use nearest::{FindNearestWall, NearestWall, PolygonWallHit, WallPoint};
pub use offset::{PartitionBand, ThickWalls, WallRegion};
pub use snap::{MagnetPoint, MagnetSnap, SnapKind};
