pub mod boundary;
pub mod config;
pub mod edit;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod partition;
pub mod walls;

pub use config::WallConfig;
pub use error::{Result, WallSketchError};
pub use partition::Alignment;
pub use walls::Walls;
