use thiserror::Error;

/// Top-level error type for the wall sketch engine.
#[derive(Debug, Error)]
pub enum WallSketchError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the wall network topology.
#[derive(Debug, Error, PartialEq)]
pub enum TopologyError {
    #[error("boundary is not closed")]
    BoundaryNotClosed,

    #[error("boundary polygon intersects itself")]
    SelfIntersection,

    #[error("wall index {index} is out of range (boundary has {count} walls)")]
    WallIndexOutOfRange { index: usize, count: usize },

    #[error("inner wall not found")]
    PartitionNotFound,

    #[error("segment of length {length} is shorter than the minimum {min}")]
    SegmentTooShort { length: f64, min: f64 },
}

/// Errors related to engine settings.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid thickness value: {0:?}")]
    InvalidThickness(String),

    #[error("unknown wall alignment: {0:?}")]
    InvalidAlignment(String),

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Convenience type alias for results using [`WallSketchError`].
pub type Result<T> = std::result::Result<T, WallSketchError>;
