use thiserror::Error;

/// Rejected simulation configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("expected {expected} lattice dimensions, got {actual}")]
    DimensionCount { expected: usize, actual: usize },
    #[error("lattice dimension {axis} must be positive, got {value}")]
    NonPositiveDimension { axis: usize, value: i32 },
    #[error("lattice {0:?} has more cells than fit in a u64")]
    LatticeTooLarge(Vec<i32>),
    #[error("start length must be at least 1")]
    ZeroStartLength,
    #[error("start length {length} leaves no free cell on a lattice of {volume} cells")]
    StartLengthTooLarge { length: usize, volume: u64 },
    #[error("start position has {actual} components, expected {expected}")]
    StartPositionShape { expected: usize, actual: usize },
    #[error("start heading {0:?} is not an axis-aligned unit vector")]
    InvalidHeading(Vec<i32>),
    #[error("initial segment {index} at {position} lies outside the lattice")]
    SegmentOutOfBounds { index: usize, position: String },
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("{name} range is inverted: {lo} > {hi}")]
    InvertedRange { name: &'static str, lo: f64, hi: f64 },
    #[error("speed multiplier must be in (0, 1], got {0}")]
    SpeedMultiplier(f64),
}

/// Runtime failures of the simulation core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Every in-bounds cell is excluded; rejection sampling would never finish
    #[error("no free cell left on a lattice of {volume} cells")]
    BoardFull { volume: u64 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
