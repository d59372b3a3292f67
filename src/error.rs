//! Error types for world construction and queries.

use core::fmt;

/// Errors that can occur when building or querying a simulation world.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A ring needs at least 3 points to enclose an area.
    InsufficientPoints { count: usize },
    /// Radius must be positive and finite.
    InvalidRadius,
    /// Body index is out of bounds.
    BodyOutOfBounds { index: usize, count: usize },
    /// Particle index is out of bounds within its body.
    ParticleOutOfBounds { index: usize, count: usize },
    /// A snapshot array does not have the length its header implies.
    SnapshotMismatch { expected: usize, found: usize },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InsufficientPoints { count } => {
                write!(f, "body needs at least 3 points, got {}", count)
            }
            PhysicsError::InvalidRadius => write!(f, "radius must be positive and finite"),
            PhysicsError::BodyOutOfBounds { index, count } => {
                write!(f, "body index {} out of bounds (count: {})", index, count)
            }
            PhysicsError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            PhysicsError::SnapshotMismatch { expected, found } => {
                write!(f, "snapshot array has {} values, expected {}", found, expected)
            }
        }
    }
}
