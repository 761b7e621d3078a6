//! Error types of the simulation.

use nalgebra::Vector2;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Everything that can abort tree construction, force evaluation or configuration.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(
        "degenerate configuration: two point masses coincide at ({}, {})",
        .position.x,
        .position.y
    )]
    DegenerateSeparation { position: Vector2<f64> },

    #[error("bodies {first} and {second} cannot be separated by subdivision (depth {depth})")]
    NonSeparableBodies {
        first: usize,
        second: usize,
        depth: usize,
    },

    #[error("body {index} has invalid mass {mass}")]
    InvalidMass { index: usize, mass: f64 },

    #[error("body {index} has a non-finite position or velocity")]
    NonFinitePosition { index: usize },

    #[error("invalid bounding width {0}")]
    InvalidWidth(f64),

    #[error("invalid time step {0}")]
    InvalidTimeStep(f64),

    #[error("invalid theta {0}")]
    InvalidTheta(f64),

    #[error("invalid gravitational constant {0}")]
    InvalidGravitationalConstant(f64),

    #[error("multithreaded execution needs at least one thread")]
    InvalidThreadCount,

    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
