//! Planar N-body gravity with the Barnes-Hut approximation.
//!
//! Every generation, a quadtree is built from the current [`System`], the net force on
//! each body is estimated by walking that tree ([`BarnesHut`]), and each body is advanced
//! under constant acceleration ([`integrate`]). [`Simulation`] drives this cycle and
//! returns one snapshot per generation.
//!
//! ```no_run
//! use planar_barnes_hut::{Body, LogProgress, Parameters, Simulation, System, Vector2};
//!
//! let bodies = vec![
//!     Body::new(5.972e24, Vector2::new(5e8, 5e8), Vector2::zeros()),
//!     Body::new(7.348e22, Vector2::new(5e8 + 3.844e8, 5e8), Vector2::new(0., 1022.)),
//! ];
//! let system = System::new(bodies, 1e9)?;
//! let parameters = Parameters::new(1000, 60., 0.5);
//!
//! let snapshots = Simulation::new(system, parameters)?
//!     .observer(LogProgress::new(100, 1000))
//!     .simulate()?;
//! assert_eq!(snapshots.len(), 1001);
//! # Ok::<(), planar_barnes_hut::SimulationError>(())
//! ```

pub mod barnes_hut;
pub mod body;
pub mod config;
pub mod csv;
pub mod direct_summation;
pub mod error;
pub mod gravity;
pub mod integrator;
pub mod quadrant;
pub mod quadtree;
pub mod simulation;
pub mod system;

#[cfg(test)]
mod test_utils;

pub use barnes_hut::BarnesHut;
pub use body::{Body, PointMass};
pub use config::{Parameters, SimulationConfig};
pub use error::{Result, SimulationError};
pub use gravity::{Gravity, G};
pub use integrator::integrate;
pub use nalgebra::Vector2;
pub use quadrant::{Direction, Quadrant};
pub use quadtree::{NodeBody, NodeIndex, QuadTree, TreeNode};
pub use simulation::{advance, Execution, LogProgress, Observer, Simulation};
pub use system::System;
