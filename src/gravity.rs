use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::{PointMass, Result, SimulationError};

pub const G: f64 = 6.67408e-11;

/// Newtonian gravity between two point masses, without softening.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gravity {
    pub g: f64,
}

impl Default for Gravity {
    fn default() -> Self {
        Self { g: G }
    }
}

impl Gravity {
    /// `g` is not checked here; [`BarnesHut::new`](crate::BarnesHut::new) rejects
    /// a non-finite or non-positive constant.
    #[must_use]
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Force exerted on `on` by `from`, pointing from `on` towards `from`.
    ///
    /// Coincident positions have no defined direction and yield
    /// [`SimulationError::DegenerateSeparation`].
    pub fn force(&self, on: &PointMass, from: &PointMass) -> Result<Vector2<f64>> {
        let r = from.position - on.position;
        let d_square = r.norm_squared();
        if d_square == 0. {
            return Err(SimulationError::DegenerateSeparation {
                position: on.position,
            });
        }
        let magnitude = self.g * (on.mass * from.mass) / d_square;
        Ok(r * (magnitude / d_square.sqrt()))
    }
}
