use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::{Body, Quadrant, Result, SimulationError};

/// A snapshot of all bodies at one generation.
///
/// `width` is the side of the square `[0, width]²` that positions are interpreted against.
/// Bodies may leave that square; see [`System::bounding_quadrant`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct System {
    pub bodies: Vec<Body>,
    pub width: f64,
}

impl System {
    /// Create a validated snapshot.
    pub fn new(bodies: Vec<Body>, width: f64) -> Result<Self> {
        let system = Self { bodies, width };
        system.validate()?;
        Ok(system)
    }

    /// Reject non-positive widths and masses and non-finite kinematics.
    pub fn validate(&self) -> Result<()> {
        if !self.width.is_finite() || self.width <= 0. {
            return Err(SimulationError::InvalidWidth(self.width));
        }
        for (index, body) in self.bodies.iter().enumerate() {
            if !body.mass.is_finite() || body.mass <= 0. {
                return Err(SimulationError::InvalidMass {
                    index,
                    mass: body.mass,
                });
            }
            let finite = body.position.iter().all(|x| x.is_finite())
                && body.velocity.iter().all(|x| x.is_finite());
            if !finite {
                return Err(SimulationError::NonFinitePosition { index });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// The root region of the quadtree.
    ///
    /// This is the configured square if it holds every body, otherwise the smallest square
    /// anchored at the component-wise minimum that covers the configured square and all bodies.
    #[must_use]
    pub fn bounding_quadrant(&self) -> Quadrant {
        let configured = Quadrant::new(Vector2::zeros(), self.width);
        if self.bodies.iter().all(|b| configured.contains(&b.position)) {
            return configured;
        }

        let mut v_min = Vector2::zeros();
        let mut v_max = Vector2::repeat(self.width);
        for body in &self.bodies {
            v_min = v_min.inf(&body.position);
            v_max = v_max.sup(&body.position);
        }
        Quadrant::new(v_min, (v_max - v_min).max())
    }

    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// `None` for an empty system.
    #[must_use]
    pub fn center_of_mass(&self) -> Option<Vector2<f64>> {
        self.bodies
            .iter()
            .map(Body::point_mass)
            .reduce(|a, b| a.combine(b))
            .map(|pm| pm.position)
    }

    #[must_use]
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies.iter().map(Body::momentum).sum()
    }

    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn body(x: f64, y: f64) -> Body {
        Body::new(1., Vector2::new(x, y), Vector2::zeros())
    }

    #[test]
    fn rejects_invalid_width() {
        assert!(matches!(
            System::new(vec![], 0.),
            Err(SimulationError::InvalidWidth(_))
        ));
        assert!(matches!(
            System::new(vec![], f64::NAN),
            Err(SimulationError::InvalidWidth(_))
        ));
    }

    #[test]
    fn rejects_invalid_mass() {
        let mut bodies = vec![body(1., 1.), body(2., 2.)];
        bodies[1].mass = -1.;

        assert!(matches!(
            System::new(bodies, 10.),
            Err(SimulationError::InvalidMass { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_non_finite_position() {
        let bodies = vec![body(1., f64::INFINITY)];

        assert!(matches!(
            System::new(bodies, 10.),
            Err(SimulationError::NonFinitePosition { index: 0 })
        ));
    }

    #[test]
    fn bounding_quadrant_inside() {
        let system = System::new(vec![body(1., 1.), body(10., 0.)], 10.).unwrap();
        assert_eq!(system.bounding_quadrant(), Quadrant::new(Vector2::zeros(), 10.));
    }

    #[test]
    fn bounding_quadrant_expands() {
        let system = System::new(vec![body(-5., 1.), body(3., 20.)], 10.).unwrap();
        let q = system.bounding_quadrant();

        assert_eq!(q.origin, Vector2::new(-5., 0.));
        assert_abs_diff_eq!(q.width, 20.);
        for b in &system.bodies {
            assert!(q.contains(&b.position));
        }
    }

    #[test]
    fn diagnostics() {
        let mut bodies = vec![body(-4., 7.), body(0., 5.), body(10., 3.)];
        bodies[0].velocity = Vector2::new(1., 0.);
        bodies[2].velocity = Vector2::new(0., -2.);
        let system = System::new(bodies, 10.).unwrap();

        assert_abs_diff_eq!(system.total_mass(), 3.);
        assert_abs_diff_eq!(
            system.center_of_mass().unwrap(),
            Vector2::new(2., 5.),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(system.total_momentum(), Vector2::new(1., -2.));
        assert_abs_diff_eq!(system.kinetic_energy(), 2.5);
    }
}
