use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A mass at a position, without any kinematics.
///
/// Used both for real bodies when evaluating forces
/// and for the aggregate mass of a subtree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMass {
    pub mass: f64,
    pub position: Vector2<f64>,
}

impl PointMass {
    #[must_use]
    pub fn new(mass: f64, position: Vector2<f64>) -> Self {
        Self { mass, position }
    }

    /// Combine two point masses into their total mass and center of mass.
    ///
    /// Associative, so aggregates can be folded child by child.
    #[must_use]
    pub fn combine(self, other: PointMass) -> PointMass {
        let mass = self.mass + other.mass;
        let position = (self.position * self.mass + other.position * other.mass) / mass;
        PointMass { mass, position }
    }
}

/// A simulated point mass.
///
/// `radius` and `color` are carried along for renderers and never read by the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    #[serde(default = "zero_vector")]
    pub acceleration: Vector2<f64>,
    pub mass: f64,
    #[serde(default)]
    pub radius: f64,
    #[serde(default = "white")]
    pub color: [u8; 3],
}

fn zero_vector() -> Vector2<f64> {
    Vector2::zeros()
}

fn white() -> [u8; 3] {
    [255; 3]
}

impl Body {
    #[must_use]
    pub fn new(mass: f64, position: Vector2<f64>, velocity: Vector2<f64>) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2::zeros(),
            mass,
            radius: 0.,
            color: white(),
        }
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn point_mass(&self) -> PointMass {
        PointMass::new(self.mass, self.position)
    }

    #[must_use]
    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn combine_three_equal_masses() {
        let com = [
            PointMass::new(1., Vector2::new(-4., 7.)),
            PointMass::new(1., Vector2::new(0., 5.)),
            PointMass::new(1., Vector2::new(10., 3.)),
        ]
        .into_iter()
        .reduce(PointMass::combine)
        .unwrap();

        assert_abs_diff_eq!(com.mass, 3.);
        assert_abs_diff_eq!(com.position, Vector2::new(2., 5.), epsilon = 1e-12);
    }

    #[test]
    fn combine_weighted() {
        let com = PointMass::new(4., Vector2::new(-4., 7.))
            .combine(PointMass::new(2., Vector2::new(0., 5.)))
            .combine(PointMass::new(1., Vector2::new(10., 3.)));

        assert_abs_diff_eq!(com.mass, 7.);
        assert_abs_diff_eq!(
            com.position,
            Vector2::new(-6. / 7., 41. / 7.),
            epsilon = 1e-12
        );
    }

    #[test]
    fn deserialize_defaults() {
        let body: Body = serde_yaml::from_str(
            "position: [1.0, 2.0]\nvelocity: [0.0, -1.0]\nmass: 3.0\n",
        )
        .unwrap();

        assert_eq!(body.position, Vector2::new(1., 2.));
        assert_eq!(body.acceleration, Vector2::zeros());
        assert_eq!(body.radius, 0.);
        assert_eq!(body.color, [255; 3]);
    }
}
