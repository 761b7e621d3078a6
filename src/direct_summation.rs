use nalgebra::Vector2;

use crate::{Gravity, Result, System};

/// Exact net force on every body by summing over all pairs.
///
/// O(n²); the reference that Barnes-Hut results are checked against.
pub fn net_forces(system: &System, gravity: &Gravity) -> Result<Vec<Vector2<f64>>> {
    let mut forces = vec![Vector2::zeros(); system.len()];
    for (i, (b1, f)) in system.bodies.iter().zip(forces.iter_mut()).enumerate() {
        let p1 = b1.point_mass();
        for (j, b2) in system.bodies.iter().enumerate() {
            if i == j {
                continue;
            }
            *f += gravity.force(&p1, &b2.point_mass())?;
        }
    }
    Ok(forces)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{test_utils::random_system, Body, SimulationError};

    #[test]
    fn symmetry() {
        let system = System::new(
            vec![
                Body::new(1e6, Vector2::new(1., 0.), Vector2::zeros()),
                Body::new(1e6, Vector2::new(-1., 0.), Vector2::zeros()),
            ],
            10.,
        )
        .unwrap();

        let forces = net_forces(&system, &Gravity::default()).unwrap();

        assert_abs_diff_eq!(forces[0], -forces[1]);
        assert!(forces[0].x < 0.);
    }

    #[test]
    fn forces_sum_to_zero() {
        let system = random_system(40, 100., 20);
        let forces = net_forces(&system, &Gravity::new(1.)).unwrap();

        let total: Vector2<f64> = forces.iter().sum();
        let scale: f64 = forces.iter().map(|f| f.norm()).sum();
        assert_abs_diff_eq!(total.norm() / scale, 0., epsilon = 1e-12);
    }

    #[test]
    fn coincident_bodies() {
        let system = System::new(
            vec![
                Body::new(1., Vector2::new(1., 1.), Vector2::zeros()),
                Body::new(1., Vector2::new(1., 1.), Vector2::zeros()),
            ],
            10.,
        )
        .unwrap();

        assert!(matches!(
            net_forces(&system, &Gravity::default()),
            Err(SimulationError::DegenerateSeparation { .. })
        ));
    }
}
