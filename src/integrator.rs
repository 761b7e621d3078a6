use nalgebra::Vector2;

use crate::Body;

/// Advance `body` by `dt` under the constant net `force`.
///
/// a = F / m
/// v' = v + a dt
/// x' = x + v dt + a dt² / 2
///
/// Single step, not symplectic: energy drifts over many generations.
#[must_use]
pub fn integrate(body: &Body, force: Vector2<f64>, dt: f64) -> Body {
    let acceleration = force / body.mass;
    Body {
        position: body.position + body.velocity * dt + acceleration * (0.5 * dt * dt),
        velocity: body.velocity + acceleration * dt,
        acceleration,
        ..body.clone()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn constant_acceleration() {
        let body = Body::new(2., Vector2::new(1., 1.), Vector2::new(3., 0.));
        let next = integrate(&body, Vector2::new(0., -4.), 0.5);

        assert_abs_diff_eq!(next.acceleration, Vector2::new(0., -2.));
        assert_abs_diff_eq!(next.velocity, Vector2::new(3., -1.));
        assert_abs_diff_eq!(next.position, Vector2::new(2.5, 0.75));
        assert_eq!(next.mass, body.mass);
    }

    #[test]
    fn zero_time_step() {
        let body = Body::new(2., Vector2::new(1., 1.), Vector2::new(3., 0.))
            .with_radius(4.)
            .with_color([1, 2, 3]);
        let next = integrate(&body, Vector2::new(7., -4.), 0.);

        assert_eq!(next.position, body.position);
        assert_eq!(next.velocity, body.velocity);
        assert_abs_diff_eq!(next.acceleration, Vector2::new(3.5, -2.));
        assert_eq!(next.radius, 4.);
        assert_eq!(next.color, [1, 2, 3]);
    }

    #[test]
    fn force_free_motion() {
        let body = Body::new(1., Vector2::zeros(), Vector2::new(1., -2.));
        let next = integrate(&body, Vector2::zeros(), 3.);

        assert_abs_diff_eq!(next.position, Vector2::new(3., -6.));
        assert_eq!(next.velocity, body.velocity);
    }
}
