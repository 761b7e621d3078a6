use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{Body, System};

/// Bodies with random masses scattered uniformly over `[0, width)²`.
pub fn random_system(n: usize, width: f64, seed: u64) -> System {
    let mut rng = StdRng::seed_from_u64(seed);
    let bodies = (0..n)
        .map(|_| {
            Body::new(
                rng.gen_range(1.0..100.0),
                Vector2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..width)),
                Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
            )
        })
        .collect();
    System::new(bodies, width).unwrap()
}

/// Route `log` output of the crate through the test harness.
pub fn init_logger() {
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Debug, simplelog::Config::default());
}
