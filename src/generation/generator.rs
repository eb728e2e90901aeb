//! Initial-condition generator
//!
//! Two clusters of bodies with small integer masses and velocities, split
//! along y. Values are integer-valued so the written file has no fractional
//! digits. Seeded, so a given `(n, seed)` always yields the same file.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::simulation::states::{Body, NVec3};

/// Extent of each position coordinate, `0..=SPREAD`
pub const SPREAD: u32 = 32767;
/// y offset separating the two clusters
pub const CLUSTER_OFFSET: f64 = 16384.0;
/// Velocity components and extra mass are drawn from `0..=SMALL`
pub const SMALL: u32 = 15;

pub fn generate(n: usize, seed: u64) -> Vec<Body> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut draw = |max: u32| rng.gen_range(0..=max) as f64;

    (0..n)
        .map(|i| {
            let m = 1.0 + draw(SMALL);
            // first half sits above, second half below
            let offset = if 2 * i > n { -CLUSTER_OFFSET } else { CLUSTER_OFFSET };
            let x = NVec3::new(draw(SPREAD), draw(SPREAD) + offset, draw(SPREAD));
            let v = NVec3::new(draw(SMALL), draw(SMALL), draw(SMALL));
            Body::new(x, v, m)
        })
        .collect()
}
