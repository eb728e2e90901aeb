//! Fixed-step time integration for the N-body system
//!
//! Semi-implicit (symplectic) Euler: position advances with the velocity from
//! before the step, then velocity takes the freshly computed acceleration.

use super::forces::Acceleration;
use super::states::{Body, NVec3};
use super::vector::{accumulate, scale};

/// Advance one body by `dt` given its net acceleration `a`.
/// Order matters: `x += v dt` first (pre-update `v`), then `v += a dt`
#[inline]
pub fn semi_implicit_euler(body: &mut Body, a: &NVec3, dt: f64) {
    let dx = scale(&body.v, dt);
    accumulate(&mut body.x, &dx);
    accumulate(&mut body.v, &scale(a, dt));
}

/// Compute the net acceleration on `bodies[i]` from the current contents of
/// `bodies` and integrate it in place. Bodies before `i` may already have been
/// advanced in the same turn; their new state is what body `i` sees.
pub fn advance_body<F: Acceleration>(bodies: &mut [Body], i: usize, force: &F, dt: f64) {
    let a = force.net_acceleration(&bodies[i], bodies);
    semi_implicit_euler(&mut bodies[i], &a, dt);
}

/// Net accelerations for every body from one consistent snapshot.
/// `out` is resized to `bodies.len()`
pub fn snapshot_accelerations<F: Acceleration>(bodies: &[Body], force: &F, out: &mut Vec<NVec3>) {
    out.clear();
    out.extend(bodies.iter().map(|b| force.net_acceleration(b, bodies)));
}
