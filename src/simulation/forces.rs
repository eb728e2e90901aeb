//! Pairwise acceleration model for the n-body engine
//!
//! The engine only ever asks "what acceleration does `other` exert on `body`",
//! so the seam is a pairwise trait. Net acceleration is the plain sum over the
//! whole body sequence, the body itself included.

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3};
use crate::simulation::vector::{accumulate, scale, squared_magnitude, subtract};

/// Pairwise acceleration source
pub trait Acceleration {
    /// Acceleration that `other` exerts on `body`
    fn acceleration(&self, body: &Body, other: &Body) -> NVec3;

    /// Sum of `acceleration(body, b)` over every `b` in `bodies`, in index order.
    /// `body` may itself be an element of `bodies`
    fn net_acceleration(&self, body: &Body, bodies: &[Body]) -> NVec3 {
        let mut a = NVec3::zeros();
        for other in bodies {
            accumulate(&mut a, &self.acceleration(body, other));
        }
        a
    }
}

/// Newtonian gravity with a global softening term (direct n^2 sum)
///
/// `a = r * m_other * (|r|^2 + eps2)^(-3/2) * G` with `r = x_other - x_body`.
/// At zero separation the factor stays finite and `r` is the zero vector, so
/// the self-interaction vanishes without a branch.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening
}

impl NewtonianGravity {
    pub fn from_params(p: &Parameters) -> Self {
        NewtonianGravity { G: p.G, eps2: p.eps2 }
    }

    /// Upper bound of `|a|` exerted by a body of mass `m` at any separation.
    /// `|r| / (|r|^2 + eps2)^(3/2)` peaks at `|r|^2 = eps2 / 2`
    pub fn peak_magnitude(&self, m: f64) -> f64 {
        self.G * m * 2.0 / (3.0 * 3f64.sqrt() * self.eps2)
    }
}

impl Acceleration for NewtonianGravity {
    #[inline]
    fn acceleration(&self, body: &Body, other: &Body) -> NVec3 {
        let r = subtract(&other.x, &body.x);
        let factor = other.m * (squared_magnitude(&r) + self.eps2).powf(-1.5);
        scale(&scale(&r, factor), self.G)
    }
}
