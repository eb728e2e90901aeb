//! Numerical and physical parameters for the simulation
//!
//! `Parameters` is passed explicitly to the force model and integrator:
//! - gravitational constant `G`
//! - softening `eps2` (epsilon squared)
//! - fixed time step `dt`

/// Gravitational constant of the reference force law
pub const DEFAULT_G: f64 = 1e5;
/// Softening squared
pub const DEFAULT_EPS2: f64 = 1e-8;
/// Unit step
pub const DEFAULT_DT: f64 = 1.0;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening
    pub dt: f64, // step size
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            G: DEFAULT_G,
            eps2: DEFAULT_EPS2,
            dt: DEFAULT_DT,
        }
    }
}
