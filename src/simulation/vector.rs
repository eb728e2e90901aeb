//! Vector primitives used by the force model
//!
//! Thin wrappers over `nalgebra` so the force law reads the same way it is
//! written down: subtract, accumulate, scale, squared magnitude.

use super::states::NVec3;

/// `u - v`
#[inline]
pub fn subtract(u: &NVec3, v: &NVec3) -> NVec3 {
    u - v
}

/// In-place `u += v`, returns `u` for chaining
#[inline]
pub fn accumulate<'a>(u: &'a mut NVec3, v: &NVec3) -> &'a mut NVec3 {
    *u += v;
    u
}

/// `u * k`
#[inline]
pub fn scale(u: &NVec3, k: f64) -> NVec3 {
    u * k
}

/// `|u|^2`
#[inline]
pub fn squared_magnitude(u: &NVec3) -> f64 {
    u.norm_squared()
}
