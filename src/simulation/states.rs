//! Core state types for the N-body simulation.
//!
//! - `Body`   point mass with position and velocity (`NVec3`)
//! - `System` the fixed-length, index-stable body sequence plus the turn counter
//!
//! Bodies are never added or removed once a `System` is built.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64, // mass, assumed > 0
}

impl Body {
    pub fn new(x: NVec3, v: NVec3, m: f64) -> Self {
        Body { x, v, m }
    }

    /// Body at rest
    pub fn at_rest(x: NVec3, m: f64) -> Self {
        Body { x, v: NVec3::zeros(), m }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>, // collection of bodies, index order is the output order
    pub turn: usize, // number of completed turns
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        System { bodies, turn: 0 }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
