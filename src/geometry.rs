//! 2D primitives shared by every entity.
//!
//! `Vector` is `Copy`, so "clone then mutate" is just a binding:
//! `let mut v = body.velocity; v.scale(dt);` never touches the body.
//!
//! Operators: binary and unary `-`, `* f64` and `+=`. There is no
//! `std::ops::Add` impl: a by-value `Add::add` would be picked over the
//! chaining `add` on plain bindings.

use std::ops::{AddAssign, Mul, Neg, Sub};

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    // ── Chaining mutators ────────────────────────────────────────────────────

    pub fn add(&mut self, v: Vector) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self
    }

    pub fn scale(&mut self, k: f64) -> &mut Self {
        self.x *= k;
        self.y *= k;
        self
    }

    pub fn subtract(&mut self, v: Vector) -> &mut Self {
        self.add(-v)
    }

    /// Overwrite this vector with `v`.
    pub fn assign(&mut self, v: Vector) -> &mut Self {
        self.x = v.x;
        self.y = v.y;
        self
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(mut self, k: f64) -> Vector {
        self.scale(k);
        self
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        self * -1.0
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(mut self, rhs: Vector) -> Vector {
        self.subtract(rhs);
        self
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        Vector::add(self, rhs);
    }
}

// ── Size ──────────────────────────────────────────────────────────────────────

/// Width/height pair. Negative inputs are clamped to zero.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "RawSize")]
pub struct Size {
    w: f64,
    h: f64,
}

impl Size {
    pub fn new(w: f64, h: f64) -> Self {
        Self {
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn h(&self) -> f64 {
        self.h
    }
}

#[derive(Deserialize)]
struct RawSize {
    w: f64,
    h: f64,
}

impl From<RawSize> for Size {
    fn from(raw: RawSize) -> Self {
        Size::new(raw.w, raw.h)
    }
}
