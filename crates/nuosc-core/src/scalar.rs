//! Scalar abstraction over plain and forward-mode differentiable values.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Arithmetic capability set required of a probability value type.
///
/// Two instantiations exist: plain `f64` and the forward-mode [`Dual`]
/// number. Equality is exact on every component; the cache layer relies on
/// this to detect any change, however small.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Whether the scalar-query path may serve a value cached by an earlier
    /// computation. Derived from the type, never from a runtime value:
    /// differentiable scalars always recompute because a value taped during
    /// one differentiation chain cannot be reused in another.
    const REUSES_POINT_CACHE: bool;

    /// Lifts a plain number into the scalar type (zero derivative part).
    fn from_f64(value: f64) -> Self;

    /// Returns the primal (value) part.
    fn value(&self) -> f64;

    /// Sine.
    fn sin(self) -> Self;

    /// Cosine.
    fn cos(self) -> Self;

    /// Square root.
    fn sqrt(self) -> Self;
}

impl Scalar for f64 {
    const REUSES_POINT_CACHE: bool = true;

    fn from_f64(value: f64) -> Self {
        value
    }

    fn value(&self) -> f64 {
        *self
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }
}

/// Forward-mode dual number carrying a value and one derivative component.
///
/// Arithmetic follows the usual dual rules: the `eps` component of a product
/// is `a.val * b.eps + a.eps * b.val`, and the elementary functions apply
/// the chain rule. Seed exactly one parameter with [`Dual::variable`] and
/// the rest with [`Dual::constant`] to differentiate with respect to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dual {
    /// Primal value.
    pub val: f64,
    /// Derivative component.
    pub eps: f64,
}

impl Dual {
    /// Creates a dual number from explicit value and derivative parts.
    pub fn new(val: f64, eps: f64) -> Self {
        Self { val, eps }
    }

    /// Lifts a constant: derivative part zero.
    pub fn constant(val: f64) -> Self {
        Self { val, eps: 0.0 }
    }

    /// Seeds a differentiation variable: derivative part one.
    pub fn variable(val: f64) -> Self {
        Self { val, eps: 1.0 }
    }
}

impl Add for Dual {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.eps + rhs.eps)
    }
}

impl Sub for Dual {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.val - rhs.val, self.eps - rhs.eps)
    }
}

impl Mul for Dual {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.val * rhs.val,
            self.val * rhs.eps + self.eps * rhs.val,
        )
    }
}

impl Div for Dual {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(
            self.val / rhs.val,
            (self.eps * rhs.val - self.val * rhs.eps) / (rhs.val * rhs.val),
        )
    }
}

impl Neg for Dual {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.val, -self.eps)
    }
}

impl Scalar for Dual {
    const REUSES_POINT_CACHE: bool = false;

    fn from_f64(value: f64) -> Self {
        Self::constant(value)
    }

    fn value(&self) -> f64 {
        self.val
    }

    fn sin(self) -> Self {
        Self::new(self.val.sin(), self.eps * self.val.cos())
    }

    fn cos(self) -> Self {
        Self::new(self.val.cos(), -self.eps * self.val.sin())
    }

    fn sqrt(self) -> Self {
        let root = self.val.sqrt();
        Self::new(root, self.eps / (2.0 * root))
    }
}
