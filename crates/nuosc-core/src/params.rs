use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::scalar::Scalar;

/// Immutable snapshot of the eight physical inputs that fully determine
/// oscillation probabilities.
///
/// Equality is derived field-wise and exact: any change, however small,
/// makes two snapshots unequal and thereby invalidates a cache keyed on
/// them. There is no tolerance anywhere. NaN never compares equal, which
/// only forces recomputation, never incorrect reuse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: DeserializeOwned"))]
pub struct OscParams<T: Scalar> {
    /// Solar mass-squared splitting, eV^2.
    pub dmsq21: T,
    /// Atmospheric mass-squared splitting, eV^2 (negative for inverted
    /// ordering).
    pub dmsq32: T,
    /// Solar mixing angle, radians.
    pub th12: T,
    /// Reactor mixing angle, radians.
    pub th13: T,
    /// Atmospheric mixing angle, radians.
    pub th23: T,
    /// CP-violating phase, radians.
    pub deltacp: T,
    /// Baseline, km.
    pub baseline: T,
    /// Matter density, g/cm^3.
    pub rho: T,
}

impl OscParams<f64> {
    /// NuFit 5.2 best-fit values, normal ordering. Only baseline and density
    /// remain to be chosen.
    pub fn nufit52_no(baseline: f64, rho: f64) -> Self {
        Self {
            dmsq21: 7.42e-5,
            dmsq32: 2.4428e-3,
            th12: 0.307f64.sqrt().asin(),
            th13: 0.02203f64.sqrt().asin(),
            th23: 0.546f64.sqrt().asin(),
            deltacp: 1.36 * std::f64::consts::PI,
            baseline,
            rho,
        }
    }

    /// NuFit 5.2 best-fit values, inverted ordering.
    pub fn nufit52_io(baseline: f64, rho: f64) -> Self {
        Self {
            dmsq21: 7.42e-5,
            dmsq32: -2.5722e-3,
            th12: 0.307f64.sqrt().asin(),
            th13: 0.02219f64.sqrt().asin(),
            th23: 0.539f64.sqrt().asin(),
            deltacp: 1.56 * std::f64::consts::PI,
            baseline,
            rho,
        }
    }
}

impl<T: Scalar> OscParams<T> {
    /// Lifts a plain-number parameter set into another scalar type with all
    /// derivative parts zero. Seed individual fields afterwards to
    /// differentiate with respect to them.
    pub fn lift(params: &OscParams<f64>) -> Self {
        Self {
            dmsq21: T::from_f64(params.dmsq21),
            dmsq32: T::from_f64(params.dmsq32),
            th12: T::from_f64(params.th12),
            th13: T::from_f64(params.th13),
            th23: T::from_f64(params.th23),
            deltacp: T::from_f64(params.deltacp),
            baseline: T::from_f64(params.baseline),
            rho: T::from_f64(params.rho),
        }
    }
}
