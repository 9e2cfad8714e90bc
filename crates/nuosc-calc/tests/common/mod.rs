use std::cell::Cell;
use std::rc::Rc;

use ndarray::Array2;
use nuosc_core::{OscError, OscParams, ProbabilityEngine, Scalar};

/// Deterministic engine stand-in that counts invocations.
///
/// Cell values depend on the signed energy, the column, and two parameter
/// fields, so reshape bugs and missed invalidations surface as value
/// mismatches rather than silently passing.
#[derive(Debug, Clone)]
pub struct CountingEngine {
    calls: Rc<Cell<usize>>,
}

impl CountingEngine {
    pub fn new() -> Self {
        Self {
            calls: Rc::new(Cell::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<T: Scalar> ProbabilityEngine<T> for CountingEngine {
    fn compute_all(&self, energies: &[f64], params: &OscParams<T>) -> Result<Array2<T>, OscError> {
        self.calls.set(self.calls.get() + 1);
        Ok(Array2::from_shape_fn((energies.len(), 9), |(row, col)| {
            T::from_f64(energies[row]) * params.th13
                + T::from_f64((col + 1) as f64) * params.dmsq21
        }))
    }
}
