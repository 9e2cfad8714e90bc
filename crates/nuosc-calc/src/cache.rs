//! Last-result cache keyed on the exact parameter set and energy grid.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use nuosc_core::{
    grid_fingerprint, params_fingerprint, ErrorInfo, OscError, OscParams, ProbabilityEngine,
    Scalar, NUM_CHANNELS, NUM_FLAVOR_CHANNELS,
};

/// Diagnostic digest of the cache contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheFingerprint {
    /// Canonical hash of the cached parameter set.
    pub params: String,
    /// Canonical hash of the cached energy grid.
    pub grid: String,
    /// Refill counter at the time the fingerprint was taken.
    pub revision: u64,
}

/// Holds the most recent probability matrix together with the two keys that
/// produced it.
///
/// The cache is valid for a query `(P, E)` iff the stored parameter set
/// equals `P` exactly and the stored grid equals `E` element for element,
/// same length and same order. Matching is exact: any change forces a
/// recompute and nothing stale is ever reused.
#[derive(Debug, Clone)]
pub struct ResultCache<T: Scalar> {
    energies: Vec<f64>,
    expanded_energies: Vec<f64>,
    probabilities: Array2<T>,
    parameters: Option<OscParams<T>>,
    revision: u64,
}

fn empty_matrix<T: Scalar>() -> Array2<T> {
    Array2::from_shape_fn((0, NUM_CHANNELS), |_| T::from_f64(0.0))
}

fn block_shape_error(expected_rows: usize, got: (usize, usize)) -> OscError {
    OscError::Engine(
        ErrorInfo::new(
            "block-shape",
            "engine returned a probability block of the wrong shape",
        )
        .with_context("expected", format!("{expected_rows}x{NUM_FLAVOR_CHANNELS}"))
        .with_context("got", format!("{}x{}", got.0, got.1)),
    )
}

impl<T: Scalar> Default for ResultCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> ResultCache<T> {
    /// Creates an empty cache: zero rows, no parameters, revision zero.
    pub fn new() -> Self {
        Self {
            energies: Vec::new(),
            expanded_energies: Vec::new(),
            probabilities: empty_matrix(),
            parameters: None,
            revision: 0,
        }
    }

    /// Whether a refill has ever happened.
    pub fn is_warm(&self) -> bool {
        self.parameters.is_some()
    }

    /// Whether the cached parameter set equals `params` exactly.
    pub fn matches_params(&self, params: &OscParams<T>) -> bool {
        self.parameters.as_ref() == Some(params)
    }

    /// Whether the cache can answer a query for `(params, energies)`.
    pub fn is_valid_for(&self, params: &OscParams<T>, energies: &[f64]) -> bool {
        self.matches_params(params) && self.energies == energies
    }

    /// Position of `energy` in the stored grid, first exact match.
    pub fn position_of(&self, energy: f64) -> Option<usize> {
        self.energies.iter().position(|&cached| cached == energy)
    }

    /// The stored probability at the given row and channel column.
    ///
    /// Indices come from [`position_of`](Self::position_of) and
    /// [`channel_index`](nuosc_core::channel_index); anything else is a
    /// logic error and panics like any out-of-bounds matrix access.
    pub fn probability(&self, row: usize, column: usize) -> T {
        self.probabilities[[row, column]]
    }

    /// The stored energy grid, in request order.
    pub fn energies(&self) -> &[f64] {
        &self.energies
    }

    /// The expanded grid handed to the engine: the stored energies followed
    /// by their negations.
    pub fn expanded_energies(&self) -> &[f64] {
        &self.expanded_energies
    }

    /// Number of refills so far. Observability only; staleness checks never
    /// consult it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Diagnostic fingerprint of the cached keys, if warm.
    pub fn fingerprint(&self) -> Option<CacheFingerprint> {
        self.parameters.as_ref().map(|params| CacheFingerprint {
            params: params_fingerprint(params),
            grid: grid_fingerprint(&self.energies),
            revision: self.revision,
        })
    }

    /// Recomputes the cache for `(energies, params)`, fully overwriting any
    /// prior contents.
    ///
    /// The engine sees the expanded array and answers with a `2N x 9`
    /// block; rows `N..2N` are the antineutrino channels, row-aligned with
    /// rows `0..N`. The block is reshaped into the stored `N x 18` matrix
    /// by copying both halves into a freshly allocated buffer, so the
    /// stored matrix never aliases the engine's output.
    pub fn refill<E: ProbabilityEngine<T>>(
        &mut self,
        energies: &[f64],
        params: &OscParams<T>,
        engine: &E,
    ) -> Result<(), OscError> {
        let n = energies.len();
        let mut expanded = Vec::with_capacity(2 * n);
        expanded.extend_from_slice(energies);
        expanded.extend(energies.iter().map(|&energy| -energy));

        let block = engine.compute_all(&expanded, params)?;
        if block.dim() != (2 * n, NUM_FLAVOR_CHANNELS) {
            return Err(block_shape_error(2 * n, block.dim()));
        }

        self.probabilities = Array2::from_shape_fn((n, NUM_CHANNELS), |(row, col)| {
            if col < NUM_FLAVOR_CHANNELS {
                block[[row, col]]
            } else {
                block[[n + row, col - NUM_FLAVOR_CHANNELS]]
            }
        });
        self.energies = energies.to_vec();
        self.expanded_energies = expanded;
        self.parameters = Some(*params);
        self.revision += 1;
        Ok(())
    }
}
