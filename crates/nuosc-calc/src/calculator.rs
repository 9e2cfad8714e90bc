//! The calculator facade: current parameters, a result cache, and the
//! engine handle.

use nuosc_core::{
    channel_index, ErrorInfo, OscError, OscParams, ProbabilityEngine, Scalar,
};

use crate::cache::ResultCache;

fn energy_not_cached(energy: f64, cached: usize) -> OscError {
    OscError::EnergyNotCached(
        ErrorInfo::new(
            "energy-not-cached",
            format!("energy {energy} is not present in the cached grid"),
        )
        .with_context("cached_energies", cached.to_string())
        .with_hint("warm the cache with a spectrum query covering the scan first"),
    )
}

/// Oscillation probability calculator with an exact-match result cache.
///
/// Queries check the cache against the current parameters and the requested
/// grid; a miss triggers one synchronous engine invocation that refills the
/// cache before the query is answered. Cloning yields a fully independent
/// calculator: parameters and cache are deep-copied, so mutating the clone
/// or refilling its cache never affects the original.
#[derive(Debug, Clone)]
pub struct OscCalculator<T: Scalar, E: ProbabilityEngine<T>> {
    params: OscParams<T>,
    engine: E,
    cache: ResultCache<T>,
}

impl<T: Scalar, E: ProbabilityEngine<T>> OscCalculator<T, E> {
    /// Creates a calculator with a cold cache.
    pub fn new(params: OscParams<T>, engine: E) -> Self {
        Self {
            params,
            engine,
            cache: ResultCache::new(),
        }
    }

    /// Transition probabilities for every energy in `energies`, in request
    /// order.
    ///
    /// Refills the cache with exactly `energies` unless it is already valid
    /// for the current parameters and this grid (same length, same order).
    pub fn probability_spectrum(
        &mut self,
        before: i32,
        after: i32,
        energies: &[f64],
    ) -> Result<Vec<T>, OscError> {
        let column = channel_index(before, after)?;
        if !self.cache.is_valid_for(&self.params, energies) {
            self.cache.refill(energies, &self.params, &self.engine)?;
        }
        Ok((0..energies.len())
            .map(|row| self.cache.probability(row, column))
            .collect())
    }

    /// Transition probability at a single energy.
    ///
    /// For plain scalars, a warm cache with matching parameters that
    /// already contains `energy` (exact match) answers directly. Otherwise
    /// the cache is refilled with the singleton grid `[energy]`, replacing
    /// any prior contents. Differentiable scalars skip the lookup
    /// unconditionally: a value taped during an earlier differentiation
    /// chain must not leak into a new one.
    pub fn probability(&mut self, before: i32, after: i32, energy: f64) -> Result<T, OscError> {
        let column = channel_index(before, after)?;
        if T::REUSES_POINT_CACHE && self.cache.matches_params(&self.params) {
            if let Some(row) = self.cache.position_of(energy) {
                return Ok(self.cache.probability(row, column));
            }
        }
        self.cache.refill(&[energy], &self.params, &self.engine)?;
        Ok(self.cache.probability(0, column))
    }

    /// Unchecked single-energy lookup against the currently stored grid.
    ///
    /// Skips all validity checks: the caller guarantees the cache is warm
    /// and valid for this energy under the current parameters, typically
    /// via a prior [`probability_spectrum`](Self::probability_spectrum)
    /// call covering a whole scan. Stale parameters are the caller's
    /// problem; an energy absent from the stored grid is not, and fails
    /// with [`OscError::EnergyNotCached`] instead of reading out of bounds.
    pub fn probability_cached(&self, before: i32, after: i32, energy: f64) -> Result<T, OscError> {
        let column = channel_index(before, after)?;
        let row = self
            .cache
            .position_of(energy)
            .ok_or_else(|| energy_not_cached(energy, self.cache.energies().len()))?;
        Ok(self.cache.probability(row, column))
    }

    /// The current parameter set.
    pub fn params(&self) -> &OscParams<T> {
        &self.params
    }

    /// Replaces the whole parameter set.
    pub fn set_params(&mut self, params: OscParams<T>) {
        self.params = params;
    }

    /// Read access to the result cache, for diagnostics and tests.
    pub fn cache(&self) -> &ResultCache<T> {
        &self.cache
    }

    /// The engine handle.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Solar mass-squared splitting, eV^2.
    pub fn dmsq21(&self) -> T {
        self.params.dmsq21
    }

    /// Sets the solar mass-squared splitting.
    pub fn set_dmsq21(&mut self, value: T) {
        self.params.dmsq21 = value;
    }

    /// Atmospheric mass-squared splitting, eV^2.
    pub fn dmsq32(&self) -> T {
        self.params.dmsq32
    }

    /// Sets the atmospheric mass-squared splitting.
    pub fn set_dmsq32(&mut self, value: T) {
        self.params.dmsq32 = value;
    }

    /// Solar mixing angle, radians.
    pub fn th12(&self) -> T {
        self.params.th12
    }

    /// Sets the solar mixing angle.
    pub fn set_th12(&mut self, value: T) {
        self.params.th12 = value;
    }

    /// Reactor mixing angle, radians.
    pub fn th13(&self) -> T {
        self.params.th13
    }

    /// Sets the reactor mixing angle.
    pub fn set_th13(&mut self, value: T) {
        self.params.th13 = value;
    }

    /// Atmospheric mixing angle, radians.
    pub fn th23(&self) -> T {
        self.params.th23
    }

    /// Sets the atmospheric mixing angle.
    pub fn set_th23(&mut self, value: T) {
        self.params.th23 = value;
    }

    /// CP-violating phase, radians.
    pub fn deltacp(&self) -> T {
        self.params.deltacp
    }

    /// Sets the CP-violating phase.
    pub fn set_deltacp(&mut self, value: T) {
        self.params.deltacp = value;
    }

    /// Baseline, km.
    pub fn baseline(&self) -> T {
        self.params.baseline
    }

    /// Sets the baseline.
    pub fn set_baseline(&mut self, value: T) {
        self.params.baseline = value;
    }

    /// Matter density, g/cm^3.
    pub fn rho(&self) -> T {
        self.params.rho
    }

    /// Sets the matter density.
    pub fn set_rho(&mut self, value: T) {
        self.params.rho = value;
    }
}
