//! Canonical fingerprints for parameter sets and energy grids.
//!
//! Fingerprints are diagnostics and provenance labels only. Staleness
//! checks compare the values themselves, never these digests.

use sha2::{Digest, Sha256};

use crate::params::OscParams;
use crate::scalar::Scalar;

fn hex_digest(hasher: Sha256) -> String {
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
}

/// Computes the canonical hash of a parameter set over the little-endian
/// bit patterns of the primal values, in field order.
pub fn params_fingerprint<T: Scalar>(params: &OscParams<T>) -> String {
    let fields = [
        params.dmsq21,
        params.dmsq32,
        params.th12,
        params.th13,
        params.th23,
        params.deltacp,
        params.baseline,
        params.rho,
    ];
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update(field.value().to_bits().to_le_bytes());
    }
    hex_digest(hasher)
}

/// Computes the canonical hash of an energy grid. Order-sensitive: the grid
/// indexes matrix rows, so a reordering is a different grid.
pub fn grid_fingerprint(energies: &[f64]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((energies.len() as u64).to_le_bytes());
    for &energy in energies {
        hasher.update(energy.to_bits().to_le_bytes());
    }
    hex_digest(hasher)
}
