#![deny(missing_docs)]
#![doc = "Core traits and data types for the nuosc three-flavor oscillation engine."]

pub mod channel;
pub mod errors;
pub mod hash;
mod params;
mod scalar;

use ndarray::Array2;

pub use channel::{channel_index, ANTI_NU_E, ANTI_NU_MU, ANTI_NU_TAU, NU_E, NU_MU, NU_TAU};
pub use errors::{ErrorInfo, OscError};
pub use hash::{grid_fingerprint, params_fingerprint};
pub use params::OscParams;
pub use scalar::{Dual, Scalar};

/// Number of stored transition channels: 9 neutrino plus 9 antineutrino.
pub const NUM_CHANNELS: usize = 18;

/// Number of flavor-to-flavor channels within one particle block.
pub const NUM_FLAVOR_CHANNELS: usize = 9;

/// Contract for the external physics engine that produces raw transition
/// probabilities.
///
/// `energies` is the expanded array of length `2N`: the `N` requested
/// energies followed by their negations. A negative entry tags the same
/// energy magnitude as an antineutrino, which is the only convention the
/// engine knows about particle versus antiparticle.
///
/// The returned block must be `2N x 9`. Rows `0..N` hold neutrino-channel
/// probabilities, rows `N..2N` the antineutrino channels, with row `N + r`
/// aligned to the same energy as row `r`. Column `3 * j + i` holds the
/// `flavor i -> flavor j` probability, with flavors ordered e, mu, tau.
///
/// Matter density and baseline ride inside `params`. The engine is assumed
/// synchronous and side-effect-free; failures propagate unmodified to the
/// caller.
pub trait ProbabilityEngine<T: Scalar> {
    /// Computes the raw `2N x 9` probability block for the expanded energy
    /// array under the given parameter set.
    fn compute_all(&self, energies: &[f64], params: &OscParams<T>) -> Result<Array2<T>, OscError>;
}
