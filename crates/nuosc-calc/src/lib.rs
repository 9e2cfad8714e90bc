//! Exact-match probability cache and the calculator facade over a
//! [`ProbabilityEngine`](nuosc_core::ProbabilityEngine).
//!
//! A calculator exclusively owns its mutable state and is not safe for
//! concurrent use. Callers needing parallelism clone one calculator per
//! thread.

pub mod cache;
pub mod calculator;

pub use cache::{CacheFingerprint, ResultCache};
pub use calculator::OscCalculator;
