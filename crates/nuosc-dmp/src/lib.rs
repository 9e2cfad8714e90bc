//! Constant-density three-flavor oscillation probabilities in the
//! Denton-Minakata-Parke (DMP) approximation, generic over the scalar type.

pub mod engine;

pub use engine::DmpEngine;
