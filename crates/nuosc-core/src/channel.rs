//! Signed flavor identifiers and the channel-to-column mapping.
//!
//! Columns within one particle block are arranged as
//! `ee, mue, taue, emu, mumu, taumu, etau, mutau, tautau`, i.e. flattened by
//! the after-flavor first. The antineutrino block occupies columns 9..18 in
//! the same layout.

use crate::errors::{ErrorInfo, OscError};

/// Electron neutrino.
pub const NU_E: i32 = 12;
/// Muon neutrino.
pub const NU_MU: i32 = 14;
/// Tau neutrino.
pub const NU_TAU: i32 = 16;
/// Electron antineutrino.
pub const ANTI_NU_E: i32 = -12;
/// Muon antineutrino.
pub const ANTI_NU_MU: i32 = -14;
/// Tau antineutrino.
pub const ANTI_NU_TAU: i32 = -16;

fn undefined_channel(before: i32, after: i32, offender: i32) -> OscError {
    OscError::UndefinedChannel(
        ErrorInfo::new(
            "undefined-channel",
            format!("flavor identifier {offender} does not name a neutrino species"),
        )
        .with_context("before", before.to_string())
        .with_context("after", after.to_string())
        .with_hint("flavor magnitudes must be one of 12 (e), 14 (mu), 16 (tau)"),
    )
}

fn flavor_offset(code: i32) -> Option<usize> {
    match code.abs() {
        12 => Some(0),
        14 => Some(1),
        16 => Some(2),
        _ => None,
    }
}

/// Maps a pair of signed flavor identifiers to a probability-matrix column
/// in `[0, 18)`.
///
/// Columns 0..9 hold neutrino-to-neutrino transitions, columns 9..18 the
/// antineutrino block; the sign of `before` alone selects the block, the
/// sign of `after` does not participate.
pub fn channel_index(before: i32, after: i32) -> Result<usize, OscError> {
    let i = flavor_offset(before).ok_or_else(|| undefined_channel(before, after, before))?;
    let j = flavor_offset(after).ok_or_else(|| undefined_channel(before, after, after))?;
    let anti_block = if before > 0 { 0 } else { 9 };
    Ok(anti_block + 3 * j + i)
}
