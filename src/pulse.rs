//! Ratio-based classification of ASK pulse half-periods.
//!
//! A remote-control frame is a train of pulses, each made of a carrier-on
//! ("high") half-period followed by a carrier-off ("low") half-period. The
//! information is carried entirely by the *ratio* of the two durations:
//!
//! - a logical `1` keeps the carrier on about three times as long as off,
//! - a logical `0` keeps it off about three times as long as on,
//! - the preamble keeps it off about thirty-one times as long as on.
//!
//! Classifying by ratio rather than absolute time makes the decoder immune
//! to transmitter oscillator spread and receiver jitter; a noise burst that
//! lands outside every window rejects the whole frame.
//!
//! All window bounds are strict: a pair sitting exactly on a boundary
//! (2x, 4x, 27x, 33x) is [`Pulse::Invalid`].

use crate::consts::{BIT_RATIO_MAX, BIT_RATIO_MIN, PREAMBLE_RATIO_MAX, PREAMBLE_RATIO_MIN};

/// Outcome of classifying one high/low half-period pair.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Pulse {
    /// The long carrier-off gap that opens a frame (27x..33x exclusive).
    Preamble,
    /// A logical one: carrier on 2x..4x (exclusive) longer than off.
    One,
    /// A logical zero: carrier off 2x..4x (exclusive) longer than on.
    Zero,
    /// No window matched; the surrounding frame must be discarded.
    Invalid,
}

/// Classifies a half-period pair by its duration ratio.
///
/// Durations are 1 MHz timer ticks. Comparisons are widened to `u32`, so a
/// `u16` duration multiplied by a window bound cannot wrap. Zero-length
/// half-periods never match a window and classify as [`Pulse::Invalid`].
pub fn classify(high: u16, low: u16) -> Pulse {
    let high = high as u32;
    let low = low as u32;
    if low > high * PREAMBLE_RATIO_MIN as u32 && low < high * PREAMBLE_RATIO_MAX as u32 {
        Pulse::Preamble
    } else if high > low * BIT_RATIO_MIN as u32 && high < low * BIT_RATIO_MAX as u32 {
        Pulse::One
    } else if low > high * BIT_RATIO_MIN as u32 && low < high * BIT_RATIO_MAX as u32 {
        Pulse::Zero
    } else {
        Pulse::Invalid
    }
}
