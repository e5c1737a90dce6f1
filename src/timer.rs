//! Tick-source constants and timer configuration helpers.
//!
//! The decoder expects edge timestamps from a free-running 1 MHz, 16-bit
//! counter: 1 µs per tick, wrapping every 65 536 ticks. The counter's
//! overflow doubles as the silence timeout (~65 ms without an edge), so
//! no separate timeout hardware is needed.
//!
//! The helpers below derive the divider that turns a CPU clock into the
//! 1 MHz tick, for timers clocked at `f_cpu / prescaler`.
//!
//! Common configurations:
//!
//! | F_CPU  | PRESCALER | DIVIDER | Tick  |
//! |--------|-----------|---------|-------|
//! |  1 MHz |         1 |       1 |  1 µs |
//! |  8 MHz |         8 |       1 |  1 µs |
//! | 16 MHz |         8 |       2 |  1 µs |
//! | 16 MHz |         1 |      16 |  1 µs |

use libm::round;

/// Tick frequency the decoder's timestamps are measured in.
pub const TICK_HZ: u32 = 1_000_000;

/// One tick in microseconds.
pub const TICK_US: u32 = 1;

/// Ticks until the free-running 16-bit counter overflows: the silence
/// timeout.
pub const SILENCE_TIMEOUT_TICKS: u32 = 1 << 16;

/// The silence timeout in milliseconds (~65 ms).
pub const SILENCE_TIMEOUT_MS: f32 = SILENCE_TIMEOUT_TICKS as f32 / (TICK_HZ as f32 / 1_000.0);

/// Computes the counter divider yielding the 1 MHz tick (rounds to the
/// nearest integer).
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 1, 8, 64)
pub fn compute_timer_divider(f_cpu: u32, prescaler: u32) -> u16 {
    let ticks_per_second = f_cpu as f64 / prescaler as f64;
    round(ticks_per_second / TICK_HZ as f64) as u16
}

/// Compile-time counter divider calculator.
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 1, 8, 64)
pub const fn const_timer_divider(f_cpu: u32, prescaler: u32) -> u16 {
    let ticks_per_second = f_cpu / prescaler;
    ((ticks_per_second + TICK_HZ / 2) / TICK_HZ) as u16
}
