//! Edge-driven assembly of 24-bit remote-control frames.
//!
//! The hardware edge detector reports every transition of the receiver
//! output together with a 1 MHz, 16-bit timestamp. [`FrameAssembler`]
//! turns that stream into complete codes: a falling edge closes the
//! carrier-on half-period, a rising edge closes the carrier-off
//! half-period and classifies the pair (see [`crate::pulse`]), and 24
//! classified bits make a frame.
//!
//! A frame begins with the preamble gap. The first rising edge out of idle
//! only arms the candidate; the *next* complete pulse is the one checked
//! against the preamble window, which also zeroes the code buffer. Any
//! invalid pulse abandons the frame and the assembler falls back to idle,
//! waiting for a fresh preamble.
//!
//! The assembler holds no notion of wall-clock time beyond the timestamps
//! it is handed; timestamp arithmetic wraps, matching the 16-bit hardware
//! counter. The ~65 ms silence timeout is delivered separately through
//! [`FrameAssembler::timer_overflow`].

use crate::consts::{CODE_LEN, FRAME_BITS};
use crate::pulse::{Pulse, classify};

/// Decoding state of the assembler between edges.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum FrameState {
    /// No frame in progress. The next rising edge arms a preamble
    /// candidate.
    #[default]
    Idle,
    /// A candidate frame opened; the next complete pulse is checked
    /// against the preamble window.
    Preamble,
    /// Preamble accepted; accumulating data bits. The payload is the index
    /// of the bit the next pulse will decide (0..=23).
    Counting(u8),
}

/// Reconstructs 3-byte codes from timestamped edge events.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    state: FrameState,
    /// Timestamp of the most recent edge, for wrapping interval math.
    last_edge: u16,
    /// Carrier-on duration recorded at the last falling edge.
    high: u16,
    code: [u8; CODE_LEN],
}

impl FrameAssembler {
    /// Creates an idle assembler.
    pub const fn new() -> Self {
        Self {
            state: FrameState::Idle,
            last_edge: 0,
            high: 0,
            code: [0; CODE_LEN],
        }
    }

    /// Current decoding state.
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Feeds one edge event. `level` is the receiver pin state after the
    /// transition (`true` = rising), `now` a 1 MHz tick count that wraps
    /// at 16 bits.
    ///
    /// Returns the completed code when this edge finishes the 24th bit;
    /// the assembler is back in [`FrameState::Idle`] afterwards.
    pub fn pin_changed(&mut self, level: bool, now: u16) -> Option<[u8; CODE_LEN]> {
        let elapsed = now.wrapping_sub(self.last_edge);
        self.last_edge = now;
        if !level {
            // Falling edge closes the carrier-on half-period only.
            self.high = elapsed;
            return None;
        }
        let low = elapsed;
        match self.state {
            FrameState::Idle => {
                self.state = FrameState::Preamble;
                None
            }
            FrameState::Preamble => {
                if classify(self.high, low) == Pulse::Preamble {
                    self.code = [0; CODE_LEN];
                    self.state = FrameState::Counting(0);
                } else {
                    self.state = FrameState::Idle;
                }
                None
            }
            FrameState::Counting(bit) => {
                match classify(self.high, low) {
                    // Bit 0 is the MSB of byte 0; the buffer was zeroed at
                    // the preamble, so zeros need no write.
                    Pulse::One => self.code[(bit / 8) as usize] |= 1 << (7 - bit % 8),
                    Pulse::Zero => {}
                    Pulse::Preamble | Pulse::Invalid => {
                        self.state = FrameState::Idle;
                        return None;
                    }
                }
                if bit + 1 == FRAME_BITS {
                    self.state = FrameState::Idle;
                    #[cfg(feature = "log")]
                    log::trace!("frame complete: {:02x?}", self.code);
                    Some(self.code)
                } else {
                    self.state = FrameState::Counting(bit + 1);
                    None
                }
            }
        }
    }

    /// Handles the silence timeout: after ~65 ms without an edge the
    /// 16-bit timer overflows and any in-progress frame is abandoned.
    ///
    /// With a live receiver attached this is effectively unreachable
    /// (ambient RF noise keeps edges coming); it recovers from a
    /// transmitter going quiet mid-frame.
    pub fn timer_overflow(&mut self) {
        self.state = FrameState::Idle;
    }
}
