//! Constants shared across the decoder and the persistent code table.
//!
//! These values describe the fixed 24-bit frame geometry used by common
//! ASK keyfob transmitters (EV1527-style learning-code units and the older
//! fix-code units), the pulse-ratio windows the classifier accepts, and the
//! layout of a code-table slot.
//!
//! ## Key Concepts
//!
//! - **Ratio windows**: bits and preambles are recognized from the ratio of
//!   the two half-periods of a pulse, not from absolute durations, so the
//!   same windows work across transmitter oscillator tolerances.
//! - **Slot layout**: a saved code is exactly [`SLOT_LEN`] bytes; the third
//!   byte doubles as the occupancy marker, [`EMPTY_SLOT`] meaning free.
//! - **Auto-detect nibbles**: during pairing, the key the operator presses
//!   reveals the remote type by its low data nibble.

/// Number of data bits in one remote-control frame.
pub const FRAME_BITS: u8 = 24;

/// Number of bytes in one decoded code ([`FRAME_BITS`] / 8).
pub const CODE_LEN: usize = 3;

/// Size of one code-table slot in bytes. Identical to [`CODE_LEN`]; a slot
/// stores the two id bytes plus the type/mask byte.
pub const SLOT_LEN: u16 = 3;

/// Sentinel marking a free slot: the third byte of an empty slot reads as
/// all ones (erased EEPROM). Occupancy is decided by this byte alone.
pub const EMPTY_SLOT: u8 = 0xFF;

/// Type/mask byte stored for a fix-code remote. Bit 0 set marks the
/// fix-code type; the rest of the byte is unused for that type.
pub const FIX_CODE_TYPE: u8 = 1;

/// Lower exclusive bound of the one/zero bit ratio window. A half-period
/// pair encodes a bit only when the long side is strictly more than twice
/// the short side.
pub const BIT_RATIO_MIN: u16 = 2;

/// Upper exclusive bound of the one/zero bit ratio window. Nominal
/// transmitters sit near 3x; anything at or past 4x is noise.
pub const BIT_RATIO_MAX: u16 = 4;

/// Lower exclusive bound of the preamble ratio window. The preamble gap is
/// nominally 31 highs long; accept strictly above 27x.
pub const PREAMBLE_RATIO_MIN: u16 = 27;

/// Upper exclusive bound of the preamble ratio window (strictly below 33x).
pub const PREAMBLE_RATIO_MAX: u16 = 33;

/// Low data nibble observed when key "1" of a learning-code remote is
/// pressed. Used by the auto-detect save path.
pub const LEARNING_CODE_KEY1: u8 = 0b0001;

/// Low data nibble observed when key "A" of a fix-code remote is pressed.
/// Used by the auto-detect save path.
pub const FIX_CODE_KEY_A: u8 = 0b0011;

/// Upper-nibble mask applied to the third byte when saving a learning-code
/// remote: the key nibble is stripped so any key of the unit matches.
pub const LEARNING_CODE_MASK: u8 = 0xF0;
