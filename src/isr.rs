//! Interrupt-context plumbing for the decoder singleton.
//!
//! The edge-change and timer-overflow interrupts and the application's
//! polling loop all touch the same [`AskDecoder`]. Wrapping the decoder
//! in a `critical_section::Mutex<RefCell<...>>` serializes the two
//! contexts, which is what makes the mailbox's read-modify-write of the
//! presence flag atomic: every multi-step access happens with the edge
//! source masked.
//!
//! ## Example
//! ```rust,ignore
//! use askrmt::{ask_edge, ask_silence, init_ask_decoder};
//!
//! init_ask_decoder!(Eeprom);
//!
//! #[interrupt]
//! fn INT0() {
//!     ask_edge!(rf_pin_level(), timer_ticks());
//! }
//!
//! #[interrupt]
//! fn TIMER1_OVF() {
//!     ask_silence!();
//! }
//! ```

use crate::decoder::AskDecoder;
use crate::store::CodeMemory;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::InputPin;

/// Initializes an empty global decoder cell for use with
/// `critical_section`.
///
/// # Example
/// ```rust,ignore
/// static DECODER: Mutex<RefCell<Option<AskDecoder<Eeprom>>>> =
///     global_decoder_init::<Eeprom>();
/// ```
pub const fn global_decoder_init<M: CodeMemory>() -> Mutex<RefCell<Option<AskDecoder<M>>>> {
    Mutex::new(RefCell::new(None))
}

/// Stores a constructed decoder into the global cell. Call once from
/// `main()` before enabling the edge interrupt.
pub fn global_decoder_setup<M: CodeMemory>(
    global: &'static Mutex<RefCell<Option<AskDecoder<M>>>>,
    decoder: AskDecoder<M>,
) {
    critical_section::with(|cs| {
        let _ = global.borrow(cs).replace(Some(decoder));
    });
}

/// Forwards one edge event to the global decoder. Call from the
/// pin-change ISR with the post-transition pin level and the 1 MHz tick
/// count.
pub fn global_pin_change<M: CodeMemory>(
    global: &'static Mutex<RefCell<Option<AskDecoder<M>>>>,
    level: bool,
    now: u16,
) {
    critical_section::with(|cs| {
        if let Some(decoder) = global.borrow(cs).borrow_mut().as_mut() {
            decoder.pin_changed(level, now);
        }
    });
}

/// Like [`global_pin_change`], sampling the level from the receiver pin
/// inside the critical section.
pub fn global_pin_change_from<M: CodeMemory, P: InputPin>(
    global: &'static Mutex<RefCell<Option<AskDecoder<M>>>>,
    pin: &mut P,
    now: u16,
) {
    critical_section::with(|cs| {
        if let Some(decoder) = global.borrow(cs).borrow_mut().as_mut() {
            decoder.pin_changed_from(pin, now);
        }
    });
}

/// Forwards the silence timeout to the global decoder. Call from the
/// timer-overflow ISR.
pub fn global_timer_overflow<M: CodeMemory>(
    global: &'static Mutex<RefCell<Option<AskDecoder<M>>>>,
) {
    critical_section::with(|cs| {
        if let Some(decoder) = global.borrow(cs).borrow_mut().as_mut() {
            decoder.timer_overflow();
        }
    });
}

/// Runs a closure against the global decoder from the polling context,
/// with the edge source masked for the closure's whole duration.
///
/// # Example
/// ```rust,ignore
/// let key = with_ask_decoder(&DECODER, |dec| dec.pick_key_if_saved());
/// ```
pub fn with_ask_decoder<M: CodeMemory, R>(
    global: &'static Mutex<RefCell<Option<AskDecoder<M>>>>,
    f: impl FnOnce(&mut AskDecoder<M>) -> R,
) -> Option<R> {
    critical_section::with(|cs| global.borrow(cs).borrow_mut().as_mut().map(f))
}

/// Declares the static `ASK_DECODER` singleton protected by a
/// `critical_section` mutex.
///
/// # Arguments
/// - `$mem`: the concrete [`CodeMemory`] type backing the code table
#[macro_export]
macro_rules! init_ask_decoder {
    ( $mem:ty ) => {
        pub static ASK_DECODER: $crate::critical_section::Mutex<
            core::cell::RefCell<Option<$crate::decoder::AskDecoder<$mem>>>,
        > = $crate::critical_section::Mutex::new(core::cell::RefCell::new(None));
    };
}

/// Forwards an edge event to the `ASK_DECODER` singleton declared by
/// [`init_ask_decoder!`]. Safe to call before setup; it silently does
/// nothing while the cell is empty.
#[macro_export]
macro_rules! ask_edge {
    ( $level:expr, $now:expr ) => {
        $crate::isr::global_pin_change(&ASK_DECODER, $level, $now);
    };
}

/// Forwards the silence timeout to the `ASK_DECODER` singleton declared
/// by [`init_ask_decoder!`].
#[macro_export]
macro_rules! ask_silence {
    () => {
        $crate::isr::global_timer_overflow(&ASK_DECODER);
    };
}
