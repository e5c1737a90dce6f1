//! # askrmt
//!
//! A portable, no_std Rust decoder for ASK/OOK RF remote controls, built
//! for the cheap 433 MHz receiver modules (XY-MK-5V and friends) paired
//! with fix-code or EV1527-style learning-code keyfobs.
//!
//! This driver implements the receive side entirely in software using:
//! - `embedded-hal` traits for digital I/O at the receiver pin
//! - edge-to-edge interval ratios for bit recovery (no sampling PLL; the
//!   hardware edge detector and a free-running 1 MHz timer do the work)
//! - interrupt-safe decoder access with `critical-section`
//! - an EEPROM-backed code table for pairing known remotes
//!
//! ## Crate features
//! | Feature              | Description |
//! |----------------------|-------------|
//! | `std`                | Disables `#![no_std]` support and replaces `heapless::Vec`s with `std::vec::Vec`s |
//! | `edge-isr` (default) | Enables the `critical_section` decoder singleton and ISR glue |
//! | `defmt-0-3`          | Uses `defmt` logging |
//! | `log`                | Uses `log` logging |
//!
//! ## Software Features
//!
//! - **24-bit frame decoding** from timestamped edge events: preamble
//!   detection, ratio-window bit classification, noise rejection
//! - **Single-slot mailbox** with deliberate back-pressure: the receiver
//!   stays deaf until the last code is consumed or discarded
//! - **Persistent code table** over any byte-addressable memory: first-fit
//!   3-byte slots, fix-code and learning-code matching, auto-detect pairing
//! - **Auto-discard policy** so applications only ever see paired remotes
//!
//! ## Usage
//!
//! ```rust
//! use askrmt::decoder::AskDecoder;
//! use askrmt::store::{CodeTable, StorageMode};
//!
//! // Any CodeMemory works; a RAM array stands in for the EEPROM here.
//! let table = CodeTable::new([0xFF; 60], 0, 60, StorageMode::RemoteControls)
//!     .expect("range holds 20 slots");
//! let mut decoder = AskDecoder::new(table);
//!
//! // Edge ISR: decoder.pin_changed(level, ticks);
//! // Timer-overflow ISR: decoder.timer_overflow();
//!
//! if let Some(key) = decoder.pick_key_if_saved() {
//!     // a paired remote pressed `key`
//!     # let _ = key;
//! }
//! ```
//!
//! For interrupt-driven targets, wrap the decoder in the
//! [`isr`](crate::isr) globals instead of owning it directly.
//!
//! ## Integration Notes
//!
//! - Timestamps are 1 MHz (1 µs/tick), 16-bit, wrapping; feed the counter
//!   value captured at the edge, see [`timer`](crate::timer) for deriving
//!   the divider from your CPU clock
//! - The timer overflow (~65 ms of silence) must be forwarded as the
//!   frame-abandon event; with a live receiver attached it fires only when
//!   a transmitter dies mid-frame
//! - Disable [`auto discard`](decoder::AskDecoder::set_auto_discard)
//!   before running any pairing (save) workflow
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded
//! environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "edge-isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod consts;
pub mod decoder;
pub mod frame;
#[cfg(feature = "edge-isr")]
pub mod isr;
pub mod mailbox;
pub mod pulse;
pub mod store;
pub mod timer;
