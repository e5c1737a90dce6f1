//! Persistent code table over byte-addressable non-volatile memory.
//!
//! Saved remotes live in a configured contiguous address range, carved
//! into fixed 3-byte slots: two id bytes plus a type/mask byte. A slot is
//! free exactly when its third byte reads [`EMPTY_SLOT`] (erased EEPROM),
//! so occupancy needs no separate bookkeeping and deletion is a single
//! byte write. Inserts are first-fit; deleted slots stay in place and get
//! reused, which can fragment the table but never affects matching.
//!
//! The table runs in one of two [`StorageMode`]s, chosen at construction:
//!
//! - [`StorageMode::RemoteControls`] pairs whole transmitters. A
//!   learning-code record stores the per-unit mask (upper nibble of the
//!   third byte) so every key of the unit matches; a fix-code record
//!   stores [`FIX_CODE_TYPE`] and matches on the id bytes alone.
//! - [`StorageMode::KeyCodes`] pairs individual key presses, storing and
//!   matching all three bytes verbatim.
//!
//! The memory itself sits behind the [`CodeMemory`] trait so the same
//! table drives an MCU EEPROM peripheral, an external I2C EEPROM, or a
//! plain RAM array in tests and host tooling.

use crate::consts::{
    CODE_LEN, EMPTY_SLOT, FIX_CODE_KEY_A, FIX_CODE_TYPE, LEARNING_CODE_KEY1, LEARNING_CODE_MASK,
    SLOT_LEN,
};
use thiserror::Error;

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Byte-addressable non-volatile memory backing the code table.
///
/// Addresses are absolute within the device; the table only touches its
/// configured `start..end` range. Implementations may panic on addresses
/// outside the device, so the range handed to [`CodeTable::new`] must fit
/// the part.
pub trait CodeMemory {
    /// Reads one byte.
    fn read(&mut self, addr: u16) -> u8;
    /// Writes one byte.
    fn write(&mut self, addr: u16, value: u8);
}

/// RAM arrays act as memory directly, for tests and host-side tools.
impl<const N: usize> CodeMemory for [u8; N] {
    fn read(&mut self, addr: u16) -> u8 {
        self[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self[addr as usize] = value;
    }
}

/// What the table pairs against: whole remotes or single key codes.
///
/// The two modes are mutually exclusive for a given address range; the
/// choice is fixed at construction (the stored layouts are not
/// compatible).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum StorageMode {
    /// Match any key of a saved transmitter.
    RemoteControls,
    /// Match one exact 3-byte code per slot.
    KeyCodes,
}

/// Recoverable failures of table operations. Nothing here is fatal; every
/// failure means "the operation did not happen".
#[derive(Error, PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum StoreError {
    /// No free slot left for an insert.
    #[error("no free slot in the code table")]
    Full,
    /// No record matched the given code.
    #[error("no matching record in the code table")]
    NotFound,
    /// Slot index past the configured range.
    #[error("slot index outside the configured range")]
    OutOfRange,
    /// Auto-detect insert saw a key nibble that identifies neither remote
    /// type; the operator must press key "1" or key "A".
    #[error("pressed key does not identify the remote type")]
    AmbiguousKey,
    /// Operation not available in the configured [`StorageMode`].
    #[error("operation is not available in this storage mode")]
    WrongMode,
    /// Configured address range does not hold a whole slot.
    #[error("address range does not hold a whole slot")]
    BadRange,
}

/// One occupied slot, as stored.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct CodeRecord {
    /// Raw slot bytes: id high, id low, type/mask.
    pub bytes: [u8; CODE_LEN],
}

impl CodeRecord {
    /// Whether the record describes a fix-code remote (bit 0 of the third
    /// byte).
    pub fn is_fix_code(&self) -> bool {
        self.bytes[2] & FIX_CODE_TYPE != 0
    }

    /// The stored key-independent mask (meaningful for learning-code
    /// records).
    pub fn mask(&self) -> u8 {
        self.bytes[2] & LEARNING_CODE_MASK
    }
}

/// A successful lookup: which slot matched and the remote type it stored.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct SlotMatch {
    /// Slot index within the configured range.
    pub index: u16,
    /// Whether the matching record is a fix-code remote.
    pub fix_code: bool,
}

/// Fixed-capacity code table over a [`CodeMemory`] range.
#[derive(Debug)]
pub struct CodeTable<M: CodeMemory> {
    mem: M,
    start: u16,
    /// Exclusive end of the range; trailing bytes short of a whole slot
    /// are never touched.
    end: u16,
    mode: StorageMode,
}

impl<M: CodeMemory> CodeTable<M> {
    /// Creates a table over `start..end` (end exclusive) of `mem`.
    ///
    /// Fails with [`StoreError::BadRange`] unless the range holds at least
    /// one whole 3-byte slot.
    pub fn new(mem: M, start: u16, end: u16, mode: StorageMode) -> Result<Self, StoreError> {
        if end <= start || end - start < SLOT_LEN {
            return Err(StoreError::BadRange);
        }
        Ok(Self {
            mem,
            start,
            end,
            mode,
        })
    }

    /// Number of slots in the configured range.
    pub fn capacity(&self) -> u16 {
        (self.end - self.start) / SLOT_LEN
    }

    /// The storage mode fixed at construction.
    pub fn mode(&self) -> StorageMode {
        self.mode
    }

    /// Direct access to the backing memory. The table keeps no state
    /// outside the memory itself, so raw access cannot desynchronize it.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.mem
    }

    /// Consumes the table and hands the memory device back.
    pub fn into_memory(self) -> M {
        self.mem
    }

    fn slot_addr(&self, index: u16) -> Result<u16, StoreError> {
        if index >= self.capacity() {
            return Err(StoreError::OutOfRange);
        }
        Ok(self.start + index * SLOT_LEN)
    }

    /// Linear scan for the first record matching `code`.
    ///
    /// In remote-controls mode the id bytes must match; a fix-code record
    /// then matches regardless of the third byte, a learning-code record
    /// requires the stored mask to equal the code's upper nibble. In
    /// key-codes mode all three bytes must match exactly.
    pub fn find(&mut self, code: &[u8; CODE_LEN]) -> Option<SlotMatch> {
        for index in 0..self.capacity() {
            let addr = self.start + index * SLOT_LEN;
            let tm = self.mem.read(addr + 2);
            if tm == EMPTY_SLOT {
                continue;
            }
            match self.mode {
                StorageMode::RemoteControls => {
                    if self.mem.read(addr) != code[0] || self.mem.read(addr + 1) != code[1] {
                        continue;
                    }
                    let fix_code = tm & FIX_CODE_TYPE != 0;
                    if fix_code || tm == code[2] & LEARNING_CODE_MASK {
                        return Some(SlotMatch { index, fix_code });
                    }
                }
                StorageMode::KeyCodes => {
                    if tm == code[2]
                        && self.mem.read(addr) == code[0]
                        && self.mem.read(addr + 1) == code[1]
                    {
                        return Some(SlotMatch {
                            index,
                            fix_code: false,
                        });
                    }
                }
            }
        }
        None
    }

    /// First-fit insert of `code`. Returns the slot index used.
    ///
    /// In remote-controls mode the third byte is reduced to its stored
    /// form ([`FIX_CODE_TYPE`] or the upper-nibble mask, per `fix_code`);
    /// in key-codes mode the code is stored verbatim and `fix_code` is
    /// ignored. The table does not deduplicate; callers that care run
    /// [`find`](CodeTable::find) first.
    pub fn insert(&mut self, code: &[u8; CODE_LEN], fix_code: bool) -> Result<u16, StoreError> {
        for index in 0..self.capacity() {
            let addr = self.start + index * SLOT_LEN;
            if self.mem.read(addr + 2) != EMPTY_SLOT {
                continue;
            }
            self.mem.write(addr, code[0]);
            self.mem.write(addr + 1, code[1]);
            let tm = match self.mode {
                StorageMode::RemoteControls => {
                    if fix_code {
                        FIX_CODE_TYPE
                    } else {
                        code[2] & LEARNING_CODE_MASK
                    }
                }
                StorageMode::KeyCodes => code[2],
            };
            self.mem.write(addr + 2, tm);
            return Ok(index);
        }
        Err(StoreError::Full)
    }

    /// Insert with the remote type inferred from the pressed key.
    ///
    /// During pairing the operator presses the designated key; its low
    /// data nibble identifies the type ([`LEARNING_CODE_KEY1`] for
    /// learning-code, [`FIX_CODE_KEY_A`] for fix-code). Any other nibble
    /// fails with [`StoreError::AmbiguousKey`] and leaves the table
    /// untouched. Remote-controls mode only.
    pub fn insert_auto(&mut self, code: &[u8; CODE_LEN]) -> Result<u16, StoreError> {
        if self.mode != StorageMode::RemoteControls {
            return Err(StoreError::WrongMode);
        }
        match code[2] & 0x0F {
            LEARNING_CODE_KEY1 => self.insert(code, false),
            FIX_CODE_KEY_A => self.insert(code, true),
            _ => Err(StoreError::AmbiguousKey),
        }
    }

    /// Frees the slot at `index` by sentinel-overwriting its third byte.
    pub fn delete_at(&mut self, index: u16) -> Result<(), StoreError> {
        let addr = self.slot_addr(index)?;
        self.mem.write(addr + 2, EMPTY_SLOT);
        Ok(())
    }

    /// Deletes the first record matching `code`, reporting whether an id
    /// match was found.
    ///
    /// In remote-controls mode the scan stops at the first id match; the
    /// slot is freed when the record is fix-code or its mask equals the
    /// code's upper nibble. In key-codes mode the two id bytes decide the
    /// match.
    pub fn delete_by_code(&mut self, code: &[u8; CODE_LEN]) -> Result<(), StoreError> {
        for index in 0..self.capacity() {
            let addr = self.start + index * SLOT_LEN;
            let tm = self.mem.read(addr + 2);
            if tm == EMPTY_SLOT {
                continue;
            }
            if self.mem.read(addr) != code[0] || self.mem.read(addr + 1) != code[1] {
                continue;
            }
            match self.mode {
                StorageMode::RemoteControls => {
                    if tm & FIX_CODE_TYPE != 0 || tm == code[2] & LEARNING_CODE_MASK {
                        self.mem.write(addr + 2, EMPTY_SLOT);
                    }
                }
                StorageMode::KeyCodes => {
                    self.mem.write(addr + 2, EMPTY_SLOT);
                }
            }
            return Ok(());
        }
        Err(StoreError::NotFound)
    }

    /// Sentinel-fills every occupied slot. Already-free slots are skipped
    /// to save EEPROM write cycles.
    pub fn delete_all(&mut self) {
        for index in 0..self.capacity() {
            let addr = self.start + index * SLOT_LEN;
            if self.mem.read(addr + 2) != EMPTY_SLOT {
                self.mem.write(addr + 2, EMPTY_SLOT);
            }
        }
    }

    /// Direct slot read by position: `Ok(None)` for a free slot,
    /// [`StoreError::OutOfRange`] past the configured range.
    pub fn get(&mut self, index: u16) -> Result<Option<CodeRecord>, StoreError> {
        let addr = self.slot_addr(index)?;
        let bytes = [
            self.mem.read(addr),
            self.mem.read(addr + 1),
            self.mem.read(addr + 2),
        ];
        if bytes[2] == EMPTY_SLOT {
            return Ok(None);
        }
        Ok(Some(CodeRecord { bytes }))
    }

    /// Collects every occupied slot, in table order. `N` bounds the dump
    /// in `no_std` builds; extra records past `N` are silently dropped.
    #[cfg(not(feature = "std"))]
    pub fn saved_codes<const N: usize>(&mut self) -> Vec<[u8; CODE_LEN], N> {
        let mut out = Vec::new();
        for index in 0..self.capacity() {
            if let Ok(Some(rec)) = self.get(index) {
                let _ = out.push(rec.bytes);
            }
        }
        out
    }

    /// Collects every occupied slot, in table order.
    #[cfg(feature = "std")]
    pub fn saved_codes(&mut self) -> Vec<[u8; CODE_LEN]> {
        let mut out = Vec::new();
        for index in 0..self.capacity() {
            if let Ok(Some(rec)) = self.get(index) {
                out.push(rec.bytes);
            }
        }
        out
    }
}
