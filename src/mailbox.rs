//! Single-slot mailbox for the most recently decoded code.
//!
//! The decoder publishes at most one unread code at a time. While a code
//! sits unconsumed, new frames are refused at the source (the edge handler
//! ignores the signal entirely), which is deliberate back-pressure rather
//! than queueing: the consumer must [`take`](CodeMailbox::take) or
//! [`discard`](CodeMailbox::discard) before another capture can start.
//!
//! Each operation here is a single `&mut self` call, so it is atomic with
//! respect to the edge handler whenever both contexts go through the
//! [`crate::isr`] critical-section globals.

use crate::consts::CODE_LEN;

/// Latest-code mailbox shared between the edge handler and the consumer.
#[derive(Debug, Default)]
pub struct CodeMailbox {
    present: bool,
    code: [u8; CODE_LEN],
}

impl CodeMailbox {
    /// Creates an empty mailbox.
    pub const fn new() -> Self {
        Self {
            present: false,
            code: [0; CODE_LEN],
        }
    }

    /// Returns whether an unread code is waiting.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Drops the unread code, if any, re-arming the receiver.
    pub fn discard(&mut self) {
        self.present = false;
    }

    /// Returns the unread code without consuming it.
    pub fn peek(&self) -> Option<[u8; CODE_LEN]> {
        if self.present { Some(self.code) } else { None }
    }

    /// Returns the unread code and clears the presence flag in the same
    /// call.
    pub fn take(&mut self) -> Option<[u8; CODE_LEN]> {
        if self.present {
            self.present = false;
            Some(self.code)
        } else {
            None
        }
    }

    /// Stores a freshly decoded code. Refused (returns `false`) while a
    /// previous code is still unread; the stored code is left untouched.
    pub fn publish(&mut self, code: [u8; CODE_LEN]) -> bool {
        if self.present {
            return false;
        }
        self.code = code;
        self.present = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mailbox_reports_absence() {
        let mut mb = CodeMailbox::new();
        assert!(!mb.is_present());
        assert_eq!(mb.peek(), None);
        assert_eq!(mb.take(), None);
    }

    #[test]
    fn test_publish_then_peek_does_not_consume() {
        let mut mb = CodeMailbox::new();
        assert!(mb.publish([0x12, 0x34, 0xA1]));
        assert_eq!(mb.peek(), Some([0x12, 0x34, 0xA1]));
        assert_eq!(mb.peek(), Some([0x12, 0x34, 0xA1]));
        assert!(mb.is_present());
    }

    #[test]
    fn test_take_is_idempotent() {
        let mut mb = CodeMailbox::new();
        assert!(mb.publish([1, 2, 3]));
        assert_eq!(mb.take(), Some([1, 2, 3]));
        assert_eq!(mb.take(), None);
        assert_eq!(mb.take(), None);
    }

    #[test]
    fn test_second_publish_is_refused() {
        let mut mb = CodeMailbox::new();
        assert!(mb.publish([1, 2, 3]));
        assert!(!mb.publish([4, 5, 6]));
        // The first code must be retained unchanged.
        assert_eq!(mb.take(), Some([1, 2, 3]));
        // With the slot free again, publishing works.
        assert!(mb.publish([4, 5, 6]));
    }

    #[test]
    fn test_discard_frees_the_slot() {
        let mut mb = CodeMailbox::new();
        assert!(mb.publish([1, 2, 3]));
        mb.discard();
        assert_eq!(mb.take(), None);
        assert!(mb.publish([7, 8, 9]));
    }
}
