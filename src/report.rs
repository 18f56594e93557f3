use crate::error::{Error, Result};
use crate::keymap::usage;

/// Length of one boot-protocol interrupt IN transfer.
pub const REPORT_LEN: usize = 8;

/// Input report layout of a boot-protocol keyboard: one modifier byte, one
/// reserved byte, six keycode slots. Dictated by the USB HID boot protocol;
/// fixed and versionless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct BootKeyboardReport {
    pub modifier: u8,
    pub reserved: u8,
    pub keycodes: [u8; 6],
}

impl BootKeyboardReport {
    /// Decodes a completed transfer buffer.
    ///
    /// Anything other than exactly `REPORT_LEN` bytes is a protocol error;
    /// the bytes are otherwise taken as-is (hardware may send any values).
    pub fn parse(buf: &[u8]) -> Result<Self> {
        if buf.len() != REPORT_LEN {
            return Err(Error::ProtocolError { len: buf.len() });
        }
        let mut keycodes = [0u8; 6];
        keycodes.copy_from_slice(&buf[2..]);
        Ok(BootKeyboardReport {
            modifier: buf[0],
            reserved: buf[1],
            keycodes,
        })
    }

    /// Whether `keycode` occupies any of the six slots.
    pub fn contains(&self, keycode: u8) -> bool {
        self.keycodes.contains(&keycode)
    }

    /// Keyboards report phantom state (more keys held than the protocol can
    /// represent) by filling every slot with the ErrorRollOver usage.
    pub fn is_rollover_error(&self) -> bool {
        self.keycodes.iter().all(|&k| k == usage::ERROR_ROLLOVER)
    }
}
