use core::convert::TryFrom;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::Result;
use crate::observer::{KeyPushObserver, ObserverRegistry};
use crate::report::{BootKeyboardReport, REPORT_LEN};

/// HID interface class byte.
pub const CLASS_HID: u8 = 0x03;
/// Subclass byte of interfaces that speak the boot protocol.
pub const SUBCLASS_BOOT: u8 = 0x01;

/// `bInterfaceProtocol` values a boot-subclass HID interface can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum InterfaceProtocol {
    None = 0,
    Keyboard = 1,
    Mouse = 2,
}

/// Interface-descriptor triple check used during device configuration to
/// decide whether an interface belongs to this driver.
pub fn is_boot_keyboard(class: u8, subclass: u8, protocol: u8) -> bool {
    class == CLASS_HID
        && subclass == SUBCLASS_BOOT
        && matches!(
            InterfaceProtocol::try_from(protocol),
            Ok(InterfaceProtocol::Keyboard)
        )
}

/// Describes a class driver as the transfer machinery sees it.
///
/// Object safe so the host stack's dispatch table can hold mixed driver
/// types behind one pointer type.
pub trait ClassDriver: Send {
    /// Handles one completed interrupt IN transfer.
    ///
    /// Runs synchronously inside completion handling; must not block.
    fn on_data_received(&mut self, buf: &[u8]) -> Result<()>;

    /// Transfer length the interrupt IN endpoint is polled with.
    fn in_packet_size(&self) -> usize;
}

/// Class driver for one boot-protocol keyboard interface.
///
/// Owns the previously seen report and the observer registry; referenced
/// device state (the xHCI slot) stays owned by the host stack.
#[derive(Debug)]
pub struct HidKeyboardDriver {
    slot_id: u8,
    interface_index: u8,
    previous: BootKeyboardReport,
    observers: ObserverRegistry,
}

impl HidKeyboardDriver {
    pub fn new(slot_id: u8, interface_index: u8) -> Self {
        log::debug!(
            "keyboard driver bound to slot {} interface {}",
            slot_id,
            interface_index
        );
        HidKeyboardDriver {
            slot_id,
            interface_index,
            previous: BootKeyboardReport::default(),
            observers: ObserverRegistry::new(),
        }
    }

    pub fn slot_id(&self) -> u8 {
        self.slot_id
    }

    pub fn interface_index(&self) -> u8 {
        self.interface_index
    }

    /// Appends an observer behind all previously subscribed ones.
    ///
    /// At most `MAX_OBSERVERS` subscriptions per instance; observers stay
    /// registered for the instance's whole lifetime.
    pub fn subscribe_key_push(&mut self, observer: impl KeyPushObserver + 'static) -> Result<()> {
        self.observers.subscribe(observer)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Diffs a completed interrupt report against the previous one and
    /// notifies observers of every state change.
    ///
    /// Modifier changes are reported first as `(modifier, 0, true)`, then
    /// newly pressed keys in slot order, then released keys in slot order.
    /// Keys are matched by presence, not slot position; firmware may
    /// reorder held keys between reports. A rollover error report emits no
    /// key events and leaves the previous report in place.
    pub fn on_data_received(&mut self, buf: &[u8]) -> Result<()> {
        let report = match BootKeyboardReport::parse(buf) {
            Ok(report) => report,
            Err(err) => {
                log::warn!("keyboard report length {} invalid; discarding", buf.len());
                return Err(err);
            }
        };

        if report.modifier != self.previous.modifier {
            self.observers.notify_key_push(report.modifier, 0, true);
        }

        if report.is_rollover_error() {
            log::debug!("keyboard rollover report; keeping previous key state");
            return Ok(());
        }

        // slots hold a set; a keycode already seen in an earlier slot of the
        // same report is skipped
        for (i, &keycode) in report.keycodes.iter().enumerate() {
            if keycode == 0 || report.keycodes[..i].contains(&keycode) {
                continue;
            }
            if !self.previous.contains(keycode) {
                self.observers.notify_key_push(report.modifier, keycode, true);
            }
        }
        for (i, &keycode) in self.previous.keycodes.iter().enumerate() {
            if keycode == 0 || self.previous.keycodes[..i].contains(&keycode) {
                continue;
            }
            if !report.contains(keycode) {
                self.observers.notify_key_push(report.modifier, keycode, false);
            }
        }

        self.previous = report;
        Ok(())
    }
}

impl ClassDriver for HidKeyboardDriver {
    fn on_data_received(&mut self, buf: &[u8]) -> Result<()> {
        HidKeyboardDriver::on_data_received(self, buf)
    }

    fn in_packet_size(&self) -> usize {
        REPORT_LEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use spin::Mutex;

    type Log = Arc<Mutex<Vec<(u8, u8, bool)>>>;

    fn driver_with_recorder() -> (HidKeyboardDriver, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let mut driver = HidKeyboardDriver::new(1, 0);
        driver
            .subscribe_key_push(move |modifier: u8, keycode: u8, press: bool| {
                sink.lock().push((modifier, keycode, press))
            })
            .unwrap();
        (driver, log)
    }

    #[test]
    fn duplicate_slots_report_one_press() {
        let (mut driver, log) = driver_with_recorder();
        driver.on_data_received(&[0, 0, 4, 4, 4, 0, 0, 0]).unwrap();
        assert_eq!(*log.lock(), [(0, 4, true)]);

        log.lock().clear();
        driver.on_data_received(&[0; 8]).unwrap();
        assert_eq!(*log.lock(), [(0, 4, false)]);
    }

    #[test]
    fn reordered_slots_are_not_state_changes() {
        let (mut driver, log) = driver_with_recorder();
        driver.on_data_received(&[0, 0, 4, 5, 6, 0, 0, 0]).unwrap();
        log.lock().clear();

        // same set, different slots
        driver.on_data_received(&[0, 0, 6, 4, 5, 0, 0, 0]).unwrap();
        assert!(log.lock().is_empty());
    }

    #[test]
    fn release_carries_the_new_modifier_byte() {
        let (mut driver, log) = driver_with_recorder();
        driver.on_data_received(&[0x02, 0, 4, 0, 0, 0, 0, 0]).unwrap();
        log.lock().clear();

        driver.on_data_received(&[0x22, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(*log.lock(), [(0x22, 0, true), (0x22, 4, false)]);
    }

    #[test]
    fn rollover_report_still_notifies_a_modifier_change() {
        let (mut driver, log) = driver_with_recorder();
        driver.on_data_received(&[0x02, 0, 1, 1, 1, 1, 1, 1]).unwrap();
        assert_eq!(*log.lock(), [(0x02, 0, true)]);

        // previous report was never updated, so the still-held modifier
        // diffs against the pre-rollover byte again
        log.lock().clear();
        driver.on_data_received(&[0x02, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(*log.lock(), [(0x02, 0, true)]);
    }

    #[test]
    fn dispatch_table_surface() {
        let (driver, _log) = driver_with_recorder();
        let mut boxed: alloc::boxed::Box<dyn ClassDriver> = alloc::boxed::Box::new(driver);
        assert_eq!(boxed.in_packet_size(), REPORT_LEN);
        assert!(boxed.on_data_received(&[0; 8]).is_ok());
    }

    #[test]
    fn recognizes_boot_keyboard_interfaces() {
        assert!(is_boot_keyboard(CLASS_HID, SUBCLASS_BOOT, 1));
        assert!(!is_boot_keyboard(CLASS_HID, SUBCLASS_BOOT, 2));
        assert!(!is_boot_keyboard(CLASS_HID, 0x00, 1));
        assert!(!is_boot_keyboard(0x08, SUBCLASS_BOOT, 1));
        assert!(!is_boot_keyboard(CLASS_HID, SUBCLASS_BOOT, 0x77));
        assert_eq!(u8::from(InterfaceProtocol::Mouse), 2);
    }
}
