use alloc::boxed::Box;
use core::fmt;

use crate::error::{Error, Result};

/// Maximum subscriptions per driver instance.
pub const MAX_OBSERVERS: usize = 4;

/// Describes an object that listens for key state changes.
///
/// Dispatch happens synchronously inside the transfer-completion path, so
/// implementations must not block. Captured state lives as long as the
/// driver instance; there is no unsubscribe.
pub trait KeyPushObserver: Send {
    /// `modifier` is the full current modifier byte. `keycode == 0` marks a
    /// modifier-only change with no specific non-modifier key.
    fn on_key_push(&mut self, modifier: u8, keycode: u8, press: bool);
}

impl<F> KeyPushObserver for F
where
    F: FnMut(u8, u8, bool) + Send,
{
    fn on_key_push(&mut self, modifier: u8, keycode: u8, press: bool) {
        self(modifier, keycode, press)
    }
}

const NO_OBSERVER: Option<Box<dyn KeyPushObserver>> = None;

/// Bounded, insertion-ordered collection of key-push subscribers.
///
/// Backing storage is a fixed array with an explicit length; overrunning
/// the capacity is an error return, never a write past the end.
pub struct ObserverRegistry {
    entries: [Option<Box<dyn KeyPushObserver>>; MAX_OBSERVERS],
    len: usize,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        ObserverRegistry {
            entries: [NO_OBSERVER; MAX_OBSERVERS],
            len: 0,
        }
    }

    /// Appends an observer after all existing ones.
    ///
    /// Fails with `CapacityExceeded` when the registry is full; nothing is
    /// stored or allocated on that path.
    pub fn subscribe(&mut self, observer: impl KeyPushObserver + 'static) -> Result<()> {
        if self.len == MAX_OBSERVERS {
            return Err(Error::CapacityExceeded);
        }
        self.entries[self.len] = Some(Box::new(observer));
        self.len += 1;
        Ok(())
    }

    /// Calls every registered observer in subscription order.
    ///
    /// Requires `&mut self`, so no observer can reach back into the registry
    /// it is being notified from; the iteration bound is taken once before
    /// the loop.
    pub fn notify_key_push(&mut self, modifier: u8, keycode: u8, press: bool) {
        let count = self.len;
        for entry in self.entries[..count].iter_mut() {
            if let Some(observer) = entry {
                observer.on_key_push(modifier, keycode, press);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("len", &self.len)
            .field("capacity", &MAX_OBSERVERS)
            .finish()
    }
}
