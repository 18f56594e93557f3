//! USB HID boot-protocol keyboard class driver.
//!
//! The host stack hands each completed interrupt IN transfer to a
//! [`HidKeyboardDriver`], which diffs the 8-byte report against the previous
//! one and notifies subscribers of every key press, release, and modifier
//! change. Up to [`MAX_OBSERVERS`] observers per driver; instances can live
//! in a fixed [`DriverPool`] so hotplug never touches the kernel heap.
//!
//! Async consumers take the stream half of [`events::channel`] and subscribe
//! the sink half like any other observer:
//!
//! ```
//! use usbkbd::{events, DriverPool};
//!
//! static POOL: DriverPool = DriverPool::new();
//!
//! let (sink, _stream) = events::channel(64);
//! let mut keyboard = POOL.allocate(1, 0).unwrap();
//! keyboard.subscribe_key_push(sink.clone()).unwrap();
//!
//! // completed transfer: 'a' went down
//! keyboard.on_data_received(&[0, 0, 4, 0, 0, 0, 0, 0]).unwrap();
//! ```
//!
//! No logger is installed and no allocator is provided; both belong to the
//! hosting kernel. The crate only assumes `alloc`.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod driver;
pub mod error;
pub mod events;
pub mod keymap;
pub mod observer;
pub mod pool;
pub mod report;

pub use crate::driver::{is_boot_keyboard, ClassDriver, HidKeyboardDriver, InterfaceProtocol};
pub use crate::error::{Error, Result};
pub use crate::events::{KeyEvent, KeyEventSink, KeyEventStream};
pub use crate::observer::{KeyPushObserver, ObserverRegistry, MAX_OBSERVERS};
pub use crate::pool::{DriverPool, PoolBox, POOL_SLOTS};
pub use crate::report::{BootKeyboardReport, REPORT_LEN};
