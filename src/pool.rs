use core::cell::UnsafeCell;
use core::fmt;
use core::marker::PhantomData;
use core::mem::MaybeUninit;
use core::ops::{Deref, DerefMut};
use core::ptr;

use spin::Mutex;

use crate::driver::HidKeyboardDriver;
use crate::error::{Error, Result};

/// Number of driver instances the pool can hold at once.
pub const POOL_SLOTS: usize = 8;

// claim mask is a u32
const _: () = assert!(POOL_SLOTS <= 32);

const EMPTY_SLOT: UnsafeCell<MaybeUninit<HidKeyboardDriver>> =
    UnsafeCell::new(MaybeUninit::uninit());

/// Fixed-slot storage for keyboard driver instances.
///
/// `new` is const, so the hosting kernel can place the pool in a `static`
/// next to its other driver state. A slot is claimed under the mask lock,
/// handed out as a `PoolBox`, and released exactly once when that box
/// drops; exhaustion surfaces as `Error::OutOfMemory` to the caller.
pub struct DriverPool {
    claimed: Mutex<u32>,
    slots: [UnsafeCell<MaybeUninit<HidKeyboardDriver>>; POOL_SLOTS],
}

// Safety: slot contents are reached only through the PoolBox holding that
// slot's claim bit; the mask itself is behind the lock.
unsafe impl Sync for DriverPool {}

impl DriverPool {
    pub const fn new() -> Self {
        DriverPool {
            claimed: Mutex::new(0),
            slots: [EMPTY_SLOT; POOL_SLOTS],
        }
    }

    /// Constructs a driver for `slot_id`/`interface_index` in a free slot.
    ///
    /// When every slot is claimed, fails with `OutOfMemory` and leaves the
    /// pool untouched; the caller decides whether to retry after detaching
    /// another device.
    pub fn allocate(&self, slot_id: u8, interface_index: u8) -> Result<PoolBox<'_>> {
        let index = {
            let mut claimed = self.claimed.lock();
            match (0..POOL_SLOTS).find(|&i| *claimed & (1 << i) == 0) {
                Some(index) => {
                    *claimed |= 1 << index;
                    index
                }
                None => {
                    log::warn!("keyboard driver pool exhausted");
                    return Err(Error::OutOfMemory);
                }
            }
        };

        let driver = HidKeyboardDriver::new(slot_id, interface_index);
        // Safety: the claim bit taken above makes the slot exclusively ours
        // until the PoolBox drops; write does not read the old contents.
        unsafe {
            (*self.slots[index].get()).write(driver);
        }
        Ok(PoolBox {
            pool: self,
            index,
            _owned: PhantomData,
        })
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        POOL_SLOTS - self.claimed.lock().count_ones() as usize
    }

    pub const fn capacity(&self) -> usize {
        POOL_SLOTS
    }
}

/// Owning handle to a pool-resident driver; releasing the slot is dropping
/// the box.
pub struct PoolBox<'a> {
    pool: &'a DriverPool,
    index: usize,
    // carries the driver's auto traits (Send, not Sync)
    _owned: PhantomData<HidKeyboardDriver>,
}

impl Deref for PoolBox<'_> {
    type Target = HidKeyboardDriver;

    fn deref(&self) -> &HidKeyboardDriver {
        // Safety: initialized in allocate; the claim bit is ours until drop.
        unsafe { (*self.pool.slots[self.index].get()).assume_init_ref() }
    }
}

impl DerefMut for PoolBox<'_> {
    fn deref_mut(&mut self) -> &mut HidKeyboardDriver {
        // Safety: as for deref, and &mut self gives exclusivity.
        unsafe { (*self.pool.slots[self.index].get()).assume_init_mut() }
    }
}

impl fmt::Debug for PoolBox<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl Drop for PoolBox<'_> {
    fn drop(&mut self) {
        // Safety: still initialized and exclusively ours; the claim bit is
        // cleared only after the driver is gone, so the slot can be reused.
        unsafe {
            ptr::drop_in_place((*self.pool.slots[self.index].get()).as_mut_ptr());
        }
        let mut claimed = self.pool.claimed.lock();
        *claimed &= !(1 << self.index);
    }
}
