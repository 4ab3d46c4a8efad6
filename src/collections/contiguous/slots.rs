use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

use super::error::CapacityOverflowError;
use crate::util::result::ResultExtension;

/// An owned, uninitialized allocation with room for `cap` values of `T`.
///
/// RawSlots never knows which of its slots are initialized, so it never drops a `T`. Tracking the
/// live slots, and dropping them before the RawSlots itself is dropped, is the owner's job. Dropping
/// a RawSlots only releases the allocation.
///
/// A capacity of zero, or a zero-sized `T`, never allocates. The pointer is dangling in both cases.
pub(crate) struct RawSlots<T> {
    ptr: NonNull<T>,
    cap: usize,
    _phantom: PhantomData<T>,
}

impl<T> RawSlots<T> {
    /// Creates an empty RawSlots with capacity 0 and no allocation.
    pub const fn new() -> RawSlots<T> {
        RawSlots {
            ptr: NonNull::dangling(),
            cap: 0,
            _phantom: PhantomData,
        }
    }

    /// Allocates room for exactly `cap` values, all uninitialized.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`]. Allocation failure itself
    /// aborts through [`alloc::handle_alloc_error`].
    pub fn with_cap(cap: usize) -> RawSlots<T> {
        RawSlots {
            ptr: Self::alloc_ptr(cap),
            cap,
            _phantom: PhantomData,
        }
    }

    pub const fn cap(&self) -> usize {
        self.cap
    }

    pub const fn as_ptr(&self) -> NonNull<T> {
        self.ptr
    }

    /// Constructs `value` in the slot at `index`, returning a reference to it.
    ///
    /// # Safety
    /// `index` must be less than `cap` and the slot must not currently hold a live value, otherwise
    /// that value is leaked.
    pub unsafe fn write_at(&mut self, index: usize, value: T) -> &mut T {
        // SAFETY: The caller guarantees index < cap, so the slot is inside the allocation.
        unsafe {
            let slot = self.ptr.add(index);
            slot.write(value);
            &mut *slot.as_ptr()
        }
    }

    /// Moves the value out of the slot at `index`, leaving the slot logically uninitialized.
    ///
    /// # Safety
    /// `index` must be less than `cap` and the slot must hold a live value. The caller must treat
    /// the slot as uninitialized afterwards.
    pub unsafe fn read_at(&self, index: usize) -> T {
        // SAFETY: The caller guarantees the slot is in bounds and initialized.
        unsafe { self.ptr.add(index).read() }
    }

    /// Drops the value in the slot at `index` in place.
    ///
    /// # Safety
    /// Same as [`RawSlots::read_at`].
    pub unsafe fn drop_at(&mut self, index: usize) {
        // SAFETY: The caller guarantees the slot is in bounds and initialized, so it is properly
        // aligned and ready to drop.
        unsafe { ptr::drop_in_place(self.ptr.add(index).as_ptr()) }
    }

    /// # Safety
    /// `index` must be less than `cap` and the slot must hold a live value.
    pub unsafe fn slot(&self, index: usize) -> &T {
        // SAFETY: In bounds and initialized according to the caller.
        unsafe { self.ptr.add(index).as_ref() }
    }

    /// # Safety
    /// `index` must be less than `cap` and the slot must hold a live value.
    pub unsafe fn slot_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: In bounds and initialized according to the caller. &mut self guarantees
        // exclusive access.
        unsafe { self.ptr.add(index).as_mut() }
    }

    /// Moves the first `live` values into a fresh allocation of `new_cap` slots and releases the old
    /// one. A Rust move is a bitwise copy, so the values left behind are simply forgotten along with
    /// their memory and nothing is dropped.
    ///
    /// # Safety
    /// The first `live` slots must be initialized and `live` must not exceed `new_cap`.
    ///
    /// # Panics
    /// Panics if the new layout size would exceed [`isize::MAX`].
    pub unsafe fn relocate(&mut self, live: usize, new_cap: usize) {
        debug_assert!(live <= new_cap && live <= self.cap);

        if new_cap == self.cap {
            return;
        }

        let new_ptr = Self::alloc_ptr(new_cap);

        // SAFETY: Both regions are valid for live values, properly aligned and belong to separate
        // allocations (or are dangling with a zero-sized T, where the copy is a no-op).
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), live);
        }

        self.release();
        self.ptr = new_ptr;
        self.cap = new_cap;
    }

    /// Creates the [`Layout`] for `cap` values of `T`.
    ///
    /// # Panics
    /// Panics if the layout size would exceed [`isize::MAX`].
    fn layout(cap: usize) -> Layout {
        Layout::array::<T>(cap).map_err(|_| CapacityOverflowError).throw()
    }

    fn alloc_ptr(cap: usize) -> NonNull<T> {
        let layout = Self::layout(cap);

        if layout.size() == 0 {
            NonNull::dangling()
        } else {
            NonNull::new(
                // SAFETY: Zero-sized layouts have been guarded against.
                unsafe { alloc::alloc(layout).cast() }
            ).unwrap_or_else(|| alloc::handle_alloc_error(layout))
        }
    }

    fn release(&mut self) {
        let layout = Self::layout(self.cap);

        if layout.size() != 0 {
            // SAFETY: ptr was allocated in the global allocator with this exact layout. Zero-sized
            // layouts are never allocated and are skipped.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}

impl<T> Default for RawSlots<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawSlots<T> {
    fn drop(&mut self) {
        self.release();
    }
}

// SAFETY: RawSlots uniquely owns its allocation, so it can be sent when T: Send.
unsafe impl<T: Send> Send for RawSlots<T> {}
// SAFETY: Shared access to RawSlots only hands out shared references to T.
unsafe impl<T: Sync> Sync for RawSlots<T> {}
