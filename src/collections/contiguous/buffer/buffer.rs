use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Add, Deref, DerefMut, Index, IndexMut};
use std::slice;

use crate::collections::contiguous::RandomAccessIter;
use crate::collections::contiguous::error::{
    CapacityOverflowError, EmptyContainerError, IndexOutOfRangeError,
};
use crate::collections::contiguous::slots::RawSlots;
use crate::util::result::ResultExtension;

/// The capacity a Buffer takes on the first time it grows from nothing.
const MIN_CAP: usize = 1;
/// The smallest capacity given to a Buffer created from a list of values.
const MIN_LIST_CAP: usize = 10;

/// A growable contiguous collection that manages its own uninitialized storage.
///
/// A Buffer keeps `len` live elements at the front of an allocation of `cap` slots. The slots in
/// `len..cap` are allocated but uninitialized and are never read. When full, pushing grows the
/// allocation by a factor of 1.5 (and by at least one slot). Popping shrinks it by the same factor
/// once fewer than half of the slots are in use. Growing and shrinking relocate every live element
/// into the new allocation before the old one is released, so each element is constructed once
/// and dropped once over the lifetime of the Buffer.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the Buffer.
/// - `m`: The number of items being appended or compared against.
///
/// | Method | Complexity |
/// |-|-|
/// | `get` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push_back` | `O(1)`*, `O(n)` |
/// | `emplace_back` | `O(1)`*, `O(n)` |
/// | `push_back_list` | `O(n+m)` |
/// | `pop_back` | `O(1)`*, `O(n)` |
/// | `front` / `back` | `O(1)` |
/// | `concat` | `O(n+m)` |
/// | `clear` | `O(n)` |
/// | `eq` | `O(min(n, m))` |
///
/// \* Amortized. The call that reallocates takes `O(n)`.
pub struct Buffer<T> {
    pub(crate) slots: RawSlots<T>,
    pub(crate) len: usize,
}

impl<T> Buffer<T> {
    /// Creates a new Buffer with length and capacity 0. Nothing is allocated until the first
    /// element is added.
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let buf: Buffer<u8> = Buffer::new();
    /// assert_eq!(buf.len(), 0);
    /// assert_eq!(buf.cap(), 0);
    /// ```
    pub const fn new() -> Buffer<T> {
        Buffer {
            slots: RawSlots::new(),
            len: 0,
        }
    }

    /// Creates a new, empty Buffer with capacity exactly equal to `cap`.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let mut buf: Buffer<u8> = Buffer::with_cap(4);
    /// assert_eq!(buf.cap(), 4);
    /// assert!(buf.is_empty());
    /// buf.push_back_list([1, 2, 3]);
    /// assert_eq!(buf.cap(), 4);
    /// ```
    pub fn with_cap(cap: usize) -> Buffer<T> {
        Buffer {
            slots: RawSlots::with_cap(cap),
            len: 0,
        }
    }

    /// Creates a Buffer holding `values` in order. The capacity is one and a half times the number
    /// of values, but never less than 10, so a few pushes can follow without reallocating.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let small = Buffer::from_list([1, 2, 3]);
    /// assert_eq!(small.len(), 3);
    /// assert_eq!(small.cap(), 10);
    ///
    /// let large = Buffer::from_list(0..20);
    /// assert_eq!(large.cap(), 30);
    /// ```
    pub fn from_list<I>(values: I) -> Buffer<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = values.into_iter();
        let len = iter.len();
        let mut buf = Buffer::with_cap(cmp::max(MIN_LIST_CAP, len + len / 2));

        for value in iter {
            buf.push_back(value);
        }

        buf
    }

    /// Returns the number of live elements.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the Buffer contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the Buffer contains at least one element. The inverse of
    /// [`is_empty`](Buffer::is_empty).
    pub const fn is_occupied(&self) -> bool {
        self.len != 0
    }

    /// Returns the number of slots currently allocated.
    pub const fn cap(&self) -> usize {
        self.slots.cap()
    }

    /// Moves the contents out of this Buffer and into a new one, leaving this Buffer empty with
    /// capacity 0. No elements are copied and nothing is reallocated.
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let mut first = Buffer::from([1, 2, 3]);
    /// let second = first.take();
    /// assert!(first.is_empty());
    /// assert_eq!(first.cap(), 0);
    /// assert_eq!(&*second, &[1, 2, 3]);
    /// ```
    pub fn take(&mut self) -> Buffer<T> {
        mem::replace(self, Buffer::new())
    }

    /// Appends `value` to the back of the Buffer, growing first if every slot is in use.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let mut buf = Buffer::new();
    /// for i in 1..=3 {
    ///     buf.push_back(i);
    /// }
    /// assert_eq!(buf.front(), Ok(&1));
    /// assert_eq!(buf.back(), Ok(&3));
    /// ```
    pub fn push_back(&mut self, value: T) {
        if self.len == self.cap() {
            self.grow();
        }

        // SAFETY: There is at least one free slot after the check above, and slot len is
        // uninitialized.
        unsafe { self.slots.write_at(self.len, value); }
        self.len += 1;
    }

    /// Appends every value in `values` in order. If the values won't fit, the Buffer reallocates
    /// once, to one and a half times the combined length, rather than growing repeatedly.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from([1, 10, 100, 1000]);
    /// buf.push_back_list([2, 3, 4]);
    /// assert_eq!(&*buf, &[1, 10, 100, 1000, 2, 3, 4]);
    /// ```
    pub fn push_back_list<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = values.into_iter();
        let new_len = self.len.checked_add(iter.len()).ok_or(CapacityOverflowError).throw();

        if new_len >= self.cap() {
            self.grow_to(Self::scaled_cap(new_len));
        }

        for value in iter {
            self.push_back(value);
        }
    }

    /// Constructs a new element at the back of the Buffer from `make`, returning a mutable
    /// reference to it. `make` runs after any growth, and its result is written straight into the
    /// new slot.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`], or if `make` panics, in which
    /// case the Buffer is left unchanged apart from any growth.
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let mut buf: Buffer<String> = Buffer::with_cap(2);
    /// let name = buf.emplace_back(|| "front".repeat(2));
    /// name.push('!');
    /// assert_eq!(buf[0], "frontfront!");
    /// ```
    pub fn emplace_back<F: FnOnce() -> T>(&mut self, make: F) -> &mut T {
        if self.len == self.cap() {
            self.grow();
        }

        let index = self.len;
        // SAFETY: There is at least one free slot after the check above. len is only updated once
        // make has returned and the value is in place.
        unsafe { self.slots.write_at(index, make()); }
        self.len += 1;

        // SAFETY: index < len, so the slot is in bounds and initialized.
        unsafe { self.slots.slot_mut(index) }
    }

    /// Removes the last element and returns it. Afterwards, if fewer than half of the slots are in
    /// use, the Buffer shrinks by a factor of 1.5.
    ///
    /// # Errors
    /// Returns an [`EmptyContainerError`] if the Buffer is empty.
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from([1, 2, 3, 4, 5, 6, 7]);
    /// assert_eq!(buf.pop_back(), Ok(7));
    /// assert_eq!(buf.back(), Ok(&6));
    /// assert_eq!(buf.len(), 6);
    /// ```
    pub fn pop_back(&mut self) -> Result<T, EmptyContainerError> {
        if self.len == 0 {
            return Err(EmptyContainerError);
        }

        self.len -= 1;
        // SAFETY: The slot at the old len - 1 was initialized, and decrementing len first means it
        // is now considered uninitialized, so the value is only ever owned once.
        let value = unsafe { self.slots.read_at(self.len) };

        if self.len < self.cap() / 2 {
            self.shrink();
        }

        Ok(value)
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    /// Returns an [`EmptyContainerError`] if the Buffer is empty.
    pub fn front(&self) -> Result<&T, EmptyContainerError> {
        self.first().ok_or(EmptyContainerError)
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Errors
    /// Returns an [`EmptyContainerError`] if the Buffer is empty.
    pub fn front_mut(&mut self) -> Result<&mut T, EmptyContainerError> {
        self.first_mut().ok_or(EmptyContainerError)
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    /// Returns an [`EmptyContainerError`] if the Buffer is empty.
    pub fn back(&self) -> Result<&T, EmptyContainerError> {
        self.last().ok_or(EmptyContainerError)
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Errors
    /// Returns an [`EmptyContainerError`] if the Buffer is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, EmptyContainerError> {
        self.last_mut().ok_or(EmptyContainerError)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns an [`IndexOutOfRangeError`] if `index` isn't less than the length. Slots between
    /// the length and the capacity are allocated but uninitialized, so they count as out of range.
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let buf = Buffer::from(['a', 'b']);
    /// assert_eq!(buf.get(1), Ok(&'b'));
    /// assert!(buf.get(2).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfRangeError> {
        self.check_index(index)?;
        // SAFETY: index < len, so the slot is initialized.
        Ok(unsafe { self.slots.slot(index) })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns an [`IndexOutOfRangeError`] if `index` isn't less than the length.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfRangeError> {
        self.check_index(index)?;
        // SAFETY: index < len, so the slot is initialized.
        Ok(unsafe { self.slots.slot_mut(index) })
    }

    /// Drops every element, in index order, leaving the Buffer empty. The capacity is kept so that
    /// the Buffer can be refilled without reallocating.
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let mut buf = Buffer::from([1, 2, 3]);
    /// buf.clear();
    /// assert!(buf.is_empty());
    /// assert_eq!(buf.cap(), 10);
    /// ```
    pub fn clear(&mut self) {
        // Forget the elements before dropping them, so a panicking drop leaks the rest instead of
        // dropping anything twice.
        let len = mem::replace(&mut self.len, 0);

        for i in 0..len {
            // SAFETY: Every slot below the old len was initialized and is dropped exactly once.
            unsafe { self.slots.drop_at(i); }
        }
    }

    /// Returns an iterator positioned at the first element.
    pub fn begin(&self) -> RandomAccessIter<'_, T> {
        RandomAccessIter {
            slice: self,
            index: 0,
        }
    }

    /// Returns an iterator positioned one past the last element.
    pub fn end(&self) -> RandomAccessIter<'_, T> {
        RandomAccessIter {
            slice: self,
            index: self.len,
        }
    }

    /// Grows the Buffer so that it can take at least one more element. An unallocated Buffer grows
    /// to [`MIN_CAP`], anything else grows by half of its capacity, and always by at least one.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub(crate) fn grow(&mut self) {
        let new_cap = match self.cap() {
            0 => MIN_CAP,
            cap => Self::scaled_cap(cap),
        };

        self.grow_to(new_cap);
    }

    /// Relocates the live elements into an allocation of exactly `new_cap` slots.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub(crate) fn grow_to(&mut self, new_cap: usize) {
        debug_assert!(new_cap >= self.len);
        // SAFETY: The first len slots are initialized, and new_cap >= len.
        unsafe { self.slots.relocate(self.len, new_cap); }
    }

    /// Shrinks the allocation to two thirds of its capacity (rounding up). Only called when fewer
    /// than half of the slots are in use, so every live element still fits.
    pub(crate) fn shrink(&mut self) {
        let cap = self.cap();
        self.grow_to(cap - cap / 2);
    }

    /// Returns one and a half times `len`, and at least `len + 1`.
    fn scaled_cap(len: usize) -> usize {
        cmp::max(
            len.checked_add(len / 2).ok_or(CapacityOverflowError).throw(),
            len.checked_add(1).ok_or(CapacityOverflowError).throw(),
        )
    }

    const fn check_index(&self, index: usize) -> Result<(), IndexOutOfRangeError> {
        if index < self.len {
            Ok(())
        } else {
            Err(IndexOutOfRangeError {
                index,
                len: self.len,
            })
        }
    }
}

impl<T: Clone> Buffer<T> {
    /// Returns a new Buffer with the contents of `self` followed by clones of the contents of
    /// `other`. Neither input is modified.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let first = Buffer::from([1, 2, 3, 4, 5, 6, 7]);
    /// let second = Buffer::from([8, 9, 10]);
    /// let joined = first.concat(&second);
    /// assert_eq!(joined.len(), 10);
    /// assert_eq!(joined.back(), Ok(&10));
    /// ```
    pub fn concat(&self, other: &Buffer<T>) -> Buffer<T> {
        let mut result = self.clone();

        for value in other.iter() {
            result.push_back(value.clone());
        }

        result
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        self.clear();
        // Dropping self.slots releases the allocation.
    }
}

impl<T: Clone> Clone for Buffer<T> {
    /// Creates an independent Buffer with the same capacity and a clone of every element.
    fn clone(&self) -> Self {
        let mut buf = Self::with_cap(self.cap());

        for value in self.iter() {
            buf.push_back(value.clone());
        }

        buf
    }
}

impl<T, const N: usize> From<[T; N]> for Buffer<T> {
    fn from(value: [T; N]) -> Self {
        Buffer::from_list(value)
    }
}

impl<T> FromIterator<T> for Buffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut buf = Buffer::with_cap(iter.size_hint().0);

        for value in iter {
            buf.push_back(value);
        }

        buf
    }
}

impl<T> Extend<T> for Buffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> Index<usize> for Buffer<T> {
    type Output = T;

    /// # Panics
    /// Panics if `index` is out of range. See [`Buffer::get`] for a non-panicking version.
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).throw()
    }
}

impl<T> IndexMut<usize> for Buffer<T> {
    /// # Panics
    /// Panics if `index` is out of range. See [`Buffer::get_mut`] for a non-panicking version.
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).throw()
    }
}

impl<T: Clone> Add<&Buffer<T>> for &Buffer<T> {
    type Output = Buffer<T>;

    fn add(self, rhs: &Buffer<T>) -> Self::Output {
        self.concat(rhs)
    }
}

impl<T> Deref for Buffer<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len slots are initialized, properly aligned and contained in a single
        // allocation (or dangling for a zero-sized T or zero capacity, which is valid for len 0 or
        // zero-sized reads). The borrow of self prevents mutation for the slice's lifetime.
        unsafe { slice::from_raw_parts(self.slots.as_ptr().as_ptr(), self.len) }
    }
}

impl<T> DerefMut for Buffer<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As for deref, with the mutable borrow of self guaranteeing exclusive access.
        unsafe { slice::from_raw_parts_mut(self.slots.as_ptr().as_ptr(), self.len) }
    }
}

impl<T> AsRef<[T]> for Buffer<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> AsMut<[T]> for Buffer<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T> Borrow<[T]> for Buffer<T> {
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T> BorrowMut<[T]> for Buffer<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

/// Buffers are equal when they have the same length and equal elements at every index. The
/// comparison stops at the first mismatch. Capacity is ignored.
impl<T: PartialEq> PartialEq for Buffer<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for Buffer<T> {}

impl<T: Hash> Hash for Buffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug> Debug for Buffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for Buffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
