use std::fmt::{self, Debug, Formatter};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice;

use crate::collections::contiguous::RandomAccessIter;
use crate::collections::contiguous::error::IndexOutOfRangeError;
use crate::collections::contiguous::slots::RawSlots;
use crate::util::result::ResultExtension;

/// A heap-allocated array of exactly `N` elements, all of which are always initialized.
///
/// Unlike [`Buffer`](crate::collections::contiguous::Buffer), an Array never grows or shrinks, so
/// there is no distinction between its size and its capacity.
///
/// # Examples
/// ```
/// # use custom_collections::collections::contiguous::Array;
/// let arr: Array<i32, 5> = Array::from_list([1, 2, 3]).unwrap();
/// assert_eq!(arr.size(), 5);
/// assert_eq!(&*arr, &[1, 2, 3, 0, 0]);
/// ```
pub struct Array<T, const N: usize> {
    pub(crate) slots: RawSlots<T>,
}

impl<T: Default, const N: usize> Array<T, N> {
    /// Creates an Array with every element set to `T::default()`.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub fn new() -> Array<T, N> {
        let mut slots = RawSlots::with_cap(N);

        for i in 0..N {
            // SAFETY: i < N, and each slot is written once.
            unsafe { slots.write_at(i, T::default()); }
        }

        Array { slots }
    }

    /// Creates an Array starting with `values`, filling any remaining elements with `T::default()`.
    ///
    /// # Errors
    /// Returns an [`IndexOutOfRangeError`] for the first value that doesn't fit, if there are more
    /// than `N` values.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub fn from_list<I>(values: I) -> Result<Array<T, N>, IndexOutOfRangeError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = values.into_iter();
        if iter.len() > N {
            return Err(IndexOutOfRangeError { index: N, len: N });
        }

        let mut slots = RawSlots::with_cap(N);
        let mut written = 0;

        for value in iter.take(N) {
            // SAFETY: take(N) keeps written < N, and each slot is written once.
            unsafe { slots.write_at(written, value); }
            written += 1;
        }

        for i in written..N {
            // SAFETY: i < N, and slots from written onwards haven't been written yet.
            unsafe { slots.write_at(i, T::default()); }
        }

        Ok(Array { slots })
    }
}

impl<T, const N: usize> Array<T, N> {
    /// Returns the number of elements, which is always `N`.
    pub const fn size(&self) -> usize {
        N
    }

    /// Returns true unless `N` is zero.
    pub const fn is_occupied(&self) -> bool {
        N != 0
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns an [`IndexOutOfRangeError`] if `index` isn't less than `N`.
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfRangeError> {
        self.check_index(index)?;
        // SAFETY: index < N and every slot is initialized.
        Ok(unsafe { self.slots.slot(index) })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns an [`IndexOutOfRangeError`] if `index` isn't less than `N`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfRangeError> {
        self.check_index(index)?;
        // SAFETY: index < N and every slot is initialized.
        Ok(unsafe { self.slots.slot_mut(index) })
    }

    /// Returns an iterator positioned at the first element.
    pub fn begin(&self) -> RandomAccessIter<'_, T> {
        RandomAccessIter {
            slice: self,
            index: 0,
        }
    }

    /// Returns an iterator positioned one past the last element.
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Array;
    /// let arr = Array::from([0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// assert_eq!((arr.end() - 1).read(), Ok(&9));
    /// ```
    pub fn end(&self) -> RandomAccessIter<'_, T> {
        RandomAccessIter {
            slice: self,
            index: N,
        }
    }

    const fn check_index(&self, index: usize) -> Result<(), IndexOutOfRangeError> {
        if index < N {
            Ok(())
        } else {
            Err(IndexOutOfRangeError { index, len: N })
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Array<T, N> {
    fn from(value: [T; N]) -> Self {
        let mut slots = RawSlots::with_cap(N);

        for (i, item) in value.into_iter().enumerate() {
            // SAFETY: The array has exactly N items, so i < N and each slot is written once.
            unsafe { slots.write_at(i, item); }
        }

        Array { slots }
    }
}

impl<T: Default, const N: usize> Default for Array<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Drop for Array<T, N> {
    fn drop(&mut self) {
        for i in 0..N {
            // SAFETY: Every slot is initialized and dropped exactly once.
            unsafe { self.slots.drop_at(i); }
        }
    }
}

impl<T: Clone, const N: usize> Clone for Array<T, N> {
    fn clone(&self) -> Self {
        let mut slots = RawSlots::with_cap(N);

        for (i, item) in self.iter().enumerate() {
            // SAFETY: The source has exactly N items, so i < N.
            unsafe { slots.write_at(i, item.clone()); }
        }

        Array { slots }
    }
}

impl<T, const N: usize> Index<usize> for Array<T, N> {
    type Output = T;

    /// # Panics
    /// Panics if `index` isn't less than `N`.
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).throw()
    }
}

impl<T, const N: usize> IndexMut<usize> for Array<T, N> {
    /// # Panics
    /// Panics if `index` isn't less than `N`.
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).throw()
    }
}

impl<T, const N: usize> Deref for Array<T, N> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: All N slots are initialized, properly aligned and belong to one allocation (or
        // are dangling for N == 0 or a zero-sized T).
        unsafe { slice::from_raw_parts(self.slots.as_ptr().as_ptr(), N) }
    }
}

impl<T, const N: usize> DerefMut for Array<T, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As for deref, with exclusive access through &mut self.
        unsafe { slice::from_raw_parts_mut(self.slots.as_ptr().as_ptr(), N) }
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Array<T, N> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for Array<T, N> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq, const N: usize> Eq for Array<T, N> {}

impl<T: Debug, const N: usize> Debug for Array<T, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("contents", &&**self)
            .field("size", &N)
            .finish()
    }
}
