use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::collections::contiguous::error::{
    AdvanceError, Direction, IndexOutOfRangeError, InvalidArgumentError, InvalidStateError,
    OutOfRangeError,
};
use crate::util::result::ResultExtension;

/// A bounds-checked cursor over a contiguous run of elements, created with
/// [`Buffer::begin`](crate::collections::contiguous::Buffer::begin) or
/// [`Buffer::end`](crate::collections::contiguous::Buffer::end) (and the [`Array`] equivalents).
///
/// A RandomAccessIter is a small value made up of a position and the `[begin, end)` envelope of the
/// collection it was created from, fixed at creation. It holds no reference back to that
/// collection and never re-reads its length. Instead it borrows the elements for `'a`, so any
/// mutation that could reallocate the collection (and leave the envelope dangling) is rejected at
/// compile time rather than discovered at runtime.
///
/// Positions range over `0..=len`, where `len` is the end position. Every movement is checked
/// against the envelope and fails loudly instead of clamping:
/// - Stepping past either bound returns an [`OutOfRangeError`].
/// - Reading at the end position returns an [`InvalidStateError`].
///
/// RandomAccessIter also implements [`Iterator`], yielding each element from the current position
/// up to the end, which allows `for value in buffer.begin()`.
///
/// [`Array`]: crate::collections::contiguous::Array
///
/// # Examples
/// ```
/// # use custom_collections::collections::contiguous::Buffer;
/// let buf = Buffer::from([10, 20, 30]);
/// let mut iter = buf.begin();
/// assert_eq!(iter.read(), Ok(&10));
/// iter.move_next().unwrap().move_next().unwrap();
/// assert_eq!(iter.read(), Ok(&30));
/// assert!(iter.move_next().unwrap().move_next().is_err());
/// assert_eq!(iter, buf.end());
/// ```
pub struct RandomAccessIter<'a, T> {
    pub(crate) slice: &'a [T],
    pub(crate) index: usize,
}

impl<'a, T> RandomAccessIter<'a, T> {
    /// Creates an iterator over `slice`, positioned at `index`. An `index` equal to the length of
    /// the slice produces an end iterator.
    ///
    /// # Errors
    /// Returns an [`IndexOutOfRangeError`] if `index` is greater than the length of `slice`.
    pub const fn new(slice: &'a [T], index: usize) -> Result<Self, IndexOutOfRangeError> {
        if index > slice.len() {
            Err(IndexOutOfRangeError {
                index,
                len: slice.len(),
            })
        } else {
            Ok(RandomAccessIter { slice, index })
        }
    }

    /// Returns the current position, as an offset from the beginning of the envelope.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the number of forward steps left before the end position.
    pub const fn remaining(&self) -> usize {
        self.slice.len() - self.index
    }

    pub const fn is_begin(&self) -> bool {
        self.index == 0
    }

    pub const fn is_end(&self) -> bool {
        self.index == self.slice.len()
    }

    /// Moves the iterator one position forward (prefix `++`).
    ///
    /// # Errors
    /// Returns an [`OutOfRangeError`] if the iterator is already at the end position. The iterator
    /// doesn't move in that case.
    pub const fn move_next(&mut self) -> Result<&mut Self, OutOfRangeError> {
        if self.is_end() {
            return Err(OutOfRangeError {
                direction: Direction::Forward,
                requested: 1,
                available: 0,
            });
        }
        self.index += 1;
        Ok(self)
    }

    /// Moves the iterator one position backward (prefix `--`).
    ///
    /// # Errors
    /// Returns an [`OutOfRangeError`] if the iterator is already at the beginning.
    pub const fn move_prev(&mut self) -> Result<&mut Self, OutOfRangeError> {
        if self.is_begin() {
            return Err(OutOfRangeError {
                direction: Direction::Backward,
                requested: 1,
                available: 0,
            });
        }
        self.index -= 1;
        Ok(self)
    }

    /// Moves the iterator one position forward, returning a copy of it from before the move
    /// (postfix `++`).
    ///
    /// # Errors
    /// Returns an [`OutOfRangeError`] if the iterator is already at the end position.
    pub fn post_next(&mut self) -> Result<Self, OutOfRangeError> {
        let before = *self;
        self.move_next()?;
        Ok(before)
    }

    /// Moves the iterator one position backward, returning a copy of it from before the move
    /// (postfix `--`).
    ///
    /// # Errors
    /// Returns an [`OutOfRangeError`] if the iterator is already at the beginning.
    pub fn post_prev(&mut self) -> Result<Self, OutOfRangeError> {
        let before = *self;
        self.move_prev()?;
        Ok(before)
    }

    /// Moves the iterator by a signed `distance`, forward when positive and backward when
    /// negative.
    ///
    /// The whole distance is checked before moving, so on failure the iterator is left exactly
    /// where it was.
    ///
    /// # Errors
    /// - [`AdvanceError::OutOfRange`] if the iterator is already at the bound it would need to move
    ///   past (the end for a positive distance, the beginning for a negative one).
    /// - [`AdvanceError::InvalidArgument`] if the iterator can move in that direction, but fewer
    ///   than `|distance|` steps.
    ///
    /// # Examples
    /// ```
    /// # use custom_collections::collections::contiguous::Buffer;
    /// let buf = Buffer::from([1, 2, 3, 4]);
    /// let mut iter = buf.begin();
    /// iter.advance(3).unwrap();
    /// assert_eq!(iter.read(), Ok(&4));
    /// assert!(iter.advance(5).unwrap_err().is_invalid_argument());
    /// assert_eq!(iter.index(), 3);
    /// iter.advance(-2).unwrap();
    /// assert_eq!(iter.read(), Ok(&2));
    /// ```
    pub fn advance(&mut self, distance: isize) -> Result<&mut Self, AdvanceError> {
        let (direction, available) = if distance >= 0 {
            (Direction::Forward, self.remaining())
        } else {
            (Direction::Backward, self.index)
        };
        let requested = distance.unsigned_abs();

        if requested == 0 {
            return Ok(self);
        }

        if available == 0 {
            return Err(OutOfRangeError {
                direction,
                requested,
                available,
            }.into());
        }

        if requested > available {
            return Err(InvalidArgumentError {
                requested: distance,
                available,
            }.into());
        }

        match direction {
            Direction::Forward => self.index += requested,
            Direction::Backward => self.index -= requested,
        }
        Ok(self)
    }

    /// Returns a copy of the iterator moved `amount` positions forward (`+`).
    ///
    /// # Errors
    /// Returns an [`OutOfRangeError`] if fewer than `amount` positions remain before the end.
    pub const fn checked_add(self, amount: usize) -> Result<Self, OutOfRangeError> {
        let available = self.remaining();
        if amount > available {
            Err(OutOfRangeError {
                direction: Direction::Forward,
                requested: amount,
                available,
            })
        } else {
            Ok(RandomAccessIter {
                slice: self.slice,
                index: self.index + amount,
            })
        }
    }

    /// Returns a copy of the iterator moved `amount` positions backward (`-`).
    ///
    /// # Errors
    /// Returns an [`OutOfRangeError`] if fewer than `amount` positions precede the iterator.
    pub const fn checked_sub(self, amount: usize) -> Result<Self, OutOfRangeError> {
        if amount > self.index {
            Err(OutOfRangeError {
                direction: Direction::Backward,
                requested: amount,
                available: self.index,
            })
        } else {
            Ok(RandomAccessIter {
                slice: self.slice,
                index: self.index - amount,
            })
        }
    }

    /// Moves the iterator `amount` positions forward in place (`+=`).
    ///
    /// # Errors
    /// Returns an [`OutOfRangeError`] if fewer than `amount` positions remain, without moving.
    pub fn forward(&mut self, amount: usize) -> Result<&mut Self, OutOfRangeError> {
        *self = self.checked_add(amount)?;
        Ok(self)
    }

    /// Moves the iterator `amount` positions backward in place (`-=`).
    ///
    /// # Errors
    /// Returns an [`OutOfRangeError`] if fewer than `amount` positions precede the iterator,
    /// without moving.
    pub fn backward(&mut self, amount: usize) -> Result<&mut Self, OutOfRangeError> {
        *self = self.checked_sub(amount)?;
        Ok(self)
    }

    /// Returns a reference to the element at the current position (dereference).
    ///
    /// # Errors
    /// Returns an [`InvalidStateError`] if the iterator is at the end position and so doesn't
    /// point to an element.
    pub const fn read(&self) -> Result<&'a T, InvalidStateError> {
        if self.index < self.slice.len() {
            Ok(&self.slice[self.index])
        } else {
            Err(InvalidStateError)
        }
    }

    /// Returns a raw pointer to the current position without any bounds check (member access).
    /// The pointer is one past the last element when the iterator is at the end position.
    pub const fn as_ptr(&self) -> *const T {
        self.slice.as_ptr().wrapping_add(self.index)
    }
}

impl<T> Clone for RandomAccessIter<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RandomAccessIter<'_, T> {}

impl<T> Default for RandomAccessIter<'_, T> {
    /// Creates an unbound iterator with an empty envelope. It is both at the beginning and at the
    /// end, so every movement and every read fails.
    fn default() -> Self {
        RandomAccessIter {
            slice: &[],
            index: 0,
        }
    }
}

/// Iterators compare equal when they are at the same position. Comparing iterators created from
/// different collections is allowed but not meaningful.
impl<T> PartialEq for RandomAccessIter<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        // The index is compared as well, because pointers to zero-sized values never move.
        self.as_ptr() == other.as_ptr() && self.index == other.index
    }
}

impl<T> Eq for RandomAccessIter<'_, T> {}

impl<T> Add<usize> for RandomAccessIter<'_, T> {
    type Output = Self;

    /// # Panics
    /// Panics if fewer than `rhs` positions remain before the end. See
    /// [`RandomAccessIter::checked_add`] for a non-panicking version.
    fn add(self, rhs: usize) -> Self::Output {
        self.checked_add(rhs).throw()
    }
}

impl<T> Sub<usize> for RandomAccessIter<'_, T> {
    type Output = Self;

    /// # Panics
    /// Panics if fewer than `rhs` positions precede the iterator. See
    /// [`RandomAccessIter::checked_sub`] for a non-panicking version.
    fn sub(self, rhs: usize) -> Self::Output {
        self.checked_sub(rhs).throw()
    }
}

impl<T> AddAssign<usize> for RandomAccessIter<'_, T> {
    fn add_assign(&mut self, rhs: usize) {
        self.forward(rhs).throw();
    }
}

impl<T> SubAssign<usize> for RandomAccessIter<'_, T> {
    fn sub_assign(&mut self, rhs: usize) {
        self.backward(rhs).throw();
    }
}

impl<'a, T> Iterator for RandomAccessIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.read().ok()?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl<T> ExactSizeIterator for RandomAccessIter<'_, T> {
    fn len(&self) -> usize {
        self.remaining()
    }
}

impl<T> FusedIterator for RandomAccessIter<'_, T> {}

impl<T> Debug for RandomAccessIter<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomAccessIter")
            .field("index", &self.index)
            .field("len", &self.slice.len())
            .finish()
    }
}
