use std::iter::FusedIterator;
use std::mem;
use std::slice;

use super::Buffer;
use crate::collections::contiguous::slots::RawSlots;

impl<T> IntoIterator for Buffer<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        // Take the allocation and zero len, so that dropping self afterwards does nothing.
        let back = mem::replace(&mut self.len, 0);
        IntoIter {
            slots: mem::take(&mut self.slots),
            front: 0,
            back,
        }
    }
}

impl<'a, T> IntoIterator for &'a Buffer<T> {
    type Item = &'a T;

    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Buffer<T> {
    type Item = &'a mut T;

    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A type for owned iteration over a [`Buffer`]. See [`Buffer::into_iter`].
///
/// Elements that haven't been yielded when the IntoIter is dropped are dropped with it.
pub struct IntoIter<T> {
    pub(crate) slots: RawSlots<T>,
    pub(crate) front: usize,
    pub(crate) back: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            // SAFETY: Slots in front..back are initialized. Incrementing front marks this one as
            // moved out.
            let value = unsafe { self.slots.read_at(self.front) };
            self.front += 1;
            Some(value)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            // SAFETY: The newly decremented back is still >= front, so the slot is initialized and
            // is now marked as moved out.
            Some(unsafe { self.slots.read_at(self.back) })
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.back - self.front
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let (front, back) = (self.front, self.back);
        self.front = back;

        for i in front..back {
            // SAFETY: Every slot that hasn't been yielded is initialized and dropped once.
            unsafe { self.slots.drop_at(i); }
        }
    }
}
