//! A module containing [`Buffer`] and associated types.
//!
//! Besides Buffer itself, this includes [`IntoIter`] for owned iteration. Borrowed iteration uses
//! either [`RandomAccessIter`](super::RandomAccessIter), through [`Buffer::begin`] and
//! [`Buffer::end`], or [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from
//! [`std::slice`].
//!
//! [`Buffer`] is also re-exported under the parent module.

mod buffer;
mod iter;
mod tests;

pub use buffer::*;
pub use iter::*;
