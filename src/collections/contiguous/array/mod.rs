//! A module containing [`Array`], a fixed-size heap collection.
//!
//! Array shares [`RandomAccessIter`](super::RandomAccessIter) with [`Buffer`](super::Buffer) for
//! checked traversal. Slice iterators are available through [`Deref`](std::ops::Deref).
//!
//! [`Array`] is also re-exported under the parent module.

mod array;

pub use array::*;
