//! A module containing [`RandomAccessIter`], the bounds-checked cursor shared by
//! [`Buffer`](super::Buffer) and [`Array`](super::Array).
//!
//! Owned iteration over a Buffer uses [`IntoIter`](super::buffer::IntoIter) instead, and borrowed
//! iteration is also available through the slice iterators from [`std::slice`].

mod random_access;

pub use random_access::*;
