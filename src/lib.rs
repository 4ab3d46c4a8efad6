//! Hand-rolled generic collections, centred on a growable contiguous [`Buffer`] and the
//! bounds-checked [`RandomAccessIter`] used to walk it.
//!
//! # Purpose
//! These types manage their own memory rather than wrapping [`Vec`]. [`Buffer`] owns a raw,
//! uninitialized allocation and keeps a live count, constructing and dropping elements in place
//! and relocating them when it grows or shrinks by a factor of 1.5.
//!
//! # Error Handling
//! Misuse is reported, never silently corrected. Each category of misuse has its own error type:
//! popping or peeking an empty container, indexing out of range, stepping an iterator past its
//! bounds, asking an iterator to advance further than it can, and reading from an iterator that
//! doesn't point at an element. Methods return these through [`Result`]s. Operator forms (`[]`,
//! `+`, `-`, ...) can't, so they panic with the error's message instead.
//!
//! Allocation failure is not recoverable here. It is handed to
//! [`handle_alloc_error`](std::alloc::handle_alloc_error), which aborts the process, so growth
//! never has to be handled at every call site.
//!
//! # Iterator Invalidation
//! A [`RandomAccessIter`] is a plain view of `(position, begin, end)` with no reference back to the
//! container that produced it. It borrows that container for its lifetime, so the borrow checker
//! rejects any reallocating mutation while an iterator is still alive.
//!
//! [`Buffer`]: collections::contiguous::Buffer
//! [`RandomAccessIter`]: collections::contiguous::RandomAccessIter

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "collections")]
pub mod collections;

pub(crate) mod util;
