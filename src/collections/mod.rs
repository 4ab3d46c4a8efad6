//! Collection types.
//!
//! # Method
//! Contiguous types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut) for
//! read-only slice functionality, while the checked accessors and iterators report misuse through
//! typed errors.

#[cfg(feature = "contiguous")]
pub mod contiguous;
