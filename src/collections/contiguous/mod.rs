//! Contiguous collection types. Namely [`Buffer`] for collections that grow and shrink at runtime
//! and [`Array`] for a fixed number of elements, with [`RandomAccessIter`] for checked traversal
//! over either.
#![warn(missing_docs)]

pub mod array;
pub mod buffer;
pub mod error;
pub mod iter;

pub(crate) mod slots;

#[doc(inline)]
pub use array::Array;
#[doc(inline)]
pub use buffer::Buffer;
#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use iter::RandomAccessIter;
