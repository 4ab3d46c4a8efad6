use derive_more::{Display, Error, From, IsVariant, TryInto};

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("container is empty")]
/// An element was requested from an empty container.
pub struct EmptyContainerError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("index {index} out of range for collection with {len} elements")]
/// An index wasn't less than the number of elements.
pub struct IndexOutOfRangeError {
    /// The index that was requested.
    pub index: usize,
    /// The number of elements at the time.
    pub len: usize,
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("cannot move iterator {requested} step(s) {direction}, only {available} available")]
/// An iterator was asked to move past one of its bounds.
pub struct OutOfRangeError {
    pub direction: Direction,
    pub requested: usize,
    /// Steps left before the bound in `direction`.
    pub available: usize,
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("cannot advance iterator by {requested}, only {available} step(s) available")]
/// An advance was possible in its direction, but not by the full distance.
pub struct InvalidArgumentError {
    pub requested: isize,
    pub available: usize,
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("iterator does not point to an element")]
/// An iterator was read while at the end, or while unbound.
pub struct InvalidStateError;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("capacity overflow")]
/// A requested capacity would need more than [`isize::MAX`] bytes.
pub struct CapacityOverflowError;

/// The direction an iterator was asked to move in.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum Direction {
    #[display("forward")]
    Forward,
    #[display("backward")]
    Backward,
}

/// The ways a [`RandomAccessIter::advance`](super::RandomAccessIter::advance) can fail.
#[derive(Debug, Display, Error, From, TryInto, IsVariant, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceError {
    /// The iterator was already at the bound it was asked to move past.
    OutOfRange(OutOfRangeError),
    /// The iterator could move, but not the full distance requested.
    InvalidArgument(InvalidArgumentError),
}
