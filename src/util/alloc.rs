#![cfg(test)]

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroSizedType;

/// Shared tallies for every [`CountedDrop`] created from the same [`Counters`].
#[derive(Debug, Default, Clone)]
pub struct Counters {
    drops: Rc<Cell<usize>>,
    clones: Rc<Cell<usize>>,
}

impl Counters {
    pub fn new() -> Counters {
        Counters::default()
    }

    pub fn make(&self, value: usize) -> CountedDrop {
        CountedDrop {
            value,
            counters: self.clone(),
        }
    }

    pub fn drops(&self) -> usize {
        self.drops.get()
    }

    pub fn clones(&self) -> usize {
        self.clones.get()
    }
}

/// A value that records each time it is cloned or dropped, for checking that a container constructs
/// and destroys every element exactly once.
#[derive(Debug)]
pub struct CountedDrop {
    pub value: usize,
    counters: Counters,
}

impl Clone for CountedDrop {
    fn clone(&self) -> Self {
        self.counters.clones.set(self.counters.clones.get() + 1);
        CountedDrop {
            value: self.value,
            counters: self.counters.clone(),
        }
    }
}

impl PartialEq for CountedDrop {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.counters.drops.set(self.counters.drops.get() + 1);
    }
}
