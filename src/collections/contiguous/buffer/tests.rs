#![cfg(test)]

use std::hash::{BuildHasher, RandomState};

use quickcheck::{Arbitrary, Gen, QuickCheck};

use super::*;
use crate::collections::contiguous::error::{EmptyContainerError, IndexOutOfRangeError};
use crate::util::alloc::{Counters, ZeroSizedType};
use crate::util::panic::assert_panics;

#[test]
fn test_initialisation() {
    let mut buf = Buffer::new();
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.cap(), 0, "A new Buffer shouldn't allocate.");

    buf.push_back(10);
    assert_eq!(buf.len(), 1);
    buf.push_back_list([20, 30, 40]);
    assert_eq!(buf.len(), 4);

    let with_cap: Buffer<i32> = Buffer::with_cap(10);
    assert_eq!(with_cap.len(), 0);
    assert_eq!(with_cap.cap(), 10);

    let listed = Buffer::from([1, 2, 3, 4, 5]);
    assert_eq!(listed.len(), 5);
    assert_eq!(listed.cap(), 10, "Short lists should get the minimum list capacity.");

    let copied = buf.clone();
    assert_eq!(copied.len(), buf.len());
    assert_eq!(copied.cap(), buf.cap(), "A clone should keep the capacity of its source.");

    let mut source = copied.clone();
    let moved = source.take();
    assert_eq!(moved.len(), buf.len());
    assert_eq!(source.len(), 0);
    assert!(source.is_empty());
    assert_eq!(source.cap(), 0, "A taken Buffer should be left without an allocation.");
}

#[test]
fn test_push_and_peek() {
    let mut buf = Buffer::new();
    buf.push_back(1);
    buf.push_back(2);
    buf.push_back(3);

    assert_eq!(buf.len(), 3);
    assert_eq!(buf.front(), Ok(&1));
    assert_eq!(buf.back(), Ok(&3));

    *buf.front_mut().unwrap() = 10;
    *buf.back_mut().unwrap() += 27;
    assert_eq!(&*buf, &[10, 2, 30]);
}

#[test]
fn test_growth() {
    let mut buf = Buffer::new();
    let mut caps = [0; 7];

    for (i, cap) in caps.iter_mut().enumerate() {
        buf.push_back(i);
        *cap = buf.cap();
    }

    assert_eq!(
        caps,
        [1, 2, 3, 4, 6, 6, 9],
        "Capacity should bootstrap to 1, then grow by half, and always by at least one."
    );

    let mut buf = Buffer::new();
    for i in 0..1000 {
        buf.push_back(i);
    }

    assert_eq!(buf.len(), 1000);
    for i in 0..1000 {
        assert_eq!(buf[i], i, "Every value should survive relocation in order.");
    }
}

#[test]
fn test_push_back_list_reallocates_once() {
    let mut buf = Buffer::new();
    buf.push_back(10);
    assert_eq!(buf.cap(), 1);

    buf.push_back_list([20, 30, 40]);
    assert_eq!(buf.cap(), 6, "Bulk append should size to 1.5 times the combined length.");
    assert_eq!(&*buf, &[10, 20, 30, 40]);

    buf.push_back_list([50]);
    assert_eq!(buf.cap(), 6, "Bulk append shouldn't reallocate when the values fit.");
}

#[test]
fn test_pop_and_shrink() {
    let mut buf = Buffer::from_list(0..10);
    assert_eq!(buf.cap(), 15);

    let mut caps = [0; 10];
    for (i, cap) in caps.iter_mut().enumerate() {
        assert_eq!(buf.pop_back(), Ok(9 - i));
        *cap = buf.cap();
    }

    assert_eq!(
        caps,
        [15, 15, 15, 8, 8, 8, 4, 4, 2, 1],
        "Capacity should shrink once fewer than half of the slots are used."
    );

    assert_eq!(buf.pop_back(), Err(EmptyContainerError));

    buf.push_back(42);
    assert_eq!(buf.front(), Ok(&42));
    assert_eq!(buf.back(), Ok(&42));
    assert_eq!(buf.len(), 1);
}

#[test]
fn test_methods() {
    let mut buf = Buffer::from([1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(buf.back(), Ok(&7));
    assert_eq!(buf.pop_back(), Ok(7));
    assert_eq!(buf.back(), Ok(&6));
    assert_eq!(buf.len(), 6);
    assert_eq!(buf.front(), Ok(&1));

    let snapshot = buf.clone();
    assert!(buf.is_occupied());
    assert_eq!(buf, snapshot);

    let tail = Buffer::from([8, 9, 10]);
    let mut joined = &buf + &tail;
    assert_eq!(joined.back(), Ok(&10));
    assert_eq!(joined.len(), 9);

    let value = joined.emplace_back(|| 11);
    assert_eq!(*value, 11);
    assert_eq!(joined[9], 11);

    joined.clear();
    assert!(!joined.is_occupied());
    assert_eq!(joined.cap(), 10, "Clearing should keep the allocation.");
}

#[test]
fn test_concat() {
    let buf = Buffer::from([1, 2, 3, 4, 5, 6, 7]);
    let joined = buf.concat(&Buffer::from([8, 9, 10]));
    assert_eq!(joined.len(), 10);
    assert_eq!(joined.back(), Ok(&10));
    assert_eq!(buf.len(), 7, "Concatenation shouldn't modify its inputs.");

    let unchanged = buf.concat(&Buffer::new());
    assert_eq!(unchanged, buf, "Concatenating an empty Buffer should produce a copy.");
}

#[test]
fn test_empty_errors() {
    let mut buf: Buffer<i32> = Buffer::new();
    assert!(buf.is_empty());
    assert_eq!(buf.pop_back(), Err(EmptyContainerError));
    assert_eq!(buf.back(), Err(EmptyContainerError));
    assert_eq!(buf.front(), Err(EmptyContainerError));
    assert_eq!(buf.front_mut(), Err(EmptyContainerError));
    assert_eq!(buf.get(0), Err(IndexOutOfRangeError { index: 0, len: 0 }));

    assert_panics!({ buf[0] }, "index 0 out of range");
}

#[test]
fn test_index_bounds() {
    let mut buf = Buffer::with_cap(8);
    buf.push_back_list(['a', 'b', 'c']);

    assert_eq!(buf.get(2), Ok(&'c'));
    assert_eq!(
        buf.get(3),
        Err(IndexOutOfRangeError { index: 3, len: 3 }),
        "Allocated but uninitialized slots should be out of range."
    );
    assert!(buf.get_mut(7).is_err());

    buf[1] = 'z';
    assert_eq!(&*buf, &['a', 'z', 'c']);

    assert_panics!({ buf[3] = 'd'; }, "index 3 out of range");
}

#[test]
fn test_copy_and_move_independence() {
    let mut original = Buffer::from([1, 2, 3]);
    let mut copy = original.clone();

    copy.push_back(4);
    copy[0] = 100;
    assert_eq!(&*original, &[1, 2, 3], "Mutating a clone shouldn't affect the original.");
    assert_eq!(&*copy, &[100, 2, 3, 4]);

    let moved = original.take();
    assert!(original.is_empty());
    assert_eq!(&*moved, &[1, 2, 3]);

    original.push_back(9);
    assert_eq!(&*original, &[9], "A taken Buffer should be usable again.");
}

#[test]
fn test_equality_and_hash() {
    let buf = Buffer::from([1, 2, 3]);
    assert_eq!(buf, buf, "Equality should be reflexive.");
    assert_eq!(buf, Buffer::from([1, 2, 3]));

    let mut with_cap = Buffer::with_cap(50);
    with_cap.push_back_list([1, 2, 3]);
    assert_eq!(buf, with_cap, "Capacity shouldn't affect equality.");

    let mut longer = buf.clone();
    longer.push_back(4);
    assert_ne!(buf, longer);
    assert_ne!(buf, Buffer::from([1, 2, 4]));

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&buf),
        state.hash_one(&with_cap),
        "Equal Buffers should produce the same hash."
    );
}

#[test]
fn test_drop_accounting() {
    let counters = Counters::new();
    let mut buf = Buffer::new();

    for i in 0..10 {
        buf.push_back(counters.make(i));
    }
    assert_eq!(counters.drops(), 0, "Relocation shouldn't drop any elements.");

    let popped = buf.pop_back();
    assert_eq!(popped.as_ref().map(|value| value.value), Ok(9));
    drop(popped);
    assert_eq!(counters.drops(), 1);

    let copy = buf.clone();
    assert_eq!(counters.clones(), 9);

    buf.clear();
    assert_eq!(counters.drops(), 10, "Clearing should drop every element.");

    drop(buf);
    assert_eq!(counters.drops(), 10, "A cleared Buffer shouldn't drop anything again.");

    drop(copy);
    assert_eq!(counters.drops(), 19);
}

#[test]
fn test_emplace_back() {
    let mut buf: Buffer<String> = Buffer::new();
    buf.emplace_back(|| String::from("first")).push_str(" value");
    buf.emplace_back(String::new);

    assert_eq!(buf.len(), 2);
    assert_eq!(buf[0], "first value");

    let cap = buf.cap();
    assert_panics!({ buf.emplace_back(|| panic!("construction failed")); });
    assert_eq!(buf.len(), 2, "A failed construction shouldn't add an element.");
    assert!(buf.cap() >= cap);
}

#[test]
fn test_zst_support() {
    let mut buf = Buffer::new();
    for _ in 0..100 {
        buf.push_back(ZeroSizedType);
    }

    assert_eq!(buf.len(), 100);
    assert!(buf.cap() >= 100);
    assert_eq!(buf.get(99), Ok(&ZeroSizedType));

    while buf.pop_back().is_ok() {}
    assert!(buf.is_empty());
}

#[test]
fn test_iterators() {
    let mut buf: Buffer<usize> = (0..5).collect();
    assert_eq!(&*buf, &[0, 1, 2, 3, 4]);

    for value in &mut buf {
        *value *= 2;
    }
    assert_eq!((&buf).into_iter().sum::<usize>(), 20);

    buf.extend([10, 12]);
    assert_eq!(buf.len(), 7);

    let mut iter = buf.clone().into_iter();
    assert_eq!(iter.len(), 7);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(12));
    assert_eq!(iter.next_back(), Some(10));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.len(), 3);

    let counters = Counters::new();
    let counted: Buffer<_> = (0..6).map(|i| counters.make(i)).collect();
    let mut iter = counted.into_iter();
    drop(iter.next());
    drop(iter);
    assert_eq!(
        counters.drops(),
        6,
        "Dropping an owned iterator should drop the remaining elements."
    );
}

#[test]
fn test_formatting() {
    let buf = Buffer::from([1, 2]);
    assert_eq!(format!("{buf}"), "[1, 2]");
    assert_eq!(format!("{buf:?}"), "Buffer { contents: [1, 2], len: 2, cap: 10 }");
}

#[derive(Debug, Clone)]
enum Op {
    Push(u8),
    PushList(Vec<u8>),
    Emplace(u8),
    Pop,
    Clear,
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 8 {
            0 | 1 | 2 => Op::Push(u8::arbitrary(g)),
            3 => Op::PushList(Vec::arbitrary(g)),
            4 => Op::Emplace(u8::arbitrary(g)),
            5 | 6 => Op::Pop,
            _ => Op::Clear,
        }
    }
}

/// Property: after any sequence of operations, 0 <= len <= cap holds, and every index below len
/// reads back the value a plain model holds at that index.
#[test]
fn operations_keep_invariants_quickcheck() {
    fn prop(ops: Vec<Op>) -> bool {
        let mut buf = Buffer::new();
        let mut model = Vec::new();

        for op in ops {
            match op {
                Op::Push(value) => {
                    buf.push_back(value);
                    model.push(value);
                },
                Op::PushList(values) => {
                    buf.push_back_list(values.iter().copied());
                    model.extend(values);
                },
                Op::Emplace(value) => {
                    if *buf.emplace_back(|| value) != value {
                        return false;
                    }
                    model.push(value);
                },
                Op::Pop => {
                    if buf.pop_back().ok() != model.pop() {
                        return false;
                    }
                },
                Op::Clear => {
                    buf.clear();
                    model.clear();
                },
            }

            if buf.len() > buf.cap() || buf.len() != model.len() {
                return false;
            }

            if (0..buf.len()).any(|i| buf.get(i) != Ok(&model[i])) {
                return false;
            }
        }

        true
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Vec<Op>) -> bool);
}

/// Property: pushing N values into a new Buffer yields length N, with each value readable at the
/// index it was pushed to.
#[test]
fn push_round_trip_quickcheck() {
    fn prop(values: Vec<i64>) -> bool {
        let mut buf = Buffer::new();
        for value in values.iter() {
            buf.push_back(*value);
        }

        buf.len() == values.len()
            && values.iter().enumerate().all(|(i, value)| buf[i] == *value)
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Vec<i64>) -> bool);
}
