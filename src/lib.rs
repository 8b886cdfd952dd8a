//! # `ringheap` - Ring Buffer Deque and Binary Heap
//!
//! Two generic, single-owner containers with no hidden allocation beyond what
//! growth requires:
//!
//! - [`RingDeque<T>`]: a double-ended queue on a growable circular buffer.
//!   Amortized O(1) push/pop at both ends, O(1) indexing.
//! - [`BinaryHeap<T, C>`]: a min-heap on a linear buffer, ordered by a
//!   comparator fixed at construction. O(log n) push/pop.
//!
//! ## Guarantees
//!
//! ### Memory Safety
//! - **Owned slots**: the deque tracks which slots are live with `head`/`len`;
//!   popped slots are never read or dropped again, even when a stale copy of
//!   the value remains in the buffer after growth.
//! - **Panic safety**: a panicking comparator or `Clone` impl never causes a
//!   double drop. Heap sifts restore the displaced element on unwind.
//!
//! ### Growth
//! - **Minimal relocation**: when the deque's buffer is extended, only the
//!   shorter of the two wrapped segments is copied, bounding relocation by
//!   `len / 2` in the common case.
//! - **Adopted storage**: `RingDeque::from(vec)` reuses the vector's
//!   allocation, including any spare capacity.
//!
//! ### Errors
//! - Popping an empty container returns `None`: emptiness is routine.
//! - Out-of-range indexing through [`RingDeque::at`] or `Index` panics.
//! - `try_grow` reports capacity overflow and allocation failure as
//!   [`GrowError`]; `grow` panics on them like `Vec::reserve`.
//!
//! ### Concurrency
//! Neither container synchronizes internally. Mutation requires `&mut self`,
//! so sharing one across threads needs an external `Mutex` or a channel.
//!
//! ## Features
//!
//! - `tracing`: emit `trace!` events whenever a buffer is reallocated.
//! - `proptest`: `Arbitrary` for `RingDeque<T>`, generating wrapped layouts.
//!
//! ## Example
//!
//! ```rust
//! use ringheap::{BinaryHeap, RingDeque};
//!
//! let mut dq = RingDeque::with_capacity(3);
//! dq.push_back_slice(&[1, 2, 3]);
//! dq.pop_front();
//! dq.pop_front();
//! dq.push_front_slice(&[4, 5]);
//! assert_eq!(dq.capacity(), 3);
//! assert_eq!(dq.to_string(), "[4 5 3]");
//!
//! let mut heap = BinaryHeap::new(|a: &(&str, u32), b: &(&str, u32)| a.1.cmp(&b.1));
//! heap.push(("job1", 10));
//! heap.push(("job2", 30));
//! heap.push(("job4", 20));
//! assert_eq!(heap.pop(), Some(("job1", 10)));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod collections;

pub use collections::{BinaryHeap, GrowError, RingDeque};

// Compile-time assertions for memory layout
const _: () = {
    use core::cmp::Ordering;
    use core::mem;

    // A deque is its slot vector plus two indices.
    assert!(mem::size_of::<RingDeque<u64>>() == mem::size_of::<Vec<u64>>() + 2 * mem::size_of::<usize>());

    // A heap with the default comparator carries a single function pointer.
    assert!(
        mem::size_of::<BinaryHeap<u64>>()
            == mem::size_of::<Vec<u64>>() + mem::size_of::<fn(&u64, &u64) -> Ordering>()
    );
};
