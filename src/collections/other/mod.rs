//! Other collections.
//!
//! This module contains the comparator-driven binary heap.

pub mod binary_heap;

pub use binary_heap::BinaryHeap;
