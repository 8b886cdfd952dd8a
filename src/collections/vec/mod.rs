//! Vector-backed collections.
//!
//! This module contains the ring buffer deque, which keeps its elements in a
//! `Vec` of slots and maps logical positions onto it with modular arithmetic.

pub mod ring_deque;

pub use ring_deque::RingDeque;
