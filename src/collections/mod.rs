//! Collections provided by the crate.
//!
//! Collections are organized by data structure type:
//! - `vec`: Vector-backed collections (the ring buffer deque)
//! - `other`: Specialized collections (the binary heap)
//! - `error`: The error type shared by their fallible growth paths

pub mod error;
pub mod other;
pub mod vec;

// Re-export commonly used types from submodules
pub use error::GrowError;
pub use other::BinaryHeap;
pub use vec::RingDeque;
