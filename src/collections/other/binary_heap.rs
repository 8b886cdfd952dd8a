//! `BinaryHeap`: a priority queue implemented with a binary min-heap.
//!
//! The heap is a `Vec` laid out as a complete binary tree: the element at
//! position `k` has parent `(k - 1) / 2` and children `2k + 1`, `2k + 2`.
//! Ordering comes from a comparator supplied at construction, and the root
//! is always an element no other element strictly precedes.

use core::cmp::Ordering;
use core::fmt;
use core::mem::{self, ManuallyDrop};
use core::ptr;

use crate::collections::GrowError;

/// A min-heap ordered by a caller-supplied comparator.
///
/// For every non-root position `k`, `compare(data[k], data[parent(k)])` is
/// never `Less`.
pub struct BinaryHeap<T, C = fn(&T, &T) -> Ordering> {
    data: Vec<T>,
    compare: C,
}

impl<T: Ord> BinaryHeap<T> {
    /// Creates an empty heap ordered by `Ord`, smallest first.
    pub fn min() -> Self {
        Self::new(T::cmp)
    }
}

impl<T, C> BinaryHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Creates an empty heap bound to `compare` for its whole lifetime.
    pub fn new(compare: C) -> Self {
        Self {
            data: Vec::new(),
            compare,
        }
    }

    /// Creates an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize, compare: C) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            compare,
        }
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the capacity of the heap.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Reserves room for at least `additional` more pushes. The heap itself
    /// is unchanged.
    pub fn grow(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Fallible version of [`grow`](Self::grow).
    ///
    /// # Errors
    /// Returns `GrowError::CapacityOverflow` if `len + additional` overflows,
    /// or `GrowError::AllocFailed` if the allocator cannot provide the buffer.
    pub fn try_grow(&mut self, additional: usize) -> Result<(), GrowError> {
        let capacity = self
            .data
            .len()
            .checked_add(additional)
            .ok_or(GrowError::CapacityOverflow)?;
        self.data
            .try_reserve(additional)
            .map_err(|_| GrowError::AllocFailed { capacity })?;

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.data.len(), capacity = self.data.capacity(), "binary heap reserved");

        Ok(())
    }

    /// Pushes an item onto the heap. O(log n).
    pub fn push(&mut self, item: T) {
        let pos = self.data.len();
        self.data.push(item);
        self.sift_up(pos);
    }

    /// Removes and returns the smallest item, or `None` if the heap is empty.
    /// O(log n).
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop().map(|mut item| {
            if !self.data.is_empty() {
                mem::swap(&mut item, &mut self.data[0]);
                self.sift_down(0);
            }
            item
        })
    }

    /// Returns a reference to the smallest item.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Drops every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns the elements in ascending order under the comparator.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(item) = self.pop() {
            out.push(item);
        }
        out
    }

    /// Moves the item at `pos` towards the root while it strictly precedes
    /// its parent.
    fn sift_up(&mut self, pos: usize) {
        // SAFETY: pos was just pushed, so it is in bounds.
        let mut hole = unsafe { Hole::new(&mut self.data, pos) };
        while hole.pos() > 0 {
            let parent = (hole.pos() - 1) / 2;
            // SAFETY: parent < pos, so it is in bounds and not the hole.
            if (self.compare)(hole.element(), unsafe { hole.get(parent) }) != Ordering::Less {
                break;
            }
            // SAFETY: as above.
            unsafe { hole.move_to(parent) };
        }
    }

    /// Moves the item at `pos` towards the leaves while it strictly follows
    /// the smaller of its children. Ties between children go left.
    fn sift_down(&mut self, pos: usize) {
        let end = self.data.len();
        // SAFETY: callers pass an index of the non-empty buffer.
        let mut hole = unsafe { Hole::new(&mut self.data, pos) };
        let mut child = 2 * hole.pos() + 1;
        while child < end {
            let right = child + 1;
            // SAFETY: child and right are below end and greater than the hole.
            unsafe {
                if right < end && (self.compare)(hole.get(right), hole.get(child)) == Ordering::Less {
                    child = right;
                }
                if (self.compare)(hole.element(), hole.get(child)) != Ordering::Greater {
                    break;
                }
                hole.move_to(child);
            }
            child = 2 * hole.pos() + 1;
        }
    }
}

impl<T, C> BinaryHeap<T, C> {
    /// Iterates over all elements in the heap in arbitrary order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Consumes the heap and returns its buffer in heap order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

/// A vacated slot travelling along a sift path.
///
/// The displaced element is held aside; each `move_to` copies one neighbour
/// into the hole, and `Drop` writes the element back into wherever the hole
/// ended up. A panicking comparator therefore leaves every element present
/// exactly once.
struct Hole<'a, T> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T> Hole<'a, T> {
    /// Lifts the element at `pos` out of `data`.
    ///
    /// # Safety
    /// `pos` must be within `data`.
    #[inline]
    unsafe fn new(data: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos < data.len());
        let elt = ptr::read(data.get_unchecked(pos));
        Hole {
            data,
            elt: ManuallyDrop::new(elt),
            pos,
        }
    }

    #[inline]
    fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    fn element(&self) -> &T {
        &self.elt
    }

    /// # Safety
    /// `index` must be within `data` and not equal to `pos`.
    #[inline]
    unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        self.data.get_unchecked(index)
    }

    /// Copies `data[index]` into the hole and moves the hole to `index`.
    ///
    /// # Safety
    /// `index` must be within `data` and not equal to `pos`.
    #[inline]
    unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        let base = self.data.as_mut_ptr();
        ptr::copy_nonoverlapping(base.add(index), base.add(self.pos), 1);
        self.pos = index;
    }
}

impl<T> Drop for Hole<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: pos is in bounds and its contents were moved elsewhere.
        unsafe {
            let pos = self.pos;
            ptr::write(self.data.get_unchecked_mut(pos), ptr::read(&*self.elt));
        }
    }
}

impl<T: Ord> Default for BinaryHeap<T> {
    fn default() -> Self {
        Self::min()
    }
}

impl<T: Clone, C: Clone> Clone for BinaryHeap<T, C> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            compare: self.compare.clone(),
        }
    }
}

impl<T, C> Extend<T> for BinaryHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.grow(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryHeap")
            .field("len", &self.data.len())
            .field("data", &self.data)
            .finish()
    }
}
