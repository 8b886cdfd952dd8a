//! `RingDeque`: a growable ring buffer deque.
//!
//! Elements live in a `Vec` of `MaybeUninit` slots whose length is the ring
//! capacity. Two integers describe the occupied region: `head`, the physical
//! slot of the logical first element, and `len`. Logical index `i` lives at
//! physical slot `(head + i) mod capacity`.
//!
//! ```text
//!  contiguous            wrapped
//!     H       L             L     H
//!  [. o o o o . .]       [o o . . o o o]
//! ```
//!
//! Performance Characteristics:
//! - Push/Pop at either end: amortized O(1)
//! - Indexed access: O(1) with modular arithmetic
//! - Growth: O(new capacity) to extend the buffer, plus a relocation bounded
//!   by the shorter wrapped segment
//!
//! The deque is a plain single-owner value. Every mutation goes through
//! `&mut self`; sharing it between threads requires an external `Mutex` or a
//! channel hand-off.

use core::fmt;
use core::mem::{self, ManuallyDrop, MaybeUninit};
use core::ops::{Index, IndexMut, Range};
use core::ptr;
use core::slice;

use crate::collections::GrowError;

#[cfg(feature = "proptest")]
mod arbitrary;
mod iter;

pub use iter::{IntoIter, Iter, IterMut, PopAll};

/// Capacity of the first allocation made by a deque that starts out empty.
pub const MIN_NON_ZERO_CAPACITY: usize = 4;

/// How the occupied region was moved after the buffer was extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relocation {
    /// The region did not wrap; nothing moved.
    None,
    /// The wrapped tail `[0, tail_len)` moved up past the old end.
    Tail,
    /// The head segment `[head, old_cap)` moved to the end of the new buffer.
    Head,
}

/// A double-ended queue backed by a growable ring buffer.
pub struct RingDeque<T> {
    /// Ring storage. `buf.len()` is the capacity; only the slots described by
    /// `head` and `len` are initialized.
    buf: Vec<MaybeUninit<T>>,
    /// Physical index of the logical first element.
    head: usize,
    /// Number of initialized elements.
    len: usize,
}

impl<T> RingDeque<T> {
    /// Creates an empty deque. No allocation happens until the first push.
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            head: 0,
            len: 0,
        }
    }

    /// Creates an empty deque that holds exactly `capacity` elements before
    /// it needs to grow.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, MaybeUninit::uninit);
        Self {
            buf,
            head: 0,
            len: 0,
        }
    }

    /// Number of elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the deque can hold without reallocating.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline(always)]
    fn wrap_add(&self, idx: usize, addend: usize) -> usize {
        let i = idx + addend;
        if i >= self.capacity() {
            i - self.capacity()
        } else {
            i
        }
    }

    #[inline(always)]
    fn wrap_sub(&self, idx: usize, subtrahend: usize) -> usize {
        if idx >= subtrahend {
            idx - subtrahend
        } else {
            idx + self.capacity() - subtrahend
        }
    }

    #[inline(always)]
    fn to_physical_idx(&self, idx: usize) -> usize {
        self.wrap_add(self.head, idx)
    }

    /// Physical ranges of the occupied region, in logical order.
    fn slot_ranges(&self) -> (Range<usize>, Range<usize>) {
        let cap = self.capacity();
        if self.head + self.len <= cap {
            (self.head..self.head + self.len, 0..0)
        } else {
            let head_len = cap - self.head;
            (self.head..cap, 0..self.len - head_len)
        }
    }

    /// Returns a reference to the element at logical index `idx`, or `None`
    /// if it is out of bounds.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx >= self.len {
            return None;
        }
        let slot = &self.buf[self.to_physical_idx(idx)];
        // SAFETY: idx < len, so the slot is inside the occupied region.
        Some(unsafe { slot.assume_init_ref() })
    }

    /// Returns a mutable reference to the element at logical index `idx`,
    /// or `None` if it is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        if idx >= self.len {
            return None;
        }
        let phys = self.to_physical_idx(idx);
        // SAFETY: idx < len, so the slot is inside the occupied region.
        Some(unsafe { self.buf[phys].assume_init_mut() })
    }

    /// Returns the element at logical index `idx`.
    ///
    /// # Panics
    /// Panics if `idx >= self.len()`. An out-of-range index is a caller bug,
    /// so there is no sentinel value.
    #[inline]
    #[track_caller]
    pub fn at(&self, idx: usize) -> &T {
        match self.get(idx) {
            Some(value) => value,
            None => out_of_range(idx, self.len),
        }
    }

    /// Returns the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|idx| self.get(idx))
    }

    /// Returns the first element mutably.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Returns the last element mutably.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len.checked_sub(1) {
            Some(idx) => self.get_mut(idx),
            None => None,
        }
    }

    /// Returns a pair of slices holding the contents in logical order.
    ///
    /// The second slice is empty unless the occupied region wraps around the
    /// end of the buffer.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (first, second) = self.slot_ranges();
        // SAFETY: both ranges cover occupied slots only.
        unsafe {
            (
                slice_assume_init(&self.buf[first]),
                slice_assume_init(&self.buf[second]),
            )
        }
    }

    /// Returns a pair of mutable slices holding the contents in logical order.
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (first, second) = self.slot_ranges();
        // The wrapped run always ends at or before `head`.
        let (low, high) = self.buf.split_at_mut(first.start);
        let first_len = first.len();
        // SAFETY: both ranges cover occupied slots only.
        unsafe {
            (
                slice_assume_init_mut(&mut high[..first_len]),
                slice_assume_init_mut(&mut low[second]),
            )
        }
    }

    /// Removes and returns the first element, or `None` if the deque is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let old_head = self.head;
        self.head = self.to_physical_idx(1);
        self.len -= 1;
        // SAFETY: the slot was occupied and is now outside the occupied
        // region, so it is read exactly once.
        Some(unsafe { self.buf[old_head].assume_init_read() })
    }

    /// Removes and returns the last element, or `None` if the deque is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.len -= 1;
        let idx = self.to_physical_idx(self.len);
        // SAFETY: the slot was the last occupied one and is now free.
        Some(unsafe { self.buf[idx].assume_init_read() })
    }

    /// Appends an element to the back.
    pub fn push_back(&mut self, value: T) {
        self.grow(1);
        let idx = self.to_physical_idx(self.len);
        self.buf[idx] = MaybeUninit::new(value);
        self.len += 1;
    }

    /// Prepends an element to the front.
    pub fn push_front(&mut self, value: T) {
        self.grow(1);
        self.head = self.wrap_sub(self.head, 1);
        self.buf[self.head] = MaybeUninit::new(value);
        self.len += 1;
    }

    /// Appends clones of `values` to the back, in order.
    ///
    /// The buffer grows at most once for the whole slice.
    pub fn push_back_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.grow(values.len());
        let start = self.to_physical_idx(self.len);
        self.write_cloned(start, values);
        self.len += values.len();
    }

    /// Prepends clones of `values` to the front. `values[0]` becomes the new
    /// first element.
    ///
    /// The buffer grows at most once for the whole slice.
    pub fn push_front_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.grow(values.len());
        let new_head = self.wrap_sub(self.head, values.len());
        self.write_cloned(new_head, values);
        self.head = new_head;
        self.len += values.len();
    }

    /// Prepends every element of `values`, keeping their iteration order:
    /// the first item yielded becomes the new front.
    pub fn extend_front<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: DoubleEndedIterator,
    {
        let iter = values.into_iter();
        self.grow(iter.size_hint().0);
        for value in iter.rev() {
            self.push_front(value);
        }
    }

    /// Writes clones of `values` into free slots starting at physical index
    /// `start`, wrapping to slot 0 at the end of the buffer.
    ///
    /// Does not touch `head` or `len`; if a clone panics the values already
    /// written are leaked, never double-dropped.
    fn write_cloned(&mut self, start: usize, values: &[T])
    where
        T: Clone,
    {
        let first_len = values.len().min(self.capacity() - start);
        let (first, second) = values.split_at(first_len);
        for (slot, value) in self.buf[start..start + first_len].iter_mut().zip(first) {
            *slot = MaybeUninit::new(value.clone());
        }
        for (slot, value) in self.buf[..second.len()].iter_mut().zip(second) {
            *slot = MaybeUninit::new(value.clone());
        }
    }

    /// Makes room for at least `additional` more elements without another
    /// reallocation.
    ///
    /// # Panics
    /// Panics if the new capacity overflows `usize` or the allocator fails,
    /// the same way `Vec::reserve` does.
    #[inline]
    pub fn grow(&mut self, additional: usize) {
        if self.capacity() - self.len >= additional {
            return;
        }
        if let Err(err) = self.try_grow(additional) {
            panic!("RingDeque::grow: {err}");
        }
    }

    /// Fallible version of [`grow`](Self::grow).
    ///
    /// # Errors
    /// Returns `GrowError::CapacityOverflow` if `len + additional` overflows,
    /// or `GrowError::AllocFailed` if the allocator cannot provide the buffer.
    pub fn try_grow(&mut self, additional: usize) -> Result<(), GrowError> {
        let old_cap = self.capacity();
        if old_cap - self.len >= additional {
            return Ok(());
        }
        let required = self
            .len
            .checked_add(additional)
            .ok_or(GrowError::CapacityOverflow)?;
        let new_cap = required
            .max(old_cap.saturating_mul(2))
            .max(MIN_NON_ZERO_CAPACITY);
        let relocation = self.reallocate(new_cap)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            old_capacity = old_cap,
            new_capacity = new_cap,
            len = self.len,
            ?relocation,
            "ring deque grew"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = relocation;

        Ok(())
    }

    /// Extends the buffer to `new_cap` slots and repairs the occupied region.
    ///
    /// Extending keeps every old slot at its physical index and appends the
    /// new slots after the old end, so only a wrapped region has to move:
    ///
    /// ```text
    ///     H             L
    ///    [o o o o o o o o ]
    ///     H             L
    ///  A [o o o o o o o o . . . . . . . . ]
    ///         L H
    ///    [o o o o o o o o ]
    ///           H             L
    ///  B [. . . o o o o o o o o . . . . . ]
    ///               L H
    ///    [o o o o o o o o ]
    ///               L                 H
    ///  C [o o o o o o . . . . . . . . o o ]
    /// ```
    fn reallocate(&mut self, new_cap: usize) -> Result<Relocation, GrowError> {
        let old_cap = self.capacity();
        debug_assert!(new_cap > old_cap);
        self.buf
            .try_reserve_exact(new_cap - old_cap)
            .map_err(|_| GrowError::AllocFailed { capacity: new_cap })?;
        self.buf.resize_with(new_cap, MaybeUninit::uninit);

        if self.head <= old_cap - self.len {
            return Ok(Relocation::None);
        }

        let head_len = old_cap - self.head;
        let tail_len = self.len - head_len;
        let base = self.buf.as_mut_ptr();

        if head_len > tail_len && new_cap - old_cap >= tail_len {
            // SAFETY: [0, tail_len) is occupied and the destination
            // [old_cap, old_cap + tail_len) lies in the new, disjoint slots.
            unsafe { ptr::copy_nonoverlapping(base, base.add(old_cap), tail_len) };
            Ok(Relocation::Tail)
        } else {
            let new_head = new_cap - head_len;
            // SAFETY: [head, old_cap) is occupied and the destination ends at
            // new_cap. new_head > tail_len since new_cap > len, so the tail is
            // untouched. Source and destination overlap when the buffer grew
            // by less than head_len, hence `copy`.
            unsafe { ptr::copy(base.add(self.head), base.add(new_head), head_len) };
            self.head = new_head;
            Ok(Relocation::Head)
        }
    }

    /// Drops every element, keeping the allocated capacity.
    ///
    /// The physical position of the next element pushed is unspecified.
    pub fn reset(&mut self) {
        /// Drops the second slice even if dropping the first one panics.
        struct Dropper<'a, T>(&'a mut [T]);

        impl<T> Drop for Dropper<'_, T> {
            fn drop(&mut self) {
                // SAFETY: the slice was detached from the deque before this
                // guard was built, so it is dropped exactly once.
                unsafe { ptr::drop_in_place(self.0) }
            }
        }

        let (front, back) = self.as_mut_slices();
        let front: *mut [T] = front;
        let back: *mut [T] = back;
        self.head = 0;
        self.len = 0;
        // SAFETY: len is already 0, so the deque no longer owns these slots.
        unsafe {
            let _back_dropper = Dropper(&mut *back);
            ptr::drop_in_place(front);
        }
    }

    /// Alias of [`reset`](Self::reset).
    #[inline]
    pub fn clear(&mut self) {
        self.reset();
    }

    /// Iterates over the elements front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        let (first, second) = self.as_slices();
        Iter::new(first, second)
    }

    /// Iterates mutably over the elements front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (first, second) = self.as_mut_slices();
        IterMut::new(first, second)
    }

    /// Iterates over `(logical index, element)` pairs front to back without
    /// removing anything.
    pub fn all(&self) -> core::iter::Enumerate<Iter<'_, T>> {
        self.iter().enumerate()
    }

    /// Returns an iterator that pops elements from the front as it is
    /// consumed.
    ///
    /// Elements are removed one per `next()` call. Dropping the iterator
    /// early leaves the unconsumed elements in the deque.
    pub fn pop_all(&mut self) -> PopAll<'_, T> {
        PopAll::new(self)
    }
}

/// Reinterprets initialized slots as a slice of `T`.
///
/// # Safety
/// Every slot in `slots` must be initialized.
#[inline(always)]
unsafe fn slice_assume_init<T>(slots: &[MaybeUninit<T>]) -> &[T] {
    slice::from_raw_parts(slots.as_ptr().cast::<T>(), slots.len())
}

/// Mutable counterpart of [`slice_assume_init`].
///
/// # Safety
/// Every slot in `slots` must be initialized.
#[inline(always)]
unsafe fn slice_assume_init_mut<T>(slots: &mut [MaybeUninit<T>]) -> &mut [T] {
    slice::from_raw_parts_mut(slots.as_mut_ptr().cast::<T>(), slots.len())
}

#[cold]
#[track_caller]
fn out_of_range(idx: usize, len: usize) -> ! {
    panic!("index out of range [{idx}] with length {len}")
}

impl<T> Default for RingDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RingDeque<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: Clone> Clone for RingDeque<T> {
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.capacity());
        out.extend(self.iter().cloned());
        out
    }
}

impl<T> From<Vec<T>> for RingDeque<T> {
    /// Adopts the vector's allocation as the ring buffer. The capacity of the
    /// deque is the capacity of the vector; nothing is copied.
    fn from(vec: Vec<T>) -> Self {
        let mut vec = ManuallyDrop::new(vec);
        let len = vec.len();
        let raw_cap = vec.capacity();
        // Zero-sized types report `usize::MAX` capacity.
        let capacity = if mem::size_of::<T>() == 0 { len } else { raw_cap };
        // SAFETY: `MaybeUninit<T>` has the same layout as `T`, and the
        // pointer, length and capacity come from a live `Vec<T>` that is no
        // longer used.
        let mut buf =
            unsafe { Vec::from_raw_parts(vec.as_mut_ptr().cast::<MaybeUninit<T>>(), len, raw_cap) };
        buf.resize_with(capacity, MaybeUninit::uninit);
        Self { buf, head: 0, len }
    }
}

impl<T> From<RingDeque<T>> for Vec<T> {
    fn from(deque: RingDeque<T>) -> Self {
        deque.into_iter().collect()
    }
}

impl<T> FromIterator<T> for RingDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> Extend<T> for RingDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.grow(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> Index<usize> for RingDeque<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, idx: usize) -> &T {
        self.at(idx)
    }
}

impl<T> IndexMut<usize> for RingDeque<T> {
    #[track_caller]
    fn index_mut(&mut self, idx: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(idx) {
            Some(value) => value,
            None => out_of_range(idx, len),
        }
    }
}

impl<T: PartialEq> PartialEq for RingDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingDeque<T> {}

impl<T: fmt::Debug> fmt::Debug for RingDeque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for RingDeque<T> {
    /// Renders the contents front to back as `[a b c]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.all() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(value, f)?;
        }
        f.write_str("]")
    }
}

impl<T> IntoIterator for RingDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a RingDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RingDeque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
