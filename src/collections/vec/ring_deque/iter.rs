//! Iterators over a [`RingDeque`].
//!
//! Borrowing iterators walk the (at most two) occupied slices; draining
//! iterators pop one element per step.

use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use core::slice;

use super::RingDeque;

/// Borrowing front-to-back iterator, created by [`RingDeque::iter`].
pub struct Iter<'a, T> {
    front: slice::Iter<'a, T>,
    back: slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(front: &'a [T], back: &'a [T]) -> Self {
        Self {
            front: front.iter(),
            back: back.iter(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter")
            .field(&self.front.as_slice())
            .field(&self.back.as_slice())
            .finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        match self.front.next() {
            Some(value) => Some(value),
            None => {
                self.front = mem::take(&mut self.back);
                self.front.next()
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn fold<Acc, F>(self, init: Acc, mut f: F) -> Acc
    where
        F: FnMut(Acc, Self::Item) -> Acc,
    {
        let acc = self.front.fold(init, &mut f);
        self.back.fold(acc, &mut f)
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        match self.back.next_back() {
            Some(value) => Some(value),
            None => {
                self.back = mem::take(&mut self.front);
                self.back.next_back()
            }
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

/// Mutable front-to-back iterator, created by [`RingDeque::iter_mut`].
pub struct IterMut<'a, T> {
    front: slice::IterMut<'a, T>,
    back: slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(front: &'a mut [T], back: &'a mut [T]) -> Self {
        Self {
            front: front.iter_mut(),
            back: back.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        match self.front.next() {
            Some(value) => Some(value),
            None => {
                self.front = mem::take(&mut self.back);
                self.front.next()
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        match self.back.next_back() {
            Some(value) => Some(value),
            None => {
                self.back = mem::take(&mut self.front);
                self.back.next_back()
            }
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Lazily draining iterator, created by [`RingDeque::pop_all`].
///
/// Each step is a `pop_front` (or `pop_back` from the other end). Whatever
/// has not been yielded when the iterator is dropped stays in the deque.
pub struct PopAll<'a, T> {
    deque: &'a mut RingDeque<T>,
}

impl<'a, T> PopAll<'a, T> {
    pub(super) fn new(deque: &'a mut RingDeque<T>) -> Self {
        Self { deque }
    }
}

impl<T> Iterator for PopAll<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> DoubleEndedIterator for PopAll<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for PopAll<'_, T> {}

impl<T> FusedIterator for PopAll<'_, T> {}

/// Owning iterator, created by `RingDeque::into_iter`.
pub struct IntoIter<T> {
    deque: RingDeque<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(deque: RingDeque<T>) -> Self {
        Self { deque }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len(), Some(self.deque.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
