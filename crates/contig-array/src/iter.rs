//! By-value iteration.
//!
//! [`IntoIter`] takes over an array's buffer and hands out its elements
//! one at a time from either end. Whatever is left when it is dropped is
//! destroyed before the buffer is released.

#![allow(unsafe_code)]

use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::ptr;
use std::slice;

use crate::array::DynArray;
use crate::raw::RawBuffer;

/// Owning iterator over the elements of a [`DynArray`].
pub struct IntoIter<T> {
    buf: RawBuffer<T>,
    /// Elements in `[front, back)` are still owned by the iterator.
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        if self.front == self.back {
            return &[];
        }
        // SAFETY: `[front, back)` is a live, initialised range of the buffer.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.front), self.back - self.front) }
    }

    /// The elements not yet yielded, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.front == self.back {
            return &mut [];
        }
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusive access.
        unsafe {
            slice::from_raw_parts_mut(self.buf.as_ptr().add(self.front), self.back - self.front)
        }
    }
}

impl<T, G> IntoIterator for DynArray<T, G> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        // Empty `self` first so its own drop has nothing left to destroy.
        let back = mem::replace(&mut self.len, 0);
        let buf = mem::replace(&mut self.buf, RawBuffer::new());
        IntoIter { buf, front: 0, back }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        // SAFETY: `index` was inside the owned range and has just left it,
        // so the value is read out exactly once.
        Some(unsafe { self.buf.as_ptr().add(index).read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: as in `next`, for the slot that just left the back.
        Some(unsafe { self.buf.as_ptr().add(self.back).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining: *mut [T] = self.as_mut_slice();
        self.front = self.back;
        // SAFETY: the remaining elements are still owned and were just
        // removed from the owned range, so they are dropped exactly once.
        unsafe { ptr::drop_in_place(remaining) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
