//! The growable contiguous array.
//!
//! ```text
//! DynArray<T, G>
//! ├── RawBuffer<T>   begin .. limit   (allocation, capacity)
//! ├── len            begin .. end     (live range)
//! └── G              growth policy, consulted only by appends
//! ```
//!
//! Slots in `[0, len)` hold live values. Slots in `[len, capacity)` are
//! allocated but uninitialised. Every public operation returns with
//! `len <= capacity`, and with no allocation exactly when capacity is 0.
//!
//! # Value semantics
//!
//! An array exclusively owns its buffer. Copies (`try_clone`,
//! `assign_from`, `Clone`) always deep-copy into storage of their own;
//! [`exchange`](DynArray::exchange) is the only operation that moves a
//! buffer between two arrays, and it never copies or moves an element.

#![allow(unsafe_code)]

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut, Range};
use std::ptr;
use std::slice::{self, SliceIndex};

use contig_core::{ArrayError, Doubling, GrowthPolicy};

use crate::raw::RawBuffer;

/// A growable, contiguous array of `T` with an explicit growth policy.
///
/// Operations that may allocate return `Result` and report
/// [`ArrayError::AllocationFailure`] or [`ArrayError::CapacityOverflow`]
/// instead of aborting. Access past the live range is either checked
/// ([`at`](Self::at), [`back`](Self::back)) or panics through `Index`;
/// it never reads outside the buffer.
pub struct DynArray<T, G = Doubling> {
    pub(crate) buf: RawBuffer<T>,
    pub(crate) len: usize,
    growth: G,
}

impl<T> DynArray<T> {
    /// Create an empty array. Nothing is allocated.
    pub const fn new() -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
            growth: Doubling,
        }
    }

    /// Create an empty array with exactly `capacity` allocated slots.
    pub fn with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Self::with_capacity_in(capacity, Doubling)
    }

    /// Create an array of `len` default values, allocating exactly `len` slots.
    pub fn with_len(len: usize) -> Result<Self, ArrayError>
    where
        T: Default,
    {
        let mut array = Self::with_capacity(len)?;
        array.fill_spare(len, T::default);
        Ok(array)
    }

    /// Create an array of `len` copies of `value`, allocating exactly `len` slots.
    pub fn from_elem(len: usize, value: &T) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        Self::from_elem_in(len, value, Doubling)
    }

    /// Create an array holding clones of `items`, in order.
    pub fn from_slice(items: &[T]) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        Self::from_slice_in(items, Doubling)
    }

    /// Create an array from a literal list, moving each value in order.
    ///
    /// Capacity is exactly `N`.
    pub fn from_list<const N: usize>(items: [T; N]) -> Result<Self, ArrayError> {
        Self::from_list_in(items, Doubling)
    }
}

impl<T, G> DynArray<T, G> {
    /// Largest capacity an array of `T` can request.
    ///
    /// Requests beyond it fail with [`ArrayError::CapacityOverflow`].
    pub const MAX_CAPACITY: usize = RawBuffer::<T>::MAX_CAPACITY;

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The growth policy consulted when an append finds the buffer full.
    pub fn growth(&self) -> &G {
        &self.growth
    }

    /// The live range as a slice.
    pub fn as_slice(&self) -> &[T] {
        if self.len == 0 {
            return &[];
        }
        // SAFETY: `len > 0` implies an allocation whose first `len` slots are live.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// The live range as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.len == 0 {
            return &mut [];
        }
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Pointer to the first slot, or null when nothing is allocated.
    ///
    /// Unlike `<[T]>::as_ptr`, an array that has never allocated reports
    /// null rather than a dangling pointer.
    pub fn data(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Mutable pointer to the first slot, or null when nothing is allocated.
    pub fn data_mut(&mut self) -> *mut T {
        self.buf.as_ptr()
    }

    /// The `begin .. end` cursors of the live range.
    ///
    /// Both are null when nothing is allocated. For zero-sized `T` the two
    /// cursors are always equal.
    pub fn as_ptr_range(&self) -> Range<*const T> {
        let begin = self.buf.as_ptr().cast_const();
        begin..begin.wrapping_add(self.len)
    }

    /// Checked access to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// Checked mutable access to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfRange`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::OutOfRange { index, len })
    }

    /// The last live element.
    ///
    /// # Errors
    ///
    /// [`ArrayError::EmptyContainer`] if the array is empty.
    pub fn back(&self) -> Result<&T, ArrayError> {
        self.as_slice()
            .last()
            .ok_or(ArrayError::EmptyContainer { operation: "back" })
    }

    /// The last live element, mutably.
    ///
    /// # Errors
    ///
    /// [`ArrayError::EmptyContainer`] if the array is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, ArrayError> {
        self.as_mut_slice()
            .last_mut()
            .ok_or(ArrayError::EmptyContainer {
                operation: "back_mut",
            })
    }

    /// Remove the last element and hand it to the caller.
    ///
    /// Ownership passes to the caller as the slot leaves the live range, so
    /// the slot is never dropped in place. Capacity is unchanged.
    ///
    /// # Errors
    ///
    /// [`ArrayError::EmptyContainer`] if the array is empty.
    pub fn remove_last(&mut self) -> Result<T, ArrayError> {
        if self.len == 0 {
            return Err(ArrayError::EmptyContainer {
                operation: "remove_last",
            });
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` was live; shrinking `len`
        // first hands its ownership to the read below and nobody else.
        Ok(unsafe { self.buf.as_ptr().add(self.len).read() })
    }

    /// Destroy every live element. The buffer and its capacity are kept.
    pub fn clear(&mut self) {
        self.truncate_to(0);
    }

    /// Exchange buffers with `other` in constant time.
    ///
    /// No element is copied or moved; each array ends up owning the other's
    /// allocation. Growth policies stay where they are.
    pub fn exchange(&mut self, other: &mut Self) {
        mem::swap(&mut self.buf, &mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Writes `value` into the first spare slot.
    ///
    /// Callers guarantee `len < capacity`.
    fn write_next(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        // SAFETY: `len < capacity`, so the slot is allocated and not live.
        unsafe { self.buf.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Appends `count` values produced by `fill` into spare capacity.
    ///
    /// `len` advances per element, so a panicking `fill` leaves every
    /// value written so far live and owned.
    fn fill_spare(&mut self, count: usize, mut fill: impl FnMut() -> T) {
        debug_assert!(count <= self.capacity() - self.len);
        for _ in 0..count {
            self.write_next(fill());
        }
    }

    /// Destroy the elements in `[len, self.len)`.
    fn truncate_to(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail_len = self.len - len;
        // Shrink first: a panicking destructor must not cause a double drop.
        self.len = len;
        // SAFETY: `[len, len + tail_len)` held live values and is now
        // outside the live range, so each is dropped exactly once.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.as_ptr().add(len), tail_len);
            ptr::drop_in_place(tail);
        }
    }

    /// Moves the live range into `replacement` and releases the old buffer.
    fn relocate(&mut self, replacement: RawBuffer<T>) {
        debug_assert!(replacement.capacity() >= self.len);
        tracing::trace!(
            old_capacity = self.capacity(),
            new_capacity = replacement.capacity(),
            len = self.len,
            elem_size = mem::size_of::<T>(),
            "reallocating array"
        );
        if self.len > 0 {
            // SAFETY: both buffers hold at least `len` slots and are distinct
            // allocations. The old buffer is released without dropping its
            // slots, so every value ends up owned exactly once.
            unsafe {
                ptr::copy_nonoverlapping(self.buf.as_ptr(), replacement.as_ptr(), self.len);
            }
        }
        self.buf = replacement;
    }
}

impl<T, G: GrowthPolicy> DynArray<T, G> {
    /// Create an empty array that grows according to `growth`.
    pub fn with_growth(growth: G) -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
            growth,
        }
    }

    pub(crate) fn with_capacity_in(capacity: usize, growth: G) -> Result<Self, ArrayError> {
        Ok(Self {
            buf: RawBuffer::allocate(capacity)?,
            len: 0,
            growth,
        })
    }

    fn from_elem_in(len: usize, value: &T, growth: G) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        let mut array = Self::with_capacity_in(len, growth)?;
        array.fill_spare(len, || value.clone());
        Ok(array)
    }

    fn from_slice_in(items: &[T], growth: G) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        let mut array = Self::with_capacity_in(items.len(), growth)?;
        for item in items {
            array.write_next(item.clone());
        }
        Ok(array)
    }

    fn from_list_in<const N: usize>(items: [T; N], growth: G) -> Result<Self, ArrayError> {
        let mut array = Self::with_capacity_in(N, growth)?;
        for item in items {
            array.write_next(item);
        }
        Ok(array)
    }

    /// Deep copy with capacity exactly `len()`.
    pub fn try_clone(&self) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        Self::from_slice_in(self.as_slice(), self.growth.clone())
    }

    /// Copy-assign from `other`.
    ///
    /// Live elements are destroyed first. The buffer is reused when it can
    /// hold `other.len()` elements (capacity never shrinks on this path);
    /// otherwise it is replaced by one of exactly `other.len()` slots.
    ///
    /// # Errors
    ///
    /// On allocation failure `self` is left empty with its old buffer.
    pub fn assign_from<H>(&mut self, other: &DynArray<T, H>) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.assign_cloned(other.as_slice())
    }

    /// Assign from a list of values with the same reuse policy as
    /// [`assign_from`](Self::assign_from).
    pub fn assign_from_slice(&mut self, items: &[T]) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.assign_cloned(items)
    }

    fn assign_cloned(&mut self, items: &[T]) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.clear();
        if items.len() > self.capacity() {
            let replacement = RawBuffer::allocate(items.len())?;
            self.relocate(replacement);
        }
        for item in items {
            self.write_next(item.clone());
        }
        Ok(())
    }

    /// Replace the contents with `count` copies of `value`.
    ///
    /// The replacement is built completely before it is exchanged in, so on
    /// error `self` is untouched, and on success the old buffer is released
    /// only after the new one is ready.
    pub fn assign(&mut self, count: usize, value: &T) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        let mut staged = Self::from_elem_in(count, value, self.growth.clone())?;
        self.exchange(&mut staged);
        Ok(())
    }

    /// Replace the contents with clones of `items`. Same guarantees as
    /// [`assign`](Self::assign).
    pub fn assign_slice(&mut self, items: &[T]) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        let mut staged = Self::from_slice_in(items, self.growth.clone())?;
        self.exchange(&mut staged);
        Ok(())
    }

    /// Replace the contents with a literal list. Same guarantees as
    /// [`assign`](Self::assign).
    pub fn assign_list<const N: usize>(&mut self, items: [T; N]) -> Result<(), ArrayError> {
        let mut staged = Self::from_list_in(items, self.growth.clone())?;
        self.exchange(&mut staged);
        Ok(())
    }

    /// Move the whole array out, leaving `self` empty and unallocated.
    pub fn take(&mut self) -> Self {
        let empty = Self::with_growth(self.growth.clone());
        mem::replace(self, empty)
    }

    /// Ensure capacity is at least `capacity` slots.
    ///
    /// `capacity` is a total, not an increment. Requests at or below the
    /// current capacity do nothing; larger ones allocate exactly
    /// `capacity` slots and move the live elements over.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), ArrayError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        let replacement = RawBuffer::allocate(capacity)?;
        self.relocate(replacement);
        Ok(())
    }

    /// Resize to `len` elements, filling new slots with clones of `value`.
    ///
    /// Shrinking destroys the tail and keeps capacity. Growing reallocates
    /// to exactly `len` slots, with no headroom.
    pub fn resize(&mut self, len: usize, value: T) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.resize_with(len, || value.clone())
    }

    /// Resize to `len` elements, filling new slots with `T::default()`.
    pub fn resize_default(&mut self, len: usize) -> Result<(), ArrayError>
    where
        T: Default,
    {
        self.resize_with(len, T::default)
    }

    /// Resize to `len` elements, filling new slots with values from `fill`.
    pub fn resize_with<F>(&mut self, len: usize, fill: F) -> Result<(), ArrayError>
    where
        F: FnMut() -> T,
    {
        match len.cmp(&self.len) {
            Ordering::Less => self.truncate_to(len),
            Ordering::Equal => {}
            Ordering::Greater => {
                if len != self.capacity() {
                    let replacement = RawBuffer::allocate(len)?;
                    self.relocate(replacement);
                }
                self.fill_spare(len - self.len, fill);
            }
        }
        Ok(())
    }

    /// Append `value`, growing through the policy when the buffer is full.
    ///
    /// Amortised O(1) with [`Doubling`]. On error the array is unchanged
    /// and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<(), ArrayError> {
        if self.len == self.capacity() {
            let target = self.buf.suggest_growth(&self.growth);
            self.reserve(target)?;
            // Zero-sized elements can exhaust `usize` without any allocation failing.
            if self.len == self.capacity() {
                return Err(ArrayError::CapacityOverflow {
                    requested: usize::MAX,
                });
            }
        }
        self.write_next(value);
        Ok(())
    }

    /// Append `T::default()` and return it for in-place initialisation.
    pub fn push_default(&mut self) -> Result<&mut T, ArrayError>
    where
        T: Default,
    {
        self.push(T::default())?;
        // SAFETY: `push` succeeded, so slot `len - 1` was just written.
        Ok(unsafe { &mut *self.buf.as_ptr().add(self.len - 1) })
    }
}

impl<T, G> Drop for DynArray<T, G> {
    fn drop(&mut self) {
        // The buffer itself is released by `RawBuffer`'s own drop.
        self.clear();
    }
}

impl<T, G: GrowthPolicy + Default> Default for DynArray<T, G> {
    fn default() -> Self {
        Self::with_growth(G::default())
    }
}

impl<T: Clone, G: GrowthPolicy> Clone for DynArray<T, G> {
    /// # Panics
    ///
    /// Panics if the copy cannot be allocated. Use
    /// [`try_clone`](DynArray::try_clone) to handle that case.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(err) => panic!("failed to clone array: {err}"),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.assign_from(source) {
            panic!("failed to clone array: {err}");
        }
    }
}

impl<T: fmt::Debug, G> fmt::Debug for DynArray<T, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, G> Deref for DynArray<T, G> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, G> DerefMut for DynArray<T, G> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, G, I: SliceIndex<[T]>> Index<I> for DynArray<T, G> {
    type Output = I::Output;

    /// Unchecked-by-contract access: out-of-range indices panic.
    fn index(&self, index: I) -> &I::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, G, I: SliceIndex<[T]>> IndexMut<I> for DynArray<T, G> {
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: PartialEq<U>, U, G, H> PartialEq<DynArray<U, H>> for DynArray<T, G> {
    fn eq(&self, other: &DynArray<U, H>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, G> Eq for DynArray<T, G> {}

impl<T: PartialEq<U>, U, G> PartialEq<[U]> for DynArray<T, G> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, G> PartialEq<&[U]> for DynArray<T, G> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, G, const N: usize> PartialEq<[U; N]> for DynArray<T, G> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, G> AsRef<[T]> for DynArray<T, G> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, G> AsMut<[T]> for DynArray<T, G> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T, G> IntoIterator for &'a DynArray<T, G> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T, G> IntoIterator for &'a mut DynArray<T, G> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}
