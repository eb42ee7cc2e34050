//! Storage layer: one owned allocation sized in element units.
//!
//! [`RawBuffer`] allocates, releases, and suggests the next capacity. It
//! never reads or writes element values; which slots are live is the
//! container's business. Allocation and release go through the global
//! allocator with the same `Layout`, so every buffer has exactly one
//! paired allocate/deallocate contract.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use contig_core::{ArrayError, GrowthPolicy};

/// An owned, uninitialised block of `capacity` slots of `T`.
pub(crate) struct RawBuffer<T> {
    /// `None` is the null marker: nothing is allocated and capacity is 0.
    ptr: Option<NonNull<T>>,
    cap: usize,
    _owns: PhantomData<T>,
}

// SAFETY: the buffer is uniquely owned, so moving or sharing it across
// threads is exactly as safe as moving or sharing the `T`s it holds.
unsafe impl<T: Send> Send for RawBuffer<T> {}
// SAFETY: see above; `&RawBuffer` hands out nothing but the raw pointer.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Largest capacity whose byte size a `Layout` can describe.
    pub(crate) const MAX_CAPACITY: usize = if Self::IS_ZST {
        usize::MAX
    } else {
        isize::MAX as usize / mem::size_of::<T>()
    };

    /// The null marker.
    pub(crate) const fn new() -> Self {
        Self {
            ptr: None,
            cap: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate `capacity` uninitialised slots.
    ///
    /// `capacity == 0` returns the null marker without calling the
    /// allocator. Zero-sized element types never touch the allocator
    /// either; they get a dangling, aligned pointer and a logical capacity.
    pub(crate) fn allocate(capacity: usize) -> Result<Self, ArrayError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        if Self::IS_ZST {
            return Ok(Self {
                ptr: Some(NonNull::dangling()),
                cap: capacity,
                _owns: PhantomData,
            });
        }

        let layout = Layout::array::<T>(capacity).map_err(|_| {
            tracing::debug!(requested = capacity, "capacity overflows layout");
            ArrayError::CapacityOverflow {
                requested: capacity,
            }
        })?;
        // SAFETY: `layout` has non-zero size: capacity > 0 and T is not zero-sized.
        let raw = unsafe { alloc::alloc(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            tracing::debug!(
                requested = capacity,
                elem_size = mem::size_of::<T>(),
                "allocator returned null"
            );
            return Err(ArrayError::AllocationFailure {
                requested: capacity,
                elem_size: mem::size_of::<T>(),
            });
        };

        Ok(Self {
            ptr: Some(ptr),
            cap: capacity,
            _owns: PhantomData,
        })
    }

    /// Number of allocated slots.
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    /// Pointer to the first slot, or null if nothing is allocated.
    pub(crate) fn as_ptr(&self) -> *mut T {
        match self.ptr {
            Some(ptr) => ptr.as_ptr(),
            None => ptr::null_mut(),
        }
    }

    /// Capacity an append should grow to once every slot is live.
    ///
    /// Always strictly greater than the current capacity unless it is
    /// already `usize::MAX`.
    pub(crate) fn suggest_growth<G: GrowthPolicy>(&self, policy: &G) -> usize {
        policy
            .next_capacity(self.cap)
            .max(self.cap.saturating_add(1))
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        let Some(ptr) = self.ptr.take() else {
            return;
        };
        if Self::IS_ZST {
            return;
        }
        // `allocate` succeeded with this capacity, so the layout is valid.
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            // SAFETY: `ptr` came from `alloc::alloc` with exactly this layout
            // and was taken out of `self.ptr`, so it is released once.
            unsafe { alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) };
        }
    }
}
