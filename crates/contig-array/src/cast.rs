//! Byte-reinterpreting conversions between element types.
//!
//! These are the only constructors that change element type. They are
//! explicitly named, `unsafe`, and limited to `Copy` types on both sides:
//! the source bytes are copied verbatim into a fresh `T` buffer and then
//! read back as `T`. The source must split into a whole number of `T`s.

#![allow(unsafe_code)]

use std::mem;
use std::ptr;

use contig_core::{ArrayError, Doubling, GrowthPolicy};

use crate::array::DynArray;

impl<T: Copy> DynArray<T> {
    /// Build an array by reinterpreting the bytes of `src` as `T`s.
    ///
    /// The destination is freshly allocated for `T`, so the alignment of
    /// `src` does not matter.
    ///
    /// # Errors
    ///
    /// [`ArrayError::ByteLengthMismatch`] if the byte length of `src` is not
    /// a multiple of `size_of::<T>()`, or `T` is zero-sized.
    ///
    /// # Safety
    ///
    /// Every consecutive `size_of::<T>()` bytes of `src` must be a valid
    /// `T`, and `U` must have no padding bytes.
    pub unsafe fn from_bytes_of<U: Copy>(src: &[U]) -> Result<Self, ArrayError> {
        // SAFETY: forwarded to the caller.
        unsafe { Self::bytes_of_in(src, Doubling) }
    }
}

impl<T: Copy, G: GrowthPolicy> DynArray<T, G> {
    /// Replace the contents with the bytes of `src` read as `T`s.
    ///
    /// Built completely before being exchanged in, like
    /// [`assign`](DynArray::assign).
    ///
    /// # Safety
    ///
    /// Same contract as [`from_bytes_of`](DynArray::from_bytes_of).
    pub unsafe fn assign_bytes_of<U: Copy>(&mut self, src: &[U]) -> Result<(), ArrayError> {
        // SAFETY: forwarded to the caller.
        let mut staged = unsafe { Self::bytes_of_in(src, self.growth().clone())? };
        self.exchange(&mut staged);
        Ok(())
    }

    unsafe fn bytes_of_in<U: Copy>(src: &[U], growth: G) -> Result<Self, ArrayError> {
        let bytes = mem::size_of_val(src);
        let elem_size = mem::size_of::<T>();
        if elem_size == 0 || bytes % elem_size != 0 {
            return Err(ArrayError::ByteLengthMismatch { bytes, elem_size });
        }
        let len = bytes / elem_size;

        let mut array = Self::with_capacity_in(len, growth)?;
        if len > 0 {
            // SAFETY: the destination holds `len * elem_size == bytes` bytes,
            // the source is a live slice of `bytes` bytes, and a fresh
            // allocation cannot overlap it. That the bytes form valid `T`s
            // is the caller's contract.
            unsafe {
                ptr::copy_nonoverlapping(
                    src.as_ptr().cast::<u8>(),
                    array.buf.as_ptr().cast::<u8>(),
                    bytes,
                );
            }
            array.len = len;
        }
        Ok(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_to_wider_elements() {
        let src: [u8; 8] = [1, 0, 0, 0, 2, 0, 0, 0];
        // SAFETY: every 4-byte pattern is a valid u32.
        let array = unsafe { DynArray::<u32>::from_bytes_of(&src) }.unwrap();
        assert_eq!(
            array,
            [
                u32::from_ne_bytes([1, 0, 0, 0]),
                u32::from_ne_bytes([2, 0, 0, 0])
            ]
        );
        assert_eq!(array.capacity(), 2);
    }

    #[test]
    fn wider_elements_to_bytes() {
        let src = [0x0102_0304u32];
        // SAFETY: every byte is a valid u8.
        let array = unsafe { DynArray::<u8>::from_bytes_of(&src) }.unwrap();
        assert_eq!(array.as_slice(), &0x0102_0304u32.to_ne_bytes());
    }

    #[test]
    fn partial_element_is_rejected() {
        let src = [0u8; 6];
        // SAFETY: rejected before any byte is read as u32.
        let result = unsafe { DynArray::<u32>::from_bytes_of(&src) };
        assert_eq!(
            result.unwrap_err(),
            ArrayError::ByteLengthMismatch {
                bytes: 6,
                elem_size: 4
            }
        );
    }

    #[test]
    fn zero_sized_target_is_rejected() {
        let src = [1u8, 2];
        // SAFETY: rejected before any byte is read.
        let result = unsafe { DynArray::<()>::from_bytes_of(&src) };
        assert!(matches!(
            result,
            Err(ArrayError::ByteLengthMismatch { elem_size: 0, .. })
        ));
    }

    #[test]
    fn empty_source_gives_unallocated_array() {
        let src: [u16; 0] = [];
        // SAFETY: nothing is read.
        let array = unsafe { DynArray::<u64>::from_bytes_of(&src) }.unwrap();
        assert!(array.is_empty());
        assert!(array.data().is_null());
    }

    #[test]
    fn assign_bytes_of_exchanges_in() {
        let mut array = DynArray::from_list([9u16, 9, 9]).unwrap();
        let src = [0xABu8, 0xCD];
        // SAFETY: every 2-byte pattern is a valid u16.
        unsafe { array.assign_bytes_of(&src) }.unwrap();
        assert_eq!(array, [u16::from_ne_bytes([0xAB, 0xCD])]);
        assert_eq!(array.capacity(), 1);
    }
}
