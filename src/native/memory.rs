//! Raw memory blocks backing the descriptor views.
//!
//! A [`NativeBlock`] is either owning (allocated zeroed by this crate and freed exactly once
//! on drop) or wrapping (pointing at memory owned by the runtime, never freed here). All
//! access goes through bounds-checked typed reads and writes.

use std::{
    alloc::{alloc_zeroed, dealloc, Layout},
    ptr::NonNull,
};

use crate::{
    native::io::{read_ne_at, write_ne_at, NativeIO},
    Error::{AllocationFailed, MissingArgument},
    Result,
};

/// A contiguous block of native memory of known length
pub struct NativeBlock {
    ptr: NonNull<u8>,
    len: usize,
    owned: Option<Layout>,
}

impl NativeBlock {
    /// Allocate `len` zeroed bytes, aligned for pointers
    ///
    /// # Errors
    /// Returns [`crate::Error::AllocationFailed`] if `len` is zero or the allocator fails.
    pub fn allocate_zeroed(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(AllocationFailed(len));
        }

        let layout = Layout::from_size_align(len, std::mem::align_of::<usize>())
            .map_err(|_| AllocationFailed(len))?;

        // SAFETY: layout has a non-zero size
        let raw = unsafe { alloc_zeroed(layout) };
        let ptr = NonNull::new(raw).ok_or(AllocationFailed(len))?;

        Ok(NativeBlock {
            ptr,
            len,
            owned: Some(layout),
        })
    }

    /// View `len` bytes at `ptr` without taking ownership
    ///
    /// # Safety
    /// `ptr` must be valid for reads and writes of `len` bytes for as long as the returned
    /// block is used, and must not be accessed through other references meanwhile.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingArgument`] if `ptr` is null.
    pub unsafe fn wrap(ptr: *mut u8, len: usize) -> Result<Self> {
        let ptr = NonNull::new(ptr).ok_or(MissingArgument("ptr"))?;
        Ok(NativeBlock {
            ptr,
            len,
            owned: None,
        })
    }

    /// Start of the block
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Length of the block in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true for a zero-length wrapping block
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the block is freed on drop
    pub fn is_owned(&self) -> bool {
        self.owned.is_some()
    }

    /// Pointer to `offset` within the block
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `offset` is past the end of the block.
    pub fn ptr_at(&self, offset: usize) -> Result<*mut u8> {
        if offset > self.len {
            return Err(crate::Error::OutOfBounds);
        }
        // SAFETY: offset is within the block or one past its end
        Ok(unsafe { self.ptr.as_ptr().add(offset) })
    }

    fn bytes(&self) -> &[u8] {
        // SAFETY: ptr is valid for len bytes, guaranteed by allocation or by the caller of wrap
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: as for bytes, and &mut self rules out other views through this block
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Read a value at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the value does not fit in the block.
    pub fn read<T: NativeIO>(&self, offset: usize) -> Result<T> {
        read_ne_at(self.bytes(), offset)
    }

    /// Write a value at `offset`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the value does not fit in the block.
    pub fn write<T: NativeIO>(&mut self, offset: usize, value: T) -> Result<()> {
        write_ne_at(self.bytes_mut(), offset, value)
    }
}

impl Drop for NativeBlock {
    fn drop(&mut self) {
        if let Some(layout) = self.owned.take() {
            // SAFETY: the block was allocated with this layout in allocate_zeroed
            unsafe { dealloc(self.ptr.as_ptr(), layout) };
        }
    }
}

impl std::fmt::Debug for NativeBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeBlock")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .field("owned", &self.is_owned())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_zeroed() {
        let block = NativeBlock::allocate_zeroed(64).unwrap();
        assert!(block.is_owned());
        assert_eq!(block.len(), 64);
        assert_eq!(block.as_ptr() as usize % std::mem::align_of::<usize>(), 0);
        for offset in 0..64 {
            assert_eq!(block.read::<u8>(offset).unwrap(), 0);
        }
    }

    #[test]
    fn test_zero_length() {
        assert!(matches!(
            NativeBlock::allocate_zeroed(0),
            Err(crate::Error::AllocationFailed(0))
        ));
    }

    #[test]
    fn test_wrap_shares_memory() {
        let mut backing = [0u64; 4];
        let ptr = backing.as_mut_ptr().cast::<u8>();

        {
            let mut block = unsafe { NativeBlock::wrap(ptr, 32) }.unwrap();
            assert!(!block.is_owned());
            block.write(8, 0x0102_0304_u32).unwrap();
            assert!(block.read::<u64>(32).is_err());
        }

        assert_eq!(backing[1].to_ne_bytes()[..4], 0x0102_0304_u32.to_ne_bytes());
    }

    #[test]
    fn test_wrap_null() {
        let result = unsafe { NativeBlock::wrap(std::ptr::null_mut(), 8) };
        assert!(matches!(result, Err(crate::Error::MissingArgument(_))));
    }

    #[test]
    fn test_ptr_at() {
        let block = NativeBlock::allocate_zeroed(16).unwrap();
        assert_eq!(block.ptr_at(16).unwrap() as usize, block.as_ptr() as usize + 16);
        assert!(block.ptr_at(17).is_err());
    }
}
