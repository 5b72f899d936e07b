//! Offset computation for C structure layouts.
//!
//! Descriptor layouts are declared field by field in declaration order, exactly as the
//! runtime's headers declare them; [`LayoutBuilder`] applies the C rules: every field is
//! aligned to its natural alignment, consecutive one-bit fields share `u8` storage units, and
//! the total size is rounded up to the largest alignment seen.

use std::mem::{align_of, size_of};

use crate::native::bitfield::BitField;

/// Size of a pointer in the current process
pub const POINTER_SIZE: usize = size_of::<usize>();

/// Computes field offsets of a `#[repr(C)]`-style structure
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    offset: usize,
    max_align: usize,
    open_unit: Option<(usize, u8)>,
}

impl LayoutBuilder {
    /// Start an empty structure
    pub fn new() -> Self {
        LayoutBuilder {
            offset: 0,
            max_align: 1,
            open_unit: None,
        }
    }

    /// Append a field of `size` bytes aligned to `align`, returning its offset
    pub fn field(&mut self, size: usize, align: usize) -> usize {
        self.open_unit = None;
        let offset = self.offset.next_multiple_of(align);
        self.offset = offset + size;
        self.max_align = self.max_align.max(align);
        offset
    }

    /// Append a scalar of type `T`
    pub fn scalar<T>(&mut self) -> usize {
        self.field(size_of::<T>(), align_of::<T>())
    }

    /// Append a pointer
    pub fn pointer(&mut self) -> usize {
        self.scalar::<usize>()
    }

    /// Append a one-bit field, sharing the current `u8` storage unit while it has room
    pub fn bit(&mut self) -> BitField {
        match self.open_unit {
            Some((offset, next)) if next < 8 => {
                self.open_unit = Some((offset, next + 1));
                BitField::new(offset, next)
            }
            _ => {
                let offset = self.scalar::<u8>();
                self.open_unit = Some((offset, 1));
                BitField::new(offset, 0)
            }
        }
    }

    /// Current end of the structure, before trailing padding
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Finish the structure and return its size including trailing padding
    pub fn finish(self) -> usize {
        self.offset.next_multiple_of(self.max_align)
    }
}
