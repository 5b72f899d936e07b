//! Sub-byte fields of native descriptors.
//!
//! [`BitField`] is a single flag inside a `u8` storage unit, as produced by a C bitfield of
//! width one. [`PackedField`] is a run of bits inside a `u32` word. Writes read the storage
//! unit, replace only the addressed bits and write it back, so sibling flags are preserved.

use crate::{native::memory::NativeBlock, Result};

/// A one-bit flag at `bit` of the byte at `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    /// Offset of the storage byte
    pub offset: usize,
    /// Bit index within the storage byte, least significant first
    pub bit: u8,
}

impl BitField {
    /// Create a new flag; `bit` must be below 8
    pub const fn new(offset: usize, bit: u8) -> Self {
        BitField { offset, bit }
    }

    fn mask(&self) -> u8 {
        1 << self.bit
    }

    /// Read the flag
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the storage byte is outside `block`.
    pub fn get(&self, block: &NativeBlock) -> Result<bool> {
        Ok(block.read::<u8>(self.offset)? & self.mask() != 0)
    }

    /// Set or clear the flag
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the storage byte is outside `block`.
    pub fn set(&self, block: &mut NativeBlock, value: bool) -> Result<()> {
        let current = block.read::<u8>(self.offset)?;
        let updated = if value {
            current | self.mask()
        } else {
            current & !self.mask()
        };
        block.write(self.offset, updated)
    }
}

/// `width` bits starting at bit `shift` of the `u32` word at `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedField {
    /// Offset of the storage word
    pub offset: usize,
    /// Index of the lowest bit
    pub shift: u32,
    /// Number of bits, 1 to 32
    pub width: u32,
}

impl PackedField {
    /// Create a new packed field
    pub const fn new(offset: usize, shift: u32, width: u32) -> Self {
        PackedField {
            offset,
            shift,
            width,
        }
    }

    /// Mask of the field's bits before shifting
    pub fn mask(&self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1 << self.width) - 1
        }
    }

    /// Read the field
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the storage word is outside `block`.
    pub fn get(&self, block: &NativeBlock) -> Result<u32> {
        Ok((block.read::<u32>(self.offset)? >> self.shift) & self.mask())
    }

    /// Write the field; bits of `value` beyond `width` are discarded
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the storage word is outside `block`.
    pub fn set(&self, block: &mut NativeBlock, value: u32) -> Result<()> {
        let current = block.read::<u32>(self.offset)?;
        let cleared = current & !(self.mask() << self.shift);
        block.write(self.offset, cleared | ((value & self.mask()) << self.shift))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitfield_preserves_siblings() {
        let mut block = NativeBlock::allocate_zeroed(4).unwrap();
        let first = BitField::new(1, 0);
        let third = BitField::new(1, 2);
        let last = BitField::new(1, 7);

        first.set(&mut block, true).unwrap();
        last.set(&mut block, true).unwrap();
        assert_eq!(block.read::<u8>(1).unwrap(), 0b1000_0001);

        third.set(&mut block, true).unwrap();
        first.set(&mut block, false).unwrap();
        assert!(!first.get(&block).unwrap());
        assert!(third.get(&block).unwrap());
        assert!(last.get(&block).unwrap());
        assert_eq!(block.read::<u8>(0).unwrap(), 0);
    }

    #[test]
    fn test_packed_field() {
        let mut block = NativeBlock::allocate_zeroed(8).unwrap();
        let low = PackedField::new(4, 0, 16);
        let middle = PackedField::new(4, 16, 8);
        let top = PackedField::new(4, 31, 1);

        low.set(&mut block, 0xFFFF).unwrap();
        middle.set(&mut block, 0x1FF).unwrap();
        top.set(&mut block, 1).unwrap();

        assert_eq!(low.get(&block).unwrap(), 0xFFFF);
        assert_eq!(middle.get(&block).unwrap(), 0xFF);
        assert_eq!(top.get(&block).unwrap(), 1);

        middle.set(&mut block, 0).unwrap();
        assert_eq!(low.get(&block).unwrap(), 0xFFFF);
        assert_eq!(top.get(&block).unwrap(), 1);
        assert_eq!(block.read::<u32>(4).unwrap(), 0x8000_FFFF);
    }

    #[test]
    fn test_full_width_mask() {
        assert_eq!(PackedField::new(0, 0, 32).mask(), u32::MAX);
        assert_eq!(PackedField::new(0, 24, 6).mask(), 0x3F);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut block = NativeBlock::allocate_zeroed(2).unwrap();
        assert!(BitField::new(2, 0).set(&mut block, true).is_err());
        assert!(PackedField::new(0, 0, 8).get(&block).is_err());
    }
}
