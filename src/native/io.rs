//! Typed access to native-endian values in raw memory.
//!
//! Runtime descriptors live in the memory of the current process, so every value is read
//! and written in native byte order. Reads and writes are bounds-checked against the slice
//! they operate on and fail with [`crate::Error::OutOfBounds`] instead of touching memory past
//! the end of a block.

use crate::{Error::OutOfBounds, Result};

/// Trait for types that can be read from and written to native memory as raw bytes
///
/// Implemented for the scalar widths found in runtime descriptors. The associated `Bytes`
/// type is the fixed-size array holding the value's representation.
pub trait NativeIO: Sized + Copy {
    /// The byte array type of this value
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Decode a value from native-endian bytes
    fn from_ne_bytes(bytes: Self::Bytes) -> Self;

    /// Encode a value into native-endian bytes
    fn to_ne_bytes(self) -> Self::Bytes;
}

macro_rules! impl_native_io {
    ($($ty:ty),*) => {
        $(
            impl NativeIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_ne_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_ne_bytes(bytes)
                }

                fn to_ne_bytes(self) -> Self::Bytes {
                    <$ty>::to_ne_bytes(self)
                }
            }
        )*
    };
}

impl_native_io!(u8, u16, u32, i32, u64, usize);

/// Read a value of type `T` at `offset`
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `offset + size_of::<T>()` exceeds `data`.
pub fn read_ne_at<T: NativeIO>(data: &[u8], offset: usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let end = offset.checked_add(type_len).ok_or(OutOfBounds)?;
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    Ok(T::from_ne_bytes(read))
}

/// Write `value` at `offset`
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `offset + size_of::<T>()` exceeds `data`.
pub fn write_ne_at<T: NativeIO>(data: &mut [u8], offset: usize, value: T) -> Result<()> {
    let type_len = std::mem::size_of::<T>();
    let end = offset.checked_add(type_len).ok_or(OutOfBounds)?;
    if end > data.len() {
        return Err(OutOfBounds);
    }

    data[offset..end].copy_from_slice(value.to_ne_bytes().as_ref());
    Ok(())
}
