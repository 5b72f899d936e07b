//! The runtime's type descriptor (`Il2CppType`).
//!
//! A type descriptor is a data pointer followed by one packed 32-bit word. The word holds the
//! attribute flags, the element type, the custom-modifier count and single-bit flags; from
//! metadata version 27 on the modifier count shrank by one bit to make room for `valuetype`.
//! Class descriptors embed two of these (`byval_arg`, `this_arg`).

use std::sync::OnceLock;

use strum::{Display, EnumCount, EnumIter, FromRepr};

use crate::{
    native::{
        bitfield::PackedField, layout::LayoutBuilder, memory::NativeBlock, version::MetadataVersion,
        Il2CppType,
    },
    Result,
};

/// Element type stored in a type descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, FromRepr)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Il2CppTypeEnum {
    End = 0x00,
    Void = 0x01,
    Boolean = 0x02,
    Char = 0x03,
    I1 = 0x04,
    U1 = 0x05,
    I2 = 0x06,
    U2 = 0x07,
    I4 = 0x08,
    U4 = 0x09,
    I8 = 0x0a,
    U8 = 0x0b,
    R4 = 0x0c,
    R8 = 0x0d,
    String = 0x0e,
    Ptr = 0x0f,
    ByRef = 0x10,
    ValueType = 0x11,
    Class = 0x12,
    Var = 0x13,
    Array = 0x14,
    GenericInst = 0x15,
    TypedByRef = 0x16,
    I = 0x18,
    U = 0x19,
    FnPtr = 0x1b,
    Object = 0x1c,
    SzArray = 0x1d,
    MVar = 0x1e,
    CModReqd = 0x1f,
    CModOpt = 0x20,
    Internal = 0x21,
    Modifier = 0x40,
    Sentinel = 0x41,
    Pinned = 0x45,
    Enum = 0x55,
}

/// Layout versions of the type descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumCount)]
pub enum TypeLayoutVersion {
    /// Metadata versions before 27: 6-bit modifier count, no `valuetype` bit
    #[strum(to_string = "24.0")]
    V24,
    /// Metadata version 27 and later: 5-bit modifier count, `valuetype` bit
    #[strum(to_string = "27.0")]
    V27,
}

/// Offsets and bit positions of one type descriptor layout
#[derive(Debug, Clone)]
pub struct TypeLayout {
    /// Offset of the data pointer (class index, element type, generic class)
    pub data: usize,
    /// Attribute flags, 16 bits
    pub attrs: PackedField,
    /// Element type, 8 bits
    pub type_enum: PackedField,
    /// Number of custom modifiers
    pub num_mods: PackedField,
    /// Passed by reference
    pub byref: PackedField,
    /// Pinned local
    pub pinned: PackedField,
    /// Value type flag; absent before version 27
    pub valuetype: Option<PackedField>,
    /// Size of the descriptor
    pub size: usize,
}

impl TypeLayout {
    fn build(num_mods_width: u32, has_valuetype: bool) -> Self {
        let mut builder = LayoutBuilder::new();
        let data = builder.pointer();
        let word = builder.scalar::<u32>();

        let byref_shift = 24 + num_mods_width;
        TypeLayout {
            data,
            attrs: PackedField::new(word, 0, 16),
            type_enum: PackedField::new(word, 16, 8),
            num_mods: PackedField::new(word, 24, num_mods_width),
            byref: PackedField::new(word, byref_shift, 1),
            pinned: PackedField::new(word, byref_shift + 1, 1),
            valuetype: has_valuetype.then(|| PackedField::new(word, byref_shift + 2, 1)),
            size: builder.finish(),
        }
    }
}

/// Typed view over one type descriptor
pub trait NativeTypeStruct {
    /// Start of the descriptor
    fn pointer(&self) -> *mut Il2CppType;

    /// The data pointer
    fn data(&self) -> Result<usize>;
    /// Replace the data pointer
    fn set_data(&mut self, value: usize) -> Result<()>;

    /// Attribute flags
    fn attrs(&self) -> Result<u16>;
    /// Replace the attribute flags
    fn set_attrs(&mut self, value: u16) -> Result<()>;

    /// Element type
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a value that names no element type.
    fn type_enum(&self) -> Result<Il2CppTypeEnum>;
    /// Replace the element type
    fn set_type_enum(&mut self, value: Il2CppTypeEnum) -> Result<()>;

    /// Number of custom modifiers
    fn num_mods(&self) -> Result<u8>;
    /// Replace the number of custom modifiers; truncated to the field width
    fn set_num_mods(&mut self, value: u8) -> Result<()>;

    /// Passed by reference
    fn byref(&self) -> Result<bool>;
    /// Set or clear `byref`
    fn set_byref(&mut self, value: bool) -> Result<()>;

    /// Pinned local
    fn pinned(&self) -> Result<bool>;
    /// Set or clear `pinned`
    fn set_pinned(&mut self, value: bool) -> Result<()>;

    /// Value type flag; reads `false` on layouts without it
    fn valuetype(&self) -> Result<bool>;
    /// Set or clear `valuetype`; ignored on layouts without it
    fn set_valuetype(&mut self, value: bool) -> Result<()>;
}

struct TypeView {
    block: NativeBlock,
    layout: &'static TypeLayout,
}

impl NativeTypeStruct for TypeView {
    fn pointer(&self) -> *mut Il2CppType {
        self.block.as_ptr().cast()
    }

    fn data(&self) -> Result<usize> {
        self.block.read(self.layout.data)
    }

    fn set_data(&mut self, value: usize) -> Result<()> {
        self.block.write(self.layout.data, value)
    }

    fn attrs(&self) -> Result<u16> {
        Ok(self.layout.attrs.get(&self.block)? as u16)
    }

    fn set_attrs(&mut self, value: u16) -> Result<()> {
        self.layout.attrs.set(&mut self.block, u32::from(value))
    }

    fn type_enum(&self) -> Result<Il2CppTypeEnum> {
        let raw = self.layout.type_enum.get(&self.block)? as u8;
        Il2CppTypeEnum::from_repr(raw)
            .ok_or_else(|| malformed_error!("Unknown element type - {:#04x}", raw))
    }

    fn set_type_enum(&mut self, value: Il2CppTypeEnum) -> Result<()> {
        self.layout
            .type_enum
            .set(&mut self.block, u32::from(value as u8))
    }

    fn num_mods(&self) -> Result<u8> {
        Ok(self.layout.num_mods.get(&self.block)? as u8)
    }

    fn set_num_mods(&mut self, value: u8) -> Result<()> {
        self.layout.num_mods.set(&mut self.block, u32::from(value))
    }

    fn byref(&self) -> Result<bool> {
        Ok(self.layout.byref.get(&self.block)? != 0)
    }

    fn set_byref(&mut self, value: bool) -> Result<()> {
        self.layout.byref.set(&mut self.block, u32::from(value))
    }

    fn pinned(&self) -> Result<bool> {
        Ok(self.layout.pinned.get(&self.block)? != 0)
    }

    fn set_pinned(&mut self, value: bool) -> Result<()> {
        self.layout.pinned.set(&mut self.block, u32::from(value))
    }

    fn valuetype(&self) -> Result<bool> {
        match &self.layout.valuetype {
            Some(field) => Ok(field.get(&self.block)? != 0),
            None => Ok(false),
        }
    }

    fn set_valuetype(&mut self, value: bool) -> Result<()> {
        match &self.layout.valuetype {
            Some(field) => field.set(&mut self.block, u32::from(value)),
            None => Ok(()),
        }
    }
}

/// Knows the type descriptor layout of one range of metadata versions
pub trait NativeTypeStructHandler: Send + Sync {
    /// The layout version handled
    fn version(&self) -> TypeLayoutVersion;

    /// Offsets of this layout
    fn layout(&self) -> &'static TypeLayout;

    /// Size of one descriptor
    fn size(&self) -> usize {
        self.layout().size
    }

    /// Allocate a zeroed descriptor owned by the returned view
    ///
    /// # Errors
    /// Returns [`crate::Error::AllocationFailed`] if the allocation fails.
    fn create_new(&self) -> Result<Box<dyn NativeTypeStruct>> {
        Ok(Box::new(TypeView {
            block: NativeBlock::allocate_zeroed(self.size())?,
            layout: self.layout(),
        }))
    }

    /// View an existing descriptor without taking ownership
    ///
    /// # Safety
    /// `ptr` must point to a descriptor of this layout that stays valid and is not accessed
    /// elsewhere while the view is used.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingArgument`] if `ptr` is null.
    unsafe fn wrap(&self, ptr: *mut Il2CppType) -> Result<Box<dyn NativeTypeStruct>> {
        Ok(Box::new(TypeView {
            block: NativeBlock::wrap(ptr.cast(), self.size())?,
            layout: self.layout(),
        }))
    }

    /// Diagnostic name of the handler
    #[cfg(debug_assertions)]
    fn name(&self) -> String {
        format!("NativeTypeStructHandler_{}", self.version())
    }
}

/// Type descriptor layout of metadata versions 24.x
pub struct TypeHandlerV24;

impl NativeTypeStructHandler for TypeHandlerV24 {
    fn version(&self) -> TypeLayoutVersion {
        TypeLayoutVersion::V24
    }

    fn layout(&self) -> &'static TypeLayout {
        static LAYOUT: OnceLock<TypeLayout> = OnceLock::new();
        LAYOUT.get_or_init(|| TypeLayout::build(6, false))
    }
}

/// Type descriptor layout of metadata version 27 and later
pub struct TypeHandlerV27;

impl NativeTypeStructHandler for TypeHandlerV27 {
    fn version(&self) -> TypeLayoutVersion {
        TypeLayoutVersion::V27
    }

    fn layout(&self) -> &'static TypeLayout {
        static LAYOUT: OnceLock<TypeLayout> = OnceLock::new();
        LAYOUT.get_or_init(|| TypeLayout::build(5, true))
    }
}

/// Select the type descriptor handler for a metadata version
pub fn type_handler_for(version: MetadataVersion) -> &'static dyn NativeTypeStructHandler {
    if version >= MetadataVersion::new(27, 0) {
        &TypeHandlerV27
    } else {
        &TypeHandlerV24
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::native::layout::POINTER_SIZE;

    #[test]
    fn test_layout_sizes() {
        for handler in [&TypeHandlerV24 as &dyn NativeTypeStructHandler, &TypeHandlerV27] {
            assert_eq!(handler.layout().data, 0);
            assert_eq!(handler.size(), (POINTER_SIZE + 4).next_multiple_of(POINTER_SIZE));
        }
    }

    #[test]
    fn test_bit_positions() {
        let old = TypeHandlerV24.layout();
        assert_eq!(old.num_mods.width, 6);
        assert_eq!(old.byref.shift, 30);
        assert_eq!(old.pinned.shift, 31);
        assert!(old.valuetype.is_none());

        let new = TypeHandlerV27.layout();
        assert_eq!(new.num_mods.width, 5);
        assert_eq!(new.byref.shift, 29);
        assert_eq!(new.pinned.shift, 30);
        assert_eq!(new.valuetype.map(|field| field.shift), Some(31));
    }

    #[test]
    fn test_fields_are_independent() {
        for handler in [&TypeHandlerV24 as &dyn NativeTypeStructHandler, &TypeHandlerV27] {
            let mut view = handler.create_new().unwrap();
            view.set_attrs(0x0006).unwrap();
            view.set_type_enum(Il2CppTypeEnum::ValueType).unwrap();
            view.set_num_mods(3).unwrap();
            view.set_pinned(true).unwrap();
            view.set_data(0xABCD).unwrap();

            assert_eq!(view.attrs().unwrap(), 0x0006);
            assert_eq!(view.type_enum().unwrap(), Il2CppTypeEnum::ValueType);
            assert_eq!(view.num_mods().unwrap(), 3);
            assert!(!view.byref().unwrap());
            assert!(view.pinned().unwrap());
            assert_eq!(view.data().unwrap(), 0xABCD);
        }
    }

    #[test]
    fn test_valuetype_only_from_27() {
        let mut old = TypeHandlerV24.create_new().unwrap();
        old.set_valuetype(true).unwrap();
        assert!(!old.valuetype().unwrap());
        assert!(!old.pinned().unwrap());

        let mut new = TypeHandlerV27.create_new().unwrap();
        new.set_valuetype(true).unwrap();
        assert!(new.valuetype().unwrap());
        assert!(!new.pinned().unwrap());
    }

    #[test]
    fn test_wrap_existing() {
        let mut backing = [0usize; 2];
        let handler = type_handler_for(MetadataVersion::new(29, 0));
        assert_eq!(handler.version(), TypeLayoutVersion::V27);

        {
            let mut view = unsafe { handler.wrap(backing.as_mut_ptr().cast()) }.unwrap();
            view.set_type_enum(Il2CppTypeEnum::Class).unwrap();
        }
        assert!(backing.iter().any(|word| *word != 0));

        let view = unsafe { handler.wrap(backing.as_mut_ptr().cast()) }.unwrap();
        assert_eq!(view.type_enum().unwrap(), Il2CppTypeEnum::Class);
    }

    #[test]
    fn test_element_type_repr() {
        for element in Il2CppTypeEnum::iter() {
            assert_eq!(Il2CppTypeEnum::from_repr(element as u8), Some(element));
        }
        assert_eq!(Il2CppTypeEnum::from_repr(0x17), None);
    }

    #[test]
    fn test_selection() {
        assert_eq!(
            type_handler_for(MetadataVersion::new(24, 1)).version(),
            TypeLayoutVersion::V24
        );
        assert_eq!(
            type_handler_for(MetadataVersion::new(27, 0)).version(),
            TypeLayoutVersion::V27
        );
    }
}
