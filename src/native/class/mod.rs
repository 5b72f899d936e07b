//! Version-independent access to class descriptors (`Il2CppClass`).
//!
//! Every runtime version lays the class descriptor out differently: fields are added, removed
//! and reordered, and the boolean flags move between bitfield units. A [`ClassLayout`] records
//! where each field lives for one version; [`NativeClassStruct`] is the typed view over one
//! descriptor, and a [`NativeClassStructHandler`] per version creates and wraps views.
//!
//! The vtable follows the fixed header directly; each slot is pointer-sized.
//!
//! # Examples
//!
//! ```rust
//! use reforge::native::{class_handler_for, MetadataVersion};
//!
//! let handler = class_handler_for(MetadataVersion::parse("24.1")?)?;
//! let mut class = handler.create_new(4)?;
//!
//! assert_eq!(class.vtable_count()?, 4);
//! assert_eq!(class.instance_size()? as usize, handler.header_size());
//!
//! class.set_value_type(true)?;
//! assert!(class.value_type()?);
//! # Ok::<(), reforge::Error>(())
//! ```

pub mod v24_0;
pub mod v24_1;
pub mod v27_0;
pub mod v29_0;

use std::ffi::{c_char, c_void};

use crate::{
    native::{
        bitfield::BitField,
        layout::POINTER_SIZE,
        memory::NativeBlock,
        types::{NativeTypeStruct, NativeTypeStructHandler},
        version::ClassLayoutVersion,
        Il2CppClass, Il2CppImage, Il2CppMethodInfo, Il2CppRuntimeInterfaceOffsetPair,
    },
    Error::OutOfBounds,
    Result,
};

/// Offsets of the class descriptor fields of one runtime version
///
/// All offsets are in bytes from the start of the descriptor. Flags a version does not have
/// are `None`.
#[derive(Debug, Clone)]
pub struct ClassLayout {
    /// Owning image
    pub image: usize,
    /// Simple name, a C string
    pub name: usize,
    /// Namespace, a C string
    pub namespace: usize,
    /// Embedded type descriptor of the type itself
    pub byval_arg: usize,
    /// Embedded type descriptor of `this`
    pub this_arg: usize,
    /// Element class of arrays and enums
    pub element_class: usize,
    /// Class used for cast checks
    pub cast_class: usize,
    /// Parent class
    pub parent: usize,
    /// Pointer to the descriptor itself
    pub class: usize,
    /// Method-info table
    pub methods: usize,
    /// Implemented-interfaces table
    pub implemented_interfaces: usize,
    /// Interface-offset pair table
    pub interface_offsets: usize,
    /// Type-hierarchy table
    pub type_hierarchy: usize,
    /// `u32` instance size
    pub instance_size: usize,
    /// `u32` actual size
    pub actual_size: usize,
    /// `i32` native size
    pub native_size: usize,
    /// `u32` type attribute flags
    pub flags: usize,
    /// `u16` method count
    pub method_count: usize,
    /// `u16` vtable slot count
    pub vtable_count: usize,
    /// `u16` implemented interface count
    pub interface_count: usize,
    /// `u16` interface offset count
    pub interface_offsets_count: usize,
    /// `u8` type hierarchy depth
    pub type_hierarchy_depth: usize,
    /// `u8` array rank
    pub rank: usize,
    /// Value type flag
    pub valuetype: BitField,
    /// Enum flag
    pub enumtype: BitField,
    /// Generic type definition flag
    pub is_generic: BitField,
    /// Class initialized flag
    pub initialized: BitField,
    /// Initialized without error flag
    pub initialized_and_no_error: Option<BitField>,
    /// Instance size computed flag
    pub size_inited: BitField,
    /// Has finalizer flag
    pub has_finalize: BitField,
    /// Vtable initialized flag
    pub is_vtable_initialized: Option<BitField>,
    /// Size of the fixed header; the vtable starts here
    pub size: usize,
}

/// Typed view over one class descriptor
///
/// Scalar accessors read and write at the version's offsets. Pointer accessors return raw
/// pointers that are never dereferenced by the view.
pub trait NativeClassStruct {
    /// Start of the descriptor
    fn class_pointer(&self) -> *mut Il2CppClass;

    /// First vtable slot
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the view does not cover the header.
    fn vtable(&self) -> Result<*mut *mut c_void>;

    /// Read vtable slot `index`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `index` is past the view.
    fn vtable_slot(&self, index: usize) -> Result<usize>;

    /// Write vtable slot `index`
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `index` is past the view.
    fn set_vtable_slot(&mut self, index: usize, value: usize) -> Result<()>;

    /// Instance size in bytes
    fn instance_size(&self) -> Result<u32>;
    /// Replace the instance size
    fn set_instance_size(&mut self, value: u32) -> Result<()>;

    /// Number of vtable slots
    fn vtable_count(&self) -> Result<u16>;
    /// Replace the number of vtable slots
    fn set_vtable_count(&mut self, value: u16) -> Result<()>;

    /// Number of implemented interfaces
    fn interface_count(&self) -> Result<u16>;
    /// Replace the number of implemented interfaces
    fn set_interface_count(&mut self, value: u16) -> Result<()>;

    /// Number of interface offset pairs
    fn interface_offsets_count(&self) -> Result<u16>;
    /// Replace the number of interface offset pairs
    fn set_interface_offsets_count(&mut self, value: u16) -> Result<()>;

    /// Depth in the type hierarchy
    fn type_hierarchy_depth(&self) -> Result<u8>;
    /// Replace the depth in the type hierarchy
    fn set_type_hierarchy_depth(&mut self, value: u8) -> Result<()>;

    /// Size of the native (marshalled) representation, `-1` if none
    fn native_size(&self) -> Result<i32>;
    /// Replace the native size
    fn set_native_size(&mut self, value: i32) -> Result<()>;

    /// Actual size in bytes
    fn actual_size(&self) -> Result<u32>;
    /// Replace the actual size
    fn set_actual_size(&mut self, value: u32) -> Result<()>;

    /// Number of methods
    fn method_count(&self) -> Result<u16>;
    /// Replace the number of methods
    fn set_method_count(&mut self, value: u16) -> Result<()>;

    /// Type attribute flags
    fn flags(&self) -> Result<u32>;
    /// Replace the type attribute flags
    fn set_flags(&mut self, value: u32) -> Result<()>;

    /// Array rank
    fn rank(&self) -> Result<u8>;
    /// Replace the array rank
    fn set_rank(&mut self, value: u8) -> Result<()>;

    /// Value type flag
    fn value_type(&self) -> Result<bool>;
    /// Set or clear the value type flag
    fn set_value_type(&mut self, value: bool) -> Result<()>;

    /// Enum flag
    fn enum_type(&self) -> Result<bool>;
    /// Set or clear the enum flag
    fn set_enum_type(&mut self, value: bool) -> Result<()>;

    /// Generic type definition flag
    fn is_generic(&self) -> Result<bool>;
    /// Set or clear the generic flag
    fn set_is_generic(&mut self, value: bool) -> Result<()>;

    /// Class initialized flag
    fn initialized(&self) -> Result<bool>;
    /// Set or clear the initialized flag
    fn set_initialized(&mut self, value: bool) -> Result<()>;

    /// Initialized without error; reads `initialized` on versions without the flag
    fn initialized_and_no_error(&self) -> Result<bool>;
    /// Set or clear the flag; ignored on versions without it
    fn set_initialized_and_no_error(&mut self, value: bool) -> Result<()>;

    /// Instance size computed flag
    fn size_inited(&self) -> Result<bool>;
    /// Set or clear the size computed flag
    fn set_size_inited(&mut self, value: bool) -> Result<()>;

    /// Has finalizer flag
    fn has_finalize(&self) -> Result<bool>;
    /// Set or clear the finalizer flag
    fn set_has_finalize(&mut self, value: bool) -> Result<()>;

    /// Vtable initialized; reads `initialized` on versions without the flag
    fn is_vtable_initialized(&self) -> Result<bool>;
    /// Set or clear the flag; ignored on versions without it
    fn set_is_vtable_initialized(&mut self, value: bool) -> Result<()>;

    /// Simple name
    fn name(&self) -> Result<*const c_char>;
    /// Replace the simple name
    fn set_name(&mut self, value: *const c_char) -> Result<()>;

    /// Namespace
    fn namespace(&self) -> Result<*const c_char>;
    /// Replace the namespace
    fn set_namespace(&mut self, value: *const c_char) -> Result<()>;

    /// Embedded type descriptor of the type itself
    fn by_val_arg(&mut self) -> Result<Box<dyn NativeTypeStruct + '_>>;

    /// Embedded type descriptor of `this`
    fn this_arg(&mut self) -> Result<Box<dyn NativeTypeStruct + '_>>;

    /// Owning image
    fn image(&self) -> Result<*mut Il2CppImage>;
    /// Replace the owning image
    fn set_image(&mut self, value: *mut Il2CppImage) -> Result<()>;

    /// Parent class
    fn parent(&self) -> Result<*mut Il2CppClass>;
    /// Replace the parent class
    fn set_parent(&mut self, value: *mut Il2CppClass) -> Result<()>;

    /// Element class
    fn element_class(&self) -> Result<*mut Il2CppClass>;
    /// Replace the element class
    fn set_element_class(&mut self, value: *mut Il2CppClass) -> Result<()>;

    /// Cast class
    fn cast_class(&self) -> Result<*mut Il2CppClass>;
    /// Replace the cast class
    fn set_cast_class(&mut self, value: *mut Il2CppClass) -> Result<()>;

    /// Self pointer
    fn class(&self) -> Result<*mut Il2CppClass>;
    /// Replace the self pointer
    fn set_class(&mut self, value: *mut Il2CppClass) -> Result<()>;

    /// Method-info table
    fn methods(&self) -> Result<*mut *mut Il2CppMethodInfo>;
    /// Replace the method-info table
    fn set_methods(&mut self, value: *mut *mut Il2CppMethodInfo) -> Result<()>;

    /// Implemented-interfaces table
    fn implemented_interfaces(&self) -> Result<*mut *mut Il2CppClass>;
    /// Replace the implemented-interfaces table
    fn set_implemented_interfaces(&mut self, value: *mut *mut Il2CppClass) -> Result<()>;

    /// Interface-offset pair table
    fn interface_offsets(&self) -> Result<*mut Il2CppRuntimeInterfaceOffsetPair>;
    /// Replace the interface-offset pair table
    fn set_interface_offsets(
        &mut self,
        value: *mut Il2CppRuntimeInterfaceOffsetPair,
    ) -> Result<()>;

    /// Type-hierarchy table
    fn type_hierarchy(&self) -> Result<*mut *mut Il2CppClass>;
    /// Replace the type-hierarchy table
    fn set_type_hierarchy(&mut self, value: *mut *mut Il2CppClass) -> Result<()>;
}

/// Creates and wraps class descriptor views for one runtime version
pub trait NativeClassStructHandler: Send + Sync {
    /// The layout version handled
    fn version(&self) -> ClassLayoutVersion;

    /// Offsets of this version
    fn layout(&self) -> &'static ClassLayout;

    /// Handler of the embedded type descriptors
    fn type_handler(&self) -> &'static dyn NativeTypeStructHandler;

    /// Size of the fixed header in bytes
    fn header_size(&self) -> usize {
        self.layout().size
    }

    /// Allocate a zeroed descriptor with `vtable_slots` slots, owned by the returned view
    ///
    /// The vtable count is set to `vtable_slots` and the instance size to the header size.
    ///
    /// # Errors
    /// Returns [`crate::Error::AllocationFailed`] if the allocation fails.
    fn create_new(&self, vtable_slots: u16) -> Result<Box<dyn NativeClassStruct>> {
        let len = self.header_size() + usize::from(vtable_slots) * POINTER_SIZE;
        let mut view = ClassView {
            block: NativeBlock::allocate_zeroed(len)?,
            layout: self.layout(),
            types: self.type_handler(),
        };

        view.set_vtable_count(vtable_slots)?;
        view.set_instance_size(u32::try_from(self.header_size()).map_err(|_| OutOfBounds)?)?;

        tracing::trace!(
            "allocated {} byte class descriptor for layout {}",
            len,
            self.version()
        );
        Ok(Box::new(view))
    }

    /// View an existing descriptor without taking ownership
    ///
    /// The view covers the header and as many vtable slots as the descriptor's vtable count.
    ///
    /// # Safety
    /// `ptr` must point to a descriptor of this version that stays valid, including its
    /// vtable, and is not accessed elsewhere while the view is used.
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingArgument`] if `ptr` is null.
    unsafe fn wrap(&self, ptr: *mut Il2CppClass) -> Result<Box<dyn NativeClassStruct>> {
        let header = NativeBlock::wrap(ptr.cast(), self.header_size())?;
        let slots = header.read::<u16>(self.layout().vtable_count)?;

        Ok(Box::new(ClassView {
            block: NativeBlock::wrap(
                ptr.cast(),
                self.header_size() + usize::from(slots) * POINTER_SIZE,
            )?,
            layout: self.layout(),
            types: self.type_handler(),
        }))
    }

    /// Diagnostic name of the handler
    #[cfg(debug_assertions)]
    fn name(&self) -> String {
        format!("NativeClassStructHandler_{}", self.version())
    }
}

struct ClassView {
    block: NativeBlock,
    layout: &'static ClassLayout,
    types: &'static dyn NativeTypeStructHandler,
}

impl ClassView {
    fn embedded_type(&mut self, offset: usize) -> Result<Box<dyn NativeTypeStruct + '_>> {
        if offset + self.types.size() > self.block.len() {
            return Err(OutOfBounds);
        }

        let ptr = self.block.ptr_at(offset)?;
        // SAFETY: the descriptor lies within this block, and the returned view borrows self
        unsafe { self.types.wrap(ptr.cast()) }
    }

    fn optional_flag(&self, flag: Option<BitField>) -> Result<bool> {
        match flag {
            Some(flag) => flag.get(&self.block),
            None => self.layout.initialized.get(&self.block),
        }
    }

    fn set_optional_flag(&mut self, flag: Option<BitField>, value: bool) -> Result<()> {
        match flag {
            Some(flag) => flag.set(&mut self.block, value),
            None => Ok(()),
        }
    }
}

macro_rules! scalar_accessors {
    ($($get:ident, $set:ident: $ty:ty;)*) => {
        $(
            fn $get(&self) -> Result<$ty> {
                self.block.read(self.layout.$get)
            }

            fn $set(&mut self, value: $ty) -> Result<()> {
                self.block.write(self.layout.$get, value)
            }
        )*
    };
}

macro_rules! pointer_accessors {
    ($($get:ident, $set:ident: $ty:ty;)*) => {
        $(
            fn $get(&self) -> Result<$ty> {
                Ok(self.block.read::<usize>(self.layout.$get)? as $ty)
            }

            fn $set(&mut self, value: $ty) -> Result<()> {
                self.block.write(self.layout.$get, value as usize)
            }
        )*
    };
}

macro_rules! flag_accessors {
    ($($get:ident, $set:ident: $field:ident;)*) => {
        $(
            fn $get(&self) -> Result<bool> {
                self.layout.$field.get(&self.block)
            }

            fn $set(&mut self, value: bool) -> Result<()> {
                self.layout.$field.set(&mut self.block, value)
            }
        )*
    };
}

impl NativeClassStruct for ClassView {
    fn class_pointer(&self) -> *mut Il2CppClass {
        self.block.as_ptr().cast()
    }

    fn vtable(&self) -> Result<*mut *mut c_void> {
        Ok(self.block.ptr_at(self.layout.size)?.cast())
    }

    fn vtable_slot(&self, index: usize) -> Result<usize> {
        let offset = index
            .checked_mul(POINTER_SIZE)
            .and_then(|offset| offset.checked_add(self.layout.size))
            .ok_or(OutOfBounds)?;
        self.block.read(offset)
    }

    fn set_vtable_slot(&mut self, index: usize, value: usize) -> Result<()> {
        let offset = index
            .checked_mul(POINTER_SIZE)
            .and_then(|offset| offset.checked_add(self.layout.size))
            .ok_or(OutOfBounds)?;
        self.block.write(offset, value)
    }

    scalar_accessors! {
        instance_size, set_instance_size: u32;
        vtable_count, set_vtable_count: u16;
        interface_count, set_interface_count: u16;
        interface_offsets_count, set_interface_offsets_count: u16;
        type_hierarchy_depth, set_type_hierarchy_depth: u8;
        native_size, set_native_size: i32;
        actual_size, set_actual_size: u32;
        method_count, set_method_count: u16;
        flags, set_flags: u32;
        rank, set_rank: u8;
    }

    flag_accessors! {
        value_type, set_value_type: valuetype;
        enum_type, set_enum_type: enumtype;
        is_generic, set_is_generic: is_generic;
        initialized, set_initialized: initialized;
        size_inited, set_size_inited: size_inited;
        has_finalize, set_has_finalize: has_finalize;
    }

    fn initialized_and_no_error(&self) -> Result<bool> {
        self.optional_flag(self.layout.initialized_and_no_error)
    }

    fn set_initialized_and_no_error(&mut self, value: bool) -> Result<()> {
        self.set_optional_flag(self.layout.initialized_and_no_error, value)
    }

    fn is_vtable_initialized(&self) -> Result<bool> {
        self.optional_flag(self.layout.is_vtable_initialized)
    }

    fn set_is_vtable_initialized(&mut self, value: bool) -> Result<()> {
        self.set_optional_flag(self.layout.is_vtable_initialized, value)
    }

    pointer_accessors! {
        name, set_name: *const c_char;
        namespace, set_namespace: *const c_char;
        image, set_image: *mut Il2CppImage;
        parent, set_parent: *mut Il2CppClass;
        element_class, set_element_class: *mut Il2CppClass;
        cast_class, set_cast_class: *mut Il2CppClass;
        class, set_class: *mut Il2CppClass;
        methods, set_methods: *mut *mut Il2CppMethodInfo;
        implemented_interfaces, set_implemented_interfaces: *mut *mut Il2CppClass;
        interface_offsets, set_interface_offsets: *mut Il2CppRuntimeInterfaceOffsetPair;
        type_hierarchy, set_type_hierarchy: *mut *mut Il2CppClass;
    }

    fn by_val_arg(&mut self) -> Result<Box<dyn NativeTypeStruct + '_>> {
        self.embedded_type(self.layout.byval_arg)
    }

    fn this_arg(&mut self) -> Result<Box<dyn NativeTypeStruct + '_>> {
        self.embedded_type(self.layout.this_arg)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::native::types::Il2CppTypeEnum;

    fn handlers() -> impl Iterator<Item = &'static dyn NativeClassStructHandler> {
        ClassLayoutVersion::iter().map(|version| version.handler())
    }

    #[test]
    fn test_create_new() {
        for handler in handlers() {
            for slots in [0_u16, 1, 17] {
                let class = handler.create_new(slots).unwrap();
                assert_eq!(class.vtable_count().unwrap(), slots);
                assert_eq!(class.instance_size().unwrap() as usize, handler.header_size());
                assert!(!class.value_type().unwrap());
                assert!(class.parent().unwrap().is_null());
            }
        }
    }

    #[test]
    fn test_header_alignment() {
        for handler in handlers() {
            assert_eq!(handler.header_size() % POINTER_SIZE, 0, "{}", handler.version());
            let layout = handler.layout();
            assert!(layout.this_arg >= layout.byval_arg + handler.type_handler().size());
        }
    }

    #[test]
    fn test_flags_preserve_siblings() {
        for handler in handlers() {
            let mut class = handler.create_new(0).unwrap();
            class.set_value_type(true).unwrap();
            class.set_has_finalize(true).unwrap();
            class.set_enum_type(true).unwrap();
            class.set_enum_type(false).unwrap();

            assert!(class.value_type().unwrap());
            assert!(class.has_finalize().unwrap());
            assert!(!class.enum_type().unwrap());
            assert!(!class.initialized().unwrap());
            assert!(!class.is_generic().unwrap());
            assert!(!class.size_inited().unwrap());
        }
    }

    #[test]
    fn test_scalars_do_not_overlap() {
        for handler in handlers() {
            let mut class = handler.create_new(2).unwrap();
            class.set_instance_size(0x1111_1111).unwrap();
            class.set_actual_size(0x2222_2222).unwrap();
            class.set_native_size(-1).unwrap();
            class.set_flags(0x0010_0101).unwrap();
            class.set_method_count(0x3333).unwrap();
            class.set_interface_count(0x4444).unwrap();
            class.set_interface_offsets_count(0x5555).unwrap();
            class.set_type_hierarchy_depth(0x66).unwrap();
            class.set_rank(0x77).unwrap();

            assert_eq!(class.instance_size().unwrap(), 0x1111_1111);
            assert_eq!(class.actual_size().unwrap(), 0x2222_2222);
            assert_eq!(class.native_size().unwrap(), -1);
            assert_eq!(class.flags().unwrap(), 0x0010_0101);
            assert_eq!(class.method_count().unwrap(), 0x3333);
            assert_eq!(class.vtable_count().unwrap(), 2);
            assert_eq!(class.interface_count().unwrap(), 0x4444);
            assert_eq!(class.interface_offsets_count().unwrap(), 0x5555);
            assert_eq!(class.type_hierarchy_depth().unwrap(), 0x66);
            assert_eq!(class.rank().unwrap(), 0x77);
        }
    }

    #[test]
    fn test_pointers() {
        for handler in handlers() {
            let mut class = handler.create_new(0).unwrap();
            let own = class.class_pointer();
            class.set_class(own).unwrap();
            class.set_parent(0x1000 as *mut Il2CppClass).unwrap();
            class.set_image(0x2000 as *mut Il2CppImage).unwrap();
            class.set_type_hierarchy(0x3000 as *mut *mut Il2CppClass).unwrap();

            assert_eq!(class.class().unwrap(), own);
            assert_eq!(class.parent().unwrap() as usize, 0x1000);
            assert_eq!(class.image().unwrap() as usize, 0x2000);
            assert_eq!(class.type_hierarchy().unwrap() as usize, 0x3000);
            assert!(class.element_class().unwrap().is_null());
            assert!(class.methods().unwrap().is_null());
        }
    }

    #[test]
    fn test_vtable_slots() {
        for handler in handlers() {
            let mut class = handler.create_new(3).unwrap();
            class.set_vtable_slot(2, 0xFEED).unwrap();
            assert_eq!(class.vtable_slot(2).unwrap(), 0xFEED);
            assert_eq!(class.vtable_slot(0).unwrap(), 0);
            assert!(class.vtable_slot(3).is_err());

            let base = class.class_pointer() as usize;
            assert_eq!(class.vtable().unwrap() as usize, base + handler.header_size());
        }
    }

    #[test]
    fn test_optional_flags() {
        let mut old = ClassLayoutVersion::V24_0.handler().create_new(0).unwrap();
        old.set_initialized_and_no_error(true).unwrap();
        old.set_is_vtable_initialized(true).unwrap();
        assert!(!old.initialized_and_no_error().unwrap());
        assert!(!old.is_vtable_initialized().unwrap());
        old.set_initialized(true).unwrap();
        assert!(old.initialized_and_no_error().unwrap());
        assert!(old.is_vtable_initialized().unwrap());

        let mut new = ClassLayoutVersion::V24_1.handler().create_new(0).unwrap();
        new.set_initialized_and_no_error(true).unwrap();
        assert!(new.initialized_and_no_error().unwrap());
        assert!(!new.initialized().unwrap());
    }

    #[test]
    fn test_embedded_types() {
        for handler in handlers() {
            let mut class = handler.create_new(0).unwrap();
            class
                .by_val_arg()
                .unwrap()
                .set_type_enum(Il2CppTypeEnum::ValueType)
                .unwrap();
            class.this_arg().unwrap().set_byref(true).unwrap();

            assert_eq!(
                class.by_val_arg().unwrap().type_enum().unwrap(),
                Il2CppTypeEnum::ValueType
            );
            assert!(!class.by_val_arg().unwrap().byref().unwrap());
            assert!(class.this_arg().unwrap().byref().unwrap());
            assert_eq!(class.this_arg().unwrap().type_enum().unwrap(), Il2CppTypeEnum::End);
        }
    }

    #[test]
    fn test_wrap_uses_vtable_count() {
        for handler in handlers() {
            let owner = handler.create_new(2).unwrap();
            let mut view = unsafe { handler.wrap(owner.class_pointer()) }.unwrap();

            view.set_vtable_slot(1, 0xBEEF).unwrap();
            assert!(view.vtable_slot(2).is_err());
            assert_eq!(owner.vtable_slot(1).unwrap(), 0xBEEF);
        }
    }

    #[test]
    fn test_wrap_null() {
        let handler = ClassLayoutVersion::V29_0.handler();
        let result = unsafe { handler.wrap(std::ptr::null_mut()) };
        assert!(matches!(result, Err(crate::Error::MissingArgument(_))));
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_names() {
        assert_eq!(
            ClassLayoutVersion::V27_0.handler().name(),
            "NativeClassStructHandler_27.0"
        );
    }
}
