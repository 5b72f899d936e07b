//! Class descriptor of metadata version 24.0 (engine 2017.1 through 2018.2).

use std::sync::OnceLock;

use crate::native::{
    class::{ClassLayout, NativeClassStructHandler},
    layout::{LayoutBuilder, POINTER_SIZE},
    types::{NativeTypeStructHandler, TypeHandlerV24},
    version::ClassLayoutVersion,
};

/// Handler of the 24.0 class descriptor
pub struct ClassHandlerV24_0;

impl NativeClassStructHandler for ClassHandlerV24_0 {
    fn version(&self) -> ClassLayoutVersion {
        ClassLayoutVersion::V24_0
    }

    fn layout(&self) -> &'static ClassLayout {
        static LAYOUT: OnceLock<ClassLayout> = OnceLock::new();
        LAYOUT.get_or_init(build)
    }

    fn type_handler(&self) -> &'static dyn NativeTypeStructHandler {
        &TypeHandlerV24
    }
}

fn build() -> ClassLayout {
    let type_size = TypeHandlerV24.size();
    let mut b = LayoutBuilder::new();

    let image = b.pointer();
    let _gc_desc = b.pointer();
    let name = b.pointer();
    let namespace = b.pointer();
    let byval_arg = b.field(type_size, POINTER_SIZE);
    let this_arg = b.field(type_size, POINTER_SIZE);
    let element_class = b.pointer();
    let cast_class = b.pointer();
    let _declaring_type = b.pointer();
    let parent = b.pointer();
    let _generic_class = b.pointer();
    let _type_definition = b.pointer();
    let _interop_data = b.pointer();
    let class = b.pointer();
    let _fields = b.pointer();
    let _events = b.pointer();
    let _properties = b.pointer();
    let methods = b.pointer();
    let _nested_types = b.pointer();
    let implemented_interfaces = b.pointer();
    let interface_offsets = b.pointer();
    let _static_fields = b.pointer();
    let _rgctx_data = b.pointer();
    let type_hierarchy = b.pointer();
    let _cctor_started = b.scalar::<u32>();
    let _cctor_finished = b.scalar::<u32>();
    let _cctor_thread = b.field(8, 8);
    let _generic_container_index = b.scalar::<i32>();
    let _custom_attribute_index = b.scalar::<i32>();
    let instance_size = b.scalar::<u32>();
    let actual_size = b.scalar::<u32>();
    let _element_size = b.scalar::<u32>();
    let native_size = b.scalar::<i32>();
    let _static_fields_size = b.scalar::<u32>();
    let _thread_static_fields_size = b.scalar::<u32>();
    let _thread_static_fields_offset = b.scalar::<i32>();
    let flags = b.scalar::<u32>();
    let _token = b.scalar::<u32>();
    let method_count = b.scalar::<u16>();
    let _property_count = b.scalar::<u16>();
    let _field_count = b.scalar::<u16>();
    let _event_count = b.scalar::<u16>();
    let _nested_type_count = b.scalar::<u16>();
    let vtable_count = b.scalar::<u16>();
    let interface_count = b.scalar::<u16>();
    let interface_offsets_count = b.scalar::<u16>();
    let type_hierarchy_depth = b.scalar::<u8>();
    let _generic_recursion_depth = b.scalar::<u8>();
    let rank = b.scalar::<u8>();
    let _minimum_alignment = b.scalar::<u8>();
    let _packing_size = b.scalar::<u8>();

    let valuetype = b.bit();
    let initialized = b.bit();
    let enumtype = b.bit();
    let is_generic = b.bit();
    let _has_references = b.bit();
    let _init_pending = b.bit();
    let size_inited = b.bit();
    let has_finalize = b.bit();
    let _has_cctor = b.bit();
    let _is_blittable = b.bit();
    let _is_import_or_windows_runtime = b.bit();

    ClassLayout {
        image,
        name,
        namespace,
        byval_arg,
        this_arg,
        element_class,
        cast_class,
        parent,
        class,
        methods,
        implemented_interfaces,
        interface_offsets,
        type_hierarchy,
        instance_size,
        actual_size,
        native_size,
        flags,
        method_count,
        vtable_count,
        interface_count,
        interface_offsets_count,
        type_hierarchy_depth,
        rank,
        valuetype,
        enumtype,
        is_generic,
        initialized,
        initialized_and_no_error: None,
        size_inited,
        has_finalize,
        is_vtable_initialized: None,
        size: b.finish(),
    }
}
