//! Access to the runtime's native type and class descriptors.
//!
//! The runtime describes every loaded class with an `Il2CppClass` descriptor whose memory
//! layout changes between metadata versions. This module gives one version-independent view
//! over those descriptors so that classes can be created in unmanaged memory or inspected in
//! place without knowing the build they come from.
//!
//! # Architecture
//!
//! - [`layout`] computes C field offsets for a field list declared in header order
//! - [`types`] covers the `Il2CppType` descriptor embedded twice in every class descriptor
//! - [`class`] holds the [`ClassLayout`] tables, the [`NativeClassStruct`] view and one
//!   [`NativeClassStructHandler`] per layout version
//! - [`version`] maps metadata and engine versions onto handlers
//!
//! Handlers are stateless and shared; views either own a zeroed allocation
//! ([`NativeClassStructHandler::create_new`]) or borrow existing memory
//! ([`NativeClassStructHandler::wrap`]).
//!
//! # Examples
//!
//! ```rust
//! use reforge::native::{class_handler_for, MetadataVersion};
//!
//! let version = MetadataVersion::from_unity_version("2019.4.8f1")?;
//! let handler = class_handler_for(version)?;
//!
//! let mut class = handler.create_new(8)?;
//! class.set_initialized(true)?;
//! assert!(class.initialized()?);
//! assert_eq!(class.vtable_count()?, 8);
//! # Ok::<(), reforge::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! Handlers are `Send + Sync`. Views wrap raw memory and are neither; synchronizing access to a
//! shared descriptor is up to the caller.

pub mod bitfield;
pub mod class;
pub mod io;
pub mod layout;
pub mod memory;
pub mod types;
pub mod version;

pub use class::{ClassLayout, NativeClassStruct, NativeClassStructHandler};
pub use types::{type_handler_for, Il2CppTypeEnum, NativeTypeStruct, NativeTypeStructHandler};
pub use version::{class_handler_for, ClassLayoutVersion, MetadataVersion};

/// Opaque runtime class descriptor
#[repr(C)]
pub struct Il2CppClass {
    _private: [u8; 0],
}

/// Opaque runtime image
#[repr(C)]
pub struct Il2CppImage {
    _private: [u8; 0],
}

/// Opaque runtime method descriptor
#[repr(C)]
pub struct Il2CppMethodInfo {
    _private: [u8; 0],
}

/// Opaque interface-offset pair
#[repr(C)]
pub struct Il2CppRuntimeInterfaceOffsetPair {
    _private: [u8; 0],
}

/// Opaque runtime type descriptor
#[repr(C)]
pub struct Il2CppType {
    _private: [u8; 0],
}
