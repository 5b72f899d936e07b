//! Type usages (signatures) and by-name member references.
//!
//! A [`TypeSignature`] describes how a type is *used*: as a field type, a parameter type, a
//! generic argument. Unlike a definition it can be a construction: a pointer, an array, a
//! generic instantiation or a generic parameter. Every signature renders a canonical
//! [`TypeSignature::full_name`] that is stable across modules, which is what cross-module
//! member correlation compares.
//!
//! [`MethodReference`] and [`FieldReference`] name a member on a declaring type signature
//! without requiring a definition, e.g. the static class-pointer slot on an instantiation
//! of the storage-holder type.
//!
//! # Examples
//!
//! ```rust
//! use reforge::metadata::signatures::TypeSignature;
//!
//! let buffer = TypeSignature::SzArray(Box::new(TypeSignature::U1));
//! assert_eq!(buffer.full_name(), "System.Byte[]");
//!
//! let handle = TypeSignature::Ptr(Box::new(TypeSignature::Void));
//! assert_eq!(handle.full_name(), "System.Void*");
//! ```

mod references;
mod types;

pub use references::{FieldReference, MethodReference};
pub use types::TypeSignature;
