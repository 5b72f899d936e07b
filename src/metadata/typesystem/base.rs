use std::sync::{Arc, Weak};

use crate::metadata::{
    token::Token,
    typesystem::{CilType, CilTypeRc},
};

/// A vector that holds `CilTypeRef` instances (weak references)
pub type CilTypeRefList = Arc<boxcar::Vec<CilTypeRef>>;

/// A smart reference to a `CilType` that automatically handles weak references
/// to prevent circular reference memory leaks while providing a clean API
///
/// Type signatures hold these rather than strong references, because a type routinely refers
/// to itself (self-typed fields, self-substituted generic instances).
#[derive(Clone, Debug)]
pub struct CilTypeRef {
    weak_ref: Weak<CilType>,
}

impl CilTypeRef {
    /// Create a new `CilTypeRef` from a strong reference
    pub fn new(strong_ref: &CilTypeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the type, returning None if the type has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<CilTypeRc> {
        self.weak_ref.upgrade()
    }

    /// Check if the referenced type is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }

    /// Returns true if this reference points at exactly `other` (identity, not name equality)
    #[must_use]
    pub fn points_to(&self, other: &CilTypeRc) -> bool {
        std::ptr::eq(self.weak_ref.as_ptr(), Arc::as_ptr(other))
    }

    /// Get the token of the referenced type (if still alive)
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        self.upgrade().map(|t| t.token)
    }

    /// Get the full name of the referenced type (if still alive)
    #[must_use]
    pub fn fullname(&self) -> Option<String> {
        self.upgrade().map(|t| t.fullname())
    }
}

impl From<CilTypeRc> for CilTypeRef {
    fn from(strong_ref: CilTypeRc) -> Self {
        Self::new(&strong_ref)
    }
}

impl From<&CilTypeRc> for CilTypeRef {
    fn from(strong_ref: &CilTypeRc) -> Self {
        Self::new(strong_ref)
    }
}

/// Category of a type definition or reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CilFlavor {
    /// A reference type
    Class,
    /// A value type (including enums)
    ValueType,
    /// An interface
    Interface,
}

#[allow(non_snake_case)]
/// Type attribute flag constants for type definitions, ECMA-335 §II.23.1.15.
///
/// The runtime's class descriptor stores the same 4-byte value, so these constants also
/// apply to the `flags` accessor of a native class view.
pub mod TypeAttributes {
    /// Mask for extracting type visibility information.
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Type has no public scope (internal to assembly).
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    /// Type has public scope (visible outside assembly).
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Nested type with public visibility.
    pub const NESTED_PUBLIC: u32 = 0x0000_0002;
    /// Nested type with private visibility.
    pub const NESTED_PRIVATE: u32 = 0x0000_0003;
    /// Nested type with family (protected) visibility.
    pub const NESTED_FAMILY: u32 = 0x0000_0004;
    /// Nested type with assembly (internal) visibility.
    pub const NESTED_ASSEMBLY: u32 = 0x0000_0005;
    /// Mask for extracting the layout bits.
    pub const LAYOUT_MASK: u32 = 0x0000_0018;
    /// Fields are laid out automatically.
    pub const AUTO_LAYOUT: u32 = 0x0000_0000;
    /// Fields are laid out sequentially.
    pub const SEQUENTIAL_LAYOUT: u32 = 0x0000_0008;
    /// Layout is supplied explicitly.
    pub const EXPLICIT_LAYOUT: u32 = 0x0000_0010;
    /// Type is an interface.
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Type is abstract.
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Type cannot be derived from.
    pub const SEALED: u32 = 0x0000_0100;
    /// Type name is special.
    pub const SPECIAL_NAME: u32 = 0x0000_0400;
    /// Type is serializable.
    pub const SERIALIZABLE: u32 = 0x0000_2000;
    /// Static constructor may run before first static field access.
    pub const BEFORE_FIELD_INIT: u32 = 0x0010_0000;
}
