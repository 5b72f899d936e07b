//! Method attribute flags.
//!
//! The raw 2-byte `MethodAttributes` bitmask (ECMA-335 §II.23.1.10) is split into logical
//! groups: the member access level, which is a 3-bit enumeration rather than a set of flags,
//! and the remaining modifier bits.

use bitflags::bitflags;

/// Bitmask for the member access level
pub const METHOD_ACCESS_MASK: u32 = 0x0007;
/// Bitmask for the vtable layout bit
pub const METHOD_VTABLE_LAYOUT_MASK: u32 = 0x0100;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method access flags
    pub struct MethodAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MethodAccessFlags {
    /// Extract access flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        let access = flags & METHOD_ACCESS_MASK;
        Self::from_bits_truncate(access)
    }

    /// The access level as it appears in generated member names
    ///
    /// The access level is an enumeration, so the combined bits are compared as a whole.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self.bits() {
            0x0001 => "Private",
            0x0002 => "PrivateProtected",
            0x0003 => "Internal",
            0x0004 => "Protected",
            0x0005 => "ProtectedInternal",
            0x0006 => "Public",
            _ => "CompilerControlled",
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method can only be overriden if also accessible
        const STRICT = 0x0200;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, dpending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        let modifiers = flags & !METHOD_ACCESS_MASK & !METHOD_VTABLE_LAYOUT_MASK;
        Self::from_bits_truncate(modifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_flags() {
        // public static hidebysig specialname
        let raw = 0x0006 | 0x0010 | 0x0080 | 0x0800 | 0x0100;

        let access = MethodAccessFlags::from_method_flags(raw);
        assert_eq!(access, MethodAccessFlags::PUBLIC);
        assert_eq!(access.name(), "Public");

        let modifiers = MethodModifiers::from_method_flags(raw);
        assert!(modifiers.contains(MethodModifiers::STATIC));
        assert!(modifiers.contains(MethodModifiers::HIDE_BY_SIG));
        assert!(modifiers.contains(MethodModifiers::SPECIAL_NAME));
        assert!(!modifiers.contains(MethodModifiers::VIRTUAL));
    }

    #[test]
    fn test_access_names() {
        assert_eq!(MethodAccessFlags::PRIVATE.name(), "Private");
        assert_eq!(MethodAccessFlags::FAMILY.name(), "Protected");
        assert_eq!(MethodAccessFlags::ASSEM.name(), "Internal");
        assert_eq!(MethodAccessFlags::COMPILER_CONTROLLED.name(), "CompilerControlled");
    }
}
