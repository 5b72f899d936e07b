//! Field definitions.

use std::sync::Arc;

use crate::metadata::{
    customattributes::CustomAttributeList, signatures::TypeSignature, token::Token,
};

/// A reference-counted pointer to a `Field`
pub type FieldRc = Arc<Field>;
/// A vector that holds a list of `Field`, in declaration order
pub type FieldList = Arc<boxcar::Vec<FieldRc>>;

#[allow(non_snake_case)]
/// All possible flags for `FieldAttributes`
pub mod FieldAttributes {
    /// These 3 bits contain one of the following values:
    pub const FIELD_ACCESS_MASK: u32 = 0x0007;
    /// Member not referenceable
    pub const COMPILER_CONTROLLED: u32 = 0x0000;
    /// Accessible only by the parent type
    pub const PRIVATE: u32 = 0x0001;
    /// Accessible by sub-types only in this Assembly
    pub const FAM_AND_ASSEM: u32 = 0x0002;
    /// Accessibly by anyone in the Assembly
    pub const ASSEMBLY: u32 = 0x0003;
    /// Accessible only by type and sub-types
    pub const FAMILY: u32 = 0x0004;
    /// Accessibly by sub-types anywhere, plus anyone in assembly
    pub const FAM_OR_ASSEM: u32 = 0x0005;
    /// Accessibly by anyone who has visibility to this scope field contract attributes
    pub const PUBLIC: u32 = 0x0006;
    /// Defined on type, else per instance
    pub const STATIC: u32 = 0x0010;
    /// Field can only be initialized, not written to after init
    pub const INIT_ONLY: u32 = 0x0020;
    /// Value is compile time constant
    pub const LITERAL: u32 = 0x0040;
    /// Reserved (to indicate this field should not be serialized when type is remoted)
    pub const NOT_SERIALIZED: u32 = 0x0080;
    /// Field is special
    pub const SPECIAL_NAME: u32 = 0x0200;
    /// CLI provides 'special' behavior, depending upon the name of the field
    pub const RTSPECIAL_NAME: u32 = 0x0400;
}

/// A field definition
pub struct Field {
    /// Token
    pub token: Token,
    /// Name of the field
    pub name: String,
    /// a 2-byte bitmask of type `FieldAttributes`, §II.23.1.5
    pub flags: u32,
    /// The type of the field
    pub signature: TypeSignature,
    /// Custom attributes applied to this field
    pub custom_attributes: CustomAttributeList,
}

impl Field {
    /// Create a new field without custom attributes
    ///
    /// ## Arguments
    /// * 'token'     - The `Field` token
    /// * 'name'      - The field name
    /// * 'flags'     - `FieldAttributes` bitmask
    /// * 'signature' - The field type
    pub fn new(token: Token, name: &str, flags: u32, signature: TypeSignature) -> Self {
        Field {
            token,
            name: name.to_string(),
            flags,
            signature,
            custom_attributes: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Returns true if the field is defined on the type rather than per instance
    pub fn is_static(&self) -> bool {
        self.flags & FieldAttributes::STATIC != 0
    }

    /// Returns true for compile time constants
    pub fn is_literal(&self) -> bool {
        self.flags & FieldAttributes::LITERAL != 0
    }

    /// The access level as it appears in generated member names
    pub fn access_name(&self) -> &'static str {
        match self.flags & FieldAttributes::FIELD_ACCESS_MASK {
            FieldAttributes::PRIVATE => "Private",
            FieldAttributes::FAM_AND_ASSEM => "PrivateProtected",
            FieldAttributes::ASSEMBLY => "Internal",
            FieldAttributes::FAMILY => "Protected",
            FieldAttributes::FAM_OR_ASSEM => "ProtectedInternal",
            FieldAttributes::PUBLIC => "Public",
            _ => "CompilerControlled",
        }
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("flags", &format_args!("{:#06x}", self.flags))
            .field("signature", &self.signature.full_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let field = Field::new(
            Token::new(0x0400_0001),
            "Instance",
            FieldAttributes::PUBLIC | FieldAttributes::STATIC | FieldAttributes::INIT_ONLY,
            TypeSignature::Object,
        );
        assert!(field.is_static());
        assert!(!field.is_literal());
        assert_eq!(field.access_name(), "Public");
    }

    #[test]
    fn test_access_name() {
        let field = Field::new(
            Token::new(0x0400_0002),
            "x",
            FieldAttributes::FAMILY,
            TypeSignature::R4,
        );
        assert_eq!(field.access_name(), "Protected");

        let field = Field::new(
            Token::new(0x0400_0003),
            "y",
            FieldAttributes::COMPILER_CONTROLLED,
            TypeSignature::R4,
        );
        assert_eq!(field.access_name(), "CompilerControlled");
    }
}
