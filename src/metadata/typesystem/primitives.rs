use strum::{EnumIter, IntoEnumIterator};

/// Full name of the built-in string type
pub const SYSTEM_STRING: &str = "System.String";
/// Full name of the built-in object type
pub const SYSTEM_OBJECT: &str = "System.Object";
/// Full name of the base type of all value types
pub const SYSTEM_VALUE_TYPE: &str = "System.ValueType";
/// Full name of the base type of all enums
pub const SYSTEM_ENUM: &str = "System.Enum";
/// Full name of the pointer-sized signed integer
pub const SYSTEM_INTPTR: &str = "System.IntPtr";

/// The built-in types of the runtime that have a dedicated signature encoding.
///
/// `Boolean` through `U` are the runtime primitives: fixed-width, blittable value types.
/// `String`, `Object` and `Void` are built-in but are not primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum CilPrimitiveKind {
    /// System.Void - represents no value
    Void,
    /// System.Boolean - true/false value
    Boolean,
    /// System.Char - Unicode 16-bit character
    Char,
    /// System.SByte - signed 8-bit integer
    I1,
    /// System.Byte - unsigned 8-bit integer
    U1,
    /// System.Int16 - signed 16-bit integer
    I2,
    /// System.UInt16 - unsigned 16-bit integer
    U2,
    /// System.Int32 - signed 32-bit integer
    I4,
    /// System.UInt32 - unsigned 32-bit integer
    U4,
    /// System.Int64 - signed 64-bit integer
    I8,
    /// System.UInt64 - unsigned 64-bit integer
    U8,
    /// System.Single - 32-bit floating point
    R4,
    /// System.Double - 64-bit floating point
    R8,
    /// System.IntPtr - native sized signed integer
    I,
    /// System.UIntPtr - native sized unsigned integer
    U,
    /// System.Object - base class for all reference types
    Object,
    /// System.String - immutable string of Unicode characters
    String,
}

impl CilPrimitiveKind {
    /// The namespace-qualified name of this built-in type
    #[must_use]
    pub fn fullname(&self) -> &'static str {
        match self {
            CilPrimitiveKind::Void => "System.Void",
            CilPrimitiveKind::Boolean => "System.Boolean",
            CilPrimitiveKind::Char => "System.Char",
            CilPrimitiveKind::I1 => "System.SByte",
            CilPrimitiveKind::U1 => "System.Byte",
            CilPrimitiveKind::I2 => "System.Int16",
            CilPrimitiveKind::U2 => "System.UInt16",
            CilPrimitiveKind::I4 => "System.Int32",
            CilPrimitiveKind::U4 => "System.UInt32",
            CilPrimitiveKind::I8 => "System.Int64",
            CilPrimitiveKind::U8 => "System.UInt64",
            CilPrimitiveKind::R4 => "System.Single",
            CilPrimitiveKind::R8 => "System.Double",
            CilPrimitiveKind::I => SYSTEM_INTPTR,
            CilPrimitiveKind::U => "System.UIntPtr",
            CilPrimitiveKind::Object => SYSTEM_OBJECT,
            CilPrimitiveKind::String => SYSTEM_STRING,
        }
    }

    /// Look up a built-in type by its full name
    ///
    /// ## Arguments
    /// * 'fullname' - The namespace-qualified name, e.g. `System.Int32`
    #[must_use]
    pub fn from_fullname(fullname: &str) -> Option<Self> {
        CilPrimitiveKind::iter().find(|kind| kind.fullname() == fullname)
    }

    /// Returns true for the fixed-width runtime primitives (`Boolean` through `UIntPtr`)
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            CilPrimitiveKind::Void | CilPrimitiveKind::Object | CilPrimitiveKind::String
        )
    }
}

/// Returns true if `fullname` names one of the runtime primitives
///
/// `System.String`, `System.Object` and `System.Void` are not primitives.
#[must_use]
pub fn is_primitive_fullname(fullname: &str) -> bool {
    CilPrimitiveKind::from_fullname(fullname).is_some_and(|kind| kind.is_primitive())
}
