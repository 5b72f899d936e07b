use crate::metadata::{
    generics::GenericParamRc,
    typesystem::{CilPrimitiveKind, CilTypeRc, CilTypeRef},
};

/// Rendered in place of a type whose definition has already been dropped
const UNRESOLVED: &str = "<unresolved>";

/// A type as used by a field, parameter, return value or generic argument
#[derive(Debug, Clone, Default)]
pub enum TypeSignature {
    #[default]
    /// Not defined
    Unknown,
    /// void
    Void,
    /// bool
    Boolean,
    /// char
    Char,
    /// signed 8bit integer
    I1,
    /// unsigned 8bit integer
    U1,
    /// signed 16bit integer
    I2,
    /// unsigned 16bit integer
    U2,
    /// signed 32bit integer
    I4,
    /// unsigned 32bit integer
    U4,
    /// signed 64bit integer
    I8,
    /// unsigned 64bit integer
    U8,
    /// 32bit floating-point
    R4,
    /// 64bit floating-point
    R8,
    /// signed integer, sized to executing platform
    I,
    /// unsigned integer, sized to executing platform
    U,
    /// System.String
    String,
    /// System.Object
    Object,
    /// A class or value type, referenced by identity
    Type(CilTypeRef),
    /// Generic type and its arguments
    GenericInst {
        /// The open generic definition
        definition: CilTypeRef,
        /// One argument per generic parameter of `definition`
        arguments: Vec<TypeSignature>,
    },
    /// Generic parameter of a type or method
    GenericParam(GenericParamRc),
    /// A pointer to a type
    Ptr(Box<TypeSignature>),
    /// Type by reference
    ByRef(Box<TypeSignature>),
    /// Single dimension, zero-based array
    SzArray(Box<TypeSignature>),
    /// Multi dimensional array
    Array {
        /// Element type
        element: Box<TypeSignature>,
        /// Number of dimensions
        rank: u32,
    },
}

impl TypeSignature {
    /// Build the signature of a built-in type
    #[must_use]
    pub fn from_primitive(kind: CilPrimitiveKind) -> Self {
        match kind {
            CilPrimitiveKind::Void => TypeSignature::Void,
            CilPrimitiveKind::Boolean => TypeSignature::Boolean,
            CilPrimitiveKind::Char => TypeSignature::Char,
            CilPrimitiveKind::I1 => TypeSignature::I1,
            CilPrimitiveKind::U1 => TypeSignature::U1,
            CilPrimitiveKind::I2 => TypeSignature::I2,
            CilPrimitiveKind::U2 => TypeSignature::U2,
            CilPrimitiveKind::I4 => TypeSignature::I4,
            CilPrimitiveKind::U4 => TypeSignature::U4,
            CilPrimitiveKind::I8 => TypeSignature::I8,
            CilPrimitiveKind::U8 => TypeSignature::U8,
            CilPrimitiveKind::R4 => TypeSignature::R4,
            CilPrimitiveKind::R8 => TypeSignature::R8,
            CilPrimitiveKind::I => TypeSignature::I,
            CilPrimitiveKind::U => TypeSignature::U,
            CilPrimitiveKind::Object => TypeSignature::Object,
            CilPrimitiveKind::String => TypeSignature::String,
        }
    }

    /// Returns the built-in type this signature encodes, if any
    #[must_use]
    pub fn primitive_kind(&self) -> Option<CilPrimitiveKind> {
        match self {
            TypeSignature::Void => Some(CilPrimitiveKind::Void),
            TypeSignature::Boolean => Some(CilPrimitiveKind::Boolean),
            TypeSignature::Char => Some(CilPrimitiveKind::Char),
            TypeSignature::I1 => Some(CilPrimitiveKind::I1),
            TypeSignature::U1 => Some(CilPrimitiveKind::U1),
            TypeSignature::I2 => Some(CilPrimitiveKind::I2),
            TypeSignature::U2 => Some(CilPrimitiveKind::U2),
            TypeSignature::I4 => Some(CilPrimitiveKind::I4),
            TypeSignature::U4 => Some(CilPrimitiveKind::U4),
            TypeSignature::I8 => Some(CilPrimitiveKind::I8),
            TypeSignature::U8 => Some(CilPrimitiveKind::U8),
            TypeSignature::R4 => Some(CilPrimitiveKind::R4),
            TypeSignature::R8 => Some(CilPrimitiveKind::R8),
            TypeSignature::I => Some(CilPrimitiveKind::I),
            TypeSignature::U => Some(CilPrimitiveKind::U),
            TypeSignature::Object => Some(CilPrimitiveKind::Object),
            TypeSignature::String => Some(CilPrimitiveKind::String),
            _ => None,
        }
    }

    /// Canonical textual name of the type
    ///
    /// Built-in types render with their `System.*` name, definitions with their full name
    /// (`Outer/Inner` for nested types), generic instances as `Name`1<Arg>`, generic parameters
    /// by their declared name, and constructions with `*`, `&`, `[]` or `[,]` suffixes.
    #[must_use]
    pub fn full_name(&self) -> String {
        if let Some(kind) = self.primitive_kind() {
            return kind.fullname().to_string();
        }

        match self {
            TypeSignature::Type(reference) => reference
                .fullname()
                .unwrap_or_else(|| UNRESOLVED.to_string()),
            TypeSignature::GenericInst {
                definition,
                arguments,
            } => {
                let arguments: Vec<String> =
                    arguments.iter().map(TypeSignature::full_name).collect();
                format!(
                    "{}<{}>",
                    definition
                        .fullname()
                        .unwrap_or_else(|| UNRESOLVED.to_string()),
                    arguments.join(",")
                )
            }
            TypeSignature::GenericParam(param) => param.name.clone(),
            TypeSignature::Ptr(inner) => format!("{}*", inner.full_name()),
            TypeSignature::ByRef(inner) => format!("{}&", inner.full_name()),
            TypeSignature::SzArray(inner) => format!("{}[]", inner.full_name()),
            TypeSignature::Array { element, rank } => format!(
                "{}[{}]",
                element.full_name(),
                ",".repeat(rank.saturating_sub(1) as usize)
            ),
            _ => UNRESOLVED.to_string(),
        }
    }

    /// The definition this signature names or instantiates
    #[must_use]
    pub fn definition(&self) -> Option<CilTypeRc> {
        match self {
            TypeSignature::Type(reference)
            | TypeSignature::GenericInst {
                definition: reference,
                ..
            } => reference.upgrade(),
            _ => None,
        }
    }

    /// Returns true if this is a plain reference to exactly `ty` (identity, not by name)
    #[must_use]
    pub fn is_type(&self, ty: &CilTypeRc) -> bool {
        matches!(self, TypeSignature::Type(reference) if reference.points_to(ty))
    }

    /// The generic arguments of an instantiation; empty for every other signature
    #[must_use]
    pub fn generic_arguments(&self) -> &[TypeSignature] {
        match self {
            TypeSignature::GenericInst { arguments, .. } => arguments,
            _ => &[],
        }
    }
}
