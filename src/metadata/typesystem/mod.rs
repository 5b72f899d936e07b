//! Type representation shared by the original (stripped) and the rewritten module graphs.
//!
//! A [`CilType`] is one type definition: its identity (token, namespace, name), its category
//! ([`CilFlavor`]), its attribute flags and everything declared on it. The same structure is used
//! for the immutable types of the input module and for the types being built in the output
//! module; the latter gain members through the append-only collections, so a shared
//! [`CilTypeRc`] never needs `&mut` access.
//!
//! # Key Components
//!
//! - [`CilType`]: A type definition with its members and custom attributes
//! - [`CilTypeRef`]: Weak reference used by signatures to avoid reference cycles
//! - [`CilFlavor`]: Class / value type / interface classification
//! - [`CilPrimitiveKind`]: The runtime's built-in types
//! - [`TypeAttributes`]: ECMA-335 type attribute flags
//!
//! # Examples
//!
//! ```rust
//! use reforge::metadata::{token::Token, typesystem::{CilFlavor, CilType, TypeAttributes}};
//! use std::sync::Arc;
//!
//! let vector = Arc::new(CilType::new(
//!     Token::new(0x0200_0010),
//!     CilFlavor::ValueType,
//!     "UnityEngine",
//!     "Vector3",
//!     TypeAttributes::PUBLIC | TypeAttributes::SEQUENTIAL_LAYOUT,
//! ));
//! assert_eq!(vector.fullname(), "UnityEngine.Vector3");
//! assert!(vector.is_value_type());
//! ```

mod base;
mod primitives;

use std::sync::{Arc, OnceLock};

pub use base::{CilFlavor, CilTypeRef, CilTypeRefList, TypeAttributes};
pub use primitives::{
    is_primitive_fullname, CilPrimitiveKind, SYSTEM_ENUM, SYSTEM_INTPTR, SYSTEM_OBJECT,
    SYSTEM_STRING, SYSTEM_VALUE_TYPE,
};

use crate::{
    metadata::{
        customattributes::{CustomAttributeList, CustomAttributeRc},
        field::FieldList,
        generics::GenericParamList,
        method::MethodList,
        token::Token,
    },
    Result,
};

/// A vector that holds a list of `CilType`
pub type CilTypeList = Arc<boxcar::Vec<CilTypeRc>>;
/// Reference to a `CilType`
pub type CilTypeRc = Arc<CilType>;

/// Represents a type definition, combining the information of the `TypeDef` row with its
/// fields, methods, generic parameters and custom attributes.
pub struct CilType {
    /// Token
    pub token: Token,
    /// The `TypeFlavor`
    pub flavor: CilFlavor,
    /// `TypeNamespace` (empty for nested types and the `<Module>` type)
    pub namespace: String,
    /// `TypeName`
    pub name: String,
    /// Flags (a 4-byte bitmask of type `TypeAttributes`, §II.23.1.15)
    pub flags: u32,
    /// This types base aka 'extends'
    base: OnceLock<CilTypeRef>,
    /// The enclosing type, for nested types
    declaring_type: OnceLock<CilTypeRef>,
    /// All fields this type has
    pub fields: FieldList,
    /// All methods this type has
    pub methods: MethodList,
    /// All generic parameters this type has
    pub generic_params: GenericParamList,
    /// All custom attributes this type has
    pub custom_attributes: CustomAttributeList,
    /// All types that are 'contained' in this type
    pub nested_types: CilTypeRefList,
}

impl CilType {
    /// Create a new instance of a `CilType` without members
    ///
    /// ## Arguments
    /// * 'token'     - The metadata token of the type
    /// * 'flavor'    - Class, value type or interface
    /// * 'namespace' - The namespace (may be empty)
    /// * 'name'      - The simple name
    /// * 'flags'     - `TypeAttributes` bitmask
    pub fn new(token: Token, flavor: CilFlavor, namespace: &str, name: &str, flags: u32) -> Self {
        CilType {
            token,
            flavor,
            namespace: namespace.to_string(),
            name: name.to_string(),
            flags,
            base: OnceLock::new(),
            declaring_type: OnceLock::new(),
            fields: Arc::new(boxcar::Vec::new()),
            methods: Arc::new(boxcar::Vec::new()),
            generic_params: Arc::new(boxcar::Vec::new()),
            custom_attributes: Arc::new(boxcar::Vec::new()),
            nested_types: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Set the base type; can only be done once
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the base type was already set.
    pub fn set_base(&self, base: &CilTypeRc) -> Result<()> {
        self.base
            .set(CilTypeRef::new(base))
            .map_err(|_| malformed_error!("Base type of {} is already set", self.fullname()))
    }

    /// Access the base type of this type, if it exists
    pub fn base(&self) -> Option<CilTypeRc> {
        self.base.get().and_then(CilTypeRef::upgrade)
    }

    /// Nest this type inside `declaring`; can only be done once
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaring type was already set.
    pub fn set_declaring_type(self: &Arc<Self>, declaring: &CilTypeRc) -> Result<()> {
        self.declaring_type
            .set(CilTypeRef::new(declaring))
            .map_err(|_| malformed_error!("Declaring type of {} is already set", self.name))?;
        declaring.nested_types.push(CilTypeRef::new(self));
        Ok(())
    }

    /// Access the enclosing type of a nested type
    pub fn declaring_type(&self) -> Option<CilTypeRc> {
        self.declaring_type.get().and_then(CilTypeRef::upgrade)
    }

    /// Returns the full name of the type
    ///
    /// `Namespace.Name` for top-level types, `Outer/Inner` for nested types and just the name
    /// for types in the global namespace.
    pub fn fullname(&self) -> String {
        if let Some(declaring) = self.declaring_type() {
            return format!("{}/{}", declaring.fullname(), self.name);
        }

        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{0}.{1}", self.namespace, self.name)
        }
    }

    /// Returns true if the base type is `System.Enum`
    pub fn is_enum(&self) -> bool {
        self.base().is_some_and(|base| base.fullname() == SYSTEM_ENUM)
    }

    /// Returns true for value types, including enums
    ///
    /// `System.Enum` itself derives from `System.ValueType` but is a reference type.
    pub fn is_value_type(&self) -> bool {
        if self.flavor == CilFlavor::ValueType {
            return true;
        }

        match self.base() {
            Some(base) => match base.fullname().as_str() {
                SYSTEM_ENUM => true,
                SYSTEM_VALUE_TYPE => self.fullname() != SYSTEM_ENUM,
                _ => false,
            },
            None => false,
        }
    }

    /// Returns true for the runtime primitives (`System.Int32`, `System.Boolean`, ...)
    pub fn is_primitive(&self) -> bool {
        is_primitive_fullname(&self.fullname())
    }

    /// Returns true if this is `System.String`
    pub fn is_string(&self) -> bool {
        self.fullname() == SYSTEM_STRING
    }

    /// Returns true for interfaces
    pub fn is_interface(&self) -> bool {
        self.flavor == CilFlavor::Interface || self.flags & TypeAttributes::INTERFACE != 0
    }

    /// Returns true if the type declares generic parameters
    pub fn has_generic_params(&self) -> bool {
        self.generic_params.count() > 0
    }

    /// Returns true if no fields, methods or nested types were added yet
    pub fn is_empty(&self) -> bool {
        self.fields.count() == 0 && self.methods.count() == 0 && self.nested_types.count() == 0
    }

    /// Find the first custom attribute whose attribute type has the simple name `name`
    ///
    /// ## Arguments
    /// * 'name' - Simple name of the attribute type, e.g. `TokenAttribute`
    pub fn find_attribute(&self, name: &str) -> Option<CustomAttributeRc> {
        self.custom_attributes
            .iter()
            .map(|(_, attribute)| attribute)
            .find(|attribute| attribute.type_name() == name)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{create_class, create_enum, create_struct};

    #[test]
    fn test_fullname() {
        let outer = create_class(1, "Game", "Player");
        assert_eq!(outer.fullname(), "Game.Player");

        let inner = create_class(2, "", "Inventory");
        inner.set_declaring_type(&outer).unwrap();
        assert_eq!(inner.fullname(), "Game.Player/Inventory");
        assert_eq!(outer.nested_types.count(), 1);

        let global = create_class(3, "", "<Module>");
        assert_eq!(global.fullname(), "<Module>");
    }

    #[test]
    fn test_base_set_once() {
        let base = create_class(1, "System", "Object");
        let derived = create_class(2, "Game", "Player");

        assert!(derived.base().is_none());
        derived.set_base(&base).unwrap();
        assert_eq!(derived.base().unwrap().fullname(), "System.Object");
        assert!(derived.set_base(&base).is_err());
    }

    #[test]
    fn test_value_type_and_enum_detection() {
        let class = create_class(1, "Game", "Player");
        assert!(!class.is_value_type());
        assert!(!class.is_enum());

        let structure = create_struct(2, "Game", "Stats");
        assert!(structure.is_value_type());
        assert!(!structure.is_enum());

        let enumeration = create_enum(3, "Game", "State");
        assert!(enumeration.is_value_type());
        assert!(enumeration.is_enum());
    }

    #[test]
    fn test_system_enum_is_not_a_value_type() {
        let value_type = create_class(1, "System", "ValueType");
        let system_enum = create_class(2, "System", "Enum");
        system_enum.set_base(&value_type).unwrap();

        assert!(!system_enum.is_value_type());
    }

    #[test]
    fn test_primitive_and_string() {
        let int = create_struct(1, "System", "Int32");
        assert!(int.is_primitive());
        assert!(!int.is_string());

        let string = create_class(2, "System", "String");
        assert!(!string.is_primitive());
        assert!(string.is_string());
    }
}
