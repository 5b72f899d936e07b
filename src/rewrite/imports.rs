//! References the rewrite injects into the output module.
//!
//! The marker attributes and the class-pointer storage type live in the runtime support
//! library; the built-in types live in the core library. [`Imports`] is the seam through which
//! the rewrite obtains them, [`ImportTable`] resolves them from two loaded modules.

use crate::{
    metadata::{
        method::MethodRc,
        module::ModuleDefRc,
        signatures::{MethodReference, TypeSignature},
        typesystem::{CilPrimitiveKind, CilTypeRc, CilTypeRef},
    },
    Error::ImportNotFound,
    Result,
};

/// Attribute recording the original name of a renamed type
pub const OBFUSCATED_NAME_ATTRIBUTE: &str = "ObfuscatedNameAttribute";
/// Attribute recording the runtime token and defining assembly of a type
pub const NATIVE_TYPE_TOKEN_ATTRIBUTE: &str = "NativeTypeTokenAttribute";
/// Generic holder type whose static field caches a class descriptor pointer per type
pub const CLASS_POINTER_STORE: &str = "Il2CppClassPointerStore`1";
/// Name of the static field on [`CLASS_POINTER_STORE`]
pub const CLASS_POINTER_FIELD: &str = "NativeClassPtr";

/// Resolves the external references the rewrite emits
///
/// Every reference is resolved on demand; a reference that cannot be resolved is reported as
/// [`crate::Error::ImportNotFound`].
pub trait Imports: Send + Sync {
    /// Constructor of the original-name marker, taking one string
    fn obfuscated_name_attribute_ctor(&self) -> Result<MethodReference>;

    /// Parameterless constructor of the native-token marker
    fn native_type_token_attribute_ctor(&self) -> Result<MethodReference>;

    /// `System.String`
    fn string_type(&self) -> Result<TypeSignature>;

    /// `System.UInt32`
    fn uint_type(&self) -> Result<TypeSignature>;

    /// `System.IntPtr`
    fn intptr_type(&self) -> Result<TypeSignature>;

    /// The open generic class-pointer storage type
    fn class_pointer_store(&self) -> Result<CilTypeRc>;

    /// A core library type by full name, e.g. `System.Int32`
    fn system_type(&self, fullname: &str) -> Result<TypeSignature>;
}

/// [`Imports`] backed by a loaded core library and a loaded support library
pub struct ImportTable {
    corlib: ModuleDefRc,
    support: ModuleDefRc,
}

impl ImportTable {
    /// Create a new import table
    ///
    /// ## Arguments
    /// * 'corlib'  - Module defining the `System.*` types
    /// * 'support' - Module defining the marker attributes and the class-pointer storage type
    pub fn new(corlib: ModuleDefRc, support: ModuleDefRc) -> Self {
        ImportTable { corlib, support }
    }

    fn support_type(&self, name: &str) -> Result<CilTypeRc> {
        self.support
            .types()
            .find(|ty| ty.name == name)
            .cloned()
            .ok_or_else(|| ImportNotFound(format!("{} in {}", name, self.support.name)))
    }

    fn attribute_ctor(&self, name: &str, arity: usize) -> Result<MethodReference> {
        let attribute = self.support_type(name)?;
        let ctor: MethodRc = attribute
            .methods
            .iter()
            .map(|(_, method)| method)
            .find(|method| method.is_constructor() && method.params.len() == arity)
            .cloned()
            .ok_or_else(|| ImportNotFound(format!("{}::.ctor/{}", name, arity)))?;

        Ok(MethodReference {
            name: ctor.name.clone(),
            declaring_type: TypeSignature::Type(CilTypeRef::new(&attribute)),
            return_type: ctor.return_type.clone(),
            params: ctor
                .params
                .iter()
                .map(|param| param.signature.clone())
                .collect(),
            has_this: true,
        })
    }

    fn builtin(&self, kind: CilPrimitiveKind) -> Result<TypeSignature> {
        self.system_type(kind.fullname())
    }
}

impl Imports for ImportTable {
    fn obfuscated_name_attribute_ctor(&self) -> Result<MethodReference> {
        self.attribute_ctor(OBFUSCATED_NAME_ATTRIBUTE, 1)
    }

    fn native_type_token_attribute_ctor(&self) -> Result<MethodReference> {
        self.attribute_ctor(NATIVE_TYPE_TOKEN_ATTRIBUTE, 0)
    }

    fn string_type(&self) -> Result<TypeSignature> {
        self.builtin(CilPrimitiveKind::String)
    }

    fn uint_type(&self) -> Result<TypeSignature> {
        self.builtin(CilPrimitiveKind::U4)
    }

    fn intptr_type(&self) -> Result<TypeSignature> {
        self.builtin(CilPrimitiveKind::I)
    }

    fn class_pointer_store(&self) -> Result<CilTypeRc> {
        let store = self.support_type(CLASS_POINTER_STORE)?;
        if store.generic_params.count() != 1 {
            return Err(malformed_error!(
                "{} must declare exactly one generic parameter",
                CLASS_POINTER_STORE
            ));
        }
        Ok(store)
    }

    fn system_type(&self, fullname: &str) -> Result<TypeSignature> {
        let definition = self
            .corlib
            .get_by_fullname(fullname)
            .ok_or_else(|| ImportNotFound(format!("{} in {}", fullname, self.corlib.name)))?;

        Ok(match CilPrimitiveKind::from_fullname(fullname) {
            Some(kind) => TypeSignature::from_primitive(kind),
            None => TypeSignature::Type(CilTypeRef::new(&definition)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::module::ModuleDefinition,
        test::{corlib, import_table, support_library},
        Error,
    };
    use std::sync::Arc;

    #[test]
    fn test_attribute_ctors() {
        let imports = import_table();

        let obfuscated = imports.obfuscated_name_attribute_ctor().unwrap();
        assert_eq!(obfuscated.name, ".ctor");
        assert_eq!(obfuscated.params.len(), 1);
        assert_eq!(obfuscated.params[0].full_name(), "System.String");

        let native = imports.native_type_token_attribute_ctor().unwrap();
        assert!(native.params.is_empty());
        assert!(native.full_name().ends_with("NativeTypeTokenAttribute::.ctor()"));
    }

    #[test]
    fn test_builtin_types() {
        let imports = import_table();
        assert_eq!(imports.string_type().unwrap().full_name(), "System.String");
        assert_eq!(imports.uint_type().unwrap().full_name(), "System.UInt32");
        assert_eq!(imports.intptr_type().unwrap().full_name(), "System.IntPtr");
        assert!(matches!(
            imports.system_type("System.Int32").unwrap(),
            TypeSignature::I4
        ));
        assert!(matches!(
            imports.system_type("System.ValueType").unwrap(),
            TypeSignature::Type(_)
        ));
    }

    #[test]
    fn test_class_pointer_store() {
        let store = import_table().class_pointer_store().unwrap();
        assert_eq!(store.name, CLASS_POINTER_STORE);
        assert!(store.has_generic_params());
    }

    #[test]
    fn test_missing_imports() {
        let empty = Arc::new(ModuleDefinition::new("Empty.dll", "Empty"));

        let imports = ImportTable::new(corlib(), empty.clone());
        assert!(matches!(
            imports.obfuscated_name_attribute_ctor(),
            Err(Error::ImportNotFound(_))
        ));
        assert!(matches!(
            imports.class_pointer_store(),
            Err(Error::ImportNotFound(_))
        ));

        let imports = ImportTable::new(empty, support_library());
        assert!(matches!(imports.intptr_type(), Err(Error::ImportNotFound(_))));
    }
}
