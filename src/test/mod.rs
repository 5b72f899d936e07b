//! Shared factories for unit tests.
//!
//! The core and support libraries are built once and kept alive for the whole test run, so
//! references into them never dangle.

use std::sync::{Arc, OnceLock};

use crate::{
    metadata::{
        customattributes::{
            CustomAttribute, CustomAttributeArgument, CustomAttributeNamedArgument,
            CustomAttributeRc,
        },
        field::{Field, FieldRc},
        generics::{GenericParam, GenericParamOwner},
        method::{Method, MethodAccessFlags, MethodModifiers, MethodRc, Param},
        module::{ModuleDefRc, ModuleDefinition},
        signatures::{MethodReference, TypeSignature},
        token::{Token, TokenTable},
        typesystem::{CilFlavor, CilType, CilTypeRc, CilTypeRef, TypeAttributes},
    },
    rewrite::{AssemblyRewriteContext, ImportTable, RewriteConfig},
};

fn type_token(row: u32) -> Token {
    Token::from_parts(TokenTable::TYPE_DEF, row)
}

fn add_generic_params(ty: &CilTypeRc, names: &[&str]) {
    for (number, name) in names.iter().enumerate() {
        let number = number as u32;
        ty.generic_params.push(Arc::new(GenericParam::new(
            Token::from_parts(TokenTable::GENERIC_PARAM, ty.token.row() * 8 + number + 1),
            number,
            name,
            GenericParamOwner::Type(ty.token),
        )));
    }
}

// Helper function to create a class without a base type
pub fn create_class(row: u32, namespace: &str, name: &str) -> CilTypeRc {
    Arc::new(CilType::new(
        type_token(row),
        CilFlavor::Class,
        namespace,
        name,
        TypeAttributes::PUBLIC,
    ))
}

// Helper function to create a sealed struct deriving from System.ValueType
pub fn create_struct(row: u32, namespace: &str, name: &str) -> CilTypeRc {
    let ty = Arc::new(CilType::new(
        type_token(row),
        CilFlavor::ValueType,
        namespace,
        name,
        TypeAttributes::PUBLIC | TypeAttributes::SEQUENTIAL_LAYOUT | TypeAttributes::SEALED,
    ));
    if let Some(value_type) = corlib().get_by_fullname("System.ValueType") {
        ty.set_base(&value_type).unwrap();
    }
    ty
}

// Helper function to create an enum deriving from System.Enum
pub fn create_enum(row: u32, namespace: &str, name: &str) -> CilTypeRc {
    let ty = Arc::new(CilType::new(
        type_token(row),
        CilFlavor::ValueType,
        namespace,
        name,
        TypeAttributes::PUBLIC | TypeAttributes::SEALED,
    ));
    ty.set_base(&corlib().get_by_fullname("System.Enum").unwrap())
        .unwrap();
    ty
}

// Helper function to create an interface
pub fn create_interface(row: u32, namespace: &str, name: &str) -> CilTypeRc {
    Arc::new(CilType::new(
        type_token(row),
        CilFlavor::Interface,
        namespace,
        name,
        TypeAttributes::PUBLIC | TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT,
    ))
}

// Helper function to create a generic class, e.g. `List`1` with `&["T"]`
pub fn create_generic_class(row: u32, namespace: &str, name: &str, params: &[&str]) -> CilTypeRc {
    let ty = create_class(row, namespace, name);
    add_generic_params(&ty, params);
    ty
}

// Helper function to create a generic struct
pub fn create_generic_struct(row: u32, namespace: &str, name: &str, params: &[&str]) -> CilTypeRc {
    let ty = create_struct(row, namespace, name);
    add_generic_params(&ty, params);
    ty
}

fn method(
    row: u32,
    name: &str,
    modifiers: MethodModifiers,
    return_type: TypeSignature,
    params: Vec<TypeSignature>,
) -> MethodRc {
    let params = params
        .into_iter()
        .enumerate()
        .map(|(index, signature)| Param::new(&format!("arg{index}"), signature))
        .collect();

    Arc::new(Method::new(
        Token::from_parts(TokenTable::METHOD_DEF, row),
        name,
        MethodAccessFlags::PUBLIC,
        modifiers,
        return_type,
        params,
    ))
}

// Helper function to create a public instance method
pub fn create_method(
    row: u32,
    name: &str,
    return_type: TypeSignature,
    params: Vec<TypeSignature>,
) -> MethodRc {
    method(row, name, MethodModifiers::HIDE_BY_SIG, return_type, params)
}

// Helper function to create a public static method
pub fn create_static_method(
    row: u32,
    name: &str,
    return_type: TypeSignature,
    params: Vec<TypeSignature>,
) -> MethodRc {
    method(
        row,
        name,
        MethodModifiers::STATIC | MethodModifiers::HIDE_BY_SIG,
        return_type,
        params,
    )
}

// Helper function to create a field
pub fn create_field(row: u32, name: &str, flags: u32, signature: TypeSignature) -> FieldRc {
    Arc::new(Field::new(
        Token::from_parts(TokenTable::FIELD, row),
        name,
        flags,
        signature,
    ))
}

// Helper function to reference the constructor of an attribute type
pub fn create_attribute_ctor(attribute: &CilTypeRc, params: Vec<TypeSignature>) -> MethodReference {
    MethodReference {
        name: ".ctor".to_string(),
        declaring_type: TypeSignature::Type(CilTypeRef::new(attribute)),
        return_type: TypeSignature::Void,
        params,
        has_this: true,
    }
}

// Helper function to create a dumper `[Token(Token = ...)]` attribute
pub fn create_token_attribute(value: CustomAttributeArgument) -> CustomAttributeRc {
    static TOKEN_ATTRIBUTE: OnceLock<CilTypeRc> = OnceLock::new();
    let attribute_type =
        TOKEN_ATTRIBUTE.get_or_init(|| create_class(0x7000, "Il2CppDummyDll", "TokenAttribute"));

    let arg_type = match value {
        CustomAttributeArgument::String(_) => "System.String",
        _ => "System.UInt32",
    };

    let mut attribute = CustomAttribute::new(create_attribute_ctor(attribute_type, vec![]));
    attribute.named_args.push(CustomAttributeNamedArgument::field(
        "Token",
        arg_type.to_string(),
        value,
    ));
    Arc::new(attribute)
}

/// A minimal core library: `System.Object`, `System.ValueType`, `System.Enum` and the built-ins
pub fn corlib() -> ModuleDefRc {
    static CORLIB: OnceLock<ModuleDefRc> = OnceLock::new();
    CORLIB
        .get_or_init(|| {
            let module = Arc::new(ModuleDefinition::new("mscorlib.dll", "mscorlib"));

            let object = create_class(1, "System", "Object");
            let value_type = create_class(2, "System", "ValueType");
            value_type.set_base(&object).unwrap();
            let system_enum = Arc::new(CilType::new(
                type_token(3),
                CilFlavor::Class,
                "System",
                "Enum",
                TypeAttributes::PUBLIC | TypeAttributes::ABSTRACT,
            ));
            system_enum.set_base(&value_type).unwrap();
            let string = create_class(4, "System", "String");
            string.set_base(&object).unwrap();

            for ty in [object, value_type.clone(), system_enum, string] {
                module.insert(ty).unwrap();
            }

            let builtins = [
                "Void", "Boolean", "Char", "SByte", "Byte", "Int16", "UInt16", "Int32", "UInt32",
                "Int64", "UInt64", "Single", "Double", "IntPtr", "UIntPtr",
            ];
            for (index, name) in builtins.iter().enumerate() {
                let ty = Arc::new(CilType::new(
                    type_token(5 + index as u32),
                    CilFlavor::ValueType,
                    "System",
                    name,
                    TypeAttributes::PUBLIC
                        | TypeAttributes::SEQUENTIAL_LAYOUT
                        | TypeAttributes::SEALED,
                ));
                ty.set_base(&value_type).unwrap();
                module.insert(ty).unwrap();
            }

            module
        })
        .clone()
}

/// A runtime support library with the marker attributes and the class-pointer store
pub fn support_library() -> ModuleDefRc {
    static SUPPORT: OnceLock<ModuleDefRc> = OnceLock::new();
    SUPPORT
        .get_or_init(|| {
            let module = Arc::new(ModuleDefinition::new(
                "UnhollowerBaseLib.dll",
                "UnhollowerBaseLib",
            ));

            let obfuscated =
                create_class(1, "UnhollowerBaseLib.Attributes", "ObfuscatedNameAttribute");
            obfuscated.methods.push(create_method(
                1,
                ".ctor",
                TypeSignature::Void,
                vec![TypeSignature::String],
            ));

            let native =
                create_class(2, "UnhollowerBaseLib.Attributes", "NativeTypeTokenAttribute");
            native
                .methods
                .push(create_method(2, ".ctor", TypeSignature::Void, vec![]));

            let store = create_generic_class(
                3,
                "UnhollowerBaseLib",
                "Il2CppClassPointerStore`1",
                &["T"],
            );

            for ty in [obfuscated, native, store] {
                module.insert(ty).unwrap();
            }
            module
        })
        .clone()
}

// Helper function to create imports over the shared core and support libraries
pub fn import_table() -> ImportTable {
    ImportTable::new(corlib(), support_library())
}

// Helper function to create a stripped input module holding `types`
pub fn create_original_module(types: &[CilTypeRc]) -> ModuleDefRc {
    let module = Arc::new(ModuleDefinition::new("Assembly-CSharp.dll", "Assembly-CSharp"));
    for ty in types {
        module.insert(ty.clone()).unwrap();
    }
    module
}

// Helper function to create an assembly context rewriting `types` into an empty module
pub fn create_assembly(types: &[CilTypeRc], config: RewriteConfig) -> Arc<AssemblyRewriteContext> {
    AssemblyRewriteContext::new(
        create_original_module(types),
        Arc::new(ModuleDefinition::new("Assembly-CSharp.dll", "Assembly-CSharp")),
        Arc::new(import_table()),
        config,
    )
}
