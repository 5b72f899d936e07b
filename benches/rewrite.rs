//! Benchmarks for a rewrite run.
//!
//! Builds a synthetic stripped module with many value types and classes, then measures
//! registration, member creation and deferred classification together.

extern crate reforge;

use criterion::{criterion_group, criterion_main, Criterion};
use reforge::{
    metadata::generics::{GenericParam, GenericParamOwner},
    prelude::*,
};
use std::{hint::black_box, sync::Arc};

const TYPES: u32 = 200;

fn builtin(module: &ModuleDefinition, row: u32, name: &str, base: &CilTypeRc) {
    let ty = Arc::new(CilType::new(
        Token::from_parts(TokenTable::TYPE_DEF, row),
        CilFlavor::ValueType,
        "System",
        name,
        TypeAttributes::PUBLIC | TypeAttributes::SEALED,
    ));
    ty.set_base(base).unwrap();
    module.insert(ty).unwrap();
}

fn imports() -> Arc<ImportTable> {
    let corlib = Arc::new(ModuleDefinition::new("mscorlib.dll", "mscorlib"));
    let value_type = Arc::new(CilType::new(
        Token::from_parts(TokenTable::TYPE_DEF, 1),
        CilFlavor::Class,
        "System",
        "ValueType",
        TypeAttributes::PUBLIC,
    ));
    corlib.insert(value_type.clone()).unwrap();
    corlib
        .insert(Arc::new(CilType::new(
            Token::from_parts(TokenTable::TYPE_DEF, 2),
            CilFlavor::Class,
            "System",
            "String",
            TypeAttributes::PUBLIC,
        )))
        .unwrap();
    for (row, name) in [(3, "UInt32"), (4, "IntPtr"), (5, "Int32")] {
        builtin(&corlib, row, name, &value_type);
    }

    let support = Arc::new(ModuleDefinition::new(
        "UnhollowerBaseLib.dll",
        "UnhollowerBaseLib",
    ));
    let ctor = |row: u32, params: Vec<Param>| {
        Arc::new(Method::new(
            Token::from_parts(TokenTable::METHOD_DEF, row),
            ".ctor",
            MethodAccessFlags::PUBLIC,
            MethodModifiers::HIDE_BY_SIG,
            TypeSignature::Void,
            params,
        ))
    };
    for (row, name) in [(1, "ObfuscatedNameAttribute"), (2, "NativeTypeTokenAttribute")] {
        let attribute = Arc::new(CilType::new(
            Token::from_parts(TokenTable::TYPE_DEF, row),
            CilFlavor::Class,
            "UnhollowerBaseLib.Attributes",
            name,
            TypeAttributes::PUBLIC,
        ));
        let params = if row == 1 {
            vec![Param::new("name", TypeSignature::String)]
        } else {
            vec![]
        };
        attribute.methods.push(ctor(row, params));
        support.insert(attribute).unwrap();
    }
    let store = Arc::new(CilType::new(
        Token::from_parts(TokenTable::TYPE_DEF, 3),
        CilFlavor::Class,
        "UnhollowerBaseLib",
        "Il2CppClassPointerStore`1",
        TypeAttributes::PUBLIC,
    ));
    store
        .generic_params
        .push(Arc::new(GenericParam::new(
            Token::from_parts(TokenTable::GENERIC_PARAM, 1),
            0,
            "T",
            GenericParamOwner::Type(store.token),
        )));
    support.insert(store).unwrap();

    Arc::new(ImportTable::new(corlib, support))
}

fn stripped_module(value_type: &CilTypeRc) -> ModuleDefRc {
    let module = Arc::new(ModuleDefinition::new(
        "Assembly-CSharp.dll",
        "Assembly-CSharp",
    ));

    let mut previous: Option<CilTypeRc> = None;
    for row in 1..=TYPES {
        let is_struct = row % 2 == 0;
        let ty = Arc::new(CilType::new(
            Token::from_parts(TokenTable::TYPE_DEF, row),
            if is_struct {
                CilFlavor::ValueType
            } else {
                CilFlavor::Class
            },
            "Game",
            &format!("Type{row}"),
            TypeAttributes::PUBLIC,
        ));
        if is_struct {
            ty.set_base(value_type).unwrap();
        }

        for index in 0..8 {
            let signature = match (&previous, index) {
                (Some(previous), 0) if is_struct => TypeSignature::Type(CilTypeRef::new(previous)),
                _ => TypeSignature::I4,
            };
            ty.fields.push(Arc::new(Field::new(
                Token::from_parts(TokenTable::FIELD, row * 16 + index),
                &format!("\u{0001}{index}"),
                FieldAttributes::PRIVATE,
                signature,
            )));
            ty.methods.push(Arc::new(Method::new(
                Token::from_parts(TokenTable::METHOD_DEF, row * 16 + index),
                "Invoke",
                MethodAccessFlags::PUBLIC,
                MethodModifiers::HIDE_BY_SIG,
                TypeSignature::Void,
                vec![Param::new("value", TypeSignature::I4)],
            )));
        }

        if is_struct {
            previous = Some(ty.clone());
        }
        module.insert(ty).unwrap();
    }
    module
}

/// Benchmark a complete run: registration, members and classification.
fn bench_full_run(c: &mut Criterion) {
    let imports = imports();
    let value_type = Arc::new(CilType::new(
        Token::from_parts(TokenTable::TYPE_DEF, 1),
        CilFlavor::Class,
        "System",
        "ValueType",
        TypeAttributes::PUBLIC,
    ));
    let original = stripped_module(&value_type);

    c.bench_function("rewrite_full_run_200_types", |b| {
        b.iter(|| {
            let assembly = AssemblyRewriteContext::new(
                original.clone(),
                Arc::new(ModuleDefinition::new("Out.dll", "Out")),
                imports.clone(),
                RewriteConfig::default(),
            );
            for ty in original.types() {
                let new_type = assembly.create_new_type(ty, &ty.name).unwrap();
                assembly
                    .create_type_context(ty, new_type, TypeRewriteSemantic::for_stripped(ty))
                    .unwrap();
            }
            assembly.close_registration();
            assembly.add_all_members().unwrap();
            assembly.resolve_type_specifics().unwrap();
            black_box(assembly)
        });
    });
}

criterion_group!(benches, bench_full_run);
criterion_main!(benches);
