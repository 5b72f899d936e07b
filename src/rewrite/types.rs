//! The per-type rewrite record.
//!
//! A [`TypeRewriteContext`] binds one type of the stripped input to the type built for it in
//! the output module. Construction stamps the identity-preserving markers onto the new type
//! and classifies it; [`TypeRewriteContext::add_members`] later creates one context per
//! member and the references the runtime bridge needs to find the type's class descriptor.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, OnceLock, RwLock, Weak,
    },
};

use dashmap::DashMap;
use strum::{Display, EnumCount, EnumIter};

use crate::{
    metadata::{
        customattributes::{CustomAttribute, CustomAttributeArgument, CustomAttributeNamedArgument},
        field::FieldRc,
        method::MethodRc,
        signatures::{FieldReference, TypeSignature},
        token::Token,
        typesystem::{CilType, CilTypeRc, CilTypeRef},
    },
    rewrite::{
        assembly::AssemblyRewriteContext,
        classify::{classify, TypeSpecifics},
        field::{FieldRewriteContext, FieldRewriteContextRc},
        identity::{extract_token, TOKEN_ARGUMENT},
        imports::CLASS_POINTER_FIELD,
        method::{MethodRewriteContext, MethodRewriteContextRc},
    },
    Error::{FieldNotFound, MembersAlreadyAdded, MethodNotFound, MissingArgument},
    Result,
};

/// A reference-counted pointer to a `TypeRewriteContext`
pub type TypeRewriteContextRc = Arc<TypeRewriteContext>;

/// Named argument of the native-token marker holding the defining assembly
pub const ASSEMBLY_NAME_ARGUMENT: &str = "AssemblyName";

/// How a type is bridged to the native runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum TypeRewriteSemantic {
    /// A regular stripped type, fully rewritten
    Default,
    /// A stripped interface
    Interface,
    /// Mapped onto an interface of the managed core library
    UseSystemInterface,
    /// Mapped onto a value type of the managed core library
    UseSystemValueType,
    /// Carried over unchanged; no identity bookkeeping
    Unstripped,
}

impl TypeRewriteSemantic {
    /// The semantic of a stripped type that is rewritten in place
    pub fn for_stripped(original: &CilType) -> Self {
        if original.is_interface() {
            TypeRewriteSemantic::Interface
        } else {
            TypeRewriteSemantic::Default
        }
    }

    /// Returns true if the rewritten type carries the native-token marker
    pub fn has_native_token(&self) -> bool {
        matches!(
            self,
            TypeRewriteSemantic::Default | TypeRewriteSemantic::Interface
        )
    }
}

/// Binds one original type to the type emitted for it
pub struct TypeRewriteContext {
    assembly: Weak<AssemblyRewriteContext>,
    original_type: CilTypeRc,
    new_type: CilTypeRc,
    semantic: TypeRewriteSemantic,
    runtime_token: Option<Token>,
    name_was_obfuscated: bool,
    specifics: RwLock<TypeSpecifics>,
    self_substituted_ref: OnceLock<TypeSignature>,
    class_pointer_field_ref: OnceLock<FieldReference>,
    members_added: AtomicBool,
    fields: boxcar::Vec<FieldRewriteContextRc>,
    methods: boxcar::Vec<MethodRewriteContextRc>,
    fields_by_original: DashMap<Token, FieldRewriteContextRc>,
    methods_by_original: DashMap<Token, MethodRewriteContextRc>,
    methods_by_name: DashMap<String, MethodRewriteContextRc>,
}

impl TypeRewriteContext {
    /// Create the context and stamp identity markers onto `new_type`
    ///
    /// ## Arguments
    /// * 'assembly'      - The owning assembly context
    /// * 'original_type' - The type as declared in the stripped input
    /// * 'new_type'      - The freshly created, still empty, output type
    /// * 'semantic'      - How the type is bridged
    ///
    /// # Errors
    /// Returns [`crate::Error::MissingArgument`] if the assembly context is gone or `new_type`
    /// already has members, [`crate::Error::Malformed`] for an unparsable token attribute, and
    /// [`crate::Error::ImportNotFound`] if a marker attribute cannot be resolved.
    pub fn new(
        assembly: Weak<AssemblyRewriteContext>,
        original_type: CilTypeRc,
        new_type: CilTypeRc,
        semantic: TypeRewriteSemantic,
    ) -> Result<Self> {
        let owner = assembly.upgrade().ok_or(MissingArgument("assembly"))?;
        if !new_type.is_empty() {
            return Err(MissingArgument("new_type"));
        }

        let imports = owner.imports();
        let mut runtime_token = None;
        let mut name_was_obfuscated = false;

        if semantic != TypeRewriteSemantic::Unstripped {
            runtime_token = Some(extract_token(
                &original_type.custom_attributes,
                original_type.token,
            )?);

            name_was_obfuscated = original_type.name != new_type.name;
            if name_was_obfuscated {
                let mut marker = CustomAttribute::new(imports.obfuscated_name_attribute_ctor()?);
                marker
                    .fixed_args
                    .push(CustomAttributeArgument::String(original_type.fullname()));
                new_type.custom_attributes.push(Arc::new(marker));
            }
        }

        if let Some(token) = runtime_token.filter(|_| semantic.has_native_token()) {
            let mut marker = CustomAttribute::new(imports.native_type_token_attribute_ctor()?);
            marker.named_args.push(CustomAttributeNamedArgument::field(
                ASSEMBLY_NAME_ARGUMENT,
                imports.string_type()?.full_name(),
                CustomAttributeArgument::String(owner.original_module().assembly_name.clone()),
            ));
            marker.named_args.push(CustomAttributeNamedArgument::field(
                TOKEN_ARGUMENT,
                imports.uint_type()?.full_name(),
                CustomAttributeArgument::U4(token.value()),
            ));
            new_type.custom_attributes.push(Arc::new(marker));
        }

        let specifics = classify(&original_type);

        tracing::debug!(
            "type context {} -> {} ({}, {})",
            original_type.fullname(),
            new_type.fullname(),
            semantic,
            specifics
        );

        Ok(TypeRewriteContext {
            assembly,
            original_type,
            new_type,
            semantic,
            runtime_token,
            name_was_obfuscated,
            specifics: RwLock::new(specifics),
            self_substituted_ref: OnceLock::new(),
            class_pointer_field_ref: OnceLock::new(),
            members_added: AtomicBool::new(false),
            fields: boxcar::Vec::new(),
            methods: boxcar::Vec::new(),
            fields_by_original: DashMap::new(),
            methods_by_original: DashMap::new(),
            methods_by_name: DashMap::new(),
        })
    }

    /// Create member contexts and the self and class-pointer references
    ///
    /// Static constructors and the `.ctor(System.IntPtr)` wrapper of the original are skipped.
    /// Only `Default` types get the self reference, the class-pointer reference and field
    /// contexts; enums stop before fields, which a later pass fills in.
    ///
    /// # Errors
    /// Returns [`crate::Error::MembersAlreadyAdded`] on a second call,
    /// [`crate::Error::InvalidPhase`] while type registration is still open, and
    /// [`crate::Error::MissingArgument`] if the assembly context is gone.
    pub fn add_members(&self) -> Result<()> {
        let assembly = self.assembly.upgrade().ok_or(MissingArgument("assembly"))?;
        assembly.ensure_registration_closed()?;

        if self.members_added.swap(true, Ordering::AcqRel) {
            return Err(MembersAlreadyAdded(self.original_type.token));
        }

        let mut renamed_method_counts = HashMap::new();
        for (index, (_, method)) in self.original_type.methods.iter().enumerate() {
            if method.is_static_constructor() || method.is_native_handle_constructor() {
                continue;
            }

            let context = Arc::new(MethodRewriteContext::new(
                self,
                &assembly,
                method,
                index,
                &mut renamed_method_counts,
            )?);
            self.methods_by_original.insert(method.token, context.clone());
            self.methods_by_name.insert(method.name.clone(), context.clone());
            self.methods.push(context);
        }

        if self.semantic != TypeRewriteSemantic::Default {
            tracing::debug!(
                "{}: {} methods",
                self.new_type.fullname(),
                self.methods.count()
            );
            return Ok(());
        }

        let imports = assembly.imports();
        let self_ref = if self.new_type.has_generic_params() {
            TypeSignature::GenericInst {
                definition: CilTypeRef::new(&self.new_type),
                arguments: self
                    .new_type
                    .generic_params
                    .iter()
                    .map(|(_, param)| TypeSignature::GenericParam(param.clone()))
                    .collect(),
            }
        } else {
            TypeSignature::Type(CilTypeRef::new(&self.new_type))
        };

        let store_argument = if !self.new_type.has_generic_params()
            && (self.original_type.is_primitive() || self.original_type.is_string())
        {
            imports.system_type(&self.original_type.fullname())?
        } else {
            self_ref.clone()
        };

        let store = imports.class_pointer_store()?;
        let class_pointer = FieldReference {
            name: CLASS_POINTER_FIELD.to_string(),
            field_type: imports.intptr_type()?,
            declaring_type: TypeSignature::GenericInst {
                definition: CilTypeRef::new(&store),
                arguments: vec![store_argument],
            },
        };

        // members_added guards both cells
        let _ = self.self_substituted_ref.set(self_ref);
        let _ = self.class_pointer_field_ref.set(class_pointer);

        if self.original_type.is_enum() {
            tracing::debug!("{}: enum, fields deferred", self.new_type.fullname());
            return Ok(());
        }

        let mut renamed_field_counts = HashMap::new();
        for (_, field) in self.original_type.fields.iter() {
            let context = Arc::new(FieldRewriteContext::new(
                self,
                &assembly,
                field,
                &mut renamed_field_counts,
            )?);
            self.fields_by_original.insert(field.token, context.clone());
            self.fields.push(context);
        }

        tracing::debug!(
            "{}: {} methods, {} fields",
            self.new_type.fullname(),
            self.methods.count(),
            self.fields.count()
        );
        Ok(())
    }

    /// The field context created for exactly `field`
    ///
    /// # Errors
    /// Returns [`crate::Error::FieldNotFound`] if `field` is not a field of the original type.
    pub fn get_field_by_original(&self, field: &FieldRc) -> Result<FieldRewriteContextRc> {
        self.fields_by_original
            .get(&field.token)
            .filter(|context| Arc::ptr_eq(context.original_field(), field))
            .map(|context| context.value().clone())
            .ok_or(FieldNotFound(field.token))
    }

    /// The method context created for exactly `method`
    ///
    /// # Errors
    /// Returns [`crate::Error::MethodNotFound`] if `method` has no context on this type.
    pub fn get_method_by_original(&self, method: &MethodRc) -> Result<MethodRewriteContextRc> {
        self.try_get_method_by_original(method)
            .ok_or(MethodNotFound(method.token))
    }

    /// The method context created for exactly `method`, if any
    pub fn try_get_method_by_original(&self, method: &MethodRc) -> Option<MethodRewriteContextRc> {
        self.methods_by_original
            .get(&method.token)
            .filter(|context| Arc::ptr_eq(context.original_method(), method))
            .map(|context| context.value().clone())
    }

    /// The most recently created method context whose original method is named `name`
    pub fn try_get_method_by_name(&self, name: &str) -> Option<MethodRewriteContextRc> {
        self.methods_by_name
            .get(name)
            .map(|context| context.value().clone())
    }

    /// Correlate a method of another module by name and parameter types
    ///
    /// Returns the first method context in declaration order whose original method has the
    /// same name and the same full type name at every parameter position.
    pub fn try_get_method_by_external_signature(
        &self,
        method: &MethodRc,
    ) -> Option<MethodRewriteContextRc> {
        let wanted = method.param_type_names();
        let mut candidates = self.methods.iter().map(|(_, context)| context).filter(|context| {
            let original = context.original_method();
            original.name == method.name
                && original.params.len() == wanted.len()
                && original
                    .params
                    .iter()
                    .zip(&wanted)
                    .all(|(param, name)| param.signature.full_name() == *name)
        });

        let found = candidates.next().cloned();
        if found.is_some() && candidates.next().is_some() {
            tracing::warn!(
                "{}: several methods match {}({}), using the first",
                self.original_type.fullname(),
                method.name,
                wanted.join(",")
            );
        }
        found
    }

    /// Correlate a field of another module by name and field type
    pub fn try_get_field_by_external_signature(
        &self,
        field: &FieldRc,
    ) -> Option<FieldRewriteContextRc> {
        let wanted = field.signature.full_name();
        self.fields
            .iter()
            .map(|(_, context)| context)
            .find(|context| {
                let original = context.original_field();
                original.name == field.name && original.signature.full_name() == wanted
            })
            .cloned()
    }

    /// Method contexts in declaration order
    pub fn methods(&self) -> impl Iterator<Item = &MethodRewriteContextRc> {
        self.methods.iter().map(|(_, context)| context)
    }

    /// Field contexts in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &FieldRewriteContextRc> {
        self.fields.iter().map(|(_, context)| context)
    }

    /// The type as declared in the stripped input
    pub fn original_type(&self) -> &CilTypeRc {
        &self.original_type
    }

    /// The type being built in the output module
    pub fn new_type(&self) -> &CilTypeRc {
        &self.new_type
    }

    /// How the type is bridged
    pub fn semantic(&self) -> TypeRewriteSemantic {
        self.semantic
    }

    /// Runtime token of the original type; `None` for unstripped types
    pub fn runtime_token(&self) -> Option<Token> {
        self.runtime_token
    }

    /// Returns true if the new type was given a different simple name
    pub fn name_was_obfuscated(&self) -> bool {
        self.name_was_obfuscated
    }

    /// Current classification
    ///
    /// # Errors
    /// Returns [`crate::Error::LockError`] if the classification lock is poisoned.
    pub fn type_specifics(&self) -> Result<TypeSpecifics> {
        Ok(*read_lock!(self.specifics))
    }

    pub(crate) fn set_type_specifics(&self, specifics: TypeSpecifics) -> Result<()> {
        *write_lock!(self.specifics) = specifics;
        Ok(())
    }

    /// The new type applied to its own generic parameters; set by `add_members`
    pub fn self_substituted_ref(&self) -> Option<&TypeSignature> {
        self.self_substituted_ref.get()
    }

    /// `NativeClassPtr` on the storage type instantiated for this type; set by `add_members`
    pub fn class_pointer_field_ref(&self) -> Option<&FieldReference> {
        self.class_pointer_field_ref.get()
    }

    /// Returns true once `add_members` ran
    pub fn members_added(&self) -> bool {
        self.members_added.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for TypeRewriteContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRewriteContext")
            .field("original_type", &self.original_type.fullname())
            .field("new_type", &self.new_type.fullname())
            .field("semantic", &self.semantic)
            .field("runtime_token", &self.runtime_token)
            .finish_non_exhaustive()
    }
}
