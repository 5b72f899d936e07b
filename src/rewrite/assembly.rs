//! The per-module rewrite record that owns all type contexts.
//!
//! Rewriting a module happens in two phases. While registration is open, one
//! [`TypeRewriteContext`] is created per original type; each registers its new type in the
//! output module. After [`AssemblyRewriteContext::close_registration`], members are added and
//! deferred classifications resolved, both of which may look up any sibling context.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::{
    metadata::{
        generics::{GenericParam, GenericParamOwner},
        module::ModuleDefRc,
        token::{Token, TokenTable},
        typesystem::{CilType, CilTypeRc},
    },
    rewrite::{
        classify,
        config::RewriteConfig,
        imports::Imports,
        types::{TypeRewriteContext, TypeRewriteContextRc, TypeRewriteSemantic},
    },
    Error::{DuplicateType, InvalidPhase, TypeNotFound},
    Result,
};

/// Owns the type contexts of one module and the collaborators they share
pub struct AssemblyRewriteContext {
    original_module: ModuleDefRc,
    new_module: ModuleDefRc,
    imports: Arc<dyn Imports>,
    config: RewriteConfig,
    registration_open: AtomicBool,
    contexts: boxcar::Vec<TypeRewriteContextRc>,
    by_original: SkipMap<Token, TypeRewriteContextRc>,
    by_new: SkipMap<Token, TypeRewriteContextRc>,
    by_original_name: DashMap<String, TypeRewriteContextRc>,
}

impl AssemblyRewriteContext {
    /// Create the context for rewriting `original_module` into `new_module`
    ///
    /// ## Arguments
    /// * 'original_module' - The stripped input module
    /// * 'new_module'      - The output module receiving the rewritten types
    /// * 'imports'         - Resolver for injected references
    /// * 'config'          - Naming and emission options
    pub fn new(
        original_module: ModuleDefRc,
        new_module: ModuleDefRc,
        imports: Arc<dyn Imports>,
        config: RewriteConfig,
    ) -> Arc<Self> {
        Arc::new(AssemblyRewriteContext {
            original_module,
            new_module,
            imports,
            config,
            registration_open: AtomicBool::new(true),
            contexts: boxcar::Vec::new(),
            by_original: SkipMap::new(),
            by_new: SkipMap::new(),
            by_original_name: DashMap::new(),
        })
    }

    /// Create an empty output type for `original` under `name`
    ///
    /// The new type gets a fresh token of the output module, the original's flavor, namespace
    /// and flags, and one generic parameter per generic parameter of the original.
    ///
    /// # Errors
    /// Returns [`crate::Error::LockError`] if the token allocator lock is poisoned.
    pub fn create_new_type(&self, original: &CilType, name: &str) -> Result<CilTypeRc> {
        let token = self.new_module.allocate_type_token()?;
        let new_type = Arc::new(CilType::new(
            token,
            original.flavor,
            &original.namespace,
            name,
            original.flags,
        ));

        for (_, param) in original.generic_params.iter() {
            new_type.generic_params.push(Arc::new(GenericParam::new(
                self.new_module.allocate_token(TokenTable::GENERIC_PARAM)?,
                param.number,
                &param.name,
                GenericParamOwner::Type(token),
            )));
        }

        Ok(new_type)
    }

    /// Create and register the context for `original`
    ///
    /// `new_type` is registered in the output module.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidPhase`] after registration was closed,
    /// [`crate::Error::TypeNotFound`] if `original` is not a type of the input module,
    /// [`crate::Error::DuplicateType`] if `original` already has a context or the token of
    /// `new_type` is taken, and any error of [`TypeRewriteContext::new`].
    pub fn create_type_context(
        self: &Arc<Self>,
        original: &CilTypeRc,
        new_type: CilTypeRc,
        semantic: TypeRewriteSemantic,
    ) -> Result<TypeRewriteContextRc> {
        if !self.registration_open.load(Ordering::Acquire) {
            return Err(InvalidPhase(format!(
                "type registration is closed, cannot add {}",
                original.fullname()
            )));
        }

        match self.original_module.get(&original.token) {
            Some(registered) if Arc::ptr_eq(&registered, original) => {}
            _ => return Err(TypeNotFound(original.token)),
        }

        if self.by_original.contains_key(&original.token) {
            return Err(DuplicateType(original.token));
        }
        if self.new_module.get(&new_type.token).is_some() {
            return Err(DuplicateType(new_type.token));
        }

        let context = Arc::new(TypeRewriteContext::new(
            Arc::downgrade(self),
            original.clone(),
            new_type.clone(),
            semantic,
        )?);
        self.new_module.insert(new_type.clone())?;

        self.by_original.insert(original.token, context.clone());
        self.by_new.insert(new_type.token, context.clone());
        self.by_original_name.insert(original.fullname(), context.clone());
        self.contexts.push(context.clone());
        Ok(context)
    }

    /// End the registration phase; no further contexts can be created
    pub fn close_registration(&self) {
        if self.registration_open.swap(false, Ordering::AcqRel) {
            tracing::debug!(
                "{}: registration closed with {} types",
                self.original_module.name,
                self.contexts.count()
            );
        }
    }

    /// Returns true while contexts can still be created
    pub fn is_registration_open(&self) -> bool {
        self.registration_open.load(Ordering::Acquire)
    }

    pub(crate) fn ensure_registration_closed(&self) -> Result<()> {
        if self.is_registration_open() {
            return Err(InvalidPhase(
                "members can only be added after type registration is closed".to_string(),
            ));
        }
        Ok(())
    }

    /// Run `add_members` on every context in registration order
    ///
    /// # Errors
    /// Returns the first error of [`TypeRewriteContext::add_members`].
    pub fn add_all_members(&self) -> Result<()> {
        self.ensure_registration_closed()?;
        for (_, context) in self.contexts.iter() {
            context.add_members()?;
        }
        Ok(())
    }

    /// Finish the classification of every context left `NotComputed`
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidPhase`] while registration is open.
    pub fn resolve_type_specifics(&self) -> Result<()> {
        self.ensure_registration_closed()?;
        for (_, context) in self.contexts.iter() {
            classify::resolve(context, self)?;
        }
        Ok(())
    }

    /// The context of exactly `original`
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if `original` has no context.
    pub fn get_context_for_original_type(
        &self,
        original: &CilTypeRc,
    ) -> Result<TypeRewriteContextRc> {
        self.try_get_context_for_original_type(original)
            .ok_or(TypeNotFound(original.token))
    }

    /// The context of exactly `original`, if any
    pub fn try_get_context_for_original_type(
        &self,
        original: &CilTypeRc,
    ) -> Option<TypeRewriteContextRc> {
        self.by_original
            .get(&original.token)
            .map(|entry| entry.value().clone())
            .filter(|context| Arc::ptr_eq(context.original_type(), original))
    }

    /// The context that emitted `new_type`
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if `new_type` was not emitted by this context.
    pub fn get_context_for_new_type(&self, new_type: &CilTypeRc) -> Result<TypeRewriteContextRc> {
        self.by_new
            .get(&new_type.token)
            .map(|entry| entry.value().clone())
            .filter(|context| Arc::ptr_eq(context.new_type(), new_type))
            .ok_or(TypeNotFound(new_type.token))
    }

    /// The context of the original type with full name `fullname`
    pub fn try_get_context_by_original_name(&self, fullname: &str) -> Option<TypeRewriteContextRc> {
        self.by_original_name
            .get(fullname)
            .map(|entry| entry.value().clone())
    }

    /// All contexts in registration order
    pub fn types(&self) -> impl Iterator<Item = &TypeRewriteContextRc> {
        self.contexts.iter().map(|(_, context)| context)
    }

    /// The stripped input module
    pub fn original_module(&self) -> &ModuleDefRc {
        &self.original_module
    }

    /// The output module
    pub fn new_module(&self) -> &ModuleDefRc {
        &self.new_module
    }

    /// Resolver for injected references
    pub fn imports(&self) -> &dyn Imports {
        self.imports.as_ref()
    }

    /// Naming and emission options
    pub fn config(&self) -> RewriteConfig {
        self.config
    }
}

impl std::fmt::Debug for AssemblyRewriteContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssemblyRewriteContext")
            .field("original_module", &self.original_module.name)
            .field("new_module", &self.new_module.name)
            .field("types", &self.contexts.count())
            .field("registration_open", &self.is_registration_open())
            .finish_non_exhaustive()
    }
}
