//! Reconstruction of rewritten type definitions from stripped metadata.
//!
//! The stripped input keeps the shape of every type (names, fields, method signatures) but not
//! the ability to run: its types only exist to describe what lives in the native runtime. The
//! rewrite builds, for every such type, a new type in an output module that carries the
//! runtime's identity for it and the bookkeeping members a bridge to the runtime needs.
//!
//! # Key Components
//!
//! - [`AssemblyRewriteContext`]: Owns all type contexts of one module and the shared collaborators
//! - [`TypeRewriteContext`]: Binds one original type to its rewritten type
//! - [`FieldRewriteContext`] / [`MethodRewriteContext`]: Per-member correlation records
//! - [`TypeSpecifics`]: Reference type / blittable / non-blittable classification
//! - [`Imports`] / [`ImportTable`]: Resolver for injected attribute and type references
//! - [`RewriteConfig`]: Naming and emission options
//!
//! # Phases
//!
//! 1. [`AssemblyRewriteContext::create_type_context`] for every original type
//! 2. [`AssemblyRewriteContext::close_registration`]
//! 3. [`AssemblyRewriteContext::add_all_members`] (or `add_members` per context, any order)
//! 4. [`AssemblyRewriteContext::resolve_type_specifics`]
//!
//! Lookups are available from step 3 on.
//!
//! # Examples
//!
//! ```rust,no_run
//! use reforge::prelude::*;
//! use std::sync::Arc;
//!
//! # fn load() -> (ModuleDefRc, ModuleDefRc, ModuleDefRc) { unimplemented!() }
//! let (stripped, corlib, support) = load();
//! let output = Arc::new(ModuleDefinition::new("Assembly-CSharp.dll", "Assembly-CSharp"));
//! let imports = Arc::new(ImportTable::new(corlib, support));
//!
//! let assembly = AssemblyRewriteContext::new(stripped.clone(), output, imports, RewriteConfig::default());
//! for original in stripped.types() {
//!     let new_type = assembly.create_new_type(original, &original.name)?;
//!     assembly.create_type_context(original, new_type, TypeRewriteSemantic::Default)?;
//! }
//! assembly.close_registration();
//! assembly.add_all_members()?;
//! assembly.resolve_type_specifics()?;
//! # Ok::<(), reforge::Error>(())
//! ```

pub(crate) mod assembly;
pub(crate) mod classify;
pub(crate) mod config;
pub(crate) mod field;
pub mod identity;
pub(crate) mod imports;
pub(crate) mod method;
pub(crate) mod types;

pub use assembly::AssemblyRewriteContext;
pub use classify::{classify, TypeSpecifics};
pub use config::RewriteConfig;
pub use field::{FieldRewriteContext, FieldRewriteContextRc, FIELD_INFO_POINTER_PREFIX};
pub use imports::{
    ImportTable, Imports, CLASS_POINTER_FIELD, CLASS_POINTER_STORE, NATIVE_TYPE_TOKEN_ATTRIBUTE,
    OBFUSCATED_NAME_ATTRIBUTE,
};
pub use method::{MethodRewriteContext, MethodRewriteContextRc, METHOD_INFO_POINTER_PREFIX};
pub use types::{
    TypeRewriteContext, TypeRewriteContextRc, TypeRewriteSemantic, ASSEMBLY_NAME_ARGUMENT,
};
