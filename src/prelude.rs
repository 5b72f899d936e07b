//! # reforge Prelude
//!
//! Re-exports of the types needed to drive a rewrite run or to work with native class
//! descriptors. Import with `use reforge::prelude::*;`.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all reforge operations
pub use crate::Error;

/// The result type used throughout reforge
pub use crate::Result;

// ================================================================================================
// Metadata Model
// ================================================================================================

/// Metadata tokens
pub use crate::metadata::token::{Token, TokenTable};

/// Type definitions and their classification
pub use crate::metadata::typesystem::{CilFlavor, CilType, CilTypeRc, CilTypeRef, TypeAttributes};

/// Members
pub use crate::metadata::{
    field::{Field, FieldAttributes, FieldRc},
    method::{Method, MethodAccessFlags, MethodModifiers, MethodRc, Param},
};

/// Type usages and member references
pub use crate::metadata::signatures::{FieldReference, MethodReference, TypeSignature};

/// Custom attributes
pub use crate::metadata::customattributes::{
    CustomAttribute, CustomAttributeArgument, CustomAttributeNamedArgument, CustomAttributeRc,
};

/// Modules
pub use crate::metadata::module::{ModuleDefRc, ModuleDefinition};

// ================================================================================================
// Rewrite
// ================================================================================================

/// Rewrite contexts and their collaborators
pub use crate::rewrite::{
    AssemblyRewriteContext, FieldRewriteContext, ImportTable, Imports, MethodRewriteContext,
    RewriteConfig, TypeRewriteContext, TypeRewriteSemantic, TypeSpecifics,
};

// ================================================================================================
// Native Descriptors
// ================================================================================================

/// Class descriptor views and version selection
pub use crate::native::{
    class_handler_for, ClassLayoutVersion, Il2CppTypeEnum, MetadataVersion, NativeClassStruct,
    NativeClassStructHandler, NativeTypeStruct,
};
