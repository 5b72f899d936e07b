// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]
//#![deny(unsafe_code)]
// - 'native/memory.rs' allocates and wraps raw descriptor memory
// - 'native/class' and 'native/types.rs' hand out views into that memory

//! # reforge
//!
//! Rebuilds fully-typed managed module definitions from the stripped metadata an IL2CPP
//! dumper produces, and gives version-independent access to the runtime's native class
//! descriptors.
//!
//! ## Features
//!
//! - **Type rewriting** - One [`rewrite::TypeRewriteContext`] per original type, owning the
//!   rebuilt type, its member contexts and the identity markers (original name, runtime token)
//! - **Cross-module correlation** - Find rewritten members by original definition, by name or
//!   by the external signature of an unrelated module
//! - **Deferred classification** - Reference type, blittable or non-blittable struct, resolved
//!   once every type of the assembly is registered
//! - **Native class layouts** - Create or wrap `Il2CppClass` descriptors of metadata versions
//!   24.0 through 29 through one [`native::NativeClassStruct`] view
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reforge::prelude::*;
//! use std::sync::Arc;
//!
//! # fn modules() -> (ModuleDefRc, ModuleDefRc, ModuleDefRc) { unimplemented!() }
//! let (original, corlib, support) = modules();
//! let output = Arc::new(ModuleDefinition::new("Assembly-CSharp.dll", "Assembly-CSharp"));
//!
//! let assembly = AssemblyRewriteContext::new(
//!     original.clone(),
//!     output,
//!     Arc::new(ImportTable::new(corlib, support)),
//!     RewriteConfig::default(),
//! );
//!
//! for ty in original.types() {
//!     let new_type = assembly.create_new_type(ty, &ty.name)?;
//!     assembly.create_type_context(ty, new_type, TypeRewriteSemantic::for_stripped(ty))?;
//! }
//! assembly.close_registration();
//! assembly.add_all_members()?;
//! assembly.resolve_type_specifics()?;
//! # Ok::<(), reforge::Error>(())
//! ```
//!
//! ### Native descriptors
//!
//! ```rust
//! use reforge::native::{class_handler_for, MetadataVersion};
//!
//! let handler = class_handler_for(MetadataVersion::parse("27.0")?)?;
//! let mut class = handler.create_new(2)?;
//! class.set_value_type(true)?;
//! assert!(class.value_type()?);
//! # Ok::<(), reforge::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`], with [`Error`] describing protocol
//! violations, malformed input and rejected memory access.

#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use reforge::prelude::*;
///
/// let config = RewriteConfig::strict();
/// assert!(!config.allow_non_ascii_names);
/// ```
pub mod prelude;

/// Managed metadata model shared by the original and the rewritten modules
///
/// # Key Components
///
/// - [`metadata::typesystem::CilType`] - A type definition with its members
/// - [`metadata::signatures::TypeSignature`] - A type as used by a member
/// - [`metadata::module::ModuleDefinition`] - A module and its type registry
/// - [`metadata::token::Token`] - Metadata and runtime tokens
pub mod metadata;

/// Rebuilding type definitions from stripped metadata
///
/// See [`rewrite::AssemblyRewriteContext`] for the phases of a run.
pub mod rewrite;

/// Version-independent access to the runtime's native descriptors
pub mod native;

/// `reforge` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `reforge` Error type
///
/// The main error type for all operations in this crate. See the variants for the failure
/// modes of each phase.
pub use error::Error;

/// Switches for one rewrite run
pub use rewrite::RewriteConfig;
