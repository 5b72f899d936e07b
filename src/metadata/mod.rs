//! In-memory metadata model shared by the input and output module graphs.
//!
//! This module contains the representation the rewrite operates on: modules, the types they
//! define, fields, methods, generic parameters, type signatures, custom attributes and
//! tokens. Loading from and writing to disk happen outside this crate; the model is filled by
//! the caller and extended by the rewrite.
//!
//! # Key Components
//!
//! - [`module`] - Modules and their type indices
//! - [`typesystem`] - Type definitions and weak type references
//! - [`field`] / [`method`] - Member definitions and their attribute flags
//! - [`signatures`] - Type usages and by-name member references
//! - [`customattributes`] - Decoded custom attributes
//! - [`generics`] - Generic parameters of types and methods
//! - [`token`] - Metadata table row references
//!
//! # Examples
//!
//! ```rust
//! use reforge::metadata::{
//!     module::ModuleDefinition,
//!     token::Token,
//!     typesystem::{CilFlavor, CilType, TypeAttributes},
//! };
//! use std::sync::Arc;
//!
//! let module = ModuleDefinition::new("Assembly-CSharp.dll", "Assembly-CSharp");
//! module.insert(Arc::new(CilType::new(
//!     Token::new(0x0200_0002),
//!     CilFlavor::Class,
//!     "Game",
//!     "Player",
//!     TypeAttributes::PUBLIC,
//! )))?;
//! assert!(module.get_by_fullname("Game.Player").is_some());
//! # Ok::<(), reforge::Error>(())
//! ```

/// Implementation of custom attribute representation
pub mod customattributes;
/// Implementation of field definitions
pub mod field;
/// Implementation of generic parameters
pub mod generics;
/// Implementation of method definitions
pub mod method;
/// Implementation of modules and their type indices
pub mod module;
/// Implementation of type usages and member references
pub mod signatures;
/// Implementation of metadata tokens
pub mod token;
/// Implementation of the type system
pub mod typesystem;
