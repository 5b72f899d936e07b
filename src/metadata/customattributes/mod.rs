//! Custom attributes attached to types and members.
//!
//! The rewrite reads attributes from the stripped input (the `TokenAttribute` left behind
//! by the dumper) and writes marker attributes onto the rewritten types. Attributes are
//! kept in decoded form: a constructor reference plus typed positional and named arguments.
//!
//! # Examples
//!
//! ```rust
//! use reforge::metadata::customattributes::{CustomAttributeArgument, CustomAttributeNamedArgument};
//!
//! let token = CustomAttributeNamedArgument::field(
//!     "Token",
//!     "System.String".to_string(),
//!     CustomAttributeArgument::String("0x2000012".to_string()),
//! );
//! assert_eq!(token.value.as_str(), Some("0x2000012"));
//! ```

mod types;

pub use types::*;
