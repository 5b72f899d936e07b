//! Method definitions.
//!
//! A [`Method`] carries what the rewrite needs from a `MethodDef` row: its identity, its
//! attribute flags split into access level and modifiers, and its resolved signature.
//! Bodies are not modelled.
//!
//! # Examples
//!
//! ```rust
//! use reforge::metadata::{
//!     method::{Method, MethodAccessFlags, MethodModifiers, Param},
//!     signatures::TypeSignature,
//!     token::Token,
//! };
//!
//! let method = Method::new(
//!     Token::new(0x0600_0001),
//!     ".ctor",
//!     MethodAccessFlags::PUBLIC,
//!     MethodModifiers::SPECIAL_NAME | MethodModifiers::RTSPECIAL_NAME,
//!     TypeSignature::Void,
//!     vec![Param::new("pointer", TypeSignature::I)],
//! );
//! assert!(method.is_native_handle_constructor());
//! ```

mod types;

use std::sync::Arc;

pub use types::*;

use crate::metadata::{
    customattributes::CustomAttributeList, generics::GenericParamList, signatures::TypeSignature,
    token::Token, typesystem::SYSTEM_INTPTR,
};

/// A reference-counted pointer to a `Method`
pub type MethodRc = Arc<Method>;
/// A vector that holds a list of `Method`, in declaration order
pub type MethodList = Arc<boxcar::Vec<MethodRc>>;

/// Name of the instance constructor
pub const CONSTRUCTOR_NAME: &str = ".ctor";
/// Name of the type initializer
pub const STATIC_CONSTRUCTOR_NAME: &str = ".cctor";

/// One parameter of a method signature
#[derive(Debug, Clone)]
pub struct Param {
    /// Parameter name, may be empty
    pub name: String,
    /// Parameter type
    pub signature: TypeSignature,
}

impl Param {
    /// Create a new parameter
    pub fn new(name: &str, signature: TypeSignature) -> Self {
        Param {
            name: name.to_string(),
            signature,
        }
    }
}

/// A method definition
pub struct Method {
    /// Token
    pub token: Token,
    /// Name of the method
    pub name: String,
    /// Access level
    pub access: MethodAccessFlags,
    /// Remaining attribute flags
    pub modifiers: MethodModifiers,
    /// Return type
    pub return_type: TypeSignature,
    /// Parameters, in order
    pub params: Vec<Param>,
    /// Generic parameters declared by the method itself
    pub generic_params: GenericParamList,
    /// Custom attributes applied to this method
    pub custom_attributes: CustomAttributeList,
}

impl Method {
    /// Create a new method without generic parameters or attributes
    ///
    /// ## Arguments
    /// * 'token'       - The `MethodDef` token
    /// * 'name'        - The method name
    /// * 'access'      - Access level
    /// * 'modifiers'   - Remaining attribute flags
    /// * 'return_type' - The return type
    /// * 'params'      - Parameters, in order
    pub fn new(
        token: Token,
        name: &str,
        access: MethodAccessFlags,
        modifiers: MethodModifiers,
        return_type: TypeSignature,
        params: Vec<Param>,
    ) -> Self {
        Method {
            token,
            name: name.to_string(),
            access,
            modifiers,
            return_type,
            params,
            generic_params: Arc::new(boxcar::Vec::new()),
            custom_attributes: Arc::new(boxcar::Vec::new()),
        }
    }

    /// Returns true for `.ctor`
    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    /// Returns true for the type initializer `.cctor`
    pub fn is_static_constructor(&self) -> bool {
        self.name == STATIC_CONSTRUCTOR_NAME
    }

    /// Returns true for the `.ctor(System.IntPtr)` that wraps an existing native object
    pub fn is_native_handle_constructor(&self) -> bool {
        self.is_constructor()
            && self.params.len() == 1
            && self.params[0].signature.full_name() == SYSTEM_INTPTR
    }

    /// Returns true if the method is defined on the type rather than per instance
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MethodModifiers::STATIC)
    }

    /// Returns true if the method declares its own generic parameters
    pub fn has_generic_params(&self) -> bool {
        self.generic_params.count() > 0
    }

    /// Full type names of all parameters, in order
    pub fn param_type_names(&self) -> Vec<String> {
        self.params
            .iter()
            .map(|param| param.signature.full_name())
            .collect()
    }
}

impl std::fmt::Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Method")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("params", &self.param_type_names())
            .finish_non_exhaustive()
    }
}
