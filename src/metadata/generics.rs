//! Generic parameters of types and methods.

use std::sync::Arc;

use crate::metadata::token::Token;

/// A reference-counted pointer to a `GenericParam`
pub type GenericParamRc = Arc<GenericParam>;
/// A vector that holds a list of `GenericParam`, in declaration order
pub type GenericParamList = Arc<boxcar::Vec<GenericParamRc>>;

/// The definition that declares a generic parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericParamOwner {
    /// Declared by the type with this token
    Type(Token),
    /// Declared by the method with this token
    Method(Token),
}

/// A generic parameter declared on a type or method
#[derive(Debug)]
pub struct GenericParam {
    /// Token
    pub token: Token,
    /// Index of the generic parameter, numbered left-to-right, from zero
    pub number: u32,
    /// Name of the generic parameter
    pub name: String,
    /// The type or method declaring this parameter
    pub owner: GenericParamOwner,
}

impl GenericParam {
    /// Create a new generic parameter
    ///
    /// ## Arguments
    /// * 'token'  - The `GenericParam` token
    /// * 'number' - Position among the owner's generic parameters
    /// * 'name'   - Parameter name, e.g. `T`
    /// * 'owner'  - The declaring type or method
    pub fn new(token: Token, number: u32, name: &str, owner: GenericParamOwner) -> Self {
        GenericParam {
            token,
            number,
            name: name.to_string(),
            owner,
        }
    }

    /// Returns true if the parameter is declared on a method
    pub fn is_method_param(&self) -> bool {
        matches!(self.owner, GenericParamOwner::Method(_))
    }
}
