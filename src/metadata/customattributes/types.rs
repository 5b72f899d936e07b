//! CustomAttribute-specific types and data structures.
//!
//! An attribute is identified by the constructor it invokes; its payload is the list of
//! positional constructor arguments followed by named field and property assignments.

use std::sync::Arc;

use crate::metadata::signatures::MethodReference;

/// A reference-counted pointer to a `CustomAttribute`
pub type CustomAttributeRc = Arc<CustomAttribute>;
/// A vector that holds a list of `CustomAttribute` instances for storage on parent objects
pub type CustomAttributeList = Arc<boxcar::Vec<CustomAttributeRc>>;

/// One custom attribute applied to a type or member
#[derive(Debug, Clone)]
pub struct CustomAttribute {
    /// The attribute constructor
    pub constructor: MethodReference,
    /// Fixed arguments from the constructor signature
    pub fixed_args: Vec<CustomAttributeArgument>,
    /// Named arguments (fields and properties)
    pub named_args: Vec<CustomAttributeNamedArgument>,
}

impl CustomAttribute {
    /// Create an attribute without arguments
    pub fn new(constructor: MethodReference) -> Self {
        CustomAttribute {
            constructor,
            fixed_args: Vec::new(),
            named_args: Vec::new(),
        }
    }

    /// Simple name of the attribute type, e.g. `TokenAttribute`
    pub fn type_name(&self) -> String {
        match self.constructor.declaring_type.definition() {
            Some(declaring) => declaring.name.clone(),
            None => {
                let fullname = self.constructor.declaring_type.full_name();
                match fullname.rsplit_once(['.', '/']) {
                    Some((_, name)) => name.to_string(),
                    None => fullname,
                }
            }
        }
    }

    /// Find a named argument (field or property assignment) by name
    pub fn named_arg(&self, name: &str) -> Option<&CustomAttributeNamedArgument> {
        self.named_args.iter().find(|arg| arg.name == name)
    }
}

/// Represents a single custom attribute argument value
#[derive(Debug, Clone, PartialEq)]
pub enum CustomAttributeArgument {
    /// Boolean value
    Bool(bool),
    /// Signed 32-bit integer
    I4(i32),
    /// Unsigned 32-bit integer
    U4(u32),
    /// Signed 64-bit integer
    I8(i64),
    /// UTF-8 string
    String(String),
    /// Type reference (as string)
    Type(String),
    /// Array of arguments
    Array(Vec<CustomAttributeArgument>),
}

impl CustomAttributeArgument {
    /// The string payload, if this is a string argument
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CustomAttributeArgument::String(value) => Some(value),
            _ => None,
        }
    }

    /// The value as unsigned 32-bit integer, if it is an integer argument that fits
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            CustomAttributeArgument::U4(value) => Some(*value),
            CustomAttributeArgument::I4(value) => u32::try_from(*value).ok(),
            CustomAttributeArgument::I8(value) => u32::try_from(*value).ok(),
            _ => None,
        }
    }
}

/// Represents a named argument (field or property) in a custom attribute
#[derive(Debug, Clone)]
pub struct CustomAttributeNamedArgument {
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// Name of the field or property
    pub name: String,
    /// Full name of the argument type
    pub arg_type: String,
    /// Value of the argument
    pub value: CustomAttributeArgument,
}

impl CustomAttributeNamedArgument {
    /// Create a named field assignment
    pub fn field(name: &str, arg_type: String, value: CustomAttributeArgument) -> Self {
        CustomAttributeNamedArgument {
            is_field: true,
            name: name.to_string(),
            arg_type,
            value,
        }
    }

    /// Create a named property assignment
    pub fn property(name: &str, arg_type: String, value: CustomAttributeArgument) -> Self {
        CustomAttributeNamedArgument {
            is_field: false,
            name: name.to_string(),
            arg_type,
            value,
        }
    }
}
