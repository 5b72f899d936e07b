use crate::metadata::signatures::TypeSignature;

/// A by-name reference to a method on a declaring type
#[derive(Debug, Clone)]
pub struct MethodReference {
    /// Method name, e.g. `.ctor`
    pub name: String,
    /// The type declaring the method
    pub declaring_type: TypeSignature,
    /// Return type
    pub return_type: TypeSignature,
    /// Parameter types, in order
    pub params: Vec<TypeSignature>,
    /// Instance method (has an implicit `this`)
    pub has_this: bool,
}

impl MethodReference {
    /// Canonical `Declaring::Name(Param,Param)` rendering, used in diagnostics
    #[must_use]
    pub fn full_name(&self) -> String {
        let params: Vec<String> = self.params.iter().map(TypeSignature::full_name).collect();
        format!(
            "{}::{}({})",
            self.declaring_type.full_name(),
            self.name,
            params.join(",")
        )
    }
}

/// A by-name reference to a field on a declaring type
#[derive(Debug, Clone)]
pub struct FieldReference {
    /// Field name
    pub name: String,
    /// The type of the field
    pub field_type: TypeSignature,
    /// The type declaring the field; may be a generic instantiation
    pub declaring_type: TypeSignature,
}

impl FieldReference {
    /// Canonical `Declaring::Name` rendering, used in diagnostics
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}::{}", self.declaring_type.full_name(), self.name)
    }
}
