//! Per-method rewrite records.

use std::{collections::HashMap, sync::Arc};

use crate::{
    metadata::{
        field::{Field, FieldAttributes, FieldRc},
        method::{Method, MethodRc},
        token::{Token, TokenTable},
    },
    rewrite::{
        identity::{cleanup_name, extract_token, is_obfuscated_name, signature_simple_name},
        types::TypeRewriteContext,
        AssemblyRewriteContext,
    },
    Result,
};

/// Prefix of the static field caching a native method-info pointer
pub const METHOD_INFO_POINTER_PREFIX: &str = "NativeMethodInfoPtr_";

/// A reference-counted pointer to a `MethodRewriteContext`
pub type MethodRewriteContextRc = Arc<MethodRewriteContext>;

/// Correlates one original method with the members emitted for it
#[derive(Debug)]
pub struct MethodRewriteContext {
    original_method: MethodRc,
    runtime_token: Token,
    declaring_type: Token,
    declaration_index: usize,
    unmangled_name: String,
    pointer_field_name: String,
    new_method: MethodRc,
    pointer_field: Option<FieldRc>,
}

impl MethodRewriteContext {
    /// Create the context for `original`, emit the mirrored method and its pointer field
    ///
    /// The mirrored method keeps the original signature; remapping parameter types onto the
    /// rewritten types is left to later passes.
    pub(crate) fn new(
        type_context: &TypeRewriteContext,
        assembly: &AssemblyRewriteContext,
        original: &MethodRc,
        declaration_index: usize,
        renamed_counts: &mut HashMap<String, u32>,
    ) -> Result<Self> {
        let config = assembly.config();
        let runtime_token = extract_token(&original.custom_attributes, original.token)?;

        let unmangled_name = if !original.is_constructor()
            && config.rename_obfuscated_members
            && is_obfuscated_name(&original.name, config.allow_non_ascii_names)
        {
            generated_name(original, renamed_counts)
        } else {
            original.name.clone()
        };

        let pointer_field_name = format!(
            "{}{}_{}",
            METHOD_INFO_POINTER_PREFIX,
            cleanup_name(&unmangled_name),
            declaration_index
        );

        let new_type = type_context.new_type();
        let new_module = assembly.new_module();

        let new_method = Arc::new(Method::new(
            new_module.allocate_token(TokenTable::METHOD_DEF)?,
            &unmangled_name,
            original.access,
            original.modifiers,
            original.return_type.clone(),
            original.params.clone(),
        ));
        for (_, param) in original.generic_params.iter() {
            new_method.generic_params.push(param.clone());
        }
        new_type.methods.push(new_method.clone());

        let pointer_field = if config.emit_native_pointer_fields {
            let field = Arc::new(Field::new(
                new_module.allocate_token(TokenTable::FIELD)?,
                &pointer_field_name,
                FieldAttributes::PRIVATE | FieldAttributes::STATIC | FieldAttributes::INIT_ONLY,
                assembly.imports().intptr_type()?,
            ));
            new_type.fields.push(field.clone());
            Some(field)
        } else {
            None
        };

        tracing::trace!(
            "method {}::{} -> {} ({})",
            type_context.original_type().fullname(),
            original.name,
            unmangled_name,
            runtime_token
        );

        Ok(MethodRewriteContext {
            original_method: original.clone(),
            runtime_token,
            declaring_type: new_type.token,
            declaration_index,
            unmangled_name,
            pointer_field_name,
            new_method,
            pointer_field,
        })
    }

    /// The method as declared in the stripped input
    pub fn original_method(&self) -> &MethodRc {
        &self.original_method
    }

    /// Runtime token of the original method
    pub fn runtime_token(&self) -> Token {
        self.runtime_token
    }

    /// Token of the rewritten type declaring this method
    pub fn declaring_type(&self) -> Token {
        self.declaring_type
    }

    /// Position of the original method in its declaring type
    pub fn declaration_index(&self) -> usize {
        self.declaration_index
    }

    /// Name the method is emitted under
    pub fn unmangled_name(&self) -> &str {
        &self.unmangled_name
    }

    /// Name of the static field caching the native method-info pointer
    pub fn pointer_field_name(&self) -> &str {
        &self.pointer_field_name
    }

    /// The method emitted onto the rewritten type
    pub fn new_method(&self) -> &MethodRc {
        &self.new_method
    }

    /// The emitted pointer field, when pointer fields are enabled
    pub fn pointer_field(&self) -> Option<&FieldRc> {
        self.pointer_field.as_ref()
    }

    /// Returns true for static methods
    pub fn is_static(&self) -> bool {
        self.original_method.is_static()
    }

    /// Returns true for instance constructors
    pub fn is_constructor(&self) -> bool {
        self.original_method.is_constructor()
    }

    /// Returns true if the method declares its own generic parameters
    pub fn is_generic(&self) -> bool {
        self.original_method.has_generic_params()
    }
}

fn generated_name(original: &Method, renamed_counts: &mut HashMap<String, u32>) -> String {
    let mut parts = vec!["Method".to_string(), original.access.name().to_string()];
    if original.is_static() {
        parts.push("Static".to_string());
    }
    parts.push(signature_simple_name(&original.return_type));
    parts.extend(
        original
            .params
            .iter()
            .map(|param| signature_simple_name(&param.signature)),
    );

    let prefix = parts.join("_");
    let count = renamed_counts.entry(prefix.clone()).or_insert(0);
    let name = format!("{}_{}", prefix, count);
    *count += 1;
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::signatures::TypeSignature,
        test::{create_method, create_static_method},
    };

    #[test]
    fn test_generated_names() {
        let mut counts = HashMap::new();

        let update = create_method(1, "\u{0001}", TypeSignature::Void, vec![TypeSignature::R4]);
        let lookup = create_static_method(
            2,
            "\u{0002}",
            TypeSignature::Boolean,
            vec![TypeSignature::String, TypeSignature::I4],
        );
        let again = create_method(3, "\u{0003}", TypeSignature::Void, vec![TypeSignature::R4]);

        assert_eq!(
            generated_name(&update, &mut counts),
            "Method_Public_Void_Single_0"
        );
        assert_eq!(
            generated_name(&lookup, &mut counts),
            "Method_Public_Static_Boolean_String_Int32_0"
        );
        assert_eq!(
            generated_name(&again, &mut counts),
            "Method_Public_Void_Single_1"
        );
    }
}
