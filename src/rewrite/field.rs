//! Per-field rewrite records.

use std::{collections::HashMap, sync::Arc};

use crate::{
    metadata::{
        field::{Field, FieldAttributes, FieldRc},
        token::{Token, TokenTable},
    },
    rewrite::{
        identity::{cleanup_name, is_obfuscated_name, signature_simple_name},
        types::TypeRewriteContext,
        AssemblyRewriteContext,
    },
    Result,
};

/// Prefix of the static field caching a native field-info pointer
pub const FIELD_INFO_POINTER_PREFIX: &str = "NativeFieldInfoPtr_";

/// A reference-counted pointer to a `FieldRewriteContext`
pub type FieldRewriteContextRc = Arc<FieldRewriteContext>;

/// Correlates one original field with the members emitted for it
#[derive(Debug)]
pub struct FieldRewriteContext {
    original_field: FieldRc,
    declaring_type: Token,
    unmangled_name: String,
    pointer_field_name: String,
    pointer_field: Option<FieldRc>,
}

impl FieldRewriteContext {
    /// Create the context for `original` and emit its pointer field onto the new type
    ///
    /// `renamed_counts` is shared by all fields of one type and numbers generated names that
    /// share a prefix.
    pub(crate) fn new(
        type_context: &TypeRewriteContext,
        assembly: &AssemblyRewriteContext,
        original: &FieldRc,
        renamed_counts: &mut HashMap<String, u32>,
    ) -> Result<Self> {
        let config = assembly.config();
        let unmangled_name = if config.rename_obfuscated_members
            && is_obfuscated_name(&original.name, config.allow_non_ascii_names)
        {
            generated_name(original, renamed_counts)
        } else {
            original.name.clone()
        };

        let pointer_field_name = unique_name(
            format!("{}{}", FIELD_INFO_POINTER_PREFIX, cleanup_name(&unmangled_name)),
            renamed_counts,
        );

        let pointer_field = if config.emit_native_pointer_fields {
            let field = Arc::new(Field::new(
                assembly.new_module().allocate_token(TokenTable::FIELD)?,
                &pointer_field_name,
                FieldAttributes::PRIVATE | FieldAttributes::STATIC | FieldAttributes::INIT_ONLY,
                assembly.imports().intptr_type()?,
            ));
            type_context.new_type().fields.push(field.clone());
            Some(field)
        } else {
            None
        };

        tracing::trace!(
            "field {}::{} -> {}",
            type_context.original_type().fullname(),
            original.name,
            unmangled_name
        );

        Ok(FieldRewriteContext {
            original_field: original.clone(),
            declaring_type: type_context.new_type().token,
            unmangled_name,
            pointer_field_name,
            pointer_field,
        })
    }

    /// The field as declared in the stripped input
    pub fn original_field(&self) -> &FieldRc {
        &self.original_field
    }

    /// Token of the rewritten type declaring this field
    pub fn declaring_type(&self) -> Token {
        self.declaring_type
    }

    /// Name the field is emitted under
    pub fn unmangled_name(&self) -> &str {
        &self.unmangled_name
    }

    /// Name of the static field caching the native field-info pointer
    pub fn pointer_field_name(&self) -> &str {
        &self.pointer_field_name
    }

    /// The emitted pointer field, when pointer fields are enabled
    pub fn pointer_field(&self) -> Option<&FieldRc> {
        self.pointer_field.as_ref()
    }
}

fn generated_name(original: &Field, renamed_counts: &mut HashMap<String, u32>) -> String {
    let prefix = format!(
        "field_{}_{}",
        original.access_name(),
        signature_simple_name(&original.signature)
    );

    let count = renamed_counts.entry(prefix.clone()).or_insert(0);
    let name = format!("{}_{}", prefix, count);
    *count += 1;
    name
}

/// Claim `name` in `renamed_counts`, appending `_<n>` while it is already taken
fn unique_name(name: String, renamed_counts: &mut HashMap<String, u32>) -> String {
    let mut candidate = name.clone();
    while renamed_counts.contains_key(&candidate) {
        let count = renamed_counts.entry(name.clone()).or_insert(0);
        *count += 1;
        candidate = format!("{}_{}", name, count);
    }
    renamed_counts.insert(candidate.clone(), 0);
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::signatures::TypeSignature;

    #[test]
    fn test_generated_names_share_counter() {
        let mut counts = HashMap::new();

        let first = Field::new(
            Token::new(0x0400_0001),
            "\u{0001}",
            FieldAttributes::PUBLIC,
            TypeSignature::I4,
        );
        let second = Field::new(
            Token::new(0x0400_0002),
            "\u{0002}",
            FieldAttributes::PUBLIC,
            TypeSignature::I4,
        );
        let third = Field::new(
            Token::new(0x0400_0003),
            "\u{0003}",
            FieldAttributes::PRIVATE,
            TypeSignature::I4,
        );

        assert_eq!(generated_name(&first, &mut counts), "field_Public_Int32_0");
        assert_eq!(generated_name(&second, &mut counts), "field_Public_Int32_1");
        assert_eq!(generated_name(&third, &mut counts), "field_Private_Int32_0");
    }

    #[test]
    fn test_unique_name_suffixes_taken_names() {
        let mut counts = HashMap::new();

        assert_eq!(unique_name("Ptr_a".to_string(), &mut counts), "Ptr_a");
        assert_eq!(unique_name("Ptr_a_1".to_string(), &mut counts), "Ptr_a_1");
        assert_eq!(unique_name("Ptr_a".to_string(), &mut counts), "Ptr_a_2");
        assert_eq!(unique_name("Ptr_a".to_string(), &mut counts), "Ptr_a_3");
        assert_eq!(unique_name("Ptr_b".to_string(), &mut counts), "Ptr_b");
    }
}
