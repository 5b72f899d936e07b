//! Identity bookkeeping: runtime tokens and obfuscated names.
//!
//! The dumper that produced the stripped input records every definition's runtime token in a
//! `TokenAttribute`; when the attribute is missing the definition's own metadata token is the
//! runtime token. Names are checked against the identifier alphabet to decide whether a
//! member is renamed.

use crate::{
    metadata::{customattributes::CustomAttributeList, signatures::TypeSignature, token::Token},
    Result,
};

/// Simple name of the attribute carrying the runtime token of a definition
pub const TOKEN_ATTRIBUTE: &str = "TokenAttribute";
/// Named argument of [`TOKEN_ATTRIBUTE`] that holds the hex-encoded token
pub const TOKEN_ARGUMENT: &str = "Token";

/// Extract the runtime token of a definition
///
/// Uses the `Token` named argument of the first `TokenAttribute` in `attributes`, falling back
/// to `own` when there is no such attribute or argument.
///
/// ## Arguments
/// * 'attributes' - Custom attributes of the original definition
/// * 'own'        - The definition's own metadata token
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the token argument is present but is neither a hex
/// string nor an unsigned integer.
pub fn extract_token(attributes: &CustomAttributeList, own: Token) -> Result<Token> {
    let attribute = attributes
        .iter()
        .map(|(_, attribute)| attribute)
        .find(|attribute| attribute.type_name() == TOKEN_ATTRIBUTE);

    let Some(argument) = attribute.and_then(|attribute| attribute.named_arg(TOKEN_ARGUMENT)) else {
        return Ok(own);
    };

    if let Some(text) = argument.value.as_str() {
        return Token::parse_hex(text);
    }

    argument.value.as_u32().map(Token::new).ok_or_else(|| {
        malformed_error!(
            "{} argument of {} is neither string nor integer - {:?}",
            TOKEN_ARGUMENT,
            TOKEN_ATTRIBUTE,
            argument.value
        )
    })
}

/// Returns true if `name` cannot have come from source code
///
/// A name is obfuscated when it is empty, starts with a digit, or contains a character outside
/// `[A-Za-z0-9_`<>.]`. With `allow_non_ascii` set, non-ASCII letters and digits are accepted.
pub fn is_obfuscated_name(name: &str, allow_non_ascii: bool) -> bool {
    let Some(first) = name.chars().next() else {
        return true;
    };

    if first.is_ascii_digit() {
        return true;
    }

    !name.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(c, '_' | '`' | '<' | '>' | '.')
            || (allow_non_ascii && !c.is_ascii() && c.is_alphanumeric())
    })
}

/// Replace every character that is not a letter, digit or `_` with `_`
pub fn cleanup_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Short identifier-safe name of a type usage, as embedded into generated member names
///
/// `System.Int32` becomes `Int32`, `List`1<T>` becomes `List_1`, constructions append
/// `Ptr`, `Ref` or `Array`.
pub fn signature_simple_name(signature: &TypeSignature) -> String {
    match signature {
        TypeSignature::Ptr(inner) => format!("{}Ptr", signature_simple_name(inner)),
        TypeSignature::ByRef(inner) => format!("{}Ref", signature_simple_name(inner)),
        TypeSignature::SzArray(inner) => format!("ArrayOf{}", signature_simple_name(inner)),
        TypeSignature::Array { element, rank } => {
            format!("ArrayOf{}_{}", signature_simple_name(element), rank)
        }
        TypeSignature::GenericParam(param) => cleanup_name(&param.name),
        TypeSignature::Type(_) | TypeSignature::GenericInst { .. } => match signature.definition() {
            Some(definition) => cleanup_name(&definition.name),
            None => "Unknown".to_string(),
        },
        TypeSignature::Unknown => "Unknown".to_string(),
        primitive => {
            let fullname = primitive.full_name();
            match fullname.rsplit_once('.') {
                Some((_, name)) => name.to_string(),
                None => cleanup_name(&fullname),
            }
        }
    }
}
