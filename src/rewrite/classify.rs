//! Blittability classification of original types.
//!
//! The first pass runs once per type while its context is constructed and answers everything
//! that is decidable from the type alone. Plain value types need their instance fields, whose
//! types may be other value types of the same assembly that have no context yet, so they stay
//! `NotComputed` until [`resolve`] runs after all contexts exist.

use strum::{Display, EnumCount, EnumIter};

use crate::{
    metadata::{signatures::TypeSignature, typesystem::CilType},
    rewrite::{assembly::AssemblyRewriteContext, types::TypeRewriteContext},
    Result,
};

/// How a type is represented when crossing into the native runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum TypeSpecifics {
    /// Plain value type whose fields were not inspected yet
    NotComputed,
    /// Field inspection is in progress; seen again only through a cycle
    Computing,
    /// Class, interface or delegate, handled by pointer
    ReferenceType,
    /// Value type with a layout identical on both sides; copied as is
    BlittableStruct,
    /// Value type containing references or generics; needs marshalling
    NonBlittableStruct,
}

impl TypeSpecifics {
    /// Returns true once a final classification is known
    pub fn is_computed(&self) -> bool {
        !matches!(self, TypeSpecifics::NotComputed | TypeSpecifics::Computing)
    }
}

/// Classify an original type from its own declaration
///
/// Total and side-effect free: reference types first, then enums, then generic value types.
/// Remaining value types are `NotComputed`.
pub fn classify(original: &CilType) -> TypeSpecifics {
    if !original.is_value_type() {
        TypeSpecifics::ReferenceType
    } else if original.is_enum() {
        TypeSpecifics::BlittableStruct
    } else if original.has_generic_params() {
        TypeSpecifics::NonBlittableStruct
    } else {
        TypeSpecifics::NotComputed
    }
}

/// Finish the classification of a context left `NotComputed`
///
/// Marks the context `Computing`, inspects every instance field and stores the result.
/// Value types of the same assembly recurse through their own context; meeting a context that
/// is still `Computing` means the struct contains itself and makes the field non-blittable.
///
/// # Errors
/// Returns [`crate::Error::LockError`] if a classification lock is poisoned.
pub fn resolve(
    context: &TypeRewriteContext,
    assembly: &AssemblyRewriteContext,
) -> Result<TypeSpecifics> {
    match context.type_specifics()? {
        TypeSpecifics::NotComputed => {}
        TypeSpecifics::Computing => return Ok(TypeSpecifics::NonBlittableStruct),
        computed => return Ok(computed),
    }

    context.set_type_specifics(TypeSpecifics::Computing)?;

    let mut result = TypeSpecifics::BlittableStruct;
    for (_, field) in context.original_type().fields.iter() {
        if field.is_static() {
            continue;
        }

        if !is_blittable(&field.signature, assembly)? {
            tracing::trace!(
                "{} is not blittable because of field {}",
                context.original_type().fullname(),
                field.name
            );
            result = TypeSpecifics::NonBlittableStruct;
            break;
        }
    }

    context.set_type_specifics(result)?;
    Ok(result)
}

fn is_blittable(signature: &TypeSignature, assembly: &AssemblyRewriteContext) -> Result<bool> {
    if let Some(kind) = signature.primitive_kind() {
        return Ok(kind.is_primitive());
    }

    match signature {
        TypeSignature::Ptr(_) => Ok(true),
        TypeSignature::Type(reference) => {
            let Some(definition) = reference.upgrade() else {
                return Ok(false);
            };

            if definition.is_enum() {
                return Ok(true);
            }
            if !definition.is_value_type() {
                return Ok(false);
            }

            match assembly.try_get_context_for_original_type(&definition) {
                Some(sibling) => {
                    Ok(resolve(&sibling, assembly)? == TypeSpecifics::BlittableStruct)
                }
                None => Ok(definition.is_primitive()),
            }
        }
        _ => Ok(false),
    }
}
