//! Rewrite configuration
//!
//! This module provides the options that control how members of stripped types are named and
//! which bookkeeping members are emitted onto the rewritten types.

/// Configuration for a rewrite run.
///
/// `RewriteConfig` controls the naming of members whose original names are obfuscated and
/// whether every member context emits the static field caching its native info pointer.
///
/// # Examples
///
/// ```rust
/// use reforge::RewriteConfig;
///
/// // Rename obfuscated members, emit pointer fields
/// let config = RewriteConfig::default();
///
/// // Keep every original name
/// let config = RewriteConfig::passthrough();
///
/// // Treat every non-ASCII identifier as obfuscated
/// let config = RewriteConfig::strict();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Replace obfuscated field and method names with generated, signature-derived names
    pub rename_obfuscated_members: bool,

    /// Accept non-ASCII letters in identifiers instead of treating them as obfuscation
    pub allow_non_ascii_names: bool,

    /// Emit a `NativeFieldInfoPtr_*` / `NativeMethodInfoPtr_*` static field per member context
    pub emit_native_pointer_fields: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            rename_obfuscated_members: true,
            allow_non_ascii_names: true,
            emit_native_pointer_fields: true,
        }
    }
}

impl RewriteConfig {
    /// Keep original member names and only record member correlation
    ///
    /// No bookkeeping members are added to the rewritten types.
    #[must_use]
    pub fn passthrough() -> Self {
        Self {
            rename_obfuscated_members: false,
            allow_non_ascii_names: true,
            emit_native_pointer_fields: false,
        }
    }

    /// Only plain ASCII identifiers survive; everything else is renamed
    #[must_use]
    pub fn strict() -> Self {
        Self {
            rename_obfuscated_members: true,
            allow_non_ascii_names: false,
            emit_native_pointer_fields: true,
        }
    }
}
