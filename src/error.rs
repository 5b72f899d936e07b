use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every operation of the rewrite core and of the native layout views is a pure in-memory
/// transformation, so the failure modes fall into three groups: the caller violated the
/// calling protocol (wrong order, duplicate processing, missing inputs), the input metadata
/// is malformed or unexpected, or raw memory access was rejected. None of them is retried;
/// the run is expected to abort.
///
/// # Error Categories
///
/// ## Input Errors
/// - [`Error::Malformed`] - Input metadata has an unexpected shape
/// - [`Error::MissingArgument`] - A required input was absent
/// - [`Error::NotSupported`] - Unsupported runtime version or feature
///
/// ## Lookup Errors
/// - [`Error::TypeNotFound`] - No rewrite context exists for a type token
/// - [`Error::FieldNotFound`] - No field context exists for an original field
/// - [`Error::MethodNotFound`] - No method context exists for an original method
/// - [`Error::ImportNotFound`] - A required import could not be resolved
///
/// ## Protocol Errors
/// - [`Error::InvalidPhase`] - Operation called in the wrong rewrite phase
/// - [`Error::MembersAlreadyAdded`] - `add_members` called twice on one context
/// - [`Error::DuplicateType`] - A second context for the same original type
///
/// ## Native Memory Errors
/// - [`Error::OutOfBounds`] - Accessor would read or write past the view
/// - [`Error::AllocationFailed`] - Descriptor block could not be allocated
///
/// # Examples
///
/// ```rust
/// use reforge::{Error, metadata::token::Token};
///
/// let err = Error::FieldNotFound(Token::new(0x0400_0001));
/// match err {
///     Error::FieldNotFound(token) => assert_eq!(token.row(), 1),
///     other => panic!("unexpected error: {other}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // Input errors
    /// The input metadata is damaged or has an unexpected shape.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A required input was absent.
    ///
    /// Raised when a rewrite context is constructed while its owning assembly context has
    /// already been dropped, or with a target type that is not freshly created.
    /// The associated value names the missing input.
    #[error("Required argument is missing or invalid - {0}")]
    MissingArgument(&'static str),

    /// This runtime version or feature is not supported.
    #[error("This runtime version or feature is not supported")]
    NotSupported,

    // Lookup errors
    /// No rewrite context exists for the given original type token.
    #[error("Failed to find type rewrite context - {0}")]
    TypeNotFound(Token),

    /// No field rewrite context exists for the given original field token.
    ///
    /// Either `add_members` has not run yet, or the declaring type never receives field
    /// contexts (enums, non-default rewrite semantics).
    #[error("Failed to find field rewrite context - {0}")]
    FieldNotFound(Token),

    /// No method rewrite context exists for the given original method token.
    #[error("Failed to find method rewrite context - {0}")]
    MethodNotFound(Token),

    /// A reference required from the imports collaborator could not be resolved.
    ///
    /// The associated value is the full name of the missing import.
    #[error("Failed to resolve import - {0}")]
    ImportNotFound(String),

    // Protocol errors
    /// The operation is not allowed in the current rewrite phase.
    ///
    /// Type contexts must all be created before any of them receives members, and no
    /// type context can be created once member registration started.
    #[error("Operation not allowed in the current rewrite phase - {0}")]
    InvalidPhase(String),

    /// `add_members` was called a second time on the same type context.
    #[error("Members were already added to type context - {0}")]
    MembersAlreadyAdded(Token),

    /// A rewrite context already exists for this original type.
    #[error("A rewrite context already exists for type - {0}")]
    DuplicateType(Token),

    // Native memory errors
    /// An out of bound access was attempted on a native view.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// Allocating a native descriptor block failed.
    ///
    /// The associated value is the requested size in bytes.
    #[error("Failed to allocate native block of {0} bytes")]
    AllocationFailed(usize),

    /// Failed to lock target.
    #[error("Failed to lock target")]
    LockError,
}
