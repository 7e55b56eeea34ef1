//! Error types for serialization
//!
//! Every fallible step of the pipeline (collection access, builder
//! allocation, filling, finishing, cell construction) returns a
//! [`SerializationResult`]. Errors are classified by [`ErrorKind`] so callers
//! can match on the class without parsing messages.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use arrow::error::ArrowError;
use thiserror::Error;

/// Result type alias for serialization operations
pub type SerializationResult<T> = std::result::Result<T, SerializationError>;

/// Broad grouping of error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The caller handed in something malformed (null buffers, shape mismatches)
    InputValidation,
    /// Memory pool exhaustion or allocation failures reported by arrow
    Allocation,
    /// Internal inconsistencies and unsupported runtime tags
    Logic,
}

/// Classification of a [`SerializationError`]
///
/// The numeric codes are stable and may be forwarded across process
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required buffer was null
    UnexpectedNullArgument,
    /// Declared and actual element counts disagree
    SizeMismatch,
    /// The memory pool or the columnar library refused an allocation
    AllocationFailed,
    /// A runtime element-kind tag outside the supported set
    UnsupportedElementKind,
    /// A finished array does not match its declared datatype
    DatatypeMismatch,
    /// Any other failure reported by the columnar library
    ArrowFailure,
}

impl ErrorKind {
    /// Stable numeric code
    pub fn code(&self) -> u32 {
        match self {
            ErrorKind::UnexpectedNullArgument => 1,
            ErrorKind::SizeMismatch => 2,
            ErrorKind::AllocationFailed => 3,
            ErrorKind::UnsupportedElementKind => 4,
            ErrorKind::DatatypeMismatch => 5,
            ErrorKind::ArrowFailure => 6,
        }
    }

    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::UnexpectedNullArgument => "unexpected_null_argument",
            ErrorKind::SizeMismatch => "size_mismatch",
            ErrorKind::AllocationFailed => "allocation_failed",
            ErrorKind::UnsupportedElementKind => "unsupported_element_kind",
            ErrorKind::DatatypeMismatch => "datatype_mismatch",
            ErrorKind::ArrowFailure => "arrow_failure",
        }
    }

    /// Which part of the taxonomy this kind belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::UnexpectedNullArgument | ErrorKind::SizeMismatch => {
                ErrorCategory::InputValidation
            }
            ErrorKind::AllocationFailed => ErrorCategory::Allocation,
            ErrorKind::UnsupportedElementKind
            | ErrorKind::DatatypeMismatch
            | ErrorKind::ArrowFailure => ErrorCategory::Logic,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error types for the serialization pipeline
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationError {
    /// A buffer required by a codec was null
    #[error("Unexpected null argument: {0}")]
    UnexpectedNullArgument(String),

    /// Element counts disagree (tensor shape vs buffer, fixed-arity fills)
    #[error("Size mismatch in {context}: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Count implied by the declaration (shape product, list size, ...)
        expected: usize,
        /// Count actually supplied
        actual: usize,
        /// What was being serialized
        context: String,
    },

    /// The memory pool refused a reservation
    #[error("Allocation failed in pool '{pool}': requested {requested} bytes, {available} available")]
    AllocationFailed {
        /// Name of the refusing pool
        pool: String,
        /// Bytes requested by the builder
        requested: usize,
        /// Bytes still available in the pool
        available: usize,
    },

    /// The columnar library reported an allocation failure
    #[error("External allocation failure: {0}")]
    ExternalAllocation(String),

    /// A runtime element-kind tag is not one of the supported kinds
    #[error("Unsupported element kind: {0}")]
    UnsupportedElementKind(String),

    /// A finished array's datatype differs from the declared one
    #[error("Datatype mismatch for {context}: expected {expected}, got {actual}")]
    DatatypeMismatch {
        /// Declared datatype
        expected: String,
        /// Datatype of the finished array
        actual: String,
        /// Loggable or cell name
        context: String,
    },

    /// Any other error reported by arrow
    #[error("Arrow error: {0}")]
    Arrow(String),
}

impl SerializationError {
    /// Create an unexpected-null-argument error
    pub fn unexpected_null(message: impl Into<String>) -> Self {
        SerializationError::UnexpectedNullArgument(message.into())
    }

    /// Create a size-mismatch error
    pub fn size_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        SerializationError::SizeMismatch {
            expected,
            actual,
            context: context.into(),
        }
    }

    /// Create an unsupported-element-kind error
    pub fn unsupported_element_kind(message: impl Into<String>) -> Self {
        SerializationError::UnsupportedElementKind(message.into())
    }

    /// Create a datatype-mismatch error
    pub fn datatype_mismatch(
        context: impl Into<String>,
        expected: &arrow::datatypes::DataType,
        actual: &arrow::datatypes::DataType,
    ) -> Self {
        SerializationError::DatatypeMismatch {
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
            context: context.into(),
        }
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SerializationError::UnexpectedNullArgument(_) => ErrorKind::UnexpectedNullArgument,
            SerializationError::SizeMismatch { .. } => ErrorKind::SizeMismatch,
            SerializationError::AllocationFailed { .. }
            | SerializationError::ExternalAllocation(_) => ErrorKind::AllocationFailed,
            SerializationError::UnsupportedElementKind(_) => ErrorKind::UnsupportedElementKind,
            SerializationError::DatatypeMismatch { .. } => ErrorKind::DatatypeMismatch,
            SerializationError::Arrow(_) => ErrorKind::ArrowFailure,
        }
    }

    /// Shorthand for `self.kind().category()`
    pub fn category(&self) -> ErrorCategory {
        self.kind().category()
    }
}

impl From<ArrowError> for SerializationError {
    fn from(e: ArrowError) -> Self {
        match e {
            ArrowError::MemoryError(msg) => SerializationError::ExternalAllocation(msg),
            other => SerializationError::Arrow(other.to_string()),
        }
    }
}
