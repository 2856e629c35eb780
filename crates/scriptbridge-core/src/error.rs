//! Error types for value conversion, native calls and registration.

use thiserror::Error;

/// Errors that can occur when converting between Rust and script values.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Type mismatch during conversion
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// The "no value" representation was passed to a non-nullable parameter
    #[error("nil cannot be converted to {target_type}")]
    NullHandle { target_type: &'static str },

    /// Integer overflow during conversion
    #[error("integer overflow: value {value} does not fit in {target_type}")]
    IntegerOverflow { value: i64, target_type: &'static str },

    /// Handle refers to a heap slot that has already been collected
    #[error("stale object handle: slot {index} has been collected")]
    StaleHandle { index: u32 },

    /// A read-only handle was passed where write access is required
    #[error("read-only handle cannot be converted to a mutable {target_type}")]
    ReadOnly { target_type: &'static str },
}

/// Errors that can occur during native function execution.
#[derive(Debug, Error)]
pub enum NativeError {
    /// Error converting arguments or return values
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Invalid `this` reference for method call
    #[error("invalid 'this' reference: {message}")]
    InvalidThis { message: String },

    /// Write access requested through a read-only handle
    #[error("'this' is a read-only {type_name}")]
    ReadOnlyThis { type_name: &'static str },

    /// Argument index out of bounds
    #[error("argument index {index} out of bounds (function has {count} arguments)")]
    ArgumentIndexOutOfBounds { index: usize, count: usize },

    /// Generic native error
    #[error("native error: {message}")]
    Other { message: String },
}

impl NativeError {
    /// Create an "invalid this" error with a message.
    pub fn invalid_this(message: impl Into<String>) -> Self {
        NativeError::InvalidThis {
            message: message.into(),
        }
    }

    /// Create a generic native error.
    pub fn other(message: impl Into<String>) -> Self {
        NativeError::Other {
            message: message.into(),
        }
    }
}

/// Errors raised while installing classes, functions and constants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// A class with the same name is already registered
    #[error("type '{name}' is already registered")]
    DuplicateType { name: String },

    /// The declared base class has not been registered yet
    #[error("type '{name}' derives from unregistered base '{base}'")]
    UnknownBaseType { name: String, base: String },

    /// A constant with the same name is already registered
    #[error("constant '{name}' is already registered")]
    DuplicateConstant { name: String },

    /// A property with the same name already exists on the class
    #[error("property '{property}' is already registered on '{class}'")]
    DuplicateProperty { class: String, property: String },
}
