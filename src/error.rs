//! Dispatch errors surfaced by [`ScriptState`](crate::ScriptState).

use thiserror::Error;

use scriptbridge_core::{ConversionError, NativeError, RegistrationError};
use scriptbridge_registry::OverloadError;

/// Result alias for runtime operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Why a call, property access or installation failed.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// No class is registered under the name
    #[error("unknown type '{0}'")]
    UnknownType(String),

    /// No free function is registered under the name
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// Neither the class nor any of its bases has the method
    #[error("type '{type_name}' has no method '{method}'")]
    UnknownMethod {
        type_name: &'static str,
        method: String,
    },

    /// Neither the class nor any of its bases has the property
    #[error("type '{type_name}' has no property '{property}'")]
    UnknownProperty {
        type_name: &'static str,
        property: String,
    },

    /// The property has no setter
    #[error("property '{property}' of '{type_name}' is read-only")]
    ReadOnlyProperty {
        type_name: &'static str,
        property: String,
    },

    /// No global is set under the name
    #[error("unknown global '{0}'")]
    UnknownGlobal(String),

    /// A method or property was used on something that is not an object
    #[error("expected an object, got {actual}")]
    NotAnObject { actual: &'static str },

    /// The handle's slot has been collected
    #[error("stale handle {index}:{generation}")]
    StaleHandle { index: u32, generation: u32 },

    /// Overload resolution failed
    #[error(transparent)]
    Overload(#[from] OverloadError),

    /// The native side of a call failed
    #[error(transparent)]
    Native(#[from] NativeError),

    /// A value could not be converted to the requested type
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A module could not be installed
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}
