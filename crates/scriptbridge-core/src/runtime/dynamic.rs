//! Runtime value type for script slots.

use std::any::Any;
use std::fmt;

use super::ObjectHandle;

/// A dynamic value as seen by the scripting runtime.
///
/// Native objects never appear here directly: they cross into the runtime as
/// an [`ObjectHandle`] to a heap slot owning a bridge wrapper. A null native
/// pointer becomes [`Dynamic::Null`], never a handle.
///
/// `Dynamic` does not implement `Clone` because `Native` values may not be
/// cloneable; use [`Dynamic::clone_if_possible`].
pub enum Dynamic {
    /// No return value
    Void,
    /// The runtime's "no value" representation
    Null,
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// String value (owned, byte-exact)
    String(String),
    /// Handle to a bridged native object
    Object(ObjectHandle),
    /// Inline native value (math types, byte buffers)
    Native(Box<dyn Any + Send + Sync>),
}

impl Dynamic {
    /// Get a human-readable name for this value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Void => "void",
            Dynamic::Null => "nil",
            Dynamic::Int(_) => "int",
            Dynamic::Float(_) => "number",
            Dynamic::Bool(_) => "bool",
            Dynamic::String(_) => "string",
            Dynamic::Object(_) => "object",
            Dynamic::Native(_) => "native",
        }
    }

    /// Check if this value is void.
    pub fn is_void(&self) -> bool {
        matches!(self, Dynamic::Void)
    }

    /// Check if this value is the "no value" representation.
    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    /// The object handle, if this value is one.
    pub fn as_object(&self) -> Option<ObjectHandle> {
        match self {
            Dynamic::Object(handle) => Some(*handle),
            _ => None,
        }
    }

    /// Downcast an inline native value.
    pub fn as_native<T: Any>(&self) -> Option<&T> {
        match self {
            Dynamic::Native(boxed) => boxed.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Clone the value if it doesn't contain a Native value.
    ///
    /// Cloning an `Object` copies the handle without touching any count.
    pub fn clone_if_possible(&self) -> Option<Self> {
        match self {
            Dynamic::Void => Some(Dynamic::Void),
            Dynamic::Null => Some(Dynamic::Null),
            Dynamic::Int(v) => Some(Dynamic::Int(*v)),
            Dynamic::Float(v) => Some(Dynamic::Float(*v)),
            Dynamic::Bool(v) => Some(Dynamic::Bool(*v)),
            Dynamic::String(s) => Some(Dynamic::String(s.clone())),
            Dynamic::Object(h) => Some(Dynamic::Object(*h)),
            Dynamic::Native(_) => None,
        }
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Void => write!(f, "Void"),
            Dynamic::Null => write!(f, "Null"),
            Dynamic::Int(v) => write!(f, "Int({})", v),
            Dynamic::Float(v) => write!(f, "Float({})", v),
            Dynamic::Bool(v) => write!(f, "Bool({})", v),
            Dynamic::String(s) => write!(f, "String({:?})", s),
            Dynamic::Object(h) => write!(f, "Object({:?})", h),
            Dynamic::Native(_) => write!(f, "Native(...)"),
        }
    }
}

impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Dynamic::Void, Dynamic::Void) => true,
            (Dynamic::Null, Dynamic::Null) => true,
            (Dynamic::Int(a), Dynamic::Int(b)) => a == b,
            (Dynamic::Float(a), Dynamic::Float(b)) => a == b,
            (Dynamic::Bool(a), Dynamic::Bool(b)) => a == b,
            (Dynamic::String(a), Dynamic::String(b)) => a == b,
            (Dynamic::Object(a), Dynamic::Object(b)) => a == b,
            // Native values can't be compared for equality
            _ => false,
        }
    }
}
