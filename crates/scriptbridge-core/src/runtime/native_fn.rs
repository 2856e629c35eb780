//! Native function storage and callable trait.

use std::fmt;
use std::rc::Rc;

use crate::TypeHash;
use crate::error::NativeError;

use super::CallContext;

/// Type-erased native function.
///
/// Wraps any callable that implements [`NativeCallable`], so adapters of
/// different signatures can be stored uniformly. The callable is shared
/// through an `Rc` because bindings capture engine state (such as the engine
/// context) that lives on the runtime's thread.
pub struct NativeFn {
    /// Identity of this function (name and parameter types)
    pub id: TypeHash,
    inner: Rc<dyn NativeCallable>,
}

impl NativeFn {
    /// Create a new NativeFn from a callable with a specific ID.
    pub fn new<F>(id: TypeHash, f: F) -> Self
    where
        F: NativeCallable + 'static,
    {
        Self {
            id,
            inner: Rc::new(f),
        }
    }

    /// Create a NativeFn from a closure over the raw call context.
    pub fn from_fn<F>(id: TypeHash, f: F) -> Self
    where
        F: Fn(&mut CallContext<'_>) -> Result<(), NativeError> + 'static,
    {
        Self::new(id, f)
    }

    /// Call this native function with the given context.
    pub fn call(&self, ctx: &mut CallContext) -> Result<(), NativeError> {
        self.inner.call(ctx)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Clone for NativeFn {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Trait for callable native functions.
///
/// The `call` method receives a [`CallContext`] that provides access to
/// arguments and allows setting the return value.
pub trait NativeCallable {
    /// Call this function with the given context.
    fn call(&self, ctx: &mut CallContext) -> Result<(), NativeError>;
}

impl<F> NativeCallable for F
where
    F: Fn(&mut CallContext) -> Result<(), NativeError>,
{
    fn call(&self, ctx: &mut CallContext) -> Result<(), NativeError> {
        (self)(ctx)
    }
}
