//! Core types for the scriptbridge binding layer.
//!
//! This crate provides the pieces every other scriptbridge crate builds on:
//!
//! - [`TypeHash`] / [`TypeIdentity`]: deterministic identities for types and functions
//! - [`SharedPtr`] / [`ConstPtr`]: counted strong pointers to native objects
//! - [`SharedPtrWrapper`]: the ownership bridge stored in each script handle
//! - [`Dynamic`], [`ObjectHeap`], [`CallContext`], [`NativeFn`]: the runtime value model
//! - [`FromDynamic`] / [`IntoDynamic`]: argument and return value marshalling

pub mod convert;
pub mod error;
pub mod runtime;
mod script_type;
mod shared_ptr;
mod type_hash;
mod wrapper;

pub use convert::{FromDynamic, IntoDynamic, ParamKind};
pub use error::{ConversionError, NativeError, RegistrationError};
pub use runtime::{CallContext, Dynamic, NativeCallable, NativeFn, ObjectHandle, ObjectHeap};
pub use script_type::{Bridged, ScriptType, TypeIdentity};
pub use shared_ptr::{ConstPtr, SharedPtr};
pub use type_hash::{TypeHash, hash_constants, primitives};
pub use wrapper::{ObjectWrapper, SharedPtrWrapper};
