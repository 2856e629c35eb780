//! Registry crate for scriptbridge.
//!
//! Holds what scripts can see: classes with their method, static function
//! and property tables, free functions and constants. Bindings are declared
//! with [`Module`] and [`ClassBuilder`] and installed into a
//! [`SymbolRegistry`], which also performs overload resolution.

mod entries;
mod module;
mod overload;
mod registry;
mod signature;

pub use entries::{ClassEntry, ConstantValue, FunctionEntry, PropertyEntry};
pub use module::{ClassBuilder, Module};
pub use overload::{OverloadError, TieBreak, accepts, resolve_overload};
pub use registry::{BaseChain, SymbolRegistry};
pub use signature::{IntoNativeFn, IntoNativeMethod, Receiver};
