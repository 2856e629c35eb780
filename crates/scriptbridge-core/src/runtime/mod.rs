//! Native function storage and execution context.
//!
//! ## Key Types
//!
//! - [`Dynamic`]: runtime value type for script slots
//! - [`NativeFn`]: type-erased callable wrapper for bound functions
//! - [`CallContext`]: bridge between the runtime and Rust for function calls
//! - [`ObjectHeap`]: generational arena of script handles

mod call_context;
mod dynamic;
mod native_fn;
mod object_heap;

pub use call_context::CallContext;
pub use dynamic::Dynamic;
pub use native_fn::{NativeCallable, NativeFn};
pub use object_heap::{ObjectHandle, ObjectHeap};
