//! Call context bridging the scripting runtime and native Rust functions.

use std::any::Any;
use std::fmt;

use crate::convert::{FromDynamic, IntoDynamic};
use crate::error::NativeError;
use crate::{ObjectWrapper, TypeIdentity};

use super::{Dynamic, ObjectHeap};

/// Context for native function calls.
///
/// Provides access to function arguments, the receiver of a method call and
/// the return slot.
///
/// ```ignore
/// let near: f32 = ctx.arg(0)?;
/// let camera: &Camera = ctx.this()?;
/// ctx.set_return(camera.near_clip());
/// ```
pub struct CallContext<'vm> {
    /// Argument slots (slot 0 is `this` for methods)
    slots: &'vm mut [Dynamic],
    /// Index of first argument (0 for functions, 1 for methods)
    arg_offset: usize,
    /// Return value slot
    return_slot: &'vm mut Dynamic,
    /// Object heap for handle access and allocation of returned objects
    heap: &'vm mut ObjectHeap,
}

impl<'vm> CallContext<'vm> {
    /// Create a new call context.
    pub fn new(
        slots: &'vm mut [Dynamic],
        arg_offset: usize,
        return_slot: &'vm mut Dynamic,
        heap: &'vm mut ObjectHeap,
    ) -> Self {
        Self {
            slots,
            arg_offset,
            return_slot,
            heap,
        }
    }

    /// Get the number of arguments (excluding `this` for methods).
    pub fn arg_count(&self) -> usize {
        self.slots.len().saturating_sub(self.arg_offset)
    }

    /// Get a raw reference to an argument slot.
    pub fn arg_slot(&self, index: usize) -> Result<&Dynamic, NativeError> {
        let slot_index = self.arg_offset + index;
        self.slots
            .get(slot_index)
            .ok_or(NativeError::ArgumentIndexOutOfBounds {
                index,
                count: self.arg_count(),
            })
    }

    /// Get a typed argument value.
    pub fn arg<T: FromDynamic>(&self, index: usize) -> Result<T, NativeError> {
        let slot = self.arg_slot(index)?;
        T::from_dynamic(slot, self.heap).map_err(NativeError::Conversion)
    }

    /// Set the return value from a raw slot.
    pub fn set_return_slot(&mut self, slot: Dynamic) {
        *self.return_slot = slot;
    }

    /// Set a typed return value.
    ///
    /// Returned native objects are bridged into new handles here.
    pub fn set_return<T: IntoDynamic>(&mut self, value: T) {
        *self.return_slot = value.into_dynamic(self.heap);
    }

    fn this_wrapper(&self) -> Result<&dyn ObjectWrapper, NativeError> {
        if self.arg_offset == 0 {
            return Err(NativeError::invalid_this("not a method call"));
        }
        match self.slots.first() {
            Some(Dynamic::Object(handle)) => self.heap.get(*handle).ok_or_else(|| {
                NativeError::invalid_this(format!(
                    "stale handle {}:{}",
                    handle.index, handle.generation
                ))
            }),
            Some(other) => Err(NativeError::invalid_this(format!(
                "expected object, got {}",
                other.type_name()
            ))),
            None => Err(NativeError::invalid_this("no slots available")),
        }
    }

    /// Read-only access to the receiver of a method call.
    pub fn this<T: Any>(&self) -> Result<&T, NativeError> {
        self.this_wrapper()?
            .cget()
            .downcast_ref::<T>()
            .ok_or_else(|| {
                NativeError::invalid_this(format!(
                    "type mismatch: expected {}",
                    std::any::type_name::<T>()
                ))
            })
    }

    /// Write access to the receiver of a method call.
    ///
    /// Fails with [`NativeError::ReadOnlyThis`] for read-only handles.
    pub fn this_for_write<T: Any>(&self) -> Result<&T, NativeError> {
        let wrapper = self.this_wrapper()?;
        let Some(object) = wrapper.get() else {
            return Err(NativeError::ReadOnlyThis {
                type_name: wrapper.resolve_type().name,
            });
        };
        object.downcast_ref::<T>().ok_or_else(|| {
            NativeError::invalid_this(format!(
                "type mismatch: expected {}",
                std::any::type_name::<T>()
            ))
        })
    }

    /// Resolved identity of the receiver.
    pub fn this_identity(&self) -> Result<TypeIdentity, NativeError> {
        Ok(self.this_wrapper()?.resolve_type())
    }

    /// Get access to the object heap.
    pub fn heap(&self) -> &ObjectHeap {
        self.heap
    }

    /// Get mutable access to the object heap.
    pub fn heap_mut(&mut self) -> &mut ObjectHeap {
        self.heap
    }
}

impl fmt::Debug for CallContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("arg_count", &self.arg_count())
            .field("arg_offset", &self.arg_offset)
            .finish()
    }
}
