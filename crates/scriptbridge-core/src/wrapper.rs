//! Ownership bridge between counted native objects and script handles.
//!
//! A [`SharedPtrWrapper`] is the payload of one heap slot in the scripting
//! runtime. It takes one strong reference when it is constructed and gives
//! it back when the slot is collected; script-side aliases of the same handle
//! are counted by the [`ObjectHeap`](crate::ObjectHeap), never by the native
//! object.

use std::any::Any;
use std::rc::Rc;

use crate::{Bridged, ScriptType, SharedPtr, TypeIdentity};

/// Type-erased view of a bridged native object held by a heap slot.
pub trait ObjectWrapper {
    /// Identity used to look up the method/property table.
    fn resolve_type(&self) -> TypeIdentity;

    /// Mutable access; `None` when the handle was created read-only.
    fn get(&self) -> Option<&dyn Any>;

    /// Read-only observer access, always available.
    fn cget(&self) -> &dyn Any;

    /// A new strong reference for passing the object back to native code.
    ///
    /// `None` when the handle was created read-only.
    fn shared(&self) -> Option<Rc<dyn Any>>;

    /// A new strong reference for read-only native parameters.
    fn cshared(&self) -> Rc<dyn Any>;

    /// Whether the handle refuses mutable access.
    fn is_read_only(&self) -> bool;
}

/// Holds one strong reference to a native object for the lifetime of a handle.
///
/// `T` is the statically declared type at the binding call site; it may be a
/// base trait object such as `dyn Object`.
pub struct SharedPtrWrapper<T: ?Sized + Bridged + ScriptType> {
    object: SharedPtr<T>,
    read_only: bool,
}

impl<T: ?Sized + Bridged + ScriptType> SharedPtrWrapper<T> {
    /// Take a strong reference with full access.
    pub fn new(object: SharedPtr<T>) -> Self {
        Self {
            object,
            read_only: false,
        }
    }

    /// Take a strong reference that refuses mutable access.
    pub fn new_const(object: SharedPtr<T>) -> Self {
        Self {
            object,
            read_only: true,
        }
    }

    /// The held pointer.
    pub fn object(&self) -> &SharedPtr<T> {
        &self.object
    }
}

impl<T: ?Sized + Bridged + ScriptType> ObjectWrapper for SharedPtrWrapper<T> {
    fn resolve_type(&self) -> TypeIdentity {
        self.object.dynamic_type().unwrap_or_else(T::identity)
    }

    fn get(&self) -> Option<&dyn Any> {
        if self.read_only {
            return None;
        }
        Some(self.object.as_any())
    }

    fn cget(&self) -> &dyn Any {
        self.object.as_any()
    }

    fn shared(&self) -> Option<Rc<dyn Any>> {
        if self.read_only {
            return None;
        }
        Some(self.cshared())
    }

    fn cshared(&self) -> Rc<dyn Any> {
        Rc::clone(SharedPtr::as_rc(&self.object)).into_any()
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}

impl<T: ?Sized + Bridged + ScriptType> Drop for SharedPtrWrapper<T> {
    fn drop(&mut self) {
        log::trace!(
            "releasing {} (refs before release: {})",
            T::type_name(),
            SharedPtr::refs(&self.object)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridged;

    trait Shape: Bridged {
        fn sides(&self) -> u32;
    }

    impl ScriptType for dyn Shape {
        fn type_hash() -> crate::TypeHash {
            crate::TypeHash::from_name("Shape")
        }

        fn type_name() -> &'static str {
            "Shape"
        }
    }

    struct Square;
    bridged!(Square, "Square", dynamic);

    impl Shape for Square {
        fn sides(&self) -> u32 {
            4
        }
    }

    struct Blob;
    bridged!(Blob, "Blob");

    impl Shape for Blob {
        fn sides(&self) -> u32 {
            0
        }
    }

    fn as_shape<S: Shape>(ptr: SharedPtr<S>) -> SharedPtr<dyn Shape> {
        SharedPtr::from_rc(SharedPtr::into_rc(ptr) as Rc<dyn Shape>)
    }

    #[test]
    fn construct_and_destruct_adjust_refs_once() {
        let square = SharedPtr::new(Square);
        let wrapper = SharedPtrWrapper::new(square.clone());
        assert_eq!(SharedPtr::refs(&square), 2);
        drop(wrapper);
        assert_eq!(SharedPtr::refs(&square), 1);
    }

    #[test]
    fn base_call_site_resolves_to_derived_type() {
        let base = as_shape(SharedPtr::new(Square));
        assert_eq!(base.sides(), 4);
        let wrapper = SharedPtrWrapper::new(base);
        assert_eq!(wrapper.resolve_type().name, "Square");
    }

    #[test]
    fn non_polymorphic_falls_back_to_static_type() {
        let wrapper = SharedPtrWrapper::new(as_shape(SharedPtr::new(Blob)));
        assert_eq!(wrapper.resolve_type().name, "Shape");
    }

    #[test]
    fn const_wrapper_refuses_mutable_access() {
        let wrapper = SharedPtrWrapper::new_const(SharedPtr::new(Square));
        assert!(wrapper.get().is_none());
        assert!(wrapper.shared().is_none());
        assert!(wrapper.cget().downcast_ref::<Square>().is_some());
        assert!(wrapper.cshared().downcast::<Square>().is_ok());
    }

    #[test]
    fn shared_downcasts_through_base_pointer() {
        let wrapper = SharedPtrWrapper::new(as_shape(SharedPtr::new(Square)));
        let any = wrapper.shared().unwrap();
        assert!(any.downcast::<Square>().is_ok());
    }
}
