//! Common base of engine classes.

use std::rc::Rc;

use scriptbridge_core::{Bridged, ScriptType, SharedPtr, TypeHash, TypeIdentity};

/// Base of every engine class that carries a runtime type.
pub trait Object: Bridged {
    /// Identity of the most-derived class.
    fn object_type(&self) -> TypeIdentity {
        self.dynamic_type()
            .unwrap_or_else(<dyn Object as ScriptType>::identity)
    }
}

impl ScriptType for dyn Object {
    fn type_hash() -> TypeHash {
        TypeHash::from_name("Object")
    }

    fn type_name() -> &'static str {
        "Object"
    }
}

/// View a concrete object pointer through its base.
pub fn into_object<T: Object>(ptr: SharedPtr<T>) -> SharedPtr<dyn Object> {
    let rc: Rc<dyn Object> = SharedPtr::<T>::into_rc(ptr);
    SharedPtr::from_rc(rc)
}

/// Recover the concrete pointer from a base pointer.
pub fn downcast<T: Object>(ptr: SharedPtr<dyn Object>) -> Option<SharedPtr<T>> {
    SharedPtr::<dyn Object>::into_rc(ptr)
        .into_any()
        .downcast::<T>()
        .ok()
        .map(SharedPtr::from_rc)
}
