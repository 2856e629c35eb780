//! Strong pointers to reference-counted native objects.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// A counted strong reference to a native object.
///
/// Cloning increments the object's reference count and dropping decrements
/// it; the object is destroyed when the last pointer goes away. Counting is
/// non-atomic: native objects and the scripting runtime share one thread.
pub struct SharedPtr<T: ?Sized>(Rc<T>);

impl<T> SharedPtr<T> {
    /// Allocate a new object with a reference count of one.
    pub fn new(value: T) -> Self {
        SharedPtr(Rc::new(value))
    }
}

impl<T: ?Sized> SharedPtr<T> {
    /// Adopt an existing `Rc`.
    pub fn from_rc(rc: Rc<T>) -> Self {
        SharedPtr(rc)
    }

    /// Borrow the underlying `Rc`.
    pub fn as_rc(this: &Self) -> &Rc<T> {
        &this.0
    }

    /// Unwrap into the underlying `Rc` without touching the count.
    pub fn into_rc(this: Self) -> Rc<T> {
        this.0
    }

    /// Current number of strong references.
    pub fn refs(this: &Self) -> usize {
        Rc::strong_count(&this.0)
    }

    /// True if both pointers refer to the same object.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: ?Sized> Clone for SharedPtr<T> {
    fn clone(&self) -> Self {
        SharedPtr(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> Deref for SharedPtr<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> From<Rc<T>> for SharedPtr<T> {
    fn from(rc: Rc<T>) -> Self {
        SharedPtr(rc)
    }
}

impl<T: ?Sized> fmt::Debug for SharedPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedPtr")
            .field("refs", &Rc::strong_count(&self.0))
            .finish_non_exhaustive()
    }
}

/// A strong pointer the native API exposes as read-only.
///
/// Pushing a `ConstPtr` into the scripting runtime produces a handle that
/// refuses mutable access.
pub struct ConstPtr<T: ?Sized>(pub SharedPtr<T>);

impl<T: ?Sized> ConstPtr<T> {
    /// Wrap a strong pointer as read-only.
    pub fn new(ptr: SharedPtr<T>) -> Self {
        ConstPtr(ptr)
    }

    /// Unwrap the strong pointer.
    pub fn into_inner(self) -> SharedPtr<T> {
        self.0
    }
}

impl<T: ?Sized> Clone for ConstPtr<T> {
    fn clone(&self) -> Self {
        ConstPtr(self.0.clone())
    }
}

impl<T: ?Sized> Deref for ConstPtr<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> fmt::Debug for ConstPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConstPtr").field(&self.0).finish()
    }
}
