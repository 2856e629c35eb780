//! Type identity for bound native types.
//!
//! Every type exposed to scripts implements [`ScriptType`], which gives its
//! statically declared identity. Reference-counted native objects additionally
//! implement [`Bridged`], whose [`Bridged::dynamic_type`] capability reports
//! the runtime (most-derived) type for polymorphic objects.
//!
//! # Example
//!
//! ```
//! use scriptbridge_core::{bridged, Bridged, ScriptType, TypeHash};
//!
//! pub struct RenderPath;
//! bridged!(RenderPath, "RenderPath");
//!
//! assert_eq!(RenderPath::type_hash(), TypeHash::from_name("RenderPath"));
//! assert!(RenderPath.dynamic_type().is_none());
//! ```

use std::any::Any;
use std::rc::Rc;

use crate::TypeHash;

/// Key used to select the method/property table for a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeIdentity {
    /// Hash of the registered type name
    pub hash: TypeHash,
    /// Registered type name
    pub name: &'static str,
}

impl TypeIdentity {
    /// Create an identity from a registered type name.
    pub fn new(name: &'static str) -> Self {
        Self {
            hash: TypeHash::from_name(name),
            name,
        }
    }
}

/// Statically declared script identity of a type.
///
/// Implemented for concrete types and for trait objects such as
/// `dyn Object` that stand for a base class at a binding call site.
pub trait ScriptType: 'static {
    /// Get the type hash for this type.
    fn type_hash() -> TypeHash;

    /// Get the script-visible type name.
    fn type_name() -> &'static str;

    /// Get both as an identity token.
    fn identity() -> TypeIdentity {
        TypeIdentity {
            hash: Self::type_hash(),
            name: Self::type_name(),
        }
    }
}

/// A native object that can cross into the scripting runtime.
///
/// This trait is object safe so that base-typed pointers (`SharedPtr<dyn Base>`)
/// can be bridged and later resolved to their concrete type.
pub trait Bridged: 'static {
    /// Observer reference to the concrete value.
    fn as_any(&self) -> &dyn Any;

    /// Convert a strong pointer into a type-erased strong pointer to the concrete value.
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;

    /// Runtime type identity, for objects that participate in polymorphism.
    ///
    /// Returns `None` for types without dynamic identity; the bridge then falls
    /// back to the statically declared [`ScriptType`].
    fn dynamic_type(&self) -> Option<TypeIdentity> {
        None
    }
}

/// Implement [`ScriptType`] and [`Bridged`] for a concrete type.
///
/// The `dynamic` form also reports the type as its runtime identity.
#[macro_export]
macro_rules! bridged {
    (@script_type $ty:ty, $name:literal) => {
        impl $crate::ScriptType for $ty {
            fn type_hash() -> $crate::TypeHash {
                $crate::TypeHash::from_name($name)
            }

            fn type_name() -> &'static str {
                $name
            }
        }
    };
    ($ty:ty, $name:literal) => {
        $crate::bridged!(@script_type $ty, $name);

        impl $crate::Bridged for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::rc::Rc<Self>) -> ::std::rc::Rc<dyn ::std::any::Any> {
                self
            }
        }
    };
    ($ty:ty, $name:literal, dynamic) => {
        $crate::bridged!(@script_type $ty, $name);

        impl $crate::Bridged for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(self: ::std::rc::Rc<Self>) -> ::std::rc::Rc<dyn ::std::any::Any> {
                self
            }

            fn dynamic_type(&self) -> Option<$crate::TypeIdentity> {
                Some(<$ty as $crate::ScriptType>::identity())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    bridged!(Plain, "Plain");

    struct Polymorphic;
    bridged!(Polymorphic, "Polymorphic", dynamic);

    #[test]
    fn static_identity() {
        assert_eq!(Plain::type_name(), "Plain");
        assert_eq!(Plain::identity(), TypeIdentity::new("Plain"));
    }

    #[test]
    fn plain_types_have_no_dynamic_identity() {
        assert!(Plain.dynamic_type().is_none());
    }

    #[test]
    fn dynamic_types_report_themselves() {
        assert_eq!(
            Polymorphic.dynamic_type(),
            Some(TypeIdentity::new("Polymorphic"))
        );
    }

    #[test]
    fn into_any_preserves_concrete_type() {
        let rc: Rc<Polymorphic> = Rc::new(Polymorphic);
        let any = rc.into_any();
        assert!(any.downcast::<Polymorphic>().is_ok());
    }
}
