//! Conversion traits for argument extraction and return value handling.
//!
//! - [`FromDynamic`]: extract a Rust value from a [`Dynamic`], and describe
//!   what the parameter accepts ([`ParamKind`]) so overloads can be matched
//! - [`IntoDynamic`]: convert a Rust value into a [`Dynamic`], bridging
//!   native objects into new heap handles
//!
//! Strings are marshalled byte-exact: length is preserved and interior NULs
//! survive the round trip.

use std::any::TypeId;

use crate::error::ConversionError;
use crate::runtime::{Dynamic, ObjectHeap};
use crate::{Bridged, ConstPtr, ScriptType, SharedPtr, SharedPtrWrapper, TypeHash, primitives};

/// What a parameter position accepts, used for overload matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// Integer values only
    Int,
    /// Integer or floating point values
    Number,
    /// Boolean values
    Bool,
    /// String values
    String,
    /// Handle to an object of the given type or a type derived from it
    Object {
        /// Declared parameter type
        type_hash: TypeHash,
        /// Declared parameter type name, for diagnostics
        name: &'static str,
    },
    /// Inline native value of exactly this Rust type
    Value {
        /// Rust type of the value
        type_id: TypeId,
        /// Script-visible name, for diagnostics
        name: &'static str,
    },
    /// The inner kind, or the "no value" representation
    Optional(Box<ParamKind>),
    /// Any value
    Any,
}

impl ParamKind {
    /// Hash used when computing function identities.
    pub fn type_hash(&self) -> TypeHash {
        match self {
            ParamKind::Int => *primitives::INT,
            ParamKind::Number => *primitives::NUMBER,
            ParamKind::Bool => *primitives::BOOL,
            ParamKind::String => *primitives::STRING,
            ParamKind::Object { type_hash, .. } => *type_hash,
            ParamKind::Value { name, .. } => TypeHash::from_name(name),
            ParamKind::Optional(inner) => TypeHash(inner.type_hash().0.rotate_left(1)),
            ParamKind::Any => TypeHash::from_name("?"),
        }
    }

    /// Script-visible name for diagnostics.
    pub fn name(&self) -> String {
        match self {
            ParamKind::Int => "int".into(),
            ParamKind::Number => "number".into(),
            ParamKind::Bool => "bool".into(),
            ParamKind::String => "string".into(),
            ParamKind::Object { name, .. } | ParamKind::Value { name, .. } => (*name).into(),
            ParamKind::Optional(inner) => format!("{}?", inner.name()),
            ParamKind::Any => "?".into(),
        }
    }
}

/// Extract a value from a Dynamic.
pub trait FromDynamic: Sized {
    /// What this parameter accepts.
    fn param_kind() -> ParamKind;

    /// Extract a value, resolving object handles through the heap.
    fn from_dynamic(value: &Dynamic, heap: &ObjectHeap) -> Result<Self, ConversionError>;
}

/// Convert a value into a Dynamic.
pub trait IntoDynamic {
    /// Convert, allocating a heap handle for bridged native objects.
    fn into_dynamic(self, heap: &mut ObjectHeap) -> Dynamic;
}

// ============================================================================
// Integer implementations
// ============================================================================

macro_rules! impl_int {
    ($($ty:ty),*) => {
        $(
            impl FromDynamic for $ty {
                fn param_kind() -> ParamKind {
                    ParamKind::Int
                }

                fn from_dynamic(value: &Dynamic, _heap: &ObjectHeap) -> Result<Self, ConversionError> {
                    match value {
                        Dynamic::Int(v) => <$ty>::try_from(*v).map_err(|_| {
                            ConversionError::IntegerOverflow {
                                value: *v,
                                target_type: stringify!($ty),
                            }
                        }),
                        other => Err(ConversionError::TypeMismatch {
                            expected: "int",
                            actual: other.type_name(),
                        }),
                    }
                }
            }

            impl IntoDynamic for $ty {
                fn into_dynamic(self, _heap: &mut ObjectHeap) -> Dynamic {
                    Dynamic::Int(self as i64)
                }
            }
        )*
    };
}

impl_int!(i8, i16, i32, i64, u8, u16, u32, usize);

// u64 reinterprets the bits so the full range survives the trip through i64
impl FromDynamic for u64 {
    fn param_kind() -> ParamKind {
        ParamKind::Int
    }

    fn from_dynamic(value: &Dynamic, _heap: &ObjectHeap) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Int(v) => Ok(*v as u64),
            other => Err(ConversionError::TypeMismatch {
                expected: "int",
                actual: other.type_name(),
            }),
        }
    }
}

impl IntoDynamic for u64 {
    fn into_dynamic(self, _heap: &mut ObjectHeap) -> Dynamic {
        Dynamic::Int(self as i64)
    }
}

// ============================================================================
// Float implementations
// ============================================================================

macro_rules! impl_float {
    ($($ty:ty),*) => {
        $(
            impl FromDynamic for $ty {
                fn param_kind() -> ParamKind {
                    ParamKind::Number
                }

                fn from_dynamic(value: &Dynamic, _heap: &ObjectHeap) -> Result<Self, ConversionError> {
                    match value {
                        Dynamic::Float(v) => Ok(*v as $ty),
                        Dynamic::Int(v) => Ok(*v as $ty),
                        other => Err(ConversionError::TypeMismatch {
                            expected: "number",
                            actual: other.type_name(),
                        }),
                    }
                }
            }

            impl IntoDynamic for $ty {
                fn into_dynamic(self, _heap: &mut ObjectHeap) -> Dynamic {
                    Dynamic::Float(self as f64)
                }
            }
        )*
    };
}

impl_float!(f32, f64);

// ============================================================================
// Bool, string, unit
// ============================================================================

impl FromDynamic for bool {
    fn param_kind() -> ParamKind {
        ParamKind::Bool
    }

    fn from_dynamic(value: &Dynamic, _heap: &ObjectHeap) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Bool(v) => Ok(*v),
            other => Err(ConversionError::TypeMismatch {
                expected: "bool",
                actual: other.type_name(),
            }),
        }
    }
}

impl IntoDynamic for bool {
    fn into_dynamic(self, _heap: &mut ObjectHeap) -> Dynamic {
        Dynamic::Bool(self)
    }
}

impl FromDynamic for String {
    fn param_kind() -> ParamKind {
        ParamKind::String
    }

    fn from_dynamic(value: &Dynamic, _heap: &ObjectHeap) -> Result<Self, ConversionError> {
        match value {
            Dynamic::String(s) => Ok(s.clone()),
            other => Err(ConversionError::TypeMismatch {
                expected: "string",
                actual: other.type_name(),
            }),
        }
    }
}

impl IntoDynamic for String {
    fn into_dynamic(self, _heap: &mut ObjectHeap) -> Dynamic {
        Dynamic::String(self)
    }
}

impl IntoDynamic for &str {
    fn into_dynamic(self, _heap: &mut ObjectHeap) -> Dynamic {
        Dynamic::String(self.to_owned())
    }
}

impl IntoDynamic for () {
    fn into_dynamic(self, _heap: &mut ObjectHeap) -> Dynamic {
        Dynamic::Void
    }
}

impl IntoDynamic for Dynamic {
    fn into_dynamic(self, _heap: &mut ObjectHeap) -> Dynamic {
        self
    }
}

// ============================================================================
// Nullable values
// ============================================================================

impl<T: FromDynamic> FromDynamic for Option<T> {
    fn param_kind() -> ParamKind {
        ParamKind::Optional(Box::new(T::param_kind()))
    }

    fn from_dynamic(value: &Dynamic, heap: &ObjectHeap) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Null => Ok(None),
            other => T::from_dynamic(other, heap).map(Some),
        }
    }
}

impl<T: IntoDynamic> IntoDynamic for Option<T> {
    fn into_dynamic(self, heap: &mut ObjectHeap) -> Dynamic {
        match self {
            Some(value) => value.into_dynamic(heap),
            None => Dynamic::Null,
        }
    }
}

// ============================================================================
// Bridged native objects
// ============================================================================

fn object_from_dynamic<T: ScriptType>(
    value: &Dynamic,
    heap: &ObjectHeap,
    read_only: bool,
) -> Result<SharedPtr<T>, ConversionError> {
    let handle = match value {
        Dynamic::Object(handle) => *handle,
        Dynamic::Null => {
            return Err(ConversionError::NullHandle {
                target_type: T::type_name(),
            });
        }
        other => {
            return Err(ConversionError::TypeMismatch {
                expected: T::type_name(),
                actual: other.type_name(),
            });
        }
    };
    let wrapper = heap
        .get(handle)
        .ok_or(ConversionError::StaleHandle {
            index: handle.index,
        })?;
    let any = if read_only {
        wrapper.cshared()
    } else {
        wrapper.shared().ok_or(ConversionError::ReadOnly {
            target_type: T::type_name(),
        })?
    };
    any.downcast::<T>()
        .map(SharedPtr::from_rc)
        .map_err(|_| ConversionError::TypeMismatch {
            expected: T::type_name(),
            actual: wrapper.resolve_type().name,
        })
}

impl<T: Bridged + ScriptType> FromDynamic for SharedPtr<T> {
    fn param_kind() -> ParamKind {
        ParamKind::Object {
            type_hash: T::type_hash(),
            name: T::type_name(),
        }
    }

    fn from_dynamic(value: &Dynamic, heap: &ObjectHeap) -> Result<Self, ConversionError> {
        object_from_dynamic::<T>(value, heap, false)
    }
}

impl<T: Bridged + ScriptType> FromDynamic for ConstPtr<T> {
    fn param_kind() -> ParamKind {
        ParamKind::Object {
            type_hash: T::type_hash(),
            name: T::type_name(),
        }
    }

    fn from_dynamic(value: &Dynamic, heap: &ObjectHeap) -> Result<Self, ConversionError> {
        object_from_dynamic::<T>(value, heap, true).map(ConstPtr)
    }
}

impl<T: ?Sized + Bridged + ScriptType> IntoDynamic for SharedPtr<T> {
    fn into_dynamic(self, heap: &mut ObjectHeap) -> Dynamic {
        Dynamic::Object(heap.allocate(SharedPtrWrapper::new(self)))
    }
}

impl<T: ?Sized + Bridged + ScriptType> IntoDynamic for ConstPtr<T> {
    fn into_dynamic(self, heap: &mut ObjectHeap) -> Dynamic {
        Dynamic::Object(heap.allocate(SharedPtrWrapper::new_const(self.0)))
    }
}

// ============================================================================
// Inline native values
// ============================================================================

/// Implement [`FromDynamic`] and [`IntoDynamic`] for a cloneable value type
/// carried inline as [`Dynamic::Native`].
#[macro_export]
macro_rules! native_value {
    ($ty:ty, $name:literal) => {
        impl $crate::FromDynamic for $ty {
            fn param_kind() -> $crate::ParamKind {
                $crate::ParamKind::Value {
                    type_id: ::std::any::TypeId::of::<$ty>(),
                    name: $name,
                }
            }

            fn from_dynamic(
                value: &$crate::Dynamic,
                _heap: &$crate::ObjectHeap,
            ) -> Result<Self, $crate::ConversionError> {
                match value {
                    $crate::Dynamic::Native(boxed) => boxed
                        .downcast_ref::<$ty>()
                        .cloned()
                        .ok_or($crate::ConversionError::TypeMismatch {
                            expected: $name,
                            actual: "native",
                        }),
                    other => Err($crate::ConversionError::TypeMismatch {
                        expected: $name,
                        actual: other.type_name(),
                    }),
                }
            }
        }

        impl $crate::IntoDynamic for $ty {
            fn into_dynamic(self, _heap: &mut $crate::ObjectHeap) -> $crate::Dynamic {
                $crate::Dynamic::Native(Box::new(self))
            }
        }
    };
}

native_value!(glam::Vec2, "Vector2");
native_value!(glam::Vec3, "Vector3");
native_value!(glam::Vec4, "Vector4");
native_value!(glam::Quat, "Quaternion");
native_value!(glam::Mat4, "Matrix4");
native_value!(glam::IVec2, "IntVector2");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridged;

    struct Probe;
    bridged!(Probe, "Probe", dynamic);

    struct Other;
    bridged!(Other, "Other", dynamic);

    #[test]
    fn integers_check_bounds() {
        let heap = ObjectHeap::new();
        assert_eq!(u8::from_dynamic(&Dynamic::Int(255), &heap).unwrap(), 255);
        assert!(matches!(
            u8::from_dynamic(&Dynamic::Int(256), &heap),
            Err(ConversionError::IntegerOverflow { value: 256, .. })
        ));
        assert!(u32::from_dynamic(&Dynamic::Int(-1), &heap).is_err());
    }

    #[test]
    fn numbers_accept_integers() {
        let heap = ObjectHeap::new();
        assert_eq!(f32::from_dynamic(&Dynamic::Int(3), &heap).unwrap(), 3.0);
        assert!(i32::from_dynamic(&Dynamic::Float(3.0), &heap).is_err());
    }

    #[test]
    fn strings_are_byte_exact() {
        let mut heap = ObjectHeap::new();
        let original = String::from("tech\0nique");
        let value = original.clone().into_dynamic(&mut heap);
        let back = String::from_dynamic(&value, &heap).unwrap();
        assert_eq!(back.len(), 10);
        assert_eq!(back, original);
    }

    #[test]
    fn strings_reject_numbers() {
        let heap = ObjectHeap::new();
        assert!(String::from_dynamic(&Dynamic::Int(1), &heap).is_err());
    }

    #[test]
    fn option_maps_null() {
        let heap = ObjectHeap::new();
        assert_eq!(Option::<i32>::from_dynamic(&Dynamic::Null, &heap).unwrap(), None);
        assert_eq!(
            Option::<i32>::from_dynamic(&Dynamic::Int(4), &heap).unwrap(),
            Some(4)
        );
    }

    #[test]
    fn null_object_is_an_error_for_required_pointers() {
        let heap = ObjectHeap::new();
        assert!(matches!(
            SharedPtr::<Probe>::from_dynamic(&Dynamic::Null, &heap),
            Err(ConversionError::NullHandle { target_type: "Probe" })
        ));
    }

    #[test]
    fn wrong_object_type_is_rejected() {
        let mut heap = ObjectHeap::new();
        let value = SharedPtr::new(Other).into_dynamic(&mut heap);
        assert!(matches!(
            SharedPtr::<Probe>::from_dynamic(&value, &heap),
            Err(ConversionError::TypeMismatch {
                expected: "Probe",
                actual: "Other"
            })
        ));
    }

    #[test]
    fn const_handles_only_convert_to_const_pointers() {
        let mut heap = ObjectHeap::new();
        let value = ConstPtr::new(SharedPtr::new(Probe)).into_dynamic(&mut heap);
        assert!(matches!(
            SharedPtr::<Probe>::from_dynamic(&value, &heap),
            Err(ConversionError::ReadOnly { .. })
        ));
        assert!(ConstPtr::<Probe>::from_dynamic(&value, &heap).is_ok());
    }

    #[test]
    fn stale_handles_are_detected() {
        let mut heap = ObjectHeap::new();
        let value = SharedPtr::new(Probe).into_dynamic(&mut heap);
        let handle = value.as_object().unwrap();
        heap.release(handle);
        assert!(matches!(
            SharedPtr::<Probe>::from_dynamic(&value, &heap),
            Err(ConversionError::StaleHandle { .. })
        ));
    }

    #[test]
    fn math_values_travel_inline() {
        let mut heap = ObjectHeap::new();
        let value = glam::Vec3::new(1.0, 2.0, 3.0).into_dynamic(&mut heap);
        assert_eq!(heap.live_count(), 0);
        assert_eq!(
            glam::Vec3::from_dynamic(&value, &heap).unwrap(),
            glam::Vec3::new(1.0, 2.0, 3.0)
        );
        assert!(glam::Vec2::from_dynamic(&value, &heap).is_err());
    }

    #[test]
    fn optional_kind_has_its_own_identity() {
        let plain = <SharedPtr<Probe>>::param_kind();
        let nullable = <Option<SharedPtr<Probe>>>::param_kind();
        assert_ne!(plain.type_hash(), nullable.type_hash());
        assert_eq!(nullable.name(), "Probe?");
    }
}
