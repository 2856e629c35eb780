//! Module and class builders.
//!
//! A [`Module`] collects classes, free functions and constants, and is
//! installed into a [`SymbolRegistry`](crate::SymbolRegistry) in one step.
//!
//! # Example
//!
//! ```ignore
//! let module = Module::new("camera")
//!     .class(
//!         ClassBuilder::<Camera>::new()
//!             .base::<dyn Object>()
//!             .static_function("new", move || Camera::new(&context))
//!             .method("SetFov", |c: &Camera, fov: f32| c.set_fov(fov))
//!             .const_method("GetFov", |c: &Camera| c.fov())
//!             .property("fov", |c: &Camera| c.fov(), |c: &Camera, fov: f32| c.set_fov(fov)),
//!     )
//!     .constant("DEFAULT_CAMERA_FOV", 45.0f32);
//! ```

use std::fmt;
use std::marker::PhantomData;

use scriptbridge_core::{NativeFn, ParamKind, ScriptType, TypeHash, TypeIdentity};

use crate::entries::{ClassEntry, ConstantValue, FunctionEntry, PropertyEntry};
use crate::signature::{IntoNativeFn, IntoNativeMethod, Receiver};

/// A named set of bindings.
pub struct Module {
    name: String,
    pub(crate) classes: Vec<ClassEntry>,
    pub(crate) functions: Vec<FunctionEntry>,
    pub(crate) constants: Vec<(String, ConstantValue)>,
}

impl Module {
    /// Create an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
            functions: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// Module name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a class. Base classes must be added (or already installed) first.
    pub fn class<T: ?Sized + ScriptType>(mut self, class: ClassBuilder<T>) -> Self {
        self.classes.push(class.build());
        self
    }

    /// Add one overload of a free function.
    pub fn function<F, Args, Ret>(mut self, name: &str, f: F) -> Self
    where
        F: IntoNativeFn<Args, Ret>,
    {
        let params = F::param_kinds();
        let hash = TypeHash::from_function(name, &param_hashes(&params));
        self.functions.push(FunctionEntry {
            name: name.to_owned(),
            hash,
            params,
            is_const: true,
            native: f.into_native_fn(hash),
        });
        self
    }

    /// Add one overload of a free function with raw call context access.
    pub fn function_raw(mut self, name: &str, params: Vec<ParamKind>, native: NativeFn) -> Self {
        self.functions.push(FunctionEntry {
            name: name.to_owned(),
            hash: native.id,
            params,
            is_const: true,
            native,
        });
        self
    }

    /// Export a named constant.
    pub fn constant(mut self, name: &str, value: impl Into<ConstantValue>) -> Self {
        self.constants.push((name.to_owned(), value.into()));
        self
    }

    /// Number of classes in this module.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("classes", &self.classes.len())
            .field("functions", &self.functions.len())
            .field("constants", &self.constants.len())
            .finish()
    }
}

fn param_hashes(params: &[ParamKind]) -> Vec<TypeHash> {
    params.iter().map(ParamKind::type_hash).collect()
}

/// Builder for one class's member tables.
///
/// `T` is the type whose identity the class takes. Typed methods are only
/// available when `T` is a concrete type; trait-object classes such as a
/// common base register their methods with [`ClassBuilder::raw_method`].
pub struct ClassBuilder<T: ?Sized> {
    entry: ClassEntry,
    _marker: PhantomData<fn() -> Box<T>>,
}

impl<T: ?Sized + ScriptType> ClassBuilder<T> {
    /// Start a class named after `T`.
    pub fn new() -> Self {
        Self {
            entry: ClassEntry::new(T::identity()),
            _marker: PhantomData,
        }
    }

    /// Declare the direct base class.
    pub fn base<B: ?Sized + ScriptType>(mut self) -> Self {
        self.entry.base = Some(B::identity());
        self
    }

    /// Add one overload of a method requiring write access.
    pub fn method<F, Args, Ret>(self, name: &str, f: F) -> Self
    where
        F: IntoNativeMethod<T, Args, Ret>,
    {
        self.add_method(name, f, Receiver::Mutable)
    }

    /// Add one overload of a method callable through read-only handles.
    pub fn const_method<F, Args, Ret>(self, name: &str, f: F) -> Self
    where
        F: IntoNativeMethod<T, Args, Ret>,
    {
        self.add_method(name, f, Receiver::Const)
    }

    fn add_method<F, Args, Ret>(mut self, name: &str, f: F, receiver: Receiver) -> Self
    where
        F: IntoNativeMethod<T, Args, Ret>,
    {
        let params = F::param_kinds();
        let hash = TypeHash::from_method(self.entry.identity.hash, name, &param_hashes(&params));
        let native = f.into_native_method(hash, receiver);
        self.push_method(name, params, receiver.is_const(), native);
        self
    }

    /// Add one overload of a method with raw call context access.
    pub fn raw_method(
        mut self,
        name: &str,
        params: Vec<ParamKind>,
        is_const: bool,
        native: NativeFn,
    ) -> Self {
        self.push_method(name, params, is_const, native);
        self
    }

    fn push_method(&mut self, name: &str, params: Vec<ParamKind>, is_const: bool, native: NativeFn) {
        self.entry
            .methods
            .entry(name.to_owned())
            .or_default()
            .push(FunctionEntry {
                name: name.to_owned(),
                hash: native.id,
                params,
                is_const,
                native,
            });
    }

    /// Add one overload of a static function, such as a factory.
    pub fn static_function<F, Args, Ret>(mut self, name: &str, f: F) -> Self
    where
        F: IntoNativeFn<Args, Ret>,
    {
        let params = F::param_kinds();
        let owner = self.entry.identity.hash;
        let hash = TypeHash::from_method(owner, name, &param_hashes(&params));
        self.entry
            .statics
            .entry(name.to_owned())
            .or_default()
            .push(FunctionEntry {
                name: name.to_owned(),
                hash,
                params,
                is_const: true,
                native: f.into_native_fn(hash),
            });
        self
    }

    /// Add a read/write property.
    pub fn property<G, GRet, S, V>(mut self, name: &str, getter: G, setter: S) -> Self
    where
        G: IntoNativeMethod<T, (), GRet>,
        S: IntoNativeMethod<T, (V,), ()>,
    {
        let owner = self.entry.identity.hash;
        let get_hash = TypeHash::from_method(owner, &format!("get_{name}"), &[]);
        let set_hash = TypeHash::from_method(
            owner,
            &format!("set_{name}"),
            &param_hashes(&S::param_kinds()),
        );
        self.entry.properties.push(PropertyEntry {
            name: name.to_owned(),
            getter: getter.into_native_method(get_hash, Receiver::Const),
            setter: Some(setter.into_native_method(set_hash, Receiver::Mutable)),
        });
        self
    }

    /// Add a property without a setter.
    pub fn readonly_property<G, GRet>(mut self, name: &str, getter: G) -> Self
    where
        G: IntoNativeMethod<T, (), GRet>,
    {
        let get_hash = TypeHash::from_method(self.entry.identity.hash, &format!("get_{name}"), &[]);
        self.entry.properties.push(PropertyEntry {
            name: name.to_owned(),
            getter: getter.into_native_method(get_hash, Receiver::Const),
            setter: None,
        });
        self
    }

    /// Identity of the class being built.
    pub fn identity(&self) -> TypeIdentity {
        self.entry.identity
    }

    pub(crate) fn build(self) -> ClassEntry {
        self.entry
    }
}

impl<T: ?Sized + ScriptType> Default for ClassBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use scriptbridge_core::bridged;

    struct Dial {
        value: Cell<f32>,
    }
    bridged!(Dial, "Dial", dynamic);

    #[test]
    fn overloads_keep_registration_order() {
        let class = ClassBuilder::<Dial>::new()
            .method("Set", |d: &Dial, v: f32| d.value.set(v))
            .method("Set", |d: &Dial, v: f32, _snap: bool| d.value.set(v))
            .build();
        let overloads = class.method("Set").unwrap();
        assert_eq!(overloads.len(), 2);
        assert_eq!(overloads[0].arity(), 1);
        assert_eq!(overloads[1].arity(), 2);
        assert_ne!(overloads[0].hash, overloads[1].hash);
    }

    #[test]
    fn const_methods_are_flagged() {
        let class = ClassBuilder::<Dial>::new()
            .const_method("Get", |d: &Dial| d.value.get())
            .method("Reset", |d: &Dial| d.value.set(0.0))
            .build();
        assert!(class.method("Get").unwrap()[0].is_const);
        assert!(!class.method("Reset").unwrap()[0].is_const);
    }

    #[test]
    fn properties_and_statics() {
        let class = ClassBuilder::<Dial>::new()
            .static_function("new", || {
                scriptbridge_core::SharedPtr::new(Dial {
                    value: Cell::new(0.0),
                })
            })
            .property("value", |d: &Dial| d.value.get(), |d: &Dial, v: f32| {
                d.value.set(v)
            })
            .readonly_property("max", |_d: &Dial| 10.0f32)
            .build();
        assert_eq!(class.static_function("new").map(<[_]>::len), Some(1));
        assert!(!class.property("value").unwrap().is_read_only());
        assert!(class.property("max").unwrap().is_read_only());
    }

    #[test]
    fn module_collects_everything() {
        let module = Module::new("dials")
            .class(ClassBuilder::<Dial>::new())
            .function("Twice", |x: i32| x * 2)
            .constant("DIAL_MAX", 10i32);
        assert_eq!(module.name(), "dials");
        assert_eq!(module.class_count(), 1);
        assert_eq!(module.functions.len(), 1);
        assert_eq!(module.constants[0].1, ConstantValue::Int(10));
    }
}
