//! Engine context: object factories and subsystems.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use scriptbridge_core::{ScriptType, SharedPtr};

use crate::object::{Object, into_object};

/// An engine class that can be created by name.
pub trait ObjectFactory: Object + ScriptType + Sized {
    /// Construct a new instance against the context.
    fn create(context: &Context) -> Self;
}

type FactoryFn = Box<dyn Fn(&Context) -> SharedPtr<dyn Object>>;

/// Owner of object factories and subsystem singletons.
///
/// Shared as `Rc<Context>`; bindings capture it to create objects and to
/// look up subsystems.
pub struct Context {
    factories: RefCell<FxHashMap<&'static str, FactoryFn>>,
    subsystems: RefCell<FxHashMap<TypeId, Rc<dyn Any>>>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            factories: RefCell::new(FxHashMap::default()),
            subsystems: RefCell::new(FxHashMap::default()),
        })
    }

    /// Make `T` creatable by name.
    pub fn register_factory<T: ObjectFactory>(&self) {
        let factory: FactoryFn =
            Box::new(|context: &Context| into_object(SharedPtr::new(T::create(context))));
        self.factories.borrow_mut().insert(T::type_name(), factory);
    }

    /// Create a new `T`.
    pub fn create<T: ObjectFactory>(&self) -> SharedPtr<T> {
        SharedPtr::new(T::create(self))
    }

    /// Create an object of a registered class by name.
    ///
    /// Returns `None` if no factory is registered for the name.
    pub fn create_object(&self, type_name: &str) -> Option<SharedPtr<dyn Object>> {
        let factories = self.factories.borrow();
        let Some(factory) = factories.get(type_name) else {
            log::warn!("could not create unknown object type '{}'", type_name);
            return None;
        };
        Some(factory(self))
    }

    /// Register a subsystem singleton, replacing any previous one of the same type.
    pub fn register_subsystem<T: Object>(&self, subsystem: SharedPtr<T>) {
        log::debug!("registered subsystem {}", subsystem.object_type().name);
        let rc: Rc<dyn Any> = SharedPtr::<T>::into_rc(subsystem);
        self.subsystems.borrow_mut().insert(TypeId::of::<T>(), rc);
    }

    /// Look up a subsystem by type.
    pub fn subsystem<T: Object>(&self) -> Option<SharedPtr<T>> {
        let subsystems = self.subsystems.borrow();
        let rc = Rc::clone(subsystems.get(&TypeId::of::<T>())?);
        rc.downcast::<T>().ok().map(SharedPtr::from_rc)
    }

    /// Remove a subsystem.
    pub fn remove_subsystem<T: Object>(&self) {
        self.subsystems.borrow_mut().remove(&TypeId::of::<T>());
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("factories", &self.factories.borrow().len())
            .field("subsystems", &self.subsystems.borrow().len())
            .finish()
    }
}
