//! The scripting runtime façade.
//!
//! [`ScriptState`] owns the symbol registry, the object heap and the global
//! table, and dispatches calls from script values into bound native code.
//!
//! Ownership at the call boundary:
//!
//! - Arguments are borrowed. Passing an object handle does not change its
//!   alias count, and the native side takes its own strong reference if it
//!   keeps the object.
//! - Returned objects are new handles owned by the caller, who gives them
//!   back with [`ScriptState::release`].

use std::fmt;

use rustc_hash::FxHashMap;

use scriptbridge_core::{
    CallContext, Dynamic, FromDynamic, IntoDynamic, NativeFn, ObjectHandle, ObjectHeap,
};
use scriptbridge_registry::{Module, SymbolRegistry};

use crate::config::BridgeConfig;
use crate::error::{ScriptError, ScriptResult};

/// An embedded scripting runtime with bound native classes.
pub struct ScriptState {
    registry: SymbolRegistry,
    heap: ObjectHeap,
    globals: FxHashMap<String, Dynamic>,
    config: BridgeConfig,
}

impl ScriptState {
    /// Create a runtime with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    /// Create a runtime, applying the configured overload tie-break.
    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            registry: SymbolRegistry::with_tie_break(config.tie_break),
            heap: ObjectHeap::new(),
            globals: FxHashMap::default(),
            config,
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    pub fn heap(&self) -> &ObjectHeap {
        &self.heap
    }

    /// Install a module of bindings.
    pub fn install(&mut self, module: Module) -> ScriptResult<()> {
        self.registry.install(module)?;
        Ok(())
    }

    // ==========================================================================
    // Values
    // ==========================================================================

    /// Push a native value into the runtime.
    ///
    /// Native objects get a new handle holding one strong reference; a null
    /// object becomes [`Dynamic::Null`] and allocates nothing.
    pub fn push<T: IntoDynamic>(&mut self, value: T) -> Dynamic {
        value.into_dynamic(&mut self.heap)
    }

    /// Pull a native value out of a script value.
    pub fn get<T: FromDynamic>(&self, value: &Dynamic) -> ScriptResult<T> {
        Ok(T::from_dynamic(value, &self.heap)?)
    }

    /// Add a script-side alias of an object handle. Other values are copied.
    pub fn alias(&mut self, value: &Dynamic) -> Option<Dynamic> {
        if let Dynamic::Object(handle) = value
            && !self.heap.add_ref(*handle)
        {
            return None;
        }
        value.clone_if_possible()
    }

    /// Drop a script value. Object handles lose one alias and are collected
    /// when none remain.
    pub fn release(&mut self, value: Dynamic) {
        if let Dynamic::Object(handle) = value {
            self.heap.release(handle);
        }
    }

    /// Resolved type name of an object value.
    pub fn type_name_of(&self, value: &Dynamic) -> Option<&'static str> {
        let handle = value.as_object()?;
        Some(self.heap.get(handle)?.resolve_type().name)
    }

    /// Number of live handles.
    pub fn live_handles(&self) -> usize {
        self.heap.live_count()
    }

    /// Value of an exported constant.
    pub fn constant(&self, name: &str) -> Option<Dynamic> {
        self.registry.constant(name).map(|c| c.to_dynamic())
    }

    // ==========================================================================
    // Globals
    // ==========================================================================

    /// Set a global, taking ownership of the value. A replaced value is released.
    pub fn set_global(&mut self, name: &str, value: Dynamic) {
        if let Some(previous) = self.globals.insert(name.to_owned(), value) {
            self.release(previous);
        }
    }

    /// Read a global. The global keeps its alias; use [`alias`](Self::alias)
    /// to hold on to it.
    pub fn global(&self, name: &str) -> ScriptResult<&Dynamic> {
        self.globals
            .get(name)
            .ok_or_else(|| ScriptError::UnknownGlobal(name.to_owned()))
    }

    /// Remove a global and release its value.
    pub fn remove_global(&mut self, name: &str) -> bool {
        match self.globals.remove(name) {
            Some(value) => {
                self.release(value);
                true
            }
            None => false,
        }
    }

    // ==========================================================================
    // Calls
    // ==========================================================================

    /// Call a free function.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn call_function(&mut self, name: &str, args: Vec<Dynamic>) -> ScriptResult<Dynamic> {
        let candidates = self
            .registry
            .functions(name)
            .ok_or_else(|| ScriptError::UnknownFunction(name.to_owned()))?;
        let native = self.registry.resolve(name, candidates, &args, false)?.native.clone();
        let mut slots = args;
        invoke(&mut self.heap, &native, &mut slots, 0)
    }

    /// Call a static function of a class, such as a factory.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn call_static(
        &mut self,
        class: &str,
        name: &str,
        args: Vec<Dynamic>,
    ) -> ScriptResult<Dynamic> {
        let entry = self
            .registry
            .class_by_name(class)
            .ok_or_else(|| ScriptError::UnknownType(class.to_owned()))?;
        let candidates = entry
            .static_function(name)
            .ok_or_else(|| ScriptError::UnknownMethod {
                type_name: entry.name(),
                method: name.to_owned(),
            })?;
        let native = self.registry.resolve(name, candidates, &args, false)?.native.clone();
        let mut slots = args;
        invoke(&mut self.heap, &native, &mut slots, 0)
    }

    /// Call a method on an object.
    ///
    /// Methods are looked up on the handle's resolved type and its bases.
    /// Read-only handles only see const overloads.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn call_method(
        &mut self,
        target: &Dynamic,
        name: &str,
        args: Vec<Dynamic>,
    ) -> ScriptResult<Dynamic> {
        let (handle, type_name, read_only) = self.receiver(target)?;
        let candidates = self
            .registry
            .find_methods(handle.type_hash, name)
            .ok_or_else(|| ScriptError::UnknownMethod {
                type_name,
                method: name.to_owned(),
            })?;
        let native = self
            .registry
            .resolve(name, candidates, &args, read_only)?
            .native
            .clone();

        let mut slots = Vec::with_capacity(args.len() + 1);
        slots.push(Dynamic::Object(handle));
        slots.extend(args);
        invoke(&mut self.heap, &native, &mut slots, 1)
    }

    /// Read a property.
    pub fn get_property(&mut self, target: &Dynamic, name: &str) -> ScriptResult<Dynamic> {
        let (handle, type_name, _) = self.receiver(target)?;
        let getter = self
            .registry
            .find_property(handle.type_hash, name)
            .ok_or_else(|| ScriptError::UnknownProperty {
                type_name,
                property: name.to_owned(),
            })?
            .getter
            .clone();
        invoke(&mut self.heap, &getter, &mut [Dynamic::Object(handle)], 1)
    }

    /// Write a property. Fails for properties without a setter and for
    /// read-only handles.
    pub fn set_property(&mut self, target: &Dynamic, name: &str, value: Dynamic) -> ScriptResult<()> {
        let (handle, type_name, _) = self.receiver(target)?;
        let property = self
            .registry
            .find_property(handle.type_hash, name)
            .ok_or_else(|| ScriptError::UnknownProperty {
                type_name,
                property: name.to_owned(),
            })?;
        let Some(setter) = property.setter.clone() else {
            return Err(ScriptError::ReadOnlyProperty {
                type_name,
                property: name.to_owned(),
            });
        };
        invoke(&mut self.heap, &setter, &mut [Dynamic::Object(handle), value], 1)?;
        Ok(())
    }

    fn receiver(&self, target: &Dynamic) -> ScriptResult<(ObjectHandle, &'static str, bool)> {
        let Dynamic::Object(handle) = target else {
            return Err(ScriptError::NotAnObject {
                actual: target.type_name(),
            });
        };
        let wrapper = self.heap.get(*handle).ok_or(ScriptError::StaleHandle {
            index: handle.index,
            generation: handle.generation,
        })?;
        Ok((
            *handle,
            wrapper.resolve_type().name,
            wrapper.is_read_only(),
        ))
    }
}

fn invoke(
    heap: &mut ObjectHeap,
    native: &NativeFn,
    slots: &mut [Dynamic],
    arg_offset: usize,
) -> ScriptResult<Dynamic> {
    let mut ret = Dynamic::Void;
    let mut ctx = CallContext::new(slots, arg_offset, &mut ret, heap);
    native.call(&mut ctx)?;
    Ok(ret)
}

impl Default for ScriptState {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ScriptState {
    fn drop(&mut self) {
        log::debug!(
            "tearing down script state with {} live handles",
            self.heap.live_count()
        );
        self.globals.clear();
        self.heap.clear();
    }
}

impl fmt::Debug for ScriptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptState")
            .field("registry", &self.registry)
            .field("heap", &self.heap)
            .field("globals", &self.globals.len())
            .field("config", &self.config)
            .finish()
    }
}
