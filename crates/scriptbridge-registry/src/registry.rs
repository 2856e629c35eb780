//! SymbolRegistry - class, function and constant storage.
//!
//! Classes are stored by [`TypeHash`] with a name index. Member lookups walk
//! the base chain, so a method declared on a base class is found through any
//! derived class; a derived declaration of the same name hides the base one.
//!
//! # Thread Safety
//!
//! `SymbolRegistry` is not thread-safe. It is populated during setup and
//! read during dispatch on the runtime's thread.

use rustc_hash::FxHashMap;

use scriptbridge_core::{Dynamic, RegistrationError, TypeHash};

use crate::entries::{ClassEntry, ConstantValue, FunctionEntry, PropertyEntry};
use crate::module::Module;
use crate::overload::{OverloadError, TieBreak, resolve_overload};

/// Registry of everything visible to scripts.
#[derive(Default)]
pub struct SymbolRegistry {
    /// Classes by hash.
    classes: FxHashMap<TypeHash, ClassEntry>,

    /// Name index into `classes`.
    class_names: FxHashMap<String, TypeHash>,

    /// Free functions by name; overloads in registration order.
    functions: FxHashMap<String, Vec<FunctionEntry>>,

    /// Exported constants.
    constants: FxHashMap<String, ConstantValue>,

    /// Policy applied when several overloads match.
    tie_break: TieBreak,
}

impl SymbolRegistry {
    /// Create an empty registry with the default tie-break policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given tie-break policy.
    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self {
            tie_break,
            ..Self::default()
        }
    }

    /// Current tie-break policy.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Change the tie-break policy.
    pub fn set_tie_break(&mut self, tie_break: TieBreak) {
        self.tie_break = tie_break;
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a class. Its base, if any, must already be registered.
    pub fn register_class(&mut self, class: ClassEntry) -> Result<(), RegistrationError> {
        let name = class.identity.name;
        if self.classes.contains_key(&class.identity.hash) {
            return Err(RegistrationError::DuplicateType { name: name.into() });
        }
        if let Some(base) = class.base
            && !self.classes.contains_key(&base.hash)
        {
            return Err(RegistrationError::UnknownBaseType {
                name: name.into(),
                base: base.name.into(),
            });
        }
        for (i, property) in class.properties.iter().enumerate() {
            if class.properties[..i].iter().any(|p| p.name == property.name) {
                return Err(RegistrationError::DuplicateProperty {
                    class: name.into(),
                    property: property.name.clone(),
                });
            }
        }

        self.class_names.insert(name.to_owned(), class.identity.hash);
        self.classes.insert(class.identity.hash, class);
        Ok(())
    }

    /// Register one overload of a free function.
    pub fn register_function(&mut self, function: FunctionEntry) {
        self.functions
            .entry(function.name.clone())
            .or_default()
            .push(function);
    }

    /// Register a constant.
    pub fn register_constant(
        &mut self,
        name: &str,
        value: ConstantValue,
    ) -> Result<(), RegistrationError> {
        if self.constants.contains_key(name) {
            return Err(RegistrationError::DuplicateConstant { name: name.into() });
        }
        self.constants.insert(name.to_owned(), value);
        Ok(())
    }

    /// Install every class, function and constant of a module.
    ///
    /// Stops at the first registration error; items installed before it stay.
    pub fn install(&mut self, module: Module) -> Result<(), RegistrationError> {
        let name = module.name().to_owned();
        let (classes, functions, constants) = (
            module.classes.len(),
            module.functions.len(),
            module.constants.len(),
        );

        for class in module.classes {
            self.register_class(class)?;
        }
        for function in module.functions {
            self.register_function(function);
        }
        for (constant, value) in module.constants {
            self.register_constant(&constant, value)?;
        }

        log::debug!(
            "installed module '{}': {} classes, {} functions, {} constants",
            name,
            classes,
            functions,
            constants
        );
        Ok(())
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get a class by hash.
    pub fn class(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.classes.get(&hash)
    }

    /// Get a class by registered name.
    pub fn class_by_name(&self, name: &str) -> Option<&ClassEntry> {
        self.class_names.get(name).and_then(|h| self.classes.get(h))
    }

    /// Number of registered classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Iterate a class and its bases, most-derived first.
    pub fn base_chain(&self, hash: TypeHash) -> BaseChain<'_> {
        BaseChain {
            registry: self,
            next: self.classes.get(&hash),
        }
    }

    /// True if `derived` is `base` or inherits from it.
    pub fn is_a(&self, derived: TypeHash, base: TypeHash) -> bool {
        derived == base || self.base_chain(derived).any(|c| c.identity.hash == base)
    }

    /// Overloads of a method, searching the base chain.
    pub fn find_methods(&self, hash: TypeHash, name: &str) -> Option<&[FunctionEntry]> {
        self.base_chain(hash).find_map(|c| c.method(name))
    }

    /// A property, searching the base chain.
    pub fn find_property(&self, hash: TypeHash, name: &str) -> Option<&PropertyEntry> {
        self.base_chain(hash).find_map(|c| c.property(name))
    }

    /// Overloads of a static function on a class (not inherited).
    pub fn find_static(&self, class: &str, name: &str) -> Option<&[FunctionEntry]> {
        self.class_by_name(class)?.static_function(name)
    }

    /// Overloads of a free function.
    pub fn functions(&self, name: &str) -> Option<&[FunctionEntry]> {
        self.functions.get(name).map(Vec::as_slice)
    }

    /// Value of a constant.
    pub fn constant(&self, name: &str) -> Option<&ConstantValue> {
        self.constants.get(name)
    }

    /// Select one overload under this registry's tie-break policy.
    pub fn resolve<'a>(
        &self,
        name: &str,
        candidates: &'a [FunctionEntry],
        args: &[Dynamic],
        read_only: bool,
    ) -> Result<&'a FunctionEntry, OverloadError> {
        resolve_overload(self, name, candidates, args, read_only, self.tie_break)
    }
}

impl std::fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolRegistry")
            .field("classes", &self.classes.len())
            .field("functions", &self.functions.len())
            .field("constants", &self.constants.len())
            .field("tie_break", &self.tie_break)
            .finish()
    }
}

/// Iterator over a class and its ancestors.
pub struct BaseChain<'a> {
    registry: &'a SymbolRegistry,
    next: Option<&'a ClassEntry>,
}

impl<'a> Iterator for BaseChain<'a> {
    type Item = &'a ClassEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current
            .base
            .and_then(|base| self.registry.classes.get(&base.hash));
        Some(current)
    }
}
