//! Registry entries for classes, functions, properties and constants.

use rustc_hash::FxHashMap;

use scriptbridge_core::{Dynamic, NativeFn, ParamKind, TypeHash, TypeIdentity};

/// One overload of a function, static function or method.
#[derive(Debug, Clone)]
pub struct FunctionEntry {
    /// Script-visible name shared by all overloads
    pub name: String,
    /// Identity of this overload (owner, name and parameter types)
    pub hash: TypeHash,
    /// Parameter kinds, excluding the receiver
    pub params: Vec<ParamKind>,
    /// Callable through read-only handles
    pub is_const: bool,
    /// The adapter
    pub native: NativeFn,
}

impl FunctionEntry {
    /// Number of script-visible parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Human-readable signature for diagnostics, e.g. `SetSize(int, bool)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ParamKind::name).collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// Accessor pair for a class property.
#[derive(Debug, Clone)]
pub struct PropertyEntry {
    /// Script-visible name
    pub name: String,
    /// Const method taking no arguments
    pub getter: NativeFn,
    /// Mutable method taking the new value; `None` for read-only properties
    pub setter: Option<NativeFn>,
}

impl PropertyEntry {
    /// True if the property has no setter.
    pub fn is_read_only(&self) -> bool {
        self.setter.is_none()
    }
}

/// A registered class: its identity, base and member tables.
#[derive(Debug, Clone)]
pub struct ClassEntry {
    /// Name and hash
    pub identity: TypeIdentity,
    /// Direct base class, if any
    pub base: Option<TypeIdentity>,
    /// Methods by name, overloads in registration order
    pub methods: FxHashMap<String, Vec<FunctionEntry>>,
    /// Static functions (factories) by name, overloads in registration order
    pub statics: FxHashMap<String, Vec<FunctionEntry>>,
    /// Properties in registration order
    pub properties: Vec<PropertyEntry>,
}

impl ClassEntry {
    /// Create an empty class entry.
    pub fn new(identity: TypeIdentity) -> Self {
        Self {
            identity,
            base: None,
            methods: FxHashMap::default(),
            statics: FxHashMap::default(),
            properties: Vec::new(),
        }
    }

    /// Registered name.
    pub fn name(&self) -> &'static str {
        self.identity.name
    }

    /// Overloads of a method declared directly on this class.
    pub fn method(&self, name: &str) -> Option<&[FunctionEntry]> {
        self.methods.get(name).map(Vec::as_slice)
    }

    /// Overloads of a static function declared on this class.
    pub fn static_function(&self, name: &str) -> Option<&[FunctionEntry]> {
        self.statics.get(name).map(Vec::as_slice)
    }

    /// A property declared directly on this class.
    pub fn property(&self, name: &str) -> Option<&PropertyEntry> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Value of an exported constant.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl ConstantValue {
    /// The script-side value.
    pub fn to_dynamic(&self) -> Dynamic {
        match self {
            ConstantValue::Int(v) => Dynamic::Int(*v),
            ConstantValue::Float(v) => Dynamic::Float(*v),
            ConstantValue::Bool(v) => Dynamic::Bool(*v),
            ConstantValue::String(s) => Dynamic::String(s.clone()),
        }
    }
}

macro_rules! constant_from {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for ConstantValue {
                fn from(value: $ty) -> Self {
                    ConstantValue::$variant(value.into())
                }
            }
        )*
    };
}

constant_from!(Int: i64, i32, u32, u16, u8);
constant_from!(Float: f64, f32);
constant_from!(Bool: bool);
constant_from!(String: String, &str);
