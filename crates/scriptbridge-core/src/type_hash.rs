//! Deterministic hash-based type identity.
//!
//! [`TypeHash`] is a 64-bit hash identifying bound types and functions. It is
//! computed from names (and parameter types, for functions), so the same name
//! always produces the same hash regardless of registration order.
//!
//! # Examples
//!
//! ```
//! use scriptbridge_core::TypeHash;
//!
//! let camera = TypeHash::from_name("Camera");
//! assert_eq!(camera, TypeHash::from_name("Camera"));
//!
//! let a = TypeHash::from_method(camera, "SetOrthoSize", &[TypeHash::from_name("float")]);
//! let b = TypeHash::from_method(camera, "SetOrthoSize", &[TypeHash::from_name("Vector2")]);
//! assert_ne!(a, b);
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants.
///
/// Types, global functions and methods sharing a name still hash apart.
pub mod hash_constants {
    /// Separator constant for parameter mixing
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for type hashes
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for global function hashes
    pub const FUNCTION: u64 = 0x5ea77ffbcdf5f302;

    /// Domain marker for method hashes
    pub const METHOD: u64 = 0x7d3c8b4a92e15f6d;

    /// Per-position parameter markers so `(a, b)` and `(b, a)` differ.
    pub const PARAM_MARKERS: [u64; 12] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
        0x7c3e9f2a5b8d1403,
        0x5d8c7b4a3e9f2106,
        0x3f1e9d8c7b5a4203,
        0x1a2b3c4d5e6f7089,
    ];
}

/// A deterministic 64-bit hash identifying a type or function.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a type name.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a global function hash from name and parameter type hashes.
    #[inline]
    pub fn from_function(name: &str, param_hashes: &[TypeHash]) -> Self {
        let seed = hash_constants::FUNCTION ^ xxh64(name.as_bytes(), 0);
        TypeHash(mix_params(seed, param_hashes))
    }

    /// Create a method hash from owner type, method name and parameter type hashes.
    #[inline]
    pub fn from_method(owner: TypeHash, name: &str, param_hashes: &[TypeHash]) -> Self {
        let seed = hash_constants::METHOD ^ owner.0 ^ xxh64(name.as_bytes(), 0);
        TypeHash(mix_params(seed, param_hashes))
    }

    /// Check if this is the empty hash.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

fn mix_params(seed: u64, param_hashes: &[TypeHash]) -> u64 {
    let mut hash = seed;
    for (i, param) in param_hashes.iter().enumerate() {
        let marker = hash_constants::PARAM_MARKERS
            .get(i)
            .copied()
            .unwrap_or_else(|| hash_constants::PARAM_MARKERS[0].wrapping_add(i as u64));
        // wrapping_mul keeps parameter order significant (XOR alone is commutative)
        hash = hash.wrapping_mul(hash_constants::SEP).wrapping_add(marker ^ param.0);
    }
    hash
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash(0x{:016x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

/// Hashes of the built-in scripting value types.
pub mod primitives {
    use super::TypeHash;
    use std::sync::LazyLock;

    /// `void`
    pub static VOID: LazyLock<TypeHash> = LazyLock::new(|| TypeHash::from_name("void"));
    /// `bool`
    pub static BOOL: LazyLock<TypeHash> = LazyLock::new(|| TypeHash::from_name("bool"));
    /// `int`
    pub static INT: LazyLock<TypeHash> = LazyLock::new(|| TypeHash::from_name("int"));
    /// `number`
    pub static NUMBER: LazyLock<TypeHash> = LazyLock::new(|| TypeHash::from_name("number"));
    /// `string`
    pub static STRING: LazyLock<TypeHash> = LazyLock::new(|| TypeHash::from_name("string"));
}
