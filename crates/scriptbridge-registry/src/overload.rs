//! Overload resolution.
//!
//! Candidates sharing one script-visible name are filtered in four passes:
//!
//! 1. Receiver: a read-only handle only sees const overloads
//! 2. Arity: the argument count must equal the parameter count
//! 3. Types: every argument must be accepted by its parameter
//! 4. Tie-break: by default the earliest registered survivor wins; with
//!    [`TieBreak::Reject`] more than one survivor is an error

use serde::{Deserialize, Serialize};
use thiserror::Error;

use scriptbridge_core::{Dynamic, ParamKind};

use crate::entries::FunctionEntry;
use crate::registry::SymbolRegistry;

/// Policy for several overloads matching one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// The earliest registered overload wins
    #[default]
    FirstRegistered,
    /// The call fails as ambiguous
    Reject,
}

/// Why no single overload could be selected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverloadError {
    /// Every overload needs write access but the receiver is read-only
    #[error("'{name}' has no overload callable through a read-only handle")]
    ReadOnlyReceiver { name: String },

    /// No overload takes this many arguments
    #[error("no overload of '{name}' takes {arg_count} argument(s)")]
    NoArity { name: String, arg_count: usize },

    /// Overloads with the right arity exist but none accepts the argument types
    #[error("no overload of '{name}' accepts ({args})")]
    NoMatch { name: String, args: String },

    /// Several overloads accept the arguments and ties are rejected
    #[error("call to '{name}' with ({args}) is ambiguous between {candidates}")]
    Ambiguous {
        name: String,
        args: String,
        candidates: String,
    },
}

fn describe(args: &[Dynamic]) -> String {
    args.iter()
        .map(Dynamic::type_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// True if `value` can be passed to a parameter of kind `kind`.
pub fn accepts(registry: &SymbolRegistry, kind: &ParamKind, value: &Dynamic) -> bool {
    match (kind, value) {
        (ParamKind::Any, _) => true,
        (ParamKind::Int, Dynamic::Int(_)) => true,
        (ParamKind::Number, Dynamic::Int(_) | Dynamic::Float(_)) => true,
        (ParamKind::Bool, Dynamic::Bool(_)) => true,
        (ParamKind::String, Dynamic::String(_)) => true,
        (ParamKind::Object { type_hash, .. }, Dynamic::Object(handle)) => {
            registry.is_a(handle.type_hash, *type_hash)
        }
        (ParamKind::Value { type_id, .. }, Dynamic::Native(boxed)) => (**boxed).type_id() == *type_id,
        (ParamKind::Optional(_), Dynamic::Null) => true,
        (ParamKind::Optional(inner), other) => accepts(registry, inner, other),
        _ => false,
    }
}

/// Select one overload for a call.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn resolve_overload<'a>(
    registry: &SymbolRegistry,
    name: &str,
    candidates: &'a [FunctionEntry],
    args: &[Dynamic],
    read_only: bool,
    tie_break: TieBreak,
) -> Result<&'a FunctionEntry, OverloadError> {
    let visible: Vec<&FunctionEntry> = candidates
        .iter()
        .filter(|c| !read_only || c.is_const)
        .collect();
    if visible.is_empty() && !candidates.is_empty() {
        return Err(OverloadError::ReadOnlyReceiver { name: name.into() });
    }

    let by_arity: Vec<&FunctionEntry> = visible
        .into_iter()
        .filter(|c| c.arity() == args.len())
        .collect();
    if by_arity.is_empty() {
        return Err(OverloadError::NoArity {
            name: name.into(),
            arg_count: args.len(),
        });
    }

    let mut matching = by_arity.into_iter().filter(|c| {
        c.params
            .iter()
            .zip(args)
            .all(|(kind, value)| accepts(registry, kind, value))
    });

    let Some(first) = matching.next() else {
        return Err(OverloadError::NoMatch {
            name: name.into(),
            args: describe(args),
        });
    };

    if tie_break == TieBreak::Reject {
        let rest: Vec<&FunctionEntry> = matching.collect();
        if !rest.is_empty() {
            let candidates = std::iter::once(first)
                .chain(rest)
                .map(FunctionEntry::signature)
                .collect::<Vec<_>>()
                .join(" | ");
            return Err(OverloadError::Ambiguous {
                name: name.into(),
                args: describe(args),
                candidates,
            });
        }
    }

    log::trace!("'{}' resolved to {}", name, first.signature());
    Ok(first)
}
