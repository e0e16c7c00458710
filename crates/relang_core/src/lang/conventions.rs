//! Calling convention vocabulary.
//!
//! A calling convention tag is copied into the function-pointer type of every generated trampoline, so the spelling
//! here is exactly what the C++ compiler sees.
//!
//! ## Notes
//! - Matching is **case-sensitive**. Single-underscore MSVC spellings are accepted as aliases and normalized to the
//!   canonical double-underscore form.
//!
//! ## Examples
//! ```rust
//! use relang_core::lang::conventions::{self, CallingConventionId};
//!
//! assert_eq!(conventions::from_str("_stdcall"), Some(CallingConventionId::Stdcall));
//! assert_eq!(conventions::as_str(CallingConventionId::Stdcall), "__stdcall");
//! ```

use super::registry::{LangItemInfo, Stability};

/// Stable identifier for a calling convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallingConventionId {
    Cdecl,
    Stdcall,
    Thiscall,
    Fastcall,
    Vectorcall,
}

/// Metadata for a calling convention.
pub type CallingConventionInfo = LangItemInfo<CallingConventionId>;

/// Registry of all calling conventions accepted by the compiler.
pub const CALLING_CONVENTIONS: &[CallingConventionInfo] = &[
    info(
        CallingConventionId::Cdecl,
        "__cdecl",
        &["_cdecl"],
        "Caller cleans the stack; arguments pushed right to left.",
    ),
    info(
        CallingConventionId::Stdcall,
        "__stdcall",
        &["_stdcall"],
        "Callee cleans the stack; arguments pushed right to left.",
    ),
    info(
        CallingConventionId::Thiscall,
        "__thiscall",
        &["_thiscall"],
        "Instance pointer in ECX, remaining arguments on the stack, callee cleans.",
    ),
    info(
        CallingConventionId::Fastcall,
        "__fastcall",
        &["_fastcall"],
        "First two integer arguments in ECX/EDX, callee cleans.",
    ),
    info(
        CallingConventionId::Vectorcall,
        "__vectorcall",
        &[],
        "Fastcall extended with vector registers for floating-point/SIMD arguments.",
    ),
];

/// Resolve a spelling to a [`CallingConventionId`].
///
/// ## Returns
/// - `Some(CallingConventionId)` if `name` is a canonical spelling or an alias.
/// - `None` otherwise.
pub fn from_str(name: &str) -> Option<CallingConventionId> {
    CALLING_CONVENTIONS.iter().find(|c| c.matches(name)).map(|c| c.id)
}

/// Return the canonical spelling for a calling convention.
pub fn as_str(id: CallingConventionId) -> &'static str {
    match id {
        CallingConventionId::Cdecl => "__cdecl",
        CallingConventionId::Stdcall => "__stdcall",
        CallingConventionId::Thiscall => "__thiscall",
        CallingConventionId::Fastcall => "__fastcall",
        CallingConventionId::Vectorcall => "__vectorcall",
    }
}

const fn info(
    id: CallingConventionId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> CallingConventionInfo {
    LangItemInfo {
        id,
        canonical,
        aliases,
        description,
        stability: Stability::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_spellings_roundtrip() {
        for c in CALLING_CONVENTIONS {
            assert_eq!(from_str(c.canonical), Some(c.id));
            assert_eq!(as_str(c.id), c.canonical);
        }
    }

    #[test]
    fn test_alias_normalizes() {
        assert_eq!(from_str("_thiscall"), Some(CallingConventionId::Thiscall));
        assert_eq!(as_str(CallingConventionId::Thiscall), "__thiscall");
    }

    #[test]
    fn test_unknown_convention() {
        assert_eq!(from_str("__pascal"), None);
        assert_eq!(from_str(""), None);
    }
}
