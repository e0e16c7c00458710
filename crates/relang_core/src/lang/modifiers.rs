//! Function modifier vocabulary.
//!
//! A function declaration may carry at most one modifier. A function without a modifier is a plain instance method
//! (inside a class) or a free function (at top level).
//!
//! ## Notes
//! - Matching is **case-sensitive**; the spellings mirror the emitted C++ keywords.

use super::registry::{LangItemInfo, Stability};

/// Stable identifier for a function modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierId {
    /// Dispatched through the vtable; never called by address.
    Virtual,
    /// Member function without an implicit instance pointer.
    Static,
}

/// Metadata for a function modifier.
pub type ModifierInfo = LangItemInfo<ModifierId>;

/// Registry of all function modifiers accepted by the compiler.
pub const MODIFIERS: &[ModifierInfo] = &[
    info(
        ModifierId::Virtual,
        "virtual",
        "Occupies the next vtable slot of its class; emitted as a pure virtual declaration.",
    ),
    info(
        ModifierId::Static,
        "static",
        "Class-scoped function called by address without an instance pointer.",
    ),
];

/// Resolve a spelling to a [`ModifierId`].
///
/// ## Returns
/// - `Some(ModifierId)` if `name` matches a known modifier.
/// - `None` otherwise.
pub fn from_str(name: &str) -> Option<ModifierId> {
    MODIFIERS.iter().find(|m| m.matches(name)).map(|m| m.id)
}

/// Return the canonical spelling for a modifier.
pub fn as_str(id: ModifierId) -> &'static str {
    match id {
        ModifierId::Virtual => "virtual",
        ModifierId::Static => "static",
    }
}

const fn info(id: ModifierId, canonical: &'static str, description: &'static str) -> ModifierInfo {
    LangItemInfo {
        id,
        canonical,
        aliases: &[],
        description,
        stability: Stability::Stable,
    }
}
