//! Program Model
//!
//! The validated, target-independent description of a foreign binary's layout: classes with fields at fixed offsets,
//! functions at fixed addresses, virtual tables, and verbatim raw blocks.
//!
//! ## Notes
//! - Entities are created once by the semantic builder, filled while their declaration is open, and never mutated
//!   after it closes. The emitter only reads them.
//! - Ownership is tree-shaped: [`Program`] owns its items, [`Class`] owns its members.
//! - Partitioned views (`variables()`, `virtual_functions()`, ...) are derived from one declaration-ordered member
//!   list, so a raw block keeps its position relative to the declarations around it.

mod class;
mod function;
pub mod layout;
mod program;
mod variable;

use std::fmt;

pub use class::{Class, Member};
pub use function::{Function, Parameter};
pub use layout::{ClassInfo, LayoutError, TypeSizes};
pub use program::{Item, Program};
pub use variable::{Variable, VariableKind};

pub use relang_core::lang::conventions::CallingConventionId;
pub use relang_core::lang::modifiers::ModifierId;

/// An optional address or offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Binding {
    #[default]
    Unbound,
    Bound(u64),
}

impl Binding {
    pub fn is_bound(self) -> bool {
        matches!(self, Binding::Bound(_))
    }

    /// The bound value, if any.
    pub fn value(self) -> Option<u64> {
        match self {
            Binding::Bound(value) => Some(value),
            Binding::Unbound => None,
        }
    }
}

impl From<Option<u64>> for Binding {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Binding::Unbound, Binding::Bound)
    }
}

/// A reference to a type by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A primitive or a class name.
    Named(String),
    /// A pointer to the named type.
    Pointer(String),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn pointer(pointee: impl Into<String>) -> Self {
        TypeRef::Pointer(pointee.into())
    }

    /// `void`, the return type of a function that declares none.
    pub fn void() -> Self {
        TypeRef::named("void")
    }

    /// Parse type text as written in a return-type position (`int`, `Entity*`, `Entity *`).
    ///
    /// Empty text reads as `void`.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.strip_suffix('*') {
            Some(pointee) => TypeRef::pointer(pointee.trim_end()),
            None if text.is_empty() => TypeRef::void(),
            None => TypeRef::named(text),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Named(name) if name == "void")
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::Pointer(pointee) => write!(f, "{}*", pointee),
        }
    }
}

/// Access region an entity is emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

/// Raw target source, delimiters already stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawBlock {
    pub text: String,
}

impl RawBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // TypeRef
    // ========================================

    #[test]
    fn test_parse_return_type_text() {
        assert_eq!(TypeRef::parse("int"), TypeRef::named("int"));
        assert_eq!(TypeRef::parse("Entity*"), TypeRef::pointer("Entity"));
        assert_eq!(TypeRef::parse(" Entity * "), TypeRef::pointer("Entity"));
        assert_eq!(TypeRef::parse(""), TypeRef::void());
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeRef::named("float").to_string(), "float");
        assert_eq!(TypeRef::pointer("World").to_string(), "World*");
    }

    #[test]
    fn test_is_void() {
        assert!(TypeRef::void().is_void());
        assert!(!TypeRef::pointer("void").is_void());
    }

    // ========================================
    // Binding
    // ========================================

    #[test]
    fn test_binding_from_option() {
        assert_eq!(Binding::from(Some(0x10)), Binding::Bound(0x10));
        assert_eq!(Binding::from(None), Binding::Unbound);
        assert_eq!(Binding::Bound(4).value(), Some(4));
        assert!(!Binding::default().is_bound());
    }
}
