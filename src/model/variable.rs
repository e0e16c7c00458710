use super::{Binding, TypeRef, Visibility};

/// Whether a variable was declared or synthesized to fill a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Field,
    /// Opaque storage of `len` bytes covering an unknown range.
    Pad { len: u64 },
}

/// A class field or a global variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    pub name: String,
    pub ty: TypeRef,
    /// Byte offset inside the owning class, or absolute address for a global.
    pub offset: Binding,
    pub kind: VariableKind,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            offset: Binding::Unbound,
            kind: VariableKind::Field,
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Binding::Bound(offset);
        self
    }

    /// A pad covering `len` bytes starting at `offset`.
    pub fn pad(offset: u64, len: u64) -> Self {
        Self {
            name: format!("pad_{:x}", offset),
            ty: TypeRef::named("char"),
            offset: Binding::Bound(offset),
            kind: VariableKind::Pad { len },
        }
    }

    pub fn is_pad(&self) -> bool {
        matches!(self.kind, VariableKind::Pad { .. })
    }

    pub fn visibility(&self) -> Visibility {
        if self.is_pad() { Visibility::Private } else { Visibility::Public }
    }
}
