//! Type sizes and class layout resolution.
//!
//! A class is sealed once its declaration closes. Sealing turns the declared members into the final layout:
//! - omitted field offsets are placed right after the previous field,
//! - gaps between fields become private `pad_<hex>` byte arrays,
//! - skipped vtable slots become private `vpad_<hex>` pure virtuals.
//!
//! ## Notes
//! - Sizes come from a [`TypeSizes`] table the target backend supplies: primitives by data model, pointers by
//!   pointer width, and every class sealed so far by its computed size.
//! - Where the class's own storage starts is derived from its bases, see [`Class::layout_origin`]. An unknown origin
//!   only disables the leading pad; it never fails the layout.

use std::collections::HashMap;

use miette::Diagnostic;
use relang_core::lang::primitives;
use relang_core::DataModel;
use thiserror::Error;

use super::{Binding, Class, Function, Member, TypeRef, Variable, VariableKind};

/// What later declarations need to know about a sealed class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInfo {
    pub size: Option<u64>,
    /// The class or one of its bases carries a vtable pointer.
    pub polymorphic: bool,
    /// Entries in the class's vtable, inherited ones included. `None` when a base's count is unknown.
    pub vtable_slots: Option<u64>,
}

/// Byte sizes of every type a field can have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSizes {
    data_model: DataModel,
    classes: HashMap<String, ClassInfo>,
}

impl TypeSizes {
    pub fn new(data_model: DataModel) -> Self {
        Self {
            data_model,
            classes: HashMap::new(),
        }
    }

    pub fn data_model(&self) -> DataModel {
        self.data_model
    }

    /// Width of a pointer, and of one vtable slot.
    pub fn pointer_width(&self) -> u64 {
        self.data_model.pointer_width()
    }

    pub fn register_class(&mut self, name: impl Into<String>, info: ClassInfo) {
        self.classes.insert(name.into(), info);
    }

    /// Record a sealed class so later classes can use it as a base or field type.
    pub fn register_sealed(&mut self, class: &Class) {
        let size = class.size(self);
        let polymorphic = class.has_virtual_functions()
            || class
                .bases
                .first()
                .and_then(|base| self.class(base))
                .is_some_and(|info| info.polymorphic);
        let own_slots = class.virtual_functions().count() as u64;
        let vtable_slots = self.inherited_vtable_slots(class).map(|slots| slots + own_slots);
        self.register_class(
            class.name.clone(),
            ClassInfo {
                size,
                polymorphic,
                vtable_slots,
            },
        );
    }

    /// Vtable entries `class` inherits before its own virtuals: none without bases, the primary base's count with
    /// one sealed base, unknown otherwise.
    pub fn inherited_vtable_slots(&self, class: &Class) -> Option<u64> {
        match class.bases.as_slice() {
            [] => Some(0),
            [base] => self.class(base).and_then(|info| info.vtable_slots),
            _ => None,
        }
    }

    pub fn class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.get(name)
    }

    /// Size of a value of type `ty`, if known.
    pub fn size_of(&self, ty: &TypeRef) -> Option<u64> {
        match ty {
            TypeRef::Pointer(_) => Some(self.pointer_width()),
            TypeRef::Named(name) => primitives::size_of(name, self.data_model)
                .or_else(|| self.classes.get(name).and_then(|info| info.size)),
        }
    }

    /// Storage occupied by `variable`; a pad's own length wins over its element type.
    pub fn variable_size(&self, variable: &Variable) -> Option<u64> {
        match variable.kind {
            VariableKind::Pad { len } => Some(len),
            VariableKind::Field => self.size_of(&variable.ty),
        }
    }
}

/// Most vtable slots a single declared offset may skip.
pub const MAX_SKIPPED_SLOTS: u64 = 4096;

/// Why a declared vtable offset cannot be honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VtableProblem {
    /// Not a multiple of the pointer width.
    Misaligned { pointer_width: u64 },
    /// Before the next free slot.
    SlotTaken { next_free: u64 },
    /// Would need more than [`MAX_SKIPPED_SLOTS`] pad slots.
    TooFar { next_free: u64 },
    /// The number of slots inherited from the bases is not known.
    UnknownInheritedSlots,
}

impl std::fmt::Display for VtableProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VtableProblem::Misaligned { pointer_width } => {
                write!(f, "not a multiple of the {}-byte slot width", pointer_width)
            }
            VtableProblem::SlotTaken { next_free } => {
                write!(f, "slot already taken, next free slot is at 0x{:X}", next_free)
            }
            VtableProblem::TooFar { next_free } => write!(
                f,
                "skips more than {} slots past the next free slot at 0x{:X}",
                MAX_SKIPPED_SLOTS, next_free
            ),
            VtableProblem::UnknownInheritedSlots => {
                write!(f, "the number of slots inherited from the base classes is unknown")
            }
        }
    }
}

/// A class layout that cannot be realized.
///
/// `member` is the index of the offending member in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LayoutError {
    #[error("field `{field}` at offset 0x{offset:X} overlaps {previous}, which ends at 0x{end:X}")]
    #[diagnostic(
        code(relang::overlapping_field),
        help("fields must be declared in ascending offset order without overlapping")
    )]
    OverlappingField {
        member: usize,
        field: String,
        offset: u64,
        previous: String,
        end: u64,
    },

    #[error("cannot place field `{field}` without an offset: the size of {previous} is unknown")]
    #[diagnostic(
        code(relang::unresolvable_offset),
        help("give `{field}` an explicit offset with `@ 0x...`")
    )]
    UnresolvableOffset {
        member: usize,
        field: String,
        previous: String,
    },

    #[error("field `{field}` at offset 0x{offset:X} extends past the end of the address space")]
    #[diagnostic(code(relang::offset_overflow))]
    OffsetOverflow { member: usize, field: String, offset: u64 },

    #[error("virtual function `{function}` at vtable offset 0x{offset:X}: {problem}")]
    #[diagnostic(code(relang::invalid_vtable_offset))]
    InvalidVtableOffset {
        member: usize,
        function: String,
        offset: u64,
        problem: VtableProblem,
    },
}

impl LayoutError {
    /// Declaration-order index of the member the error is about.
    pub fn member_index(&self) -> usize {
        match self {
            LayoutError::OverlappingField { member, .. }
            | LayoutError::UnresolvableOffset { member, .. }
            | LayoutError::OffsetOverflow { member, .. }
            | LayoutError::InvalidVtableOffset { member, .. } => *member,
        }
    }
}

/// Resolve the final layout of a closed class.
#[tracing::instrument(skip_all, fields(class = %class.name))]
pub fn seal(mut class: Class, sizes: &TypeSizes) -> Result<Class, LayoutError> {
    let pointer_width = sizes.pointer_width();
    let origin = class.layout_origin(sizes);
    let members = std::mem::take(&mut class.members);
    let mut sealed = Vec::with_capacity(members.len());

    // End of the previous storage and what occupies it.
    let mut cursor = origin;
    let mut previous = origin_owner(&class);
    // Byte offset of the next free vtable slot, after the inherited ones.
    let mut next_slot = sizes
        .inherited_vtable_slots(&class)
        .map(|slots| slots.saturating_mul(pointer_width));

    for (index, member) in members.into_iter().enumerate() {
        match member {
            Member::Variable(mut variable) => {
                let start = match (variable.offset, cursor) {
                    (Binding::Bound(offset), Some(end)) if offset < end => {
                        return Err(LayoutError::OverlappingField {
                            member: index,
                            field: variable.name,
                            offset,
                            previous,
                            end,
                        });
                    }
                    (Binding::Bound(offset), Some(end)) => {
                        if offset > end {
                            tracing::debug!(at = end, len = offset - end, "inserting field pad");
                            sealed.push(Member::Variable(Variable::pad(end, offset - end)));
                        }
                        offset
                    }
                    (Binding::Bound(offset), None) => offset,
                    (Binding::Unbound, Some(end)) => {
                        variable.offset = Binding::Bound(end);
                        end
                    }
                    (Binding::Unbound, None) => {
                        return Err(LayoutError::UnresolvableOffset {
                            member: index,
                            field: variable.name,
                            previous,
                        });
                    }
                };
                cursor = match sizes.variable_size(&variable) {
                    Some(size) => match start.checked_add(size) {
                        Some(end) => Some(end),
                        None => {
                            return Err(LayoutError::OffsetOverflow {
                                member: index,
                                field: variable.name,
                                offset: start,
                            });
                        }
                    },
                    None => None,
                };
                previous = format!("`{}`", variable.name);
                sealed.push(Member::Variable(variable));
            }
            Member::Function(mut function) if function.is_virtual() => {
                if let Binding::Bound(offset) = function.address {
                    if offset % pointer_width != 0 {
                        return Err(LayoutError::InvalidVtableOffset {
                            member: index,
                            function: function.name,
                            offset,
                            problem: VtableProblem::Misaligned { pointer_width },
                        });
                    }
                    let Some(mut slot) = next_slot else {
                        return Err(LayoutError::InvalidVtableOffset {
                            member: index,
                            function: function.name,
                            offset,
                            problem: VtableProblem::UnknownInheritedSlots,
                        });
                    };
                    if offset < slot {
                        return Err(LayoutError::InvalidVtableOffset {
                            member: index,
                            function: function.name,
                            offset,
                            problem: VtableProblem::SlotTaken { next_free: slot },
                        });
                    }
                    if (offset - slot) / pointer_width > MAX_SKIPPED_SLOTS {
                        return Err(LayoutError::InvalidVtableOffset {
                            member: index,
                            function: function.name,
                            offset,
                            problem: VtableProblem::TooFar { next_free: slot },
                        });
                    }
                    while slot < offset {
                        tracing::debug!(slot, "inserting vtable pad");
                        sealed.push(Member::Function(Function::vtable_pad(slot)));
                        slot += pointer_width;
                    }
                    next_slot = Some(slot);
                }
                function.address = Binding::Unbound;
                next_slot = next_slot.map(|slot| slot.saturating_add(pointer_width));
                sealed.push(Member::Function(function));
            }
            other => sealed.push(other),
        }
    }

    class.members = sealed;
    Ok(class)
}

fn origin_owner(class: &Class) -> String {
    match class.bases.first() {
        Some(base) => format!("the base class `{}`", base),
        None if class.has_virtual_functions() => "the vtable pointer".to_string(),
        None => "the class origin".to_string(),
    }
}
