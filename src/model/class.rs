use super::layout::TypeSizes;
use super::{Binding, Function, RawBlock, Variable};

/// One class member, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Variable(Variable),
    Function(Function),
    RawBlock(RawBlock),
}

/// A class overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Class {
    pub name: String,
    /// Base class names; the first one is primary for layout.
    pub bases: Vec<String>,
    pub(crate) members: Vec<Member>,
}

impl Class {
    pub fn new(name: impl Into<String>, bases: Vec<String>) -> Self {
        Self {
            name: name.into(),
            bases,
            members: Vec::new(),
        }
    }

    pub fn push(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.push(member);
        self
    }

    /// All members in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Variables in layout order, pads included.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.members.iter().filter_map(|m| match m {
            Member::Variable(v) => Some(v),
            _ => None,
        })
    }

    fn functions(&self) -> impl Iterator<Item = &Function> {
        self.members.iter().filter_map(|m| match m {
            Member::Function(f) => Some(f),
            _ => None,
        })
    }

    /// Virtual functions in vtable order, pads included.
    pub fn virtual_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions().filter(|f| f.is_virtual())
    }

    pub fn instance_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions().filter(|f| f.modifier.is_none())
    }

    pub fn static_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions().filter(|f| f.is_static())
    }

    pub fn raw_blocks(&self) -> impl Iterator<Item = &RawBlock> {
        self.members.iter().filter_map(|m| match m {
            Member::RawBlock(r) => Some(r),
            _ => None,
        })
    }

    pub fn has_virtual_functions(&self) -> bool {
        self.virtual_functions().next().is_some()
    }

    pub fn has_variables(&self) -> bool {
        self.variables().next().is_some()
    }

    /// Byte offset where this class's own storage starts, when it can be derived.
    ///
    /// - no bases: `0`, or the pointer width when the class introduces a vtable pointer;
    /// - one sealed base: the base's size, unless this class adds the first vtable pointer to the hierarchy;
    /// - anything else (unknown base, multiple bases): `None`.
    pub fn layout_origin(&self, sizes: &TypeSizes) -> Option<u64> {
        match self.bases.as_slice() {
            [] if self.has_virtual_functions() => Some(sizes.pointer_width()),
            [] => Some(0),
            [base] => {
                let info = sizes.class(base)?;
                if info.polymorphic || !self.has_virtual_functions() {
                    info.size
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// `sizeof` of the class as laid out: offset of the last variable plus its size.
    ///
    /// A class without variables has the size of its origin when that is non-zero. `None` when any part is unknown.
    pub fn size(&self, sizes: &TypeSizes) -> Option<u64> {
        match self.variables().last() {
            Some(last) => {
                let offset = match last.offset {
                    Binding::Bound(offset) => offset,
                    Binding::Unbound => return None,
                };
                offset.checked_add(sizes.variable_size(last)?)
            }
            None => self.layout_origin(sizes).filter(|&origin| origin > 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::layout::ClassInfo;
    use crate::model::{ModifierId, TypeRef};
    use relang_core::DataModel;

    fn field(name: &str, ty: &str, offset: u64) -> Member {
        Member::Variable(Variable::new(name, TypeRef::named(ty)).with_offset(offset))
    }

    #[test]
    fn test_partitions_keep_declaration_order() {
        let class = Class::new("Player", vec![])
            .with_member(Member::Function(Function::new("Jump").with_address(0x401000)))
            .with_member(Member::Function(Function::new("Update").with_modifier(ModifierId::Virtual)))
            .with_member(Member::RawBlock(RawBlock::new("int x;")))
            .with_member(Member::Function(Function::new("Count").with_modifier(ModifierId::Static)))
            .with_member(Member::Function(Function::new("Draw").with_modifier(ModifierId::Virtual)));

        let virtuals: Vec<_> = class.virtual_functions().map(|f| f.name.as_str()).collect();
        assert_eq!(virtuals, vec!["Update", "Draw"]);
        assert_eq!(class.instance_functions().count(), 1);
        assert_eq!(class.static_functions().count(), 1);
        assert_eq!(class.raw_blocks().count(), 1);
        assert!(matches!(class.members()[2], Member::RawBlock(_)));
    }

    #[test]
    fn test_size_is_last_offset_plus_size() {
        let sizes = TypeSizes::new(DataModel::Ilp32);
        let class = Class::new("Player", vec![])
            .with_member(field("id", "int", 0x0))
            .with_member(field("health", "short", 0x10));
        assert_eq!(class.size(&sizes), Some(0x12));
    }

    #[test]
    fn test_size_unknown_for_unsized_type() {
        let sizes = TypeSizes::new(DataModel::Ilp32);
        let class = Class::new("Player", vec![]).with_member(field("inv", "Inventory", 0x0));
        assert_eq!(class.size(&sizes), None);
    }

    #[test]
    fn test_layout_origin() {
        let mut sizes = TypeSizes::new(DataModel::Lp64);
        sizes.register_class(
            "Entity",
            ClassInfo {
                size: Some(0x10),
                polymorphic: true,
                vtable_slots: Some(1),
            },
        );
        sizes.register_class(
            "Plain",
            ClassInfo {
                size: Some(0x8),
                polymorphic: false,
                vtable_slots: Some(0),
            },
        );

        let virtual_fn = Member::Function(Function::new("Tick").with_modifier(ModifierId::Virtual));

        assert_eq!(Class::new("A", vec![]).layout_origin(&sizes), Some(0));
        assert_eq!(
            Class::new("A", vec![]).with_member(virtual_fn.clone()).layout_origin(&sizes),
            Some(8)
        );
        assert_eq!(Class::new("B", vec!["Entity".into()]).layout_origin(&sizes), Some(0x10));
        assert_eq!(
            Class::new("B", vec!["Plain".into()]).with_member(virtual_fn).layout_origin(&sizes),
            None
        );
        assert_eq!(Class::new("C", vec!["Unknown".into()]).layout_origin(&sizes), None);
        assert_eq!(
            Class::new("D", vec!["Entity".into(), "Plain".into()]).layout_origin(&sizes),
            None
        );
    }

    #[test]
    fn test_size_of_empty_polymorphic_class_is_vtable_pointer() {
        let sizes = TypeSizes::new(DataModel::Ilp32);
        let class = Class::new("Iface", vec![])
            .with_member(Member::Function(Function::new("Run").with_modifier(ModifierId::Virtual)));
        assert_eq!(class.size(&sizes), Some(4));
        assert_eq!(Class::new("Empty", vec![]).size(&sizes), None);
    }
}
