use relang_core::DataModel;

use super::layout::TypeSizes;
use super::{Class, Function, RawBlock, Variable};

/// One top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Class(Class),
    Function(Function),
    Variable(Variable),
    RawBlock(RawBlock),
}

/// A whole compiled input: top-level items in declaration order.
///
/// Classes are sealed under one data model; the program keeps it so emission sizes types the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Program {
    items: Vec<Item>,
    data_model: DataModel,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_model(mut self, data_model: DataModel) -> Self {
        self.data_model = data_model;
        self
    }

    pub fn data_model(&self) -> DataModel {
        self.data_model
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.push(item);
        self
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.items.iter().filter_map(|i| match i {
            Item::Class(c) => Some(c),
            _ => None,
        })
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.items.iter().filter_map(|i| match i {
            Item::Function(f) => Some(f),
            _ => None,
        })
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.items.iter().filter_map(|i| match i {
            Item::Variable(v) => Some(v),
            _ => None,
        })
    }

    pub fn raw_blocks(&self) -> impl Iterator<Item = &RawBlock> {
        self.items.iter().filter_map(|i| match i {
            Item::RawBlock(r) => Some(r),
            _ => None,
        })
    }

    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes().find(|c| c.name == name)
    }

    /// Register every class's size in declaration order on top of the target's base table.
    pub fn type_sizes(&self, mut sizes: TypeSizes) -> TypeSizes {
        for class in self.classes() {
            sizes.register_sealed(class);
        }
        sizes
    }
}
