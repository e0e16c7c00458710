//! Target syntax rules.
//!
//! The emitter decides *what* goes where (ordering, access regions, spacing). A [`TargetSyntax`] decides how each
//! piece is spelled in the output language and how large the target's types are.

use relang_core::DataModel;

use super::config::Include;
use crate::model::{Class, Function, TypeSizes, Variable, Visibility};

/// How a trampoline reaches its callee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallScope {
    /// Top-level function; no instance pointer.
    Free,
    /// Member function; the instance pointer is forwarded first.
    Instance,
    /// Static member function; no instance pointer.
    Static,
}

/// An always-inlined function that forwards to a fixed address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trampoline {
    pub signature: String,
    /// Statements, without indentation.
    pub body: Vec<String>,
}

pub trait TargetSyntax {
    /// Lines at the very top of the file, before any declaration.
    fn file_header(&self, include_guard: bool, includes: &[Include]) -> Vec<String>;

    /// Declaration of a class name ahead of any class body, so earlier classes can point at later ones.
    fn forward_declaration(&self, class: &Class) -> String;

    /// Lines that open a packed class (pack pragmas and the class head, without the brace).
    fn class_prologue(&self, class: &Class) -> Vec<String>;

    /// Lines after the closing brace, given the computed size if it should be asserted.
    fn class_epilogue(&self, class: &Class, asserted_size: Option<u64>) -> Vec<String>;

    fn access_label(&self, visibility: Visibility) -> &'static str;

    fn field(&self, variable: &Variable, offset: u64) -> String;

    fn pure_virtual(&self, function: &Function) -> String;

    fn trampoline(&self, function: &Function, scope: CallScope, address: u64) -> Trampoline;

    fn global_variable(&self, variable: &Variable, address: u64) -> String;

    /// Size table for primitives and pointers under `data_model`.
    fn type_sizes(&self, data_model: DataModel) -> TypeSizes {
        TypeSizes::new(data_model)
    }
}
