//! Program emitter.
//!
//! Walks a sealed [`Program`] once, in declaration order, and renders it through a [`TargetSyntax`].
//!
//! ## Notes
//! - The only state is indentation (inside [`SourceWriter`]), the current access region of the open class, and the
//!   size table that grows as classes are emitted.
//! - Every class is forward declared right after the file header, in declaration order.
//! - Access labels are written lazily: one before the first member of a class, then only when the region changes.
//!   Raw blocks count as public.
//! - Class sizes are registered in declaration order on top of the program's own data model, exactly as the builder
//!   registered them while sealing.

use miette::Diagnostic;
use relang_core::DataModel;
use thiserror::Error;

use super::config::EmitConfig;
use super::syntax::{CallScope, TargetSyntax};
use super::writer::SourceWriter;
use crate::model::{Binding, Class, Function, Item, Member, Program, TypeSizes, Variable, Visibility};

/// Bindings that sealing should have resolved but did not.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EmitError {
    #[error("internal compiler error: field `{class}::{field}` has no resolved offset")]
    #[diagnostic(code(relang::emit::unbound_offset))]
    UnboundOffset { class: String, field: String },

    #[error("internal compiler error: function `{function}` has no call address")]
    #[diagnostic(code(relang::emit::unbound_address))]
    UnboundAddress { function: String },

    #[error("internal compiler error: global variable `{variable}` has no address")]
    #[diagnostic(code(relang::emit::unbound_global))]
    UnboundGlobal { variable: String },

    #[error("internal compiler error: free function `{function}` carries a member modifier")]
    #[diagnostic(code(relang::emit::free_member))]
    FreeMemberFunction { function: String },
}

pub struct Emitter<'a, S: TargetSyntax> {
    syntax: &'a S,
    config: &'a EmitConfig,
    sizes: TypeSizes,
    writer: SourceWriter,
    /// Access region of the open class; `None` before its first label.
    region: Option<Visibility>,
}

impl<'a, S: TargetSyntax> Emitter<'a, S> {
    pub fn new(syntax: &'a S, config: &'a EmitConfig) -> Self {
        Self {
            syntax,
            config,
            sizes: syntax.type_sizes(DataModel::default()),
            writer: SourceWriter::new(config.indent_width),
            region: None,
        }
    }

    /// Render the whole program.
    #[tracing::instrument(skip_all, fields(items = program.items().len()))]
    pub fn emit_program(mut self, program: &Program) -> Result<String, EmitError> {
        self.sizes = self.syntax.type_sizes(program.data_model());

        for line in self.syntax.file_header(self.config.include_guard, &self.config.includes) {
            self.writer.line(&line);
        }
        self.writer.blank_line();

        let mut classes = program.classes().peekable();
        if classes.peek().is_some() {
            for class in classes {
                self.writer.line(&self.syntax.forward_declaration(class));
            }
            self.writer.blank_line();
        }

        for item in program.items() {
            match item {
                Item::Class(class) => self.emit_class(class)?,
                Item::Function(function) => {
                    if function.modifier.is_some() {
                        return Err(EmitError::FreeMemberFunction {
                            function: function.name.clone(),
                        });
                    }
                    self.emit_trampoline(function, CallScope::Free)?;
                }
                Item::Variable(variable) => self.emit_global(variable)?,
                Item::RawBlock(raw) => self.writer.raw(&raw.text),
            }
        }

        Ok(self.writer.finish())
    }

    fn emit_class(&mut self, class: &Class) -> Result<(), EmitError> {
        self.writer.separate();
        for line in self.syntax.class_prologue(class) {
            self.writer.line(&line);
        }
        self.writer.open("{");
        self.writer.indent();

        self.region = None;

        for member in class.members() {
            match member {
                Member::Variable(variable) => {
                    let offset = match variable.offset {
                        Binding::Bound(offset) => offset,
                        Binding::Unbound => {
                            return Err(EmitError::UnboundOffset {
                                class: class.name.clone(),
                                field: variable.name.clone(),
                            });
                        }
                    };
                    self.enter_region(variable.visibility());
                    self.writer.line(&self.syntax.field(variable, offset));
                }
                Member::Function(function) if function.is_virtual() => {
                    self.enter_region(function.visibility());
                    self.writer.line(&self.syntax.pure_virtual(function));
                }
                Member::Function(function) => {
                    self.enter_region(function.visibility());
                    let scope = if function.is_static() {
                        CallScope::Static
                    } else {
                        CallScope::Instance
                    };
                    self.emit_trampoline(function, scope)?;
                }
                Member::RawBlock(raw) => {
                    self.enter_region(Visibility::Public);
                    self.writer.raw(&raw.text);
                }
            }
        }

        self.writer.dedent();

        let size = class.size(&self.sizes);
        let asserted = match size {
            Some(size) if self.config.size_assertions => Some(size),
            None if self.config.size_assertions => {
                tracing::debug!(class = %class.name, "size unknown, skipping size assertion");
                None
            }
            _ => None,
        };
        for line in self.syntax.class_epilogue(class, asserted) {
            self.writer.line(&line);
        }
        self.writer.blank_line();

        self.sizes.register_sealed(class);
        Ok(())
    }

    fn enter_region(&mut self, visibility: Visibility) {
        if self.region != Some(visibility) {
            self.region = Some(visibility);
            self.writer.label(self.syntax.access_label(visibility));
        }
    }

    fn emit_trampoline(&mut self, function: &Function, scope: CallScope) -> Result<(), EmitError> {
        let address = function.address.value().ok_or_else(|| EmitError::UnboundAddress {
            function: function.name.clone(),
        })?;
        let trampoline = self.syntax.trampoline(function, scope, address);

        self.writer.separate();
        self.writer.line(&trampoline.signature);
        self.writer.open("{");
        self.writer.indent();
        for statement in &trampoline.body {
            self.writer.line(statement);
        }
        self.writer.dedent();
        self.writer.line("}");
        self.writer.blank_line();
        Ok(())
    }

    fn emit_global(&mut self, variable: &Variable) -> Result<(), EmitError> {
        let address = variable.offset.value().ok_or_else(|| EmitError::UnboundGlobal {
            variable: variable.name.clone(),
        })?;
        self.writer.line(&self.syntax.global_variable(variable, address));
        Ok(())
    }
}

/// Render `program` with `syntax`.
pub fn emit_program<S: TargetSyntax>(program: &Program, syntax: &S, config: &EmitConfig) -> Result<String, EmitError> {
    Emitter::new(syntax, config).emit_program(program)
}
