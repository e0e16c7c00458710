//! Semantic builder: declaration events in, validated [`Program`] out.
//!
//! The builder is a single-pass state machine over [`DeclEvent`]s. It keeps a [`ContextStack`] of open declarations,
//! the entity currently being filled for each open kind, and a pending type that the next parameter or variable
//! consumes.
//!
//! ## Notes
//! - Every check runs when its declaration closes and the first failure aborts the build.
//! - Classes are sealed (see [`crate::model::layout`]) as soon as they close, so a class can only use classes declared
//!   before it as bases or field types.
//! - Function modifier, return type and calling convention events outside a function are internal errors. With
//!   [`BuilderOptions::strict_placement`] off they are logged and ignored instead.
//!
//! ## Examples
//! ```rust
//! use relang::builder::{BuilderOptions, build_events};
//! use relang::model::TypeSizes;
//! use relang_core::DataModel;
//! use relang_syntax::{DeclEvent, Span};
//!
//! let events = vec![
//!     DeclEvent::EnterFunction { name: "GetGlobalState".into(), span: Span::line(1) },
//!     DeclEvent::ExitFunction { span: Span::line(1) },
//! ];
//! let err = build_events(&events, TypeSizes::new(DataModel::Ilp32), BuilderOptions::default()).unwrap_err();
//! assert!(err.to_string().contains("missing address"));
//! ```

pub mod context;
pub mod errors;


use relang_core::lang::{conventions, modifiers, raw};
use relang_syntax::tree::{self, SourceFile};
use relang_syntax::{DeclEvent, Span, parse_hex};

pub use context::{ContextKind, ContextStack};
pub use errors::{BuildError, FunctionScope, InternalError, VariableScope};

use crate::model::layout;
use crate::model::{Binding, Class, Function, Item, Member, Parameter, Program, RawBlock, TypeRef, TypeSizes, Variable};

/// Builder behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Reject function modifier / return type / calling convention events outside a function declaration.
    pub strict_placement: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self { strict_placement: true }
    }
}

impl BuilderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_placement(mut self, strict: bool) -> Self {
        self.strict_placement = strict;
        self
    }
}

/// A class whose declaration is still open.
struct OpenClass {
    class: Class,
    /// Source span of each member, parallel to `class.members()`.
    spans: Vec<Span>,
    span: Span,
}

impl OpenClass {
    fn push(&mut self, member: Member, span: Span) {
        self.class.push(member);
        self.spans.push(span);
    }
}

pub struct SemanticBuilder {
    options: BuilderOptions,
    sizes: TypeSizes,
    contexts: ContextStack,
    program: Program,
    class: Option<OpenClass>,
    function: Option<Function>,
    /// Offset collected for the open variable declaration.
    variable: Option<Binding>,
    pending_type: Option<TypeRef>,
}

impl SemanticBuilder {
    /// Create a builder that sizes fields with `sizes` (usually the target backend's table).
    pub fn new(sizes: TypeSizes) -> Self {
        Self {
            options: BuilderOptions::default(),
            program: Program::new().with_data_model(sizes.data_model()),
            sizes,
            contexts: ContextStack::new(),
            class: None,
            function: None,
            variable: None,
            pending_type: None,
        }
    }

    pub fn with_options(mut self, options: BuilderOptions) -> Self {
        self.options = options;
        self
    }

    /// Feed every event, then [`finish`](Self::finish).
    #[tracing::instrument(skip_all, fields(events = events.len()))]
    pub fn build(mut self, events: &[DeclEvent]) -> Result<Program, BuildError> {
        for event in events {
            self.handle(event)?;
        }
        self.finish()
    }

    /// Apply one event.
    pub fn handle(&mut self, event: &DeclEvent) -> Result<(), BuildError> {
        let span = event.span();
        match event {
            DeclEvent::EnterClass { names, .. } => self.enter_class(names, span),
            DeclEvent::ExitClass { .. } => self.exit_class(),
            DeclEvent::EnterFunction { name, .. } => self.enter_function(name, span),
            DeclEvent::ExitFunction { .. } => self.exit_function(span),
            DeclEvent::FunctionModifier { text, .. } => {
                let Some(function) = self.function_part(event)? else {
                    return Ok(());
                };
                let modifier = modifiers::from_str(text.trim()).ok_or_else(|| BuildError::UnknownModifier {
                    text: text.clone(),
                    line: span.line,
                })?;
                function.modifier = Some(modifier);
                Ok(())
            }
            DeclEvent::ReturnType { text, .. } => {
                if let Some(function) = self.function_part(event)? {
                    function.return_type = TypeRef::parse(text);
                }
                Ok(())
            }
            DeclEvent::CallingConvention { text, .. } => {
                let Some(function) = self.function_part(event)? else {
                    return Ok(());
                };
                let cc = conventions::from_str(text.trim()).ok_or_else(|| BuildError::UnknownCallingConvention {
                    text: text.clone(),
                    line: span.line,
                })?;
                function.calling_convention = Some(cc);
                Ok(())
            }
            DeclEvent::ExitParameter { name, .. } => self.exit_parameter(name, event),
            DeclEvent::EnterVariable { .. } => self.enter_variable(event),
            DeclEvent::ExitVariable { name, .. } => self.exit_variable(name, span),
            DeclEvent::AddressLiteral { text, .. } => self.address_literal(text, event),
            DeclEvent::PointerType { pointee, .. } => {
                self.pending_type = Some(TypeRef::pointer(pointee.trim()));
                Ok(())
            }
            DeclEvent::PrimitiveType { name, .. } => {
                self.pending_type = Some(TypeRef::named(name.trim()));
                Ok(())
            }
            DeclEvent::RawBlock { text, .. } => self.raw_block(text, span),
        }
    }

    /// Check that every declaration was closed and hand out the program.
    pub fn finish(self) -> Result<Program, BuildError> {
        if !self.contexts.is_empty() {
            return Err(InternalError::UnclosedDeclarations {
                open: self.contexts.open().to_vec(),
            }
            .into());
        }
        Ok(self.program)
    }

    fn unexpected(&self, event: &DeclEvent) -> InternalError {
        InternalError::UnexpectedEvent {
            event: event.kind_name(),
            context: self.contexts.top(),
            line: event.span().line,
        }
    }

    // ---- classes ----

    fn enter_class(&mut self, names: &[String], span: Span) -> Result<(), BuildError> {
        if !self.contexts.is_empty() {
            return Err(InternalError::UnexpectedEvent {
                event: "enter_class",
                context: self.contexts.top(),
                line: span.line,
            }
            .into());
        }
        let (name, bases) = names
            .split_first()
            .ok_or(InternalError::EmptyClassName { line: span.line })?;
        if self.program.class(name).is_some() {
            return Err(BuildError::DuplicateClass {
                name: name.clone(),
                line: span.line,
            });
        }

        self.class = Some(OpenClass {
            class: Class::new(name.clone(), bases.to_vec()),
            spans: Vec::new(),
            span,
        });
        self.contexts.push(ContextKind::Class);
        Ok(())
    }

    fn exit_class(&mut self) -> Result<(), BuildError> {
        self.contexts.pop(ContextKind::Class)?;
        let open = self.class.take().ok_or(InternalError::ContextMismatch {
            expected: ContextKind::Class,
            found: None,
        })?;

        let name = open.class.name.clone();
        let sealed = layout::seal(open.class, &self.sizes).map_err(|source| {
            let line = open
                .spans
                .get(source.member_index())
                .map_or(open.span.line, |span| span.line);
            BuildError::Layout {
                class: name.clone(),
                line,
                source,
            }
        })?;

        self.sizes.register_sealed(&sealed);
        tracing::debug!(class = %name, size = ?sealed.size(&self.sizes), "sealed class");
        self.program.push(Item::Class(sealed));
        Ok(())
    }

    // ---- functions ----

    fn enter_function(&mut self, name: &str, span: Span) -> Result<(), BuildError> {
        match self.contexts.top() {
            None | Some(ContextKind::Class) => {}
            context => {
                return Err(InternalError::UnexpectedEvent {
                    event: "enter_function",
                    context,
                    line: span.line,
                }
                .into());
            }
        }
        self.function = Some(Function::new(name));
        self.contexts.push(ContextKind::Function);
        Ok(())
    }

    /// The open function, for events that are only meaningful inside one.
    ///
    /// Returns `Ok(None)` when a misplaced event is tolerated.
    fn function_part(&mut self, event: &DeclEvent) -> Result<Option<&mut Function>, BuildError> {
        if self.contexts.top() != Some(ContextKind::Function) {
            if self.options.strict_placement {
                return Err(self.unexpected(event).into());
            }
            tracing::warn!(
                event = event.kind_name(),
                line = event.span().line,
                "ignoring event outside of a function declaration"
            );
            return Ok(None);
        }
        match self.function.as_mut() {
            Some(function) => Ok(Some(function)),
            None => Err(InternalError::ContextMismatch {
                expected: ContextKind::Function,
                found: None,
            }
            .into()),
        }
    }

    fn exit_parameter(&mut self, name: &str, event: &DeclEvent) -> Result<(), BuildError> {
        if self.contexts.top() != Some(ContextKind::Function) {
            return Err(self.unexpected(event).into());
        }
        let ty = self.pending_type.take().ok_or(InternalError::MissingType {
            event: "exit_parameter",
            line: event.span().line,
        })?;
        if let Some(function) = self.function.as_mut() {
            function.params.push(Parameter::new(name, ty));
        }
        Ok(())
    }

    fn exit_function(&mut self, span: Span) -> Result<(), BuildError> {
        self.contexts.pop(ContextKind::Function)?;
        let function = self.function.take().ok_or(InternalError::ContextMismatch {
            expected: ContextKind::Function,
            found: None,
        })?;

        match self.class.as_mut() {
            Some(open) => {
                if !function.is_virtual() && !function.address.is_bound() {
                    let scope = if function.is_static() {
                        FunctionScope::Static
                    } else {
                        FunctionScope::Instance
                    };
                    return Err(BuildError::MissingAddress {
                        name: function.name,
                        scope,
                        line: span.line,
                    });
                }
                open.push(Member::Function(function), span);
            }
            None => {
                if let Some(modifier) = function.modifier {
                    return Err(BuildError::InvalidModifier {
                        name: function.name,
                        modifier: modifiers::as_str(modifier),
                        line: span.line,
                    });
                }
                if !function.address.is_bound() {
                    return Err(BuildError::MissingAddress {
                        name: function.name,
                        scope: FunctionScope::Free,
                        line: span.line,
                    });
                }
                self.program.push(Item::Function(function));
            }
        }
        Ok(())
    }

    // ---- variables ----

    fn enter_variable(&mut self, event: &DeclEvent) -> Result<(), BuildError> {
        match self.contexts.top() {
            None | Some(ContextKind::Class) => {}
            Some(_) => return Err(self.unexpected(event).into()),
        }
        self.variable = Some(Binding::Unbound);
        self.contexts.push(ContextKind::Variable);
        Ok(())
    }

    fn exit_variable(&mut self, name: &str, span: Span) -> Result<(), BuildError> {
        self.contexts.pop(ContextKind::Variable)?;
        let offset = self.variable.take().ok_or(InternalError::ContextMismatch {
            expected: ContextKind::Variable,
            found: None,
        })?;
        let ty = self.pending_type.take().ok_or(InternalError::MissingType {
            event: "exit_variable",
            line: span.line,
        })?;

        let variable = Variable {
            offset,
            ..Variable::new(name, ty)
        };

        match self.class.as_mut() {
            Some(open) => {
                if !open.class.has_variables() && !offset.is_bound() {
                    return Err(BuildError::MissingOffset {
                        name: variable.name,
                        scope: VariableScope::FirstField,
                        line: span.line,
                    });
                }
                open.push(Member::Variable(variable), span);
            }
            None => {
                if !offset.is_bound() {
                    return Err(BuildError::MissingOffset {
                        name: variable.name,
                        scope: VariableScope::Global,
                        line: span.line,
                    });
                }
                self.program.push(Item::Variable(variable));
            }
        }
        Ok(())
    }

    // ---- literals and raw blocks ----

    fn address_literal(&mut self, text: &str, event: &DeclEvent) -> Result<(), BuildError> {
        let line = event.span().line;
        match self.contexts.top() {
            Some(ContextKind::Function) => {
                let address = parse_hex(text.trim()).map_err(|source| BuildError::InvalidLiteral { line, source })?;
                if let Some(function) = self.function.as_mut() {
                    function.address = Binding::Bound(address);
                }
                Ok(())
            }
            Some(ContextKind::Variable) => {
                let offset = parse_hex(text.trim()).map_err(|source| BuildError::InvalidLiteral { line, source })?;
                self.variable = Some(Binding::Bound(offset));
                Ok(())
            }
            _ => Err(self.unexpected(event).into()),
        }
    }

    fn raw_block(&mut self, text: &str, span: Span) -> Result<(), BuildError> {
        let inner = raw::strip_delimiters(text).ok_or(InternalError::MalformedRawBlock { line: span.line })?;
        let block = RawBlock::new(inner);
        match self.class.as_mut() {
            Some(open) => open.push(Member::RawBlock(block), span),
            None => self.program.push(Item::RawBlock(block)),
        }
        Ok(())
    }
}

/// Build a program from an event stream.
pub fn build_events(events: &[DeclEvent], sizes: TypeSizes, options: BuilderOptions) -> Result<Program, BuildError> {
    SemanticBuilder::new(sizes).with_options(options).build(events)
}

/// Build a program from a materialized declaration tree.
pub fn build_source_file(file: &SourceFile, sizes: TypeSizes, options: BuilderOptions) -> Result<Program, BuildError> {
    build_events(&tree::flatten(file), sizes, options)
}
