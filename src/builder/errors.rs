//! Semantic builder errors.
//!
//! Two families are kept apart:
//! - user errors: the input describes something that cannot be emitted (missing bindings, bad literals, impossible
//!   layouts). They carry the source line of the offending declaration.
//! - [`InternalError`]: the event stream itself is malformed. That is a front-end or builder bug and is reported as
//!   `internal compiler error: ...`.

use std::fmt;

use miette::Diagnostic;
use relang_syntax::LiteralError;
use thiserror::Error;

use super::context::ContextKind;
use crate::model::LayoutError;

/// Where a function without an address was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionScope {
    Free,
    Instance,
    Static,
}

impl fmt::Display for FunctionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FunctionScope::Free => "free function",
            FunctionScope::Instance => "member function",
            FunctionScope::Static => "static member function",
        })
    }
}

/// Why a variable needed an explicit offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableScope {
    FirstField,
    Global,
}

impl fmt::Display for VariableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VariableScope::FirstField => "first field",
            VariableScope::Global => "global variable",
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("line {line}: missing address: {scope} `{name}` is not bound to an address")]
    #[diagnostic(
        code(relang::missing_address),
        help("bind it to its address in the target binary with `@ 0x...`")
    )]
    MissingAddress {
        name: String,
        scope: FunctionScope,
        line: usize,
    },

    #[error("line {line}: missing offset: {scope} `{name}` has no explicit offset")]
    #[diagnostic(
        code(relang::missing_offset),
        help("the first field of a class and every global variable need `@ 0x...`")
    )]
    MissingOffset {
        name: String,
        scope: VariableScope,
        line: usize,
    },

    #[error("line {line}: `{modifier}` is only valid on class members, but `{name}` is a free function")]
    #[diagnostic(code(relang::invalid_modifier))]
    InvalidModifier {
        name: String,
        modifier: &'static str,
        line: usize,
    },

    #[error("line {line}: unknown function modifier `{text}`")]
    #[diagnostic(code(relang::unknown_modifier), help("expected `virtual` or `static`"))]
    UnknownModifier { text: String, line: usize },

    #[error("line {line}: unknown calling convention `{text}`")]
    #[diagnostic(
        code(relang::unknown_calling_convention),
        help("expected one of `__cdecl`, `__stdcall`, `__thiscall`, `__fastcall`, `__vectorcall`")
    )]
    UnknownCallingConvention { text: String, line: usize },

    #[error("line {line}: invalid literal: {source}")]
    #[diagnostic(code(relang::invalid_literal))]
    InvalidLiteral {
        line: usize,
        #[source]
        #[diagnostic_source]
        source: LiteralError,
    },

    #[error("line {line}: class `{name}` is already declared")]
    #[diagnostic(code(relang::duplicate_class))]
    DuplicateClass { name: String, line: usize },

    #[error("line {line}: in class `{class}`: {source}")]
    #[diagnostic(code(relang::layout))]
    Layout {
        class: String,
        line: usize,
        #[source]
        #[diagnostic_source]
        source: LayoutError,
    },

    #[error("internal compiler error: {0}")]
    #[diagnostic(
        code(relang::internal),
        help("the declaration event stream is malformed; this is a front-end or compiler bug")
    )]
    Internal(#[from] InternalError),
}

impl BuildError {
    /// Whether this is a compiler/front-end bug rather than a problem with the input.
    pub fn is_internal(&self) -> bool {
        matches!(self, BuildError::Internal(_))
    }
}

/// Event-stream consistency failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    #[error("expected to close a {expected} declaration, but {}", describe_top(.found))]
    ContextMismatch {
        expected: ContextKind,
        found: Option<ContextKind>,
    },

    #[error("`{event}` is not valid {} (line {line})", describe_position(.context))]
    UnexpectedEvent {
        event: &'static str,
        context: Option<ContextKind>,
        line: usize,
    },

    #[error("`{event}` without a preceding type event (line {line})")]
    MissingType { event: &'static str, line: usize },

    #[error("raw block is not wrapped in ``` delimiters (line {line})")]
    MalformedRawBlock { line: usize },

    #[error("class declaration without a name (line {line})")]
    EmptyClassName { line: usize },

    #[error("input ended with open declarations: {}", join_kinds(.open))]
    UnclosedDeclarations { open: Vec<ContextKind> },
}

fn describe_top(found: &Option<ContextKind>) -> String {
    match found {
        Some(kind) => format!("the innermost open declaration is a {}", kind),
        None => "no declaration is open".to_string(),
    }
}

fn describe_position(context: &Option<ContextKind>) -> String {
    match context {
        Some(kind) => format!("inside a {} declaration", kind),
        None => "at top level".to_string(),
    }
}

fn join_kinds(kinds: &[ContextKind]) -> String {
    kinds.iter().map(|k| k.to_string()).collect::<Vec<_>>().join(" > ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_address_message_names_line() {
        let err = BuildError::MissingAddress {
            name: "GetGlobalState".into(),
            scope: FunctionScope::Free,
            line: 7,
        };
        assert_eq!(
            err.to_string(),
            "line 7: missing address: free function `GetGlobalState` is not bound to an address"
        );
        assert!(!err.is_internal());
    }

    #[test]
    fn test_internal_errors_are_prefixed() {
        let err = BuildError::from(InternalError::UnclosedDeclarations {
            open: vec![ContextKind::Class, ContextKind::Function],
        });
        assert!(err.is_internal());
        assert_eq!(
            err.to_string(),
            "internal compiler error: input ended with open declarations: class > function"
        );
    }

    #[test]
    fn test_unexpected_event_position() {
        let err = InternalError::UnexpectedEvent {
            event: "address_literal",
            context: None,
            line: 3,
        };
        assert_eq!(err.to_string(), "`address_literal` is not valid at top level (line 3)");
    }
}
