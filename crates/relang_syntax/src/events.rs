//! Declaration events.
//!
//! The front-end walks its parse tree and reports each declaration boundary as an event. Events arrive in source
//! order and nest strictly: every `Enter*` is matched by its `Exit*` before the enclosing declaration exits.
//!
//! A few events are context-free on their own and only get meaning from what is currently open. An
//! [`DeclEvent::AddressLiteral`] is a call address inside a function declaration but a field offset inside a variable
//! declaration.

use serde::{Deserialize, Serialize};

use crate::Span;

/// A single declaration event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclEvent {
    /// `class Name : Base1, Base2 {`. The first name is the class; the rest are its bases in order.
    EnterClass {
        names: Vec<String>,
        #[serde(default)]
        span: Span,
    },
    ExitClass {
        #[serde(default)]
        span: Span,
    },
    EnterFunction {
        name: String,
        #[serde(default)]
        span: Span,
    },
    ExitFunction {
        #[serde(default)]
        span: Span,
    },
    /// `virtual` / `static`.
    FunctionModifier {
        text: String,
        #[serde(default)]
        span: Span,
    },
    /// Return type text exactly as written (`void`, `Entity*`).
    ReturnType {
        text: String,
        #[serde(default)]
        span: Span,
    },
    /// Calling convention tag (`__thiscall`, ...).
    CallingConvention {
        text: String,
        #[serde(default)]
        span: Span,
    },
    /// End of one parameter. Its type was announced by the type event just before it.
    ExitParameter {
        name: String,
        #[serde(default)]
        span: Span,
    },
    EnterVariable {
        #[serde(default)]
        span: Span,
    },
    /// End of a variable declaration. Its type was announced by an earlier type event.
    ExitVariable {
        name: String,
        #[serde(default)]
        span: Span,
    },
    /// Hexadecimal literal including its `0x` prefix.
    AddressLiteral {
        text: String,
        #[serde(default)]
        span: Span,
    },
    /// `Name*`
    PointerType {
        pointee: String,
        #[serde(default)]
        span: Span,
    },
    /// A plain type name: a primitive or a class name.
    PrimitiveType {
        name: String,
        #[serde(default)]
        span: Span,
    },
    /// Raw target source, still wrapped in its delimiters.
    RawBlock {
        text: String,
        #[serde(default)]
        span: Span,
    },
}

impl DeclEvent {
    pub fn span(&self) -> Span {
        match self {
            DeclEvent::EnterClass { span, .. }
            | DeclEvent::ExitClass { span }
            | DeclEvent::EnterFunction { span, .. }
            | DeclEvent::ExitFunction { span }
            | DeclEvent::FunctionModifier { span, .. }
            | DeclEvent::ReturnType { span, .. }
            | DeclEvent::CallingConvention { span, .. }
            | DeclEvent::ExitParameter { span, .. }
            | DeclEvent::EnterVariable { span }
            | DeclEvent::ExitVariable { span, .. }
            | DeclEvent::AddressLiteral { span, .. }
            | DeclEvent::PointerType { span, .. }
            | DeclEvent::PrimitiveType { span, .. }
            | DeclEvent::RawBlock { span, .. } => *span,
        }
    }

    /// Short name used in diagnostics and debug dumps.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DeclEvent::EnterClass { .. } => "enter_class",
            DeclEvent::ExitClass { .. } => "exit_class",
            DeclEvent::EnterFunction { .. } => "enter_function",
            DeclEvent::ExitFunction { .. } => "exit_function",
            DeclEvent::FunctionModifier { .. } => "function_modifier",
            DeclEvent::ReturnType { .. } => "return_type",
            DeclEvent::CallingConvention { .. } => "calling_convention",
            DeclEvent::ExitParameter { .. } => "exit_parameter",
            DeclEvent::EnterVariable { .. } => "enter_variable",
            DeclEvent::ExitVariable { .. } => "exit_variable",
            DeclEvent::AddressLiteral { .. } => "address_literal",
            DeclEvent::PointerType { .. } => "pointer_type",
            DeclEvent::PrimitiveType { .. } => "primitive_type",
            DeclEvent::RawBlock { .. } => "raw_block",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged_event() {
        let json = r#"{"kind": "enter_class", "names": ["Player", "Entity"], "span": {"line": 3}}"#;
        let event: DeclEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            DeclEvent::EnterClass {
                names: vec!["Player".into(), "Entity".into()],
                span: Span::line(3),
            }
        );
    }

    #[test]
    fn test_span_defaults_when_missing() {
        let event: DeclEvent = serde_json::from_str(r#"{"kind": "exit_class"}"#).unwrap();
        assert_eq!(event.span(), Span::default());
    }

    #[test]
    fn test_kind_name_matches_serde_tag() {
        let event = DeclEvent::AddressLiteral {
            text: "0x10".into(),
            span: Span::default(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(&format!("\"kind\":\"{}\"", event.kind_name())));
    }
}
