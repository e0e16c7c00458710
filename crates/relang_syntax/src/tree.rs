//! Materialized declaration tree.
//!
//! Front-ends that build a full parse tree before handing it over can ship it in this shape instead of a raw event
//! stream. [`flatten`] turns it back into the exact event order a streaming front-end would produce, so the semantic
//! builder only ever has one input format to handle.
//!
//! ## Event order
//!
//! ```text
//! class     : EnterClass, <members...>, ExitClass
//! function  : EnterFunction, [FunctionModifier], [ReturnType], [CallingConvention],
//!             (<type>, ExitParameter)*, [AddressLiteral], ExitFunction
//! variable  : EnterVariable, <type>, [AddressLiteral], ExitVariable
//! raw block : RawBlock
//! ```

use serde::{Deserialize, Serialize};

use crate::Span;
use crate::events::DeclEvent;

/// A whole input file: top-level declarations in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceFile {
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Class(ClassDecl),
    Function(FunctionDecl),
    Variable(VariableDecl),
    Raw(RawDecl),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub members: Vec<Declaration>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub modifier: Option<String>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub calling_convention: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamDecl>,
    /// Call address, or vtable byte offset for a virtual function.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub ty: TypeExpr,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    pub ty: TypeExpr,
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub span: Span,
}

/// Raw block text including its delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDecl {
    pub text: String,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpr {
    Primitive(String),
    Pointer(String),
}

/// Flatten a declaration tree into declaration events, depth first.
pub fn flatten(file: &SourceFile) -> Vec<DeclEvent> {
    let mut events = Vec::new();
    for decl in &file.declarations {
        flatten_declaration(decl, &mut events);
    }
    events
}

fn flatten_declaration(decl: &Declaration, out: &mut Vec<DeclEvent>) {
    match decl {
        Declaration::Class(class) => flatten_class(class, out),
        Declaration::Function(function) => flatten_function(function, out),
        Declaration::Variable(variable) => flatten_variable(variable, out),
        Declaration::Raw(raw) => out.push(DeclEvent::RawBlock {
            text: raw.text.clone(),
            span: raw.span,
        }),
    }
}

fn flatten_class(class: &ClassDecl, out: &mut Vec<DeclEvent>) {
    let mut names = Vec::with_capacity(class.bases.len() + 1);
    names.push(class.name.clone());
    names.extend(class.bases.iter().cloned());

    out.push(DeclEvent::EnterClass { names, span: class.span });
    for member in &class.members {
        flatten_declaration(member, out);
    }
    out.push(DeclEvent::ExitClass { span: class.span });
}

fn flatten_function(function: &FunctionDecl, out: &mut Vec<DeclEvent>) {
    let span = function.span;
    out.push(DeclEvent::EnterFunction {
        name: function.name.clone(),
        span,
    });
    if let Some(text) = &function.modifier {
        out.push(DeclEvent::FunctionModifier { text: text.clone(), span });
    }
    if let Some(text) = &function.return_type {
        out.push(DeclEvent::ReturnType { text: text.clone(), span });
    }
    if let Some(text) = &function.calling_convention {
        out.push(DeclEvent::CallingConvention { text: text.clone(), span });
    }
    for param in &function.params {
        out.push(type_event(&param.ty, param.span));
        out.push(DeclEvent::ExitParameter {
            name: param.name.clone(),
            span: param.span,
        });
    }
    if let Some(text) = &function.address {
        out.push(DeclEvent::AddressLiteral { text: text.clone(), span });
    }
    out.push(DeclEvent::ExitFunction { span });
}

fn flatten_variable(variable: &VariableDecl, out: &mut Vec<DeclEvent>) {
    let span = variable.span;
    out.push(DeclEvent::EnterVariable { span });
    out.push(type_event(&variable.ty, span));
    if let Some(text) = &variable.offset {
        out.push(DeclEvent::AddressLiteral { text: text.clone(), span });
    }
    out.push(DeclEvent::ExitVariable {
        name: variable.name.clone(),
        span,
    });
}

fn type_event(ty: &TypeExpr, span: Span) -> DeclEvent {
    match ty {
        TypeExpr::Primitive(name) => DeclEvent::PrimitiveType { name: name.clone(), span },
        TypeExpr::Pointer(pointee) => DeclEvent::PointerType {
            pointee: pointee.clone(),
            span,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(events: &[DeclEvent]) -> Vec<&'static str> {
        events.iter().map(|e| e.kind_name()).collect()
    }

    #[test]
    fn test_flatten_class_with_members() {
        let file = SourceFile {
            declarations: vec![Declaration::Class(ClassDecl {
                name: "Player".into(),
                bases: vec!["Entity".into()],
                members: vec![
                    Declaration::Variable(VariableDecl {
                        name: "health".into(),
                        ty: TypeExpr::Primitive("int".into()),
                        offset: Some("0x10".into()),
                        span: Span::line(2),
                    }),
                    Declaration::Function(FunctionDecl {
                        name: "Jump".into(),
                        modifier: None,
                        return_type: Some("void".into()),
                        calling_convention: Some("__thiscall".into()),
                        params: vec![ParamDecl {
                            name: "height".into(),
                            ty: TypeExpr::Primitive("float".into()),
                            span: Span::line(3),
                        }],
                        address: Some("0x00401000".into()),
                        span: Span::line(3),
                    }),
                ],
                span: Span::line(1),
            })],
        };

        let events = flatten(&file);
        assert_eq!(
            kinds(&events),
            vec![
                "enter_class",
                "enter_variable",
                "primitive_type",
                "address_literal",
                "exit_variable",
                "enter_function",
                "return_type",
                "calling_convention",
                "primitive_type",
                "exit_parameter",
                "address_literal",
                "exit_function",
                "exit_class",
            ]
        );
        assert_eq!(
            events[0],
            DeclEvent::EnterClass {
                names: vec!["Player".into(), "Entity".into()],
                span: Span::line(1),
            }
        );
    }

    #[test]
    fn test_flatten_pointer_and_raw() {
        let file = SourceFile {
            declarations: vec![
                Declaration::Raw(RawDecl {
                    text: "```#include <cstdint>```".into(),
                    span: Span::default(),
                }),
                Declaration::Variable(VariableDecl {
                    name: "g_World".into(),
                    ty: TypeExpr::Pointer("World".into()),
                    offset: None,
                    span: Span::default(),
                }),
            ],
        };

        let events = flatten(&file);
        assert_eq!(
            kinds(&events),
            vec!["raw_block", "enter_variable", "pointer_type", "exit_variable"]
        );
    }

    #[test]
    fn test_deserialize_tree_json() {
        let json = r#"{
            "declarations": [
                {"kind": "class", "name": "Entity", "members": [
                    {"kind": "function", "name": "Update", "modifier": "virtual"}
                ]},
                {"kind": "variable", "name": "g_Count", "ty": {"primitive": "int"}, "offset": "0x10"}
            ]
        }"#;
        let file: SourceFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.declarations.len(), 2);
        match &file.declarations[0] {
            Declaration::Class(c) => {
                assert_eq!(c.name, "Entity");
                assert!(c.bases.is_empty());
                assert_eq!(c.members.len(), 1);
            }
            other => panic!("expected class, got {:?}", other),
        }
    }
}
