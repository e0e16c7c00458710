//! Property-based tests for the RELang compiler
//!
//! These tests use proptest to verify layout invariants across many randomly
//! generated declaration trees.

use proptest::prelude::*;
use relang::builder::BuildError;
use relang::pipeline::{CompileError, CompileOptions, compile_source_file};
use relang_syntax::tree::{ClassDecl, Declaration, FunctionDecl, RawDecl, SourceFile, TypeExpr, VariableDecl};
use relang_syntax::Span;

// =============================================================================
// Generators
// =============================================================================

/// Primitive spellings with their ILP32 sizes.
const FIELD_TYPES: &[(&str, u64)] = &[
    ("char", 1),
    ("short", 2),
    ("int", 4),
    ("float", 4),
    ("double", 8),
    ("long long", 8),
];

fn variable(name: String, ty: &str, offset: Option<u64>) -> Declaration {
    Declaration::Variable(VariableDecl {
        name,
        ty: TypeExpr::Primitive(ty.to_string()),
        offset: offset.map(|o| format!("0x{:X}", o)),
        span: Span::default(),
    })
}

fn virtual_function(name: String, slot_offset: Option<u64>) -> Declaration {
    Declaration::Function(FunctionDecl {
        name,
        modifier: Some("virtual".into()),
        return_type: None,
        calling_convention: None,
        params: Vec::new(),
        address: slot_offset.map(|o| format!("0x{:X}", o)),
        span: Span::default(),
    })
}

fn class(name: &str, members: Vec<Declaration>) -> SourceFile {
    SourceFile {
        declarations: vec![Declaration::Class(ClassDecl {
            name: name.into(),
            bases: Vec::new(),
            members,
            span: Span::default(),
        })],
    }
}

/// (type index, gap before the field, whether the offset is written out)
fn field_strategy() -> impl Strategy<Value = Vec<(usize, u64, bool)>> {
    prop::collection::vec((0..FIELD_TYPES.len(), 0u64..16, any::<bool>()), 1..12)
}

/// Offsets in `// offset 0x..` comments, in emission order.
fn emitted_offsets(header: &str) -> Vec<u64> {
    header
        .lines()
        .filter_map(|line| line.split("// offset 0x").nth(1))
        .map(|hex| u64::from_str_radix(hex.trim(), 16).unwrap())
        .collect()
}

fn asserted_size(header: &str) -> Option<u64> {
    let start = header.find("== 0x")? + "== 0x".len();
    let end = start + header[start..].find(',')?;
    u64::from_str_radix(&header[start..end], 16).ok()
}

// =============================================================================
// Layout Properties
// =============================================================================

proptest! {
    /// Property: fields are emitted in ascending offset order, every byte is covered exactly once,
    /// and the size assertion equals last offset + last size
    #[test]
    fn fields_are_contiguous_and_sized(fields in field_strategy()) {
        let mut members = Vec::new();
        let mut cursor = 0u64;
        let mut last = (0u64, 0u64);
        for (index, (ty_index, gap, explicit)) in fields.iter().enumerate() {
            let (ty, size) = FIELD_TYPES[*ty_index];
            // The first field always needs an offset; later fields may only omit it when contiguous.
            let explicit = index == 0 || *explicit || *gap > 0;
            let offset = if explicit { cursor + gap } else { cursor };
            members.push(variable(format!("f{}", index), ty, explicit.then_some(offset)));
            last = (offset, size);
            cursor = offset + size;
        }

        let header = compile_source_file(&class("Layout", members), &CompileOptions::default()).unwrap();

        let offsets = emitted_offsets(&header);
        prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(asserted_size(&header), Some(last.0 + last.1));
    }

    /// Property: every declared virtual keeps its relative order and pads fill exactly the skipped slots
    #[test]
    fn vtable_order_is_preserved(skips in prop::collection::vec(0u64..4, 1..10)) {
        let mut members = Vec::new();
        let mut expected = Vec::new();
        let mut slot = 0u64;
        for (index, skip) in skips.iter().enumerate() {
            for _ in 0..*skip {
                expected.push(format!("vpad_{:x}", slot * 4));
                slot += 1;
            }
            let name = format!("V{}", index);
            let declared = (*skip > 0).then_some(slot * 4);
            members.push(virtual_function(name.clone(), declared));
            expected.push(name);
            slot += 1;
        }

        let header = compile_source_file(&class("Vtbl", members), &CompileOptions::default()).unwrap();
        let emitted: Vec<String> = header
            .lines()
            .filter_map(|line| line.trim().strip_prefix("virtual void "))
            .map(|rest| rest.split('(').next().unwrap_or_default().to_string())
            .collect();
        prop_assert_eq!(emitted, expected);
        prop_assert_eq!(asserted_size(&header), Some(4));
    }

    /// Property: identical input produces byte-identical output
    #[test]
    fn codegen_is_idempotent(fields in field_strategy()) {
        let members: Vec<_> = fields
            .iter()
            .enumerate()
            .map(|(index, (ty_index, gap, _))| {
                variable(format!("f{}", index), FIELD_TYPES[*ty_index].0, Some(index as u64 * 32 + gap))
            })
            .collect();
        let file = class("Stable", members);

        let first = compile_source_file(&file, &CompileOptions::default()).unwrap();
        let second = compile_source_file(&file, &CompileOptions::default()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: a free function without an address never produces output
    #[test]
    fn free_function_requires_address(name in "[A-Za-z_][A-Za-z0-9_]{0,24}") {
        let file = SourceFile {
            declarations: vec![Declaration::Function(FunctionDecl {
                name,
                modifier: None,
                return_type: Some("int".into()),
                calling_convention: None,
                params: Vec::new(),
                address: None,
                span: Span::line(1),
            })],
        };
        let result = compile_source_file(&file, &CompileOptions::default());
        let is_missing_address =
            matches!(result, Err(CompileError::Build(BuildError::MissingAddress { .. })));
        prop_assert!(is_missing_address);
    }

    /// Property: raw block text passes through verbatim with its delimiters stripped
    #[test]
    fn raw_blocks_pass_through(text in "[a-zA-Z0-9 #<>_;=(){}]{1,60}") {
        let file = SourceFile {
            declarations: vec![Declaration::Raw(RawDecl {
                text: format!("```{}```", text),
                span: Span::default(),
            })],
        };
        let header = compile_source_file(&file, &CompileOptions::default()).unwrap();
        let expected = format!("\n{}\n", text);
        prop_assert!(header.contains(&expected));
        prop_assert!(!header.contains("```"));
    }
}
