//! C++ spelling of the emitted overlay.
//!
//! Classes are wrapped in `#pragma pack(1)` so the compiler never inserts its own padding; every byte of the layout
//! is spelled out by fields and pads. Non-virtual functions become inline trampolines that cast their fixed address
//! to a function pointer and forward the arguments.

use relang_core::lang::conventions;

use super::config::Include;
use super::syntax::{CallScope, TargetSyntax, Trampoline};
use crate::model::{Class, Function, TypeRef, Variable, VariableKind, Visibility};

pub const GENERATED_BANNER: &str = "// DO NOT EDIT. THIS FILE WAS GENERATED BY THE RELANG COMPILER";

#[derive(Debug, Clone, Copy, Default)]
pub struct CppSyntax;

fn hex(value: u64) -> String {
    format!("0x{:X}", value)
}

fn param_list(function: &Function) -> String {
    function
        .params
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect::<Vec<_>>()
        .join(", ")
}

impl TargetSyntax for CppSyntax {
    fn file_header(&self, include_guard: bool, includes: &[Include]) -> Vec<String> {
        let mut lines = vec![GENERATED_BANNER.to_string()];
        if include_guard {
            lines.push("#pragma once".to_string());
        }
        for include in includes {
            if include.relative {
                lines.push(format!("#include \"{}\"", include.path));
            } else {
                lines.push(format!("#include <{}>", include.path));
            }
        }
        lines
    }

    fn forward_declaration(&self, class: &Class) -> String {
        format!("class {};", class.name)
    }

    fn class_prologue(&self, class: &Class) -> Vec<String> {
        let mut head = format!("class {}", class.name);
        if !class.bases.is_empty() {
            let bases: Vec<_> = class.bases.iter().map(|b| format!("public {}", b)).collect();
            head.push_str(" : ");
            head.push_str(&bases.join(", "));
        }
        vec!["#pragma pack(push)".to_string(), "#pragma pack(1)".to_string(), head]
    }

    fn class_epilogue(&self, class: &Class, asserted_size: Option<u64>) -> Vec<String> {
        let mut lines = vec!["};".to_string()];
        if let Some(size) = asserted_size {
            lines.push(format!(
                "static_assert(sizeof({}) == {}, \"Unexpected class size\");",
                class.name,
                hex(size)
            ));
        }
        lines.push("#pragma pack(pop)".to_string());
        lines
    }

    fn access_label(&self, visibility: Visibility) -> &'static str {
        match visibility {
            Visibility::Public => "public:",
            Visibility::Private => "private:",
        }
    }

    fn field(&self, variable: &Variable, offset: u64) -> String {
        match variable.kind {
            VariableKind::Pad { len } => format!(
                "{} {}[{}]; // offset {}",
                variable.ty,
                variable.name,
                len,
                hex(offset)
            ),
            VariableKind::Field => format!("{} {}; // offset {}", variable.ty, variable.name, hex(offset)),
        }
    }

    fn pure_virtual(&self, function: &Function) -> String {
        format!(
            "virtual {} {}({}) = 0;",
            function.return_type,
            function.name,
            param_list(function)
        )
    }

    fn trampoline(&self, function: &Function, scope: CallScope, address: u64) -> Trampoline {
        let prefix = if scope == CallScope::Static { "static inline" } else { "inline" };
        let signature = format!(
            "{} {} {}({})",
            prefix,
            function.return_type,
            function.name,
            param_list(function)
        );

        let mut arg_types = Vec::with_capacity(function.params.len() + 1);
        let mut args = Vec::with_capacity(function.params.len() + 1);
        if scope == CallScope::Instance {
            arg_types.push("decltype(this)".to_string());
            args.push("this".to_string());
        }
        for param in &function.params {
            arg_types.push(param.ty.to_string());
            args.push(param.name.clone());
        }

        let cc = function.calling_convention.map(conventions::as_str).unwrap_or("");
        let body = vec![
            format!(
                "using Func_t = {}({}*)({});",
                function.return_type,
                cc,
                arg_types.join(", ")
            ),
            format!("auto f = reinterpret_cast<Func_t>({});", hex(address)),
            format!("return f({});", args.join(", ")),
        ];

        Trampoline { signature, body }
    }

    fn global_variable(&self, variable: &Variable, address: u64) -> String {
        let pointer = match &variable.ty {
            TypeRef::Named(name) => format!("{}*", name),
            TypeRef::Pointer(pointee) => format!("{}**", pointee),
        };
        format!(
            "inline {}& {} = *({}){};",
            variable.ty,
            variable.name,
            pointer,
            hex(address)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CallingConventionId, ModifierId, Parameter};

    #[test]
    fn test_class_head_with_bases() {
        let class = Class::new("Player", vec!["Entity".into(), "IDrawable".into()]);
        assert_eq!(
            CppSyntax.class_prologue(&class),
            vec!["#pragma pack(push)", "#pragma pack(1)", "class Player : public Entity, public IDrawable"]
        );
    }

    #[test]
    fn test_forward_declaration() {
        let class = Class::new("Player", vec!["Entity".into()]);
        assert_eq!(CppSyntax.forward_declaration(&class), "class Player;");
    }

    #[test]
    fn test_fields_and_pads() {
        let field = Variable::new("target", TypeRef::pointer("Entity"));
        assert_eq!(CppSyntax.field(&field, 0x14), "Entity* target; // offset 0x14");
        assert_eq!(
            CppSyntax.field(&Variable::pad(0x4, 12), 0x4),
            "char pad_4[12]; // offset 0x4"
        );
    }

    #[test]
    fn test_instance_trampoline_with_convention() {
        let f = Function::new("TakeDamage")
            .with_return_type(TypeRef::named("bool"))
            .with_param(Parameter::new("amount", TypeRef::named("float")))
            .with_param(Parameter::new("source", TypeRef::pointer("Entity")))
            .with_calling_convention(CallingConventionId::Thiscall);

        let t = CppSyntax.trampoline(&f, CallScope::Instance, 0x4012A0);
        assert_eq!(t.signature, "inline bool TakeDamage(float amount, Entity* source)");
        assert_eq!(
            t.body,
            vec![
                "using Func_t = bool(__thiscall*)(decltype(this), float, Entity*);",
                "auto f = reinterpret_cast<Func_t>(0x4012A0);",
                "return f(this, amount, source);",
            ]
        );
    }

    #[test]
    fn test_static_trampoline_has_no_instance_pointer() {
        let f = Function::new("Count")
            .with_return_type(TypeRef::named("int"))
            .with_modifier(ModifierId::Static);
        let t = CppSyntax.trampoline(&f, CallScope::Static, 0x10);
        assert_eq!(t.signature, "static inline int Count()");
        assert_eq!(t.body[0], "using Func_t = int(*)();");
        assert_eq!(t.body[2], "return f();");
    }

    #[test]
    fn test_pure_virtual() {
        let f = Function::new("Update")
            .with_modifier(ModifierId::Virtual)
            .with_param(Parameter::new("dt", TypeRef::named("float")));
        assert_eq!(CppSyntax.pure_virtual(&f), "virtual void Update(float dt) = 0;");
    }

    #[test]
    fn test_global_variable_reference() {
        let tick = Variable::new("g_Tick", TypeRef::named("int"));
        assert_eq!(
            CppSyntax.global_variable(&tick, 0xA1B2C0),
            "inline int& g_Tick = *(int*)0xA1B2C0;"
        );
        let world = Variable::new("g_World", TypeRef::pointer("World"));
        assert_eq!(
            CppSyntax.global_variable(&world, 0xA1B2C4),
            "inline World*& g_World = *(World**)0xA1B2C4;"
        );
    }

    #[test]
    fn test_header_includes() {
        let header = CppSyntax.file_header(true, &[Include::system("cstdint"), Include::local("sdk.h")]);
        assert_eq!(
            header,
            vec![GENERATED_BANNER, "#pragma once", "#include <cstdint>", "#include \"sdk.h\""]
        );
    }
}
