use super::{Binding, CallingConventionId, ModifierId, TypeRef, Visibility};

/// One function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: name.into(), ty }
    }
}

/// A free function or class member function.
///
/// `address` is the absolute call address for free, instance and static functions. A virtual function is dispatched
/// through its vtable slot instead: while its class is open, `address` holds the declared vtable byte offset (if any);
/// once the class is sealed its position among the virtual functions is the slot and the binding is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    pub name: String,
    pub return_type: TypeRef,
    pub modifier: Option<ModifierId>,
    pub params: Vec<Parameter>,
    pub calling_convention: Option<CallingConventionId>,
    pub address: Binding,
    /// Synthesized to occupy an unknown vtable slot.
    pub is_pad: bool,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: TypeRef::void(),
            modifier: None,
            params: Vec::new(),
            calling_convention: None,
            address: Binding::Unbound,
            is_pad: false,
        }
    }

    /// A pad virtual function for the vtable slot at byte offset `offset`.
    pub fn vtable_pad(offset: u64) -> Self {
        Self {
            name: format!("vpad_{:x}", offset),
            modifier: Some(ModifierId::Virtual),
            address: Binding::Bound(offset),
            is_pad: true,
            ..Function::new("")
        }
    }

    pub fn with_return_type(mut self, ty: TypeRef) -> Self {
        self.return_type = ty;
        self
    }

    pub fn with_modifier(mut self, modifier: ModifierId) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_calling_convention(mut self, cc: CallingConventionId) -> Self {
        self.calling_convention = Some(cc);
        self
    }

    pub fn with_address(mut self, address: u64) -> Self {
        self.address = Binding::Bound(address);
        self
    }

    pub fn is_virtual(&self) -> bool {
        self.modifier == Some(ModifierId::Virtual)
    }

    pub fn is_static(&self) -> bool {
        self.modifier == Some(ModifierId::Static)
    }

    pub fn visibility(&self) -> Visibility {
        if self.is_pad { Visibility::Private } else { Visibility::Public }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_function_returns_void() {
        let f = Function::new("Jump");
        assert!(f.return_type.is_void());
        assert_eq!(f.address, Binding::Unbound);
        assert!(!f.is_virtual() && !f.is_static());
    }

    #[test]
    fn test_vtable_pad() {
        let pad = Function::vtable_pad(0x2C);
        assert_eq!(pad.name, "vpad_2c");
        assert!(pad.is_virtual());
        assert!(pad.params.is_empty());
        assert!(pad.return_type.is_void());
        assert_eq!(pad.visibility(), Visibility::Private);
    }

    #[test]
    fn test_builder_setters() {
        let f = Function::new("TakeDamage")
            .with_return_type(TypeRef::named("bool"))
            .with_param(Parameter::new("amount", TypeRef::named("float")))
            .with_calling_convention(CallingConventionId::Thiscall)
            .with_address(0x401230);
        assert_eq!(f.params.len(), 1);
        assert_eq!(f.address.value(), Some(0x401230));
        assert_eq!(f.visibility(), Visibility::Public);
    }
}
