//! Primitive type vocabulary and byte widths.
//!
//! Field layout depends on knowing how many bytes each declared type occupies. Primitive widths are fixed per target
//! data model, so they live here as a registry; sizes of user-declared classes are derived later from the model.
//!
//! ## Notes
//! - Lookup is **case-sensitive** and covers C++ spellings plus the MSVC `__intN` and `<cstdint>` aliases.
//! - `void` is a valid primitive with no size: it is legal as a return type but cannot be laid out as a field.
//!
//! ## Examples
//! ```rust
//! use relang_core::lang::primitives::{self, DataModel};
//!
//! assert_eq!(primitives::size_of("int", DataModel::Ilp32), Some(4));
//! assert_eq!(primitives::size_of("long", DataModel::Lp64), Some(8));
//! assert_eq!(primitives::size_of("void", DataModel::Ilp32), None);
//! ```

use super::registry::{LangItemInfo, Stability};

/// Integer/pointer width convention of the target binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataModel {
    /// 32-bit targets: `int`, `long` and pointers are 4 bytes.
    #[default]
    Ilp32,
    /// 64-bit Windows: `long` stays 4 bytes, pointers are 8 bytes.
    Llp64,
    /// 64-bit Unix: `long` and pointers are 8 bytes.
    Lp64,
}

impl DataModel {
    /// Width of a data pointer (and of a vtable slot) in bytes.
    pub fn pointer_width(self) -> u64 {
        match self {
            DataModel::Ilp32 => 4,
            DataModel::Llp64 | DataModel::Lp64 => 8,
        }
    }

    /// Width of `long` in bytes.
    pub fn long_width(self) -> u64 {
        match self {
            DataModel::Ilp32 | DataModel::Llp64 => 4,
            DataModel::Lp64 => 8,
        }
    }

    /// Width of `wchar_t` in bytes (UTF-16 on Windows data models, UTF-32 on LP64).
    pub fn wchar_width(self) -> u64 {
        match self {
            DataModel::Ilp32 | DataModel::Llp64 => 2,
            DataModel::Lp64 => 4,
        }
    }

    /// Parse a data model name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ilp32" => Some(DataModel::Ilp32),
            "llp64" => Some(DataModel::Llp64),
            "lp64" => Some(DataModel::Lp64),
            _ => None,
        }
    }
}

/// How a primitive's width is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Same width on every data model.
    Bytes(u64),
    /// Width of `long` on the data model.
    Long,
    /// Width of `wchar_t` on the data model.
    WideChar,
    /// Width of a pointer on the data model (`size_t`, `uintptr_t`, ...).
    PointerSized,
    /// No storage (`void`).
    Unsized,
}

impl Width {
    /// Resolve to a byte count under `model`.
    pub fn resolve(self, model: DataModel) -> Option<u64> {
        match self {
            Width::Bytes(n) => Some(n),
            Width::Long => Some(model.long_width()),
            Width::WideChar => Some(model.wchar_width()),
            Width::PointerSized => Some(model.pointer_width()),
            Width::Unsized => None,
        }
    }
}

/// Stable identifier for a primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveId {
    Void,
    Bool,
    Char,
    SignedChar,
    UnsignedChar,
    WChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    Double,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    SizeT,
    UIntPtr,
    IntPtr,
}

/// Metadata for a primitive type: vocabulary entry plus its width rule.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveInfo {
    pub item: LangItemInfo<PrimitiveId>,
    pub width: Width,
}

/// Registry of primitive types understood by the layout pass.
pub const PRIMITIVES: &[PrimitiveInfo] = &[
    info(PrimitiveId::Void, "void", &[], Width::Unsized, "No value; valid only as a return type."),
    info(PrimitiveId::Bool, "bool", &[], Width::Bytes(1), "Boolean byte."),
    info(PrimitiveId::Char, "char", &[], Width::Bytes(1), "Plain character byte."),
    info(PrimitiveId::SignedChar, "signed char", &[], Width::Bytes(1), "Signed byte."),
    info(PrimitiveId::UnsignedChar, "unsigned char", &[], Width::Bytes(1), "Unsigned byte."),
    info(PrimitiveId::WChar, "wchar_t", &[], Width::WideChar, "Wide character."),
    info(PrimitiveId::Short, "short", &["signed short", "short int"], Width::Bytes(2), "16-bit signed integer."),
    info(PrimitiveId::UnsignedShort, "unsigned short", &["unsigned short int"], Width::Bytes(2), "16-bit unsigned integer."),
    info(PrimitiveId::Int, "int", &["signed", "signed int", "__int32"], Width::Bytes(4), "32-bit signed integer."),
    info(PrimitiveId::UnsignedInt, "unsigned int", &["unsigned"], Width::Bytes(4), "32-bit unsigned integer."),
    info(PrimitiveId::Long, "long", &["long int", "signed long"], Width::Long, "Data-model dependent signed integer."),
    info(PrimitiveId::UnsignedLong, "unsigned long", &["unsigned long int"], Width::Long, "Data-model dependent unsigned integer."),
    info(PrimitiveId::LongLong, "long long", &["__int64", "long long int"], Width::Bytes(8), "64-bit signed integer."),
    info(PrimitiveId::UnsignedLongLong, "unsigned long long", &["unsigned __int64"], Width::Bytes(8), "64-bit unsigned integer."),
    info(PrimitiveId::Float, "float", &[], Width::Bytes(4), "IEEE-754 single precision."),
    info(PrimitiveId::Double, "double", &[], Width::Bytes(8), "IEEE-754 double precision."),
    info(PrimitiveId::Int8, "int8_t", &["__int8"], Width::Bytes(1), "Fixed-width 8-bit signed integer."),
    info(PrimitiveId::UInt8, "uint8_t", &[], Width::Bytes(1), "Fixed-width 8-bit unsigned integer."),
    info(PrimitiveId::Int16, "int16_t", &["__int16"], Width::Bytes(2), "Fixed-width 16-bit signed integer."),
    info(PrimitiveId::UInt16, "uint16_t", &[], Width::Bytes(2), "Fixed-width 16-bit unsigned integer."),
    info(PrimitiveId::Int32, "int32_t", &[], Width::Bytes(4), "Fixed-width 32-bit signed integer."),
    info(PrimitiveId::UInt32, "uint32_t", &[], Width::Bytes(4), "Fixed-width 32-bit unsigned integer."),
    info(PrimitiveId::Int64, "int64_t", &[], Width::Bytes(8), "Fixed-width 64-bit signed integer."),
    info(PrimitiveId::UInt64, "uint64_t", &[], Width::Bytes(8), "Fixed-width 64-bit unsigned integer."),
    info(PrimitiveId::SizeT, "size_t", &[], Width::PointerSized, "Pointer-width unsigned size."),
    info(PrimitiveId::UIntPtr, "uintptr_t", &[], Width::PointerSized, "Pointer-width unsigned integer."),
    info(PrimitiveId::IntPtr, "intptr_t", &["ptrdiff_t"], Width::PointerSized, "Pointer-width signed integer."),
];

/// Resolve a spelling to a [`PrimitiveId`].
pub fn from_str(name: &str) -> Option<PrimitiveId> {
    PRIMITIVES.iter().find(|p| p.item.matches(name)).map(|p| p.item.id)
}

/// Byte width of the primitive spelled `name` under `model`.
///
/// ## Returns
/// - `Some(bytes)` for a sized primitive.
/// - `None` for `void` and for names that are not primitives (user types are sized by the model).
pub fn size_of(name: &str, model: DataModel) -> Option<u64> {
    PRIMITIVES
        .iter()
        .find(|p| p.item.matches(name))
        .and_then(|p| p.width.resolve(model))
}

const fn info(
    id: PrimitiveId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    width: Width,
    description: &'static str,
) -> PrimitiveInfo {
    PrimitiveInfo {
        item: LangItemInfo {
            id,
            canonical,
            aliases,
            description,
            stability: Stability::Stable,
        },
        width,
    }
}
